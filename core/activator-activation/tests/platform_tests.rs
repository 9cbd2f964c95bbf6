use activator_activation::{platform_key, resolve_metadata, PLATFORM_RULES};
use activator_types::{ExecutionConfig, ExecutionMetadata, PlatformKey};
use pretty_assertions::assert_eq;

fn full_config() -> ExecutionConfig {
    ExecutionConfig::new()
        .with(
            PlatformKey::Windows,
            ExecutionMetadata::new("powershell", ["-ExecutionPolicy", "Bypass", "-File"]),
        )
        .with(PlatformKey::Linux, ExecutionMetadata::new("bash", Vec::<String>::new()))
        .with(PlatformKey::Darwin, ExecutionMetadata::new("zsh", Vec::<String>::new()))
        .with(PlatformKey::Default, ExecutionMetadata::new("python3", ["-u"]))
}

#[test]
fn rules_are_ordered() {
    let keys: Vec<PlatformKey> = PLATFORM_RULES.iter().map(|(_, k)| *k).collect();
    assert_eq!(keys, vec![PlatformKey::Windows, PlatformKey::Linux, PlatformKey::Darwin]);
}

#[test]
fn key_matching() {
    assert_eq!(platform_key(Some("Windows 10 Pro")), PlatformKey::Windows);
    assert_eq!(platform_key(Some("windows-amd64,SysInfoSpec=V1.1")), PlatformKey::Windows);
    assert_eq!(platform_key(Some("Ubuntu Linux 22.04")), PlatformKey::Linux);
    assert_eq!(platform_key(Some("macOS 14.2")), PlatformKey::Darwin);
    assert_eq!(platform_key(Some("MAC OS X")), PlatformKey::Darwin);
    assert_eq!(platform_key(Some("FreeBSD 13")), PlatformKey::Default);
}

#[test]
fn win_rule_is_tested_before_darwin() {
    // "darwin" contains "win".
    assert_eq!(platform_key(Some("Darwin 23.1.0")), PlatformKey::Windows);
}

#[test]
fn absent_or_empty_platform_is_default() {
    assert_eq!(platform_key(None), PlatformKey::Default);
    assert_eq!(platform_key(Some("")), PlatformKey::Default);
}

#[test]
fn resolves_matching_entry() {
    let meta = resolve_metadata(&full_config(), Some("Windows 10 Pro"));
    assert_eq!(meta, ExecutionMetadata::new("powershell", ["-ExecutionPolicy", "Bypass", "-File"]));

    let meta = resolve_metadata(&full_config(), Some("linux-arm64"));
    assert_eq!(meta.interpreter, "bash");
}

#[test]
fn falls_back_to_default_entry() {
    let config = ExecutionConfig::new()
        .with(PlatformKey::Default, ExecutionMetadata::new("python3", ["-u"]));
    assert_eq!(
        resolve_metadata(&config, Some("FreeBSD 13")),
        ExecutionMetadata::new("python3", ["-u"])
    );
    assert_eq!(
        resolve_metadata(&config, Some("Windows 10 Pro")),
        ExecutionMetadata::new("python3", ["-u"])
    );
    assert_eq!(resolve_metadata(&config, None), ExecutionMetadata::new("python3", ["-u"]));
}

#[test]
fn falls_back_to_empty_metadata() {
    let config = ExecutionConfig::new()
        .with(PlatformKey::Linux, ExecutionMetadata::new("bash", Vec::<String>::new()));
    let meta = resolve_metadata(&config, Some("macOS"));
    assert_eq!(meta, ExecutionMetadata::empty());
    assert!(meta.interpreter.is_empty());
    assert!(meta.args.is_empty());

    assert_eq!(resolve_metadata(&ExecutionConfig::new(), None), ExecutionMetadata::empty());
}
