//! Execution metadata resolution from a free-text platform report.

use activator_types::{ExecutionConfig, ExecutionMetadata, PlatformKey};

/// Ordered substring rules. The first rule with a needle contained in the
/// lowercased platform string wins; no match resolves to
/// [`PlatformKey::Default`].
///
/// The order is part of the client contract: `win` is tested first, so a
/// report such as `darwin-arm64` matches it before the `darwin` rule.
pub const PLATFORM_RULES: &[(&[&str], PlatformKey)] = &[
    (&["win"], PlatformKey::Windows),
    (&["linux"], PlatformKey::Linux),
    (&["darwin", "mac"], PlatformKey::Darwin),
];

/// Maps a platform report to a config key. Absent or empty reports map to
/// [`PlatformKey::Default`].
#[must_use]
pub fn platform_key(platform_info: Option<&str>) -> PlatformKey {
    let Some(info) = platform_info.filter(|s| !s.is_empty()) else {
        return PlatformKey::Default;
    };
    let lowered = info.to_lowercase();

    PLATFORM_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|n| lowered.contains(n)))
        .map_or(PlatformKey::Default, |(_, key)| *key)
}

/// Picks the execution metadata for `platform_info`.
///
/// Falls back to the `default` entry, then to empty metadata. Never fails.
#[must_use]
pub fn resolve_metadata(
    config: &ExecutionConfig,
    platform_info: Option<&str>,
) -> ExecutionMetadata {
    let key = platform_key(platform_info);
    config
        .get(key)
        .or_else(|| config.get(PlatformKey::Default))
        .cloned()
        .unwrap_or_else(ExecutionMetadata::empty)
}
