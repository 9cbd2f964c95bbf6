use activator_activation::{ActivationRequest, ActivationResponse};
use activator_types::ExecutionMetadata;
use pretty_assertions::assert_eq;
use serde_json::json;

#[test]
fn request_from_client_json() {
    let request: ActivationRequest = serde_json::from_value(json!({
        "install_session_token": "9f86d081884c7d659a2feaa0c55ad015",
        "hardware_ids": ["a", "b"],
        "client_public_key": "LS0tLS1CRUdJTg==",
        "platform_info": "linux-amd64,SysInfoSpec=V1.1"
    }))
    .unwrap();

    assert_eq!(request.install_session_token, "9f86d081884c7d659a2feaa0c55ad015");
    assert_eq!(request.hardware_ids, vec!["a", "b"]);
    assert_eq!(request.platform_info(), Some("linux-amd64,SysInfoSpec=V1.1"));
    assert!(request.missing_fields().is_empty());
}

#[test]
fn request_missing_fields_default_to_empty() {
    let request: ActivationRequest = serde_json::from_value(json!({
        "install_session_token": "abc"
    }))
    .unwrap();
    assert_eq!(request.missing_fields(), vec!["hardware_ids", "client_public_key"]);
    assert_eq!(request.platform_info(), None);
}

#[test]
fn empty_platform_info_is_absent() {
    let request = ActivationRequest {
        platform_info: Some(String::new()),
        ..Default::default()
    };
    assert_eq!(request.platform_info(), None);
}

#[test]
fn request_debug_hides_token() {
    let request = ActivationRequest {
        install_session_token: "9f86d081884c7d659a2feaa0c55ad015".to_string(),
        ..Default::default()
    };
    let debug = format!("{request:?}");
    assert!(debug.contains("9f86d0"));
    assert!(!debug.contains("9f86d081884c7d659a2feaa0c55ad015"));
}

#[test]
fn response_wire_shape() {
    let response = ActivationResponse {
        encrypted_session_script_key: "a2V5".to_string(),
        encrypted_script_blob: "YmxvYg==".to_string(),
        script_execution_metadata: ExecutionMetadata::new("python3", ["-u"]),
        status: "success".to_string(),
    };
    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "encrypted_session_script_key": "a2V5",
            "encrypted_script_blob": "YmxvYg==",
            "script_execution_metadata": { "interpreter": "python3", "args": ["-u"] },
            "status": "success"
        })
    );
}

#[test]
fn response_sealed_payload_rejects_bad_base64() {
    let response = ActivationResponse {
        encrypted_session_script_key: "***".to_string(),
        encrypted_script_blob: "YmxvYg==".to_string(),
        script_execution_metadata: ExecutionMetadata::empty(),
        status: "success".to_string(),
    };
    assert!(response.sealed_payload().is_err());
}
