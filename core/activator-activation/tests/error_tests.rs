use activator_activation::ActivationError;
use activator_crypto::CryptoError;
use activator_store::StoreError;

fn all_errors() -> Vec<ActivationError> {
    vec![
        ActivationError::MissingParameters("hardware_ids".into()),
        ActivationError::InvalidParameters("body is not JSON".into()),
        ActivationError::TokenNotFound,
        ActivationError::TokenAlreadyUsed,
        ActivationError::TokenExpired,
        ActivationError::Crypto(CryptoError::InvalidPublicKey),
        ActivationError::Persistence(StoreError::Storage("database is locked".into())),
        ActivationError::UpstreamFetch("connection reset".into()),
        ActivationError::Internal("script row missing".into()),
    ]
}

#[test]
fn status_codes() {
    let codes: Vec<u16> = all_errors().iter().map(ActivationError::status_code).collect();
    assert_eq!(codes, vec![400, 400, 404, 403, 403, 500, 500, 502, 500]);
}

#[test]
fn only_persistence_and_upstream_are_retryable() {
    let retryable: Vec<bool> = all_errors().iter().map(ActivationError::is_retryable).collect();
    assert_eq!(
        retryable,
        vec![false, false, false, false, false, false, true, true, false]
    );
}

#[test]
fn public_messages_carry_no_detail() {
    for err in all_errors() {
        let public = err.public_message();
        assert!(!public.is_empty());
        for detail in ["hardware_ids", "JSON", "database", "connection", "row"] {
            assert!(!public.contains(detail), "{public:?} leaks {detail:?}");
        }
    }
}

#[test]
fn display_keeps_detail_for_logs() {
    let err = ActivationError::MissingParameters("hardware_ids".into());
    assert!(err.to_string().contains("hardware_ids"));

    let err = ActivationError::UpstreamFetch("connection reset".into());
    assert!(err.to_string().contains("connection reset"));
}

#[test]
fn from_crypto_and_store_errors() {
    let err: ActivationError = CryptoError::InvalidPublicKey.into();
    assert!(matches!(err, ActivationError::Crypto(_)));

    let err: ActivationError = StoreError::Poisoned.into();
    assert!(matches!(err, ActivationError::Persistence(_)));
}
