//! Property tests for the rejection taxonomy.

use http::StatusCode;
use lindy_core::{ErrorKind, Failure, FieldError, Rejection};
use proptest::prelude::*;

proptest! {
    #[test]
    fn message_rejections_keep_status_and_message(code in 400u16..600, message in "[a-zA-Z ]{0,32}") {
        let status = StatusCode::from_u16(code).unwrap();
        let rejection = Rejection::new(status, message.as_str());

        prop_assert_eq!(rejection.status(), status);
        prop_assert_eq!(rejection.payload()["message"].as_str(), Some(message.as_str()));
        prop_assert!(rejection.payload()["error"].is_string());

        let (normalized, payload) = Failure::from(rejection.clone()).into_parts(false);
        prop_assert_eq!(normalized, status);
        prop_assert_eq!(&payload, rejection.payload());
    }

    #[test]
    fn field_errors_from_rejections_map_status(code in 400u16..600) {
        let status = StatusCode::from_u16(code).unwrap();
        let err = FieldError::from_rejection("f", Rejection::labelled(status, "Custom", "m"));

        prop_assert_eq!(err.kind, ErrorKind::from_status(status));
        prop_assert_eq!(err.field.as_deref(), Some("f"));
        prop_assert_eq!(err.message.as_str(), "m");
    }
}

#[test]
fn faults_never_leak_when_hidden() {
    let failure = Failure::fault(std::io::Error::new(
        std::io::ErrorKind::Other,
        "password=hunter2",
    ));
    let (status, payload) = failure.into_parts(false);
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!payload.to_string().contains("hunter2"));
}
