use portfolio_api::{ApiError, Result};

#[test]
fn test_error_display() {
    let err = ApiError::Api {
        status: 404,
        message: "Project not found".to_string(),
    };
    assert_eq!(err.to_string(), "API error (404): Project not found");
}

#[test]
fn test_validation_display_names_field() {
    let err = ApiError::validation("email", "must be a valid email address");
    assert!(err.to_string().contains("'email'"));
}

#[test]
fn test_result_alias() {
    fn returns_error() -> Result<()> {
        Err(ApiError::EmptyResponse)
    }
    assert!(returns_error().is_err());
}

// ============================================================================
// Transient error classification
// ============================================================================

#[test]
fn transient_errors() {
    assert!(ApiError::Http("connection reset".into()).is_transient());
    assert!(ApiError::Json("expected value".into()).is_transient());
    assert!(ApiError::EmptyResponse.is_transient());
    for status in [500, 502, 503, 504] {
        let err = ApiError::Api {
            status,
            message: String::new(),
        };
        assert!(err.is_transient(), "{status} should be transient");
    }
}

#[test]
fn permanent_errors() {
    for status in [400, 401, 403, 404, 409, 422, 429, 499] {
        let err = ApiError::Api {
            status,
            message: String::new(),
        };
        assert!(!err.is_transient(), "{status} should be permanent");
        assert!(err.is_client_error());
    }
    assert!(!ApiError::validation("name", "is required").is_transient());
    assert!(!ApiError::Configuration("bad".into()).is_transient());
}

#[test]
fn status_only_for_api_errors() {
    let err = ApiError::Api {
        status: 503,
        message: String::new(),
    };
    assert_eq!(err.status(), Some(503));
    assert!(!err.is_client_error());
    assert_eq!(ApiError::Http("x".into()).status(), None);
}

#[test]
fn json_errors_convert() {
    let err: ApiError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, ApiError::Json(_)));
}

#[test]
fn errors_are_cloneable_for_shared_outcomes() {
    let err = ApiError::Http("offline".into());
    assert_eq!(err.clone(), err);
}
