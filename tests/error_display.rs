use fsl_lib::{ErrorCategory, FslError};

#[test]
fn config_error_display_includes_message() {
    let err = FslError::Config("missing node-id".to_string());

    assert_eq!(format!("{}", err), "Configuration error: missing node-id");
}

#[test]
fn io_error_display_wraps_source() {
    let io_err = std::io::Error::other("disk full");
    let err: FslError = io_err.into();
    let rendered = format!("{}", err);

    assert!(rendered.starts_with("IO error: "));
    assert!(rendered.contains("disk full"));
}

#[test]
fn figma_api_helper_includes_status_and_message() {
    let err = FslError::figma_api(Some(reqwest::StatusCode::NOT_FOUND), "not found");

    assert_eq!(
        format!("{}", err),
        "Figma API error (status: Some(404)): not found"
    );
}

#[test]
fn figma_api_helper_handles_missing_status() {
    let err = FslError::figma_api(None, "missing token");

    assert_eq!(
        format!("{}", err),
        "Figma API error (status: None): missing token"
    );
}

#[test]
fn unrepresentable_bag_reports_style_category() {
    let source = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
    let err = FslError::from(source);

    assert!(format!("{}", err).starts_with("Serialization error: "));
    assert_eq!(err.to_payload().category, ErrorCategory::Style);
}
