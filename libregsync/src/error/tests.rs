use super::*;

#[test]
fn test_config_error_display() {
    let err = SyncError::config("missing required setting `registry` (REGSYNC_REGISTRY)");
    assert_eq!(
        err.to_string(),
        "Configuration error: missing required setting `registry` (REGSYNC_REGISTRY)"
    );
}

#[test]
fn test_input_error_carries_path() {
    let err = SyncError::input("images file not found", Some("images.txt"));
    match err {
        SyncError::Input { path, .. } => assert_eq!(path.as_deref(), Some("images.txt")),
        other => panic!("expected Input error, got {:?}", other),
    }
}

#[test]
fn test_auth_error_display() {
    let err = SyncError::auth("login rejected by registry.example.com");
    assert!(err.to_string().starts_with("Authentication error:"));
}

#[test]
fn test_tool_error_with_source_preserves_chain() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
    let err = SyncError::tool_with_source("failed to execute skopeo", io_err);
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_tool_error_without_source() {
    let err = SyncError::tool("copy tool unavailable");
    assert!(std::error::Error::source(&err).is_none());
}
