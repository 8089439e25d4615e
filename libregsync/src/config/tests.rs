use super::*;

fn fake_env(vars: &[(&str, &str)]) -> Environment {
    let map: config::Map<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Environment::with_prefix(ENV_PREFIX).source(Some(map))
}

fn full_env() -> Vec<(&'static str, &'static str)> {
    vec![
        ("REGSYNC_REGISTRY", "registry.example.com"),
        ("REGSYNC_NAMESPACE", "mirror"),
        ("REGSYNC_USERNAME", "bob"),
        ("REGSYNC_PASSWORD", "hunter2"),
    ]
}

#[test]
fn test_required_settings_and_defaults() {
    let cfg = SyncConfig::from_environment(fake_env(&full_env())).unwrap();
    assert_eq!(cfg.registry, "registry.example.com");
    assert_eq!(cfg.namespace, "mirror");
    assert_eq!(cfg.username, "bob");
    assert_eq!(cfg.password, "hunter2");
    assert_eq!(cfg.max_concurrent, 8);
    assert_eq!(cfg.retry_count, 2);
    assert_eq!(cfg.timeout_secs, 1200);
    assert_eq!(cfg.log_file, None);
    assert_eq!(cfg.skopeo_path, "skopeo");
}

#[test]
fn test_missing_required_setting_fails_with_variable_name() {
    let mut vars = full_env();
    vars.retain(|(k, _)| *k != "REGSYNC_PASSWORD");
    let err = SyncConfig::from_environment(fake_env(&vars)).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("password"), "unexpected message: {}", msg);
    assert!(msg.contains("REGSYNC_PASSWORD"), "unexpected message: {}", msg);
}

#[test]
fn test_blank_required_setting_is_treated_as_missing() {
    let mut vars = full_env();
    vars.retain(|(k, _)| *k != "REGSYNC_REGISTRY");
    vars.push(("REGSYNC_REGISTRY", "   "));
    let err = SyncConfig::from_environment(fake_env(&vars)).unwrap_err();
    assert!(matches!(err, SyncError::Config { .. }));
}

#[test]
fn test_tunable_overrides() {
    let mut vars = full_env();
    vars.push(("REGSYNC_MAX_CONCURRENT", "3"));
    vars.push(("REGSYNC_RETRY_COUNT", "0"));
    vars.push(("REGSYNC_TIMEOUT_SECS", "60"));
    vars.push(("REGSYNC_SKOPEO_PATH", "/usr/local/bin/skopeo"));
    vars.push(("REGSYNC_LOG_FILE", "sync.log"));
    let cfg = SyncConfig::from_environment(fake_env(&vars)).unwrap();
    assert_eq!(cfg.max_concurrent, 3);
    assert_eq!(cfg.retry_count, 0);
    assert_eq!(cfg.timeout_secs, 60);
    assert_eq!(cfg.skopeo_path, "/usr/local/bin/skopeo");
    assert_eq!(cfg.log_file, Some(PathBuf::from("sync.log")));
    assert_eq!(cfg.timeout(), Duration::from_secs(60));
}

#[test]
fn test_invalid_tunable_is_a_config_error() {
    let mut vars = full_env();
    vars.push(("REGSYNC_MAX_CONCURRENT", "lots"));
    let err = SyncConfig::from_environment(fake_env(&vars)).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("REGSYNC_MAX_CONCURRENT"), "unexpected message: {}", msg);
}
