use jakarta_config::{
    discover_config_path, load_for_workspace, ConfigError, DiagnosticsConfig, JakartaConfig,
    LoggingConfig,
};
use pretty_assertions::assert_eq;

#[test]
fn empty_file_yields_defaults() {
    let config = JakartaConfig::load_from_str("").unwrap();
    assert_eq!(config, JakartaConfig::default());
    assert_eq!(config.logging.level, "info");
    assert!(config.logging.stderr);
    assert!(config.diagnostics.enabled);
    assert_eq!(config.diagnostics.max_per_rule, 256);
}

#[test]
fn sections_override_defaults() {
    let config = JakartaConfig::load_from_str(
        r#"
[logging]
level = "debug"
json = true

[diagnostics]
disabled_rules = ["generated-date", "jsonb-creator"]
max_per_rule = 8
"#,
    )
    .unwrap();

    assert_eq!(
        config.logging,
        LoggingConfig {
            level: "debug".into(),
            json: true,
            stderr: true,
            file: None,
        }
    );
    assert_eq!(
        config.diagnostics,
        DiagnosticsConfig {
            enabled: true,
            disabled_rules: vec!["generated-date".into(), "jsonb-creator".into()],
            max_per_rule: 8,
            parallel_rules: false,
        }
    );
}

#[test]
fn unknown_keys_are_rejected() {
    let err = JakartaConfig::load_from_str("[diagnostics]\nenable = false\n").unwrap_err();
    assert!(matches!(err, ConfigError::Toml(_)), "{err}");
}

#[test]
fn missing_file_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");
    let err = JakartaConfig::load_from_path(&path).unwrap_err();
    match err {
        ConfigError::Io { path: reported, .. } => assert_eq!(reported, path.display().to_string()),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn discovery_prefers_root_file() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(discover_config_path(dir.path()), None);

    std::fs::create_dir(dir.path().join(".jakarta")).unwrap();
    std::fs::write(
        dir.path().join(".jakarta/config.toml"),
        "[diagnostics]\nenabled = false\n",
    )
    .unwrap();
    let nested = discover_config_path(dir.path()).unwrap();
    assert!(nested.ends_with(".jakarta/config.toml"));

    std::fs::write(dir.path().join("jakarta.toml"), "[logging]\nlevel = \"warn\"\n").unwrap();
    let root = discover_config_path(dir.path()).unwrap();
    assert!(root.ends_with("jakarta.toml"));

    let (config, path) = load_for_workspace(dir.path()).unwrap();
    assert_eq!(path, Some(root));
    assert_eq!(config.logging.level, "warn");
    assert!(config.diagnostics.enabled);
}

#[test]
fn workspace_without_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (config, path) = load_for_workspace(dir.path()).unwrap();
    assert_eq!(config, JakartaConfig::default());
    assert_eq!(path, None);
}
