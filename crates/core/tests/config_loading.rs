//! Loading `ArmSwingConfig` from TOML files

use std::io::Write;

use arm_swing_core::{ArmSwingConfig, ArmSwingError, Vec3};

#[test]
fn test_load_full_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
speed = 2.5
gravity = [0.0, 0.0, -9.81]
damping = 0.5
swing_threshold = 0.1
up = [0.0, 0.0, 1.0]
"#
    )
    .unwrap();

    let config = ArmSwingConfig::load(file.path()).unwrap();
    assert_eq!(config.speed, 2.5);
    assert_eq!(config.gravity, Vec3::new(0.0, 0.0, -9.81));
    assert_eq!(config.damping, 0.5);
    assert_eq!(config.swing_threshold, 0.1);
    assert_eq!(config.up, Vec3::z());
}

#[test]
fn test_empty_file_yields_defaults() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let config = ArmSwingConfig::load(file.path()).unwrap();
    assert_eq!(config, ArmSwingConfig::default());
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    match ArmSwingConfig::load(&path) {
        Err(ArmSwingError::ConfigRead { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected ConfigRead, got {other:?}"),
    }
}

#[test]
fn test_wrong_vector_arity_is_parse_error() {
    let err = ArmSwingConfig::from_toml_str("gravity = [0.0, -9.81]").unwrap_err();
    assert!(matches!(err, ArmSwingError::ConfigParse(_)), "{err}");
}
