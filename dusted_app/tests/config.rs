use std::{fs, path::PathBuf};

use dusted_app::{App, AppError, Config};

#[test]
fn missing_config_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(&dir.path().join("config.json")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn config_round_trips_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings").join("config.json");
    let config = Config {
        dustforce_path: dir.path().to_path_buf(),
    };
    config.write(&path).unwrap();

    let loaded = Config::load(&path).unwrap();
    assert_eq!(loaded, config);
    assert!(loaded.has_dustforce_dir());
}

#[test]
fn partial_config_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{}").unwrap();
    assert_eq!(Config::load(&path).unwrap(), Config::default());
}

#[test]
fn malformed_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{ not json").unwrap();
    let error = Config::load(&path).unwrap_err();
    assert!(matches!(error, AppError::ConfigParseError { .. }));
    assert!(error.to_string().contains("invalid config file"));
}

#[test]
fn set_dustforce_directory_saves_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.json");
    let mut app = App::new(Config::default());

    app.set_dustforce_directory(dir.path(), &config_path)
        .unwrap();

    assert_eq!(app.config().dustforce_path, PathBuf::from(dir.path()));
    assert_eq!(Config::load(&config_path).unwrap(), *app.config());
}
