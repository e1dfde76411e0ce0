use jsonfilter::config::Config;
use tempfile::TempDir;

#[test]
fn test_config_defaults() {
    let config = Config::default();

    assert_eq!(config.log_level, "warn");
    assert!(config.decompress_gzip);
    assert!(config.selectors.is_empty());
}

#[test]
fn test_custom_config() {
    let config = Config {
        log_level: "debug".to_string(),
        decompress_gzip: false,
        selectors: vec!["store.book[0]".to_string()],
    };

    assert_eq!(config.log_level, "debug");
    assert!(!config.decompress_gzip);
    assert_eq!(config.selectors.len(), 1);
}

#[test]
fn test_config_path() {
    if let Some(path) = Config::config_path() {
        assert!(path.ends_with(".config/jsonfilter/config.toml"));
    }
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let config = Config {
        log_level: "info".to_string(),
        decompress_gzip: false,
        selectors: vec!["a.b".to_string(), "$..id".to_string()],
    };
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "log_level = \"trace\"\n").unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.log_level, "trace");
    assert!(loaded.decompress_gzip);
    assert!(loaded.selectors.is_empty());
}

#[test]
fn test_invalid_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "selectors = \"not a list\"\n").unwrap();

    let err = Config::load_from(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse config file"));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = Config::load_from(dir.path().join("absent.toml")).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to read config file"));
}

#[test]
fn test_load_or_default_missing_file_uses_defaults() {
    let dir = TempDir::new().unwrap();
    let loaded = Config::load_or_default(dir.path().join("config.toml")).unwrap();
    assert_eq!(loaded, Config::default());
}

#[test]
fn test_load_or_default_reports_invalid_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "log_level = [\n").unwrap();

    let err = Config::load_or_default(&path).unwrap_err();
    assert!(format!("{:#}", err).contains(&path.display().to_string()));
}
