use std::path::PathBuf;

use spellbook_lib::settings::*;

#[test]
fn missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = Settings::load_from(&dir.path().join("settings.toml")).unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.source_url, DEFAULT_SOURCE_URL);
    assert_eq!(settings.image_workers, DEFAULT_IMAGE_WORKERS);
}

#[test]
fn round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.toml");
    let settings = Settings {
        database: PathBuf::from("/srv/cards.db"),
        image_workers: 2,
        ..Settings::default()
    };

    settings.save_to(&path).unwrap();
    assert_eq!(Settings::load_from(&path).unwrap(), settings);
    assert!(!path.with_extension("toml.tmp").exists());
}

#[test]
fn partial_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "image_workers = 3\nsource_url = \"http://localhost/a.zip\"\n").unwrap();

    let settings = Settings::load_from(&path).unwrap();
    assert_eq!(settings.image_workers, 3);
    assert_eq!(settings.source_url, "http://localhost/a.zip");
    assert_eq!(settings.database, Settings::default().database);
    assert_eq!(settings.image_url_template, DEFAULT_IMAGE_URL_TEMPLATE);
}

#[test]
fn invalid_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "image_workers = \"many\"\n").unwrap();

    let err = Settings::load_from(&path).unwrap_err();
    assert!(err.to_string().contains("settings.toml"));
}

#[test]
fn settings_path_location() {
    let path = settings_path();
    assert!(path.ends_with("spellbook/settings.toml"));
}
