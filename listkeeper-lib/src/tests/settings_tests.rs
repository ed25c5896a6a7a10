use super::*;
use tempfile::TempDir;

#[test]
fn missing_file_gives_empty_settings() {
    let tmp = TempDir::new().unwrap();
    let settings = load_settings_from(&tmp.path().join("settings.toml"));
    assert_eq!(settings, Settings::default());
}

#[test]
fn reads_data_dir_and_names_only() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("settings.toml");
    std::fs::write(
        &path,
        "[data]\ndir = \"/srv/list/data\"\n\n[resolve]\nnames_only = true\n",
    )
    .unwrap();

    let settings = load_settings_from(&path);
    assert_eq!(settings.data_dir, Some(PathBuf::from("/srv/list/data")));
    assert_eq!(settings.names_only, Some(true));
}

#[test]
fn garbage_file_is_ignored() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("settings.toml");
    std::fs::write(&path, "this is = = not toml").unwrap();
    assert_eq!(load_settings_from(&path), Settings::default());
}

#[test]
fn cli_override_wins() {
    let settings = Settings {
        data_dir: Some(PathBuf::from("/from/settings")),
        names_only: Some(false),
    };
    assert_eq!(
        settings.resolve_data_dir(Some(PathBuf::from("/from/cli"))),
        PathBuf::from("/from/cli")
    );
    assert_eq!(settings.resolve_data_dir(None), PathBuf::from("/from/settings"));
    assert!(settings.resolve_names_only(true));
    assert!(!settings.resolve_names_only(false));
}

#[test]
fn default_data_dir_is_under_cwd() {
    let dir = Settings::default().resolve_data_dir(None);
    assert!(dir.ends_with(DEFAULT_DATA_DIR));
}
