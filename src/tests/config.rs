use super::*;

#[test]
fn test_empty_file_gives_defaults() {
    let cfg = Config::parse("").unwrap();
    assert_eq!(cfg, Config::default());
    assert_eq!(cfg.export_dir(), PathBuf::from("exported"));
    assert_eq!(cfg.log_file(), None);
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let cfg = Config::parse("export_dir = \"out\"\nlog_file = \"sectio.log\"\n").unwrap();
    assert_eq!(cfg.export_dir, "out");
    assert_eq!(cfg.log_file(), Some(PathBuf::from("sectio.log")));
    assert_eq!(cfg.log_filter, "info");
}

#[test]
fn test_missing_file_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = Config::load_from(&dir.path().join(CONFIG_FILE));
    assert_eq!(cfg, Config::default());
}

#[test]
fn test_file_on_disk_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(CONFIG_FILE);
    fs::write(&path, "log_filter = \"debug\"\n").unwrap();
    assert_eq!(Config::load_from(&path).log_filter, "debug");
}
