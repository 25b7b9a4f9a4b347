use std::path::PathBuf;

use qcreview::config::{ConfigFlags, load_config_flags, parse_flag_tokens};

#[test]
fn test_config_file_parsing_ignores_comments_and_blank_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".qcreviewrc");
    let content = r"
# comment
--verbose

--images plots

--debug-log=debug.log
";
    std::fs::write(&path, content).unwrap();

    let flags = load_config_flags(&path).unwrap();
    assert!(flags.verbose);
    assert_eq!(flags.images, Some(PathBuf::from("plots")));
    assert_eq!(flags.debug_log, Some(PathBuf::from("debug.log")));
}

#[test]
fn test_cli_flags_override_file_flags() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".qcreviewrc");
    let content = "--no-viewed\n--initials AB\n--debug-log file.log\n";
    std::fs::write(&path, content).unwrap();

    let file_flags = load_config_flags(&path).unwrap();
    let cli_args = vec![
        "qcreview".to_string(),
        "--initials".to_string(),
        "JD".to_string(),
        "--force-half-cell".to_string(),
    ];
    let cli_flags = parse_flag_tokens(&cli_args);

    let effective = file_flags.union(&cli_flags);
    assert!(effective.no_viewed, "file flags should remain enabled");
    assert!(effective.force_half_cell, "cli flags should be applied");
    assert_eq!(
        effective.initials.as_deref(),
        Some("JD"),
        "cli should override initials"
    );
    assert_eq!(
        effective.debug_log,
        Some(PathBuf::from("file.log")),
        "file config should be preserved when CLI does not override"
    );
}

#[test]
fn test_parse_flag_tokens_handles_equals_syntax() {
    let args = vec![
        "qcreview".to_string(),
        "--image-column=plot".to_string(),
        "--images=figs".to_string(),
    ];
    let flags = parse_flag_tokens(&args);
    assert_eq!(flags.image_column.as_deref(), Some("plot"));
    assert_eq!(flags.images, Some(PathBuf::from("figs")));
}

#[test]
fn test_missing_config_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let flags = load_config_flags(&dir.path().join("absent")).unwrap();
    assert_eq!(flags, ConfigFlags::default());
}
