use std::collections::HashMap;

use super::*;

fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_database_url("./data/test.db"),
        "sqlite://./data/test.db"
    );
    assert_eq!(normalize_database_url("  "), Settings::default().database_url);
    assert_eq!(normalize_database_url("sqlite::memory:"), "sqlite::memory:");
}

#[test]
fn keeps_windows_absolute_path_with_single_sqlite_colon() {
    assert_eq!(
        normalize_database_url("sqlite:C:\\Users\\alice\\test.db"),
        "sqlite:C:/Users/alice/test.db"
    );
    assert_eq!(
        normalize_database_url("C:\\Users\\alice\\test.db"),
        "sqlite:C:/Users/alice/test.db"
    );
    assert_eq!(
        normalize_database_url("sqlite://C:/Users/alice/test.db"),
        "sqlite:C:/Users/alice/test.db"
    );
}

#[test]
fn file_settings_override_defaults() {
    let mut settings = Settings::default();
    apply_file(
        &mut settings,
        r#"
        bind_addr = "0.0.0.0:8080"
        body_limit_bytes = 4096
        unrelated = true
        "#,
    )
    .expect("parse");

    assert_eq!(settings.server_bind, "0.0.0.0:8080");
    assert_eq!(settings.body_limit_bytes, 4096);
    assert_eq!(settings.database_url, Settings::default().database_url);
}

#[test]
fn malformed_file_leaves_settings_alone() {
    let mut settings = Settings::default();
    assert!(apply_file(&mut settings, "bind_addr = [").is_err());
    assert_eq!(settings, Settings::default());
}

#[test]
fn prefixed_env_vars_win() {
    let mut settings = Settings::default();
    apply_env(
        &mut settings,
        env(&[
            ("SERVER_BIND", "127.0.0.1:1"),
            ("APP__BIND_ADDR", "127.0.0.1:2"),
            ("DATABASE_URL", "sqlite::memory:"),
            ("APP__BODY_LIMIT_BYTES", "2048"),
        ]),
    );

    assert_eq!(settings.server_bind, "127.0.0.1:2");
    assert_eq!(settings.database_url, "sqlite::memory:");
    assert_eq!(settings.body_limit_bytes, 2048);
}

#[test]
fn unparsable_body_limit_is_ignored() {
    let mut settings = Settings::default();
    apply_env(&mut settings, env(&[("APP__BODY_LIMIT_BYTES", "lots")]));
    assert_eq!(settings.body_limit_bytes, Settings::default().body_limit_bytes);
}

#[tokio::test]
async fn normalized_path_opens_as_sqlite_file() {
    let temp_root = tempfile::tempdir().expect("tempdir");
    let db_path = temp_root.path().join("nested").join("designs.db");

    let url = normalize_database_url(db_path.to_string_lossy().as_ref());
    let storage = storage::Storage::new(&url).await.expect("open sqlite");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should be created: {}",
        db_path.display()
    );
}
