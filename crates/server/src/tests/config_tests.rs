use super::{load_settings_from, prepare_database_url, Settings};

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_serve_reference_catalog_on_localhost() {
    let settings = load_settings_from(None, env_from(&[]));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.server_bind, "127.0.0.1:3000");
    assert!(settings.catalog_database_url.is_none());
}

#[test]
fn file_values_override_defaults() {
    let file = r#"
bind_addr = "0.0.0.0:8080"
catalog_database_url = "sqlite://./data/catalog.db"
"#;
    let settings = load_settings_from(Some(file), env_from(&[]));
    assert_eq!(settings.server_bind, "0.0.0.0:8080");
    assert_eq!(
        settings.catalog_database_url.as_deref(),
        Some("sqlite://./data/catalog.db")
    );
}

#[test]
fn prefixed_env_wins_over_plain_env_and_file() {
    let file = r#"bind_addr = "0.0.0.0:8080""#;
    let settings = load_settings_from(
        Some(file),
        env_from(&[
            ("SERVER_BIND", "127.0.0.1:4000"),
            ("APP__BIND_ADDR", "127.0.0.1:5000"),
            ("CATALOG_DATABASE_URL", "sqlite://plain.db"),
        ]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:5000");
    assert_eq!(
        settings.catalog_database_url.as_deref(),
        Some("sqlite://plain.db")
    );
}

#[test]
fn blank_catalog_url_falls_back_to_reference_catalog() {
    let settings = load_settings_from(None, env_from(&[("APP__CATALOG_DATABASE_URL", "  ")]));
    assert!(settings.catalog_database_url.is_none());
}

#[test]
fn malformed_file_is_ignored() {
    let settings = load_settings_from(Some("bind_addr = ["), env_from(&[]));
    assert_eq!(settings, Settings::default());
}

#[test]
fn existing_urls_pass_through_untouched() {
    assert_eq!(
        prepare_database_url(" sqlite::memory: ").expect("memory url"),
        "sqlite::memory:"
    );
    assert_eq!(
        prepare_database_url("sqlite://./data/catalog.db").expect("sqlite url"),
        "sqlite://./data/catalog.db"
    );
}

#[test]
fn plain_path_becomes_sqlite_url_with_parent_dir() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();

    let temp_root = env::temp_dir().join(format!("product_server_config_test_{suffix}"));
    let db_path = temp_root.join("data").join("catalog.db");

    let prepared =
        prepare_database_url(db_path.to_string_lossy().as_ref()).expect("prepare db url");
    assert!(temp_root.join("data").exists());
    assert_eq!(prepared, format!("sqlite://{}", db_path.to_string_lossy()));

    fs::remove_dir_all(temp_root).expect("cleanup");
}
