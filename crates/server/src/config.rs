use std::{collections::HashMap, fs, path::Path};

use anyhow::Context;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub server_bind: String,
    /// When unset the built-in reference catalog is served.
    pub catalog_database_url: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:3000".into(),
            catalog_database_url: None,
        }
    }
}

pub fn load_settings() -> Settings {
    let file_contents = fs::read_to_string("server.toml").ok();
    load_settings_from(file_contents.as_deref(), |key| std::env::var(key).ok())
}

/// Layers defaults, then `server.toml` contents, then environment variables.
pub(crate) fn load_settings_from(
    file_contents: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Some(raw) = file_contents {
        match toml::from_str::<HashMap<String, String>>(raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.get("bind_addr") {
                    settings.server_bind = v.clone();
                }
                if let Some(v) = file_cfg.get("catalog_database_url") {
                    settings.catalog_database_url = Some(v.clone());
                }
            }
            Err(error) => tracing::warn!(%error, "ignoring unparseable server.toml"),
        }
    }

    if let Some(v) = env("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Some(v) = env("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Some(v) = env("CATALOG_DATABASE_URL") {
        settings.catalog_database_url = Some(v);
    }
    if let Some(v) = env("APP__CATALOG_DATABASE_URL") {
        settings.catalog_database_url = Some(v);
    }

    settings.catalog_database_url = settings
        .catalog_database_url
        .filter(|url| !url.trim().is_empty());

    settings
}

/// Turns a plain file path into an sqlite url and creates its parent directory.
/// Values that already are urls pass through untouched.
pub fn prepare_database_url(raw_database_url: &str) -> anyhow::Result<String> {
    let raw_database_url = raw_database_url.trim();
    if raw_database_url.starts_with("sqlite:") || raw_database_url.contains("://") {
        return Ok(raw_database_url.to_string());
    }

    if let Some(parent) = Path::new(raw_database_url)
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        fs::create_dir_all(parent).with_context(|| {
            format!(
                "failed to create parent directory '{}' for catalog database '{raw_database_url}'",
                parent.display()
            )
        })?;
    }

    Ok(format!("sqlite://{}", raw_database_url.replace('\\', "/")))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
