//! Service configuration loader for chatstore.
//!
//! Reads a TOML file (by default `{data_dir}/config.toml`) and deserializes it
//! into [`ServiceConfig`]. Falls back to defaults when the file is missing or
//! malformed, so a fresh install starts without any setup.

use std::path::Path;

use chatstore_types::config::ServiceConfig;

use crate::sqlite::pool::default_database_url;

/// Load service configuration from `path`.
///
/// - If the file does not exist, returns [`ServiceConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_service_config(path: &Path) -> ServiceConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return ServiceConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return ServiceConfig::default();
        }
    };

    match toml::from_str::<ServiceConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            ServiceConfig::default()
        }
    }
}

/// Resolve the database URL.
///
/// Priority:
/// 1. Explicit override (CLI flag or `DATABASE_URL`)
/// 2. `database.url` from the config file
/// 3. `{data_dir}/chatstore.db`
pub fn resolve_database_url(config: &ServiceConfig, override_url: Option<&str>) -> String {
    override_url
        .map(str::to_string)
        .or_else(|| config.database.url.clone())
        .unwrap_or_else(default_database_url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_service_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_service_config(&tmp.path().join("config.toml")).await;
        assert_eq!(config.server.port, 8080);
        assert!(config.database.url.is_none());
    }

    #[tokio::test]
    async fn load_service_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(
            &config_path,
            r#"
[server]
host = "127.0.0.1"
port = 3001
max_body_bytes = 4096

[database]
url = "sqlite:///var/lib/chatstore/chat.db?mode=rwc"
reader_connections = 2
"#,
        )
        .await
        .unwrap();

        let config = load_service_config(&config_path).await;
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.max_body_bytes, 4096);
        assert_eq!(config.database.reader_connections, 2);
        assert_eq!(config.database.query_timeout_ms, 5_000);
    }

    #[tokio::test]
    async fn load_service_config_malformed_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        tokio::fs::write(&config_path, "[server\nport = ").await.unwrap();

        let config = load_service_config(&config_path).await;
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn resolve_database_url_prefers_override() {
        let mut config = ServiceConfig::default();
        config.database.url = Some("sqlite://from-file.db".to_string());

        assert_eq!(
            resolve_database_url(&config, Some("sqlite://from-flag.db")),
            "sqlite://from-flag.db"
        );
        assert_eq!(resolve_database_url(&config, None), "sqlite://from-file.db");
    }

    #[test]
    fn resolve_database_url_falls_back_to_data_dir() {
        let url = resolve_database_url(&ServiceConfig::default(), None);
        assert!(url.ends_with("chatstore.db?mode=rwc"));
    }
}
