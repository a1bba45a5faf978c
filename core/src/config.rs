use serde::{Deserialize, Serialize};
use std::env::var;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://rowguard.db";

/// `DATABASE_URL`, if set and non-empty.
pub fn get_var_database_url() -> Option<String> {
    var("DATABASE_URL").ok().filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    /// Create the database file when it doesn't exist.
    pub create_if_missing: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: 4,
            create_if_missing: true,
        }
    }
}

impl Config {
    /// Apply environment variables on top of file configuration.
    pub fn with_env(mut self) -> Self {
        if let Some(url) = get_var_database_url() {
            self.database_url = url;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = serde_json::from_str(r#"{"database_url": "sqlite::memory:"}"#).unwrap();
        assert_eq!(config.database_url, "sqlite::memory:");
        assert_eq!(config.max_connections, 4);
        assert!(config.create_if_missing);
    }

    #[test]
    fn test_with_env() {
        let file = Config {
            database_url: "sqlite://file.db".to_string(),
            ..Config::default()
        };
        std::env::set_var("DATABASE_URL", "");
        assert_eq!(file.clone().with_env().database_url, "sqlite://file.db");
        std::env::set_var("DATABASE_URL", "sqlite://env.db");
        let config = file.with_env();
        std::env::remove_var("DATABASE_URL");
        assert_eq!(config.database_url, "sqlite://env.db");
        assert_eq!(config.max_connections, 4);
    }
}
