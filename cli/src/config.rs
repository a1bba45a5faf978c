use anyhow::Result as AnyResult;
use std::path::{Path, PathBuf};
pub use rowguard::config::Config;

static CONFIG_REL_PATHS: [&str; 2] = [".rowguard/config.toml", ".rowguard.toml"];

fn search_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![PathBuf::from("."), PathBuf::from("..")];
    dirs.extend(dirs::config_dir());
    dirs.extend(dirs::home_dir());
    dirs
}

/// The first config file found wins. `DATABASE_URL` overrides whatever it says.
pub fn load_config() -> AnyResult<Config> {
    for dir in search_dirs() {
        for rel_path in &CONFIG_REL_PATHS {
            let path = dir.join(rel_path);
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config");
                return Ok(read(&path)?.with_env());
            }
        }
    }
    Ok(Config::default().with_env())
}

pub fn read(path: impl AsRef<Path>) -> AnyResult<Config> {
    let buf = std::fs::read_to_string(path.as_ref())?;
    let config: Config = toml::from_str(&buf)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "database_url = \"sqlite://forms.db\"\nmax_connections = 1").unwrap();
        let config = read(file.path()).unwrap();
        assert_eq!(config.database_url, "sqlite://forms.db");
        assert_eq!(config.max_connections, 1);
        assert!(config.create_if_missing);
    }

    #[test]
    fn test_database_url_env_wins() {
        std::env::set_var("DATABASE_URL", "sqlite://from-env.db");
        let config = load_config();
        std::env::remove_var("DATABASE_URL");
        assert_eq!(config.unwrap().database_url, "sqlite://from-env.db");
    }

    #[test]
    fn test_read_rejects_bad_types() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_connections = \"many\"").unwrap();
        assert!(read(file.path()).is_err());
    }
}
