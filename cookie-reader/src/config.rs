use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub listen: Option<String>,

    /// Directory to write JSONL logs (app + access).
    /// Default: ./logs
    pub log_dir: Option<PathBuf>,

    pub cookies: CookieConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CookieConfig {
    /// Cookie read when a handler does not name one.
    pub cookie_name: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("cookies.cookie_name must not be empty")]
    EmptyCookieName,
}

impl AppConfig {
    /// Load and validate a config file. Relative paths inside it are resolved
    /// against the directory containing the file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut cfg = Self::from_yaml(&text)?;
        cfg.resolve_paths(path.parent().unwrap_or_else(|| Path::new(".")));
        Ok(cfg)
    }

    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        let cfg: AppConfig = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.cookies.cookie_name.trim().is_empty() {
            return Err(ConfigError::EmptyCookieName);
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> String {
        self.listen
            .clone()
            .unwrap_or_else(|| "127.0.0.1:8080".to_string())
    }

    pub fn log_dir_path(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("logs"))
    }

    pub fn resolve_paths(&mut self, base_dir: &Path) {
        if let Some(p) = &self.log_dir {
            self.log_dir = Some(resolve_path(base_dir, p));
        }
    }
}

fn resolve_path(base_dir: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_config_with_defaults() {
        let cfg = AppConfig::from_yaml("cookies:\n  cookie_name: myNeatApp\n").unwrap();
        assert_eq!(cfg.cookies.cookie_name, "myNeatApp");
        assert_eq!(cfg.listen_addr(), "127.0.0.1:8080");
        assert_eq!(cfg.log_dir_path(), PathBuf::from("logs"));
    }

    #[test]
    fn rejects_blank_cookie_name() {
        let err = AppConfig::from_yaml("cookies:\n  cookie_name: \"  \"\n").unwrap_err();
        assert!(matches!(err, ConfigError::EmptyCookieName));
    }

    #[test]
    fn cookies_section_is_required() {
        let err = AppConfig::from_yaml("listen: \"0.0.0.0:9000\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_resolves_log_dir_next_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "listen: \"127.0.0.1:0\"\nlog_dir: out\ncookies:\n  cookie_name: myNeatApp\n",
        )
        .unwrap();

        let cfg = AppConfig::load(&path).unwrap();
        assert_eq!(cfg.listen_addr(), "127.0.0.1:0");
        assert_eq!(cfg.log_dir_path(), dir.path().join("out"));
    }

    #[test]
    fn absolute_log_dir_is_kept() {
        let mut cfg = AppConfig::from_yaml("log_dir: /var/log/app\ncookies:\n  cookie_name: c\n").unwrap();
        cfg.resolve_paths(Path::new("/etc/app"));
        assert_eq!(cfg.log_dir_path(), PathBuf::from("/var/log/app"));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AppConfig::load(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.yaml"));
    }
}
