//! Portal configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux/macOS: `~/.config/pdfportal/portal.toml`
//! - Windows: `%APPDATA%/pdfportal/portal.toml`
//!
//! API keys may instead come from `PDFPORTAL_WRITER_KEY` and
//! `PDFPORTAL_READER_KEY`, which take precedence over the file.

use std::fmt;
use std::path::{Path, PathBuf};

use pdfportal_client::Credentials;
use pdfportal_client::client::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};

pub const WRITER_KEY_ENV: &str = "PDFPORTAL_WRITER_KEY";
pub const READER_KEY_ENV: &str = "PDFPORTAL_READER_KEY";

/// Portal configuration.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Key allowed to create upload slots.
    #[serde(default)]
    pub writer_key: String,

    /// Key allowed to list and download files.
    #[serde(default)]
    pub reader_key: String,

    /// Where downloads are saved unless `--out` is given.
    #[serde(default = "default_download_dir")]
    pub download_dir: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}

fn default_download_dir() -> String {
    "~/Downloads".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            writer_key: String::new(),
            reader_key: String::new(),
            download_dir: default_download_dir(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("writer_key", &redact(&self.writer_key))
            .field("reader_key", &redact(&self.reader_key))
            .field("download_dir", &self.download_dir)
            .finish()
    }
}

fn redact(key: &str) -> &'static str {
    if key.is_empty() { "<unset>" } else { "<redacted>" }
}

impl Config {
    /// Loads configuration from `path` (or the platform default), creating
    /// a default file if none exists, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => config_path()?,
        };

        let mut config = Self::load_from(&path)?;
        config.apply_overrides(
            std::env::var(WRITER_KEY_ENV).ok(),
            std::env::var(READER_KEY_ENV).ok(),
        );
        Ok(config)
    }

    fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Saves the configuration to `path`.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        // Restrict permissions on Unix (may contain API keys).
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    fn apply_overrides(&mut self, writer_key: Option<String>, reader_key: Option<String>) {
        if let Some(key) = writer_key.filter(|k| !k.is_empty()) {
            self.writer_key = key;
        }
        if let Some(key) = reader_key.filter(|k| !k.is_empty()) {
            self.reader_key = key;
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.writer_key, &self.reader_key)
    }

    /// Download directory with a leading `~` expanded.
    pub fn download_dir(&self) -> PathBuf {
        expand_home(&self.download_dir)
    }
}

fn home_dir() -> PathBuf {
    #[cfg(windows)]
    let var = "USERPROFILE";
    #[cfg(not(windows))]
    let var = "HOME";

    std::env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| std::env::temp_dir())
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else if path == "~" {
        home_dir()
    } else {
        PathBuf::from(path)
    }
}

/// Returns the platform-specific configuration file path.
pub fn config_path() -> anyhow::Result<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        Ok(PathBuf::from(appdata).join("pdfportal").join("portal.toml"))
    }

    #[cfg(not(target_os = "windows"))]
    {
        Ok(home_dir()
            .join(".config")
            .join("pdfportal")
            .join("portal.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.writer_key.is_empty());
        assert!(config.reader_key.is_empty());
        assert_eq!(config.download_dir, "~/Downloads");
    }

    #[test]
    fn config_partial_toml() {
        let config: Config = toml::from_str(r#"reader_key = "alumno""#).unwrap();
        assert_eq!(config.reader_key, "alumno");
        assert!(config.writer_key.is_empty());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn load_creates_default_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("portal.toml");

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("portal.toml");
        let config = Config {
            base_url: "http://localhost:3000".into(),
            writer_key: "profe".into(),
            reader_key: "alumno".into(),
            download_dir: "/srv/pdfs".into(),
        };

        config.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[cfg(unix)]
    #[test]
    fn saved_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("portal.toml");
        Config::default().save_to(&path).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn env_overrides_take_precedence() {
        let mut config = Config {
            writer_key: "file-writer".into(),
            reader_key: "file-reader".into(),
            ..Config::default()
        };

        config.apply_overrides(Some("env-writer".into()), None);
        assert_eq!(config.writer_key, "env-writer");
        assert_eq!(config.reader_key, "file-reader");

        config.apply_overrides(None, Some(String::new()));
        assert_eq!(config.reader_key, "file-reader");
    }

    #[test]
    fn debug_hides_keys() {
        let config = Config {
            writer_key: "profe-1234".into(),
            reader_key: "alumno-5678".into(),
            ..Config::default()
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("profe-1234"));
        assert!(!rendered.contains("alumno-5678"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn download_dir_expands_home() {
        let config = Config {
            download_dir: "/tmp/pdfs".into(),
            ..Config::default()
        };
        assert_eq!(config.download_dir(), PathBuf::from("/tmp/pdfs"));

        let config = Config::default();
        assert!(config.download_dir().ends_with("Downloads"));
        assert!(!config.download_dir().starts_with("~"));
    }

    #[test]
    fn config_path_not_empty() {
        let path = config_path().unwrap();
        assert!(path.to_string_lossy().contains("pdfportal"));
    }
}
