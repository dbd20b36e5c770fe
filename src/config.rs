//! Bridge configuration.
//!
//! Layered, later sources win:
//!   ~/.config/eventkit-bridge/config.toml (optional)
//!   the file given with `--config`
//!   `EVENTKIT_BRIDGE_*` environment variables

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use config::{Config, Environment, File};
use eventkit_core::Capabilities;
use eventkit_core::HostTimeZone;
use eventkit_core::memory::MemorySeed;
use serde::Deserialize;

const ENV_PREFIX: &str = "EVENTKIT_BRIDGE";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BridgeConfig {
    /// IANA zone name for wall-clock fields. Unset uses the system zone.
    #[serde(default)]
    pub time_zone: Option<String>,

    /// JSON file the in-memory store starts from. `~` is expanded.
    #[serde(default)]
    pub store_seed: Option<PathBuf>,

    /// Override what the host reports.
    #[serde(default)]
    pub full_access_api: Option<bool>,
    #[serde(default)]
    pub exposes_attendees: Option<bool>,

    /// `tracing` filter directive, used when `RUST_LOG` is unset.
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl BridgeConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?
            .join("eventkit-bridge");

        Ok(config_dir.join("config.toml"))
    }

    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        Self::load_from(Self::config_path().ok(), explicit)
    }

    fn load_from(global: Option<PathBuf>, explicit: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = global {
            builder = builder.add_source(File::from(path).required(false));
        }
        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        }

        builder
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .context("Failed to read config")?
            .try_deserialize()
            .context("Invalid config")
    }

    pub fn zone(&self) -> Result<HostTimeZone> {
        match self.time_zone.as_deref() {
            None => Ok(HostTimeZone::Local),
            Some(name) => {
                HostTimeZone::named(name).ok_or_else(|| anyhow!("Unknown time zone: {}", name))
            }
        }
    }

    pub fn seed_path(&self) -> Option<PathBuf> {
        self.store_seed.as_ref().map(|path| {
            PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
        })
    }

    /// What the host reports, with configured overrides applied.
    pub fn capabilities(&self, host: Capabilities) -> Capabilities {
        Capabilities {
            full_access_api: self.full_access_api.unwrap_or(host.full_access_api),
            exposes_attendees: self.exposes_attendees.unwrap_or(host.exposes_attendees),
        }
    }
}

pub fn load_seed(path: &Path) -> Result<MemorySeed> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read store seed {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Invalid store seed {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn config_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = BridgeConfig::load_from(None, None).unwrap();
        assert_eq!(config.zone().unwrap(), HostTimeZone::Local);
        assert!(config.seed_path().is_none());
    }

    #[test]
    fn test_explicit_file() {
        let file = config_file(
            r#"
time_zone = "Asia/Tokyo"
store_seed = "/tmp/seed.json"
full_access_api = true
log_filter = "eventkit_core=debug"
"#,
        );
        let config = BridgeConfig::load_from(None, Some(file.path())).unwrap();

        assert_eq!(config.zone().unwrap(), HostTimeZone::named("Asia/Tokyo").unwrap());
        assert_eq!(config.seed_path(), Some(PathBuf::from("/tmp/seed.json")));
        assert_eq!(config.log_filter.as_deref(), Some("eventkit_core=debug"));
        assert_eq!(
            config.capabilities(Capabilities::default()),
            Capabilities {
                full_access_api: true,
                exposes_attendees: false,
            }
        );
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = BridgeConfig::load_from(None, Some(Path::new("/nonexistent/bridge.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_global_file_is_fine() {
        let config =
            BridgeConfig::load_from(Some(PathBuf::from("/nonexistent/config.toml")), None);
        assert!(config.is_ok());
    }

    #[test]
    fn test_unknown_zone_is_an_error() {
        let config = BridgeConfig {
            time_zone: Some("Mars/Olympus_Mons".to_string()),
            ..BridgeConfig::default()
        };
        assert!(config.zone().is_err());
    }

    #[test]
    fn test_unset_overrides_keep_host_capabilities() {
        let host = Capabilities {
            full_access_api: true,
            exposes_attendees: true,
        };
        let config = BridgeConfig {
            exposes_attendees: Some(false),
            ..BridgeConfig::default()
        };
        assert_eq!(
            config.capabilities(host),
            Capabilities {
                full_access_api: true,
                exposes_attendees: false,
            }
        );
    }

    #[test]
    fn test_seed_path_expands_tilde() {
        let config = BridgeConfig {
            store_seed: Some(PathBuf::from("~/seed.json")),
            ..BridgeConfig::default()
        };
        let path = config.seed_path().unwrap();
        assert!(!path.to_string_lossy().starts_with('~'));
        assert!(path.ends_with("seed.json"));
    }

    #[test]
    fn test_load_seed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "default_reminder_calendar": "todo", "grant_on_request": false }"#)
            .unwrap();

        let seed = load_seed(file.path()).unwrap();
        assert_eq!(seed.default_reminder_calendar.as_deref(), Some("todo"));
        assert!(!seed.grant_on_request);
    }

    #[test]
    fn test_invalid_seed_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();
        assert!(load_seed(file.path()).is_err());
    }
}
