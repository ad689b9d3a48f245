pub mod state;
pub mod theme;
pub mod timezone;

pub use state::{Config, TokenCfg};
pub use theme::Theme;
pub use timezone::UserTimezone;

use std::path::{Path, PathBuf};

pub const CONFIG_ENV: &str = "PULSE_CHART_CONFIG";
const APP_DIR: &str = "pulse-chart";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// `$PULSE_CHART_CONFIG`, or `<config dir>/pulse-chart/config.json`.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    dirs_next::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}

pub fn read_from_file(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the user config. A missing file is normal; any other failure is
/// reported and the defaults are used.
pub fn load() -> (Config, Option<ConfigError>) {
    let Some(path) = config_path() else {
        return (Config::default(), None);
    };

    match read_from_file(&path) {
        Ok(config) => (config, None),
        Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
            (Config::default(), None)
        }
        Err(err) => (Config::default(), Some(err)),
    }
}
