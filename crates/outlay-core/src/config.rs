//! Application configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file
    pub database_path: PathBuf,
    /// Path to the legacy flat-store file, read once during import
    pub legacy_store_path: PathBuf,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            database_path: data_dir.join("outlay.db"),
            legacy_store_path: data_dir.join("local-store.json"),
        }
    }

    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .map(|d| d.join("Outlay"))
            .unwrap_or_else(|| PathBuf::from(".outlay"))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Self::data_dir())
    }
}

// Simple dirs implementation for common directories
mod dirs {
    use std::path::PathBuf;

    pub fn data_local_dir() -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            std::env::var("LOCALAPPDATA").ok().map(PathBuf::from)
        }
        #[cfg(target_os = "macos")]
        {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join("Library/Application Support"))
        }
        #[cfg(target_os = "linux")]
        {
            std::env::var("XDG_DATA_HOME")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    std::env::var("HOME")
                        .ok()
                        .map(|h| PathBuf::from(h).join(".local/share"))
                })
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
        {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_live_under_the_data_dir() {
        let config = Config::new(PathBuf::from("/tmp/outlay-test"));
        assert_eq!(
            config.database_path,
            PathBuf::from("/tmp/outlay-test/outlay.db")
        );
        assert_eq!(
            config.legacy_store_path,
            PathBuf::from("/tmp/outlay-test/local-store.json")
        );
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = Config::new(PathBuf::from("/tmp/outlay-test"));
        let json = serde_json::to_string(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back.database_path, config.database_path);
        assert_eq!(back.legacy_store_path, config.legacy_store_path);
    }
}
