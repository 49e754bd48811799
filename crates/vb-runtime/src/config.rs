//! # Runtime Configuration
//!
//! Environment-driven configuration with sane defaults.
//!
//! | Variable                 | Default            |
//! |--------------------------|--------------------|
//! | `VOTEBOARD_HTTP_ADDR`    | `127.0.0.1:4000`   |
//! | `VOTEBOARD_DATA_DIR`     | `./data/voteboard` |
//! | `VOTEBOARD_IN_MEMORY`    | `false`            |
//! | `VOTEBOARD_SEED`         | `false`            |
//! | `VOTEBOARD_CORS_ORIGINS` | empty (allow any)  |

use std::env;
use std::path::PathBuf;

use tracing::warn;

/// Complete runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// HTTP listen address.
    pub http_addr: String,
    /// RocksDB data directory (ignored in memory mode).
    pub data_dir: PathBuf,
    /// Use the volatile in-memory store instead of RocksDB.
    pub in_memory: bool,
    /// Seed demo projects and an enabled gate into an empty store.
    pub seed_demo_data: bool,
    /// CORS allow-list; empty allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            http_addr: "127.0.0.1:4000".to_string(),
            data_dir: PathBuf::from("./data/voteboard"),
            in_memory: false,
            seed_demo_data: false,
            cors_origins: Vec::new(),
        }
    }
}

impl RuntimeConfig {
    /// Load from process environment.
    pub fn load() -> Self {
        Self::from_env(|key| env::var(key).ok())
    }

    fn from_env(get: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            http_addr: get("VOTEBOARD_HTTP_ADDR").unwrap_or(defaults.http_addr),
            data_dir: get("VOTEBOARD_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            in_memory: get("VOTEBOARD_IN_MEMORY")
                .map(|v| parse_bool("VOTEBOARD_IN_MEMORY", &v))
                .unwrap_or(defaults.in_memory),
            seed_demo_data: get("VOTEBOARD_SEED")
                .map(|v| parse_bool("VOTEBOARD_SEED", &v))
                .unwrap_or(defaults.seed_demo_data),
            cors_origins: get("VOTEBOARD_CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or(defaults.cors_origins),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> bool {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => true,
        "0" | "false" | "no" => false,
        other => {
            warn!(key, value = other, "unrecognized boolean, using false");
            false
        }
    }
}
