//! Configuration system
//!
//! Provides hierarchical configuration loading from:
//! - `config.toml` (default configuration)
//! - `config.local.toml` (git-ignored local overrides)
//! - Environment variables (`MIMIR_` prefix)
//!
//! ## Example
//!
//! ```toml
//! # config.toml
//! [valla]
//! bitset_pool_initial_segment_bits = 1024
//! hash_map_initial_capacity = 1024
//!
//! [search]
//! default_open_list_capacity = 4096
//! ```
//!
//! Environment variable overrides:
//! ```bash
//! MIMIR_VALLA__HASH_MAP_INITIAL_CAPACITY=4096
//! MIMIR_SEARCH__DEFAULT_BUDGET_MS=30000
//! ```

use figment::providers::{Env, Format, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Top-level configuration struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub valla: VallaConfig,
    pub search: SearchConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Sizing knobs for the canonical set-encoding engine (component C/D/F).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VallaConfig {
    /// Initial segment size (in 64-bit blocks) for the bitset pool.
    pub bitset_pool_initial_segment_blocks: usize,

    /// Initial capacity of the Swiss-table maps; must be a multiple of 16.
    pub hash_map_initial_capacity: usize,

    /// Growth factor applied on rehash.
    pub rehash_growth_factor: f64,
}

impl Default for VallaConfig {
    fn default() -> Self {
        VallaConfig {
            bitset_pool_initial_segment_blocks: 1024,
            hash_map_initial_capacity: 1024,
            rehash_growth_factor: 2.0,
        }
    }
}

/// Defaults for the search kernel (component K).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Initial capacity reserved for the open list's backing heap.
    pub default_open_list_capacity: usize,

    /// Default wall-clock budget in milliseconds (`None` via `0` = unlimited).
    #[serde(default)]
    pub default_budget_ms: u64,

    /// Default `k` for k-FWL canonical labelling.
    pub default_fwl_k: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            default_open_list_capacity: 4096,
            default_budget_ms: 0,
            default_fwl_k: 2,
        }
    }
}

/// Logging configuration (severity filter only; subscriber wiring lives in
/// `main.rs` since library users may want their own).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            filter: default_log_filter(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            valla: VallaConfig::default(),
            search: SearchConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from `config.toml`, `config.local.toml`, and
    /// `MIMIR_`-prefixed environment variables, falling back to defaults
    /// for anything unset.
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(figment::providers::Serialized::defaults(Config::default()))
            .merge(Toml::file("config.toml"))
            .merge(Toml::file("config.local.toml"))
            .merge(Env::prefixed("MIMIR_").split("__"))
            .extract()
    }
}
