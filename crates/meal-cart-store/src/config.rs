//! # Store Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     MEAL_CART_ON_MISSING_ITEM=reject                                   │
//! │     MEAL_CART_VALIDATE_ITEMS=false                                     │
//! │     MEAL_CART_LOG=debug                                                │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/meal-cart/cart.toml (Linux)                              │
//! │     ~/Library/Application Support/dev.meal-cart.meal-cart/cart.toml    │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # cart.toml
//! [cart]
//! on_missing_item = "ignore"  # ignore | reject
//! validate_items = true
//!
//! [logging]
//! filter = "info,meal_cart=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::{StoreError, StoreResult};

/// Environment variable overriding `cart.on_missing_item`.
pub const ENV_ON_MISSING_ITEM: &str = "MEAL_CART_ON_MISSING_ITEM";
/// Environment variable overriding `cart.validate_items`.
pub const ENV_VALIDATE_ITEMS: &str = "MEAL_CART_VALIDATE_ITEMS";
/// Environment variable overriding `logging.filter`.
pub const ENV_LOG: &str = "MEAL_CART_LOG";

// =============================================================================
// Missing Item Policy
// =============================================================================

/// What `remove_item` does when the id is not in the cart.
///
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  IGNORE (Default)                                                      │
/// │  • Cart unchanged, subscribers not notified                            │
/// │  • Returns Ok with the current snapshot                                │
/// │  • Logged at debug level                                               │
/// │                                                                         │
/// │  REJECT                                                                │
/// │  • Cart unchanged, subscribers not notified                            │
/// │  • Returns Err(ItemNotFound)                                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingItemPolicy {
    /// Treat as a no-op.
    #[default]
    Ignore,

    /// Surface `CoreError::ItemNotFound`.
    Reject,
}

impl std::fmt::Display for MissingItemPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissingItemPolicy::Ignore => write!(f, "ignore"),
            MissingItemPolicy::Reject => write!(f, "reject"),
        }
    }
}

impl std::str::FromStr for MissingItemPolicy {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ignore" | "noop" => Ok(MissingItemPolicy::Ignore),
            "reject" | "error" => Ok(MissingItemPolicy::Reject),
            other => Err(StoreError::InvalidConfig(format!(
                "Unknown missing-item policy: '{}'. Valid options: ignore, reject",
                other
            ))),
        }
    }
}

// =============================================================================
// Sections
// =============================================================================

/// Cart behavior settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSettings {
    /// Behavior of `remove_item` for ids not in the cart.
    #[serde(default)]
    pub on_missing_item: MissingItemPolicy,

    /// Validate candidates before `add_item` runs the reducer.
    #[serde(default = "default_validate_items")]
    pub validate_items: bool,
}

fn default_validate_items() -> bool {
    true
}

impl Default for CartSettings {
    fn default() -> Self {
        CartSettings {
            on_missing_item: MissingItemPolicy::default(),
            validate_items: default_validate_items(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `tracing_subscriber::EnvFilter` directives; `RUST_LOG` wins if set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info,meal_cart=debug".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Store Configuration
// =============================================================================

/// Complete store configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Cart behavior.
    #[serde(default)]
    pub cart: CartSettings,

    /// Log filter.
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl StoreConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`cart.toml`), if it exists
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> StoreResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading cart config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load cart config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML file without applying overrides.
    pub fn from_file(path: &Path) -> StoreResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> StoreResult<()> {
        if self.logging.filter.trim().is_empty() {
            return Err(StoreError::InvalidConfig(
                "logging.filter must not be empty".into(),
            ));
        }

        EnvFilter::try_new(&self.logging.filter).map_err(|e| {
            StoreError::InvalidConfig(format!(
                "logging.filter '{}' is not a valid filter: {}",
                self.logging.filter, e
            ))
        })?;

        Ok(())
    }

    /// Applies overrides from a variable lookup (the process environment in
    /// [`StoreConfig::load`]).
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(policy) = lookup(ENV_ON_MISSING_ITEM) {
            match policy.parse() {
                Ok(parsed) => {
                    debug!(policy = %policy, "Overriding missing-item policy from environment");
                    self.cart.on_missing_item = parsed;
                }
                Err(e) => warn!(policy = %policy, "Ignoring {}: {}", ENV_ON_MISSING_ITEM, e),
            }
        }

        if let Some(flag) = lookup(ENV_VALIDATE_ITEMS) {
            match flag.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.cart.validate_items = true,
                "0" | "false" | "no" | "off" => self.cart.validate_items = false,
                _ => warn!(flag = %flag, "Unknown value for {}", ENV_VALIDATE_ITEMS),
            }
        }

        if let Some(filter) = lookup(ENV_LOG) {
            self.logging.filter = filter;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "meal-cart", "meal-cart")
            .map(|dirs| dirs.config_dir().join("cart.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!(
            "ignore".parse::<MissingItemPolicy>().unwrap(),
            MissingItemPolicy::Ignore
        );
        assert_eq!(
            "REJECT".parse::<MissingItemPolicy>().unwrap(),
            MissingItemPolicy::Reject
        );
        assert_eq!(
            "error".parse::<MissingItemPolicy>().unwrap(),
            MissingItemPolicy::Reject
        );
        assert!("explode".parse::<MissingItemPolicy>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.cart.on_missing_item, MissingItemPolicy::Ignore);
        assert!(config.cart.validate_items);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: StoreConfig = toml::from_str("[cart]\non_missing_item = \"reject\"\n").unwrap();
        assert_eq!(config.cart.on_missing_item, MissingItemPolicy::Reject);
        assert!(config.cart.validate_items);
        assert_eq!(config.logging, LoggingSettings::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = StoreConfig::default();
        config.apply_overrides(env(&[
            (ENV_ON_MISSING_ITEM, "reject"),
            (ENV_VALIDATE_ITEMS, "off"),
            (ENV_LOG, "warn"),
        ]));

        assert_eq!(config.cart.on_missing_item, MissingItemPolicy::Reject);
        assert!(!config.cart.validate_items);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_bad_env_values_are_ignored() {
        let mut config = StoreConfig::default();
        config.apply_overrides(env(&[
            (ENV_ON_MISSING_ITEM, "sometimes"),
            (ENV_VALIDATE_ITEMS, "maybe"),
        ]));
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_config_validation() {
        let mut config = StoreConfig::default();
        config.logging.filter = "   ".to_string();
        assert!(config.validate().is_err());

        config.logging.filter = "meal_cart=notalevel".to_string();
        assert!(config.validate().is_err());

        config.logging.filter = "debug".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[cart]\nvalidate_items = false\n\n[logging]\nfilter = \"warn\"").unwrap();

        let config = StoreConfig::from_file(file.path()).unwrap();
        assert!(!config.cart.validate_items);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[cart]\non_missing_item = 42").unwrap();

        let err = StoreConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, StoreError::ConfigParse(_)));
    }

    #[test]
    fn test_toml_serialization() {
        let toml_str = toml::to_string_pretty(&StoreConfig::default()).unwrap();
        assert!(toml_str.contains("[cart]"));
        assert!(toml_str.contains("on_missing_item = \"ignore\""));
        assert!(toml_str.contains("[logging]"));
    }
}
