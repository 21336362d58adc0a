//! CLI configuration.

use std::time::Duration;

use anyhow::{Context, Result};
use cardshop_commerce::price::DEFAULT_EXCHANGE_RATE;
use cardshop_data::{DEFAULT_REQUEST_INTERVAL, DEFAULT_USER_AGENT, SCRYFALL_BASE_URL};
use serde::{Deserialize, Serialize};

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardshopConfig {
    /// Inventory source.
    #[serde(default)]
    pub inventory: InventoryConfig,

    /// Metadata lookup.
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Price conversion.
    #[serde(default)]
    pub pricing: PricingConfig,
}

impl CardshopConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }
}

/// Inventory source configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Path to the inventory CSV, relative to the config file.
    #[serde(default = "default_inventory_path")]
    pub path: String,
}

fn default_inventory_path() -> String {
    "inventory.csv".to_string()
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            path: default_inventory_path(),
        }
    }
}

/// Metadata lookup configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Lookup service base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Spacing between lookup requests; values below 100 are raised to 100.
    #[serde(default = "default_request_interval_ms")]
    pub request_interval_ms: u64,

    /// Upper bound on a single lookup.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    SCRYFALL_BASE_URL.to_string()
}

fn default_request_interval_ms() -> u64 {
    DEFAULT_REQUEST_INTERVAL.as_millis() as u64
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl LookupConfig {
    /// Configured spacing, never tighter than ten requests per second.
    pub fn request_interval(&self) -> Duration {
        Duration::from_millis(self.request_interval_ms).max(DEFAULT_REQUEST_INTERVAL)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms.max(1))
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_interval_ms: default_request_interval_ms(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

/// Price conversion configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Local currency units per US dollar.
    #[serde(default = "default_exchange_rate")]
    pub exchange_rate: f64,
}

fn default_exchange_rate() -> f64 {
    DEFAULT_EXCHANGE_RATE
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            exchange_rate: default_exchange_rate(),
        }
    }
}

/// Generate a default cardshop.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Cardshop configuration

[inventory]
# CSV with "Name", "Purchase Price" and "Quantity" columns
path = "{path}"

[lookup]
base_url = "{base_url}"
request_interval_ms = {interval}
timeout_ms = {timeout}
user_agent = "{user_agent}"

[pricing]
# Local currency units per US dollar
exchange_rate = {rate:.1}
"#,
        path = default_inventory_path(),
        base_url = default_base_url(),
        interval = default_request_interval_ms(),
        timeout = default_timeout_ms(),
        user_agent = default_user_agent(),
        rate = default_exchange_rate(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: CardshopConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.inventory.path, "inventory.csv");
        assert_eq!(config.lookup.base_url, SCRYFALL_BASE_URL);
        assert_eq!(config.lookup.request_interval(), Duration::from_millis(100));
        assert_eq!(config.lookup.timeout(), Duration::from_secs(10));
        assert_eq!(config.pricing.exchange_rate, DEFAULT_EXCHANGE_RATE);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: CardshopConfig = toml::from_str(
            r#"
            [lookup]
            request_interval_ms = 250
            "#,
        )
        .unwrap();
        assert_eq!(config.lookup.request_interval_ms, 250);
        assert_eq!(config.lookup.timeout_ms, 10_000);
        assert_eq!(config.inventory.path, "inventory.csv");
    }

    #[test]
    fn test_request_interval_has_a_floor() {
        for (configured, expected) in [(0, 100), (40, 100), (100, 100), (250, 250)] {
            let lookup = LookupConfig {
                request_interval_ms: configured,
                ..LookupConfig::default()
            };
            assert_eq!(lookup.request_interval(), Duration::from_millis(expected));
        }
    }
}
