//! CLI configuration.

use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use teeshack_commerce::cart::PricingPolicy;
use teeshack_commerce::money::{Currency, Money};

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["teeshack.toml", ".teeshack.toml", "teeshack.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Where client state is kept.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Order summary pricing.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Simulated backend latency.
    #[serde(default)]
    pub simulation: SimulationConfig,
}

impl CliConfig {
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

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding the cart and user snapshots, relative to the config
    /// file (or the working directory when there is none).
    #[serde(default = "default_storage_dir")]
    pub dir: String,
}

fn default_storage_dir() -> String {
    ".teeshack".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: default_storage_dir(),
        }
    }
}

/// Pricing configuration, in major currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// ISO currency code.
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold: f64,

    #[serde(default = "default_shipping_fee")]
    pub shipping_fee: f64,

    /// Tax rate as a fraction (0.21 is 21%).
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
}

fn default_currency() -> String {
    "EUR".to_string()
}

fn default_free_shipping_threshold() -> f64 {
    50.0
}

fn default_shipping_fee() -> f64 {
    5.99
}

fn default_tax_rate() -> f64 {
    0.21
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            free_shipping_threshold: default_free_shipping_threshold(),
            shipping_fee: default_shipping_fee(),
            tax_rate: default_tax_rate(),
        }
    }
}

impl PricingConfig {
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.currency)
            .ok_or_else(|| anyhow!("Unsupported currency: {}", self.currency))
    }

    /// Pricing policy in the configured currency.
    pub fn policy(&self) -> Result<PricingPolicy> {
        let currency = self.currency()?;
        if !(0.0..=1.0).contains(&self.tax_rate) {
            return Err(anyhow!("pricing.tax_rate must be between 0 and 1"));
        }
        Ok(PricingPolicy {
            free_shipping_threshold: Money::from_decimal(self.free_shipping_threshold, currency),
            shipping_fee: Money::from_decimal(self.shipping_fee, currency),
            tax_rate: self.tax_rate,
        })
    }
}

/// Simulated backend latency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default = "default_auth_latency_ms")]
    pub auth_latency_ms: u64,

    #[serde(default = "default_payment_latency_ms")]
    pub payment_latency_ms: u64,
}

fn default_auth_latency_ms() -> u64 {
    1000
}

fn default_payment_latency_ms() -> u64 {
    3000
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            auth_latency_ms: default_auth_latency_ms(),
            payment_latency_ms: default_payment_latency_ms(),
        }
    }
}

impl SimulationConfig {
    pub fn auth_latency(&self) -> Duration {
        Duration::from_millis(self.auth_latency_ms)
    }

    pub fn payment_latency(&self) -> Duration {
        Duration::from_millis(self.payment_latency_ms)
    }
}

/// Generate a default teeshack.toml config file.
pub fn generate_default_config() -> String {
    r#"# TeeShack storefront configuration

[storage]
# Cart and signed-in user snapshots live here.
dir = ".teeshack"

[pricing]
currency = "EUR"
free_shipping_threshold = 50.0
shipping_fee = 5.99
tax_rate = 0.21

[simulation]
# Set to 0 to skip the fake network delays.
auth_latency_ms = 1000
payment_latency_ms = 3000
"#
    .to_string()
}
