//! Cart configuration.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use turbo_cache::CachePolicy;

use crate::money::Currency;

/// Runtime settings for the cart service.
///
/// Every field has a default, so a config file only needs the keys it
/// changes:
///
/// ```toml
/// mutation_latency_ms = 0
/// lines_ttl_secs = 60
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Simulated round trip applied before every mutation.
    pub mutation_latency_ms: u64,
    /// Expiry of the authoritative entry list. `None` keeps it for the session.
    pub entries_ttl_secs: Option<u64>,
    /// Expiry of the projected cart lines.
    pub lines_ttl_secs: Option<u64>,
    /// Tax rate applied to the subtotal at checkout.
    pub tax_rate: f64,
    /// Currency orders are placed in.
    pub currency: Currency,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            mutation_latency_ms: 100,
            entries_ttl_secs: None,
            lines_ttl_secs: Some(300),
            tax_rate: 0.08,
            currency: Currency::USD,
        }
    }
}

impl CartConfig {
    /// Load config from a file (TOML, or JSON when the path ends in `.json`).
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = if path.extension().is_some_and(|ext| ext == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))?
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse config from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).context("Failed to parse TOML config")?;
        config.validate()?;
        Ok(config)
    }

    /// Set the mutation latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.mutation_latency_ms = latency.as_millis() as u64;
        self
    }

    /// Set the expiry of the projected cart lines.
    pub fn with_lines_ttl(mut self, secs: Option<u64>) -> Self {
        self.lines_ttl_secs = secs;
        self
    }

    /// Set the expiry of the authoritative entries.
    pub fn with_entries_ttl(mut self, secs: Option<u64>) -> Self {
        self.entries_ttl_secs = secs;
        self
    }

    pub fn mutation_latency(&self) -> Duration {
        Duration::from_millis(self.mutation_latency_ms)
    }

    pub fn entries_policy(&self) -> CachePolicy {
        CachePolicy::from_secs(self.entries_ttl_secs)
    }

    pub fn lines_policy(&self) -> CachePolicy {
        CachePolicy::from_secs(self.lines_ttl_secs)
    }

    fn validate(&self) -> Result<()> {
        if !self.tax_rate.is_finite() || self.tax_rate < 0.0 {
            anyhow::bail!("tax_rate must be a non-negative number, got {}", self.tax_rate);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = CartConfig::default();
        assert_eq!(config.mutation_latency(), Duration::from_millis(100));
        assert_eq!(config.entries_policy(), CachePolicy::session());
        assert_eq!(
            config.lines_policy(),
            CachePolicy::expire_after(Duration::from_secs(300))
        );
    }

    #[test]
    fn test_partial_toml() {
        let config = CartConfig::from_toml_str("mutation_latency_ms = 0\ntax_rate = 0.2\n").unwrap();
        assert_eq!(config.mutation_latency_ms, 0);
        assert_eq!(config.tax_rate, 0.2);
        assert_eq!(config.lines_ttl_secs, Some(300));
    }

    #[test]
    fn test_rejects_negative_tax_rate() {
        assert!(CartConfig::from_toml_str("tax_rate = -1.0").is_err());
    }

    #[test]
    fn test_load_toml_and_json() {
        let dir = tempfile::tempdir().unwrap();

        let toml_path = dir.path().join("cart.toml");
        let mut file = std::fs::File::create(&toml_path).unwrap();
        writeln!(file, "entries_ttl_secs = 30\ncurrency = \"EUR\"").unwrap();
        let config = CartConfig::load(&toml_path).unwrap();
        assert_eq!(config.entries_ttl_secs, Some(30));
        assert_eq!(config.currency, Currency::EUR);

        let json_path = dir.path().join("cart.json");
        std::fs::write(&json_path, r#"{"mutation_latency_ms": 5}"#).unwrap();
        let config = CartConfig::load(&json_path).unwrap();
        assert_eq!(config.mutation_latency_ms, 5);
    }

    #[test]
    fn test_load_missing_file() {
        let err = CartConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
