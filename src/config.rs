//! Configuration types for the bot verifier.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration for the bot verifier.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Recognized bot names and reverse-DNS domains
    pub allow_list: AllowListConfig,

    /// Verification cache settings
    pub cache: CacheConfig,

    /// Reverse DNS settings
    pub resolver: ResolverConfig,
}

impl VerifierConfig {
    /// Load a configuration file. YAML is used for `.yaml`/`.yml` files, JSON otherwise.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = if path.extension().is_some_and(|e| e == "yaml" || e == "yml") {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.allow_list.names.is_empty() {
            return Err(ConfigError::NoBotNames);
        }
        if self.allow_list.domains.is_empty() {
            return Err(ConfigError::NoBotDomains);
        }
        if self.resolver.timeout_ms == 0 {
            return Err(ConfigError::ZeroResolveTimeout);
        }
        if self.cache.max_capacity == 0 {
            return Err(ConfigError::ZeroCacheCapacity);
        }
        Ok(())
    }
}

/// Bots granted full payload access.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AllowListConfig {
    /// Bot names, matched exactly (case-sensitive)
    pub names: Vec<String>,

    /// Reverse-DNS domain suffixes (last two labels of the PTR hostname)
    pub domains: Vec<String>,
}

impl Default for AllowListConfig {
    fn default() -> Self {
        Self {
            // SuperBot: content scraping service. Googlebot: SEO.
            names: vec!["SuperBot".to_string(), "Googlebot".to_string()],
            domains: vec![
                "superbot.com".to_string(),
                "googlebot.com".to_string(),
                "google.com".to_string(),
            ],
        }
    }
}

/// Verification cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Prefix prepended to the source IP to form the cache key
    pub key_prefix: String,

    /// Maximum number of verified IPs kept in memory
    pub max_capacity: u64,

    /// Entry lifetime in seconds. Entries never expire when unset.
    pub ttl_seconds: Option<u64>,
}

impl CacheConfig {
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_seconds.map(Duration::from_secs)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            key_prefix: "VALID_BOT_".to_string(),
            max_capacity: 10_000,
            ttl_seconds: None,
        }
    }
}

/// Reverse DNS configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolverConfig {
    /// Upper bound on a single reverse lookup in milliseconds
    pub timeout_ms: u64,

    /// Read nameservers from the host (e.g. /etc/resolv.conf)
    pub use_system_config: bool,
}

impl ResolverConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 250,
            use_system_config: true,
        }
    }
}
