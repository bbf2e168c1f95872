//! Error types.

/// Returned by a [`VerificationCache`][crate::cache::VerificationCache] backend.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("verification cache {operation} failed: {message}")]
pub struct CacheError {
    /// The cache operation that failed (`get` or `set`).
    pub operation: &'static str,
    pub message: String,
}

impl CacheError {
    pub fn get(message: impl Into<String>) -> Self {
        Self {
            operation: "get",
            message: message.into(),
        }
    }

    pub fn set(message: impl Into<String>) -> Self {
        Self {
            operation: "set",
            message: message.into(),
        }
    }
}

/// Returned by a [`ReverseResolver`][crate::resolver::ReverseResolver] when the lookup
/// itself fails. A missing PTR record is not an error.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The claimed source IP could not be parsed as an IPv4 or IPv6 address.
    #[error("\"{0}\" is not an IP address")]
    InvalidAddress(String),

    /// The resolver was unreachable or answered with something unusable.
    #[error("reverse lookup failed: {0}")]
    Lookup(String),
}

/// An unexpected fault inside the verifier. Always converted to a denial at the
/// [`BotVerifier::is_valid_bot`][crate::verifier::BotVerifier::is_valid_bot] boundary.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VerificationFault {
    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Resolver(#[from] ResolveError),
}

/// Returned when a [`VerifierConfig`][crate::config::VerifierConfig] is unusable.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("allow_list.names must not be empty")]
    NoBotNames,

    #[error("allow_list.domains must not be empty")]
    NoBotDomains,

    #[error("resolver.timeout_ms must be greater than zero")]
    ZeroResolveTimeout,

    #[error("cache.max_capacity must be greater than zero")]
    ZeroCacheCapacity,
}
