//! Reverse DNS resolution.

use crate::config::ResolverConfig;
use crate::error::ResolveError;
use async_trait::async_trait;
use std::net::IpAddr;
use trust_dns_resolver::config::{ResolverConfig as DnsConfig, ResolverOpts};
use trust_dns_resolver::error::ResolveErrorKind;
use trust_dns_resolver::TokioAsyncResolver;

/// Reverse (PTR) lookup of a claimed source IP.
#[async_trait]
pub trait ReverseResolver: Send + Sync {
    /// Resolve `ip` to a hostname.
    ///
    /// Returns `Ok(None)` when the address has no PTR record.
    async fn reverse(&self, ip: &str) -> Result<Option<String>, ResolveError>;
}

/// [`ReverseResolver`] backed by trust-dns.
pub struct DnsReverseResolver {
    resolver: TokioAsyncResolver,
}

impl DnsReverseResolver {
    pub fn new(config: &ResolverConfig) -> Self {
        let (dns_config, mut opts) = if config.use_system_config {
            match trust_dns_resolver::system_conf::read_system_conf() {
                Ok(conf) => conf,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read system resolver config, using defaults");
                    (DnsConfig::default(), ResolverOpts::default())
                }
            }
        } else {
            (DnsConfig::default(), ResolverOpts::default())
        };

        // One attempt per lookup; a failed claim is simply retried on the next request.
        opts.timeout = config.timeout();
        opts.attempts = 1;

        Self {
            resolver: TokioAsyncResolver::tokio(dns_config, opts),
        }
    }
}

#[async_trait]
impl ReverseResolver for DnsReverseResolver {
    async fn reverse(&self, ip: &str) -> Result<Option<String>, ResolveError> {
        let addr: IpAddr = ip
            .parse()
            .map_err(|_| ResolveError::InvalidAddress(ip.to_string()))?;

        match self.resolver.reverse_lookup(addr).await {
            Ok(names) => Ok(names.iter().next().map(|name| name.to_string())),
            Err(e) => match e.kind() {
                ResolveErrorKind::NoRecordsFound { .. } => Ok(None),
                _ => Err(ResolveError::Lookup(e.to_string())),
            },
        }
    }
}
