//! Bot identity verification.
//!
//! Decides whether a claimed crawler deserves elevated access. Checks run
//! cheapest first:
//! - well-formedness of the claim
//! - bot name allow-list
//! - verification cache
//! - reverse DNS of the source IP, checked against the domain allow-list
//!
//! Only the reverse half of forward-confirmed reverse DNS is performed: the
//! PTR hostname is not resolved forward to confirm it maps back to the IP.

use crate::allow_list::{domain_suffix, AllowList};
use crate::cache::{MokaVerificationCache, VerificationCache};
use crate::claim::BotClaim;
use crate::config::VerifierConfig;
use crate::error::VerificationFault;
use crate::reporter::{ErrorReporter, TracingReporter};
use crate::resolver::{DnsReverseResolver, ReverseResolver};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Context passed to the [`ErrorReporter`] for every fault.
pub const REPORT_CONTEXT: &str = "bot_verifier";

/// Outcome of a completed verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Verification {
    /// Name or source IP missing
    Malformed,
    /// Name not in the allow-list
    UnknownName,
    /// Source IP was verified earlier
    Cached { domain: String },
    /// Reverse lookup resolved to an allowed domain
    Resolved { hostname: String, domain: String },
    /// Reverse lookup resolved to a domain outside the allow-list
    UnknownDomain { hostname: String, domain: String },
    /// Hostname has fewer than two labels
    NoDomain { hostname: String },
    /// No PTR record for the source IP
    NoHostname,
    /// Reverse lookup did not finish in time
    ResolveTimeout,
}

impl Verification {
    /// Whether the claim earns elevated access.
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Cached { .. } | Self::Resolved { .. })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Malformed => "malformed",
            Self::UnknownName => "unknown_name",
            Self::Cached { .. } => "cached",
            Self::Resolved { .. } => "resolved",
            Self::UnknownDomain { .. } => "unknown_domain",
            Self::NoDomain { .. } => "no_domain",
            Self::NoHostname => "no_hostname",
            Self::ResolveTimeout => "resolve_timeout",
        }
    }
}

/// Point-in-time counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VerifierStats {
    pub verified: u64,
    pub denied: u64,
    pub cache_hits: u64,
    pub resolutions: u64,
    pub faults: u64,
}

#[derive(Default)]
struct Counters {
    verified: AtomicU64,
    denied: AtomicU64,
    cache_hits: AtomicU64,
    resolutions: AtomicU64,
    faults: AtomicU64,
}

/// Tunables that are not collaborators.
#[derive(Debug, Clone)]
pub struct VerifierSettings {
    /// Prepended to the source IP to form the cache key
    pub key_prefix: String,
    /// Upper bound on a single reverse lookup
    pub resolve_timeout: Duration,
}

impl From<&VerifierConfig> for VerifierSettings {
    fn from(config: &VerifierConfig) -> Self {
        Self {
            key_prefix: config.cache.key_prefix.clone(),
            resolve_timeout: config.resolver.timeout(),
        }
    }
}

impl Default for VerifierSettings {
    fn default() -> Self {
        Self::from(&VerifierConfig::default())
    }
}

/// Verifies claimed bot identities against reverse DNS.
///
/// Holds no mutable state besides statistics, so a single instance can be
/// shared across all requests.
pub struct BotVerifier {
    allow_list: Arc<AllowList>,
    cache: Arc<dyn VerificationCache>,
    resolver: Arc<dyn ReverseResolver>,
    reporter: Arc<dyn ErrorReporter>,
    settings: VerifierSettings,
    counters: Counters,
}

impl BotVerifier {
    pub fn new(
        allow_list: Arc<AllowList>,
        cache: Arc<dyn VerificationCache>,
        resolver: Arc<dyn ReverseResolver>,
        reporter: Arc<dyn ErrorReporter>,
        settings: VerifierSettings,
    ) -> Self {
        Self {
            allow_list,
            cache,
            resolver,
            reporter,
            settings,
            counters: Counters::default(),
        }
    }

    /// Wire the in-process cache, the system DNS resolver and tracing-based reporting.
    pub fn from_config(config: &VerifierConfig) -> Self {
        Self::new(
            Arc::new(AllowList::from(&config.allow_list)),
            Arc::new(MokaVerificationCache::from_config(&config.cache)),
            Arc::new(DnsReverseResolver::new(&config.resolver)),
            Arc::new(TracingReporter),
            VerifierSettings::from(config),
        )
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// Parse a raw `"<name>|<ip>"` header and verify it.
    pub async fn verify_header(&self, raw: &str) -> bool {
        self.is_valid_bot(&BotClaim::parse(raw)).await
    }

    /// Fail-closed verification: any fault is reported and denied.
    pub async fn is_valid_bot(&self, claim: &BotClaim) -> bool {
        match self.verify(claim).await {
            Ok(verification) => {
                let verified = verification.is_verified();
                if verified {
                    self.counters.verified.fetch_add(1, Ordering::Relaxed);
                } else {
                    self.counters.denied.fetch_add(1, Ordering::Relaxed);
                }
                debug!(
                    bot = %claim.name,
                    source_ip = %claim.source_ip,
                    outcome = verification.as_str(),
                    verified,
                    "Bot verification complete"
                );
                verified
            }
            Err(fault) => {
                self.counters.faults.fetch_add(1, Ordering::Relaxed);
                self.counters.denied.fetch_add(1, Ordering::Relaxed);
                self.reporter.report(REPORT_CONTEXT, &fault.to_string());
                false
            }
        }
    }

    /// Run every check and return the detailed outcome.
    pub async fn verify(&self, claim: &BotClaim) -> Result<Verification, VerificationFault> {
        if !claim.is_well_formed() {
            return Ok(Verification::Malformed);
        }

        if !self.allow_list.contains_name(&claim.name) {
            return Ok(Verification::UnknownName);
        }

        let key = self.cache_key(&claim.source_ip);
        if let Some(domain) = self.cache.get(&key).await? {
            self.counters.cache_hits.fetch_add(1, Ordering::Relaxed);
            return Ok(Verification::Cached { domain });
        }

        self.counters.resolutions.fetch_add(1, Ordering::Relaxed);
        let lookup = tokio::time::timeout(
            self.settings.resolve_timeout,
            self.resolver.reverse(&claim.source_ip),
        )
        .await;

        let hostname = match lookup {
            Err(_) => {
                debug!(
                    source_ip = %claim.source_ip,
                    timeout_ms = self.settings.resolve_timeout.as_millis() as u64,
                    "Reverse lookup timed out"
                );
                return Ok(Verification::ResolveTimeout);
            }
            Ok(result) => match result? {
                Some(hostname) => hostname,
                None => return Ok(Verification::NoHostname),
            },
        };

        let domain = match domain_suffix(&hostname) {
            Some(domain) => domain,
            None => return Ok(Verification::NoDomain { hostname }),
        };

        if !self.allow_list.contains_domain(&domain) {
            return Ok(Verification::UnknownDomain { hostname, domain });
        }

        // Failed lookups are never cached; they are retried on the next claim.
        self.cache.set(&key, &domain).await?;

        Ok(Verification::Resolved { hostname, domain })
    }

    pub fn stats(&self) -> VerifierStats {
        VerifierStats {
            verified: self.counters.verified.load(Ordering::Relaxed),
            denied: self.counters.denied.load(Ordering::Relaxed),
            cache_hits: self.counters.cache_hits.load(Ordering::Relaxed),
            resolutions: self.counters.resolutions.load(Ordering::Relaxed),
            faults: self.counters.faults.load(Ordering::Relaxed),
        }
    }

    fn cache_key(&self, source_ip: &str) -> String {
        format!("{}{}", self.settings.key_prefix, source_ip)
    }
}
