//! Static allow-lists of bot names and reverse-DNS domains.
//!
//! Built once from configuration and shared read-only by every verification.

use crate::config::AllowListConfig;
use std::collections::HashSet;

/// Immutable sets of recognized bot names and domain suffixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    names: HashSet<String>,
    domains: HashSet<String>,
}

impl AllowList {
    pub fn new<N, D>(names: N, domains: D) -> Self
    where
        N: IntoIterator,
        N::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            domains: domains
                .into_iter()
                .map(|d| d.into().to_ascii_lowercase())
                .collect(),
        }
    }

    /// Exact, case-sensitive name match: "googlebot" is not "Googlebot".
    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Match a suffix as returned by [`domain_suffix`].
    pub fn contains_domain(&self, domain: &str) -> bool {
        self.domains.contains(domain)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.domains.iter().map(String::as_str)
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::from(&AllowListConfig::default())
    }
}

impl From<&AllowListConfig> for AllowList {
    fn from(config: &AllowListConfig) -> Self {
        Self::new(config.names.iter().cloned(), config.domains.iter().cloned())
    }
}

/// Extract the last two labels of a hostname, lowercased.
///
/// `crawl-66-249-66-1.googlebot.com.` gives `googlebot.com`. Anything above the
/// registrable zone is trusted implicitly, so control of a subdomain of an
/// allowed domain is enough to pass.
pub fn domain_suffix(hostname: &str) -> Option<String> {
    let trimmed = hostname.trim_end_matches('.');
    let mut labels = trimmed.rsplit('.');
    let tld = labels.next().filter(|l| !l.is_empty())?;
    let sld = labels.next().filter(|l| !l.is_empty())?;
    Some(format!("{sld}.{tld}").to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allow_list() {
        let list = AllowList::default();
        assert!(list.contains_name("SuperBot"));
        assert!(list.contains_name("Googlebot"));
        assert!(!list.contains_name("googlebot"));
        assert!(!list.contains_name("Bingbot"));

        assert!(list.contains_domain("superbot.com"));
        assert!(list.contains_domain("googlebot.com"));
        assert!(list.contains_domain("google.com"));
        assert!(!list.contains_domain("evil.com"));
    }

    #[test]
    fn test_domain_suffix() {
        assert_eq!(
            domain_suffix("crawl-66-102-1-1.googlebot.com").as_deref(),
            Some("googlebot.com")
        );
        assert_eq!(domain_suffix("crawl.googlebot.com.").as_deref(), Some("googlebot.com"));
        assert_eq!(domain_suffix("a.b.evil-googlebot.com").as_deref(), Some("evil-googlebot.com"));
        assert_eq!(domain_suffix("Rate-Limited-Proxy.Google.COM").as_deref(), Some("google.com"));
        assert_eq!(domain_suffix("googlebot.com").as_deref(), Some("googlebot.com"));
    }

    #[test]
    fn test_domain_suffix_too_short() {
        assert_eq!(domain_suffix(""), None);
        assert_eq!(domain_suffix("."), None);
        assert_eq!(domain_suffix("localhost"), None);
        assert_eq!(domain_suffix("localhost."), None);
        assert_eq!(domain_suffix(".com"), None);
    }
}
