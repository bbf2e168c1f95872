//! Bot identity verification for Zentinel
//!
//! Decides whether a request claiming to come from a known crawler
//! (`"<name>|<ip>"`) should get unrestricted payload access, without trusting
//! the client-supplied header alone.
//!
//! # Features
//!
//! - Claim parsing that never fails; malformed claims are simply denied
//! - Exact-match bot name allow-list
//! - Reverse DNS of the claimed IP checked against a domain allow-list
//! - Verification cache so repeat visitors skip DNS
//! - Fail-closed: cache or resolver faults deny and are reported out of band
//!
//! # Example
//!
//! ```ignore
//! use zentinel_bot_verifier::{BotVerifier, VerifierConfig};
//!
//! let verifier = BotVerifier::from_config(&VerifierConfig::default());
//! if verifier.verify_header("Googlebot|66.249.66.1").await {
//!     // serve the full payload
//! }
//! ```

pub mod allow_list;
pub mod cache;
pub mod claim;
pub mod config;
pub mod error;
pub mod reporter;
pub mod resolver;
pub mod verifier;

pub use allow_list::AllowList;
pub use claim::BotClaim;
pub use config::VerifierConfig;
pub use error::VerificationFault;
pub use verifier::{BotVerifier, Verification, VerifierStats};
