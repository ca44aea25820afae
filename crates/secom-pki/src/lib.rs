//! # secom-pki — X.509 Trust and Certification Paths
//!
//! The receiving side's authentication layer:
//!
//! - **Certificate** (`certificate.rs`): owned DER certificate bundles with
//!   PEM load/render and SHA-256 thumbprints.
//!
//! - **Trust** (`trust.rs`): `TrustContext` — the immutable trust anchor set
//!   loaded once at process start and shared read-only across requests.
//!
//! - **Revocation** (`revocation.rs`): pluggable revocation checkers with a
//!   three-valued status (good / revoked / unknown).
//!
//! - **Chain** (`chain.rs`): `CertificateChainValidator` — path building
//!   from a leaf to a trust anchor with validity-window, link-signature,
//!   key-usage, and revocation checks.
//!
//! ## Revocation Policy
//!
//! Soft fail: a confirmed revocation rejects the chain; an *indeterminate*
//! revocation status (no reachable revocation data) logs a warning and
//! accepts. This bounds worst-case blocking when revocation infrastructure
//! is unreachable and is a deliberate availability tradeoff — do not tighten
//! to hard fail without a product decision.

pub mod certificate;
pub mod chain;
pub mod revocation;
pub mod trust;

pub use certificate::CertificateBundle;
pub use chain::CertificateChainValidator;
pub use revocation::{CrlRevocationChecker, NoRevocationData, RevocationChecker, RevocationStatus};
pub use trust::TrustContext;
