//! Versioned, self-describing documents.
//!
//! A document is a JSON file with a `meta` block naming its kind and schema
//! version, followed by a kind-specific payload. This crate provides what
//! every document kind shares: version checks, validation, detection of
//! unknown fields, persistence that never overwrites, and upgrades from
//! older schema series. Concrete kinds implement [`Document`].

pub mod document;
pub mod error;
pub mod meta;
pub mod persist;
pub mod status;
pub mod unknown;
pub mod upgrade;
pub mod validate;
pub mod version;

pub use document::{validate_optional, Document};
pub use error::{Error, TransformError};
pub use meta::Meta;
pub use status::Status;
pub use upgrade::UpgradeRegistry;
pub use validate::{Rule, Validate, Validator, Violation, Violations};
pub use version::SchemaVersion;
