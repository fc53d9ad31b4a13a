use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    error::Error,
    persist,
    upgrade::{self, UpgradeRegistry},
    validate::Validate,
    version::SchemaVersion,
};

/// A top-level persisted document kind, such as a module's config or state.
///
/// Implementors provide the identity constants and storage for unknown
/// fields; everything else is provided on top of [`crate::persist`] and
/// [`crate::upgrade`].
///
/// The type must serialize every field, including absent optional ones (as
/// `null`), and must keep its unknown fields out of the serialized form
/// (`#[serde(skip)]`).
pub trait Document: Serialize + DeserializeOwned + Validate + Sized {
    /// Root of violation paths, e.g. `Config`.
    const NAME: &'static str;
    /// Wire tag in `meta.kind`, e.g. `azksConfig`.
    const KIND: &'static str;
    /// The schema version this code reads and writes.
    const SCHEMA_VERSION: SchemaVersion;

    /// Dotted paths of input fields that were ignored when this document was
    /// loaded. Empty for documents built in memory.
    fn unused(&self) -> &[String];

    fn set_unused(&mut self, unused: Vec<String>);

    /// Transformations from older schema series of this kind.
    fn upgrades() -> UpgradeRegistry {
        UpgradeRegistry::new()
    }

    fn validate(&self) -> Result<(), Error> {
        persist::validate(self)
    }

    /// Encode without validation.
    fn encode(&self) -> Result<Vec<u8>, Error> {
        persist::encode(self)
    }

    fn decode(bytes: &[u8]) -> Result<Self, Error> {
        persist::decode(bytes)
    }

    /// Validate, then encode.
    fn print(&self) -> Result<Vec<u8>, Error> {
        persist::print(self)
    }

    fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        persist::save(self, path.as_ref())
    }

    fn backup<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        persist::backup(self, path.as_ref())
    }

    /// Replace `self` with the document at `path`. On error, `self` is left
    /// as it was.
    fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        *self = persist::load(path.as_ref())?;
        Ok(())
    }

    /// Like [`Document::load`], but documents from an older schema series
    /// are brought up to date with [`Document::upgrades`] first.
    fn upgrade<P: AsRef<Path>>(&mut self, path: P) -> Result<(), Error> {
        *self = upgrade::upgrade(path.as_ref(), &Self::upgrades())?;
        Ok(())
    }
}

/// Validate a document that may be missing altogether.
pub fn validate_optional<D: Document>(doc: Option<&D>) -> Result<(), Error> {
    match doc {
        Some(doc) => doc.validate(),
        None => Err(Error::NilDocument(D::NAME)),
    }
}
