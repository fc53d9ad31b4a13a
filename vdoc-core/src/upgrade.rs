//! Bringing documents from older schema series up to date.
//!
//! A document whose `meta.version` is in the current major.minor series is
//! decoded as is. One from an older series is rewritten by the
//! transformation registered for its kind and series, stamped with the
//! current version, and then decoded and validated like any other document.
//! There is no chaining: each transformation must produce the current schema.

use std::{collections::HashMap, fmt, fs, path::Path};

use serde_json::Value;
use tracing::debug;

use crate::{
    document::Document,
    error::{Error, TransformError},
    persist,
    version::{Compatibility, SchemaVersion},
};

/// A rewrite of a document's generic tree into the current schema.
pub type Transform = Box<dyn Fn(Value) -> Result<Value, TransformError> + Send + Sync>;

/// Transformations keyed by document kind and source `(major, minor)` series.
#[derive(Default)]
pub struct UpgradeRegistry {
    transforms: HashMap<(String, (u64, u64)), Transform>,
}

impl UpgradeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transformation for documents of `kind` written in the
    /// series of `from`. A later registration for the same key replaces the
    /// earlier one.
    pub fn register<F>(&mut self, kind: &str, from: SchemaVersion, transform: F) -> &mut Self
    where
        F: Fn(Value) -> Result<Value, TransformError> + Send + Sync + 'static,
    {
        self.transforms
            .insert((kind.to_string(), from.series()), Box::new(transform));
        self
    }

    /// Register an RFC 6902 JSON patch as the transformation.
    pub fn register_patch(
        &mut self,
        kind: &str,
        from: SchemaVersion,
        patch: json_patch::Patch,
    ) -> &mut Self {
        self.register(kind, from, move |mut tree| {
            json_patch::patch(&mut tree, patch.0.as_slice())?;
            Ok(tree)
        })
    }

    pub fn get(&self, kind: &str, from: &SchemaVersion) -> Option<&Transform> {
        self.transforms.get(&(kind.to_string(), from.series()))
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

impl fmt::Debug for UpgradeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.transforms.keys().collect();
        keys.sort();
        f.debug_struct("UpgradeRegistry")
            .field("transforms", &keys)
            .finish()
    }
}

/// Read the document at `path` and bring it up to date.
pub fn upgrade<D: Document>(path: &Path, registry: &UpgradeRegistry) -> Result<D, Error> {
    let bytes = fs::read(path)?;
    debug!(path = %path.display(), kind = D::KIND, "upgrading document");
    upgrade_bytes(&bytes, registry)
}

/// Bring a raw document up to date, then decode and validate it.
pub fn upgrade_bytes<D: Document>(bytes: &[u8], registry: &UpgradeRegistry) -> Result<D, Error> {
    let tree = persist::parse(bytes)?;
    let (raw, observed) = match persist::observed_version(&tree) {
        Some((raw, observed)) => (raw.to_string(), observed),
        // Without a usable version there is nothing to upgrade from; the
        // validator reports the bad field.
        None => return persist::decode(bytes),
    };
    match D::SCHEMA_VERSION.compatibility(&observed) {
        Compatibility::Current => persist::decode(bytes),
        Compatibility::Newer => Err(Error::NotCurrentVersion { version: raw }),
        Compatibility::Older => {
            let kind = tree
                .pointer("/meta/kind")
                .and_then(Value::as_str)
                .unwrap_or(D::KIND)
                .to_string();
            let transform = registry
                .get(&kind, &observed)
                .ok_or_else(|| Error::NoUpgradePath {
                    kind: kind.clone(),
                    version: raw.clone(),
                })?;
            debug!(%kind, from = %raw, to = %D::SCHEMA_VERSION, "applying upgrade");
            let mut upgraded = transform(tree).map_err(|source| Error::Transform {
                kind,
                version: raw,
                source,
            })?;
            stamp_version(&mut upgraded, D::SCHEMA_VERSION);
            let doc = persist::decode_tree::<D>(&upgraded)?;
            persist::validate(&doc)?;
            Ok(doc)
        }
    }
}

fn stamp_version(tree: &mut Value, version: SchemaVersion) {
    if let Some(meta) = tree.get_mut("meta").and_then(Value::as_object_mut) {
        meta.insert("version".to_string(), Value::String(version.to_string()));
    }
}
