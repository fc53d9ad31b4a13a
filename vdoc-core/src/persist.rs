//! Reading and writing documents.
//!
//! Writes never replace an existing file. Reads never hand out a document
//! that failed the version gate or validation.

use std::{
    fs,
    io::Write as _,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Serializer, Value};
use tempfile::NamedTempFile;
use tracing::{debug, trace};

use crate::{
    document::Document,
    error::Error,
    unknown::decode_tracked,
    validate::Validator,
    version::{Compatibility, SchemaVersion},
};

/// Run the document's validation rules, collecting every violation.
pub fn validate<D: Document>(doc: &D) -> Result<(), Error> {
    let mut v = Validator::new(D::NAME);
    doc.validate_into(&mut v);
    v.finish().map_err(Error::Validation)
}

/// Render a value as tab-indented JSON in declaration order, without a
/// trailing newline.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, Error> {
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut serializer).map_err(Error::Encode)?;
    Ok(out)
}

/// Validate, then encode.
pub fn print<D: Document>(doc: &D) -> Result<Vec<u8>, Error> {
    validate(doc)?;
    encode(doc)
}

/// Validate, encode and write to a path that must not exist yet.
pub fn save<D: Document>(doc: &D, path: &Path) -> Result<(), Error> {
    let bytes = print(doc)?;
    write_new(path, &bytes)?;
    debug!(path = %path.display(), kind = D::KIND, "saved document");
    Ok(())
}

/// Write the document as it is, valid or not, to a path that must not exist
/// yet.
pub fn backup<D: Document>(doc: &D, path: &Path) -> Result<(), Error> {
    let bytes = encode(doc)?;
    write_new(path, &bytes)?;
    debug!(path = %path.display(), kind = D::KIND, "backed up document");
    Ok(())
}

/// Write `bytes` to `path`, failing with [`std::io::ErrorKind::AlreadyExists`]
/// if something is there already.
///
/// The bytes are staged in a temporary file next to `path` and moved into
/// place in one step, so the destination never holds a partial write.
pub fn write_new(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    let dir = staging_dir(path);
    let mut staged = NamedTempFile::new_in(&dir)?;
    trace!(staged = %staged.path().display(), "staging write");
    staged.write_all(bytes)?;
    staged.as_file().sync_all()?;
    staged.persist_noclobber(path).map_err(|e| e.error)?;
    Ok(())
}

fn staging_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Parse, check the version, track unknown fields and validate.
///
/// The version is checked on the generic tree, so a document from another
/// series is reported as such even when its fields no longer fit the schema.
pub fn decode<D: Document>(bytes: &[u8]) -> Result<D, Error> {
    let tree = parse(bytes)?;
    ensure_current::<D>(&tree)?;
    let doc = decode_tree::<D>(&tree)?;
    validate(&doc)?;
    Ok(doc)
}

/// Read and [`decode`] the document at `path`.
pub fn load<D: Document>(path: &Path) -> Result<D, Error> {
    let bytes = fs::read(path)?;
    debug!(path = %path.display(), kind = D::KIND, bytes = bytes.len(), "loading document");
    decode(&bytes)
}

/// The `meta.kind` tag of a raw document, if it has one.
pub fn peek_kind(bytes: &[u8]) -> Result<Option<String>, Error> {
    let tree = parse(bytes)?;
    Ok(tree
        .pointer("/meta/kind")
        .and_then(Value::as_str)
        .map(str::to_string))
}

pub(crate) fn parse(bytes: &[u8]) -> Result<Value, Error> {
    serde_json::from_slice(bytes).map_err(Error::Malformed)
}

/// Decode the typed document from a generic tree and attach its unknown
/// fields. Neither the version nor the schema rules are checked.
pub(crate) fn decode_tree<D: Document>(tree: &Value) -> Result<D, Error> {
    let (mut doc, unused) = decode_tracked::<D>(tree)?;
    if !unused.is_empty() {
        trace!(kind = D::KIND, ?unused, "document has unknown fields");
    }
    doc.set_unused(unused);
    Ok(doc)
}

/// The `meta.version` of a raw document, both as written and parsed. `None`
/// when it is missing or not a version; validation reports those cases.
pub(crate) fn observed_version(tree: &Value) -> Option<(&str, SchemaVersion)> {
    let raw = tree.pointer("/meta/version")?.as_str()?;
    let parsed = raw.parse().ok()?;
    Some((raw, parsed))
}

fn ensure_current<D: Document>(tree: &Value) -> Result<(), Error> {
    match observed_version(tree) {
        Some((raw, observed))
            if D::SCHEMA_VERSION.compatibility(&observed) != Compatibility::Current =>
        {
            Err(Error::NotCurrentVersion {
                version: raw.to_string(),
            })
        }
        _ => Ok(()),
    }
}
