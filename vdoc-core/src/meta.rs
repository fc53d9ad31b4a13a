use serde::{Deserialize, Serialize};

use crate::validate::Validator;
use crate::version::SchemaVersion;

/// The identity block at the top of every document.
///
/// All fields are optional in memory so that a document read from disk can
/// be inspected (and reported on) even when it is incomplete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meta {
    /// Document type tag, e.g. `azksConfig`
    pub kind: Option<String>,
    /// Schema version the document was written with
    pub version: Option<String>,
    /// Version of the tool that wrote the document; free-form
    pub module_version: Option<String>,
}

impl Meta {
    pub fn new(kind: &str, version: SchemaVersion, module_version: &str) -> Self {
        Meta {
            kind: Some(kind.to_string()),
            version: Some(version.to_string()),
            module_version: Some(module_version.to_string()),
        }
    }

    /// Check the identity fields. `kinds` lists the tags the enclosing
    /// document accepts; `baseline` is the schema version the code expects.
    pub fn validate_into(
        &self,
        v: &mut Validator,
        kinds: &'static [&'static str],
        baseline: SchemaVersion,
    ) {
        v.field("Kind", self.kind.as_deref()).required().one_of(kinds);
        v.field("Version", self.version.as_deref())
            .required()
            .version(baseline);
        v.field("ModuleVersion", self.module_version.as_deref())
            .required()
            .min(1);
    }
}
