use std::io;

use crate::validate::Violations;

/// Failure of a transformation registered in an [`crate::upgrade::UpgradeRegistry`].
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("patch could not be applied: {0}")]
    Patch(#[from] json_patch::PatchError),
    #[error("{0}")]
    Custom(String),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("expected {0} document is nil")]
    NilDocument(&'static str),

    #[error("malformed document: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The tree parsed, but a field has the wrong shape for the schema.
    #[error("malformed document at '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode document: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("document version {version} is not current")]
    NotCurrentVersion { version: String },

    #[error("document validation failed:\n{0}")]
    Validation(Violations),

    /// Filesystem errors are passed through so that callers can match on
    /// [`io::Error::kind`].
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("no upgrade path for {kind} version {version}")]
    NoUpgradePath { kind: String, version: String },

    #[error("upgrade of {kind} from version {version} failed: {source}")]
    Transform {
        kind: String,
        version: String,
        #[source]
        source: TransformError,
    },
}

impl Error {
    /// The validation violations, if this is a validation error.
    pub fn violations(&self) -> Option<&Violations> {
        match self {
            Error::Validation(violations) => Some(violations),
            _ => None,
        }
    }

    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Error::Io(e) => Some(e.kind()),
            _ => None,
        }
    }

    pub fn is_already_exists(&self) -> bool {
        self.io_kind() == Some(io::ErrorKind::AlreadyExists)
    }
}

impl From<Violations> for Error {
    fn from(violations: Violations) -> Self {
        Error::Validation(violations)
    }
}
