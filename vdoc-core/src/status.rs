use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a state document.
///
/// Transitions between statuses are up to the caller; the document only
/// records the current one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Initialized,
    Applied,
    Destroyed,
    /// Any other string. Kept so that a bad status decodes and is reported by
    /// validation instead of failing the parse.
    #[serde(untagged)]
    Unrecognized(String),
}

impl Status {
    /// The legal wire values.
    pub const ALLOWED: &'static [&'static str] = &["initialized", "applied", "destroyed"];

    pub fn as_str(&self) -> &str {
        match self {
            Status::Initialized => "initialized",
            Status::Applied => "applied",
            Status::Destroyed => "destroyed",
            Status::Unrecognized(s) => s,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Status::Unrecognized(_))
    }
}

impl AsRef<str> for Status {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
