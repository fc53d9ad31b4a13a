use std::{fmt, fs, path::Path};

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};
use vdoc_azks::v0;
use vdoc_core::{persist, Document};

/// The document kinds this tool knows about.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Kind {
    /// AKS module configuration (`azksConfig`)
    Config,
    /// AKS module state (`azksState`)
    State,
}

impl Kind {
    pub(crate) fn tag(self) -> &'static str {
        match self {
            Kind::Config => v0::Config::KIND,
            Kind::State => v0::State::KIND,
        }
    }

    pub(crate) fn from_tag(tag: &str) -> Option<Kind> {
        [Kind::Config, Kind::State]
            .into_iter()
            .find(|kind| kind.tag() == tag)
    }

    /// Read the `meta.kind` of the document at `path`.
    pub(crate) fn detect(path: &Path) -> Result<Kind> {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let tag = persist::peek_kind(&bytes)
            .with_context(|| format!("reading document kind of {}", path.display()))?;
        let Some(tag) = tag else {
            bail!("{} has no meta.kind", path.display());
        };
        match Kind::from_tag(&tag) {
            Some(kind) => {
                debug!(path = %path.display(), kind = %tag, "detected document kind");
                Ok(kind)
            }
            None => bail!("{} has unsupported kind '{}'", path.display(), tag),
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Load and validate a document, warning about fields it doesn't know.
pub(crate) fn load<D: Document + Default>(path: &Path) -> Result<D> {
    let mut doc = D::default();
    doc.load(path)
        .with_context(|| format!("loading {} from {}", D::KIND, path.display()))?;
    warn_unused(path, doc.unused());
    Ok(doc)
}

pub(crate) fn warn_unused(path: &Path, unused: &[String]) {
    for field in unused {
        warn!(path = %path.display(), field = %field, "ignoring unknown field");
    }
}
