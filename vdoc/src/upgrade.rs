use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;
use vdoc_azks::v0;
use vdoc_core::Document;

use crate::kind::{self, Kind};

#[derive(clap::Parser, Debug)]
pub(crate) struct Args {
    /// The document to upgrade
    path: PathBuf,

    /// Where to write the upgraded document; must not exist yet
    #[arg(long, short)]
    output: PathBuf,
}

/// Run the `upgrade` command.
pub(crate) fn upgrade(args: &Args) -> Result<()> {
    match Kind::detect(&args.path)? {
        Kind::Config => upgrade_to::<v0::Config>(&args.path, &args.output),
        Kind::State => upgrade_to::<v0::State>(&args.path, &args.output),
    }
}

fn upgrade_to<D: Document + Default>(path: &Path, output: &Path) -> Result<()> {
    let mut doc = D::default();
    doc.upgrade(path)
        .with_context(|| format!("upgrading {} from {}", D::KIND, path.display()))?;
    kind::warn_unused(path, doc.unused());
    doc.save(output)
        .with_context(|| format!("writing {}", output.display()))?;
    info!(
        kind = D::KIND,
        version = %D::SCHEMA_VERSION,
        path = %output.display(),
        "wrote upgraded document"
    );
    Ok(())
}
