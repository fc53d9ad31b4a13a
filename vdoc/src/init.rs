use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use vdoc_azks::v0;
use vdoc_core::Document;

use crate::kind::Kind;

#[derive(clap::Parser, Debug)]
pub(crate) struct Args {
    /// Kind of document to create
    #[arg(long, value_enum)]
    kind: Kind,

    /// Version of the module that the document belongs to
    #[arg(long, default_value = concat!("v", env!("CARGO_PKG_VERSION")))]
    module_version: String,

    /// Where to write the document; must not exist yet
    #[arg(long, short)]
    output: PathBuf,
}

/// Run the `init` command.
pub(crate) fn init(args: &Args) -> Result<()> {
    let written = match args.kind {
        Kind::Config => v0::Config::init(&args.module_version).save(&args.output),
        Kind::State => v0::State::init(&args.module_version).save(&args.output),
    };
    written.with_context(|| format!("writing {} to {}", args.kind, args.output.display()))?;
    info!(kind = %args.kind, path = %args.output.display(), "created document");
    Ok(())
}
