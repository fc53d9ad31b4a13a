use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use tracing::info;
use vdoc_core::persist;

#[derive(clap::Parser, Debug)]
pub(crate) struct Args {
    /// The document to back up
    path: PathBuf,

    /// Where to write the copy; must not exist yet
    #[arg(long, short)]
    output: PathBuf,
}

/// Run the `backup` command.
///
/// The copy is byte for byte. Unknown fields are kept, and a document that
/// fails validation can still be backed up.
pub(crate) fn backup(args: &Args) -> Result<()> {
    let bytes =
        fs::read(&args.path).with_context(|| format!("reading {}", args.path.display()))?;
    // Only for the log line; the bytes are copied whatever they hold.
    let kind = persist::peek_kind(&bytes).ok().flatten();
    persist::write_new(&args.output, &bytes)
        .with_context(|| format!("writing backup to {}", args.output.display()))?;
    info!(
        from = %args.path.display(),
        to = %args.output.display(),
        kind = kind.as_deref().unwrap_or("unknown"),
        "backed up document"
    );
    Ok(())
}
