use std::{
    io::{self, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Result;
use tracing::info;
use vdoc_azks::v0;
use vdoc_core::Document;

use crate::kind::{self, Kind};

#[derive(clap::Parser, Debug)]
pub(crate) struct Args {
    /// The document to read
    path: PathBuf,
}

/// Run the `validate` command.
pub(crate) fn validate(args: &Args) -> Result<()> {
    let detected = Kind::detect(&args.path)?;
    let unused = match detected {
        Kind::Config => kind::load::<v0::Config>(&args.path)?.unused.len(),
        Kind::State => kind::load::<v0::State>(&args.path)?.unused.len(),
    };
    info!(
        path = %args.path.display(),
        kind = %detected,
        unknown_fields = unused,
        "document is valid"
    );
    Ok(())
}

/// Run the `print` command.
pub(crate) fn print(args: &Args) -> Result<()> {
    let bytes = match Kind::detect(&args.path)? {
        Kind::Config => render::<v0::Config>(&args.path)?,
        Kind::State => render::<v0::State>(&args.path)?,
    };
    let mut out = io::stdout().lock();
    out.write_all(&bytes)?;
    writeln!(out)?;
    Ok(())
}

fn render<D: Document + Default>(path: &Path) -> Result<Vec<u8>> {
    let doc: D = kind::load(path)?;
    Ok(doc.print()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_validate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        v0::Config::init("dev").save(&path).unwrap();
        validate(&Args { path: path.clone() }).unwrap();

        fs::write(&path, r#"{"meta": {"kind": "azksConfig"}}"#).unwrap();
        let err = validate(&Args { path }).unwrap_err();
        let violations = err
            .downcast_ref::<vdoc_core::Error>()
            .and_then(vdoc_core::Error::violations)
            .unwrap();
        assert!(violations.get("Config.Params").is_some());
    }

    #[test]
    fn test_render_drops_unknown_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut value = serde_json::to_value(v0::State::init("dev")).unwrap();
        value["legacy"] = serde_json::json!(true);
        fs::write(&path, value.to_string()).unwrap();

        let rendered = render::<v0::State>(&path).unwrap();
        assert_eq!(rendered, v0::State::init("dev").print().unwrap());
    }
}
