//! Command dispatch and handler modules.

mod flags;
mod report;
mod tree;

use std::path::PathBuf;

use kondi_core::config::{GlobalConfig, ResolutionMode};
use kondi_core::manifest::Manifest;
use kondi_resolver::resolver::{self, Resolution};
use kondi_util::errors::KondiError;
use miette::Result;

use crate::cli::{Cli, Command};

const MANIFEST_FILE: &str = "Kondi.toml";

/// Route a parsed CLI invocation to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    let manifest_path = cli.manifest_path;
    match cli.command {
        Command::Tree {
            depth,
            deployment,
            inverted,
            why,
            mode,
        } => {
            let resolution = load_and_resolve(manifest_path, mode)?;
            tree::exec(&resolution, depth, deployment, inverted, why.as_deref())
        }
        Command::Flags { deployment, mode } => {
            let resolution = load_and_resolve(manifest_path, mode)?;
            flags::exec(&resolution, deployment)
        }
        Command::Report { mode } => {
            let resolution = load_and_resolve(manifest_path, mode)?;
            report::exec(&resolution)
        }
    }
}

/// Locate and parse the manifest, then resolve it.
///
/// Mode precedence: command line, then the manifest's `[resolve]`, then the
/// global config.
fn load_and_resolve(
    manifest_path: Option<PathBuf>,
    mode: Option<ResolutionMode>,
) -> Result<Resolution> {
    let path = match manifest_path {
        Some(path) => path,
        None => {
            let cwd = std::env::current_dir().map_err(KondiError::Io)?;
            let dir = kondi_util::fs::find_ancestor_with(&cwd, MANIFEST_FILE).ok_or_else(|| {
                KondiError::Manifest {
                    message: format!(
                        "Could not find {MANIFEST_FILE} in {} or any parent directory",
                        cwd.display()
                    ),
                }
            })?;
            dir.join(MANIFEST_FILE)
        }
    };
    tracing::debug!("Using manifest {}", path.display());

    let manifest = Manifest::from_path(&path)?;
    let mode = match mode.or_else(|| manifest.resolve.as_ref().and_then(|r| r.mode)) {
        Some(mode) => mode,
        None => GlobalConfig::load()?.mode(),
    };
    Ok(resolver::resolve_manifest(&manifest, Some(mode))?)
}
