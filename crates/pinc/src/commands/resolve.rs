//! `pinc resolve` command implementation.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use pinc_includer::Includer;
use pinc_storage::FsStorage;

use super::{ConfigArgs, absolute};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// Folder to resolve includes for (default: current directory).
    #[arg(short, long)]
    folder: Option<PathBuf>,

    /// Print `!include` directives instead of bare paths.
    #[arg(long)]
    directives: bool,

    #[command(flatten)]
    config: ConfigArgs,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the folder can't be made
    /// absolute.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Arc::new(self.config.load()?);

        let folder = match &self.folder {
            Some(folder) => absolute(folder)?,
            None => std::env::current_dir()?,
        };
        let workspace = config.owning_folder(&folder).map(PathBuf::from);

        match &workspace {
            Some(root) => output.info(&format!("Workspace folder: {}", root.display())),
            None => output.info("Workspace folder: none"),
        }
        output.info(&format!(
            "Bundled includes: {}",
            config.bundled_dir().display()
        ));

        let includer = Includer::from_config(config, Arc::new(FsStorage::new()));
        let paths = includer.resolved_paths(workspace.as_deref());

        if paths.is_empty() {
            output.warning("No includes apply");
            return Ok(());
        }

        let mut text = String::new();
        for path in &paths {
            if self.directives {
                let _ = writeln!(text, "!include {}", path.display());
            } else {
                let _ = writeln!(text, "{}", path.display());
            }
        }
        output.result(&text)?;

        Ok(())
    }
}
