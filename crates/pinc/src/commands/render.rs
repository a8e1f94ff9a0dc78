//! `pinc render` command implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use pinc_includer::{Diagram, Includer};
use pinc_storage::{FsStorage, Storage};

use super::{ConfigArgs, absolute};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Diagram files to process.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Write results into this directory instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or a diagram can't be read or
    /// written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = Arc::new(self.config.load()?);
        let storage = Arc::new(FsStorage::new());
        let includer = Includer::from_config(config, Arc::clone(&storage) as Arc<dyn Storage>);

        if let Some(dir) = &self.output {
            std::fs::create_dir_all(dir)?;
        }

        for file in &self.files {
            let path = absolute(file)?;
            let diagram = Diagram::new(&path, storage.read(&path)?);
            let prepared = includer.add_includes(&diagram);

            match &self.output {
                Some(dir) => {
                    let target = output_path(dir, &path)?;
                    std::fs::write(&target, &prepared)?;
                    output.success(&format!("{} -> {}", file.display(), target.display()));
                }
                None => output.result(&prepared)?,
            }
        }

        tracing::info!(
            files = self.files.len(),
            folders = includer.cache().len(),
            "Render completed"
        );

        Ok(())
    }
}

/// Target path for a rendered diagram inside the output directory.
fn output_path(dir: &Path, source: &Path) -> Result<PathBuf, CliError> {
    let name = source.file_name().ok_or_else(|| {
        CliError::Validation(format!("{} is not a file path", source.display()))
    })?;
    Ok(dir.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        let target = output_path(Path::new("/out"), Path::new("/ws/docs/flow.puml")).unwrap();
        assert_eq!(target, PathBuf::from("/out/flow.puml"));
    }

    #[test]
    fn test_output_path_rejects_root() {
        let err = output_path(Path::new("/out"), Path::new("/")).unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
    }
}
