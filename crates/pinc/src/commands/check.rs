//! `pinc check` command implementation.

use std::path::PathBuf;

use clap::Args;
use pinc_includer::{cannot_include, marker};
use pinc_storage::{FsStorage, Storage};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Diagram files to check.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

/// What `check` found in a single diagram.
#[derive(Debug, PartialEq, Eq)]
struct Report {
    has_marker: bool,
    cannot_include: bool,
}

impl Report {
    fn for_content(content: &str) -> Self {
        Self {
            has_marker: marker::find_marker(content).is_some(),
            cannot_include: cannot_include(content),
        }
    }

    /// A marker in a dialect that rejects `!include` lines.
    fn is_conflict(&self) -> bool {
        self.has_marker && self.cannot_include
    }
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if a file can't be read or any diagram places a marker
    /// in an include-incompatible dialect.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let storage = FsStorage::new();
        let mut conflicts = 0usize;

        for file in &self.files {
            let report = Report::for_content(&storage.read(file)?);
            let name = file.display();

            if report.is_conflict() {
                conflicts += 1;
                output.warning(&format!(
                    "{name}: autoinclude marker in a diagram that cannot take includes"
                ));
            } else if report.has_marker {
                output.success(&format!("{name}: autoinclude marker"));
            } else if report.cannot_include {
                output.info(&format!("{name}: include-incompatible dialect"));
            } else {
                output.info(&format!("{name}: no marker"));
            }
        }

        if conflicts > 0 {
            return Err(CliError::Validation(format!(
                "{conflicts} diagram(s) request includes they cannot accept"
            )));
        }

        Ok(())
    }
}
