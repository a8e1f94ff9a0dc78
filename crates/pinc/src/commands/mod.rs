//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod render;
pub(crate) mod resolve;

pub(crate) use check::CheckArgs;
pub(crate) use render::RenderArgs;
pub(crate) use resolve::ResolveArgs;

use std::path::{Path, PathBuf};

use clap::Args;
use pinc_config::{CliSettings, Config};

use crate::error::CliError;

/// Configuration arguments shared by all commands.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover pinc.toml).
    #[arg(short, long, env = "PINC_CONFIG")]
    config: Option<PathBuf>,

    /// Bundled includes directory (overrides config).
    #[arg(long, env = "PINC_BUNDLED_DIR")]
    bundled_dir: Option<PathBuf>,

    /// Include specifier; repeat to add more (overrides configured defaults).
    #[arg(short = 'i', long = "include")]
    includes: Vec<String>,
}

impl ConfigArgs {
    /// Load configuration with CLI overrides applied.
    pub(crate) fn load(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            bundled_dir: self.bundled_dir.clone(),
            specifiers: (!self.includes.is_empty()).then(|| self.includes.clone()),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

/// Make a path absolute against the current directory without touching the
/// filesystem.
pub(crate) fn absolute(path: &Path) -> Result<PathBuf, CliError> {
    Ok(std::path::absolute(path)?)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        config: ConfigArgs,
    }

    #[test]
    fn test_load_applies_cli_overrides() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join("pinc.toml");
        std::fs::write(&config_path, "[includes]\nspecifiers = [\"theme\"]\n").unwrap();

        let cli = TestCli::parse_from([
            "pinc",
            "--config",
            config_path.to_str().unwrap(),
            "--bundled-dir",
            "/opt/includes",
            "-i",
            "a",
            "--include",
            "b",
        ]);
        let config = cli.config.load().unwrap();

        assert_eq!(config.bundled_dir(), Path::new("/opt/includes"));
        assert_eq!(config.specifiers_for(None).to_vec(), vec!["a".to_owned(), "b".to_owned()]);
    }

    #[test]
    fn test_load_keeps_configured_specifiers_without_flags() {
        let temp = tempfile::tempdir().unwrap();
        let config_path = temp.path().join("pinc.toml");
        std::fs::write(&config_path, "[includes]\nspecifiers = [\"theme\"]\n").unwrap();

        let cli = TestCli::parse_from(["pinc", "--config", config_path.to_str().unwrap()]);
        let config = cli.config.load().unwrap();

        assert_eq!(config.specifiers_for(None).to_vec(), vec!["theme".to_owned()]);
    }

    #[test]
    fn test_load_missing_config_file() {
        let cli = TestCli::parse_from(["pinc", "--config", "/nonexistent/pinc.toml"]);
        assert!(matches!(cli.config.load(), Err(CliError::Config(_))));
    }
}
