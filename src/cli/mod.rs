//! Command line interface for the packager.
//!
//! Parses arguments, layers configuration (built-in defaults, then the config
//! file, then flags), and runs the pipeline once.

mod args;
mod config_file;
mod output;

pub use args::Args;
pub use config_file::{DEFAULT_CONFIG_FILE, FileConfig};
pub use output::OutputManager;

use crate::bundler::{Pipeline, PipelineState, PythonToolchain, Settings, SettingsBuilder};
use crate::error::{CliError, EXIT_SUCCESS, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    execute(Args::parse_args()).await
}

/// Runs the packager with already-parsed arguments.
pub async fn execute(args: Args) -> Result<i32> {
    let output = OutputManager::new(args.verbose, args.quiet);
    let settings = resolve_settings(&args).await?;

    log::info!(
        "Packaging {} as {} into {}",
        settings.entry_point().display(),
        settings.display_name(),
        settings.dist_dir().display()
    );

    let mut pipeline = Pipeline::new(&settings, PythonToolchain::new(), &output);
    let outcome = pipeline.run().await;
    if let Some(python) = pipeline.toolchain().interpreter() {
        log::debug!("Interpreter used: {}", python.display());
    }

    match outcome {
        Ok(_) => Ok(EXIT_SUCCESS),
        Err(failure) => {
            if failure.stage == PipelineState::Bundling {
                output.warn(&format!(
                    "Anything left in {} from this run is incomplete and must not be distributed",
                    settings.dist_dir().display()
                ));
            }
            Err(failure.into())
        }
    }
}

/// Defaults, then config file, then command line.
pub async fn resolve_settings(args: &Args) -> Result<Settings> {
    let file = FileConfig::discover(args.config.as_deref()).await?;
    let builder = args.apply(file.apply(SettingsBuilder::new()));
    builder.build().map_err(|e| {
        CliError::InvalidConfiguration {
            reason: e.to_string(),
        }
        .into()
    })
}
