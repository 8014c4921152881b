//! envspace - Keep environment variables in DigitalOcean Spaces.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use envspace::cli::output;
use envspace::cli::{execute, Cli};
use envspace::core::constants;
use envspace::error::{ConfigError, Error, StorageError};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::ENV_LOG).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("envspace=debug")
        } else {
            EnvFilter::new("envspace=warn")
        }
    });

    // Logs share stderr with errors; stdout is reserved for `read` output.
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    if let Err(e) = execute(cli) {
        let suggestion = match &e {
            Error::Config(ConfigError::Missing(_)) => Some(
                "set DO_SPACE_NAME, DO_SPACE_REGION, DO_ACCESS_KEY and DO_SECRET_KEY, or add them to config.toml",
            ),
            Error::Storage(StorageError::NotFound(_)) => {
                Some("nothing has been written under this id yet; run: envspace write")
            }
            _ => None,
        };

        output::error(&e.to_string());
        if let Some(hint) = suggestion {
            output::hint(hint);
        }
        std::process::exit(1);
    }
}
