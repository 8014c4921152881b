//! Command-line interface.

pub mod completions;
pub mod output;
pub mod read;
pub mod write;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::core::config::Settings;
use crate::core::constants;
use crate::core::store::Spaces;
use crate::error::{Result, ValidationError};

/// envspace - Keep environment variables in DigitalOcean Spaces.
#[derive(Parser)]
#[command(
    name = "envspace",
    about = "Store and load named sets of environment variables in DigitalOcean Spaces",
    version
)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a config.toml with connection settings
    #[arg(long, global = true, value_name = "PATH", env = constants::ENV_CONFIG)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Connection settings, each backed by an environment variable.
#[derive(Args, Default)]
pub struct ConnectionArgs {
    /// Space (bucket) name
    #[arg(long, global = true, value_name = "NAME", env = constants::ENV_SPACE_NAME)]
    pub space: Option<String>,

    /// Space region (e.g. nyc3)
    #[arg(long, global = true, value_name = "REGION", env = constants::ENV_SPACE_REGION)]
    pub region: Option<String>,

    /// Spaces access key
    #[arg(
        long,
        global = true,
        value_name = "KEY",
        env = constants::ENV_ACCESS_KEY,
        hide_env_values = true
    )]
    pub access_key: Option<String>,

    /// Spaces secret key
    #[arg(
        long,
        global = true,
        value_name = "KEY",
        env = constants::ENV_SECRET_KEY,
        hide_env_values = true
    )]
    pub secret_key: Option<String>,

    /// Custom S3-compatible endpoint (defaults to the Spaces endpoint for the region)
    #[arg(long, global = true, value_name = "URL", env = constants::ENV_SPACE_ENDPOINT)]
    pub endpoint: Option<String>,

    /// Use path-style object addressing
    #[arg(long, global = true)]
    pub path_style: bool,
}

impl From<ConnectionArgs> for Settings {
    fn from(args: ConnectionArgs) -> Self {
        Settings {
            space: args.space,
            region: args.region,
            access_key: args.access_key,
            secret_key: args.secret_key,
            endpoint: args.endpoint,
            path_style: args.path_style.then_some(true),
        }
    }
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Write environment variables to a space
    Write {
        /// ID for the environment variables
        #[arg(long)]
        id: String,

        /// Environment variables in KEY=VALUE format, repeated or comma-separated
        #[arg(
            long = "vars",
            value_name = "KEY=VALUE",
            required = true,
            num_args = 1..,
            value_delimiter = ','
        )]
        vars: Vec<String>,
    },

    /// Read environment variables from a space
    Read {
        /// ID for the environment variables
        #[arg(long)]
        id: String,

        /// Output in 'source' format (e.g. export KEY=VALUE)
        #[arg(long, conflicts_with = "json")]
        source: bool,

        /// Output as a JSON object
        #[arg(long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Supported shells for completions.
#[derive(clap::ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

/// Execute a command.
pub fn execute(cli: Cli) -> Result<()> {
    let Cli {
        config,
        connection,
        command,
        ..
    } = cli;

    match command {
        Command::Write { id, vars } => {
            // Reject bad input before touching the network.
            let vars = write::parse(&id, &vars)?;
            let store = connect(connection, config.as_deref())?;
            write::execute(&store, &vars)
        }
        Command::Read { id, source, json } => {
            check_id(&id)?;
            let store = connect(connection, config.as_deref())?;
            let format = read::Format::from_flags(source, json);
            read::execute(&store, &id, format, &mut std::io::stdout().lock())
        }
        Command::Completions { shell } => completions::execute(shell),
    }
}

/// Reject ids that no backend can store under.
pub(crate) fn check_id(id: &str) -> std::result::Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::EmptyId);
    }
    Ok(())
}

/// Resolve settings and connect to the configured space.
fn connect(args: ConnectionArgs, config: Option<&Path>) -> Result<Spaces> {
    let file = Settings::discover(config)?;
    let settings = Settings::from(args).or(file);
    let spaces = Spaces::from_config(&settings.resolve()?)?;
    debug!(space = spaces.space(), "connected");
    Ok(spaces)
}
