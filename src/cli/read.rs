//! Read command.
//!
//! Prints a stored set to stdout, one entry per line in key order. Errors
//! and logs go to stderr so the output can be fed to `eval` or `source`.

use std::io::Write;

use tracing::debug;

use crate::core::domain::Variables;
use crate::core::store::Storage;
use crate::error::Result;

/// Output format for a set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `KEY=VALUE`
    Plain,
    /// `export KEY=VALUE`, values shell-quoted when needed
    Export,
    /// A JSON object
    Json,
}

impl Format {
    /// Pick a format from the `--source` / `--json` flags.
    pub fn from_flags(source: bool, json: bool) -> Self {
        match (source, json) {
            (_, true) => Self::Json,
            (true, false) => Self::Export,
            (false, false) => Self::Plain,
        }
    }
}

/// Read the set stored under `id` and render it to `out`.
pub fn execute(store: &dyn Storage, id: &str, format: Format, out: &mut impl Write) -> Result<()> {
    let vars = store.read(id)?;
    debug!(id, entries = vars.len(), "read environment variables");
    render(&vars, format, out)
}

/// Render a set to `out`.
pub fn render(vars: &Variables, format: Format, out: &mut impl Write) -> Result<()> {
    match format {
        Format::Plain => {
            for (key, value) in vars.iter() {
                writeln!(out, "{}={}", key, value)?;
            }
        }
        Format::Export => {
            for (key, value) in vars.iter() {
                writeln!(out, "export {}={}", key, shell_quote(value))?;
            }
        }
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, vars.entries())?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Quote a value for POSIX shells unless it is made of safe characters.
fn shell_quote(value: &str) -> String {
    let safe = value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "_-./:@%+,".contains(c));
    if safe {
        value.to_string()
    } else {
        format!("'{}'", value.replace('\'', "'\\''"))
    }
}
