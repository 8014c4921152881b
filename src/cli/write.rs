//! Write command.

use tracing::debug;

use crate::cli::{check_id, output};
use crate::core::domain::Variables;
use crate::core::store::Storage;
use crate::error::{Result, ValidationError};

/// Split a `KEY=VALUE` argument.
///
/// The argument must contain exactly one `=`, the same rule stored
/// documents follow, so anything written can be read back.
pub fn parse_assignment(arg: &str) -> std::result::Result<(&str, &str), ValidationError> {
    match arg.split_once('=') {
        Some((key, value)) if !value.contains('=') => Ok((key, value)),
        _ => Err(ValidationError::InvalidAssignment(arg.to_string())),
    }
}

/// Build a set from `KEY=VALUE` arguments.
///
/// A repeated key keeps its last value.
pub fn parse(id: &str, args: &[String]) -> Result<Variables> {
    check_id(id)?;
    let mut vars = Variables::new(id);
    for arg in args {
        let (key, value) = parse_assignment(arg)?;
        vars.set(key, value);
    }
    Ok(vars)
}

/// Store a set, replacing whatever was stored under its id.
pub fn execute(store: &dyn Storage, vars: &Variables) -> Result<()> {
    debug!(id = vars.id(), entries = vars.len(), "writing environment variables");
    store.write(vars)?;
    output::success(&format!(
        "wrote {} environment variables to {}",
        vars.len(),
        output::key(vars.id())
    ));
    Ok(())
}
