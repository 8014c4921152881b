//! Line-oriented `KEY=VALUE` format.
//!
//! ```text
//! API_KEY=12345
//! DB_HOST=localhost
//! ```
//!
//! One entry per line, each terminated by `\n`, sorted by key. An empty
//! set encodes to zero bytes. Nothing is quoted or escaped, so a valid
//! line holds exactly one `=`.

use tracing::trace;

use super::Codec;
use crate::core::domain::Variables;
use crate::error::CodecError;

/// Plain text codec.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainText;

impl Codec for PlainText {
    fn encode(&self, vars: &Variables) -> Vec<u8> {
        let mut doc = String::new();
        for (key, value) in vars.iter() {
            doc.push_str(key);
            doc.push('=');
            doc.push_str(value);
            doc.push('\n');
        }

        trace!(entries = vars.len(), bytes = doc.len(), "encoded document");
        doc.into_bytes()
    }

    fn decode(&self, id: &str, data: &[u8]) -> Result<Variables, CodecError> {
        let text = std::str::from_utf8(data).map_err(|_| CodecError::InvalidEncoding)?;
        let mut vars = Variables::new(id);

        for line in text.split('\n') {
            if line.is_empty() {
                continue;
            }
            let (key, value) = split_line(line)?;
            // Duplicate keys: the last occurrence wins.
            vars.set(key, value);
        }

        trace!(entries = vars.len(), bytes = data.len(), "decoded document");
        Ok(vars)
    }

    fn name(&self) -> &'static str {
        "plain"
    }
}

/// Split a line on its only `=`.
fn split_line(line: &str) -> Result<(&str, &str), CodecError> {
    match line.split_once('=') {
        Some((key, value)) if !value.contains('=') => Ok((key, value)),
        _ => Err(CodecError::MalformedLine(line.to_string())),
    }
}
