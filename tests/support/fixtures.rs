//! Test fixtures and constants.

/// Config pointing at a closed port on localhost.
///
/// Credentials are complete, so the client is built and the request fails
/// only when it is sent.
pub const UNREACHABLE_CONFIG: &str = r#"
space = "test-space"
region = "nyc3"
access_key = "test-access-key"
secret_key = "test-secret-key"
endpoint = "http://127.0.0.1:9"
path_style = true
"#;

/// Standard variables used across multiple tests.
pub const STANDARD_VARS: &[(&str, &str)] = &[
    ("API_KEY", "12345"),
    ("DB_HOST", "localhost"),
    ("DB_PORT", "5432"),
];

/// The encoded form of [`STANDARD_VARS`].
pub const STANDARD_DOC: &str = "API_KEY=12345\nDB_HOST=localhost\nDB_PORT=5432\n";
