//! Constants used throughout envspace.
//!
//! Centralizes magic strings and configuration values.

/// Default Spaces endpoint; `{region}` is replaced with the region slug.
pub const SPACES_ENDPOINT: &str = "https://{region}.digitaloceanspaces.com";

/// Provider name attached to the static credentials handed to the S3 client.
pub const CREDENTIALS_PROVIDER: &str = "envspace";

/// Space (bucket) name variable.
pub const ENV_SPACE_NAME: &str = "DO_SPACE_NAME";

/// Space region variable.
pub const ENV_SPACE_REGION: &str = "DO_SPACE_REGION";

/// Access key variable.
pub const ENV_ACCESS_KEY: &str = "DO_ACCESS_KEY";

/// Secret key variable.
pub const ENV_SECRET_KEY: &str = "DO_SECRET_KEY";

/// Optional custom endpoint variable.
pub const ENV_SPACE_ENDPOINT: &str = "DO_SPACE_ENDPOINT";

/// Config file override variable.
pub const ENV_CONFIG: &str = "ENVSPACE_CONFIG";

/// Log filter variable.
pub const ENV_LOG: &str = "ENVSPACE_LOG";

/// Config directory name under the platform config dir.
pub const CONFIG_DIR: &str = "envspace";

/// Config file name (config.toml).
pub const CONFIG_FILE: &str = "config.toml";
