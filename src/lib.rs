//! envspace - Keep named sets of environment variables in DigitalOcean Spaces.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── write         # Store a set from KEY=VALUE arguments
//! │   ├── read          # Print a stored set (plain, export, JSON)
//! │   ├── completions   # Shell completions
//! │   └── output        # Terminal output helpers
//! └── core/             # Core library components
//!     ├── domain        # Variables set type
//!     ├── codec/        # Document encoding
//!     │   ├── mod       # Codec trait
//!     │   └── plain     # KEY=VALUE lines, sorted by key
//!     ├── store/        # Storage backends
//!     │   ├── mod       # Storage trait
//!     │   ├── spaces    # DigitalOcean Spaces (S3-compatible)
//!     │   └── memory    # In-process map, for tests
//!     ├── config        # Settings from flags, env and config.toml
//!     └── constants     # Variable names and defaults
//! ```
//!
//! # Example
//!
//! ```
//! use envspace::core::domain::Variables;
//! use envspace::core::store::{Memory, Storage};
//!
//! let store = Memory::new();
//! let mut vars = Variables::new("staging");
//! vars.set("DB_HOST", "localhost");
//! store.write(&vars).unwrap();
//!
//! let loaded = store.read("staging").unwrap();
//! assert_eq!(loaded.get("DB_HOST").unwrap(), "localhost");
//! ```

pub mod cli;
pub mod core;
pub mod error;
