//! Core library components.
//!
//! The variable set type, its document encoding, and the storage
//! backends. Nothing in here reads the process environment; the CLI
//! resolves settings and passes them in.

pub mod codec;
pub mod config;
pub mod constants;
pub mod domain;
pub mod store;
