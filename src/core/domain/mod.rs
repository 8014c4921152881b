//! Domain types.

mod vars;

pub use vars::Variables;
