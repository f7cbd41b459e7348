//! # ascend_core
//!
//! Core domain logic for Ascend.

pub mod completion;
pub mod form;
pub mod prompt;
pub mod session;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
