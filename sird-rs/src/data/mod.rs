//! Observed epidemic curves: loading, validation and synthetic generation.
mod loader;
pub mod synthetic;

pub use loader::*;
