//! Deterministic integration of the SIRD equations.
mod simulator;
mod trajectory;

pub use simulator::*;
pub use trajectory::*;
