//! Calibration of a deterministic SIRD (Susceptible, Infectious, Recovered,
//! Dead) epidemic model against observed daily counts.
//!
//! The pipeline is short: load observations, integrate the model forward with
//! Euler steps, score the result against data and keep the best candidate of
//! a parameter grid.
#[macro_use]
mod macros;

pub mod config;
pub mod data;
pub mod epidemic;
pub mod error;
pub mod fit;
pub mod prelude;
pub mod sim;
pub mod utils;

pub use crate::error::{Result, SirdError};
pub use crate::prelude::{Real, Time};
