//! Calibration of SIRD rates against observed data.
//!
//! A calibration enumerates a [`Grid`] of candidate rates, simulates each
//! one and keeps the candidate with the lowest score according to a
//! [`ScoreMode`].
mod grid;
mod score;
mod search;

pub use grid::*;
pub use score::*;
pub use search::*;
