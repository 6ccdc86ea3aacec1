pub use crate::data::{EpidemicRecord, InitialState, Observations};
pub use crate::epidemic::{Compartment, ModelState, SirdParams};
pub use crate::error::{Result, SirdError};
pub use crate::fit::{BestFit, Grid, GridSearch, ParamRange, ScoreMode};
pub use crate::sim::{NegativePolicy, Simulator, Trajectory};

/// Basic representation of time. This crate usually assumes time is measured
/// in days.
pub type Time = u32;

/// Base Real type used by this crate. Uses an alias to easily change precision
/// if necessary.
pub type Real = f64;
pub(crate) const INF: Real = Real::INFINITY;
