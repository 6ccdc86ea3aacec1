mod params;
mod state;

pub use params::*;
pub use state::*;
