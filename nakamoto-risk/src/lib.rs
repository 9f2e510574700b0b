pub mod error;
pub mod math;
pub mod params;
pub mod report;
pub mod simulation;

pub use error::{Result, RiskError};
pub use params::HashpowerSplit;
