pub mod laws;
pub mod runtime;
pub mod units;
