pub mod engine;
pub mod ligation;
pub mod medium;
pub mod pcr;
pub mod units;

pub use crate::domain::ports::Calculation;
pub use crate::utils::error::Result;
