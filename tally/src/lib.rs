pub mod sample;
pub mod sign;
pub mod tally;

pub use crate::sample::*;
pub use crate::sign::*;
pub use crate::tally::*;
