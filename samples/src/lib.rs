pub mod error;
pub mod sample_file;

pub use error::*;
pub use sample_file::*;
