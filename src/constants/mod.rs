pub mod decimals;
pub mod quoter;

pub use decimals::*;
pub use quoter::*;
