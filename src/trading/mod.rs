pub mod estimate;
pub mod resolver;

pub use estimate::{EstimateController, EstimateState, RequestGeneration};
pub use resolver::{QuoteError, QuoteResolver};
