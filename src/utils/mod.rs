pub mod quote;
pub mod token;

pub use quote::*;
pub use token::{AmountError, from_fixed_point, is_idle_amount, parse_amount, to_fixed_point};
