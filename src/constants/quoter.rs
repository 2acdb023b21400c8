//! Quoter defaults and configuration keys.

/// Amount published alongside any error so display code always has a value.
pub const ZERO_AMOUNT: &str = "0";

/// Debounce window applied before an estimate is resolved.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Largest value a `uint24` fee tier can hold.
pub const MAX_UINT24: u32 = 0x00FF_FFFF;

pub const ENV_QUOTER_MIXED_ADDRESS: &str = "QUOTER_MIXED_ADDRESS";
pub const ENV_QUOTER_BIN_ADDRESS: &str = "QUOTER_BIN_ADDRESS";
pub const ENV_QUOTER_CL_ADDRESS: &str = "QUOTER_CL_ADDRESS";
pub const ENV_QUOTE_TOKEN_DECIMALS: &str = "QUOTE_TOKEN_DECIMALS";
pub const ENV_QUOTE_DEBOUNCE_MS: &str = "QUOTE_DEBOUNCE_MS";
pub const ENV_RPC_URL: &str = "RPC_URL";
