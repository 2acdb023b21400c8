//! Fixed-point scale used when converting human amounts to on-chain integers.
//!
//! Token decimals are not introspected. Every token is assumed to use
//! [`DEFAULT_TOKEN_DECIMALS`] unless the caller overrides the scale in
//! [`QuoterConfig`](crate::common::QuoterConfig).

/// Decimal places assumed for every token.
pub const DEFAULT_TOKEN_DECIMALS: u32 = 18;

/// Largest supported scale. Larger values are clamped.
pub const MAX_TOKEN_DECIMALS: u32 = 36;
