//! Quote request and result types.
//!
//! Results are plain values: an error never escapes as a fault, it travels in
//! the `error` field next to a `"0"` amount.

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::common::{PoolFee, QuoterBackend};
use crate::constants::ZERO_AMOUNT;

/// Exact-input quote: how much `token_out` does `amount_in` of `token_in` buy?
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuoteRequest {
    pub token_in: Address,
    pub token_out: Address,
    /// Human units, e.g. `"1.5"`
    pub amount_in: String,
    /// Falls back to the configured default tier when `None`
    #[serde(default)]
    pub fee_tier: Option<PoolFee>,
}

impl SwapQuoteRequest {
    pub fn new(token_in: Address, token_out: Address, amount_in: impl Into<String>) -> Self {
        Self {
            token_in,
            token_out,
            amount_in: amount_in.into(),
            fee_tier: None,
        }
    }

    pub fn with_fee_tier(mut self, fee_tier: PoolFee) -> Self {
        self.fee_tier = Some(fee_tier);
        self
    }
}

/// Exact-output quote: how much `token_in` is needed to receive `amount_out`?
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExactOutputQuoteRequest {
    pub token_in: Address,
    pub token_out: Address,
    /// Human units
    pub amount_out: String,
    #[serde(default)]
    pub fee_tier: Option<PoolFee>,
}

impl ExactOutputQuoteRequest {
    pub fn new(token_in: Address, token_out: Address, amount_out: impl Into<String>) -> Self {
        Self {
            token_in,
            token_out,
            amount_out: amount_out.into(),
            fee_tier: None,
        }
    }

    pub fn with_fee_tier(mut self, fee_tier: PoolFee) -> Self {
        self.fee_tier = Some(fee_tier);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapQuoteResult {
    /// Quoted output in human units, `"0"` on failure
    pub amount_out: String,
    pub error: Option<String>,
}

impl SwapQuoteResult {
    pub fn success(amount_out: impl Into<String>) -> Self {
        Self { amount_out: amount_out.into(), error: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { amount_out: ZERO_AMOUNT.to_string(), error: Some(error.into()) }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredInputResult {
    /// Required input in human units, `"0"` on failure
    pub amount_in: String,
    pub error: Option<String>,
}

impl RequiredInputResult {
    pub fn success(amount_in: impl Into<String>) -> Self {
        Self { amount_in: amount_in.into(), error: None }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self { amount_in: ZERO_AMOUNT.to_string(), error: Some(error.into()) }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Successful quote with the backend that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteOutcome {
    pub backend: QuoterBackend,
    /// Quoted amount in smallest units
    pub raw_amount: U256,
    /// Quoted amount in human units
    pub amount: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_failure_carries_zero_amount() {
        let result = SwapQuoteResult::failure("execution reverted");
        assert_eq!(result.amount_out, "0");
        assert!(!result.is_ok());

        let result = RequiredInputResult::failure("execution reverted");
        assert_eq!(result.amount_in, "0");
    }

    #[test]
    fn test_request_deserializes_without_fee() {
        let request: SwapQuoteRequest = serde_json::from_str(
            r#"{
                "token_in": "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
                "token_out": "0xBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB",
                "amount_in": "10"
            }"#,
        )
        .unwrap();
        let expected = SwapQuoteRequest::new(
            address!("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"),
            address!("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb"),
            "10",
        );
        assert_eq!(request, expected);
        assert_eq!(request.fee_tier, None);
    }
}
