//! Scripted chain client
//!
//! Answers quoter calls from an in-memory table keyed by contract address and
//! records every call it receives, so tests can assert which backends were
//! tried and with which arguments.
//!
//! ```rust
//! use alloy::primitives::{U256, address};
//! use swap_quoter_sdk::common::mock_rpc::{MockChainClient, MockResponse};
//! use swap_quoter_sdk::common::ChainCallError;
//!
//! let client = MockChainClient::new();
//! client.respond(
//!     address!("0000000000000000000000000000000000000001"),
//!     MockResponse::Fail(ChainCallError::Revert("no pool".into())),
//! );
//! client.respond(
//!     address!("0000000000000000000000000000000000000002"),
//!     MockResponse::Amount(U256::from(2_000_000_000_000_000_000u128)),
//! );
//! ```

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolValue;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

use super::chain_client::{ChainCallError, ChainClient};
use super::quoter::QuoteCall;

/// Scripted answer for one contract
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this amount as the first output word
    Amount(U256),
    /// Return `amount * numerator / denominator` of the requested amount
    Rate { numerator: u64, denominator: u64 },
    /// Return these bytes untouched
    Raw(Vec<u8>),
    /// Fail the call
    Fail(ChainCallError),
}

/// One observed call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub contract: Address,
    pub input: Bytes,
}

impl RecordedCall {
    /// The quoter call encoded in `input`, if it is one.
    pub fn quote(&self) -> Option<QuoteCall> {
        QuoteCall::decode(&self.input)
    }

    /// The fixed-point amount argument, if present.
    pub fn amount(&self) -> Option<U256> {
        self.quote().map(|call| call.amount)
    }
}

#[derive(Default)]
pub struct MockChainClient {
    responses: Mutex<HashMap<Address, MockResponse>>,
    latencies: Mutex<HashMap<Address, Duration>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockChainClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, contract: Address, response: MockResponse) {
        self.responses.lock().insert(contract, response);
    }

    /// Delay answers from `contract` by `latency`. Applies to calls made
    /// after this point.
    pub fn delay(&self, contract: Address, latency: Duration) {
        self.latencies.lock().insert(contract, latency);
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn calls_to(&self, contract: Address) -> Vec<RecordedCall> {
        self.calls.lock().iter().filter(|c| c.contract == contract).cloned().collect()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    fn answer(&self, contract: Address, input: &[u8]) -> Result<Bytes, ChainCallError> {
        let response = self.responses.lock().get(&contract).cloned();
        match response {
            Some(MockResponse::Amount(amount)) => Ok(amount.abi_encode().into()),
            Some(MockResponse::Rate { numerator, denominator }) => {
                let amount = QuoteCall::decode(input)
                    .map(|call| call.amount)
                    .ok_or_else(|| ChainCallError::Revert("not a quoter call".into()))?;
                let quoted = amount
                    .checked_mul(U256::from(numerator))
                    .and_then(|v| v.checked_div(U256::from(denominator)))
                    .ok_or_else(|| ChainCallError::Revert("mock rate overflow".into()))?;
                Ok(quoted.abi_encode().into())
            }
            Some(MockResponse::Raw(bytes)) => Ok(bytes.into()),
            Some(MockResponse::Fail(err)) => Err(err),
            None => Err(ChainCallError::Transport(format!("no mock response for {contract}"))),
        }
    }
}

#[async_trait]
impl ChainClient for MockChainClient {
    async fn call(&self, contract: Address, input: Bytes) -> Result<Bytes, ChainCallError> {
        // Record before waiting so in-flight calls are visible
        self.calls.lock().push(RecordedCall { contract, input: input.clone() });

        let latency = self.latencies.lock().get(&contract).copied();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        self.answer(contract, &input)
    }
}
