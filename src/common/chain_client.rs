//! Chain client capability
//!
//! The quoting core only needs one thing from the chain: execute a read-only
//! contract call and hand back the raw return data. The calldata already
//! carries the function selector and arguments. Production code uses
//! [`JsonRpcChainClient`](super::json_rpc::JsonRpcChainClient), tests use
//! [`MockChainClient`](super::mock_rpc::MockChainClient).

use alloy::primitives::{Address, Bytes};
use async_trait::async_trait;
use std::sync::Arc;

/// Failure of a single contract call.
///
/// `Display` is the bare message so it can be surfaced to users verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainCallError {
    /// Network or HTTP level failure
    #[error("{0}")]
    Transport(String),

    /// The node executed the call and it reverted
    #[error("{0}")]
    Revert(String),

    /// Return data did not match the expected shape
    #[error("{0}")]
    Decode(String),
}

#[async_trait]
pub trait ChainClient: Send + Sync {
    /// `eth_call` `input` against `contract`, returning the raw ABI-encoded output.
    async fn call(&self, contract: Address, input: Bytes) -> Result<Bytes, ChainCallError>;
}

/// Shared handle to a chain client
pub type ChainClientRef = Arc<dyn ChainClient>;
