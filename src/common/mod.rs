pub mod chain_client;
pub mod json_rpc;
pub mod mock_rpc;
pub mod quoter;
pub mod types;

pub use alloy::primitives::{Address, U256};
pub use chain_client::{ChainCallError, ChainClient, ChainClientRef};
pub use json_rpc::{JsonRpcChainClient, JsonRpcConfig};
pub use mock_rpc::{MockChainClient, MockResponse, RecordedCall};
pub use quoter::{IQuoter, QuoteCall, QuoteDirection};
pub use types::*;
