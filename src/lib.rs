//! Swap amount estimation through on-chain quoter contracts.
//!
//! [`QuoteResolver`] asks the Mixed, Bin and Concentrated-Liquidity quoters in
//! that order and returns the first answer. [`EstimateController`] wraps it for
//! live input: edits are debounced and results of superseded edits are dropped.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use swap_quoter_sdk::{EstimateController, JsonRpcChainClient, QuoterConfig};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = QuoterConfig::from_env()?;
//! let client = Arc::new(JsonRpcChainClient::from_env()?);
//! let controller = EstimateController::from_config(client, &config);
//!
//! let mut updates = controller.subscribe();
//! controller.observe("0x...", "0x...", "1.5");
//! updates.changed().await?;
//! println!("{:?}", *updates.borrow());
//! # Ok(())
//! # }
//! ```

pub mod common;
pub mod constants;
pub mod trading;
pub mod utils;

pub use common::{
    Address, ChainCallError, ChainClient, ChainClientRef, JsonRpcChainClient, JsonRpcConfig,
    PoolFee, QuoterBackend, QuoterBackendConfig, QuoterConfig,
};
pub use trading::{
    EstimateController, EstimateState, QuoteError, QuoteResolver, RequestGeneration,
};
pub use utils::{
    ExactOutputQuoteRequest, QuoteOutcome, RequiredInputResult, SwapQuoteRequest,
    SwapQuoteResult,
};
