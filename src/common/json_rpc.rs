//! JSON-RPC chain client
//!
//! Executes quoter calls through `eth_call` on an alloy [`RootProvider`]. Only
//! read-only calls are issued; nothing is signed or submitted.

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes};
use alloy::providers::{Provider, RootProvider};
use alloy::rpc::client::RpcClient;
use alloy::rpc::types::TransactionRequest;
use alloy::transports::http::Http;
use alloy::transports::{RpcError, TransportError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Proxy, Url};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::debug;

use super::chain_client::{ChainCallError, ChainClient};
use crate::constants::ENV_RPC_URL;

/// JSON-RPC client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRpcConfig {
    /// Node endpoint, e.g. `https://bsc-dataseed.bnbchain.org`
    pub rpc_url: String,
    /// Per-request timeout (milliseconds)
    pub timeout_millis: u64,
}

impl Default for JsonRpcConfig {
    fn default() -> Self {
        Self { rpc_url: "http://127.0.0.1:8545".to_string(), timeout_millis: 10_000 }
    }
}

impl JsonRpcConfig {
    /// Read `RPC_URL` from the environment, falling back to the local node.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = env::var(ENV_RPC_URL) {
            config.rpc_url = url;
        }
        config
    }
}

/// `eth_call` over HTTP
pub struct JsonRpcChainClient {
    provider: RootProvider,
    pub config: JsonRpcConfig,
}

impl JsonRpcChainClient {
    pub fn new(config: JsonRpcConfig) -> Result<Self> {
        let url: Url = config
            .rpc_url
            .parse()
            .with_context(|| format!("invalid rpc url: {}", config.rpc_url))?;

        let mut builder = Client::builder()
            .pool_idle_timeout(Duration::from_secs(60))
            .tcp_nodelay(true)
            .timeout(Duration::from_millis(config.timeout_millis))
            .connect_timeout(Duration::from_secs(5));

        // HTTPS_PROXY wins over HTTP_PROXY
        if let Ok(https_proxy) = env::var("HTTPS_PROXY").or_else(|_| env::var("https_proxy")) {
            builder = builder.proxy(Proxy::https(&https_proxy)?);
        } else if let Ok(http_proxy) = env::var("HTTP_PROXY").or_else(|_| env::var("http_proxy")) {
            builder = builder.proxy(Proxy::http(&http_proxy)?);
        }

        let http = builder.build().context("build rpc http client")?;
        let provider = RootProvider::new(RpcClient::new(Http::with_client(http, url), false));

        Ok(Self { provider, config })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(JsonRpcConfig::from_env())
    }
}

#[async_trait]
impl ChainClient for JsonRpcChainClient {
    async fn call(&self, contract: Address, input: Bytes) -> Result<Bytes, ChainCallError> {
        debug!(contract = %contract, "eth_call");
        let tx = TransactionRequest::default().with_to(contract).with_input(input);
        self.provider.call(tx).await.map_err(call_error)
    }
}

/// Classify a provider failure. A JSON-RPC error object means the node ran the
/// call and rejected it; anything else is a transport problem.
pub fn call_error(err: TransportError) -> ChainCallError {
    match err {
        RpcError::ErrorResp(payload) => ChainCallError::Revert(payload.message.to_string()),
        RpcError::NullResp => {
            ChainCallError::Decode("rpc response has neither result nor error".into())
        }
        RpcError::DeserError { err, .. } => {
            ChainCallError::Decode(format!("malformed rpc response: {err}"))
        }
        other => ChainCallError::Transport(other.to_string()),
    }
}
