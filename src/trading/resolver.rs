//! Quote resolver
//!
//! Tries each configured quoter contract in priority order
//! (Mixed → Bin → Concentrated-Liquidity) and returns the first answer.
//! It does not compare prices across quoters.

use alloy::primitives::{Address, U256};
use tracing::{error, info, warn};

use crate::common::types::clamp_decimals;
use crate::common::{
    ChainCallError, ChainClientRef, PoolFee, QuoteCall, QuoteDirection, QuoterBackend,
    QuoterBackendConfig, QuoterConfig,
};
use crate::utils::{
    AmountError, ExactOutputQuoteRequest, QuoteOutcome, RequiredInputResult, SwapQuoteRequest,
    SwapQuoteResult, from_fixed_point, to_fixed_point,
};

/// Quote failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuoteError {
    /// Amount could not be used; no backend was called
    #[error(transparent)]
    Input(#[from] AmountError),

    /// Token field is not an address; no backend was called
    #[error("invalid token address: {0}")]
    InvalidToken(String),

    #[error("no quoter backends configured")]
    NoBackends,

    /// Every backend failed. Only the last failure is kept.
    #[error("{message}")]
    Exhausted { backend: QuoterBackend, message: String },
}

pub struct QuoteResolver {
    client: ChainClientRef,
    backends: Vec<QuoterBackendConfig>,
    decimals: u32,
    default_fee_tier: PoolFee,
}

impl QuoteResolver {
    pub fn new(client: ChainClientRef, config: &QuoterConfig) -> Self {
        Self {
            client,
            backends: config.ordered_backends(),
            decimals: clamp_decimals(config.decimals),
            default_fee_tier: config.default_fee_tier,
        }
    }

    /// Backends in the order they are tried
    pub fn backends(&self) -> &[QuoterBackendConfig] {
        &self.backends
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    /// Quote an exact-input swap. Never fails: errors come back in the result.
    pub async fn resolve(&self, request: &SwapQuoteRequest) -> SwapQuoteResult {
        match self.try_resolve(request).await {
            Ok(outcome) => SwapQuoteResult::success(outcome.amount),
            Err(e) => SwapQuoteResult::failure(e.to_string()),
        }
    }

    /// Quote the input required for an exact-output swap. Never fails.
    pub async fn resolve_exact_output(
        &self,
        request: &ExactOutputQuoteRequest,
    ) -> RequiredInputResult {
        match self.try_resolve_exact_output(request).await {
            Ok(outcome) => RequiredInputResult::success(outcome.amount),
            Err(e) => RequiredInputResult::failure(e.to_string()),
        }
    }

    pub async fn try_resolve(&self, request: &SwapQuoteRequest) -> Result<QuoteOutcome, QuoteError> {
        self.quote(
            QuoteDirection::ExactInput,
            request.token_in,
            request.token_out,
            &request.amount_in,
            request.fee_tier,
        )
        .await
    }

    pub async fn try_resolve_exact_output(
        &self,
        request: &ExactOutputQuoteRequest,
    ) -> Result<QuoteOutcome, QuoteError> {
        self.quote(
            QuoteDirection::ExactOutput,
            request.token_in,
            request.token_out,
            &request.amount_out,
            request.fee_tier,
        )
        .await
    }

    async fn quote(
        &self,
        direction: QuoteDirection,
        token_in: Address,
        token_out: Address,
        amount: &str,
        fee_tier: Option<PoolFee>,
    ) -> Result<QuoteOutcome, QuoteError> {
        let raw_amount = to_fixed_point(amount, self.decimals).inspect_err(|e| {
            warn!(amount, error = %e, "rejecting quote request");
        })?;
        let call = QuoteCall {
            direction,
            token_in,
            token_out,
            amount: raw_amount,
            fee: fee_tier.unwrap_or(self.default_fee_tier),
        };

        let mut last_failure: Option<(QuoterBackend, ChainCallError)> = None;
        for (attempt, quoter) in self.backends.iter().enumerate() {
            info!(
                backend = quoter.backend.name(),
                contract = %quoter.address,
                attempt = attempt + 1,
                ?direction,
                "requesting quote"
            );

            match self.call_backend(quoter, &call).await {
                Ok(raw) => {
                    let amount = from_fixed_point(raw, self.decimals);
                    info!(backend = quoter.backend.name(), amount = %amount, "quote received");
                    return Ok(QuoteOutcome { backend: quoter.backend, raw_amount: raw, amount });
                }
                Err(e) => {
                    warn!(backend = quoter.backend.name(), error = %e, "quoter failed, trying next");
                    last_failure = Some((quoter.backend, e));
                }
            }
        }

        match last_failure {
            Some((backend, e)) => {
                error!(backend = backend.name(), error = %e, "all quoters failed");
                Err(QuoteError::Exhausted { backend, message: e.to_string() })
            }
            None => Err(QuoteError::NoBackends),
        }
    }

    async fn call_backend(
        &self,
        quoter: &QuoterBackendConfig,
        call: &QuoteCall,
    ) -> Result<U256, ChainCallError> {
        let output = self.client.call(quoter.address, call.encode()).await?;
        call.decode_output(&output).map_err(|e| ChainCallError::Decode(e.to_string()))
    }
}
