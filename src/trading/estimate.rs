//! Debounced estimate controller
//!
//! Turns a stream of `(token_in, token_out, amount_in)` edits into at most one
//! quote per pause in typing. Each scheduling event mints a new
//! [`RequestGeneration`]; a result is only published if its generation is still
//! the current one when it arrives.
//!
//! State per edit:
//! - idle input (empty field, amount `<= 0`): pending timer cancelled, estimate cleared
//! - any other input: pending timer cancelled, a new debounce timer started
//! - timer fires: `is_loading` set, resolver called in a detached task
//! - resolver returns: published if not superseded, dropped otherwise
//!
//! An in-flight chain call is never aborted; only its result is discarded.

use alloy::primitives::Address;
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use super::resolver::{QuoteError, QuoteResolver};
use crate::common::{ChainClientRef, QuoterConfig};
use crate::utils::{SwapQuoteRequest, SwapQuoteResult, is_idle_amount};

/// What the caller sees
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EstimateState {
    /// Latest settled, non-superseded result. `None` while idle or before the
    /// first result.
    pub estimate: Option<SwapQuoteResult>,
    pub is_loading: bool,
}

/// Identifies one scheduling event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestGeneration(u64);

impl RequestGeneration {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Shared between the controller and its timer/resolution tasks
struct Shared {
    generation: AtomicU64,
    state: watch::Sender<EstimateState>,
}

impl Shared {
    fn is_current(&self, generation: RequestGeneration) -> bool {
        self.generation.load(Ordering::SeqCst) == generation.0
    }

    /// Mark a generation as resolving. Returns `false` if it was superseded.
    fn begin_loading(&self, generation: RequestGeneration) -> bool {
        let mut current = false;
        self.state.send_if_modified(|state| {
            current = self.is_current(generation);
            if current && !state.is_loading {
                state.is_loading = true;
                return true;
            }
            false
        });
        current
    }

    /// Publish a result. Returns `false` (and drops it) if superseded.
    fn settle(&self, generation: RequestGeneration, result: SwapQuoteResult) -> bool {
        let mut published = false;
        self.state.send_if_modified(|state| {
            if !self.is_current(generation) {
                return false;
            }
            *state = EstimateState { estimate: Some(result), is_loading: false };
            published = true;
            true
        });
        published
    }
}

pub struct EstimateController {
    resolver: Arc<QuoteResolver>,
    debounce: Duration,
    shared: Arc<Shared>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl EstimateController {
    pub fn new(resolver: Arc<QuoteResolver>, debounce: Duration) -> Self {
        let (state, _) = watch::channel(EstimateState::default());
        Self {
            resolver,
            debounce,
            shared: Arc::new(Shared { generation: AtomicU64::new(0), state }),
            pending: Mutex::new(None),
        }
    }

    pub fn from_config(client: ChainClientRef, config: &QuoterConfig) -> Self {
        Self::new(Arc::new(QuoteResolver::new(client, config)), config.debounce())
    }

    /// Feed the latest input triple.
    ///
    /// Returns the state right after the edit: cleared for idle input,
    /// unchanged otherwise (the new quote lands later via [`subscribe`](Self::subscribe)).
    /// Outside a tokio runtime nothing is scheduled and the state is returned as is.
    pub fn observe(&self, token_in: &str, token_out: &str, amount_in: &str) -> EstimateState {
        if token_in.trim().is_empty() || token_out.trim().is_empty() || is_idle_amount(amount_in) {
            self.clear();
            return self.current();
        }

        let Ok(runtime) = Handle::try_current() else {
            error!(amount_in, "no tokio runtime, estimate not scheduled");
            return self.current();
        };

        let generation = self.next_generation();
        let request = parse_request(token_in, token_out, amount_in);
        debug!(generation = generation.value(), amount_in, "scheduling estimate");

        let task = runtime.spawn(run_cycle(
            self.resolver.clone(),
            self.shared.clone(),
            generation,
            request,
            self.debounce,
        ));
        if let Some(previous) = self.pending.lock().replace(task) {
            previous.abort();
        }

        self.current()
    }

    /// Cancel anything pending and clear the published estimate.
    pub fn clear(&self) {
        if let Some(previous) = self.pending.lock().take() {
            previous.abort();
        }
        let shared = &self.shared;
        // Bump under the channel lock so a racing settle cannot land after the reset
        shared.state.send_modify(|state| {
            shared.generation.fetch_add(1, Ordering::SeqCst);
            *state = EstimateState::default();
        });
        debug!("estimate cleared");
    }

    pub fn current(&self) -> EstimateState {
        EstimateState::clone(&self.shared.state.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<EstimateState> {
        self.shared.state.subscribe()
    }

    pub fn generation(&self) -> RequestGeneration {
        RequestGeneration(self.shared.generation.load(Ordering::SeqCst))
    }

    fn next_generation(&self) -> RequestGeneration {
        RequestGeneration(self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

impl Drop for EstimateController {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.lock().take() {
            pending.abort();
        }
    }
}

fn parse_request(
    token_in: &str,
    token_out: &str,
    amount_in: &str,
) -> Result<SwapQuoteRequest, QuoteError> {
    let parse = |token: &str| {
        let token = token.trim();
        token.parse::<Address>().map_err(|_| QuoteError::InvalidToken(token.to_string()))
    };
    Ok(SwapQuoteRequest::new(parse(token_in)?, parse(token_out)?, amount_in))
}

async fn run_cycle(
    resolver: Arc<QuoteResolver>,
    shared: Arc<Shared>,
    generation: RequestGeneration,
    request: Result<SwapQuoteRequest, QuoteError>,
    debounce: Duration,
) {
    tokio::time::sleep(debounce).await;

    if !shared.begin_loading(generation) {
        debug!(generation = generation.value(), "estimate superseded before firing");
        return;
    }

    // Detached so that aborting the timer handle never cancels a chain call
    tokio::spawn(async move {
        let result = match request {
            Ok(request) => resolver.resolve(&request).await,
            Err(e) => SwapQuoteResult::failure(e.to_string()),
        };
        if !shared.settle(generation, result) {
            debug!(generation = generation.value(), "discarding superseded estimate");
        }
    });
}
