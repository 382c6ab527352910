//! Simulated checkout.
//!
//! There is no payment step. A started checkout waits out a processing
//! delay, runs its completion callback (which clears the cart), shows the
//! success state for a redirect delay and then returns to idle.
//!
//! ```text
//! idle --start--> processing --(processing delay)--> succeeded --(redirect delay)--> idle
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::TimingConfig;

/// Where the success view sends the shopper.
pub const REDIRECT_TARGET: &str = "/";

/// Errors starting a checkout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// There is nothing to check out.
    #[error("Cart is empty")]
    EmptyCart,

    /// A checkout is still in its processing delay.
    #[error("Checkout already in progress")]
    AlreadyProcessing,
}

/// Checkout progress as shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckoutStatus {
    /// No checkout is running.
    Idle,
    /// Waiting out the processing delay.
    Processing,
    /// The order went through; the view should send the shopper to
    /// `redirect_to` once the redirect delay ends.
    Succeeded { redirect_to: String },
}

#[derive(Debug)]
struct FlowState {
    status: CheckoutStatus,
    /// Bumped by every accepted start. A task only writes while its run is
    /// still the latest.
    run: u64,
}

/// The checkout state machine.
///
/// Cheap to clone; clones share state.
#[derive(Debug, Clone)]
pub struct CheckoutFlow {
    state: Arc<Mutex<FlowState>>,
    timing: TimingConfig,
}

impl CheckoutFlow {
    /// Create an idle flow using the checkout delays from `timing`.
    #[must_use]
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            state: Arc::new(Mutex::new(FlowState {
                status: CheckoutStatus::Idle,
                run: 0,
            })),
            timing,
        }
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> CheckoutStatus {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .status
            .clone()
    }

    /// Begin a checkout.
    ///
    /// `on_complete` runs once, after the processing delay. The flow is not
    /// cancelled if the caller goes away. Starting again while a previous
    /// checkout shows its success state supersedes it: the older run no
    /// longer touches the status. Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::AlreadyProcessing`] while a checkout is still
    /// processing.
    pub fn start<F>(&self, on_complete: F) -> Result<(), CheckoutError>
    where
        F: FnOnce() + Send + 'static,
    {
        let run = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            if state.status == CheckoutStatus::Processing {
                return Err(CheckoutError::AlreadyProcessing);
            }
            state.status = CheckoutStatus::Processing;
            state.run = state.run.wrapping_add(1);
            state.run
        };

        info!(run, "Checkout started");

        let state = Arc::clone(&self.state);
        let timing = self.timing;
        tokio::spawn(async move {
            tokio::time::sleep(timing.checkout_processing).await;
            on_complete();
            set_if_current(
                &state,
                run,
                CheckoutStatus::Succeeded {
                    redirect_to: REDIRECT_TARGET.to_string(),
                },
            );
            info!(run, "Checkout succeeded");

            tokio::time::sleep(timing.checkout_redirect).await;
            if !set_if_current(&state, run, CheckoutStatus::Idle) {
                debug!(run, "Superseded checkout left status alone");
            }
        });

        Ok(())
    }
}

/// Write `next` only if `run` is still the latest run.
fn set_if_current(state: &Mutex<FlowState>, run: u64, next: CheckoutStatus) -> bool {
    let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
    if state.run != run {
        return false;
    }
    state.status = next;
    true
}
