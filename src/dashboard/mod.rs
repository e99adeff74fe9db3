//! Health dashboard: one action, `check_health`, and the state it drives.

pub mod client;
pub mod render;
pub mod state;

pub use client::{CheckError, ClientConfig, DEFAULT_BASE_URL, HealthClient, HttpHealthClient};
pub use render::{format_timestamp, format_uptime, render};
pub use state::CheckState;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::types::HealthReport;

/// Failure message shown when a check is abandoned before it resolves
pub const CANCELLED_MESSAGE: &str = "check cancelled";

/// Drives health checks against a `HealthClient` and publishes each state change.
pub struct Dashboard<C> {
    client: C,
    state: watch::Sender<CheckState>,
}

impl<C: HealthClient> Dashboard<C> {
    pub fn new(client: C) -> Self {
        let (state, _) = watch::channel(CheckState::Idle);
        Self { client, state }
    }

    /// Current state snapshot
    pub fn state(&self) -> CheckState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every transition
    pub fn subscribe(&self) -> watch::Receiver<CheckState> {
        self.state.subscribe()
    }

    /// Run one health check. Returns `false` without issuing a request when a
    /// check is already in flight.
    pub async fn check_health(&self) -> bool {
        let started = self.state.send_if_modified(|current| match current.begin() {
            Some(next) => {
                *current = next;
                true
            }
            None => false,
        });

        if !started {
            debug!("Health check already in flight, ignoring trigger");
            return false;
        }

        let pending = PendingCheck {
            state: &self.state,
            settled: false,
        };

        let outcome = self.client.fetch_health().await;
        match &outcome {
            Ok(report) => info!("Health check succeeded: {} ({})", report.status, report.environment),
            Err(err) => info!("Health check failed: {}", err),
        }

        pending.settle(outcome);
        true
    }
}

/// An in-flight check. Dropping it unsettled (cancelled future, panicking
/// client) resolves the state to a failure so the dashboard never stays loading.
struct PendingCheck<'a> {
    state: &'a watch::Sender<CheckState>,
    settled: bool,
}

impl PendingCheck<'_> {
    fn settle(mut self, outcome: Result<HealthReport, CheckError>) {
        self.settled = true;
        resolve(self.state, outcome);
    }
}

impl Drop for PendingCheck<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("Health check dropped before completing");
            resolve(self.state, Err(CheckError::Transport(CANCELLED_MESSAGE.to_string())));
        }
    }
}

fn resolve(state: &watch::Sender<CheckState>, outcome: Result<HealthReport, CheckError>) {
    state.send_modify(|current| {
        let previous = std::mem::take(current);
        *current = previous.resolve(outcome);
    });
}
