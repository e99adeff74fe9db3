use super::client::CheckError;
use crate::types::HealthReport;

/// Observable state of the dashboard.
///
/// Values are never mutated in place; each transition produces the next state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CheckState {
    #[default]
    Idle,
    /// A check is in flight. The last report stays visible until it resolves.
    Loading { previous: Option<HealthReport> },
    Success(HealthReport),
    Failure(CheckError),
}

impl CheckState {
    pub fn is_loading(&self) -> bool {
        matches!(self, CheckState::Loading { .. })
    }

    pub fn report(&self) -> Option<&HealthReport> {
        match self {
            CheckState::Success(report) => Some(report),
            CheckState::Loading { previous } => previous.as_ref(),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&CheckError> {
        match self {
            CheckState::Failure(err) => Some(err),
            _ => None,
        }
    }

    /// Enter the loading state, clearing any error. `None` while already loading.
    pub fn begin(&self) -> Option<CheckState> {
        match self {
            CheckState::Loading { .. } => None,
            CheckState::Success(report) => Some(CheckState::Loading {
                previous: Some(report.clone()),
            }),
            CheckState::Idle | CheckState::Failure(_) => Some(CheckState::Loading { previous: None }),
        }
    }

    /// Settle an in-flight check. The outcome replaces whatever was shown before.
    pub fn resolve(self, outcome: Result<HealthReport, CheckError>) -> CheckState {
        match outcome {
            Ok(report) => CheckState::Success(report),
            Err(err) => CheckState::Failure(err),
        }
    }
}
