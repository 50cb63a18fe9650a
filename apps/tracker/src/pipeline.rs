//! Pipeline runner: an ordered sequence of remote calls where every step is
//! awaited before the next starts and a failed step is reported, never
//! propagated. Later steps always get their turn.

use std::future::Future;

use serde::Serialize;
use tracing::{info, warn};

use crate::notify::Toast;
use crate::platform::PlatformError;

pub const ERROR_SEARCHING: &str = "Error while searching for jobs";
pub const ERROR_UPSERTING: &str = "Error while upserting records";
pub const ERROR_DELETING: &str = "Error while deleting records";
pub const ERROR_REFRESHING: &str = "Error while refreshing records";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    pub step: &'static str,
    pub ok: bool,
}

/// What one handler invocation did: the steps it attempted and the toasts it raised.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
    /// True when local validation stopped the pipeline before any remote call.
    pub rejected: bool,
    pub steps: Vec<StepOutcome>,
    pub toasts: Vec<Toast>,
}

impl PipelineReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A pipeline stopped by local validation.
    pub fn rejected(toast: Toast) -> Self {
        warn!("Pipeline rejected: {}", toast.title);
        Self {
            rejected: true,
            steps: Vec::new(),
            toasts: vec![toast],
        }
    }

    pub fn notify(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    /// Runs one step in isolation. On failure the error is logged and turned
    /// into an error toast titled `error_title`; the caller gets `None` and
    /// carries on with the next step.
    pub async fn step<T, F>(&mut self, step: &'static str, error_title: &str, fut: F) -> Option<T>
    where
        F: Future<Output = Result<T, PlatformError>>,
    {
        match fut.await {
            Ok(value) => {
                info!(step = step, "Pipeline step succeeded");
                self.steps.push(StepOutcome { step, ok: true });
                Some(value)
            }
            Err(e) => {
                warn!(step = step, "Pipeline step failed: {e}");
                self.steps.push(StepOutcome { step, ok: false });
                self.toasts.push(Toast::error(error_title, e.message()));
                None
            }
        }
    }
}

#[cfg(test)]
impl PipelineReport {
    /// Outcome of the named step, `None` if it never ran.
    pub fn step_ok(&self, step: &str) -> Option<bool> {
        self.steps.iter().find(|s| s.step == step).map(|s| s.ok)
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|s| s.step).collect()
    }
}
