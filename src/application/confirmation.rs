use super::modal::ModalManager;
use super::tracking::Tracker;
use crate::domain::events::Severity;
use crate::domain::method::MethodId;
use crate::domain::ports::{CheckoutViewRef, NotifierRef, PaymentBackendRef};
use crate::domain::state::{ConfirmControl, FlowPhase, StateHandle};
use crate::error::{CheckoutError, Result};
use std::time::Duration;

pub const NO_SELECTION_MESSAGE: &str = "Select a payment method first.";
pub const SUBMISSION_FAILED_MESSAGE: &str = "Failed to process the request. Please try again.";

/// Result of a confirm request that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// The submission succeeded and the result modal is open.
    ModalShown,
    /// A confirmation was already in flight (or its modal still open); nothing happened.
    AlreadyProcessing,
}

enum Start {
    NoSelection,
    Submit(MethodId, ConfirmControl),
}

/// Drives `Idle -> Validating -> Processing -> {Succeeded | Failed}`.
#[derive(Clone)]
pub struct ConfirmationFlow {
    state: StateHandle,
    view: CheckoutViewRef,
    notifier: NotifierRef,
    backend: PaymentBackendRef,
    modal: ModalManager,
    tracker: Tracker,
    submit_timeout: Duration,
}

impl ConfirmationFlow {
    pub fn new(
        state: StateHandle,
        view: CheckoutViewRef,
        notifier: NotifierRef,
        backend: PaymentBackendRef,
        modal: ModalManager,
        tracker: Tracker,
        submit_timeout: Duration,
    ) -> Self {
        Self {
            state,
            view,
            notifier,
            backend,
            modal,
            tracker,
            submit_timeout,
        }
    }

    /// Handles a confirm request.
    ///
    /// `NoSelection` and `SubmissionFailure` are reported to the notifier before being
    /// returned; the caller only needs them for logging.
    pub async fn confirm(&self) -> Result<ConfirmOutcome> {
        let claimed = self
            .state
            .update(|s| {
                if s.is_processing || s.phase == FlowPhase::Validating {
                    return false;
                }
                s.phase = FlowPhase::Validating;
                true
            })
            .await;
        if !claimed {
            tracing::debug!("confirm ignored, a confirmation is already in flight");
            return Ok(ConfirmOutcome::AlreadyProcessing);
        }

        let start = self
            .state
            .update(|s| match s.selected_method.clone() {
                None => {
                    s.phase = FlowPhase::Failed;
                    Start::NoSelection
                }
                Some(method) => {
                    s.is_processing = true;
                    s.phase = FlowPhase::Processing;
                    Start::Submit(method, s.confirm_control())
                }
            })
            .await;

        let (method, control) = match start {
            Start::NoSelection => {
                self.tracker.confirmation_attempted(None);
                tracing::warn!("confirm requested without a payment method");
                self.notifier.notify(NO_SELECTION_MESSAGE, Severity::Error);
                self.settle_failure().await;
                return Err(CheckoutError::NoSelection);
            }
            Start::Submit(method, control) => (method, control),
        };

        self.tracker.confirmation_attempted(Some(&method));
        self.view.set_confirm_control(control);
        tracing::info!(%method, "submitting payment request");

        match self.submit(&method).await {
            Ok(()) => {
                self.state.update(|s| s.phase = FlowPhase::Succeeded).await;
                self.modal.show();
                self.tracker.modal_shown(&method);
                tracing::info!(%method, "payment request accepted");
                Ok(ConfirmOutcome::ModalShown)
            }
            Err(err) => {
                let control = self
                    .state
                    .update(|s| {
                        s.is_processing = false;
                        s.phase = FlowPhase::Failed;
                        s.confirm_control()
                    })
                    .await;
                self.view.set_confirm_control(control);
                tracing::warn!(%method, error = %err, "payment request failed");
                self.notifier.notify(SUBMISSION_FAILED_MESSAGE, Severity::Error);
                self.settle_failure().await;
                Err(err)
            }
        }
    }

    /// `Failed -> Idle`, once the failure has been reported.
    async fn settle_failure(&self) {
        self.state
            .update(|s| {
                if s.phase == FlowPhase::Failed {
                    s.phase = FlowPhase::Idle;
                }
            })
            .await;
    }

    async fn submit(&self, method: &MethodId) -> Result<()> {
        match tokio::time::timeout(self.submit_timeout, self.backend.submit(method)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err @ CheckoutError::SubmissionFailure(_))) => Err(err),
            Ok(Err(other)) => Err(CheckoutError::SubmissionFailure(other.to_string())),
            Err(_) => Err(CheckoutError::SubmissionFailure(format!(
                "timed out after {} ms",
                self.submit_timeout.as_millis()
            ))),
        }
    }
}
