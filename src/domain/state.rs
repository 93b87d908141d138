use super::method::MethodId;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Phase of the confirmation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowPhase {
    #[default]
    Idle,
    /// A confirm request has been claimed and is checking the selection.
    Validating,
    Processing,
    /// The result modal is open; left only through `ModalManager::hide`.
    Succeeded,
    /// The failure is being reported; settles back to `Idle`.
    Failed,
}

/// The single mutable record shared by the checkout components.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CheckoutState {
    pub selected_method: Option<MethodId>,
    pub is_processing: bool,
    pub phase: FlowPhase,
}

impl CheckoutState {
    /// Confirm is actionable only with a selection and no confirmation in flight.
    pub fn can_confirm(&self) -> bool {
        self.selected_method.is_some() && !self.is_processing
    }

    pub fn confirm_control(&self) -> ConfirmControl {
        ConfirmControl::derive(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmLabel {
    SelectMethod,
    Confirm,
    Processing,
}

impl fmt::Display for ConfirmLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ConfirmLabel::SelectMethod => "Select a payment method",
            ConfirmLabel::Confirm => "Confirm withdrawal",
            ConfirmLabel::Processing => "Processing...",
        };
        f.write_str(text)
    }
}

/// Enabled flag and label of the confirm control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmControl {
    pub enabled: bool,
    pub label: ConfirmLabel,
}

impl ConfirmControl {
    /// Pure derivation from the data model. Processing wins over selection.
    pub fn derive(state: &CheckoutState) -> Self {
        match (&state.selected_method, state.is_processing) {
            (_, true) => Self {
                enabled: false,
                label: ConfirmLabel::Processing,
            },
            (Some(_), false) => Self {
                enabled: true,
                label: ConfirmLabel::Confirm,
            },
            (None, false) => Self {
                enabled: false,
                label: ConfirmLabel::SelectMethod,
            },
        }
    }
}

/// Shared handle to the checkout record.
///
/// Cloning shares the underlying record. The lock is never held across an `.await`
/// on a collaborator, so transitions stay short critical sections.
#[derive(Debug, Clone, Default)]
pub struct StateHandle {
    inner: Arc<RwLock<CheckoutState>>,
}

impl StateHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> CheckoutState {
        self.inner.read().await.clone()
    }

    /// Non-blocking read; `None` while a transition holds the lock.
    pub fn try_snapshot(&self) -> Option<CheckoutState> {
        self.inner.try_read().ok().map(|state| state.clone())
    }

    /// Applies `f` under the write lock and returns its result.
    pub async fn update<T>(&self, f: impl FnOnce(&mut CheckoutState) -> T) -> T {
        let mut state = self.inner.write().await;
        f(&mut state)
    }
}
