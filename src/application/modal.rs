use crate::domain::events::ModalTrigger;
use crate::domain::ports::CheckoutViewRef;
use crate::domain::state::{FlowPhase, StateHandle};

pub const ESCAPE_KEY: &str = "Escape";

/// Shows and hides the result modal.
///
/// `hide` is the only way back to `Idle` after a successful confirmation.
#[derive(Clone)]
pub struct ModalManager {
    state: StateHandle,
    view: CheckoutViewRef,
}

impl ModalManager {
    pub fn new(state: StateHandle, view: CheckoutViewRef) -> Self {
        Self { state, view }
    }

    pub fn show(&self) {
        self.view.set_modal_visible(true);
        self.view.set_background_scroll_locked(true);
        self.view.focus_modal();
        tracing::debug!("result modal shown");
    }

    /// Hides the modal, restores background scroll and releases the processing flag.
    ///
    /// While a confirmation is still in flight only the view is reset; the processing
    /// flag stays set until the submission settles.
    pub async fn hide(&self) {
        self.view.set_modal_visible(false);
        self.view.set_background_scroll_locked(false);

        let control = self
            .state
            .update(|s| {
                if matches!(s.phase, FlowPhase::Validating | FlowPhase::Processing) {
                    return None;
                }
                s.is_processing = false;
                s.phase = FlowPhase::Idle;
                Some(s.confirm_control())
            })
            .await;

        match control {
            Some(control) => {
                self.view.set_confirm_control(control);
                tracing::debug!(enabled = control.enabled, "result modal hidden");
            }
            None => tracing::debug!("modal close ignored while submission is in flight"),
        }
    }

    /// Routes a user interaction to `hide` when it is a close gesture.
    ///
    /// Returns whether the modal was hidden.
    pub async fn handle(&self, trigger: ModalTrigger) -> bool {
        let closes = match &trigger {
            ModalTrigger::CloseButton => true,
            ModalTrigger::Backdrop => self.view.is_modal_visible(),
            ModalTrigger::ContentClick => false,
            ModalTrigger::Key(key) => key == ESCAPE_KEY && self.view.is_modal_visible(),
        };

        if closes {
            self.hide().await;
        }
        closes
    }

    pub fn is_visible(&self) -> bool {
        self.view.is_modal_visible()
    }
}
