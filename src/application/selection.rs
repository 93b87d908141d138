use super::tracking::Tracker;
use crate::domain::method::MethodId;
use crate::domain::ports::CheckoutViewRef;
use crate::domain::state::{ConfirmControl, StateHandle};
use crate::error::{CheckoutError, Result};
use std::time::Duration;

/// Tracks the chosen payment method and keeps the confirm control in sync with it.
#[derive(Clone)]
pub struct SelectionController {
    state: StateHandle,
    view: CheckoutViewRef,
    tracker: Tracker,
    scroll_delay: Duration,
}

impl SelectionController {
    pub fn new(
        state: StateHandle,
        view: CheckoutViewRef,
        tracker: Tracker,
        scroll_delay: Duration,
    ) -> Self {
        Self {
            state,
            view,
            tracker,
            scroll_delay,
        }
    }

    /// Makes `method` the sole selected option and recomputes the confirm control.
    ///
    /// Ids the rendering layer does not expose are rejected without touching state.
    pub async fn select(&self, method: MethodId) -> Result<()> {
        if !self.view.payment_options().contains(&method) {
            tracing::warn!(%method, "selection of unknown payment method ignored");
            return Err(CheckoutError::UnknownMethod(method.to_string()));
        }

        let control = self
            .state
            .update(|s| {
                s.selected_method = Some(method.clone());
                s.confirm_control()
            })
            .await;

        self.view.mark_selected(&method);
        self.view.set_confirm_control(control);
        self.tracker.method_selected(&method);
        tracing::debug!(%method, enabled = control.enabled, "payment method selected");

        self.schedule_scroll(method);
        Ok(())
    }

    /// Re-renders the confirm control from the current state.
    pub async fn refresh(&self) -> ConfirmControl {
        let control = self.state.snapshot().await.confirm_control();
        self.view.set_confirm_control(control);
        control
    }

    fn schedule_scroll(&self, method: MethodId) {
        let view = self.view.clone();
        let delay = self.scroll_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            view.scroll_into_view(&method);
        });
    }
}
