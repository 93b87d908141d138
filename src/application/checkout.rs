use super::clipboard::{ClipboardCopier, CopyFeedback, CopyPath};
use super::confirmation::{ConfirmOutcome, ConfirmationFlow};
use super::modal::ModalManager;
use super::selection::SelectionController;
use super::tracking::Tracker;
use crate::config::Config;
use crate::domain::events::{Element, ModalTrigger, Severity};
use crate::domain::method::{MethodId, PaymentDetail};
use crate::domain::ports::{
    AnalyticsSinkRef, CheckoutViewRef, NotifierRef, PaymentBackendRef, ScratchSurfaceRef,
    SecureClipboardRef,
};
use crate::domain::state::{CheckoutState, StateHandle};
use crate::error::{CheckoutError, Result};

pub const STARTUP_FAILED_MESSAGE: &str = "Failed to load the page. Reload and try again.";

/// External collaborators the checkout is wired to.
pub struct Collaborators {
    pub view: CheckoutViewRef,
    pub notifier: NotifierRef,
    pub analytics: AnalyticsSinkRef,
    pub backend: PaymentBackendRef,
    pub secure_clipboard: Option<SecureClipboardRef>,
    pub scratch: ScratchSurfaceRef,
}

/// Owns the checkout record and the components operating on it.
///
/// Every user interaction enters through one of its methods.
pub struct Checkout {
    config: Config,
    state: StateHandle,
    view: CheckoutViewRef,
    notifier: NotifierRef,
    tracker: Tracker,
    selection: SelectionController,
    modal: ModalManager,
    confirmation: ConfirmationFlow,
    copy: CopyFeedback,
}

impl Checkout {
    pub fn new(config: Config, deps: Collaborators) -> Self {
        let state = StateHandle::new();
        let timings = config.timings.clone();
        let tracker = Tracker::new(deps.analytics, config.campaign.clone());

        let selection = SelectionController::new(
            state.clone(),
            deps.view.clone(),
            tracker.clone(),
            timings.scroll_delay(),
        );
        let modal = ModalManager::new(state.clone(), deps.view.clone());
        let confirmation = ConfirmationFlow::new(
            state.clone(),
            deps.view.clone(),
            deps.notifier.clone(),
            deps.backend,
            modal.clone(),
            tracker.clone(),
            timings.submit_timeout(),
        );
        let copy = CopyFeedback::new(
            ClipboardCopier::new(deps.secure_clipboard, deps.scratch),
            deps.view.clone(),
            deps.notifier.clone(),
            timings.feedback_duration(),
        );

        Self {
            config,
            state,
            view: deps.view,
            notifier: deps.notifier,
            tracker,
            selection,
            modal,
            confirmation,
            copy,
        }
    }

    /// Checks the rendering layer, renders the initial confirm control and emits `page_loaded`.
    pub async fn start(&self) -> Result<()> {
        let options = self.view.payment_options();
        let missing = if options.is_empty() {
            Some("payment options")
        } else if !self.view.has_element(Element::ConfirmControl) {
            Some("confirm control")
        } else if !self.view.has_element(Element::Modal) {
            Some("result modal")
        } else {
            None
        };

        if let Some(missing) = missing {
            tracing::error!(missing, "required page element not found");
            self.notifier.notify(STARTUP_FAILED_MESSAGE, Severity::Error);
            return Err(CheckoutError::Startup(format!("{missing} not found")));
        }

        self.selection.refresh().await;
        self.tracker.page_loaded();
        tracing::info!(options = options.len(), "checkout initialized");
        Ok(())
    }

    pub async fn select(&self, method: MethodId) -> Result<()> {
        self.selection.select(method).await
    }

    pub async fn confirm(&self) -> Result<ConfirmOutcome> {
        self.confirmation.confirm().await
    }

    pub async fn close_modal(&self) {
        self.modal.hide().await;
    }

    pub async fn modal_interaction(&self, trigger: ModalTrigger) -> bool {
        self.modal.handle(trigger).await
    }

    /// Copies the `field` detail of the selected payment method.
    pub async fn copy_detail(&self, field: &str) -> Result<CopyPath> {
        let detail = self.selected_detail(field).await?;
        self.copy.copy_field(&detail.field, &detail.value).await
    }

    pub fn visibility_changed(&self, hidden: bool) {
        self.tracker.visibility_changed(hidden);
    }

    pub async fn state(&self) -> CheckoutState {
        self.state.snapshot().await
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_modal_visible(&self) -> bool {
        self.modal.is_visible()
    }

    async fn selected_detail(&self, field: &str) -> Result<PaymentDetail> {
        let selected = self
            .state
            .snapshot()
            .await
            .selected_method
            .ok_or(CheckoutError::NoSelection)?;
        let option = self
            .config
            .option(&selected)
            .ok_or_else(|| CheckoutError::UnknownMethod(selected.to_string()))?;
        option.detail(field).cloned().ok_or_else(|| {
            CheckoutError::ClipboardFailure(format!("{selected} has no detail named {field}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::{
        InMemoryDocument, RecordingAnalytics, RecordingNotifier, RecordingView,
    };
    use crate::infrastructure::simulated::SimulatedBackend;
    use std::sync::Arc;
    use std::time::Duration;

    fn checkout(view: RecordingView) -> (Checkout, Arc<RecordingNotifier>, Arc<RecordingAnalytics>) {
        let notifier = Arc::new(RecordingNotifier::new());
        let analytics = Arc::new(RecordingAnalytics::new());
        let deps = Collaborators {
            view: Arc::new(view),
            notifier: notifier.clone(),
            analytics: analytics.clone(),
            backend: Arc::new(SimulatedBackend::new(Duration::from_millis(10))),
            secure_clipboard: None,
            scratch: Arc::new(InMemoryDocument::new()),
        };
        (Checkout::new(Config::default(), deps), notifier, analytics)
    }

    #[tokio::test]
    async fn test_start_emits_page_loaded() {
        let (checkout, notifier, analytics) =
            checkout(RecordingView::new(["mobile_wallet", "bank_transfer"]));

        checkout.start().await.unwrap();

        assert_eq!(analytics.names(), vec!["page_loaded"]);
        assert!(notifier.messages().is_empty());
    }

    #[tokio::test]
    async fn test_start_fails_without_modal() {
        let (checkout, notifier, analytics) =
            checkout(RecordingView::new(["mobile_wallet"]).without(Element::Modal));

        let err = checkout.start().await.unwrap_err();

        assert!(matches!(err, CheckoutError::Startup(ref m) if m == "result modal not found"));
        assert_eq!(
            notifier.messages(),
            vec![(STARTUP_FAILED_MESSAGE.to_string(), Severity::Error)]
        );
        assert!(analytics.names().is_empty());
    }

    #[tokio::test]
    async fn test_start_fails_without_options() {
        let (checkout, _, _) = checkout(RecordingView::new(Vec::<MethodId>::new()));
        assert!(checkout.start().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_detail_of_selected_method() {
        let (checkout, _, _) = checkout(RecordingView::new(["mobile_wallet", "bank_transfer"]));
        checkout.start().await.unwrap();

        assert!(matches!(
            checkout.copy_detail("account").await,
            Err(CheckoutError::NoSelection)
        ));

        checkout.select("bank_transfer".into()).await.unwrap();
        assert_eq!(
            checkout.copy_detail("account").await.unwrap(),
            CopyPath::Fallback
        );
        assert!(checkout.copy_detail("iban").await.is_err());
    }

    #[tokio::test]
    async fn test_visibility_events() {
        let (checkout, _, analytics) = checkout(RecordingView::new(["mobile_wallet"]));

        checkout.visibility_changed(true);
        checkout.visibility_changed(false);

        assert_eq!(analytics.names(), vec!["page_hidden", "page_visible"]);
    }
}
