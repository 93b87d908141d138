#![allow(dead_code)]

use checkout_flow::application::checkout::{Checkout, Collaborators};
use checkout_flow::config::Config;
use checkout_flow::domain::ports::{PaymentBackendRef, SecureClipboardRef};
use checkout_flow::infrastructure::in_memory::{
    InMemoryClipboard, InMemoryDocument, RecordingAnalytics, RecordingNotifier, RecordingView,
};
use checkout_flow::infrastructure::simulated::SimulatedBackend;
use std::sync::Arc;

pub const METHODS: [&str; 3] = ["mobile_wallet", "e_wallet", "bank_transfer"];

/// A checkout wired entirely to in-memory adapters.
pub struct Harness {
    pub checkout: Checkout,
    pub view: Arc<RecordingView>,
    pub notifier: Arc<RecordingNotifier>,
    pub analytics: Arc<RecordingAnalytics>,
    pub backend: Arc<SimulatedBackend>,
    pub document: Arc<InMemoryDocument>,
}

pub struct HarnessBuilder {
    config: Config,
    failing: bool,
    clipboard: Option<Arc<InMemoryClipboard>>,
    document: InMemoryDocument,
}

impl HarnessBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
            failing: false,
            clipboard: None,
            document: InMemoryDocument::new(),
        }
    }

    pub fn failing_backend(mut self) -> Self {
        self.failing = true;
        self
    }

    pub fn clipboard(mut self, clipboard: Arc<InMemoryClipboard>) -> Self {
        self.clipboard = Some(clipboard);
        self
    }

    pub fn document(mut self, document: InMemoryDocument) -> Self {
        self.document = document;
        self
    }

    pub fn build(self) -> Harness {
        let delay = self.config.timings.processing_delay();
        let backend = Arc::new(if self.failing {
            SimulatedBackend::failing(delay)
        } else {
            SimulatedBackend::new(delay)
        });
        let view = Arc::new(RecordingView::new(
            self.config.options.iter().map(|o| o.id.clone()),
        ));
        let notifier = Arc::new(RecordingNotifier::new());
        let analytics = Arc::new(RecordingAnalytics::new());
        let document = Arc::new(self.document);
        let backend_ref: PaymentBackendRef = backend.clone();

        let deps = Collaborators {
            view: view.clone(),
            notifier: notifier.clone(),
            analytics: analytics.clone(),
            backend: backend_ref,
            secure_clipboard: self.clipboard.map(|c| c as SecureClipboardRef),
            scratch: document.clone(),
        };

        Harness {
            checkout: Checkout::new(self.config, deps),
            view,
            notifier,
            analytics,
            backend,
            document,
        }
    }
}

pub async fn started() -> Harness {
    let harness = HarnessBuilder::new().build();
    harness.checkout.start().await.unwrap();
    harness
}
