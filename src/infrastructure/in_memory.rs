use crate::domain::events::{AnalyticsEvent, Element, Severity};
use crate::domain::method::MethodId;
use crate::domain::ports::{
    AnalyticsSink, CheckoutView, Notifier, ScratchId, ScratchSurface, SecureClipboard,
};
use crate::domain::state::ConfirmControl;
use crate::error::{CheckoutError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Debug, Default)]
struct ViewState {
    active: Vec<MethodId>,
    control: Option<ConfirmControl>,
    modal_visible: bool,
    scroll_locked: bool,
    modal_focused: bool,
    scrolled: Vec<MethodId>,
    copy_feedback: HashMap<String, bool>,
}

/// A rendering layer that records everything the core asks of it.
///
/// Useful for headless runs and tests; it has no visual output.
#[derive(Debug)]
pub struct RecordingView {
    options: Vec<MethodId>,
    missing: Vec<Element>,
    state: Mutex<ViewState>,
}

impl RecordingView {
    pub fn new<I, M>(options: I) -> Self
    where
        I: IntoIterator<Item = M>,
        M: Into<MethodId>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            missing: Vec::new(),
            state: Mutex::new(ViewState::default()),
        }
    }

    /// Simulates a page where `element` was never rendered.
    pub fn without(mut self, element: Element) -> Self {
        self.missing.push(element);
        self
    }

    /// Options currently marked active.
    pub fn active_options(&self) -> Vec<MethodId> {
        lock(&self.state).active.clone()
    }

    pub fn confirm_control(&self) -> Option<ConfirmControl> {
        lock(&self.state).control
    }

    pub fn is_background_scroll_locked(&self) -> bool {
        lock(&self.state).scroll_locked
    }

    pub fn is_modal_focused(&self) -> bool {
        lock(&self.state).modal_focused
    }

    pub fn scrolled_into_view(&self) -> Vec<MethodId> {
        lock(&self.state).scrolled.clone()
    }

    pub fn copy_feedback(&self, field: &str) -> bool {
        lock(&self.state)
            .copy_feedback
            .get(field)
            .copied()
            .unwrap_or(false)
    }
}

impl CheckoutView for RecordingView {
    fn payment_options(&self) -> Vec<MethodId> {
        self.options.clone()
    }

    fn has_element(&self, element: Element) -> bool {
        !self.missing.contains(&element)
    }

    fn mark_selected(&self, method: &MethodId) {
        let mut state = lock(&self.state);
        state.active.clear();
        state.active.push(method.clone());
    }

    fn set_confirm_control(&self, control: ConfirmControl) {
        lock(&self.state).control = Some(control);
    }

    fn set_modal_visible(&self, visible: bool) {
        let mut state = lock(&self.state);
        state.modal_visible = visible;
        if !visible {
            state.modal_focused = false;
        }
    }

    fn is_modal_visible(&self) -> bool {
        lock(&self.state).modal_visible
    }

    fn set_background_scroll_locked(&self, locked: bool) {
        lock(&self.state).scroll_locked = locked;
    }

    fn focus_modal(&self) {
        lock(&self.state).modal_focused = true;
    }

    fn scroll_into_view(&self, method: &MethodId) {
        lock(&self.state).scrolled.push(method.clone());
    }

    fn set_copy_feedback(&self, field: &str, copied: bool) {
        lock(&self.state)
            .copy_feedback
            .insert(field.to_string(), copied);
    }
}

/// Collects notifications instead of displaying them.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(String, Severity)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<(String, Severity)> {
        lock(&self.messages).clone()
    }

    pub fn count(&self, severity: Severity) -> usize {
        lock(&self.messages)
            .iter()
            .filter(|(_, s)| *s == severity)
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        lock(&self.messages).push((message.to_string(), severity));
    }
}

/// Collects analytics events in memory.
#[derive(Debug, Default)]
pub struct RecordingAnalytics {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl RecordingAnalytics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AnalyticsEvent> {
        lock(&self.events).clone()
    }

    pub fn names(&self) -> Vec<String> {
        lock(&self.events).iter().map(|e| e.name.clone()).collect()
    }
}

impl AnalyticsSink for RecordingAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        lock(&self.events).push(event);
    }
}

/// Secure clipboard backed by a string slot; can be told to reject writes.
#[derive(Debug, Default)]
pub struct InMemoryClipboard {
    contents: Mutex<Option<String>>,
    rejecting: bool,
}

impl InMemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose writes always fail, like a denied permission prompt.
    pub fn rejecting() -> Self {
        Self {
            contents: Mutex::new(None),
            rejecting: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        lock(&self.contents).clone()
    }
}

#[async_trait]
impl SecureClipboard for InMemoryClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        if self.rejecting {
            return Err(CheckoutError::ClipboardFailure(
                "write permission denied".to_string(),
            ));
        }
        *lock(&self.contents) = Some(text.to_string());
        Ok(())
    }
}

/// An in-memory document hosting temporary off-screen elements.
#[derive(Debug, Default)]
pub struct InMemoryDocument {
    next_id: AtomicU64,
    attached: Mutex<HashMap<ScratchId, String>>,
    copied: Mutex<Option<String>>,
    fail_attach: bool,
    fail_copy: bool,
}

impl InMemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document whose copy command throws.
    pub fn failing_copy() -> Self {
        Self {
            fail_copy: true,
            ..Self::default()
        }
    }

    /// A document that refuses to create the temporary element.
    pub fn failing_attach() -> Self {
        Self {
            fail_attach: true,
            ..Self::default()
        }
    }

    pub fn copied(&self) -> Option<String> {
        lock(&self.copied).clone()
    }
}

impl ScratchSurface for InMemoryDocument {
    fn attach(&self, text: &str) -> Result<ScratchId> {
        if self.fail_attach {
            return Err(CheckoutError::ClipboardFailure(
                "cannot create temporary element".to_string(),
            ));
        }
        let id = ScratchId(self.next_id.fetch_add(1, Ordering::Relaxed));
        lock(&self.attached).insert(id, text.to_string());
        Ok(id)
    }

    fn copy_selection(&self, id: ScratchId) -> Result<()> {
        if self.fail_copy {
            return Err(CheckoutError::ClipboardFailure(
                "copy command failed".to_string(),
            ));
        }
        let text = lock(&self.attached).get(&id).cloned().ok_or_else(|| {
            CheckoutError::ClipboardFailure(format!("element {} is not attached", id.0))
        })?;
        *lock(&self.copied) = Some(text);
        Ok(())
    }

    fn detach(&self, id: ScratchId) {
        lock(&self.attached).remove(&id);
    }

    fn attached_count(&self) -> usize {
        lock(&self.attached).len()
    }
}
