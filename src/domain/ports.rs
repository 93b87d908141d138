use super::events::{AnalyticsEvent, Element, Severity};
use super::method::MethodId;
use super::state::ConfirmControl;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// The rendering layer as seen by the checkout core.
///
/// Implementations own the actual widgets; the core only drives them through this
/// capability set.
pub trait CheckoutView: Send + Sync {
    fn payment_options(&self) -> Vec<MethodId>;
    fn has_element(&self, element: Element) -> bool;
    /// Marks `method` active and every other option inactive.
    fn mark_selected(&self, method: &MethodId);
    fn set_confirm_control(&self, control: ConfirmControl);
    fn set_modal_visible(&self, visible: bool);
    fn is_modal_visible(&self) -> bool;
    fn set_background_scroll_locked(&self, locked: bool);
    fn focus_modal(&self);
    /// Best-effort, cosmetic.
    fn scroll_into_view(&self, method: &MethodId);
    fn set_copy_feedback(&self, field: &str, copied: bool);
}

/// Fire-and-forget, auto-dismissing user notifications.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

pub trait AnalyticsSink: Send + Sync {
    fn track(&self, event: AnalyticsEvent);
}

#[async_trait]
pub trait PaymentBackend: Send + Sync {
    /// Submits the withdrawal request for `method`. Must complete or fail in finite time.
    async fn submit(&self, method: &MethodId) -> Result<()>;
}

/// Secure-context clipboard write, the preferred copy path.
#[async_trait]
pub trait SecureClipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<()>;
}

/// Identifier of a temporary element attached to a [`ScratchSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScratchId(pub u64);

/// Host for the off-screen editable element used by the fallback copy path.
pub trait ScratchSurface: Send + Sync {
    /// Creates an off-screen element holding `text` and selects its contents.
    fn attach(&self, text: &str) -> Result<ScratchId>;
    /// Copies the current selection of the element.
    fn copy_selection(&self, id: ScratchId) -> Result<()>;
    fn detach(&self, id: ScratchId);
    fn attached_count(&self) -> usize;
}

pub type CheckoutViewRef = Arc<dyn CheckoutView>;
pub type NotifierRef = Arc<dyn Notifier>;
pub type AnalyticsSinkRef = Arc<dyn AnalyticsSink>;
pub type PaymentBackendRef = Arc<dyn PaymentBackend>;
pub type SecureClipboardRef = Arc<dyn SecureClipboard>;
pub type ScratchSurfaceRef = Arc<dyn ScratchSurface>;
