use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => f.write_str("info"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// Elements the core requires from the rendering layer besides the option list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    ConfirmControl,
    Modal,
}

/// User interactions that may close the result modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalTrigger {
    CloseButton,
    /// Click on the overlay, outside the modal content.
    Backdrop,
    /// Click inside the modal content.
    ContentClick,
    Key(String),
}

pub const EVENT_PAGE_LOADED: &str = "page_loaded";
pub const EVENT_METHOD_SELECTED: &str = "payment_method_selected";
pub const EVENT_CONFIRMATION_ATTEMPTED: &str = "confirmation_attempted";
pub const EVENT_MODAL_SHOWN: &str = "payment_pending_modal_shown";
pub const EVENT_PAGE_HIDDEN: &str = "page_hidden";
pub const EVENT_PAGE_VISIBLE: &str = "page_visible";

/// A fire-and-forget analytics event with a free-form payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsEvent {
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub data: Value,
}

impl AnalyticsEvent {
    pub fn new(name: impl Into<String>, data: Value) -> Self {
        Self {
            name: name.into(),
            timestamp: Utc::now(),
            data,
        }
    }
}
