use crate::config::Campaign;
use crate::domain::events::{
    AnalyticsEvent, EVENT_CONFIRMATION_ATTEMPTED, EVENT_METHOD_SELECTED, EVENT_MODAL_SHOWN,
    EVENT_PAGE_HIDDEN, EVENT_PAGE_LOADED, EVENT_PAGE_VISIBLE,
};
use crate::domain::method::MethodId;
use crate::domain::ports::AnalyticsSinkRef;
use serde_json::json;
use std::sync::Arc;

/// Builds checkout analytics events and hands them to the sink.
#[derive(Clone)]
pub struct Tracker {
    sink: AnalyticsSinkRef,
    campaign: Arc<Campaign>,
}

impl Tracker {
    pub fn new(sink: AnalyticsSinkRef, campaign: Campaign) -> Self {
        Self {
            sink,
            campaign: Arc::new(campaign),
        }
    }

    pub fn page_loaded(&self) {
        self.emit(
            EVENT_PAGE_LOADED,
            json!({
                "page_type": "checkout",
                "institution": self.campaign.institution,
                "campaign": self.campaign.campaign,
            }),
        );
    }

    pub fn method_selected(&self, method: &MethodId) {
        self.emit(
            EVENT_METHOD_SELECTED,
            json!({
                "method": method,
                "content_name": format!("Payment via {}", method.as_str().to_uppercase()),
                "content_category": "payment_method_selection",
                "value": self.campaign.fee,
                "currency": self.campaign.currency,
                "institution": self.campaign.institution,
                "campaign": self.campaign.campaign,
            }),
        );
    }

    pub fn confirmation_attempted(&self, method: Option<&MethodId>) {
        self.emit(
            EVENT_CONFIRMATION_ATTEMPTED,
            json!({
                "method": method,
                "content_category": "checkout_attempt",
                "value": self.campaign.amount,
                "fee": self.campaign.fee,
                "currency": self.campaign.currency,
                "num_items": 1,
                "institution": self.campaign.institution,
            }),
        );
    }

    pub fn modal_shown(&self, method: &MethodId) {
        self.emit(
            EVENT_MODAL_SHOWN,
            json!({ "method": method, "stage": "awaiting_payment" }),
        );
    }

    pub fn visibility_changed(&self, hidden: bool) {
        let name = if hidden {
            EVENT_PAGE_HIDDEN
        } else {
            EVENT_PAGE_VISIBLE
        };
        self.emit(name, json!({}));
    }

    fn emit(&self, name: &str, data: serde_json::Value) {
        self.sink.track(AnalyticsEvent::new(name, data));
    }
}
