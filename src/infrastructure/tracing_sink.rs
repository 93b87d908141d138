use crate::domain::events::AnalyticsEvent;
use crate::domain::ports::AnalyticsSink;

/// Analytics sink that emits each event as a structured `tracing` record.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnalytics;

impl AnalyticsSink for TracingAnalytics {
    fn track(&self, event: AnalyticsEvent) {
        tracing::info!(
            target: "checkout_flow::analytics",
            name = %event.name,
            timestamp = %event.timestamp.to_rfc3339(),
            data = %event.data,
            "analytics event"
        );
    }
}
