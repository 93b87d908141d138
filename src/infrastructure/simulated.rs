use crate::domain::method::MethodId;
use crate::domain::ports::PaymentBackend;
use crate::error::{CheckoutError, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Placeholder backend: waits a fixed delay once per submission, then succeeds
/// (or fails, when built with [`SimulatedBackend::failing`]).
#[derive(Debug)]
pub struct SimulatedBackend {
    delay: Duration,
    fail: bool,
    submissions: AtomicUsize,
}

impl SimulatedBackend {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            fail: false,
            submissions: AtomicUsize::new(0),
        }
    }

    pub fn failing(delay: Duration) -> Self {
        Self {
            fail: true,
            ..Self::new(delay)
        }
    }

    /// Number of submissions received so far.
    pub fn submissions(&self) -> usize {
        self.submissions.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentBackend for SimulatedBackend {
    async fn submit(&self, method: &MethodId) -> Result<()> {
        self.submissions.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(%method, delay_ms = self.delay.as_millis() as u64, "simulating submission");
        tokio::time::sleep(self.delay).await;

        if self.fail {
            return Err(CheckoutError::SubmissionFailure(format!(
                "simulated rejection for {method}"
            )));
        }
        Ok(())
    }
}
