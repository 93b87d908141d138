use crate::domain::method::{MethodId, PaymentDetail, PaymentOption};
use crate::error::{CheckoutError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

/// Delays and limits of the checkout flow, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Fixed wait of the simulated backend.
    pub processing_delay_ms: u64,
    pub submit_timeout_ms: u64,
    pub scroll_delay_ms: u64,
    /// How long the "copied" affordance stays on.
    pub feedback_duration_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            processing_delay_ms: 2000,
            submit_timeout_ms: 10_000,
            scroll_delay_ms: 300,
            feedback_duration_ms: 2000,
        }
    }
}

impl Timings {
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }

    pub fn submit_timeout(&self) -> Duration {
        Duration::from_millis(self.submit_timeout_ms)
    }

    pub fn scroll_delay(&self) -> Duration {
        Duration::from_millis(self.scroll_delay_ms)
    }

    pub fn feedback_duration(&self) -> Duration {
        Duration::from_millis(self.feedback_duration_ms)
    }
}

/// Static attributes attached to analytics payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Campaign {
    pub amount: Decimal,
    pub fee: Decimal,
    pub currency: String,
    pub institution: String,
    pub campaign: String,
}

impl Default for Campaign {
    fn default() -> Self {
        Self {
            amount: dec!(5000),
            fee: dec!(300),
            currency: "MZN".to_string(),
            institution: "Green World Foundation".to_string(),
            campaign: "Relief Fund".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub options: Vec<PaymentOption>,
    #[serde(default)]
    pub timings: Timings,
    #[serde(default)]
    pub campaign: Campaign,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            options: vec![
                option(
                    "mobile_wallet",
                    "Mobile wallet",
                    &[
                        ("reference", "Payment reference", "REF-84920"),
                        ("account", "Wallet number", "840000001"),
                    ],
                ),
                option(
                    "e_wallet",
                    "Electronic wallet",
                    &[
                        ("reference", "Payment reference", "REF-84921"),
                        ("account", "Wallet number", "870000002"),
                    ],
                ),
                option(
                    "bank_transfer",
                    "Bank transfer",
                    &[
                        ("reference", "Payment reference", "REF-84922"),
                        ("account", "Account number", "ACC-12345"),
                    ],
                ),
            ],
            timings: Timings::default(),
            campaign: Campaign::default(),
        }
    }
}

fn option(id: &str, label: &str, details: &[(&str, &str, &str)]) -> PaymentOption {
    PaymentOption {
        id: MethodId::new(id),
        label: label.to_string(),
        details: details
            .iter()
            .map(|(field, label, value)| PaymentDetail {
                field: field.to_string(),
                label: label.to_string(),
                value: value.to_string(),
            })
            .collect(),
    }
}

impl Config {
    /// Reads and validates a JSON configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.options.is_empty() {
            return Err(CheckoutError::Config(
                "at least one payment option is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for option in &self.options {
            if !seen.insert(option.id.as_str()) {
                return Err(CheckoutError::Config(format!(
                    "duplicate payment option id: {}",
                    option.id
                )));
            }
        }

        if self.timings.submit_timeout_ms == 0 {
            return Err(CheckoutError::Config(
                "submit_timeout_ms must be greater than zero".to_string(),
            ));
        }

        if self.timings.processing_delay_ms >= self.timings.submit_timeout_ms {
            return Err(CheckoutError::Config(format!(
                "processing_delay_ms ({}) must be less than submit_timeout_ms ({})",
                self.timings.processing_delay_ms, self.timings.submit_timeout_ms
            )));
        }

        Ok(())
    }

    pub fn option(&self, id: &MethodId) -> Option<&PaymentOption> {
        self.options.iter().find(|o| &o.id == id)
    }
}
