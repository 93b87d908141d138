use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a payment method (e.g. `mobile_wallet`, `bank_transfer`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodId(String);

impl MethodId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MethodId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A copyable line of the result modal, such as a payment reference or an account number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetail {
    /// Key used by the rendering layer to address the field's copy affordance.
    pub field: String,
    pub label: String,
    pub value: String,
}

/// A selectable payment option region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentOption {
    pub id: MethodId,
    pub label: String,
    #[serde(default)]
    pub details: Vec<PaymentDetail>,
}

impl PaymentOption {
    pub fn detail(&self, field: &str) -> Option<&PaymentDetail> {
        self.details.iter().find(|d| d.field == field)
    }
}
