//! Checkout flow core: payment method selection, confirmation with a pluggable
//! payment backend, the result modal, and clipboard copy with fallback.
//!
//! Layers follow ports and adapters: `domain` holds the record and the capability
//! traits, `application` the components driving them, `infrastructure` and
//! `interfaces` the adapters.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
pub mod telemetry;
