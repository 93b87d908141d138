//! Application layer: the checkout components and the `Checkout` root that wires them.
//!
//! All components share one [`StateHandle`](crate::domain::state::StateHandle); only
//! `SelectionController`, `ConfirmationFlow` and `ModalManager` write to it.

pub mod checkout;
pub mod clipboard;
pub mod confirmation;
pub mod modal;
pub mod selection;
pub mod tracking;
