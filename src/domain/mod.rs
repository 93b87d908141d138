//! Domain layer: the checkout record, its identifiers and events, and the ports
//! through which the core reaches every external collaborator.

pub mod events;
pub mod method;
pub mod ports;
pub mod state;
