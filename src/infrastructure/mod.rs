//! Adapters implementing the domain ports.

pub mod in_memory;
pub mod simulated;
#[cfg(feature = "system-clipboard")]
pub mod system_clipboard;
pub mod tracing_sink;
