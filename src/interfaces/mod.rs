//! Outer surfaces: the interactive terminal checkout.

pub mod command;
pub mod terminal;
