//! Subcommand implementations, one module per resource.

pub mod account;
pub mod categories;
pub mod events;
