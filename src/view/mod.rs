//! View lifetimes.

pub mod scope;

pub use scope::ViewScope;
