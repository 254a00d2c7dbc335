//! HTTP handlers for the data routes.

pub mod dispatch;
pub use dispatch::*;
