//! Back-office report service.
//!
//! Maps report identifiers to aggregation handlers behind an admin-only gate,
//! derives the default reporting window, and hands results to a renderer.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::identity;
pub use modules::reports;
