//! Data models
//!
//! Shared between directory-server and directory-client (via API).
//! All IDs are server-assigned UUID strings; manager references are
//! keyed by employee id, never by role name.

pub mod employee;
pub mod role;

// Re-exports
pub use employee::*;
pub use role::*;
