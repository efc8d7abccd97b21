//! Shared types for the orgchart workspace
//!
//! Common types used by both the directory server and the client:
//! the employee data model, the RPC request envelope, wire-level
//! error types and the pure hierarchy builder.

pub mod error;
pub mod hierarchy;
pub mod models;
pub mod request;

// Re-exports
pub use error::{ApiError, ApiResult, ErrorBody, ErrorCode};
pub use hierarchy::{DisplayNode, ExpansionState, OrgForest, OrgNode};
pub use models::*;
pub use request::{ApiRequest, Operation};
