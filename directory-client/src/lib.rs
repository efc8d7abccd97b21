//! Directory Client
//!
//! The session-side half of the employee directory: a transport
//! abstraction over the RPC endpoint ([`api::DirectoryApi`]) and the
//! authoritative in-memory [`store::DirectoryStore`] that validates
//! mutations locally, submits them, and reconciles the snapshot with
//! the server's response.

pub mod api;
pub mod store;

// Re-exports
pub use api::{ApiClientError, ApiClientResult, DirectoryApi, InProcessApi, NetworkApi};
pub use store::{
    DirectoryStore, FieldErrors, MutationOutcome, MutationState, StoreError, StoreResult,
};
