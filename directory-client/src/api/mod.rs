//! Transport to the directory server
//!
//! [`DirectoryApi`] is the persistence collaborator seen from the
//! store: seven operations, each one POST round trip. Two
//! implementations exist: [`NetworkApi`] over HTTP, and
//! [`InProcessApi`] driving an `axum::Router` directly, which tests
//! and embedded setups use to skip the socket.

mod in_process;
mod network;

pub use in_process::InProcessApi;
pub use network::NetworkApi;

use async_trait::async_trait;
use shared::error::ApiError;
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate, ManagerSummary, Role};
use thiserror::Error;

/// Transport-level failure
#[derive(Debug, Error)]
pub enum ApiClientError {
    /// The server answered with a structured error body
    #[error("{0}")]
    Api(#[from] ApiError),
    /// The request never completed (connect, timeout, transport)
    #[error("network error: {0}")]
    Network(String),
    /// The response body was not what the operation promises
    #[error("invalid response: {0}")]
    Decode(String),
}

pub type ApiClientResult<T> = Result<T, ApiClientError>;

/// The persistence collaborator contract, one method per wire operation
#[async_trait]
pub trait DirectoryApi: Send + Sync {
    async fn get_employees(&self) -> ApiClientResult<Vec<Employee>>;

    async fn get_roles(&self) -> ApiClientResult<Vec<Role>>;

    async fn get_reporting_line_managers(&self) -> ApiClientResult<Vec<ManagerSummary>>;

    async fn check_email_exists(&self, email: &str) -> ApiClientResult<bool>;

    async fn create_employee(&self, draft: &EmployeeCreate) -> ApiClientResult<Employee>;

    async fn update_employee(
        &self,
        id: &str,
        changes: &EmployeeUpdate,
    ) -> ApiClientResult<Employee>;

    /// Returns the deleted record
    async fn delete_employee(&self, id: &str) -> ApiClientResult<Employee>;
}

/// Serialize a payload struct into the envelope's `payload` value
pub(crate) fn to_payload<T: serde::Serialize>(value: &T) -> ApiClientResult<serde_json::Value> {
    serde_json::to_value(value).map_err(|e| ApiClientError::Decode(e.to_string()))
}

/// `updateEmployee` carries the target id inline with the changes
pub(crate) fn update_payload(
    id: &str,
    changes: &EmployeeUpdate,
) -> ApiClientResult<serde_json::Value> {
    let mut payload = to_payload(changes)?;
    match payload.as_object_mut() {
        Some(map) => {
            map.insert("id".to_string(), serde_json::Value::String(id.to_string()));
            Ok(payload)
        }
        None => Err(ApiClientError::Decode(
            "update payload must be an object".to_string(),
        )),
    }
}
