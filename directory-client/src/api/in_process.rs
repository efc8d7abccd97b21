//! In-process transport
//!
//! Drives an `axum::Router` directly through `tower::ServiceExt`,
//! bypassing the network. Tests and embedded deployments hand the
//! directory server's router straight to the store.

use super::{ApiClientError, ApiClientResult, DirectoryApi};
use async_trait::async_trait;
use axum::body::Body;
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use shared::error::ErrorBody;
use shared::models::{EmailExists, Employee, EmployeeCreate, EmployeeUpdate, ManagerSummary, Role};
use shared::request::{ApiRequest, Operation};
use tower::ServiceExt;

#[derive(Clone)]
pub struct InProcessApi {
    router: axum::Router,
}

impl InProcessApi {
    pub fn new(router: axum::Router) -> Self {
        Self { router }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        op: Operation,
        payload: Option<Value>,
    ) -> ApiClientResult<T> {
        let envelope = ApiRequest { op, payload };
        let body = serde_json::to_vec(&envelope)
            .map_err(|e| ApiClientError::Decode(e.to_string()))?;

        let request = http::Request::builder()
            .method(http::Method::POST)
            .uri("/")
            .header("Content-Type", "application/json")
            .body(Body::from(body))
            .map_err(|e| ApiClientError::Network(e.to_string()))?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .map_err(|e| ApiClientError::Network(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .map_err(|e| ApiClientError::Network(e.to_string()))?
            .to_bytes();

        if status.is_success() {
            serde_json::from_slice(&bytes).map_err(|e| ApiClientError::Decode(e.to_string()))
        } else {
            let body: ErrorBody = serde_json::from_slice(&bytes)
                .map_err(|_| ApiClientError::Network(format!("HTTP {}", status)))?;
            Err(ApiClientError::Api(body.into_api_error()))
        }
    }
}

#[async_trait]
impl DirectoryApi for InProcessApi {
    async fn get_employees(&self) -> ApiClientResult<Vec<Employee>> {
        self.call(Operation::GetEmployees, None).await
    }

    async fn get_roles(&self) -> ApiClientResult<Vec<Role>> {
        self.call(Operation::GetRole, None).await
    }

    async fn get_reporting_line_managers(&self) -> ApiClientResult<Vec<ManagerSummary>> {
        self.call(Operation::GetReportingLineManager, None).await
    }

    async fn check_email_exists(&self, email: &str) -> ApiClientResult<bool> {
        let result: EmailExists = self
            .call(
                Operation::CheckEmailExists,
                Some(json!({ "email": email })),
            )
            .await?;
        Ok(result.exists)
    }

    async fn create_employee(&self, draft: &EmployeeCreate) -> ApiClientResult<Employee> {
        self.call(Operation::CreateEmployee, Some(super::to_payload(draft)?))
            .await
    }

    async fn update_employee(
        &self,
        id: &str,
        changes: &EmployeeUpdate,
    ) -> ApiClientResult<Employee> {
        self.call(
            Operation::UpdateEmployee,
            Some(super::update_payload(id, changes)?),
        )
        .await
    }

    async fn delete_employee(&self, id: &str) -> ApiClientResult<Employee> {
        self.call(Operation::DeleteEmployee, Some(json!({ "id": id })))
            .await
    }
}
