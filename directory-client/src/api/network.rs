//! HTTP transport

use super::{ApiClientError, ApiClientResult, DirectoryApi};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use shared::error::ErrorBody;
use shared::models::{EmailExists, Employee, EmployeeCreate, EmployeeUpdate, ManagerSummary, Role};
use shared::request::{ApiRequest, Operation};

/// Network client over the single-endpoint RPC contract
#[derive(Debug, Clone)]
pub struct NetworkApi {
    client: reqwest::Client,
    endpoint: String,
}

impl NetworkApi {
    /// `endpoint` is the full URL of the directory function,
    /// e.g. `https://host/functions/v1/api`.
    pub fn new(endpoint: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    async fn call<T: DeserializeOwned>(
        &self,
        op: Operation,
        payload: Option<Value>,
    ) -> ApiClientResult<T> {
        let request = ApiRequest { op, payload };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| ApiClientError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ApiClientError::Decode(e.to_string()))
        } else {
            // A structured error body is expected on 4xx/5xx; anything
            // else is a transport-level failure.
            let body: ErrorBody = response
                .json()
                .await
                .map_err(|_| ApiClientError::Network(format!("HTTP {}", status)))?;
            Err(ApiClientError::Api(body.into_api_error()))
        }
    }
}

#[async_trait]
impl DirectoryApi for NetworkApi {
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
