//! Operation dispatch
//!
//! Decodes the `{ type, payload }` envelope and routes to the
//! repository. Success responses are the bare result object/array;
//! failures become the wire error body via `ApiError`.

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use http::{StatusCode, header};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::core::ServerState;
use shared::error::{ApiError, ApiResult};
use shared::models::{EmployeeCreate, EmployeeUpdate};
use shared::request::{ApiRequest, Operation};

/// CORS preflight: 204 with the allowed method and header set
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
        ],
    )
}

#[derive(Deserialize)]
struct EmailPayload {
    email: String,
}

#[derive(Deserialize)]
struct IdPayload {
    id: String,
}

#[derive(Deserialize)]
struct UpdatePayload {
    id: String,
    #[serde(flatten)]
    changes: EmployeeUpdate,
}

pub async fn dispatch(
    State(state): State<ServerState>,
    Json(body): Json<Value>,
) -> ApiResult<Json<Value>> {
    // Decode the envelope by hand so an unrecognized operation name
    // gets the documented UNSUPPORTED_OPERATION error, not a generic
    // deserialization rejection.
    let request: ApiRequest = match serde_json::from_value(body.clone()) {
        Ok(req) => req,
        Err(_) => {
            return Err(match body.get("type") {
                Some(t) if t.is_string() => ApiError::unsupported_operation(),
                _ => ApiError::validation("Request body must carry a `type` field"),
            });
        }
    };
    tracing::debug!(op = %request.op, "dispatching operation");

    let result = match request.op {
        Operation::GetEmployees => to_value(state.repo.find_all())?,
        Operation::GetRole => to_value(state.roles())?,
        Operation::GetReportingLineManager => to_value(state.repo.reporting_line_managers())?,
        Operation::CheckEmailExists => {
            let payload: EmailPayload = decode(request.payload)?;
            json!({ "exists": state.repo.email_exists(&payload.email) })
        }
        Operation::CreateEmployee => {
            let payload: EmployeeCreate = decode(request.payload)?;
            to_value(state.repo.create(payload)?)?
        }
        Operation::UpdateEmployee => {
            let payload: UpdatePayload = decode(request.payload)?;
            to_value(state.repo.update(&payload.id, payload.changes)?)?
        }
        Operation::DeleteEmployee => {
            let payload: IdPayload = decode(request.payload)?;
            to_value(state.repo.delete(&payload.id)?)?
        }
    };

    Ok(Json(result))
}

/// Decode the operation payload, treating an absent or malformed body
/// as a validation failure rather than a transport error.
fn decode<T: serde::de::DeserializeOwned>(payload: Option<Value>) -> ApiResult<T> {
    let payload = payload.ok_or_else(|| ApiError::validation("Missing payload"))?;
    serde_json::from_value(payload)
        .map_err(|e| ApiError::validation(format!("Invalid payload: {}", e)))
}

fn to_value<T: serde::Serialize>(value: T) -> ApiResult<Value> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}
