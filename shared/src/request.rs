//! RPC request envelope
//!
//! The directory server exposes a single POST endpoint; the operation
//! is selected by the `type` field of the JSON body and its arguments
//! travel in `payload`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Recognized operation names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    GetEmployees,
    GetRole,
    GetReportingLineManager,
    CheckEmailExists,
    CreateEmployee,
    UpdateEmployee,
    DeleteEmployee,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Wire name, e.g. "getEmployees"
        let s = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(s.trim_matches('"'))
    }
}

/// Request body: `{ "type": <operation>, "payload": {...} }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiRequest {
    #[serde(rename = "type")]
    pub op: Operation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<Value>,
}

impl ApiRequest {
    pub fn new(op: Operation) -> Self {
        Self { op, payload: None }
    }

    pub fn with_payload(op: Operation, payload: impl Serialize) -> serde_json::Result<Self> {
        Ok(Self {
            op,
            payload: Some(serde_json::to_value(payload)?),
        })
    }
}
