//! Employee Model

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Employee record as stored and returned by the directory server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Server-assigned UUID, immutable after creation
    pub id: String,
    pub name: String,
    pub surname: String,
    /// Unique across all employees
    pub email: String,
    /// Job title from the role catalogue; at most one "CEO"
    pub role: String,
    /// Manager reference (employee id). `None` only for the CEO.
    pub reporting_id: Option<String>,
    /// Sequential display number (EMP001, EMP002, ...)
    pub employee_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// The distinguished root role
    pub const CEO_ROLE: &'static str = "CEO";

    pub fn is_ceo(&self) -> bool {
        self.role == Self::CEO_ROLE
    }

    /// Display name ("Name Surname")
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname)
    }
}

/// Create employee payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeCreate {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Surname is required"))]
    pub surname: String,
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
    /// Manager reference (employee id); required unless role is "CEO"
    #[serde(default)]
    pub reporting_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}

/// Update employee payload
///
/// `reporting_id` is nested in a double Option so the wire can
/// distinguish "leave unchanged" (absent) from "clear" (explicit null).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Surname is required"))]
    pub surname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(email(message = "Email is invalid"))]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_double_option"
    )]
    pub reporting_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
}

impl EmployeeUpdate {
    /// True when no field is being changed
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.surname.is_none()
            && self.email.is_none()
            && self.role.is_none()
            && self.reporting_id.is_none()
            && self.birth_date.is_none()
            && self.salary.is_none()
            && self.profile_image_url.is_none()
    }
}

/// Serde helper for `Option<Option<T>>`: absent = unchanged, null = clear
mod serde_double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}

/// Reporting-line manager projection (`getReportingLineManager`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerSummary {
    pub id: String,
    pub name: String,
    pub surname: String,
    pub role: String,
}

impl From<&Employee> for ManagerSummary {
    fn from(e: &Employee) -> Self {
        Self {
            id: e.id.clone(),
            name: e.name.clone(),
            surname: e.surname.clone(),
            role: e.role.clone(),
        }
    }
}

/// Response payload for `checkEmailExists`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailExists {
    pub exists: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Employee {
        Employee {
            id: "e1".into(),
            name: "Ada".into(),
            surname: "Lovelace".into(),
            email: "ada@example.com".into(),
            role: "CEO".into(),
            reporting_id: None,
            employee_number: "EMP001".into(),
            birth_date: None,
            salary: None,
            profile_image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_employee_wire_names_are_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("reportingId").is_some());
        assert!(json.get("employeeNumber").is_some());
        assert!(json.get("reporting_id").is_none());
    }

    #[test]
    fn test_is_ceo() {
        let mut e = sample();
        assert!(e.is_ceo());
        e.role = "CTO".into();
        assert!(!e.is_ceo());
    }

    #[test]
    fn test_create_payload_validation() {
        let draft = EmployeeCreate {
            name: "".into(),
            surname: "Lovelace".into(),
            email: "not-an-email".into(),
            role: "CEO".into(),
            reporting_id: None,
            birth_date: None,
            salary: None,
            profile_image_url: None,
        };
        let errors = draft.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_update_reporting_id_absent_vs_null() {
        let absent: EmployeeUpdate = serde_json::from_str(r#"{"name":"Ada"}"#).unwrap();
        assert!(absent.reporting_id.is_none());

        let cleared: EmployeeUpdate = serde_json::from_str(r#"{"reportingId":null}"#).unwrap();
        assert_eq!(cleared.reporting_id, Some(None));

        let set: EmployeeUpdate = serde_json::from_str(r#"{"reportingId":"e1"}"#).unwrap();
        assert_eq!(set.reporting_id, Some(Some("e1".to_string())));
    }
}
