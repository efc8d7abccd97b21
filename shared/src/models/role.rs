//! Role Model

use serde::{Deserialize, Serialize};

/// Role catalogue row (`getRole`)
///
/// The catalogue is server-owned; clients populate dropdowns from it
/// and never invent role names locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub role: String,
}

impl Role {
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into() }
    }
}

/// Default role catalogue, mirroring the `all_roles` view of the
/// hosted store. Sorted order is applied by the server on read.
pub fn default_role_catalogue() -> Vec<Role> {
    [
        "CEO",
        "CFO",
        "CTO",
        "Designer",
        "Developer",
        "Engineering Manager",
        "HR Manager",
        "Marketing Manager",
        "QA Engineer",
        "Sales Representative",
        "Senior Developer",
    ]
    .into_iter()
    .map(Role::new)
    .collect()
}
