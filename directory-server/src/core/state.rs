//! Server state

use crate::core::Config;
use crate::db::EmployeeRepository;
use shared::models::{Role, default_role_catalogue};
use std::sync::Arc;

/// Shared application state
///
/// Cheap to clone: the repository is reference-counted and the role
/// catalogue is immutable for the lifetime of the process.
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub repo: EmployeeRepository,
    roles: Arc<Vec<Role>>,
}

impl ServerState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            repo: EmployeeRepository::new(),
            roles: Arc::new(default_role_catalogue()),
        }
    }

    /// Role catalogue, ordered by role name
    pub fn roles(&self) -> Vec<Role> {
        let mut roles = self.roles.as_ref().clone();
        roles.sort_by(|a, b| a.role.cmp(&b.role));
        roles
    }
}
