//! Employee Repository
//!
//! In-memory employee table with the business checks the hosted
//! function performed in SQL: email uniqueness, single CEO, and
//! dependent-employee guards on role change and deletion.

use chrono::Utc;
use parking_lot::RwLock;
use shared::error::{ApiError, ApiResult};
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate, ManagerSummary};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

#[derive(Clone, Default)]
pub struct EmployeeRepository {
    table: Arc<RwLock<Vec<Employee>>>,
}

impl EmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated repository, used by tests and demos
    pub fn with_seed(employees: Vec<Employee>) -> Self {
        Self {
            table: Arc::new(RwLock::new(employees)),
        }
    }

    /// All employees, in insertion order
    pub fn find_all(&self) -> Vec<Employee> {
        self.table.read().clone()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Employee> {
        self.table.read().iter().find(|e| e.id == id).cloned()
    }

    /// Manager projections ordered by name (`getReportingLineManager`)
    pub fn reporting_line_managers(&self) -> Vec<ManagerSummary> {
        let mut managers: Vec<ManagerSummary> =
            self.table.read().iter().map(ManagerSummary::from).collect();
        managers.sort_by(|a, b| a.name.cmp(&b.name));
        managers
    }

    /// Case-insensitive email lookup (`checkEmailExists`)
    pub fn email_exists(&self, email: &str) -> bool {
        let needle = email.to_lowercase();
        self.table
            .read()
            .iter()
            .any(|e| e.email.to_lowercase() == needle)
    }

    /// Number of employees whose manager reference resolves to `id`
    pub fn dependent_count(&self, id: &str) -> usize {
        self.table
            .read()
            .iter()
            .filter(|e| e.reporting_id.as_deref() == Some(id))
            .count()
    }

    /// Create a new employee
    ///
    /// Assigns the id, the sequential display number and timestamps.
    /// A CEO record never keeps a manager reference, whatever the
    /// payload carried.
    pub fn create(&self, data: EmployeeCreate) -> ApiResult<Employee> {
        data.validate()
            .map_err(|e| ApiError::validation(e.to_string()))?;

        let mut table = self.table.write();

        if data.role == Employee::CEO_ROLE && table.iter().any(|e| e.is_ceo()) {
            return Err(ApiError::ceo_exists());
        }

        let email = data.email.to_lowercase();
        if table.iter().any(|e| e.email.to_lowercase() == email) {
            return Err(ApiError::duplicate_email());
        }

        let reporting_id = if data.role == Employee::CEO_ROLE {
            None
        } else {
            data.reporting_id
        };

        let now = Utc::now();
        let employee = Employee {
            id: Uuid::new_v4().to_string(),
            name: data.name,
            surname: data.surname,
            email: data.email,
            role: data.role,
            reporting_id,
            employee_number: next_employee_number(&table),
            birth_date: data.birth_date,
            salary: data.salary,
            profile_image_url: data.profile_image_url,
            created_at: now,
            updated_at: now,
        };

        table.push(employee.clone());
        tracing::info!(id = %employee.id, number = %employee.employee_number, "employee created");
        Ok(employee)
    }

    /// Update an employee
    ///
    /// Role changes are refused while other employees still report to
    /// the target; promoting to CEO clears the manager reference in
    /// the same operation.
    pub fn update(&self, id: &str, data: EmployeeUpdate) -> ApiResult<Employee> {
        data.validate()
            .map_err(|e| ApiError::validation(e.to_string()))?;

        let mut table = self.table.write();

        let idx = table
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ApiError::not_found("Employee"))?;

        if let Some(ref new_email) = data.email {
            let needle = new_email.to_lowercase();
            if table
                .iter()
                .any(|e| e.id != id && e.email.to_lowercase() == needle)
            {
                return Err(ApiError::duplicate_email());
            }
        }

        if let Some(ref new_role) = data.role
            && *new_role != table[idx].role
        {
            let dependents = table
                .iter()
                .filter(|e| e.reporting_id.as_deref() == Some(id))
                .count();
            if dependents > 0 {
                return Err(ApiError::role_has_dependents(
                    "Cannot update employee role. There are still employees \
                     reporting to the current employee.",
                    dependents,
                ));
            }
            if *new_role == Employee::CEO_ROLE
                && table.iter().any(|e| e.id != id && e.is_ceo())
            {
                return Err(ApiError::ceo_exists());
            }
        }

        let employee = &mut table[idx];
        if let Some(name) = data.name {
            employee.name = name;
        }
        if let Some(surname) = data.surname {
            employee.surname = surname;
        }
        if let Some(email) = data.email {
            employee.email = email;
        }
        if let Some(role) = data.role {
            employee.role = role;
        }
        if let Some(reporting_id) = data.reporting_id {
            employee.reporting_id = reporting_id;
        }
        if employee.is_ceo() {
            employee.reporting_id = None;
        }
        if let Some(birth_date) = data.birth_date {
            employee.birth_date = Some(birth_date);
        }
        if let Some(salary) = data.salary {
            employee.salary = Some(salary);
        }
        if let Some(url) = data.profile_image_url {
            employee.profile_image_url = Some(url);
        }
        employee.updated_at = Utc::now();

        tracing::info!(id = %employee.id, "employee updated");
        Ok(employee.clone())
    }

    /// Delete an employee, returning the removed record
    ///
    /// Refused while any employee still reports to the target.
    pub fn delete(&self, id: &str) -> ApiResult<Employee> {
        let mut table = self.table.write();

        let idx = table
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ApiError::not_found("Employee"))?;

        let dependents = table
            .iter()
            .filter(|e| e.reporting_id.as_deref() == Some(id))
            .count();
        if dependents > 0 {
            return Err(ApiError::role_has_dependents(
                "Cannot delete employee. There are still employees \
                 reporting to this employee.",
                dependents,
            ));
        }

        let employee = table.remove(idx);
        tracing::info!(id = %employee.id, "employee deleted");
        Ok(employee)
    }
}

/// Next sequential display number: EMP001, EMP002, ...
fn next_employee_number(table: &[Employee]) -> String {
    let max = table
        .iter()
        .filter_map(|e| e.employee_number.strip_prefix("EMP"))
        .filter_map(|n| n.parse::<u32>().ok())
        .max()
        .unwrap_or(0);
    format!("EMP{:03}", max + 1)
}
