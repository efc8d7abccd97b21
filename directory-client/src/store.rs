//! Employee Directory Store
//!
//! The authoritative in-memory employee collection for a session.
//! Mutations are validated locally first, then submitted to the
//! persistence collaborator; the server's response is authoritative
//! and reconciled into the snapshot through a single `apply` step.
//!
//! The store is single-owner (`&mut self`), matching the UI-driven,
//! cooperatively-scheduled session model: user actions and network
//! completions are the only suspension points.

use crate::api::{ApiClientError, DirectoryApi};
use shared::error::ErrorCode;
use shared::hierarchy::OrgForest;
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate, ManagerSummary, Role};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use validator::Validate;

/// Field name -> user-facing message
pub type FieldErrors = BTreeMap<String, String>;

/// Mutation errors surfaced to the caller; all recoverable
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Caught locally before any network call
    #[error("validation failed")]
    Validation { fields: FieldErrors },
    #[error("email already exists")]
    DuplicateEmail,
    #[error("a CEO already exists; only one is allowed")]
    CeoAlreadyExists,
    #[error("{dependent_count} employee(s) still report to this employee")]
    RoleHasDependents { dependent_count: usize },
    #[error("employee not found")]
    NotFound,
    #[error("network error: {0}")]
    Network(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<ApiClientError> for StoreError {
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::Api(api) => match api.code {
                ErrorCode::DuplicateEmail => StoreError::DuplicateEmail,
                ErrorCode::CeoExists => StoreError::CeoAlreadyExists,
                ErrorCode::RoleHasDependents => StoreError::RoleHasDependents {
                    dependent_count: api.dependent_count.unwrap_or(0),
                },
                ErrorCode::NotFound => StoreError::NotFound,
                ErrorCode::ValidationFailed => StoreError::Validation {
                    fields: BTreeMap::from([("form".to_string(), api.message)]),
                },
                ErrorCode::UnsupportedOperation | ErrorCode::Internal => {
                    StoreError::Network(api.message)
                }
            },
            ApiClientError::Network(msg) | ApiClientError::Decode(msg) => StoreError::Network(msg),
        }
    }
}

impl StoreError {
    /// Field-level rendering for form display
    fn field_errors(&self) -> FieldErrors {
        let entry = |field: &str, msg: String| BTreeMap::from([(field.to_string(), msg)]);
        match self {
            StoreError::Validation { fields } => fields.clone(),
            StoreError::DuplicateEmail => entry("email", self.to_string()),
            StoreError::CeoAlreadyExists | StoreError::RoleHasDependents { .. } => {
                entry("role", self.to_string())
            }
            StoreError::NotFound | StoreError::Network(_) => entry("form", self.to_string()),
        }
    }
}

/// Transient phase of the pending mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MutationState {
    #[default]
    Idle,
    Validating,
    Submitting,
}

/// Terminal result of the most recent mutation
#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Succeeded,
    ValidationFailed(FieldErrors),
    Rejected(FieldErrors),
}

/// Reconciliation instruction derived from a successful server reply
enum Applied {
    Created(Employee),
    Updated(Employee),
    Deleted(String),
}

pub struct DirectoryStore {
    api: Arc<dyn DirectoryApi>,
    employees: Vec<Employee>,
    roles: Vec<Role>,
    mutation: MutationState,
    last_outcome: Option<MutationOutcome>,
}

impl DirectoryStore {
    pub fn new(api: Arc<dyn DirectoryApi>) -> Self {
        Self {
            api,
            employees: Vec::new(),
            roles: Vec::new(),
            mutation: MutationState::Idle,
            last_outcome: None,
        }
    }

    /// Fetch employees and the role catalogue, replacing the snapshot
    /// wholesale.
    pub async fn load(&mut self) -> StoreResult<()> {
        let employees = self.api.get_employees().await?;
        let roles = self.api.get_roles().await?;
        tracing::debug!(employees = employees.len(), roles = roles.len(), "store loaded");
        self.employees = employees;
        self.roles = roles;
        Ok(())
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn find(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// Manager candidates for dropdowns, ordered by name
    pub fn reporting_line_managers(&self) -> Vec<ManagerSummary> {
        let mut managers: Vec<ManagerSummary> =
            self.employees.iter().map(ManagerSummary::from).collect();
        managers.sort_by(|a, b| a.name.cmp(&b.name));
        managers
    }

    /// Hierarchy over the current snapshot
    pub fn forest(&self) -> OrgForest {
        OrgForest::build(&self.employees)
    }

    pub fn mutation(&self) -> MutationState {
        self.mutation
    }

    pub fn last_outcome(&self) -> Option<&MutationOutcome> {
        self.last_outcome.as_ref()
    }

    /// Employees whose manager reference resolves to `id`
    pub fn dependent_count(&self, id: &str) -> usize {
        self.employees
            .iter()
            .filter(|e| e.reporting_id.as_deref() == Some(id))
            .count()
    }

    // ==================== Mutations ====================

    pub async fn create(&mut self, mut draft: EmployeeCreate) -> StoreResult<Employee> {
        self.mutation = MutationState::Validating;

        // A CEO reports to nobody, whatever the form submitted.
        if draft.role == Employee::CEO_ROLE {
            draft.reporting_id = None;
        }

        let mut fields = validator_fields(draft.validate());
        if draft.role != Employee::CEO_ROLE {
            match draft.reporting_id.as_deref() {
                None => {
                    fields.insert(
                        "reporting_id".to_string(),
                        "Reporting line manager is required".to_string(),
                    );
                }
                Some(mgr) if self.find(mgr).is_none() => {
                    fields.insert(
                        "reporting_id".to_string(),
                        "Reporting line manager does not exist".to_string(),
                    );
                }
                Some(_) => {}
            }
        }
        if !fields.is_empty() {
            return self.fail_validation(fields);
        }

        if draft.role == Employee::CEO_ROLE && self.employees.iter().any(Employee::is_ceo) {
            return Err(self.reject_with(StoreError::CeoAlreadyExists));
        }

        self.mutation = MutationState::Submitting;
        match self.api.create_employee(&draft).await {
            Ok(created) => {
                self.apply(Applied::Created(created.clone()));
                self.finish_ok();
                Ok(created)
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    pub async fn update(&mut self, id: &str, mut changes: EmployeeUpdate) -> StoreResult<Employee> {
        self.mutation = MutationState::Validating;

        let Some(current) = self.find(id).cloned() else {
            return Err(self.reject_with(StoreError::NotFound));
        };

        if changes.role.as_deref() == Some(Employee::CEO_ROLE) {
            changes.reporting_id = Some(None);
        }

        let mut fields = validator_fields(changes.validate());

        let effective_role = changes.role.clone().unwrap_or_else(|| current.role.clone());
        let effective_manager = match &changes.reporting_id {
            Some(new_ref) => new_ref.clone(),
            None => current.reporting_id.clone(),
        };
        if effective_role != Employee::CEO_ROLE && effective_manager.is_none() {
            fields.insert(
                "reporting_id".to_string(),
                "Reporting line manager is required".to_string(),
            );
        }

        // Cycle prevention: an employee cannot report to itself, nor
        // to any of its own transitive reports.
        if let Some(Some(mgr)) = &changes.reporting_id {
            if mgr == id {
                fields.insert(
                    "reporting_id".to_string(),
                    "An employee cannot be their own manager".to_string(),
                );
            } else if self.find(mgr).is_none() {
                fields.insert(
                    "reporting_id".to_string(),
                    "Reporting line manager does not exist".to_string(),
                );
            } else if self.reports_transitively_to(mgr, id) {
                fields.insert(
                    "reporting_id".to_string(),
                    "Cannot report to one of the employee's own reports".to_string(),
                );
            }
        }

        if !fields.is_empty() {
            return self.fail_validation(fields);
        }

        if changes.role.as_deref() == Some(Employee::CEO_ROLE)
            && self.employees.iter().any(|e| e.id != id && e.is_ceo())
        {
            return Err(self.reject_with(StoreError::CeoAlreadyExists));
        }

        self.mutation = MutationState::Submitting;
        match self.api.update_employee(id, &changes).await {
            Ok(updated) => {
                // Trust the server's version, not the submitted one.
                self.apply(Applied::Updated(updated.clone()));
                self.finish_ok();
                Ok(updated)
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    pub async fn delete(&mut self, id: &str) -> StoreResult<()> {
        self.mutation = MutationState::Validating;

        if self.find(id).is_none() {
            return Err(self.reject_with(StoreError::NotFound));
        }

        self.mutation = MutationState::Submitting;
        match self.api.delete_employee(id).await {
            Ok(_deleted) => {
                self.apply(Applied::Deleted(id.to_string()));
                self.finish_ok();
                Ok(())
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    // ==================== Reconciliation ====================

    /// The only place the snapshot is patched after a mutation
    fn apply(&mut self, applied: Applied) {
        match applied {
            Applied::Created(employee) => self.employees.push(employee),
            Applied::Updated(employee) => {
                if let Some(slot) = self.employees.iter_mut().find(|e| e.id == employee.id) {
                    *slot = employee;
                } else {
                    // The record vanished locally between submit and
                    // reply; the server version still wins.
                    self.employees.push(employee);
                }
            }
            Applied::Deleted(id) => self.employees.retain(|e| e.id != id),
        }
    }

    // ==================== State machine plumbing ====================

    fn fail_validation<T>(&mut self, fields: FieldErrors) -> StoreResult<T> {
        self.mutation = MutationState::Idle;
        self.last_outcome = Some(MutationOutcome::ValidationFailed(fields.clone()));
        Err(StoreError::Validation { fields })
    }

    fn reject(&mut self, err: ApiClientError) -> StoreError {
        self.reject_with(err.into())
    }

    fn reject_with(&mut self, err: StoreError) -> StoreError {
        self.mutation = MutationState::Idle;
        self.last_outcome = Some(MutationOutcome::Rejected(err.field_errors()));
        err
    }

    fn finish_ok(&mut self) {
        self.mutation = MutationState::Idle;
        self.last_outcome = Some(MutationOutcome::Succeeded);
    }

    /// True when following `start`'s manager chain reaches `target`.
    /// Bounded by the employee count, so malformed chains terminate.
    fn reports_transitively_to(&self, start: &str, target: &str) -> bool {
        let mut cursor = Some(start.to_string());
        for _ in 0..=self.employees.len() {
            let Some(id) = cursor else { return false };
            if id == target {
                return true;
            }
            cursor = self.find(&id).and_then(|e| e.reporting_id.clone());
        }
        false
    }
}

/// Flatten validator output into field -> first message
fn validator_fields(result: Result<(), validator::ValidationErrors>) -> FieldErrors {
    let mut fields = FieldErrors::new();
    if let Err(errors) = result {
        for (field, errs) in errors.field_errors() {
            if let Some(first) = errs.first() {
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                fields.insert(field.to_string(), message);
            }
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use shared::error::ApiError;
    use std::sync::Mutex;

    /// Scripted collaborator: echoes drafts back as server records,
    /// or fails every mutation with a fixed error.
    #[derive(Default)]
    struct ScriptedApi {
        employees: Vec<Employee>,
        roles: Vec<Role>,
        fail_with: Option<ApiError>,
        last_update: Mutex<Option<(String, EmployeeUpdate)>>,
    }

    impl ScriptedApi {
        fn failing(err: ApiError) -> Self {
            Self {
                fail_with: Some(err),
                ..Default::default()
            }
        }

        fn check(&self) -> crate::api::ApiClientResult<()> {
            match &self.fail_with {
                Some(err) => Err(ApiClientError::Api(err.clone())),
                None => Ok(()),
            }
        }
    }

    fn record(id: &str, name: &str, role: &str, mgr: Option<&str>) -> Employee {
        Employee {
            id: id.into(),
            name: name.into(),
            surname: "Test".into(),
            email: format!("{}@example.com", name.to_lowercase()),
            role: role.into(),
            reporting_id: mgr.map(Into::into),
            employee_number: "EMP001".into(),
            birth_date: None,
            salary: None,
            profile_image_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[async_trait]
    impl DirectoryApi for ScriptedApi {
        async fn get_employees(&self) -> crate::api::ApiClientResult<Vec<Employee>> {
            self.check()?;
            Ok(self.employees.clone())
        }

        async fn get_roles(&self) -> crate::api::ApiClientResult<Vec<Role>> {
            self.check()?;
            Ok(self.roles.clone())
        }

        async fn get_reporting_line_managers(
            &self,
        ) -> crate::api::ApiClientResult<Vec<ManagerSummary>> {
            self.check()?;
            Ok(self.employees.iter().map(ManagerSummary::from).collect())
        }

        async fn check_email_exists(&self, email: &str) -> crate::api::ApiClientResult<bool> {
            self.check()?;
            Ok(self.employees.iter().any(|e| e.email == email))
        }

        async fn create_employee(
            &self,
            draft: &EmployeeCreate,
        ) -> crate::api::ApiClientResult<Employee> {
            self.check()?;
            let mut created = record("srv-assigned", &draft.name, &draft.role, None);
            created.surname = draft.surname.clone();
            created.email = draft.email.clone();
            created.reporting_id = draft.reporting_id.clone();
            created.employee_number = "EMP099".into();
            Ok(created)
        }

        async fn update_employee(
            &self,
            id: &str,
            changes: &EmployeeUpdate,
        ) -> crate::api::ApiClientResult<Employee> {
            self.check()?;
            *self.last_update.lock().unwrap() = Some((id.to_string(), changes.clone()));
            let current = self
                .employees
                .iter()
                .find(|e| e.id == id)
                .cloned()
                .unwrap_or_else(|| record(id, "Server", "Developer", None));
            let mut updated = current;
            if let Some(name) = &changes.name {
                updated.name = name.clone();
            }
            if let Some(role) = &changes.role {
                updated.role = role.clone();
            }
            if let Some(reporting) = &changes.reporting_id {
                updated.reporting_id = reporting.clone();
            }
            if updated.is_ceo() {
                updated.reporting_id = None;
            }
            updated.updated_at = Utc::now();
            Ok(updated)
        }

        async fn delete_employee(&self, id: &str) -> crate::api::ApiClientResult<Employee> {
            self.check()?;
            Ok(record(id, "Gone", "Developer", None))
        }
    }

    fn store_with(api: ScriptedApi) -> DirectoryStore {
        DirectoryStore::new(Arc::new(api))
    }

    async fn loaded_store(employees: Vec<Employee>) -> DirectoryStore {
        let api = ScriptedApi {
            employees,
            roles: shared::models::default_role_catalogue(),
            ..Default::default()
        };
        let mut store = store_with(api);
        store.load().await.unwrap();
        store
    }

    fn draft(name: &str, role: &str, mgr: Option<&str>) -> EmployeeCreate {
        EmployeeCreate {
            name: name.into(),
            surname: "Test".into(),
            email: format!("{}@example.com", name.to_lowercase()),
            role: role.into(),
            reporting_id: mgr.map(Into::into),
            birth_date: None,
            salary: None,
            profile_image_url: None,
        }
    }

    #[tokio::test]
    async fn test_load_replaces_snapshot_wholesale() {
        let mut store = loaded_store(vec![record("1", "Carol", "CEO", None)]).await;
        assert_eq!(store.employees().len(), 1);
        assert!(!store.roles().is_empty());

        // A second load with different data wins completely.
        store.api = Arc::new(ScriptedApi {
            employees: vec![
                record("2", "Tom", "CTO", None),
                record("3", "Dana", "Developer", Some("2")),
            ],
            ..Default::default()
        });
        store.load().await.unwrap();
        assert_eq!(store.employees().len(), 2);
        assert!(store.find("1").is_none());
    }

    #[tokio::test]
    async fn test_create_validation_failure_is_local() {
        let mut store = store_with(ScriptedApi::default());
        let mut bad = draft("", "Developer", None);
        bad.email = "not-an-email".into();

        let err = store.create(bad).await.unwrap_err();
        let StoreError::Validation { fields } = err else {
            panic!("expected validation error");
        };
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("reporting_id"));

        assert_eq!(store.mutation(), MutationState::Idle);
        assert!(matches!(
            store.last_outcome(),
            Some(MutationOutcome::ValidationFailed(_))
        ));
        assert!(store.employees().is_empty());
    }

    #[tokio::test]
    async fn test_create_requires_existing_manager() {
        let mut store = loaded_store(vec![record("1", "Carol", "CEO", None)]).await;
        let err = store
            .create(draft("Dana", "Developer", Some("ghost")))
            .await
            .unwrap_err();
        let StoreError::Validation { fields } = err else {
            panic!("expected validation error");
        };
        assert!(fields["reporting_id"].contains("does not exist"));
    }

    #[tokio::test]
    async fn test_create_ceo_fails_when_ceo_exists() {
        let mut store = loaded_store(vec![record("1", "Carol", "CEO", None)]).await;
        let err = store.create(draft("Eve", "CEO", None)).await.unwrap_err();
        assert!(matches!(err, StoreError::CeoAlreadyExists));
        assert!(matches!(
            store.last_outcome(),
            Some(MutationOutcome::Rejected(_))
        ));
        assert_eq!(store.employees().len(), 1);
    }

    #[tokio::test]
    async fn test_create_ceo_succeeds_and_clears_manager() {
        let mut store = store_with(ScriptedApi::default());
        let mut d = draft("Carol", "CEO", None);
        d.reporting_id = Some("anything".into());

        let created = store.create(d).await.unwrap();
        assert_eq!(created.reporting_id, None);
        // Server-assigned identity is what lands in the snapshot.
        assert_eq!(created.id, "srv-assigned");
        assert_eq!(store.employees().len(), 1);
        assert!(matches!(
            store.last_outcome(),
            Some(MutationOutcome::Succeeded)
        ));
    }

    #[tokio::test]
    async fn test_create_duplicate_email_rejected_by_server() {
        let mut store = loaded_store(vec![record("1", "Carol", "CEO", None)]).await;
        store.api = Arc::new(ScriptedApi::failing(ApiError::duplicate_email()));

        let err = store
            .create(draft("Dana", "Developer", Some("1")))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateEmail));
        let Some(MutationOutcome::Rejected(fields)) = store.last_outcome() else {
            panic!("expected rejected outcome");
        };
        assert!(fields.contains_key("email"));
        assert_eq!(store.employees().len(), 1);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let mut store = store_with(ScriptedApi::default());
        let err = store
            .update("missing", EmployeeUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn test_update_rejects_self_as_manager() {
        let mut store = loaded_store(vec![record("1", "Carol", "CEO", None)]).await;
        let err = store
            .update(
                "1",
                EmployeeUpdate {
                    reporting_id: Some(Some("1".into())),
                    role: Some("CTO".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        let StoreError::Validation { fields } = err else {
            panic!("expected validation error");
        };
        assert!(fields["reporting_id"].contains("own manager"));
    }

    #[tokio::test]
    async fn test_update_rejects_manager_among_own_reports() {
        let mut store = loaded_store(vec![
            record("1", "Carol", "CEO", None),
            record("2", "Tom", "CTO", Some("1")),
            record("3", "Dana", "Developer", Some("2")),
        ]).await;

        // CTO cannot start reporting to Dana, who reports to the CTO.
        let err = store
            .update(
                "2",
                EmployeeUpdate {
                    reporting_id: Some(Some("3".into())),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        let StoreError::Validation { fields } = err else {
            panic!("expected validation error");
        };
        assert!(fields["reporting_id"].contains("own reports"));
    }

    #[tokio::test]
    async fn test_update_non_ceo_cannot_clear_manager() {
        let mut store = loaded_store(vec![
            record("1", "Carol", "CEO", None),
            record("2", "Tom", "CTO", Some("1")),
        ]).await;

        let err = store
            .update(
                "2",
                EmployeeUpdate {
                    reporting_id: Some(None),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        let StoreError::Validation { fields } = err else {
            panic!("expected validation error");
        };
        assert!(fields["reporting_id"].contains("required"));
    }

    #[tokio::test]
    async fn test_update_to_ceo_forces_null_manager_on_wire() {
        let mut store = loaded_store(vec![record("2", "Tom", "CTO", None)]).await;
        let api = Arc::new(ScriptedApi {
            employees: vec![record("2", "Tom", "CTO", None)],
            ..Default::default()
        });
        store.api = api.clone();

        let updated = store
            .update(
                "2",
                EmployeeUpdate {
                    role: Some("CEO".into()),
                    reporting_id: Some(Some("1".into())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.reporting_id, None);

        let (_, submitted) = api.last_update.lock().unwrap().clone().unwrap();
        assert_eq!(submitted.reporting_id, Some(None));
    }

    #[tokio::test]
    async fn test_update_reconciles_server_record() {
        let mut store = loaded_store(vec![record("1", "Carol", "CEO", None)]).await;
        store.api = Arc::new(ScriptedApi {
            employees: vec![record("1", "Carol", "CEO", None)],
            ..Default::default()
        });

        store
            .update(
                "1",
                EmployeeUpdate {
                    name: Some("Caroline".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(store.find("1").unwrap().name, "Caroline");
        assert_eq!(store.employees().len(), 1);
    }

    #[tokio::test]
    async fn test_update_role_with_dependents_maps_count() {
        // Tom keeps his manager, so the role change clears local
        // validation and the server's rejection is what surfaces.
        let mut store = loaded_store(vec![
            record("1", "Carol", "CEO", None),
            record("2", "Tom", "CTO", Some("1")),
            record("3", "Dana", "Developer", Some("2")),
            record("4", "Drew", "Developer", Some("2")),
        ]).await;
        store.api = Arc::new(ScriptedApi::failing(ApiError::role_has_dependents(
            "Cannot update employee role.",
            2,
        )));

        let err = store
            .update(
                "2",
                EmployeeUpdate {
                    role: Some("Developer".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        let StoreError::RoleHasDependents { dependent_count } = err else {
            panic!("expected dependents error");
        };
        assert_eq!(dependent_count, 2);
        // Local record untouched on rejection.
        assert_eq!(store.find("2").unwrap().role, "CTO");
    }

    #[tokio::test]
    async fn test_delete_removes_record() {
        let mut store = loaded_store(vec![
            record("1", "Carol", "CEO", None),
            record("3", "Dana", "Developer", Some("1")),
        ]).await;
        store.api = Arc::new(ScriptedApi::default());

        store.delete("3").await.unwrap();
        assert!(store.find("3").is_none());
        assert_eq!(store.employees().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_with_dependents_keeps_record() {
        let mut store = loaded_store(vec![
            record("2", "Tom", "CTO", None),
            record("3", "Dana", "Developer", Some("2")),
        ]).await;
        store.api = Arc::new(ScriptedApi::failing(ApiError::role_has_dependents(
            "Cannot delete employee.",
            1,
        )));

        let err = store.delete("2").await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::RoleHasDependents { dependent_count: 1 }
        ));
        assert!(store.find("2").is_some());
    }

    #[tokio::test]
    async fn test_network_failure_maps_to_network_error() {
        let mut store = loaded_store(vec![record("1", "Carol", "CEO", None)]).await;
        store.api = Arc::new(ScriptedApi::failing(ApiError::internal("db down")));

        let err = store.delete("1").await.unwrap_err();
        assert!(matches!(err, StoreError::Network(_)));
        assert!(store.find("1").is_some());
    }

    #[tokio::test]
    async fn test_forest_over_snapshot() {
        let store = loaded_store(vec![
            record("1", "Carol", "CEO", None),
            record("2", "Tom", "CTO", Some("1")),
            record("3", "Dana", "Developer", Some("2")),
        ])
        .await;
        let forest = store.forest();
        assert_eq!(forest.len(), 3);
        assert_eq!(forest.roots()[0].employee.id, "1");
    }

    #[tokio::test]
    async fn test_dependent_count() {
        let store = loaded_store(vec![
            record("2", "Tom", "CTO", None),
            record("3", "Dana", "Developer", Some("2")),
            record("4", "Drew", "Developer", Some("2")),
        ])
        .await;
        assert_eq!(store.dependent_count("2"), 2);
        assert_eq!(store.dependent_count("3"), 0);
    }
}
