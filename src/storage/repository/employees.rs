// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Employee record repository.
//!
//! Each record is stored as a separate JSON file under `employees/`.
//! Lookups by an id that does not exist (or is not a valid id) yield `None`
//! rather than an error; callers surface that as a null result.

use async_graphql::{ComplexObject, MaybeUndefined, SimpleObject, ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::super::{is_document_id, DocumentStore, StorageError, StorageResult};

/// Employee record stored in the document store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, SimpleObject)]
#[graphql(name = "Employee", complex, rename_fields = "snake_case")]
pub struct StoredEmployee {
    /// Unique employee identifier (UUID)
    #[graphql(skip)]
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub designation: Option<String>,
    pub salary: Option<f64>,
    /// Free-form date string as submitted by the client
    pub date_of_joining: Option<String>,
    pub department: Option<String>,
    /// Reference (URL or path) to the employee's photo
    pub employee_photo: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[ComplexObject]
impl StoredEmployee {
    async fn id(&self) -> ID {
        ID(self.id.clone())
    }
}

/// Field set for a new employee record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewEmployee {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub designation: Option<String>,
    pub salary: Option<f64>,
    pub date_of_joining: Option<String>,
    pub department: Option<String>,
    pub employee_photo: Option<String>,
}

/// Partial update.
///
/// Each field is tri-state: undefined keeps the stored value, null clears
/// it, and a value replaces it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmployeePatch {
    pub first_name: MaybeUndefined<String>,
    pub last_name: MaybeUndefined<String>,
    pub email: MaybeUndefined<String>,
    pub gender: MaybeUndefined<String>,
    pub designation: MaybeUndefined<String>,
    pub salary: MaybeUndefined<f64>,
    pub date_of_joining: MaybeUndefined<String>,
    pub department: MaybeUndefined<String>,
    pub employee_photo: MaybeUndefined<String>,
}

impl StoredEmployee {
    /// Build a fresh record with a server-assigned id and creation time.
    pub fn from_new(new: NewEmployee) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            first_name: new.first_name,
            last_name: new.last_name,
            email: new.email,
            gender: new.gender,
            designation: new.designation,
            salary: new.salary,
            date_of_joining: new.date_of_joining,
            department: new.department,
            employee_photo: new.employee_photo,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn apply(&mut self, patch: EmployeePatch) {
        fn set<T>(slot: &mut Option<T>, value: MaybeUndefined<T>) {
            match value {
                MaybeUndefined::Undefined => {}
                MaybeUndefined::Null => *slot = None,
                MaybeUndefined::Value(value) => *slot = Some(value),
            }
        }

        set(&mut self.first_name, patch.first_name);
        set(&mut self.last_name, patch.last_name);
        set(&mut self.email, patch.email);
        set(&mut self.gender, patch.gender);
        set(&mut self.designation, patch.designation);
        set(&mut self.salary, patch.salary);
        set(&mut self.date_of_joining, patch.date_of_joining);
        set(&mut self.department, patch.department);
        set(&mut self.employee_photo, patch.employee_photo);
    }
}

/// Employee fields usable in search filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmployeeField {
    Designation,
    Department,
}

impl EmployeeField {
    fn value<'e>(&self, employee: &'e StoredEmployee) -> Option<&'e str> {
        match self {
            EmployeeField::Designation => employee.designation.as_deref(),
            EmployeeField::Department => employee.department.as_deref(),
        }
    }
}

/// What a [`FieldMatch`] requires of its field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchCondition<'q> {
    /// No constraint; every record matches.
    Any,
    /// The field is unset.
    Missing,
    /// The field equals this value exactly.
    Equals(&'q str),
}

impl<'q> From<&'q MaybeUndefined<String>> for MatchCondition<'q> {
    fn from(argument: &'q MaybeUndefined<String>) -> Self {
        match argument {
            MaybeUndefined::Undefined => MatchCondition::Any,
            MaybeUndefined::Null => MatchCondition::Missing,
            MaybeUndefined::Value(value) => MatchCondition::Equals(value.as_str()),
        }
    }
}

/// Condition on one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldMatch<'q> {
    pub field: EmployeeField,
    pub condition: MatchCondition<'q>,
}

impl<'q> FieldMatch<'q> {
    pub fn new(field: EmployeeField, condition: impl Into<MatchCondition<'q>>) -> Self {
        Self {
            field,
            condition: condition.into(),
        }
    }

    fn matches(&self, employee: &StoredEmployee) -> bool {
        match self.condition {
            MatchCondition::Any => true,
            MatchCondition::Missing => self.field.value(employee).is_none(),
            MatchCondition::Equals(expected) => self.field.value(employee) == Some(expected),
        }
    }
}

/// Repository for employee record operations.
pub struct EmployeeRepository<'a> {
    storage: &'a DocumentStore,
}

impl<'a> EmployeeRepository<'a> {
    /// Create a new EmployeeRepository.
    pub fn new(storage: &'a DocumentStore) -> Self {
        Self { storage }
    }

    /// Persist a new record and return it.
    pub fn create(&self, new: NewEmployee) -> StorageResult<StoredEmployee> {
        let employee = StoredEmployee::from_new(new);
        self.storage
            .write_json(self.storage.paths().employee(&employee.id), &employee)?;
        Ok(employee)
    }

    /// Get a record by ID.
    pub fn find_by_id(&self, employee_id: &str) -> StorageResult<Option<StoredEmployee>> {
        if !is_document_id(employee_id) {
            return Ok(None);
        }
        self.storage
            .read_json_opt(self.storage.paths().employee(employee_id))
    }

    /// List every record, oldest first.
    pub fn find_all(&self) -> StorageResult<Vec<StoredEmployee>> {
        let ids = self
            .storage
            .list_files(self.storage.paths().employees_dir(), "json")?;

        let mut employees = Vec::with_capacity(ids.len());
        for id in ids {
            // A record deleted between listing and reading is simply skipped.
            if let Some(employee) = self.find_by_id(&id)? {
                employees.push(employee);
            }
        }

        employees.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(employees)
    }

    /// Records matching at least one of `filters`.
    ///
    /// An empty filter list matches nothing.
    pub fn find_by_filter_or(&self, filters: &[FieldMatch<'_>]) -> StorageResult<Vec<StoredEmployee>> {
        Ok(self
            .find_all()?
            .into_iter()
            .filter(|employee| filters.iter().any(|filter| filter.matches(employee)))
            .collect())
    }

    /// Apply a partial update, stamping `updated_at`.
    ///
    /// Returns the post-update record, or `None` if no record has this id.
    pub fn update_by_id(
        &self,
        employee_id: &str,
        patch: EmployeePatch,
    ) -> StorageResult<Option<StoredEmployee>> {
        let Some(mut employee) = self.find_by_id(employee_id)? else {
            return Ok(None);
        };

        employee.apply(patch);
        employee.updated_at = Some(Utc::now());

        self.storage
            .write_json(self.storage.paths().employee(employee_id), &employee)?;
        Ok(Some(employee))
    }

    /// Remove a record, returning what was removed (or `None` if absent).
    pub fn delete_by_id(&self, employee_id: &str) -> StorageResult<Option<StoredEmployee>> {
        let Some(employee) = self.find_by_id(employee_id)? else {
            return Ok(None);
        };

        match self.storage.delete(self.storage.paths().employee(employee_id)) {
            Ok(()) => Ok(Some(employee)),
            // Lost a race with another delete.
            Err(StorageError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
