//! Permission gate seam
//!
//! Every write path calls [`PermissionGate::require`] before touching the
//! store; denial aborts the operation with no partial effect.

use crate::row_store::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Gated write actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Append a personnel row
    AddPerson,
    /// Mutate personnel cells
    UpdatePerson,
    /// Soft-delete or depart a person
    DeletePerson,
    /// Create/update/deactivate team mappings
    ManageTeams,
    /// Create/delete never-filled vacancies
    ManageVacancies,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::AddPerson => "add_person",
            Self::UpdatePerson => "update_person",
            Self::DeletePerson => "delete_person",
            Self::ManageTeams => "manage_teams",
            Self::ManageVacancies => "manage_vacancies",
        };
        f.write_str(label)
    }
}

/// Capability check performed before any mutation
pub trait PermissionGate: Send + Sync {
    /// Fail unless the caller may perform `action`
    ///
    /// # Errors
    /// [`StoreError::PermissionDenied`].
    fn require(&self, action: Action) -> Result<(), StoreError>;
}

/// Gate that allows everything; the test double
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl PermissionGate for AllowAll {
    fn require(&self, _action: Action) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Gate allowing an explicit set of actions
#[derive(Debug, Clone, Default)]
pub struct RoleGate {
    allowed: HashSet<Action>,
}

impl RoleGate {
    /// Gate that denies everything
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow one action
    #[inline]
    #[must_use]
    pub fn allow(mut self, action: Action) -> Self {
        self.allowed.insert(action);
        self
    }

    /// Allow every action
    #[must_use]
    pub fn allow_all(mut self) -> Self {
        for action in [
            Action::AddPerson,
            Action::UpdatePerson,
            Action::DeletePerson,
            Action::ManageTeams,
            Action::ManageVacancies,
        ] {
            self.allowed.insert(action);
        }
        self
    }
}

impl PermissionGate for RoleGate {
    fn require(&self, action: Action) -> Result<(), StoreError> {
        if self.allowed.contains(&action) {
            Ok(())
        } else {
            Err(StoreError::PermissionDenied {
                action: action.to_string(),
            })
        }
    }
}
