//! Team/task taxonomy records and never-filled vacancies

use crate::ids::Upid;
use serde::{Deserialize, Serialize};

/// One row of the team-mapping taxonomy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMapping {
    /// Owning contract
    pub contract: String,
    /// Task the team subdivides
    pub task: String,
    /// Task identifier (e.g. `TASK-001`)
    pub task_id: String,
    /// Team identifier (e.g. `TEAM-001`)
    pub team_id: String,
    /// Human-readable team name, matched against personnel workstreams
    pub team_name: String,
    /// Inactive mappings are ignored during derivation
    pub is_active: bool,
    /// Rendering color
    pub color: String,
    /// UI ordering hint
    pub display_order: u32,
}

impl TeamMapping {
    /// Active mapping with the given identity
    #[must_use]
    pub fn new(
        task_id: impl Into<String>,
        team_id: impl Into<String>,
        team_name: impl Into<String>,
    ) -> Self {
        Self {
            contract: String::new(),
            task: String::new(),
            task_id: task_id.into(),
            team_id: team_id.into(),
            team_name: team_name.into(),
            is_active: true,
            color: String::new(),
            display_order: 0,
        }
    }

    /// With owning contract
    #[inline]
    #[must_use]
    pub fn with_contract(mut self, contract: impl Into<String>) -> Self {
        self.contract = contract.into();
        self
    }

    /// Mark inactive
    #[inline]
    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Display metadata for a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskMeta {
    /// Task identifier
    pub task_id: String,
    /// Human-readable name; falls back to the id when blank
    pub name: String,
    /// Free-form description
    pub description: String,
    /// UI ordering hint
    pub display_order: u32,
}

impl TaskMeta {
    /// Metadata naming a task after its id
    #[must_use]
    pub fn for_id(task_id: impl Into<String>) -> Self {
        let task_id = task_id.into();
        Self {
            name: task_id.clone(),
            task_id,
            description: String::new(),
            display_order: 0,
        }
    }
}

/// An unfilled position that never had an incumbent
///
/// Distinct from a departed-employee vacancy, which is a
/// [`PersonnelRecord`](crate::person::PersonnelRecord) whose visibility
/// classifies as a placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VacantPositionRecord {
    /// Namespaced id (`VAC-<taskSuffix>-<sequence>`)
    pub id: String,
    /// Task the position belongs to
    pub task: String,
    /// Team the position belongs to, when any
    pub team: Option<String>,
    /// Hiring supervisor, when known
    pub supervisor_upid: Option<Upid>,
    /// Position title
    pub title: String,
    /// Target hire date, canonical `%Y-%m-%d`
    pub target_hire_date: Option<String>,
    /// Role requirements, free-form
    pub requirements: String,
}

impl VacantPositionRecord {
    /// Vacancy with the given id and task
    #[must_use]
    pub fn new(id: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            task: task.into(),
            team: None,
            supervisor_upid: None,
            title: String::new(),
            target_hire_date: None,
            requirements: String::new(),
        }
    }

    /// With team
    #[inline]
    #[must_use]
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// With hiring supervisor
    #[inline]
    #[must_use]
    pub fn with_supervisor(mut self, supervisor: Upid) -> Self {
        self.supervisor_upid = Some(supervisor);
        self
    }

    /// With title
    #[inline]
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}
