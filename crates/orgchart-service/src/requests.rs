//! Write-request payloads
//!
//! Update payloads are lenient by design: absent fields are ignored, and
//! unknown incoming fields are dropped during deserialization rather than
//! rejected.

use orgchart_model::Upid;
use serde::Deserialize;

/// Payload for adding a person; the UPID is assigned by the service
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewPerson {
    /// Contract personnel code (exactly 3 digits)
    pub cpc: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Work email
    pub email: String,
    /// Position title
    pub title: String,
    /// Supervisor back-reference
    pub supervisor_upid: Option<Upid>,
    /// Employing company
    pub company: String,
    /// Owning contract
    pub contract: String,
    /// Task assignment
    pub task: Option<String>,
    /// Primary workstream / team name
    pub team: Option<String>,
    /// Start date (`%Y-%m-%d`)
    pub start_date: Option<String>,
}

impl NewPerson {
    /// Minimal payload
    #[must_use]
    pub fn new(cpc: impl Into<String>) -> Self {
        Self {
            cpc: cpc.into(),
            ..Self::default()
        }
    }

    /// With name
    #[inline]
    #[must_use]
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self
    }

    /// With email
    #[inline]
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// With contract
    #[inline]
    #[must_use]
    pub fn with_contract(mut self, contract: impl Into<String>) -> Self {
        self.contract = contract.into();
        self
    }

    /// With task
    #[inline]
    #[must_use]
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }
}

/// Partial update of a person; `None` fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PersonUpdate {
    /// Given name
    pub first_name: Option<String>,
    /// Family name
    pub last_name: Option<String>,
    /// Work email
    pub email: Option<String>,
    /// Position title
    pub title: Option<String>,
    /// Supervisor back-reference (empty string clears it)
    pub supervisor_upid: Option<String>,
    /// Employing company
    pub company: Option<String>,
    /// Owning contract
    pub contract: Option<String>,
    /// Task assignment
    pub task: Option<String>,
    /// Primary workstream / team name
    pub team: Option<String>,
    /// Secondary workstream
    pub secondary_workstream: Option<String>,
}

impl PersonUpdate {
    /// Empty update
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With email
    #[inline]
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// With task
    #[inline]
    #[must_use]
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// With team
    #[inline]
    #[must_use]
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }
}

/// Payload for creating a team mapping
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewTeam {
    /// Task the team subdivides
    pub task_id: String,
    /// Team display name
    pub team_name: String,
    /// Owning contract
    pub contract: String,
    /// Task name
    pub task: String,
    /// Rendering color
    pub color: String,
    /// UI ordering hint
    pub display_order: u32,
}

impl NewTeam {
    /// Team under a task
    #[must_use]
    pub fn new(task_id: impl Into<String>, team_name: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
            team_name: team_name.into(),
            ..Self::default()
        }
    }
}

/// Partial update of a team mapping
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TeamUpdate {
    /// Team display name
    pub team_name: Option<String>,
    /// Rendering color
    pub color: Option<String>,
    /// UI ordering hint
    pub display_order: Option<u32>,
    /// Active flag
    pub is_active: Option<bool>,
}

/// Payload for creating a never-filled vacancy; the id is assigned by the
/// service
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NewVacancy {
    /// Task the position belongs to
    pub task: String,
    /// Team the position belongs to
    pub team: Option<String>,
    /// Hiring supervisor
    pub supervisor_upid: Option<Upid>,
    /// Position title
    pub title: String,
    /// Target hire date (`%Y-%m-%d`)
    pub target_hire_date: Option<String>,
    /// Role requirements
    pub requirements: String,
}

impl NewVacancy {
    /// Vacancy on a task
    #[must_use]
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            ..Self::default()
        }
    }
}
