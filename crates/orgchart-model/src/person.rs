//! Personnel records and lifecycle classification
//!
//! The legacy store encodes four lifecycle states through two independently
//! mutable fields (contract status + an active-in-org flag). This module
//! keeps both fields for store compatibility but routes every decision
//! through the explicit [`RosterVisibility`] table.

use crate::ids::Upid;
use crate::node_type::NodeType;
use serde::{Deserialize, Serialize};

/// Contract lifecycle status of a person
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractStatus {
    /// Employed and working
    Active,
    /// Departure scheduled (legacy label "Pending EOD")
    PendingDeparture,
    /// No longer employed
    Departed,
    /// Unrecognized status text, preserved verbatim
    Other(String),
}

impl ContractStatus {
    /// Parse the status from free text; blank input means active
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "" | "active" => Self::Active,
            "pending eod" | "pending departure" => Self::PendingDeparture,
            "departed" => Self::Departed,
            _ => Self::Other(s.trim().to_string()),
        }
    }

    /// Canonical store label
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Active => "Active",
            Self::PendingDeparture => "Pending EOD",
            Self::Departed => "Departed",
            Self::Other(text) => text,
        }
    }
}

/// How a roster row participates in the derived tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RosterVisibility {
    /// Rendered as the person it describes
    Visible,
    /// Rendered as an open position where the incumbent departed
    VacantPlaceholder,
    /// Not rendered at all
    Excluded,
}

/// Classification table over (status, active-in-org)
///
/// Departed + inactive rows are hard-deleted from the view; departed +
/// active rows become vacancy placeholders; everything else is visible.
#[inline]
#[must_use]
pub fn classify(status: &ContractStatus, active_in_org: bool) -> RosterVisibility {
    match (status, active_in_org) {
        (ContractStatus::Departed, false) => RosterVisibility::Excluded,
        (ContractStatus::Departed, true) => RosterVisibility::VacantPlaceholder,
        _ => RosterVisibility::Visible,
    }
}

/// One employed or departed individual from the roster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonnelRecord {
    /// Stable primary key (`CPC-HID`)
    pub upid: Upid,
    /// Employer-assigned code, opaque here
    pub employee_code: String,
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Work email
    pub email: String,
    /// Position title
    pub title: String,
    /// Back-reference to a supervisor; looked up, never dereferenced eagerly
    pub supervisor_upid: Option<Upid>,
    /// Supervisor's email as recorded on the row
    pub supervisor_email: String,
    /// Inferred or explicit classification
    pub node_type: NodeType,
    /// Employing company
    pub company: String,
    /// Contract the position belongs to
    pub contract: String,
    /// Task assignment, when any
    pub task: Option<String>,
    /// Primary workstream / team name, when any
    pub team: Option<String>,
    /// Secondary workstream
    pub secondary_workstream: String,
    /// Contract lifecycle status
    pub status: ContractStatus,
    /// Whether the position is still active in the org
    pub active_in_org: bool,
    /// Start date, canonical `%Y-%m-%d`
    pub start_date: Option<String>,
}

impl PersonnelRecord {
    /// Minimal record for the given identity; remaining fields default
    #[must_use]
    pub fn new(upid: Upid, node_type: NodeType) -> Self {
        Self {
            upid,
            employee_code: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            title: String::new(),
            supervisor_upid: None,
            supervisor_email: String::new(),
            node_type,
            company: String::new(),
            contract: String::new(),
            task: None,
            team: None,
            secondary_workstream: String::new(),
            status: ContractStatus::Active,
            active_in_org: true,
            start_date: None,
        }
    }

    /// With first and last name
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

    /// With task assignment
    #[inline]
    #[must_use]
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// With primary workstream / team name
    #[inline]
    #[must_use]
    pub fn with_team(mut self, team: impl Into<String>) -> Self {
        self.team = Some(team.into());
        self
    }

    /// With supervisor back-reference
    #[inline]
    #[must_use]
    pub fn with_supervisor(mut self, supervisor: Upid) -> Self {
        self.supervisor_upid = Some(supervisor);
        self
    }

    /// With lifecycle state
    #[inline]
    #[must_use]
    pub fn with_status(mut self, status: ContractStatus, active_in_org: bool) -> Self {
        self.status = status;
        self.active_in_org = active_in_org;
        self
    }

    /// Display name: first + last, space-joined, empty parts dropped
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut name = String::new();
        for part in [self.first_name.trim(), self.last_name.trim()] {
            if part.is_empty() {
                continue;
            }
            if !name.is_empty() {
                name.push(' ');
            }
            name.push_str(part);
        }
        name
    }

    /// Visibility classification for this record
    #[inline]
    #[must_use]
    pub fn visibility(&self) -> RosterVisibility {
        classify(&self.status, self.active_in_org)
    }
}
