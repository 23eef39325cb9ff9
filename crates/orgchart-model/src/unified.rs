//! The unified output node
//!
//! Every tree node — root, structural, person, vacancy — is normalized to
//! [`UnifiedNode`] before leaving the data layer.

use crate::ids::NodeId;
use crate::node_type::NodeType;
use crate::person::PersonnelRecord;
use serde::{Deserialize, Serialize};

/// One node of the derived org tree, in the shape handed to consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedNode {
    /// Node identifier (UPID, namespaced structural id, or vacancy id)
    pub id: NodeId,
    /// Parent node id; `None` only for the root
    pub parent_id: Option<NodeId>,
    /// Node classification
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Display name
    pub name: String,
    /// Contact email, when any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Position title, when any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Owning contract, when any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract: Option<String>,
    /// Task assignment, when any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,
    /// Team / primary workstream, when any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    /// Rendering color, when any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Supervisor email recorded on the source row
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supervisor_email: Option<String>,
    /// Start date (`%Y-%m-%d`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// Target hire date for never-filled vacancies (`%Y-%m-%d`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_hire_date: Option<String>,
    /// Role requirements for never-filled vacancies
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl UnifiedNode {
    /// Bare node with the given identity; detail fields default to `None`
    #[must_use]
    pub fn new(
        id: NodeId,
        parent_id: Option<NodeId>,
        node_type: NodeType,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            parent_id,
            node_type,
            name: name.into(),
            email: None,
            title: None,
            contract: None,
            task: None,
            team: None,
            color: None,
            supervisor_email: None,
            start_date: None,
            target_hire_date: None,
            requirements: None,
        }
    }

    /// The invisible root node
    #[inline]
    #[must_use]
    pub fn root() -> Self {
        Self::new(NodeId::Root, None, NodeType::Hidden, "")
    }

    /// A person (or departed-vacancy placeholder) under the given parent
    #[must_use]
    pub fn from_person(record: &PersonnelRecord, parent_id: NodeId) -> Self {
        let mut node = Self::new(
            NodeId::Person(record.upid),
            Some(parent_id),
            record.node_type,
            record.display_name(),
        );
        node.email = non_empty(&record.email);
        node.title = non_empty(&record.title);
        node.contract = non_empty(&record.contract);
        node.task = record.task.clone();
        node.team = record.team.clone();
        node.supervisor_email = non_empty(&record.supervisor_email);
        node.start_date = record.start_date.clone();
        node
    }

    /// With rendering color
    #[inline]
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = non_empty(&color.into());
        self
    }

    /// With task assignment
    #[inline]
    #[must_use]
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = non_empty(&task.into());
        self
    }

    /// With contract
    #[inline]
    #[must_use]
    pub fn with_contract(mut self, contract: impl Into<String>) -> Self {
        self.contract = non_empty(&contract.into());
        self
    }
}
