//! Orgchart data model
//!
//! Typed identifiers, roster records, taxonomy rows, and the unified
//! output node shared by every crate in the workspace:
//! - UPID/CPC/HID identifiers with bit-exact legacy formatting
//! - Node-type inference configuration (level map, color map)
//! - Lifecycle classification ([`RosterVisibility`]) replacing the legacy
//!   two-field status encoding
//! - [`UnifiedNode`], the single output shape of the derived tree

#![warn(unreachable_pub)]

pub mod ids;
pub mod node_type;
pub mod person;
pub mod team;
pub mod unified;

pub use ids::{
    vacancy_id, Cpc, Hid, IdError, NodeId, Upid, ROOT_ID, TASK_ID_PREFIX, TEAM_ID_PREFIX,
    VACANCY_ID_PREFIX,
};
pub use node_type::{default_colors, LevelMap, NodeType};
pub use person::{classify, ContractStatus, PersonnelRecord, RosterVisibility};
pub use team::{TaskMeta, TeamMapping, VacantPositionRecord};
pub use unified::UnifiedNode;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
