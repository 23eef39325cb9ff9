//! Identifier types for the org tree
//!
//! Personnel are keyed by UPID (`CPC-HID`, two zero-padded 3-digit
//! groups). Structural nodes use namespaced synthetic ids (`task:<id>`,
//! `team:<id>`, the literal root id) so they can never collide with a
//! UPID. Never-filled vacancies carry `VAC-` prefixed ids.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The reserved id of the invisible root node
pub const ROOT_ID: &str = "root";

/// Prefix for task structural node ids
pub const TASK_ID_PREFIX: &str = "task:";

/// Prefix for team structural node ids
pub const TEAM_ID_PREFIX: &str = "team:";

/// Prefix for never-filled vacancy ids
pub const VACANCY_ID_PREFIX: &str = "VAC-";

/// Identifier parsing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// CPC is not exactly 3 digits
    #[error("CPC must be exactly 3 digits, got {0:?}")]
    InvalidCpc(String),

    /// HID is not exactly 3 digits
    #[error("HID must be exactly 3 digits, got {0:?}")]
    InvalidHid(String),

    /// UPID is not `CPC-HID`
    #[error("UPID must be formatted as CPC-HID, got {0:?}")]
    InvalidUpid(String),

    /// Node id matches no known namespace
    #[error("unrecognized node id {0:?}")]
    InvalidNodeId(String),
}

fn three_digits(s: &str) -> Option<[u8; 3]> {
    let bytes = s.as_bytes();
    if bytes.len() == 3 && bytes.iter().all(u8::is_ascii_digit) {
        Some([bytes[0], bytes[1], bytes[2]])
    } else {
        None
    }
}

/// Contract Personnel Code: exactly 3 digits
///
/// The leading digit encodes the hierarchical level (see
/// [`LevelMap`](crate::node_type::LevelMap)); the remaining digits encode
/// task and role and are opaque to this layer.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cpc([u8; 3]);

impl Cpc {
    /// Parse a CPC from text
    ///
    /// # Errors
    /// Returns [`IdError::InvalidCpc`] unless the input is exactly 3
    /// ASCII digits after trimming.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        three_digits(s.trim())
            .map(Self)
            .ok_or_else(|| IdError::InvalidCpc(s.to_string()))
    }

    /// The leading digit, which signals hierarchical level
    #[inline]
    #[must_use]
    pub fn level_digit(&self) -> u8 {
        self.0[0] - b'0'
    }
}

impl fmt::Display for Cpc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Always valid ASCII digits by construction
        f.write_str(std::str::from_utf8(&self.0).unwrap_or("???"))
    }
}

impl fmt::Debug for Cpc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cpc({self})")
    }
}

impl FromStr for Cpc {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Cpc {
    type Error = IdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Cpc> for String {
    fn from(cpc: Cpc) -> Self {
        cpc.to_string()
    }
}

/// Hierarchy Identifier: 3-digit sequential suffix disambiguating UPIDs
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Hid([u8; 3]);

impl Hid {
    /// Parse an HID from text
    ///
    /// # Errors
    /// Returns [`IdError::InvalidHid`] unless the input is exactly 3
    /// ASCII digits after trimming.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        three_digits(s.trim())
            .map(Self)
            .ok_or_else(|| IdError::InvalidHid(s.to_string()))
    }

    /// Build an HID from a sequence number, zero-padded to 3 digits
    ///
    /// # Errors
    /// Returns [`IdError::InvalidHid`] when the sequence exceeds 999.
    pub fn from_sequence(seq: u32) -> Result<Self, IdError> {
        if seq > 999 {
            return Err(IdError::InvalidHid(seq.to_string()));
        }
        Self::parse(&format!("{seq:03}"))
    }

    /// Numeric value of the sequence
    #[inline]
    #[must_use]
    pub fn sequence(&self) -> u32 {
        self.0
            .iter()
            .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
    }
}

impl fmt::Display for Hid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(std::str::from_utf8(&self.0).unwrap_or("???"))
    }
}

impl fmt::Debug for Hid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hid({self})")
    }
}

impl FromStr for Hid {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Hid {
    type Error = IdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Hid> for String {
    fn from(hid: Hid) -> Self {
        hid.to_string()
    }
}

/// Unique Personnel ID: `CPC-HID`, stable for a person across their tenure
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Upid {
    /// Contract personnel code
    pub cpc: Cpc,
    /// Sequential suffix
    pub hid: Hid,
}

impl Upid {
    /// Compose a UPID from its parts
    #[inline]
    #[must_use]
    pub fn new(cpc: Cpc, hid: Hid) -> Self {
        Self { cpc, hid }
    }

    /// Parse a UPID from `CPC-HID` text
    ///
    /// # Errors
    /// Returns [`IdError::InvalidUpid`] when the shape is wrong, or the
    /// component error when a group fails to parse.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        let trimmed = s.trim();
        let (cpc, hid) = trimmed
            .split_once('-')
            .ok_or_else(|| IdError::InvalidUpid(s.to_string()))?;
        Ok(Self {
            cpc: Cpc::parse(cpc)?,
            hid: Hid::parse(hid)?,
        })
    }
}

impl fmt::Display for Upid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.cpc, self.hid)
    }
}

impl FromStr for Upid {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Upid {
    type Error = IdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<Upid> for String {
    fn from(upid: Upid) -> Self {
        upid.to_string()
    }
}

/// Identifier of any node in the derived tree
///
/// Serialized as the plain string form so downstream consumers see the
/// same ids the legacy system emitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NodeId {
    /// The single invisible root
    Root,
    /// Synthetic task grouping node
    Task(String),
    /// Synthetic team grouping node
    Team(String),
    /// A person, keyed by UPID
    Person(Upid),
    /// A never-filled vacancy (`VAC-…`)
    Vacancy(String),
}

impl NodeId {
    /// Build the task node id for a task id
    #[inline]
    #[must_use]
    pub fn task(task_id: impl Into<String>) -> Self {
        Self::Task(task_id.into())
    }

    /// Build the team node id for a team id
    #[inline]
    #[must_use]
    pub fn team(team_id: impl Into<String>) -> Self {
        Self::Team(team_id.into())
    }

    /// True for the root id
    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        matches!(self, Self::Root)
    }

    /// The UPID when this id names a person
    #[inline]
    #[must_use]
    pub fn as_person(&self) -> Option<&Upid> {
        match self {
            Self::Person(upid) => Some(upid),
            _ => None,
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str(ROOT_ID),
            Self::Task(id) => write!(f, "{TASK_ID_PREFIX}{id}"),
            Self::Team(id) => write!(f, "{TEAM_ID_PREFIX}{id}"),
            Self::Person(upid) => write!(f, "{upid}"),
            Self::Vacancy(id) => f.write_str(id),
        }
    }
}

impl FromStr for NodeId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed == ROOT_ID {
            return Ok(Self::Root);
        }
        if let Some(task_id) = trimmed.strip_prefix(TASK_ID_PREFIX) {
            return Ok(Self::Task(task_id.to_string()));
        }
        if let Some(team_id) = trimmed.strip_prefix(TEAM_ID_PREFIX) {
            return Ok(Self::Team(team_id.to_string()));
        }
        if trimmed.starts_with(VACANCY_ID_PREFIX) {
            return Ok(Self::Vacancy(trimmed.to_string()));
        }
        Upid::parse(trimmed)
            .map(Self::Person)
            .map_err(|_| IdError::InvalidNodeId(s.to_string()))
    }
}

impl TryFrom<String> for NodeId {
    type Error = IdError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<NodeId> for String {
    fn from(id: NodeId) -> Self {
        id.to_string()
    }
}

impl From<Upid> for NodeId {
    fn from(upid: Upid) -> Self {
        Self::Person(upid)
    }
}

/// Compose a never-filled vacancy id: `VAC-<taskSuffix>-<sequence>`
///
/// `task_suffix` is the trailing segment of the task id (`TASK-003` →
/// `003`); the sequence is zero-padded to 3 digits.
#[inline]
#[must_use]
pub fn vacancy_id(task_id: &str, sequence: u32) -> String {
    let suffix = task_id.rsplit('-').next().unwrap_or(task_id);
    format!("{VACANCY_ID_PREFIX}{suffix}-{sequence:03}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn upid_round_trip() {
        let upid = Upid::parse("310-003").unwrap();
        assert_eq!(upid.cpc.level_digit(), 3);
        assert_eq!(upid.hid.sequence(), 3);
        assert_eq!(upid.to_string(), "310-003");
    }

    #[test]
    fn upid_rejects_malformed_input() {
        assert!(Upid::parse("31-003").is_err());
        assert!(Upid::parse("3100-03").is_err());
        assert!(Upid::parse("abc-def").is_err());
        assert!(Upid::parse("310003").is_err());
    }

    #[test]
    fn upid_parse_trims_whitespace() {
        assert_eq!(Upid::parse(" 100-001 ").unwrap().to_string(), "100-001");
    }

    #[test]
    fn hid_from_sequence_zero_pads() {
        assert_eq!(Hid::from_sequence(7).unwrap().to_string(), "007");
        assert_eq!(Hid::from_sequence(42).unwrap().to_string(), "042");
        assert!(Hid::from_sequence(1000).is_err());
    }

    #[test]
    fn node_id_display_and_parse() {
        let cases = [
            (NodeId::Root, "root"),
            (NodeId::task("TASK-001"), "task:TASK-001"),
            (NodeId::team("TEAM-002"), "team:TEAM-002"),
            (NodeId::Person(Upid::parse("100-001").unwrap()), "100-001"),
            (NodeId::Vacancy("VAC-003-001".to_string()), "VAC-003-001"),
        ];
        for (id, text) in cases {
            assert_eq!(id.to_string(), text);
            assert_eq!(text.parse::<NodeId>().unwrap(), id);
        }
    }

    #[test]
    fn node_id_rejects_unknown_shapes() {
        assert!("banana".parse::<NodeId>().is_err());
        assert!("task".parse::<NodeId>().is_err());
    }

    #[test]
    fn structural_ids_never_collide_with_upids() {
        // A namespaced id can never parse as a UPID
        assert!(Upid::parse(&NodeId::task("TASK-001").to_string()).is_err());
        assert!(Upid::parse(ROOT_ID).is_err());
        assert!(Upid::parse(&vacancy_id("TASK-003", 1)).is_err());
    }

    #[test]
    fn vacancy_id_uses_task_suffix() {
        assert_eq!(vacancy_id("TASK-003", 1), "VAC-003-001");
        assert_eq!(vacancy_id("FLAT", 12), "VAC-FLAT-012");
    }

    #[test]
    fn serde_uses_plain_strings() {
        let upid = Upid::parse("310-003").unwrap();
        assert_eq!(serde_json::to_string(&upid).unwrap(), "\"310-003\"");

        let id: NodeId = serde_json::from_str("\"team:TEAM-001\"").unwrap();
        assert_eq!(id, NodeId::team("TEAM-001"));
    }
}
