//! Node-type classification and rendering configuration
//!
//! People carry a [`NodeType`] inferred from the leading CPC digit via a
//! configurable [`LevelMap`]; structural nodes use the task/team/hidden
//! variants.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Classification of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    /// Portfolio or contract director
    Director,
    /// Deputy director
    Deputy,
    /// Team or task lead
    Lead,
    /// Individual contributor
    Person,
    /// Open position (departed incumbent or never filled)
    Vacant,
    /// Synthetic task grouping node
    Task,
    /// Synthetic team grouping node
    Team,
    /// The invisible root
    Hidden,
}

impl NodeType {
    /// Parse a node type from free text, lowercased and trimmed
    #[must_use]
    pub fn parse_lenient(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "director" => Some(Self::Director),
            "deputy" => Some(Self::Deputy),
            "lead" => Some(Self::Lead),
            "person" => Some(Self::Person),
            "vacant" => Some(Self::Vacant),
            "task" => Some(Self::Task),
            "team" => Some(Self::Team),
            "hidden" => Some(Self::Hidden),
            _ => None,
        }
    }

    /// True for types that sit at the top of the hierarchy
    ///
    /// Directors and deputies always hang off the root; their supervisor
    /// links are ignored during parent resolution.
    #[inline]
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        matches!(self, Self::Director | Self::Deputy)
    }

    /// True for types counted as management when building the per-task
    /// management-email map
    #[inline]
    #[must_use]
    pub fn is_management(&self) -> bool {
        matches!(self, Self::Director | Self::Deputy | Self::Lead)
    }

    /// Lowercase label, matching the serialized form
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Director => "director",
            Self::Deputy => "deputy",
            Self::Lead => "lead",
            Self::Person => "person",
            Self::Vacant => "vacant",
            Self::Task => "task",
            Self::Team => "team",
            Self::Hidden => "hidden",
        }
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Mapping from the leading CPC digit to a node type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelMap {
    levels: IndexMap<u8, NodeType>,
}

impl LevelMap {
    /// Node type for a leading digit, defaulting to [`NodeType::Person`]
    #[inline]
    #[must_use]
    pub fn for_digit(&self, digit: u8) -> NodeType {
        self.levels.get(&digit).copied().unwrap_or(NodeType::Person)
    }

    /// Override the type for a digit
    #[inline]
    #[must_use]
    pub fn with_level(mut self, digit: u8, node_type: NodeType) -> Self {
        self.levels.insert(digit, node_type);
        self
    }
}

impl Default for LevelMap {
    fn default() -> Self {
        let mut levels = IndexMap::new();
        levels.insert(1, NodeType::Director);
        levels.insert(2, NodeType::Deputy);
        levels.insert(3, NodeType::Lead);
        levels.insert(4, NodeType::Person);
        Self { levels }
    }
}

/// Default rendering colors per node type, keyed for the UI layer
#[must_use]
pub fn default_colors() -> IndexMap<NodeType, &'static str> {
    let mut colors = IndexMap::new();
    colors.insert(NodeType::Director, "#1a73e8");
    colors.insert(NodeType::Deputy, "#4285f4");
    colors.insert(NodeType::Lead, "#34a853");
    colors.insert(NodeType::Person, "#5f6368");
    colors.insert(NodeType::Vacant, "#ea4335");
    colors.insert(NodeType::Task, "#f9ab00");
    colors.insert(NodeType::Team, "#fbbc04");
    colors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lenient_trims_and_lowercases() {
        assert_eq!(NodeType::parse_lenient(" Director "), Some(NodeType::Director));
        assert_eq!(NodeType::parse_lenient("LEAD"), Some(NodeType::Lead));
        assert_eq!(NodeType::parse_lenient("manager"), None);
        assert_eq!(NodeType::parse_lenient(""), None);
    }

    #[test]
    fn level_map_defaults() {
        let map = LevelMap::default();
        assert_eq!(map.for_digit(1), NodeType::Director);
        assert_eq!(map.for_digit(2), NodeType::Deputy);
        assert_eq!(map.for_digit(3), NodeType::Lead);
        assert_eq!(map.for_digit(4), NodeType::Person);
        // Unmapped digits fall back to person
        assert_eq!(map.for_digit(9), NodeType::Person);
    }

    #[test]
    fn level_map_override() {
        let map = LevelMap::default().with_level(5, NodeType::Lead);
        assert_eq!(map.for_digit(5), NodeType::Lead);
    }

    #[test]
    fn serialized_form_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&NodeType::Director).unwrap(),
            "\"director\""
        );
    }
}
