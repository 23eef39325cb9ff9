//! Structural node derivation
//!
//! Tasks, teams, and the root are synthetic: nothing in the store holds
//! tree pointers for them. They are recomputed on every read from the
//! team-mapping taxonomy plus the tasks observed on personnel records.

use indexmap::{IndexMap, IndexSet};
use orgchart_model::{
    NodeId, NodeType, PersonnelRecord, TaskMeta, TeamMapping, UnifiedNode, Upid,
};

/// Output of structural derivation
#[derive(Debug, Clone)]
pub struct Derived {
    /// One node per task in the universe
    pub task_nodes: Vec<UnifiedNode>,
    /// One node per active team mapping
    pub team_nodes: Vec<UnifiedNode>,
    /// The invisible root, always present
    pub root_node: UnifiedNode,
    /// Task display metadata, keyed by task id
    pub task_meta: IndexMap<String, TaskMeta>,
}

impl Derived {
    /// Ids of every derived task node
    #[must_use]
    pub fn task_ids(&self) -> IndexSet<String> {
        self.task_nodes
            .iter()
            .filter_map(|n| match &n.id {
                NodeId::Task(id) => Some(id.clone()),
                _ => None,
            })
            .collect()
    }
}

/// Derives the structural layer of the tree
#[derive(Debug, Clone, Copy, Default)]
pub struct StructureDeriver;

impl StructureDeriver {
    /// Compute task nodes, team nodes, and the root
    ///
    /// The task universe is the union of task ids on active mappings and
    /// task ids observed on personnel (covering contracts that use flat
    /// workstreams with no team subdivisions). Teams come from active
    /// mappings only — never inferred from personnel.
    #[must_use]
    pub fn derive(
        &self,
        personnel: &[PersonnelRecord],
        teams: &[TeamMapping],
        task_meta: IndexMap<String, TaskMeta>,
    ) -> Derived {
        let directors = contract_directors(personnel);

        // Task universe, mappings first so taxonomy ordering leads
        let mut task_ids: IndexSet<String> = IndexSet::new();
        let mut task_contracts: IndexMap<String, String> = IndexMap::new();
        for team in teams.iter().filter(|t| t.is_active) {
            task_ids.insert(team.task_id.clone());
            if !team.contract.is_empty() {
                task_contracts
                    .entry(team.task_id.clone())
                    .or_insert_with(|| team.contract.clone());
            }
        }
        for person in personnel {
            if let Some(task) = &person.task {
                task_ids.insert(task.clone());
                if !person.contract.is_empty() {
                    task_contracts
                        .entry(task.clone())
                        .or_insert_with(|| person.contract.clone());
                }
            }
        }

        let task_nodes = task_ids
            .iter()
            .map(|task_id| {
                let parent = task_contracts
                    .get(task_id)
                    .and_then(|contract| directors.get(contract))
                    .map_or(NodeId::Root, |upid| NodeId::Person(*upid));
                let name = task_meta
                    .get(task_id)
                    .map_or_else(|| task_id.clone(), |m| m.name.clone());
                let mut node =
                    UnifiedNode::new(NodeId::task(task_id), Some(parent), NodeType::Task, name);
                node.task = Some(task_id.clone());
                node.contract = task_contracts.get(task_id).cloned();
                node
            })
            .collect();

        let mut seen_teams: IndexSet<&str> = IndexSet::new();
        let mut team_nodes = Vec::new();
        for team in teams.iter().filter(|t| t.is_active) {
            if !seen_teams.insert(team.team_id.as_str()) {
                continue;
            }
            let mut node = UnifiedNode::new(
                NodeId::team(&team.team_id),
                Some(NodeId::task(&team.task_id)),
                NodeType::Team,
                team.team_name.clone(),
            )
            .with_color(team.color.clone());
            node.task = Some(team.task_id.clone());
            node.team = Some(team.team_name.clone());
            node.contract = if team.contract.is_empty() {
                None
            } else {
                Some(team.contract.clone())
            };
            team_nodes.push(node);
        }

        Derived {
            task_nodes,
            team_nodes,
            root_node: UnifiedNode::root(),
            task_meta,
        }
    }
}

/// Contract → director UPID, last record in input order winning when a
/// contract has several directors
fn contract_directors(personnel: &[PersonnelRecord]) -> IndexMap<String, Upid> {
    let mut directors = IndexMap::new();
    for person in personnel {
        if person.node_type == NodeType::Director && !person.contract.is_empty() {
            directors.insert(person.contract.clone(), person.upid);
        }
    }
    directors
}
