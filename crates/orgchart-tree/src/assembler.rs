//! Tree assembly and the caching read path
//!
//! [`TreeAssembler`] orchestrates the reader, the deriver, and parent
//! resolution into one flat node list, owns the cache contract, and
//! answers the derived queries from that single cached list.

use crate::derive::{Derived, StructureDeriver};
use crate::reader::PersonnelReader;
use crate::resolve::{resolve_person_parent, resolve_vacancy_parent, ResolutionIndex};
use indexmap::IndexMap;
use orgchart_model::{LevelMap, NodeId, NodeType, UnifiedNode, VacantPositionRecord};
use orgchart_store::{KeyValueCache, MetadataProvider, RowStore, StoreError, DEFAULT_TTL};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Cache key prefix owned by the tree; writes invalidate everything under it
pub const CACHE_PREFIX: &str = "orgtree:";

/// Cache key of the assembled node list
pub const NODES_CACHE_KEY: &str = "orgtree:nodes";

/// Assembler tuning
#[derive(Debug, Clone)]
pub struct TreeConfig {
    /// TTL for the cached node list
    pub cache_ttl: Duration,
    /// Digit→type inference table
    pub level_map: LevelMap,
}

impl TreeConfig {
    /// Default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With cache TTL
    #[inline]
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            cache_ttl: DEFAULT_TTL,
            level_map: LevelMap::default(),
        }
    }
}

/// Summary counts over the assembled tree; the root is excluded from every
/// user-facing figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TreeSummary {
    /// Every node except the root
    pub total_nodes: usize,
    /// Directors, deputies, leads, and persons
    pub people: usize,
    /// Open positions, departed placeholders and never-filled alike
    pub vacancies: usize,
    /// Task structural nodes
    pub tasks: usize,
    /// Team structural nodes
    pub teams: usize,
}

/// Assembles the org tree from its collaborators
///
/// Collaborators are injected at construction; there is no ambient state.
/// The read path is fail-soft: any internal failure is logged and an empty
/// list returned, so one bad join never blanks the UI with an error.
pub struct TreeAssembler {
    store: Arc<dyn RowStore>,
    metadata: Arc<dyn MetadataProvider>,
    cache: KeyValueCache<Arc<Vec<UnifiedNode>>>,
    reader: PersonnelReader,
    deriver: StructureDeriver,
    config: TreeConfig,
}

impl TreeAssembler {
    /// Assembler over the given collaborators
    #[must_use]
    pub fn new(
        store: Arc<dyn RowStore>,
        metadata: Arc<dyn MetadataProvider>,
        cache: KeyValueCache<Arc<Vec<UnifiedNode>>>,
        config: TreeConfig,
    ) -> Self {
        Self {
            store,
            metadata,
            cache,
            reader: PersonnelReader::new(config.level_map.clone()),
            deriver: StructureDeriver,
            config,
        }
    }

    /// The full flat node list, cached
    ///
    /// Idempotent between writes. On a cache miss the tree is rebuilt and
    /// cached for the configured TTL; failures are logged and yield an
    /// empty, uncached list.
    #[must_use]
    pub fn get_all_nodes(&self) -> Arc<Vec<UnifiedNode>> {
        if let Some(nodes) = self.cache.get(NODES_CACHE_KEY) {
            tracing::debug!("org tree served from cache ({} nodes)", nodes.len());
            return nodes;
        }
        match self.build() {
            Ok(nodes) => {
                let nodes = Arc::new(nodes);
                self.cache
                    .set(NODES_CACHE_KEY, Arc::clone(&nodes), self.config.cache_ttl);
                tracing::info!("org tree rebuilt: {} nodes", nodes.len());
                nodes
            }
            Err(e) => {
                tracing::error!("org tree assembly failed, returning empty tree: {e}");
                Arc::new(Vec::new())
            }
        }
    }

    /// Drop every cached read; the next read recomputes
    pub fn invalidate(&self) {
        self.cache.invalidate_prefix(CACHE_PREFIX);
    }

    /// Node by id
    #[must_use]
    pub fn get_node_by_id(&self, id: &NodeId) -> Option<UnifiedNode> {
        self.get_all_nodes().iter().find(|n| &n.id == id).cloned()
    }

    /// Nodes by email, case-insensitive
    #[must_use]
    pub fn get_nodes_by_email(&self, email: &str) -> Vec<UnifiedNode> {
        let needle = email.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.get_all_nodes()
            .iter()
            .filter(|n| {
                n.email
                    .as_deref()
                    .is_some_and(|e| e.to_lowercase() == needle)
            })
            .cloned()
            .collect()
    }

    /// Every task structural node, in derivation order
    #[must_use]
    pub fn tasks(&self) -> Vec<UnifiedNode> {
        self.get_all_nodes()
            .iter()
            .filter(|n| n.node_type == NodeType::Task)
            .cloned()
            .collect()
    }

    /// Task id → emails of that task's management (directors, deputies,
    /// leads with a recorded email)
    #[must_use]
    pub fn management_emails(&self) -> IndexMap<String, Vec<String>> {
        let mut map: IndexMap<String, Vec<String>> = IndexMap::new();
        for node in self.get_all_nodes().iter() {
            if !node.node_type.is_management() {
                continue;
            }
            let (Some(task), Some(email)) = (&node.task, &node.email) else {
                continue;
            };
            map.entry(task.clone()).or_default().push(email.clone());
        }
        map
    }

    /// Summary counts, root excluded
    #[must_use]
    pub fn summary(&self) -> TreeSummary {
        let mut summary = TreeSummary::default();
        for node in self.get_all_nodes().iter() {
            match node.node_type {
                NodeType::Hidden => continue,
                NodeType::Task => summary.tasks += 1,
                NodeType::Team => summary.teams += 1,
                NodeType::Vacant => summary.vacancies += 1,
                NodeType::Director | NodeType::Deputy | NodeType::Lead | NodeType::Person => {
                    summary.people += 1;
                }
            }
            summary.total_nodes += 1;
        }
        summary
    }

    /// One uncached assembly pass
    fn build(&self) -> Result<Vec<UnifiedNode>, StoreError> {
        let personnel = self.reader.try_read_all(self.store.as_ref())?;
        let teams = self.metadata.all_teams()?;
        let task_meta = self.metadata.task_metadata()?;
        let vacancies = self.metadata.all_vacant_positions()?;

        let derived = self.deriver.derive(&personnel, &teams, task_meta);
        let task_ids = derived.task_ids();
        let index = ResolutionIndex::build(&personnel, &teams, &task_ids);

        let Derived {
            task_nodes,
            team_nodes,
            root_node,
            ..
        } = derived;

        let mut nodes =
            Vec::with_capacity(1 + task_nodes.len() + team_nodes.len() + personnel.len());
        nodes.push(root_node);
        nodes.extend(task_nodes);
        nodes.extend(team_nodes);
        for person in &personnel {
            let parent = resolve_person_parent(person, &index);
            nodes.push(UnifiedNode::from_person(person, parent));
        }
        for vacancy in &vacancies {
            let parent = resolve_vacancy_parent(vacancy, &index);
            nodes.push(vacancy_node(vacancy, parent));
        }
        Ok(nodes)
    }
}

impl std::fmt::Debug for TreeAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeAssembler")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Unified node for a never-filled vacancy
fn vacancy_node(vacancy: &VacantPositionRecord, parent: NodeId) -> UnifiedNode {
    let name = if vacancy.title.trim().is_empty() {
        "Vacant Position".to_string()
    } else {
        vacancy.title.trim().to_string()
    };
    let mut node = UnifiedNode::new(
        NodeId::Vacancy(vacancy.id.clone()),
        Some(parent),
        NodeType::Vacant,
        name,
    )
    .with_task(vacancy.task.clone());
    node.team = vacancy.team.clone();
    node.title = if vacancy.title.trim().is_empty() {
        None
    } else {
        Some(vacancy.title.trim().to_string())
    };
    node.target_hire_date = vacancy.target_hire_date.clone();
    node.requirements = if vacancy.requirements.trim().is_empty() {
        None
    } else {
        Some(vacancy.requirements.trim().to_string())
    };
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgchart_store::{CellValue, InMemoryRowStore, SheetMetadataProvider};
    use pretty_assertions::assert_eq;

    fn text_row(cells: &[&str]) -> Vec<CellValue> {
        cells.iter().map(|c| CellValue::from(*c)).collect()
    }

    fn seeded_store() -> Arc<InMemoryRowStore> {
        let store = InMemoryRowStore::new()
            .with_table(
                orgchart_store::stores::PERSONNEL,
                vec![
                    text_row(&[
                        "UPID",
                        "First Name",
                        "Last Name",
                        "Email",
                        "Contract",
                        "Task",
                        "Primary Workstream",
                        "Supervisor UPID",
                        "Personnel Contract Status",
                        "Active in Org",
                    ]),
                    text_row(&[
                        "100-001",
                        "Dana",
                        "Director",
                        "dana@example.test",
                        "SQuAT",
                        "",
                        "",
                        "",
                        "Active",
                        "TRUE",
                    ]),
                    text_row(&[
                        "310-003",
                        "Lee",
                        "Lead",
                        "lee@example.test",
                        "SQuAT",
                        "TASK-001",
                        "Program Management Team",
                        "100-001",
                        "Active",
                        "TRUE",
                    ]),
                    text_row(&[
                        "410-004",
                        "Pat",
                        "Person",
                        "pat@example.test",
                        "SQuAT",
                        "TASK-001",
                        "",
                        "310-003",
                        "Active",
                        "TRUE",
                    ]),
                ],
            )
            .with_table(
                orgchart_store::stores::TEAM_MAPPINGS,
                vec![
                    text_row(&[
                        "Contract",
                        "Task",
                        "Task ID",
                        "Team ID",
                        "Team Name",
                        "Is Active",
                        "Color",
                        "Display Order",
                    ]),
                    text_row(&[
                        "SQuAT",
                        "Modeling",
                        "TASK-001",
                        "TEAM-001",
                        "Program Management Team",
                        "TRUE",
                        "#ff0000",
                        "1",
                    ]),
                ],
            )
            .with_table(
                orgchart_store::stores::TASK_METADATA,
                vec![text_row(&["Task ID", "Name", "Description", "Display Order"])],
            )
            .with_table(
                orgchart_store::stores::VACANT_POSITIONS,
                vec![
                    text_row(&[
                        "Vacancy ID",
                        "Task",
                        "Team",
                        "Supervisor UPID",
                        "Title",
                        "Target Hire Date",
                        "Requirements",
                    ]),
                    text_row(&[
                        "VAC-001-001",
                        "TASK-001",
                        "",
                        "310-003",
                        "Analyst",
                        "2026-10-01",
                        "",
                    ]),
                ],
            );
        Arc::new(store)
    }

    fn assembler_over(store: Arc<InMemoryRowStore>) -> TreeAssembler {
        let metadata = Arc::new(SheetMetadataProvider::new(store.clone()));
        TreeAssembler::new(store, metadata, KeyValueCache::default(), TreeConfig::new())
    }

    #[test]
    fn assembles_root_structurals_people_and_vacancies() {
        let assembler = assembler_over(seeded_store());
        let nodes = assembler.get_all_nodes();

        // root + 1 task + 1 team + 3 people + 1 vacancy
        assert_eq!(nodes.len(), 7);
        assert_eq!(nodes[0].id, NodeId::Root);

        let by_id = |id: &str| {
            nodes
                .iter()
                .find(|n| n.id.to_string() == id)
                .cloned()
                .unwrap()
        };
        // Task hangs off the contract's director
        assert_eq!(
            by_id("task:TASK-001").parent_id.unwrap().to_string(),
            "100-001"
        );
        // Team name match wins for the lead
        assert_eq!(
            by_id("310-003").parent_id.unwrap().to_string(),
            "team:TEAM-001"
        );
        // Same-task supervisor chain for the person
        assert_eq!(by_id("410-004").parent_id.unwrap().to_string(), "310-003");
        // Vacancy follows its supervisor
        assert_eq!(
            by_id("VAC-001-001").parent_id.unwrap().to_string(),
            "310-003"
        );
    }

    #[test]
    fn second_read_is_served_from_cache() {
        let store = seeded_store();
        let assembler = assembler_over(store.clone());

        let first = assembler.get_all_nodes();
        // Mutate the store behind the cache's back; without invalidation
        // the stale list is returned
        store.fail_reads(true);
        let second = assembler.get_all_nodes();
        assert_eq!(first, second);
    }

    #[test]
    fn invalidation_forces_a_rebuild() {
        let store = seeded_store();
        let assembler = assembler_over(store.clone());
        let before = assembler.get_all_nodes().len();

        store
            .append_row(
                orgchart_store::stores::PERSONNEL,
                text_row(&[
                    "410-005",
                    "New",
                    "Hire",
                    "new@example.test",
                    "SQuAT",
                    "TASK-001",
                    "",
                    "310-003",
                    "Active",
                    "TRUE",
                ]),
            )
            .unwrap();
        assembler.invalidate();

        assert_eq!(assembler.get_all_nodes().len(), before + 1);
    }

    #[test]
    fn failures_yield_an_empty_uncached_tree() {
        let store = seeded_store();
        let assembler = assembler_over(store.clone());

        store.fail_reads(true);
        assert!(assembler.get_all_nodes().is_empty());

        // Recovery is immediate because failures are never cached
        store.fail_reads(false);
        assert_eq!(assembler.get_all_nodes().len(), 7);
    }

    #[test]
    fn queries_answer_from_the_single_list() {
        let assembler = assembler_over(seeded_store());

        let lee = assembler
            .get_node_by_id(&"310-003".parse().unwrap())
            .unwrap();
        assert_eq!(lee.name, "Lee Lead");

        let by_email = assembler.get_nodes_by_email("LEE@example.test");
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].id.to_string(), "310-003");

        let tasks = assembler.tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id.to_string(), "task:TASK-001");
    }

    #[test]
    fn management_emails_group_by_task() {
        let assembler = assembler_over(seeded_store());
        let emails = assembler.management_emails();
        // Lee (lead, TASK-001) qualifies; Dana (director) has no task;
        // Pat is not management
        assert_eq!(emails.len(), 1);
        assert_eq!(emails["TASK-001"], vec!["lee@example.test".to_string()]);
    }

    #[test]
    fn summary_excludes_the_root() {
        let assembler = assembler_over(seeded_store());
        let summary = assembler.summary();
        assert_eq!(
            summary,
            TreeSummary {
                total_nodes: 6,
                people: 3,
                vacancies: 1,
                tasks: 1,
                teams: 1,
            }
        );
    }
}
