//! Parent resolution
//!
//! Pure rule cascades placing each person and vacancy under exactly one
//! existing node. Every branch lands on a supervisor, a structural node,
//! or the root, and at most one supervisor hop is ever taken, so the
//! result is connected and acyclic by construction.

use indexmap::IndexSet;
use orgchart_model::{NodeId, PersonnelRecord, TeamMapping, Upid, VacantPositionRecord};
use std::collections::{HashMap, HashSet};

/// Lookup indices built once per assembly for O(1) resolution
#[derive(Debug)]
pub struct ResolutionIndex<'a> {
    upids: HashMap<Upid, &'a PersonnelRecord>,
    /// (task id, lowercased team name) → team id, active mappings only
    teams_by_name: HashMap<(String, String), String>,
    team_ids: HashSet<String>,
    task_ids: HashSet<String>,
}

impl<'a> ResolutionIndex<'a> {
    /// Build from the renderable roster, the taxonomy, and the derived
    /// task universe
    #[must_use]
    pub fn build(
        personnel: &'a [PersonnelRecord],
        teams: &[TeamMapping],
        task_ids: &IndexSet<String>,
    ) -> Self {
        let upids = personnel.iter().map(|p| (p.upid, p)).collect();

        let mut teams_by_name = HashMap::new();
        let mut team_ids = HashSet::new();
        for team in teams.iter().filter(|t| t.is_active) {
            team_ids.insert(team.team_id.clone());
            teams_by_name
                .entry((team.task_id.clone(), team.team_name.trim().to_lowercase()))
                .or_insert_with(|| team.team_id.clone());
        }

        Self {
            upids,
            teams_by_name,
            team_ids,
            task_ids: task_ids.iter().cloned().collect(),
        }
    }

    /// Record for a UPID, when it is part of the renderable roster
    #[must_use]
    pub fn person(&self, upid: &Upid) -> Option<&'a PersonnelRecord> {
        self.upids.get(upid).copied()
    }

    /// Team id for a team name within a task
    #[must_use]
    pub fn team_in_task(&self, task_id: &str, team_name: &str) -> Option<&str> {
        self.teams_by_name
            .get(&(task_id.to_string(), team_name.trim().to_lowercase()))
            .map(String::as_str)
    }

    /// Whether a team node with this id exists
    #[must_use]
    pub fn has_team(&self, team_id: &str) -> bool {
        self.team_ids.contains(team_id)
    }

    /// Whether a task node with this id exists
    #[must_use]
    pub fn has_task(&self, task_id: &str) -> bool {
        self.task_ids.contains(task_id)
    }
}

/// Parent node for a person (or departed-vacancy placeholder)
///
/// Cascade, first match wins:
/// 1. directors and deputies hang off the root, supervisor links ignored;
/// 2. with a task: a matching active team name in the same task, else a
///    supervisor on the same task, else the task node (cross-task
///    supervision is deliberately not honored inside a task);
/// 3. without a task: any resolving supervisor;
/// 4. the root.
#[must_use]
pub fn resolve_person_parent(person: &PersonnelRecord, index: &ResolutionIndex<'_>) -> NodeId {
    if person.node_type.is_top_level() {
        return NodeId::Root;
    }

    if let Some(task) = person.task.as_deref() {
        if let Some(team_name) = person.team.as_deref() {
            if let Some(team_id) = index.team_in_task(task, team_name) {
                return NodeId::team(team_id);
            }
        }
        if let Some(supervisor) = &person.supervisor_upid {
            // A row listing itself as supervisor must not become its own
            // parent
            if supervisor != &person.upid {
                if let Some(record) = index.person(supervisor) {
                    if record.task.as_deref() == Some(task) {
                        return NodeId::Person(*supervisor);
                    }
                }
            }
        }
        if index.has_task(task) {
            return NodeId::task(task);
        }
        // Task universe includes every personnel task, so this is only
        // reachable when resolving against a foreign index
        return NodeId::Root;
    }

    if let Some(supervisor) = &person.supervisor_upid {
        if supervisor != &person.upid && index.person(supervisor).is_some() {
            return NodeId::Person(*supervisor);
        }
    }

    NodeId::Root
}

/// Parent node for a never-filled vacancy
///
/// Supervisor if it resolves; else the team node (matched by name within
/// the vacancy's task, or directly by team id); else the task node; else
/// the root.
#[must_use]
pub fn resolve_vacancy_parent(
    vacancy: &VacantPositionRecord,
    index: &ResolutionIndex<'_>,
) -> NodeId {
    if let Some(supervisor) = &vacancy.supervisor_upid {
        if index.person(supervisor).is_some() {
            return NodeId::Person(*supervisor);
        }
    }

    if let Some(team) = vacancy.team.as_deref() {
        if let Some(team_id) = index.team_in_task(&vacancy.task, team) {
            return NodeId::team(team_id);
        }
        if index.has_team(team) {
            return NodeId::team(team);
        }
    }

    if index.has_task(&vacancy.task) {
        return NodeId::task(&vacancy.task);
    }

    NodeId::Root
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgchart_model::{ContractStatus, NodeType};
    use pretty_assertions::assert_eq;

    fn upid(s: &str) -> Upid {
        s.parse().unwrap()
    }

    fn index_for<'a>(
        personnel: &'a [PersonnelRecord],
        teams: &[TeamMapping],
    ) -> ResolutionIndex<'a> {
        // Same universe the assembler derives: mapping tasks + person tasks
        let mut task_ids: IndexSet<String> = teams
            .iter()
            .filter(|t| t.is_active)
            .map(|t| t.task_id.clone())
            .collect();
        for p in personnel {
            if let Some(task) = &p.task {
                task_ids.insert(task.clone());
            }
        }
        ResolutionIndex::build(personnel, teams, &task_ids)
    }

    #[test]
    fn team_name_match_beats_supervisor() {
        let supervisor = PersonnelRecord::new(upid("100-001"), NodeType::Director)
            .with_contract("SQuAT")
            .with_task("TASK-001");
        let person = PersonnelRecord::new(upid("310-003"), NodeType::Lead)
            .with_task("TASK-001")
            .with_team("Program Management Team")
            .with_supervisor(upid("100-001"));
        let personnel = vec![supervisor, person.clone()];
        let teams = vec![TeamMapping::new(
            "TASK-001",
            "TEAM-001",
            "Program Management Team",
        )];

        let parent = resolve_person_parent(&person, &index_for(&personnel, &teams));
        assert_eq!(parent, NodeId::team("TEAM-001"));
    }

    #[test]
    fn cross_task_supervisor_falls_to_task_node() {
        // Team inactive, supervisor on a different task: falls through to
        // the task node
        let supervisor = PersonnelRecord::new(upid("100-001"), NodeType::Lead)
            .with_task("TASK-002");
        let person = PersonnelRecord::new(upid("310-003"), NodeType::Lead)
            .with_task("TASK-001")
            .with_team("Program Management Team")
            .with_supervisor(upid("100-001"));
        let personnel = vec![supervisor, person.clone()];
        let teams = vec![TeamMapping::new(
            "TASK-001",
            "TEAM-001",
            "Program Management Team",
        )
        .inactive()];

        let parent = resolve_person_parent(&person, &index_for(&personnel, &teams));
        assert_eq!(parent, NodeId::task("TASK-001"));
    }

    #[test]
    fn directors_always_hang_off_root() {
        let other = PersonnelRecord::new(upid("100-002"), NodeType::Director);
        let director = PersonnelRecord::new(upid("100-001"), NodeType::Director)
            .with_contract("SQuAT")
            .with_task("TASK-001")
            .with_supervisor(upid("100-002"));
        let personnel = vec![other, director.clone()];

        let parent = resolve_person_parent(&director, &index_for(&personnel, &[]));
        assert_eq!(parent, NodeId::Root);
    }

    #[test]
    fn deputies_also_hang_off_root() {
        let deputy = PersonnelRecord::new(upid("200-001"), NodeType::Deputy).with_task("TASK-001");
        let personnel = vec![deputy.clone()];
        let parent = resolve_person_parent(&deputy, &index_for(&personnel, &[]));
        assert_eq!(parent, NodeId::Root);
    }

    #[test]
    fn same_task_supervisor_wins_when_no_team_matches() {
        let supervisor = PersonnelRecord::new(upid("310-001"), NodeType::Lead)
            .with_task("TASK-001");
        let person = PersonnelRecord::new(upid("410-002"), NodeType::Person)
            .with_task("TASK-001")
            .with_supervisor(upid("310-001"));
        let personnel = vec![supervisor, person.clone()];

        let parent = resolve_person_parent(&person, &index_for(&personnel, &[]));
        assert_eq!(parent, NodeId::Person(upid("310-001")));
    }

    #[test]
    fn taskless_person_follows_any_resolving_supervisor() {
        let supervisor = PersonnelRecord::new(upid("310-001"), NodeType::Lead)
            .with_task("TASK-009");
        let person = PersonnelRecord::new(upid("410-002"), NodeType::Person)
            .with_supervisor(upid("310-001"));
        let personnel = vec![supervisor, person.clone()];

        let parent = resolve_person_parent(&person, &index_for(&personnel, &[]));
        assert_eq!(parent, NodeId::Person(upid("310-001")));
    }

    #[test]
    fn taskless_person_with_dangling_supervisor_falls_to_root() {
        let person = PersonnelRecord::new(upid("410-002"), NodeType::Person)
            .with_supervisor(upid("310-099"));
        let personnel = vec![person.clone()];

        let parent = resolve_person_parent(&person, &index_for(&personnel, &[]));
        assert_eq!(parent, NodeId::Root);
    }

    #[test]
    fn departed_placeholder_resolves_via_original_team() {
        // Vacant placeholder keeps its task/team; the cascade still places
        // it where the departed employee sat
        let placeholder = PersonnelRecord::new(upid("410-007"), NodeType::Vacant)
            .with_task("TASK-001")
            .with_team("Program Management Team")
            .with_status(ContractStatus::Departed, true);
        let personnel = vec![placeholder.clone()];
        let teams = vec![TeamMapping::new(
            "TASK-001",
            "TEAM-001",
            "Program Management Team",
        )];

        let parent = resolve_person_parent(&placeholder, &index_for(&personnel, &teams));
        assert_eq!(parent, NodeId::team("TEAM-001"));
    }

    #[test]
    fn vacancy_supervisor_resolves() {
        let supervisor = PersonnelRecord::new(upid("330-012"), NodeType::Lead)
            .with_task("TASK-003");
        let personnel = vec![supervisor];
        let vacancy = VacantPositionRecord::new("VAC-003-001", "TASK-003")
            .with_supervisor(upid("330-012"));

        let parent = resolve_vacancy_parent(&vacancy, &index_for(&personnel, &[]));
        assert_eq!(parent, NodeId::Person(upid("330-012")));
    }

    #[test]
    fn vacancy_cascade_team_then_task_then_root() {
        let teams = vec![TeamMapping::new("TASK-003", "TEAM-009", "Analysis")];
        let index = index_for(&[], &teams);

        let with_team = VacantPositionRecord::new("VAC-003-001", "TASK-003").with_team("Analysis");
        assert_eq!(resolve_vacancy_parent(&with_team, &index), NodeId::team("TEAM-009"));

        let with_task = VacantPositionRecord::new("VAC-003-002", "TASK-003");
        assert_eq!(resolve_vacancy_parent(&with_task, &index), NodeId::task("TASK-003"));

        let orphan = VacantPositionRecord::new("VAC-999-001", "TASK-999");
        assert_eq!(resolve_vacancy_parent(&orphan, &index), NodeId::Root);
    }

    #[test]
    fn vacancy_team_matches_by_id_as_fallback() {
        let teams = vec![TeamMapping::new("TASK-003", "TEAM-009", "Analysis")];
        let index = index_for(&[], &teams);
        let vacancy = VacantPositionRecord::new("VAC-003-003", "TASK-003").with_team("TEAM-009");
        assert_eq!(resolve_vacancy_parent(&vacancy, &index), NodeId::team("TEAM-009"));
    }

    #[test]
    fn self_supervision_never_becomes_self_parent() {
        let person = PersonnelRecord::new(upid("410-002"), NodeType::Person)
            .with_task("TASK-001")
            .with_supervisor(upid("410-002"));
        let personnel = vec![person.clone()];
        assert_eq!(
            resolve_person_parent(&person, &index_for(&personnel, &[])),
            NodeId::task("TASK-001")
        );

        let taskless = PersonnelRecord::new(upid("410-003"), NodeType::Person)
            .with_supervisor(upid("410-003"));
        let personnel = vec![taskless.clone()];
        assert_eq!(
            resolve_person_parent(&taskless, &index_for(&personnel, &[])),
            NodeId::Root
        );
    }

    #[test]
    fn excluded_supervisors_do_not_resolve() {
        // The index is built from the renderable roster; a hard-deleted
        // supervisor is simply absent
        let person = PersonnelRecord::new(upid("410-002"), NodeType::Person)
            .with_task("TASK-001")
            .with_supervisor(upid("310-001"));
        let personnel = vec![person.clone()];

        let parent = resolve_person_parent(&person, &index_for(&personnel, &[]));
        assert_eq!(parent, NodeId::task("TASK-001"));
    }
}
