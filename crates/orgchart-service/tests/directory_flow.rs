//! End-to-end flows through the directory service: gated writes, cache
//! invalidation, and the derived tree picking up every mutation.

use mockall::predicate::eq;
use orgchart_model::{NodeId, NodeType, Upid};
use orgchart_service::{
    DirectoryService, NewPerson, NewTeam, NewVacancy, PersonUpdate, TeamUpdate,
};
use orgchart_store::{
    stores, Action, AllowAll, CellValue, InMemoryRowStore, PermissionGate, RoleGate, RowStore,
    StoreError,
};
use orgchart_test_utils::{init_tracing, seeded_store};
use pretty_assertions::assert_eq;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

mockall::mock! {
    Gate {}

    impl PermissionGate for Gate {
        fn require(&self, action: Action) -> Result<(), StoreError>;
    }
}

fn open_service() -> (Arc<InMemoryRowStore>, DirectoryService) {
    init_tracing();
    let store = seeded_store();
    // `.clone()` keeps the concrete Arc; the argument position coerces it
    let service = DirectoryService::with_defaults(store.clone(), Arc::new(AllowAll));
    (store, service)
}

#[test]
fn add_person_assigns_next_hid_and_appears_in_tree() {
    let (store, service) = open_service();
    // warm the cache so the write must invalidate it
    assert!(!service.get_all_nodes().is_empty());

    let outcome = service.add_person(
        NewPerson::new("410")
            .with_name("Noa", "Newhire")
            .with_email("noa@example.test")
            .with_contract("SQuAT")
            .with_task("TASK-001"),
    );
    assert!(outcome.is_success());
    // Seeded HIDs run 001..=005, so the next sequence is 006
    let upid = outcome.value.unwrap();
    assert_eq!(upid.to_string(), "410-006");
    assert_eq!(store.row_count(stores::PERSONNEL), 6);

    let node = service
        .get_node_by_id(&NodeId::Person(upid))
        .expect("new hire must be in the rebuilt tree");
    assert_eq!(node.node_type, NodeType::Person);
    assert_eq!(node.parent_id, Some(NodeId::task("TASK-001")));
}

#[test]
fn update_person_applies_only_provided_fields() {
    let (_store, service) = open_service();
    let upid = Upid::parse("410-004").unwrap();

    let outcome = service.update_person(
        &upid,
        PersonUpdate::new()
            .with_email("pat.person@example.test")
            .with_team("Modeling Team"),
    );
    assert!(outcome.is_success());

    let node = service.get_node_by_id(&NodeId::Person(upid)).unwrap();
    assert_eq!(node.email.as_deref(), Some("pat.person@example.test"));
    // Untouched fields survive
    assert_eq!(node.name, "Pat Person");
    // The new team assignment re-parents under the team node
    assert_eq!(node.parent_id, Some(NodeId::team("TEAM-001")));
}

#[test]
fn update_of_unknown_person_reports_not_found() {
    let (_store, service) = open_service();
    let upid = Upid::parse("999-999").unwrap();
    let outcome = service.update_person(&upid, PersonUpdate::new().with_email("x@example.test"));
    assert!(!outcome.is_success());
    assert_eq!(outcome.error.as_deref(), Some("not found: 999-999"));
}

#[test]
fn delete_person_removes_the_node() {
    let (store, service) = open_service();
    let upid = Upid::parse("410-004").unwrap();

    assert!(service.delete_person(&upid).is_success());
    assert!(service.get_node_by_id(&NodeId::Person(upid)).is_none());
    // Soft delete: the row itself stays
    assert_eq!(store.row_count(stores::PERSONNEL), 5);
}

#[test]
fn mark_departed_leaves_a_vacant_placeholder() {
    let (_store, service) = open_service();
    let upid = Upid::parse("410-004").unwrap();

    assert!(service.mark_departed(&upid).is_success());
    let node = service.get_node_by_id(&NodeId::Person(upid)).unwrap();
    assert_eq!(node.node_type, NodeType::Vacant);
}

#[test]
fn mark_departed_is_idempotent() {
    let (_store, service) = open_service();
    let upid = Upid::parse("410-004").unwrap();

    assert!(service.mark_departed(&upid).is_success());
    let first = service.get_all_nodes();
    assert!(service.mark_departed(&upid).is_success());
    let second = service.get_all_nodes();
    assert_eq!(*first, *second);
}

#[test]
fn team_lifecycle_creates_renames_and_retires() {
    let (_store, service) = open_service();

    let outcome = service.create_team(NewTeam::new("TASK-001", "Integration Team"));
    assert!(outcome.is_success());
    let team_id = outcome.value.unwrap();
    assert_eq!(team_id, "TEAM-002");
    let node_id = NodeId::team(&team_id);
    assert!(service.get_node_by_id(&node_id).is_some());

    assert!(service
        .update_team(
            &team_id,
            TeamUpdate {
                team_name: Some("Integration & Test Team".to_string()),
                ..TeamUpdate::default()
            },
        )
        .is_success());
    let node = service.get_node_by_id(&node_id).unwrap();
    assert_eq!(node.name, "Integration & Test Team");

    assert!(service.delete_team(&team_id).is_success());
    assert!(service.get_node_by_id(&node_id).is_none());
}

#[test]
fn vacancy_lifecycle_round_trip() {
    let (_store, service) = open_service();

    let outcome = service.create_vacancy(NewVacancy::new("TASK-001"));
    assert!(outcome.is_success());
    // VAC-001-001 is seeded, so the per-task sequence continues at 002
    let id = outcome.value.unwrap();
    assert_eq!(id, "VAC-001-002");
    let node_id = NodeId::Vacancy(id.clone());
    let node = service.get_node_by_id(&node_id).unwrap();
    assert_eq!(node.node_type, NodeType::Vacant);

    assert!(service.delete_vacancy(&id).is_success());
    assert!(service.get_node_by_id(&node_id).is_none());
}

#[test]
fn denied_write_has_no_partial_effect() {
    let store = seeded_store();
    // Reads only: every write action is denied
    let gate = RoleGate::new();
    let service = DirectoryService::with_defaults(store.clone(), Arc::new(gate));
    let before = service.get_all_nodes();

    let outcome = service.add_person(NewPerson::new("410").with_email("noa@example.test"));
    assert!(!outcome.is_success());
    assert_eq!(
        outcome.error.as_deref(),
        Some("permission denied for add_person")
    );
    assert_eq!(store.row_count(stores::PERSONNEL), 5);
    assert_eq!(*before, *service.get_all_nodes());

    assert!(!service.delete_team("TEAM-001").is_success());
    assert!(!service
        .delete_vacancy("VAC-001-001")
        .is_success());
}

#[test]
fn gate_sees_the_action_being_attempted() {
    let store = seeded_store();
    let mut gate = MockGate::new();
    gate.expect_require()
        .with(eq(Action::DeletePerson))
        .times(1)
        .returning(|_| Ok(()));
    let service = DirectoryService::with_defaults(store, Arc::new(gate));

    let upid = Upid::parse("410-004").unwrap();
    assert!(service.delete_person(&upid).is_success());
}

#[test]
fn reads_stay_available_when_the_store_goes_down() {
    let (store, service) = open_service();

    store.fail_reads(true);
    // Fail-soft: an empty list, never an error
    assert!(service.get_all_nodes().is_empty());

    // The failure is not cached; recovery is immediate
    store.fail_reads(false);
    assert!(!service.get_all_nodes().is_empty());
}

/// Delegates reads and appends, but lets only the first `writes_left`
/// `set_cell` calls through before simulating an outage
struct FlakyCellWrites {
    inner: Arc<InMemoryRowStore>,
    writes_left: AtomicUsize,
}

impl RowStore for FlakyCellWrites {
    fn get_rows(&self, store: &str) -> Result<Vec<Vec<CellValue>>, StoreError> {
        self.inner.get_rows(store)
    }

    fn append_row(&self, store: &str, row: Vec<CellValue>) -> Result<(), StoreError> {
        self.inner.append_row(store, row)
    }

    fn set_cell(
        &self,
        store: &str,
        row: usize,
        col: usize,
        value: CellValue,
    ) -> Result<(), StoreError> {
        let allowed = self
            .writes_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
        if allowed.is_err() {
            return Err(StoreError::Unavailable("simulated outage".to_string()));
        }
        self.inner.set_cell(store, row, col, value)
    }
}

#[test]
fn failed_partial_write_does_not_leave_a_stale_tree() {
    init_tracing();
    let store = Arc::new(FlakyCellWrites {
        inner: seeded_store(),
        writes_left: AtomicUsize::new(1),
    });
    let service = DirectoryService::with_defaults(store, Arc::new(AllowAll));
    let upid = Upid::parse("410-004").unwrap();

    // warm the cache with the pre-write tree
    assert_eq!(
        service
            .get_node_by_id(&NodeId::Person(upid))
            .unwrap()
            .node_type,
        NodeType::Person
    );

    // The delete writes two cells; the outage hits the second one, leaving
    // the row marked Departed but still active in the org
    let outcome = service.delete_person(&upid);
    assert!(!outcome.is_success());

    // The next read must reflect the half-applied row (a vacancy
    // placeholder), not the cached pre-write tree
    let node = service.get_node_by_id(&NodeId::Person(upid)).unwrap();
    assert_eq!(node.node_type, NodeType::Vacant);
}

#[test]
fn summary_counts_track_writes() {
    let (_store, service) = open_service();
    let before = service.summary();

    assert!(service
        .create_vacancy(NewVacancy::new("TASK-001"))
        .is_success());
    let after = service.summary();
    assert_eq!(after.vacancies, before.vacancies + 1);
    assert_eq!(after.total_nodes, before.total_nodes + 1);
}
