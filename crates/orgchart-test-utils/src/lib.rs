//! Testing utilities for the orgchart workspace
//!
//! Shared fixtures and setup helpers: canonical-header row builders, a
//! seeded in-memory store covering every store, and assembler setup.

#![allow(missing_docs)]

use orgchart_model::UnifiedNode;
use orgchart_store::columns::{personnel, task_metadata, team_mappings, vacant_positions};
use orgchart_store::{stores, CellValue, InMemoryRowStore, KeyValueCache, SheetMetadataProvider};
use orgchart_tree::{TreeAssembler, TreeConfig};
use std::sync::Arc;

/// Install a test-friendly tracing subscriber honoring `RUST_LOG`;
/// repeated calls are no-ops
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Row of text cells; empty strings become empty cells
pub fn text_row(cells: &[&str]) -> Vec<CellValue> {
    cells.iter().map(|&c| CellValue::from(c)).collect()
}

fn row_for(headers: &[&str], fields: &[(&str, &str)]) -> Vec<CellValue> {
    let mut row = vec![CellValue::Empty; headers.len()];
    for (header, value) in fields {
        let idx = headers
            .iter()
            .position(|h| h == header)
            .unwrap_or_else(|| panic!("unknown column {header:?}"));
        row[idx] = CellValue::from(*value);
    }
    row
}

/// Personnel row laid out to the canonical header order
pub fn personnel_row(fields: &[(&str, &str)]) -> Vec<CellValue> {
    row_for(personnel::HEADERS, fields)
}

/// Team-mapping row laid out to the canonical header order
pub fn team_row(fields: &[(&str, &str)]) -> Vec<CellValue> {
    row_for(team_mappings::HEADERS, fields)
}

/// Task-metadata row laid out to the canonical header order
pub fn task_row(fields: &[(&str, &str)]) -> Vec<CellValue> {
    row_for(task_metadata::HEADERS, fields)
}

/// Vacant-position row laid out to the canonical header order
pub fn vacancy_row(fields: &[(&str, &str)]) -> Vec<CellValue> {
    row_for(vacant_positions::HEADERS, fields)
}

fn header_row(headers: &[&str]) -> Vec<CellValue> {
    text_row(headers)
}

/// In-memory store seeded with a small but complete org:
/// a director, a deputy, a lead over `TASK-001`'s `Modeling Team`, an
/// individual contributor under the lead, a departed placeholder row, one
/// active team mapping, task metadata, and one never-filled vacancy.
pub fn seeded_store() -> Arc<InMemoryRowStore> {
    let store = InMemoryRowStore::new()
        .with_table(
            stores::PERSONNEL,
            vec![
                header_row(personnel::HEADERS),
                personnel_row(&[
                    (personnel::UPID, "100-001"),
                    (personnel::CPC, "100"),
                    (personnel::HID, "001"),
                    (personnel::FIRST_NAME, "Dana"),
                    (personnel::LAST_NAME, "Director"),
                    (personnel::EMAIL, "dana@example.test"),
                    (personnel::TITLE, "Portfolio Director"),
                    (personnel::CONTRACT, "SQuAT"),
                    (personnel::CONTRACT_STATUS, "Active"),
                    (personnel::ACTIVE_IN_ORG, "TRUE"),
                ]),
                personnel_row(&[
                    (personnel::UPID, "200-002"),
                    (personnel::CPC, "200"),
                    (personnel::HID, "002"),
                    (personnel::FIRST_NAME, "Devin"),
                    (personnel::LAST_NAME, "Deputy"),
                    (personnel::EMAIL, "devin@example.test"),
                    (personnel::CONTRACT, "SQuAT"),
                    (personnel::SUPERVISOR_UPID, "100-001"),
                    (personnel::CONTRACT_STATUS, "Active"),
                    (personnel::ACTIVE_IN_ORG, "TRUE"),
                ]),
                personnel_row(&[
                    (personnel::UPID, "310-003"),
                    (personnel::CPC, "310"),
                    (personnel::HID, "003"),
                    (personnel::FIRST_NAME, "Lee"),
                    (personnel::LAST_NAME, "Lead"),
                    (personnel::EMAIL, "lee@example.test"),
                    (personnel::CONTRACT, "SQuAT"),
                    (personnel::TASK, "TASK-001"),
                    (personnel::PRIMARY_WORKSTREAM, "Modeling Team"),
                    (personnel::SUPERVISOR_UPID, "100-001"),
                    (personnel::CONTRACT_STATUS, "Active"),
                    (personnel::ACTIVE_IN_ORG, "TRUE"),
                ]),
                personnel_row(&[
                    (personnel::UPID, "410-004"),
                    (personnel::CPC, "410"),
                    (personnel::HID, "004"),
                    (personnel::FIRST_NAME, "Pat"),
                    (personnel::LAST_NAME, "Person"),
                    (personnel::EMAIL, "pat@example.test"),
                    (personnel::CONTRACT, "SQuAT"),
                    (personnel::TASK, "TASK-001"),
                    (personnel::SUPERVISOR_UPID, "310-003"),
                    (personnel::CONTRACT_STATUS, "Active"),
                    (personnel::ACTIVE_IN_ORG, "TRUE"),
                ]),
                // Departed but still active in org: renders as a vacant
                // placeholder holding the seat
                personnel_row(&[
                    (personnel::UPID, "410-005"),
                    (personnel::CPC, "410"),
                    (personnel::HID, "005"),
                    (personnel::FIRST_NAME, "Quinn"),
                    (personnel::LAST_NAME, "Quit"),
                    (personnel::EMAIL, "quinn@example.test"),
                    (personnel::CONTRACT, "SQuAT"),
                    (personnel::TASK, "TASK-001"),
                    (personnel::SUPERVISOR_UPID, "310-003"),
                    (personnel::CONTRACT_STATUS, "Departed"),
                    (personnel::ACTIVE_IN_ORG, "TRUE"),
                ]),
            ],
        )
        .with_table(
            stores::TEAM_MAPPINGS,
            vec![
                header_row(team_mappings::HEADERS),
                team_row(&[
                    (team_mappings::CONTRACT, "SQuAT"),
                    (team_mappings::TASK, "Modeling"),
                    (team_mappings::TASK_ID, "TASK-001"),
                    (team_mappings::TEAM_ID, "TEAM-001"),
                    (team_mappings::TEAM_NAME, "Modeling Team"),
                    (team_mappings::IS_ACTIVE, "TRUE"),
                    (team_mappings::COLOR, "#ff0000"),
                    (team_mappings::DISPLAY_ORDER, "1"),
                ]),
            ],
        )
        .with_table(
            stores::TASK_METADATA,
            vec![
                header_row(task_metadata::HEADERS),
                task_row(&[
                    (task_metadata::TASK_ID, "TASK-001"),
                    (task_metadata::NAME, "Modeling"),
                    (task_metadata::DESCRIPTION, "Modeling and simulation"),
                    (task_metadata::DISPLAY_ORDER, "1"),
                ]),
            ],
        )
        .with_table(
            stores::VACANT_POSITIONS,
            vec![
                header_row(vacant_positions::HEADERS),
                vacancy_row(&[
                    (vacant_positions::VACANCY_ID, "VAC-001-001"),
                    (vacant_positions::TASK, "TASK-001"),
                    (vacant_positions::TEAM, "Modeling Team"),
                    (vacant_positions::SUPERVISOR_UPID, "310-003"),
                    (vacant_positions::TITLE, "Analyst"),
                    (vacant_positions::TARGET_HIRE_DATE, "2026-10-01"),
                    (vacant_positions::REQUIREMENTS, "Modeling background"),
                ]),
            ],
        );
    Arc::new(store)
}

/// Assembler over a store, with default cache and configuration
pub fn setup_test_assembler(store: Arc<InMemoryRowStore>) -> TreeAssembler {
    let store: Arc<dyn orgchart_store::RowStore> = store;
    let metadata = Arc::new(SheetMetadataProvider::new(Arc::clone(&store)));
    TreeAssembler::new(
        store,
        metadata,
        KeyValueCache::<Arc<Vec<UnifiedNode>>>::default(),
        TreeConfig::new(),
    )
}

/// Node ids in assembly order, handy for shape assertions
pub fn node_ids(nodes: &[UnifiedNode]) -> Vec<String> {
    nodes.iter().map(|n| n.id.to_string()).collect()
}
