//! Team/task metadata provider seam
//!
//! The core consumes taxonomy and vacancy data through
//! [`MetadataProvider`]; [`SheetMetadataProvider`] is the production
//! implementation reading through a [`RowStore`].

use crate::columns::{task_metadata, team_mappings, vacant_positions};
use crate::row_store::{stores, RowStore, StoreError};
use crate::table::Table;
use indexmap::IndexMap;
use orgchart_model::{TaskMeta, TeamMapping, Upid, VacantPositionRecord};
use std::sync::Arc;

/// Source of team/task taxonomy and never-filled vacancies
pub trait MetadataProvider: Send + Sync {
    /// Every team-mapping row, active or not
    ///
    /// # Errors
    /// [`StoreError`] when the backing store is unreachable.
    fn all_teams(&self) -> Result<Vec<TeamMapping>, StoreError>;

    /// Task display metadata keyed by task id
    ///
    /// # Errors
    /// [`StoreError`] when the backing store is unreachable.
    fn task_metadata(&self) -> Result<IndexMap<String, TaskMeta>, StoreError>;

    /// Every never-filled vacancy
    ///
    /// # Errors
    /// [`StoreError`] when the backing store is unreachable.
    fn all_vacant_positions(&self) -> Result<Vec<VacantPositionRecord>, StoreError>;
}

/// [`MetadataProvider`] over spreadsheet-shaped stores
#[derive(Clone)]
pub struct SheetMetadataProvider {
    store: Arc<dyn RowStore>,
}

impl SheetMetadataProvider {
    /// Provider reading through the given row store
    #[inline]
    #[must_use]
    pub fn new(store: Arc<dyn RowStore>) -> Self {
        Self { store }
    }
}

impl std::fmt::Debug for SheetMetadataProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetMetadataProvider").finish_non_exhaustive()
    }
}

impl MetadataProvider for SheetMetadataProvider {
    fn all_teams(&self) -> Result<Vec<TeamMapping>, StoreError> {
        let table = Table::load(self.store.as_ref(), stores::TEAM_MAPPINGS)?;
        let mut teams = Vec::with_capacity(table.len());
        for row in table.iter() {
            let task_id = row.text(team_mappings::TASK_ID);
            let team_id = row.text(team_mappings::TEAM_ID);
            // Rows missing either id cannot participate in derivation
            if task_id.is_empty() || team_id.is_empty() {
                continue;
            }
            teams.push(TeamMapping {
                contract: row.text(team_mappings::CONTRACT),
                task: row.text(team_mappings::TASK),
                task_id,
                team_id,
                team_name: row.text(team_mappings::TEAM_NAME),
                is_active: row.get(team_mappings::IS_ACTIVE).as_bool_lenient(),
                color: row.text(team_mappings::COLOR),
                display_order: row
                    .text(team_mappings::DISPLAY_ORDER)
                    .parse()
                    .unwrap_or(0),
            });
        }
        Ok(teams)
    }

    fn task_metadata(&self) -> Result<IndexMap<String, TaskMeta>, StoreError> {
        let table = Table::load(self.store.as_ref(), stores::TASK_METADATA)?;
        let mut meta = IndexMap::with_capacity(table.len());
        for row in table.iter() {
            let task_id = row.text(task_metadata::TASK_ID);
            if task_id.is_empty() {
                continue;
            }
            let name = row.text(task_metadata::NAME);
            meta.insert(
                task_id.clone(),
                TaskMeta {
                    name: if name.is_empty() { task_id.clone() } else { name },
                    task_id,
                    description: row.text(task_metadata::DESCRIPTION),
                    display_order: row
                        .text(task_metadata::DISPLAY_ORDER)
                        .parse()
                        .unwrap_or(0),
                },
            );
        }
        Ok(meta)
    }

    fn all_vacant_positions(&self) -> Result<Vec<VacantPositionRecord>, StoreError> {
        let table = Table::load(self.store.as_ref(), stores::VACANT_POSITIONS)?;
        let mut vacancies = Vec::with_capacity(table.len());
        for row in table.iter() {
            let id = row.text(vacant_positions::VACANCY_ID);
            let task = row.text(vacant_positions::TASK);
            if id.is_empty() || task.is_empty() {
                continue;
            }
            vacancies.push(VacantPositionRecord {
                id,
                task,
                team: row.text_opt(vacant_positions::TEAM),
                supervisor_upid: row
                    .text_opt(vacant_positions::SUPERVISOR_UPID)
                    .and_then(|s| Upid::parse(&s).ok()),
                title: row.text(vacant_positions::TITLE),
                target_hire_date: row.get(vacant_positions::TARGET_HIRE_DATE).as_date_string(),
                requirements: row.text(vacant_positions::REQUIREMENTS),
            });
        }
        Ok(vacancies)
    }
}
