//! The directory service
//!
//! One synchronous facade over the whole data layer: reads delegate to the
//! cached [`TreeAssembler`]; writes are permission-gated, mutate rows
//! through the [`RowStore`], invalidate the tree cache, and report back as
//! structured [`WriteOutcome`]s.

use crate::error::DirectoryError;
use crate::outcome::WriteOutcome;
use crate::requests::{NewPerson, NewTeam, NewVacancy, PersonUpdate, TeamUpdate};
use indexmap::IndexMap;
use orgchart_model::{
    default_colors, vacancy_id, Cpc, Hid, LevelMap, NodeId, NodeType, UnifiedNode, Upid,
};
use orgchart_store::columns::{personnel as pcol, team_mappings as tcol, vacant_positions as vcol};
use orgchart_store::{
    stores, Action, CellValue, KeyValueCache, MetadataProvider, PermissionGate, RowStore,
    SheetMetadataProvider, Table,
};
use orgchart_tree::{TreeAssembler, TreeConfig, TreeSummary};
use std::sync::Arc;

/// Synchronous org-directory API
///
/// Collaborators are injected at construction; one instance serves both
/// the read facade and every gated write path.
pub struct DirectoryService {
    store: Arc<dyn RowStore>,
    gate: Arc<dyn PermissionGate>,
    assembler: TreeAssembler,
    level_map: LevelMap,
}

impl DirectoryService {
    /// Service over explicit collaborators
    #[must_use]
    pub fn new(
        store: Arc<dyn RowStore>,
        gate: Arc<dyn PermissionGate>,
        metadata: Arc<dyn MetadataProvider>,
        cache: KeyValueCache<Arc<Vec<UnifiedNode>>>,
        config: TreeConfig,
    ) -> Self {
        let level_map = config.level_map.clone();
        Self {
            assembler: TreeAssembler::new(Arc::clone(&store), metadata, cache, config),
            store,
            gate,
            level_map,
        }
    }

    /// Service with the production metadata provider and a default cache
    #[must_use]
    pub fn with_defaults(store: Arc<dyn RowStore>, gate: Arc<dyn PermissionGate>) -> Self {
        let metadata = Arc::new(SheetMetadataProvider::new(Arc::clone(&store)));
        Self::new(
            store,
            gate,
            metadata,
            KeyValueCache::default(),
            TreeConfig::new(),
        )
    }

    // ---- read facade -----------------------------------------------------

    /// The full flat node list (cached; fail-soft)
    #[must_use]
    pub fn get_all_nodes(&self) -> Arc<Vec<UnifiedNode>> {
        self.assembler.get_all_nodes()
    }

    /// Node by id
    #[must_use]
    pub fn get_node_by_id(&self, id: &NodeId) -> Option<UnifiedNode> {
        self.assembler.get_node_by_id(id)
    }

    /// Nodes by email, case-insensitive
    #[must_use]
    pub fn get_nodes_by_email(&self, email: &str) -> Vec<UnifiedNode> {
        self.assembler.get_nodes_by_email(email)
    }

    /// Every task structural node
    #[must_use]
    pub fn tasks(&self) -> Vec<UnifiedNode> {
        self.assembler.tasks()
    }

    /// Task id → management emails
    #[must_use]
    pub fn management_emails(&self) -> IndexMap<String, Vec<String>> {
        self.assembler.management_emails()
    }

    /// Summary counts, root excluded
    #[must_use]
    pub fn summary(&self) -> TreeSummary {
        self.assembler.summary()
    }

    /// The digit→type inference table in use
    #[must_use]
    pub fn level_map(&self) -> &LevelMap {
        &self.level_map
    }

    /// Default rendering colors per node type
    #[must_use]
    pub fn node_type_colors(&self) -> IndexMap<NodeType, &'static str> {
        default_colors()
    }

    // ---- personnel writes ------------------------------------------------

    /// Append a person; the UPID is `CPC` + next sequential HID
    pub fn add_person(&self, person: NewPerson) -> WriteOutcome<Upid> {
        self.guarded(Action::AddPerson, move |svc| {
            let cpc = Cpc::parse(&person.cpc)
                .map_err(|e| DirectoryError::Validation(e.to_string()))?;
            let table = Table::load(svc.store.as_ref(), stores::PERSONNEL)?;
            let upid = Upid::new(cpc, next_hid(&table)?);

            let supervisor = person
                .supervisor_upid
                .map(|u| u.to_string())
                .unwrap_or_default();
            let row = build_row(
                &table,
                stores::PERSONNEL,
                &[
                    (pcol::UPID, upid.to_string().into()),
                    (pcol::CPC, cpc.to_string().into()),
                    (pcol::HID, upid.hid.to_string().into()),
                    (pcol::FIRST_NAME, person.first_name.into()),
                    (pcol::LAST_NAME, person.last_name.into()),
                    (pcol::EMAIL, person.email.into()),
                    (pcol::TITLE, person.title.into()),
                    (pcol::SUPERVISOR_UPID, supervisor.into()),
                    (pcol::COMPANY, person.company.into()),
                    (pcol::CONTRACT, person.contract.into()),
                    (pcol::TASK, person.task.unwrap_or_default().into()),
                    (
                        pcol::PRIMARY_WORKSTREAM,
                        person.team.unwrap_or_default().into(),
                    ),
                    (pcol::CONTRACT_STATUS, "Active".into()),
                    (pcol::ACTIVE_IN_ORG, true.into()),
                    (
                        pcol::START_DATE,
                        person.start_date.unwrap_or_default().into(),
                    ),
                ],
            );
            svc.store.append_row(stores::PERSONNEL, row)?;
            tracing::info!("added person {upid}");
            Ok(upid)
        })
    }

    /// Apply a partial update; `None` fields are left untouched
    pub fn update_person(&self, upid: &Upid, update: PersonUpdate) -> WriteOutcome<()> {
        self.guarded(Action::UpdatePerson, move |svc| {
            let table = Table::load(svc.store.as_ref(), stores::PERSONNEL)?;
            let row = find_person_row(&table, upid)?;

            let fields: [(&str, Option<String>); 10] = [
                (pcol::FIRST_NAME, update.first_name),
                (pcol::LAST_NAME, update.last_name),
                (pcol::EMAIL, update.email),
                (pcol::TITLE, update.title),
                (pcol::SUPERVISOR_UPID, update.supervisor_upid),
                (pcol::COMPANY, update.company),
                (pcol::CONTRACT, update.contract),
                (pcol::TASK, update.task),
                (pcol::PRIMARY_WORKSTREAM, update.team),
                (pcol::SECONDARY_WORKSTREAM, update.secondary_workstream),
            ];
            for (header, value) in fields {
                if let Some(value) = value {
                    svc.set_field(&table, stores::PERSONNEL, row, header, value.into())?;
                }
            }
            Ok(())
        })
    }

    /// Soft delete: mark Departed and inactive; the row stays, the node
    /// disappears from the tree
    pub fn delete_person(&self, upid: &Upid) -> WriteOutcome<()> {
        self.guarded(Action::DeletePerson, move |svc| svc.depart(upid, false))
    }

    /// Departure that leaves a vacancy placeholder in the tree
    pub fn mark_departed(&self, upid: &Upid) -> WriteOutcome<()> {
        self.guarded(Action::DeletePerson, move |svc| svc.depart(upid, true))
    }

    fn depart(&self, upid: &Upid, visible_as_vacancy: bool) -> Result<(), DirectoryError> {
        let table = Table::load(self.store.as_ref(), stores::PERSONNEL)?;
        let row = find_person_row(&table, upid)?;
        self.set_field(
            &table,
            stores::PERSONNEL,
            row,
            pcol::CONTRACT_STATUS,
            "Departed".into(),
        )?;
        self.set_field(
            &table,
            stores::PERSONNEL,
            row,
            pcol::ACTIVE_IN_ORG,
            visible_as_vacancy.into(),
        )?;
        Ok(())
    }

    // ---- team writes -----------------------------------------------------

    /// Append an active team mapping; the team id is assigned sequentially
    pub fn create_team(&self, team: NewTeam) -> WriteOutcome<String> {
        self.guarded(Action::ManageTeams, move |svc| {
            if team.task_id.trim().is_empty() {
                return Err(DirectoryError::Validation("team needs a task id".into()));
            }
            let table = Table::load(svc.store.as_ref(), stores::TEAM_MAPPINGS)?;
            let team_id = next_team_id(&table);
            let row = build_row(
                &table,
                stores::TEAM_MAPPINGS,
                &[
                    (tcol::CONTRACT, team.contract.into()),
                    (tcol::TASK, team.task.into()),
                    (tcol::TASK_ID, team.task_id.into()),
                    (tcol::TEAM_ID, team_id.clone().into()),
                    (tcol::TEAM_NAME, team.team_name.into()),
                    (tcol::IS_ACTIVE, true.into()),
                    (tcol::COLOR, team.color.into()),
                    (tcol::DISPLAY_ORDER, team.display_order.into()),
                ],
            );
            svc.store.append_row(stores::TEAM_MAPPINGS, row)?;
            tracing::info!("created team {team_id}");
            Ok(team_id)
        })
    }

    /// Apply a partial team update
    pub fn update_team(&self, team_id: &str, update: TeamUpdate) -> WriteOutcome<()> {
        self.guarded(Action::ManageTeams, move |svc| {
            let table = Table::load(svc.store.as_ref(), stores::TEAM_MAPPINGS)?;
            let row = find_team_row(&table, team_id)?;
            if let Some(name) = update.team_name {
                svc.set_field(&table, stores::TEAM_MAPPINGS, row, tcol::TEAM_NAME, name.into())?;
            }
            if let Some(color) = update.color {
                svc.set_field(&table, stores::TEAM_MAPPINGS, row, tcol::COLOR, color.into())?;
            }
            if let Some(order) = update.display_order {
                svc.set_field(
                    &table,
                    stores::TEAM_MAPPINGS,
                    row,
                    tcol::DISPLAY_ORDER,
                    order.into(),
                )?;
            }
            if let Some(active) = update.is_active {
                svc.set_field(
                    &table,
                    stores::TEAM_MAPPINGS,
                    row,
                    tcol::IS_ACTIVE,
                    active.into(),
                )?;
            }
            Ok(())
        })
    }

    /// Deactivate a team mapping; derivation ignores it from then on
    pub fn delete_team(&self, team_id: &str) -> WriteOutcome<()> {
        self.guarded(Action::ManageTeams, move |svc| {
            let table = Table::load(svc.store.as_ref(), stores::TEAM_MAPPINGS)?;
            let row = find_team_row(&table, team_id)?;
            svc.set_field(&table, stores::TEAM_MAPPINGS, row, tcol::IS_ACTIVE, false.into())
        })
    }

    // ---- vacancy writes ----------------------------------------------------

    /// Append a never-filled vacancy; id `VAC-<taskSuffix>-<sequence>`
    pub fn create_vacancy(&self, vacancy: NewVacancy) -> WriteOutcome<String> {
        self.guarded(Action::ManageVacancies, move |svc| {
            if vacancy.task.trim().is_empty() {
                return Err(DirectoryError::Validation("vacancy needs a task".into()));
            }
            let table = Table::load(svc.store.as_ref(), stores::VACANT_POSITIONS)?;
            let id = vacancy_id(&vacancy.task, next_vacancy_sequence(&table, &vacancy.task));
            let supervisor = vacancy
                .supervisor_upid
                .map(|u| u.to_string())
                .unwrap_or_default();
            let row = build_row(
                &table,
                stores::VACANT_POSITIONS,
                &[
                    (vcol::VACANCY_ID, id.clone().into()),
                    (vcol::TASK, vacancy.task.into()),
                    (vcol::TEAM, vacancy.team.unwrap_or_default().into()),
                    (vcol::SUPERVISOR_UPID, supervisor.into()),
                    (vcol::TITLE, vacancy.title.into()),
                    (
                        vcol::TARGET_HIRE_DATE,
                        vacancy.target_hire_date.unwrap_or_default().into(),
                    ),
                    (vcol::REQUIREMENTS, vacancy.requirements.into()),
                ],
            );
            svc.store.append_row(stores::VACANT_POSITIONS, row)?;
            tracing::info!("created vacancy {id}");
            Ok(id)
        })
    }

    /// Retire a vacancy by blanking its id; id-less rows are skipped on read
    pub fn delete_vacancy(&self, id: &str) -> WriteOutcome<()> {
        self.guarded(Action::ManageVacancies, move |svc| {
            let table = Table::load(svc.store.as_ref(), stores::VACANT_POSITIONS)?;
            for row in table.iter() {
                if row.text(vcol::VACANCY_ID) == id {
                    return svc.set_field(
                        &table,
                        stores::VACANT_POSITIONS,
                        row.store_row_index(),
                        vcol::VACANCY_ID,
                        CellValue::Empty,
                    );
                }
            }
            Err(DirectoryError::NotFound(id.to_string()))
        })
    }

    // ---- internals ---------------------------------------------------------

    /// Gate, run, invalidate, convert: the shape of every write path.
    /// Denial aborts before any mutation; failures surface as structured
    /// outcomes, never as errors across the boundary.
    fn guarded<T>(
        &self,
        action: Action,
        op: impl FnOnce(&Self) -> Result<T, DirectoryError>,
    ) -> WriteOutcome<T> {
        if let Err(e) = self.gate.require(action) {
            tracing::warn!("{action} rejected: {e}");
            return WriteOutcome::failure(e.to_string());
        }
        let result = op(self);
        // Writes land cell by cell, so even a failed op may have changed
        // the store. The cache must never outlive what the rows now say.
        self.assembler.invalidate();
        match result {
            Ok(value) => WriteOutcome::success(value),
            Err(e) => {
                tracing::error!("{action} failed: {e}");
                WriteOutcome::failure(e.to_string())
            }
        }
    }

    /// Write one cell by header name; a missing column is tolerated
    fn set_field(
        &self,
        table: &Table,
        store_name: &str,
        row: usize,
        header: &str,
        value: CellValue,
    ) -> Result<(), DirectoryError> {
        match table.column(header) {
            Some(col) => Ok(self.store.set_cell(store_name, row, col, value)?),
            None => {
                tracing::warn!("store {store_name:?} lacks column {header:?}; value dropped");
                Ok(())
            }
        }
    }
}

impl std::fmt::Debug for DirectoryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryService").finish_non_exhaustive()
    }
}

/// Next sequential HID: max over the whole roster, plus one
fn next_hid(table: &Table) -> Result<Hid, DirectoryError> {
    let mut max = 0u32;
    for row in table.iter() {
        let sequence = row
            .text_opt(pcol::UPID)
            .and_then(|s| Upid::parse(&s).ok())
            .map(|u| u.hid.sequence())
            .or_else(|| {
                row.text_opt(pcol::HID)
                    .and_then(|s| Hid::parse(&s).ok())
                    .map(|h| h.sequence())
            });
        if let Some(sequence) = sequence {
            max = max.max(sequence);
        }
    }
    Hid::from_sequence(max + 1)
        .map_err(|_| DirectoryError::Validation("HID sequence space exhausted".to_string()))
}

/// Next sequential team id (`TEAM-NNN`)
fn next_team_id(table: &Table) -> String {
    let mut max = 0u32;
    for row in table.iter() {
        if let Some(n) = row
            .text(tcol::TEAM_ID)
            .strip_prefix("TEAM-")
            .and_then(|s| s.parse::<u32>().ok())
        {
            max = max.max(n);
        }
    }
    format!("TEAM-{:03}", max + 1)
}

/// Next vacancy sequence within a task's suffix namespace
fn next_vacancy_sequence(table: &Table, task: &str) -> u32 {
    let suffix = task.rsplit('-').next().unwrap_or(task);
    let prefix = format!("VAC-{suffix}-");
    let mut max = 0u32;
    for row in table.iter() {
        if let Some(n) = row
            .text(vcol::VACANCY_ID)
            .strip_prefix(&prefix)
            .and_then(|s| s.parse::<u32>().ok())
        {
            max = max.max(n);
        }
    }
    max + 1
}

/// Locate a person's store row by UPID (direct or composed from CPC+HID)
fn find_person_row(table: &Table, upid: &Upid) -> Result<usize, DirectoryError> {
    for row in table.iter() {
        let parsed = row
            .text_opt(pcol::UPID)
            .and_then(|s| Upid::parse(&s).ok())
            .or_else(|| {
                Upid::parse(&format!("{}-{}", row.text(pcol::CPC), row.text(pcol::HID))).ok()
            });
        if parsed.as_ref() == Some(upid) {
            return Ok(row.store_row_index());
        }
    }
    Err(DirectoryError::NotFound(upid.to_string()))
}

/// Locate a team mapping's store row by team id
fn find_team_row(table: &Table, team_id: &str) -> Result<usize, DirectoryError> {
    for row in table.iter() {
        if row.text(tcol::TEAM_ID) == team_id {
            return Ok(row.store_row_index());
        }
    }
    Err(DirectoryError::NotFound(team_id.to_string()))
}

/// Compose an append row laid out to the table's live header positions
fn build_row(table: &Table, store_name: &str, values: &[(&str, CellValue)]) -> Vec<CellValue> {
    let mut width = 0;
    for (header, _) in values {
        if let Some(idx) = table.column(header) {
            width = width.max(idx + 1);
        }
    }
    let mut row = vec![CellValue::Empty; width];
    for (header, value) in values {
        match table.column(header) {
            Some(idx) => row[idx] = value.clone(),
            None => {
                tracing::warn!("store {store_name:?} lacks column {header:?}; value dropped");
            }
        }
    }
    row
}
