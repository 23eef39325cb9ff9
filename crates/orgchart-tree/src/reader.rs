//! Personnel reader
//!
//! Loads raw roster rows and normalizes them into [`PersonnelRecord`]s:
//! blank-row skipping, departed-row exclusion, node-type inference through
//! the level map, the leadership promotion, and the vacancy override.

use orgchart_model::{ContractStatus, LevelMap, NodeType, PersonnelRecord, RosterVisibility, Upid};
use orgchart_store::columns::personnel as col;
use orgchart_store::{stores, RowStore, RowView, StoreError, Table};

/// Reads and normalizes the personnel roster
#[derive(Debug, Clone, Default)]
pub struct PersonnelReader {
    level_map: LevelMap,
}

impl PersonnelReader {
    /// Reader with the given level map
    #[inline]
    #[must_use]
    pub fn new(level_map: LevelMap) -> Self {
        Self { level_map }
    }

    /// The digit→type table in use
    #[inline]
    #[must_use]
    pub fn level_map(&self) -> &LevelMap {
        &self.level_map
    }

    /// Every renderable personnel record
    ///
    /// Fails closed: an unreachable store is logged and yields an empty
    /// roster rather than an error.
    #[must_use]
    pub fn read_all(&self, store: &dyn RowStore) -> Vec<PersonnelRecord> {
        match self.try_read_all(store) {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("personnel read failed, returning empty roster: {e}");
                Vec::new()
            }
        }
    }

    /// Fallible form of [`PersonnelReader::read_all`]
    ///
    /// # Errors
    /// Propagates the store's read failure.
    pub fn try_read_all(&self, store: &dyn RowStore) -> Result<Vec<PersonnelRecord>, StoreError> {
        let table = Table::load(store, stores::PERSONNEL)?;
        let mut records = Vec::with_capacity(table.len());
        for row in table.iter() {
            if let Some(record) = self.parse_row(&row) {
                records.push(record);
            }
        }
        tracing::debug!("read {} personnel records", records.len());
        Ok(records)
    }

    /// Normalize one roster row; `None` drops the row from the view
    fn parse_row(&self, row: &RowView<'_>) -> Option<PersonnelRecord> {
        let upid_text = row.text(col::UPID);
        let email = row.text(col::EMAIL);

        // Blank row: nothing to key or contact by
        if upid_text.is_empty() && email.is_empty() {
            return None;
        }

        let status = ContractStatus::parse_lenient(&row.text(col::CONTRACT_STATUS));
        // Exclusion fires only on an explicit false, never on a blank flag
        let active_in_org = !row.get(col::ACTIVE_IN_ORG).is_explicit_false();
        if matches!(
            orgchart_model::classify(&status, active_in_org),
            RosterVisibility::Excluded
        ) {
            return None;
        }

        let upid = self.parse_upid(row, &upid_text)?;

        let mut node_type = self.infer_node_type(row, upid);
        if row.get(col::PORTFOLIO_LEADERSHIP).as_bool_lenient() && node_type == NodeType::Person {
            node_type = NodeType::Director;
        }
        // A departed-but-active row renders as the open position it left
        if matches!(
            orgchart_model::classify(&status, active_in_org),
            RosterVisibility::VacantPlaceholder
        ) {
            node_type = NodeType::Vacant;
        }

        Some(PersonnelRecord {
            upid,
            employee_code: row.text(col::EMPLOYEE_CODE),
            first_name: row.text(col::FIRST_NAME),
            last_name: row.text(col::LAST_NAME),
            email,
            title: row.text(col::TITLE),
            supervisor_upid: row
                .text_opt(col::SUPERVISOR_UPID)
                .and_then(|s| Upid::parse(&s).ok()),
            supervisor_email: row.text(col::SUPERVISOR_EMAIL),
            node_type,
            company: row.text(col::COMPANY),
            contract: row.text(col::CONTRACT),
            task: row.text_opt(col::TASK),
            team: row.text_opt(col::PRIMARY_WORKSTREAM),
            secondary_workstream: row.text(col::SECONDARY_WORKSTREAM),
            status,
            active_in_org,
            start_date: row.get(col::START_DATE).as_date_string(),
        })
    }

    /// UPID from the dedicated column, else composed from CPC + HID
    fn parse_upid(&self, row: &RowView<'_>, upid_text: &str) -> Option<Upid> {
        if let Ok(upid) = Upid::parse(upid_text) {
            return Some(upid);
        }
        let composed = format!("{}-{}", row.text(col::CPC), row.text(col::HID));
        match Upid::parse(&composed) {
            Ok(upid) => Some(upid),
            Err(_) => {
                tracing::warn!(
                    "skipping roster row with unusable identifier {upid_text:?} / {composed:?}"
                );
                None
            }
        }
    }

    /// Explicit type when present, else the leading CPC digit through the
    /// level map; no CPC means person
    fn infer_node_type(&self, row: &RowView<'_>, upid: Upid) -> NodeType {
        if let Some(explicit) = NodeType::parse_lenient(&row.text(col::NODE_TYPE)) {
            return explicit;
        }
        let cpc = row
            .text_opt(col::CPC)
            .and_then(|s| orgchart_model::Cpc::parse(&s).ok())
            .unwrap_or(upid.cpc);
        self.level_map.for_digit(cpc.level_digit())
    }
}
