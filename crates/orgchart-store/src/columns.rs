//! Canonical column headers per store
//!
//! Headers are matched by exact trimmed name. These constants are the one
//! place the header spellings live; readers and writers share them.

/// Personnel roster columns
pub mod personnel {
    /// Primary key (`CPC-HID`)
    pub const UPID: &str = "UPID";
    /// Employer-assigned code
    pub const EMPLOYEE_CODE: &str = "Employee Code";
    /// Contract personnel code
    pub const CPC: &str = "CPC";
    /// Hierarchy identifier
    pub const HID: &str = "HID";
    /// Given name
    pub const FIRST_NAME: &str = "First Name";
    /// Family name
    pub const LAST_NAME: &str = "Last Name";
    /// Work email
    pub const EMAIL: &str = "Email";
    /// Position title
    pub const TITLE: &str = "Title";
    /// Supervisor back-reference
    pub const SUPERVISOR_UPID: &str = "Supervisor UPID";
    /// Supervisor email
    pub const SUPERVISOR_EMAIL: &str = "Supervisor Email";
    /// Explicit node type, when present
    pub const NODE_TYPE: &str = "Node Type";
    /// Leadership flag that promotes a person to director
    pub const PORTFOLIO_LEADERSHIP: &str = "Portfolio Leadership";
    /// Employing company
    pub const COMPANY: &str = "Company";
    /// Owning contract
    pub const CONTRACT: &str = "Contract";
    /// Task assignment
    pub const TASK: &str = "Task";
    /// Primary workstream / team name
    pub const PRIMARY_WORKSTREAM: &str = "Primary Workstream";
    /// Secondary workstream
    pub const SECONDARY_WORKSTREAM: &str = "Secondary Workstream";
    /// Lifecycle status
    pub const CONTRACT_STATUS: &str = "Personnel Contract Status";
    /// Active-in-org flag
    pub const ACTIVE_IN_ORG: &str = "Active in Org";
    /// Start date
    pub const START_DATE: &str = "Start Date";

    /// Header row in canonical order, used when seeding fresh stores
    pub const HEADERS: &[&str] = &[
        UPID,
        EMPLOYEE_CODE,
        CPC,
        HID,
        FIRST_NAME,
        LAST_NAME,
        EMAIL,
        TITLE,
        SUPERVISOR_UPID,
        SUPERVISOR_EMAIL,
        NODE_TYPE,
        PORTFOLIO_LEADERSHIP,
        COMPANY,
        CONTRACT,
        TASK,
        PRIMARY_WORKSTREAM,
        SECONDARY_WORKSTREAM,
        CONTRACT_STATUS,
        ACTIVE_IN_ORG,
        START_DATE,
    ];
}

/// Team-mapping taxonomy columns
pub mod team_mappings {
    /// Owning contract
    pub const CONTRACT: &str = "Contract";
    /// Task name
    pub const TASK: &str = "Task";
    /// Task identifier
    pub const TASK_ID: &str = "Task ID";
    /// Team identifier
    pub const TEAM_ID: &str = "Team ID";
    /// Team display name
    pub const TEAM_NAME: &str = "Team Name";
    /// Active flag
    pub const IS_ACTIVE: &str = "Is Active";
    /// Rendering color
    pub const COLOR: &str = "Color";
    /// UI ordering hint
    pub const DISPLAY_ORDER: &str = "Display Order";

    /// Header row in canonical order
    pub const HEADERS: &[&str] = &[
        CONTRACT, TASK, TASK_ID, TEAM_ID, TEAM_NAME, IS_ACTIVE, COLOR, DISPLAY_ORDER,
    ];
}

/// Task metadata columns
pub mod task_metadata {
    /// Task identifier
    pub const TASK_ID: &str = "Task ID";
    /// Display name
    pub const NAME: &str = "Name";
    /// Description
    pub const DESCRIPTION: &str = "Description";
    /// UI ordering hint
    pub const DISPLAY_ORDER: &str = "Display Order";

    /// Header row in canonical order
    pub const HEADERS: &[&str] = &[TASK_ID, NAME, DESCRIPTION, DISPLAY_ORDER];
}

/// Never-filled vacancy columns
pub mod vacant_positions {
    /// Vacancy identifier (`VAC-…`)
    pub const VACANCY_ID: &str = "Vacancy ID";
    /// Task the position belongs to
    pub const TASK: &str = "Task";
    /// Team the position belongs to
    pub const TEAM: &str = "Team";
    /// Hiring supervisor
    pub const SUPERVISOR_UPID: &str = "Supervisor UPID";
    /// Position title
    pub const TITLE: &str = "Title";
    /// Target hire date
    pub const TARGET_HIRE_DATE: &str = "Target Hire Date";
    /// Role requirements
    pub const REQUIREMENTS: &str = "Requirements";

    /// Header row in canonical order
    pub const HEADERS: &[&str] = &[
        VACANCY_ID,
        TASK,
        TEAM,
        SUPERVISOR_UPID,
        TITLE,
        TARGET_HIRE_DATE,
        REQUIREMENTS,
    ];
}
