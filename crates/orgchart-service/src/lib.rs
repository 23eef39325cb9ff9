//! Orgchart directory service
//!
//! The one entry point callers hold: a synchronous [`DirectoryService`]
//! facade that serves cached tree reads and permission-gated writes over
//! the row store. Every attempted write invalidates the tree cache and reports
//! back as structured [`WriteOutcome`]s instead of raw errors.
//!
//! # Example
//!
//! ```rust,ignore
//! use orgchart_service::{DirectoryService, NewPerson};
//! use orgchart_store::AllowAll;
//! use std::sync::Arc;
//!
//! let service = DirectoryService::with_defaults(store, Arc::new(AllowAll));
//! let outcome = service.add_person(NewPerson::new("310").with_email("a@example.gov"));
//! assert!(outcome.is_success());
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod outcome;
pub mod requests;
pub mod service;

pub use error::DirectoryError;
pub use outcome::WriteOutcome;
pub use requests::{NewPerson, NewTeam, NewVacancy, PersonUpdate, TeamUpdate};
pub use service::DirectoryService;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
