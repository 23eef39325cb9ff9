//! Orgchart external collaborators
//!
//! The data layer's seams to the outside world, each a trait with one
//! production implementation and one test double:
//! - [`RowStore`]: header-addressed 2D row access ([`InMemoryRowStore`]
//!   double)
//! - [`MetadataProvider`]: team/task taxonomy and never-filled vacancies
//!   ([`SheetMetadataProvider`] production impl)
//! - [`PermissionGate`]: capability checks before writes ([`RoleGate`] /
//!   [`AllowAll`])
//! - [`KeyValueCache`]: moka-backed TTL cache with prefix invalidation

#![warn(unreachable_pub)]

pub mod cache;
pub mod cell;
pub mod columns;
pub mod metadata;
pub mod permission;
pub mod row_store;
pub mod table;

pub use cache::{KeyValueCache, DEFAULT_TTL};
pub use cell::CellValue;
pub use metadata::{MetadataProvider, SheetMetadataProvider};
pub use permission::{Action, AllowAll, PermissionGate, RoleGate};
pub use row_store::{stores, InMemoryRowStore, RowStore, StoreError};
pub use table::{RowView, Table};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
