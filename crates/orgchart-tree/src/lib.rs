//! Orgchart core - tree derivation and parent resolution
//!
//! Reconstructs a consistent parent/child hierarchy from flat roster and
//! taxonomy rows that carry no tree pointers of their own:
//! - [`PersonnelReader`] normalizes raw rows into records
//! - [`StructureDeriver`] synthesizes task, team, and root nodes
//! - [`resolve_person_parent`] / [`resolve_vacancy_parent`] place every
//!   record through a prioritized rule cascade
//! - [`TreeAssembler`] merges it all into one cached flat node list
//!
//! # Example
//!
//! ```rust,ignore
//! use orgchart_tree::{TreeAssembler, TreeConfig};
//!
//! let assembler = TreeAssembler::new(store, metadata, cache, TreeConfig::new());
//! let nodes = assembler.get_all_nodes();
//! println!("{} nodes in the tree", nodes.len());
//! ```

#![warn(unreachable_pub)]

pub mod assembler;
pub mod derive;
pub mod reader;
pub mod resolve;

pub use assembler::{TreeAssembler, TreeConfig, TreeSummary, CACHE_PREFIX, NODES_CACHE_KEY};
pub use derive::{Derived, StructureDeriver};
pub use reader::PersonnelReader;
pub use resolve::{resolve_person_parent, resolve_vacancy_parent, ResolutionIndex};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
