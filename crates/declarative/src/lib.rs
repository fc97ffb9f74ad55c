//! # Declarative
//!
//! Core evaluation for declaratively managed cloud governance objects.
//!
//! This crate has no I/O. It provides the two pieces every resource and
//! data source needs before talking to the API:
//!
//! - deciding whether a fetched record satisfies a user-supplied filter
//! - computing which association members to add and remove on update
//!
//! ## Core Concepts
//!
//! - **RecordView**: A field-path addressable view of one API item
//! - **FilterSet**: Clauses ANDed together, values ORed within a clause
//! - **MembershipDelta**: Ids to associate and disassociate
//! - **SingleValueChange**: Set or clear a single-valued association
//!
//! ## Example
//!
//! ```
//! use declarative::{FilterSet, RawFilter, flatten, reconcile};
//! use serde_json::json;
//!
//! let record = flatten(&json!({
//!     "id": 200,
//!     "name": "SystemReadOnlyAccess",
//!     "owner_users": [{"id": 300}, {"id": 100}]
//! }));
//!
//! let filters = FilterSet::build(&[
//!     RawFilter::exact("owner_users.id", ["100"]),
//!     RawFilter::pattern("name", ["Access$"]),
//! ])?;
//! assert!(filters.matches(&record)?);
//!
//! let delta = reconcile([2, 3, 4], [1, 2, 3]);
//! assert_eq!(delta.additions(), vec![4]);
//! assert_eq!(delta.removals(), vec![1]);
//! # Ok::<(), declarative::Error>(())
//! ```

pub mod diff;
pub mod error;
pub mod filter;
pub mod record;

// Re-export main types at crate root
pub use diff::{MembershipDelta, SingleValueChange, reconcile, reconcile_single_valued};
pub use error::{Error, Result};
pub use filter::{FilterClause, FilterSet, RawFilter, build_filter_set, matches};
pub use record::{RecordView, Scalar, flatten};
