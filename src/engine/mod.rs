//! Update engine
//!
//! Updating a resource runs in three steps:
//! 1. Diffing - compare prior state with the desired configuration
//! 2. Planning - turn the differences into an ordered list of API calls
//! 3. Executing - send the calls, stopping at the first failure

pub mod differ;
pub mod executor;
pub mod planner;

pub use differ::{ChangeSet, diff};
pub use executor::{ExecuteSummary, execute};
pub use planner::{UpdatePlan, plan};
