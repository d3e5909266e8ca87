//! Status-transition and deadline logic, independent of storage and HTTP.

pub mod aggregate;
pub mod dashboard;
pub mod deadline;
pub mod ledger;

pub use aggregate::{DetailChanges, ProjectAggregate, ProjectDraft};
pub use ledger::StatusLedger;
