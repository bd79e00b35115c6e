//! Change history for the ledger
//!
//! Every add, edit and delete of an expense, and every budget change, is
//! appended to `audit.log` as one JSON line. `ledger history` reads it back,
//! for the whole ledger or for a single expense ID.

mod diff;
mod entry;
mod logger;

pub use diff::FieldChange;
pub use entry::{Action, AuditEntry, Subject};
pub use logger::AuditLogger;
