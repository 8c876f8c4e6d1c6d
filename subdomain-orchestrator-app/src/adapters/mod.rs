//! Storage and audit adapters shared by every frontend.

mod audit_file;
mod sqlite;

pub use audit_file::FileAuditSink;
pub use sqlite::SqliteStore;
