//! Record key/path conventions.
//!
//! Pure string functions — no filesystem dependency. These define the
//! canonical layout of records under a Selora data directory.

/// The kind of record held by the session store. Each kind gets its own
/// subdirectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Session,
    Result,
}

impl RecordKind {
    pub fn dir(&self) -> &'static str {
        match self {
            RecordKind::Session => "sessions",
            RecordKind::Result => "results",
        }
    }
}

/// Relative path of a record file under the data directory.
pub fn record_path(kind: RecordKind, id: &str) -> String {
    format!("{}/{id}.json", kind.dir())
}
