use super::snapshot::Snapshot;
use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw storage I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while NoteStore handles the "what" (document/block logic, doctor).
pub trait StorageBackend {
    /// Load the persisted state blob.
    /// A backend that has never been written returns an empty snapshot.
    fn load_snapshot(&self) -> Result<Snapshot>;

    /// Replace the persisted state blob.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn save_snapshot(&self, snapshot: &Snapshot) -> Result<()>;

    /// Where the blob lives. For FsBackend this is the real path, for
    /// MemBackend a virtual one.
    fn location(&self) -> PathBuf;
}
