// 🗄️ Record Store - one flat file per entity type
//
// Read path: whole file → Vec<T>, degrading to empty on any IO problem
// Write path: whole Vec<T> → file (overwrite), the only path that can fail

pub mod codec;
pub mod error;
pub mod file_repository;

pub use codec::{Record, DATE_FORMAT, DELIMITER, DELIMITER_REPLACEMENT};
pub use error::{DataError, Result};
pub use file_repository::FileRepository;

/// Storage contract shared by every entity type.
///
/// Lookups are linear scans over `find_all()`; there is no index.
pub trait Repository<T: Record> {
    /// All stored records, or an empty vec if the backing file is missing or unreadable
    fn find_all(&self) -> Vec<T>;

    /// Append `record` and persist the full set
    fn add(&self, record: T) -> Result<T>;

    /// Exact match on the record id, ignoring ASCII case
    fn find_by_id(&self, id: &str) -> Option<T> {
        self.find_all()
            .into_iter()
            .find(|r| r.id().eq_ignore_ascii_case(id))
    }

    /// Exact match on the record's lookup field, ignoring ASCII case
    /// (forager state, item category, forage date)
    fn find_by_field(&self, value: &str) -> Vec<T> {
        self.find_all()
            .into_iter()
            .filter(|r| r.lookup_field().eq_ignore_ascii_case(value))
            .collect()
    }
}
