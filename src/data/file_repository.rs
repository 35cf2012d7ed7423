use std::marker::PhantomData;
use std::path::PathBuf;

use csv::{QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};

use super::codec::{self, Record};
use super::error::{DataError, Result};
use super::Repository;

/// Flat-file store for one entity type.
///
/// Holds nothing but the path: every call re-reads the file, so callers
/// always get independent copies.
#[derive(Debug, Clone)]
pub struct FileRepository<T> {
    path: PathBuf,
    _record: PhantomData<T>,
}

impl<T: Record> FileRepository<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileRepository {
            path: path.into(),
            _record: PhantomData,
        }
    }

    fn write_all(&self, records: &[T]) -> std::result::Result<(), csv::Error> {
        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_path(&self.path)?;

        writer.write_record(T::HEADER)?;
        for record in records {
            writer.write_record(&codec::encode(record)?)?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl<T: Record> Repository<T> for FileRepository<T> {
    fn find_all(&self) -> Vec<T> {
        let mut reader = match ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .from_path(&self.path)
        {
            Ok(reader) => reader,
            Err(e) => {
                // No file yet means no data yet
                tracing::debug!(label = T::LABEL, path = %self.path.display(), error = %e, "read skipped");
                return Vec::new();
            }
        };

        let mut records = Vec::new();
        let mut skipped = 0usize;

        for row in reader.records() {
            match row {
                Ok(row) => match codec::decode::<T>(&row) {
                    Some(record) => records.push(record),
                    None => skipped += 1,
                },
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                    tracing::debug!(label = T::LABEL, error = %e, "read stopped early");
                    break;
                }
                Err(_) => skipped += 1,
            }
        }

        if skipped > 0 {
            tracing::debug!(label = T::LABEL, skipped, "malformed rows skipped");
        }

        records
    }

    fn add(&self, record: T) -> Result<T> {
        let mut all = self.find_all();
        all.push(record.clone());

        self.write_all(&all).map_err(|source| DataError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::info!(label = T::LABEL, id = record.id(), total = all.len(), "record stored");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Forager, Item};
    use std::fs;
    use tempfile::TempDir;

    fn create_test_forager(id: &str, first: &str, last: &str, state: &str) -> Forager {
        Forager {
            id: id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            state: state.to_string(),
        }
    }

    #[test]
    fn test_find_all_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let repository: FileRepository<Forager> = FileRepository::new(dir.path().join("nope.csv"));

        assert!(repository.find_all().is_empty());
        assert!(repository.find_by_id("anything").is_none());
    }

    #[test]
    fn test_add_then_find() {
        let dir = TempDir::new().unwrap();
        let repository: FileRepository<Forager> = FileRepository::new(dir.path().join("foragers.csv"));

        let sam = create_test_forager("AbC-123", "Sam", "Lee", "CA");
        repository.add(sam.clone()).unwrap();

        assert_eq!(repository.find_all(), vec![sam.clone()]);
        assert_eq!(repository.find_by_id("abc-123"), Some(sam.clone()));
        assert_eq!(repository.find_by_id("ABC-123"), Some(sam));
    }

    #[test]
    fn test_file_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("foragers.csv");
        let repository: FileRepository<Forager> = FileRepository::new(&path);

        repository.add(create_test_forager("1", "Sam", "Lee", "CA")).unwrap();
        repository.add(create_test_forager("2", "Ana, Maria", "Ruiz", "OR")).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "id,first_name,last_name,state\n1,Sam,Lee,CA\n2,Ana@@@ Maria,Ruiz,OR\n"
        );
    }

    #[test]
    fn test_malformed_rows_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("foragers.csv");
        fs::write(
            &path,
            "id,first_name,last_name,state\n1,Sam,Lee,CA\n2,too,few\n3,Kim,Park,WA,extra\n4,Kim,Park,WA\n",
        )
        .unwrap();

        let repository: FileRepository<Forager> = FileRepository::new(&path);
        let ids: Vec<String> = repository.find_all().into_iter().map(|f| f.id).collect();

        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn test_find_all_directory_path_is_empty() {
        let dir = TempDir::new().unwrap();
        let repository: FileRepository<Forager> = FileRepository::new(dir.path());

        assert!(repository.find_all().is_empty());
    }

    #[test]
    fn test_invalid_utf8_row_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("foragers.csv");
        let mut contents = b"id,first_name,last_name,state\n1,Sam,Lee,CA\n".to_vec();
        contents.extend_from_slice(b"2,\xff\xfe,Lee,CA\n");
        contents.extend_from_slice(b"3,Kim,Park,WA\n");
        fs::write(&path, contents).unwrap();

        let repository: FileRepository<Forager> = FileRepository::new(&path);
        let ids: Vec<String> = repository.find_all().into_iter().map(|f| f.id).collect();

        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_find_by_field_case_insensitive() {
        let dir = TempDir::new().unwrap();
        let repository: FileRepository<Forager> = FileRepository::new(dir.path().join("foragers.csv"));

        repository.add(create_test_forager("1", "Sam", "Lee", "CA")).unwrap();
        repository.add(create_test_forager("2", "Kim", "Park", "ca")).unwrap();
        repository.add(create_test_forager("3", "Ana", "Ruiz", "OR")).unwrap();

        assert_eq!(repository.find_by_field("Ca").len(), 2);
        assert_eq!(repository.find_by_field("or").len(), 1);
        assert!(repository.find_by_field("WA").is_empty());
    }

    #[test]
    fn test_find_items_by_category() {
        let dir = TempDir::new().unwrap();
        let repository: FileRepository<Item> = FileRepository::new(dir.path().join("items.csv"));

        let mut morel = Item::new("Morel", Category::Fungi, 40.0);
        morel.id = "1".to_string();
        let mut hazelnut = Item::new("Hazelnut", Category::Nuts, 8.5);
        hazelnut.id = "2".to_string();
        repository.add(morel.clone()).unwrap();
        repository.add(hazelnut).unwrap();

        assert_eq!(repository.find_by_field("FUNGI"), vec![morel]);
    }

    #[test]
    fn test_add_to_invalid_path_fails() {
        let dir = TempDir::new().unwrap();
        let repository: FileRepository<Forager> = FileRepository::new(dir.path().join("missing-dir").join("foragers.csv"));

        let result = repository.add(create_test_forager("1", "Sam", "Lee", "CA"));
        assert!(matches!(result, Err(DataError::Write { .. })));
    }
}
