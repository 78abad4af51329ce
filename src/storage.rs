// Storage gateway: the whole catalog is read in one go and written back
// in one go. There is no locking and no atomic rename; a crash while
// writing can leave a truncated file.

use crate::catalog::Catalog;
use crate::error::StorageError;
use std::{fs, io};
use std::path::{Path, PathBuf};

/// Anything that can load and persist a full catalog.
pub trait CatalogStorage {
    fn load(&self) -> Result<Catalog, StorageError>;
    fn save(&self, catalog: &Catalog) -> Result<(), StorageError>;
}

/// Catalog kept as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogStorage for JsonFileStorage {
    fn load(&self) -> Result<Catalog, StorageError> {
        let data = fs::read_to_string(&self.path).map_err(|source| StorageError::Read {
            path: self.path.clone(),
            source,
        })?;
        let catalog: Catalog = serde_json::from_str(&data)?;
        log::debug!("loaded {} movies from {}", catalog.len(), self.path.display());
        Ok(catalog)
    }

    fn save(&self, catalog: &Catalog) -> Result<(), StorageError> {
        // serde_json's pretty printer indents with two spaces.
        serde_json::to_string_pretty(catalog)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
            .and_then(|content| fs::write(&self.path, content))
            .map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })?;
        log::debug!("saved {} movies to {}", catalog.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MovieRecord;

    fn sample() -> Catalog {
        Catalog::from(vec![
            MovieRecord::from_text("The Matrix", "1999", "Lana Wachowski", "8.7", "Action, Sci-Fi"),
            MovieRecord::from_text("Unknown", "tbd", "", "n/a", ""),
        ])
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("movies.json"));

        storage.save(&sample()).unwrap();
        assert_eq!(storage.load().unwrap(), sample());
    }

    #[test]
    fn save_writes_two_space_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("movies.json"));
        storage.save(&sample()).unwrap();

        let text = fs::read_to_string(storage.path()).unwrap();
        assert!(text.starts_with("[\n  {\n    \"name\": \"The Matrix\",\n    \"releaseYear\": 1999,"));
        assert!(text.contains("\"releaseYear\": null"));
        assert!(text.contains("\"rating\": null"));
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("movies.json"));
        storage.save(&sample()).unwrap();
        storage.save(&Catalog::new()).unwrap();

        assert_eq!(fs::read_to_string(storage.path()).unwrap(), "[]");
        assert!(storage.load().unwrap().is_empty());
    }

    #[test]
    fn hand_edited_fields_survive_load_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.json");
        fs::write(
            &path,
            r#"[{"name":"Alien","releaseYear":"1979","director":"Ridley Scott","rating":8.5,"genres":["Horror"],"watched":true}]"#,
        )
        .unwrap();
        let storage = JsonFileStorage::new(&path);

        let catalog = storage.load().unwrap();
        assert_eq!(catalog.movies()[0].release_year, Some(1979));
        storage.save(&catalog).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"watched\": true"));
        assert!(text.contains("\"releaseYear\": 1979"));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("absent.json"));
        let err = storage.load().unwrap_err();
        assert!(matches!(err, StorageError::Read { .. }));
        assert!(err.to_string().starts_with("Error reading file: "));
    }

    #[test]
    fn invalid_json_or_non_array_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.json");
        let storage = JsonFileStorage::new(&path);

        fs::write(&path, "not json").unwrap();
        assert!(matches!(storage.load(), Err(StorageError::Parse(_))));

        fs::write(&path, r#"{"name":"The Matrix"}"#).unwrap();
        assert!(matches!(storage.load(), Err(StorageError::Parse(_))));
    }

    #[test]
    fn unwritable_path_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonFileStorage::new(dir.path().join("missing-dir").join("movies.json"));
        let err = storage.save(&sample()).unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
        assert_eq!(err.to_string(), "Error writing movies to file");
    }
}
