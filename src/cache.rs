//! On-disk copy of the last fetched library snapshot, so the finder has
//! data at startup before the first refresh completes.

use std::fs;
use std::path::PathBuf;
use tempfile::NamedTempFile;

use crate::error::Result;
use crate::library::LibrarySnapshot;

const CACHE_FILE_NAME: &str = "library.json";

pub struct SnapshotCache {
    base_path: PathBuf,
}

impl SnapshotCache {
    pub fn new(base_path: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    pub fn load(&self) -> Result<Option<LibrarySnapshot>> {
        let path = self.file_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    pub fn store(&self, snapshot: &LibrarySnapshot) -> Result<()> {
        let temp_file = NamedTempFile::new_in(&self.base_path)?;
        serde_json::to_writer(temp_file.as_file(), snapshot)?;
        temp_file
            .persist(self.file_path())
            .map_err(|e| e.error)?;
        Ok(())
    }

    fn file_path(&self) -> PathBuf {
        self.base_path.join(CACHE_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{Library, LibraryResponse};

    fn snapshot() -> LibrarySnapshot {
        LibrarySnapshot::from_response(LibraryResponse {
            personal_library: Library {
                guid: "lib-1".to_string(),
                snippets: vec![],
                labels: vec![],
            },
            teams: vec![],
        })
    }

    #[test]
    fn empty_cache_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path().join("trove")).unwrap();
        assert!(cache.load().unwrap().is_none());
    }

    #[test]
    fn stored_snapshot_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path().join("trove")).unwrap();

        cache.store(&snapshot()).unwrap();
        let loaded = cache.load().unwrap().unwrap();
        assert_eq!(loaded.personal_library_guid, "lib-1");
    }
}
