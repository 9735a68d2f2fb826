use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use std::time::{Duration, SystemTime};

use crate::dataset::RawCountry;
use crate::error::StoreError;

/// Persistence for the last good upstream listing.
///
/// Read on cold start after an upstream failure; written best-effort after a
/// successful fetch. The listing is stored in upstream shape so a file saved
/// straight from the upstream API works as a seed.
pub trait FallbackStore: Send + Sync {
    /// `Ok(None)` when nothing has been stored yet.
    fn load(&self) -> Result<Option<Vec<RawCountry>>, StoreError>;

    fn save(&self, listing: &[RawCountry]) -> Result<(), StoreError>;

    /// Time since the stored copy was written, `None` when nothing is stored.
    fn age(&self) -> Option<Duration>;
}

/// JSON file on local disk.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FallbackStore for FileStore {
    fn load(&self) -> Result<Option<Vec<RawCountry>>, StoreError> {
        let file = match File::open(&self.path) {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let listing = serde_json::from_reader(BufReader::new(file))?;
        Ok(Some(listing))
    }

    /// Write to a sibling temp file, then rename over the target.
    fn save(&self, listing: &[RawCountry]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let tmp = self.path.with_extension("tmp");
        let mut writer = BufWriter::new(File::create(&tmp)?);
        serde_json::to_writer(&mut writer, listing)?;
        writer.flush()?;
        drop(writer);

        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn age(&self) -> Option<Duration> {
        let modified = fs::metadata(&self.path).and_then(|m| m.modified()).ok()?;
        Some(SystemTime::now().duration_since(modified).unwrap_or(Duration::ZERO))
    }
}

/// In-process store, for embedding without a disk and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Option<(Vec<RawCountry>, SystemTime)>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn with_listing(listing: Vec<RawCountry>) -> Self {
        MemoryStore { inner: Mutex::new(Some((listing, SystemTime::now()))) }
    }
}

impl FallbackStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<RawCountry>>, StoreError> {
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(guard.as_ref().map(|(listing, _)| listing.clone()))
    }

    fn save(&self, listing: &[RawCountry]) -> Result<(), StoreError> {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        *guard = Some((listing.to_vec(), SystemTime::now()));
        Ok(())
    }

    fn age(&self) -> Option<Duration> {
        let guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        guard.as_ref().map(|(_, at)| at.elapsed().unwrap_or(Duration::ZERO))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::RawName;

    fn raw(name: &str) -> RawCountry {
        RawCountry {
            name: RawName { common: Some(name.to_string()), official: None },
            capital: Some(vec!["Capital".to_string()]),
            population: Some(42),
            languages: None,
            currencies: None,
            flag: None,
            subregion: None,
            area: None,
            borders: None,
        }
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("countries.json"));
        assert!(store.load().unwrap().is_none());
        assert!(store.age().is_none());
    }

    #[test]
    fn file_store_persists_listing() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data").join("countries.json"));

        store.save(&[raw("Benin"), raw("Togo")]).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, vec![raw("Benin"), raw("Togo")]);
        assert!(store.age().is_some());
        assert!(!dir.path().join("data").join("countries.tmp").exists());
    }

    #[test]
    fn file_store_reports_corrupt_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("countries.json");
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(FileStore::new(path).load(), Err(StoreError::Json(_))));
    }

    #[test]
    fn memory_store_tracks_writes() {
        let store = MemoryStore::new();
        assert!(store.load().unwrap().is_none());
        assert!(store.age().is_none());

        store.save(&[raw("Benin")]).unwrap();
        assert_eq!(store.load().unwrap().map(|l| l.len()), Some(1));
        assert!(store.age().is_some());
    }
}
