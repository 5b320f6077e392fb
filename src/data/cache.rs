use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::loader::{load_file, LoadError};
use super::model::ReitDataset;

/// Session-scoped dataset cache.
///
/// The source path is fixed at construction; the file is read on the first
/// call to [`DatasetCache::dataset`] and the same `Arc` is handed out after
/// that. Each session owns its own cache.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    loaded: Option<Arc<ReitDataset>>,
}

impl DatasetCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DatasetCache {
            path: path.into(),
            loaded: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the file has already been read.
    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// The dataset, reading the file on first use.
    pub fn dataset(&mut self) -> Result<Arc<ReitDataset>, LoadError> {
        if let Some(ds) = &self.loaded {
            return Ok(Arc::clone(ds));
        }
        let ds = Arc::new(load_file(&self.path)?);
        log::info!(
            "Loaded {} REITs with columns {:?} from {}",
            ds.len(),
            ds.columns,
            self.path.display()
        );
        self.loaded = Some(Arc::clone(&ds));
        Ok(ds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn second_call_reuses_the_loaded_dataset() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Ticker,Industry,Market Cap,Dividend Yield,Beta").unwrap();
        writeln!(file, "AAA,Retail,100,2.0,0.9").unwrap();
        file.flush().unwrap();

        let mut cache = DatasetCache::new(file.path());
        assert!(!cache.is_loaded());
        let first = cache.dataset().unwrap();

        // Rewriting the source must not be observed within the session.
        std::fs::write(file.path(), "garbage").unwrap();
        let second = cache.dataset().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn missing_source_fails_without_caching() {
        let mut cache = DatasetCache::new("/nonexistent/reit_data.csv");
        assert!(matches!(cache.dataset(), Err(LoadError::Io { .. })));
        assert!(!cache.is_loaded());
    }

    #[test]
    fn sessions_are_isolated() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Ticker,Industry,Market Cap,Dividend Yield,Beta").unwrap();
        writeln!(file, "AAA,Retail,100,2.0,0.9").unwrap();
        file.flush().unwrap();

        let mut a = DatasetCache::new(file.path());
        let mut b = DatasetCache::new(file.path());
        let da = a.dataset().unwrap();
        let db = b.dataset().unwrap();
        assert!(!Arc::ptr_eq(&da, &db));
        assert_eq!(*da, *db);
    }
}
