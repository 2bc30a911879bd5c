use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::debug;
use crate::core::library::{LibraryError, LibraryResult};
use crate::core::repository::CatalogRepository;

// FileCatalogRepository keeps the catalog document in a single json file
#[derive(Debug, Clone)]
pub struct FileCatalogRepository {
    path: PathBuf,
}

impl FileCatalogRepository {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl CatalogRepository for FileCatalogRepository {
    fn load(&self) -> LibraryResult<Option<Vec<u8>>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no catalog file yet");
                return Ok(None);
            }
            Err(err) => return Err(LibraryError::from(err)),
        };
        debug!(path = %self.path.display(), bytes = bytes.len(), "read catalog file");
        Ok(Some(bytes))
    }

    // write to a sibling temp file then rename over the target
    fn save(&self, document: &[u8]) -> LibraryResult<()> {
        if self.path.file_name().is_none() {
            return Err(LibraryError::persistence(
                format!("catalog path {} does not name a file", self.path.display()).as_str(), None));
        }
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.temp_path();
        fs::write(&tmp, document)?;
        if let Err(err) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(LibraryError::from(err));
        }
        debug!(path = %self.path.display(), bytes = document.len(), "wrote catalog file");
        Ok(())
    }
}
