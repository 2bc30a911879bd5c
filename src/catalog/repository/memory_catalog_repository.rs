use std::sync::{Arc, Mutex, PoisonError};
use crate::core::library::LibraryResult;
use crate::core::repository::CatalogRepository;

// MemoryCatalogRepository keeps the encoded document in memory; clones share it
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalogRepository {
    document: Arc<Mutex<Option<Vec<u8>>>>,
}

impl MemoryCatalogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogRepository for MemoryCatalogRepository {
    fn load(&self) -> LibraryResult<Option<Vec<u8>>> {
        let document = self.document.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(document.clone())
    }

    fn save(&self, document: &[u8]) -> LibraryResult<()> {
        let mut stored = self.document.lock().unwrap_or_else(PoisonError::into_inner);
        *stored = Some(document.to_vec());
        Ok(())
    }
}
