use crate::core::library::LibraryResult;

// CatalogRepository abstracts the byte store that holds the encoded catalog document.
pub trait CatalogRepository: Sync + Send {
    // reads the whole document, None when nothing has been stored yet
    fn load(&self) -> LibraryResult<Option<Vec<u8>>>;

    // overwrites the whole document
    fn save(&self, document: &[u8]) -> LibraryResult<()>;
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum RepositoryStore {
    File,
    Memory,
}
