use std::path::PathBuf;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::catalog::repository::file_catalog_repository::FileCatalogRepository;
use crate::catalog::repository::memory_catalog_repository::MemoryCatalogRepository;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::core::repository::{CatalogRepository, RepositoryStore};
use crate::utils::date::SystemClock;

pub fn create_catalog_repository(config: &Configuration, store: RepositoryStore) -> Box<dyn CatalogRepository> {
    match store {
        RepositoryStore::File => {
            Box::new(FileCatalogRepository::new(PathBuf::from(config.data_file.as_str())))
        }
        RepositoryStore::Memory => {
            Box::new(MemoryCatalogRepository::new())
        }
    }
}

pub fn create_catalog_service(config: &Configuration, store: RepositoryStore) -> LibraryResult<Box<dyn CatalogService>> {
    let catalog_repo = create_catalog_repository(config, store);
    let svc = CatalogServiceImpl::load(config, catalog_repo, Box::new(SystemClock))?;
    Ok(Box::new(svc))
}
