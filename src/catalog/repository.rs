pub mod file_catalog_repository;
pub mod memory_catalog_repository;
