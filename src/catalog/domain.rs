use async_trait::async_trait;
use crate::books::dto::BookDto;
use crate::catalog::dto::CatalogStats;
use crate::core::library::LibraryResult;
use crate::loans::dto::{OverdueLoanDto, TransactionDto};
use crate::members::dto::MemberDto;

pub mod catalog;
pub mod service;

#[async_trait]
pub trait CatalogService: Sync + Send {
    async fn add_book(&self, isbn: &str, title: &str, authors: Vec<String>, copies: i64,
                      pub_year: Option<i32>, tags: Vec<String>) -> LibraryResult<BookDto>;
    async fn add_member(&self, name: &str, email: Option<String>, phone: Option<String>) -> LibraryResult<MemberDto>;
    // days falls back to the configured loan period
    async fn issue(&self, member_id: &str, isbn: &str, days: Option<i64>) -> LibraryResult<TransactionDto>;
    async fn return_book(&self, txn_id: &str) -> LibraryResult<TransactionDto>;
    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<BookDto>;
    async fn find_member_by_id(&self, id: &str) -> LibraryResult<MemberDto>;
    async fn find_transaction_by_id(&self, id: &str) -> LibraryResult<TransactionDto>;
    async fn books(&self) -> LibraryResult<Vec<BookDto>>;
    async fn members(&self) -> LibraryResult<Vec<MemberDto>>;
    async fn transactions(&self) -> LibraryResult<Vec<TransactionDto>>;
    async fn query_overdue(&self) -> LibraryResult<Vec<OverdueLoanDto>>;
    async fn stats(&self) -> LibraryResult<CatalogStats>;
    // writes the current state, called on shutdown
    async fn flush(&self) -> LibraryResult<()>;
}
