use std::sync::{Mutex, MutexGuard, PoisonError};
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::{info, warn};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::catalog::LibraryCatalog;
use crate::catalog::dto::CatalogStats;
use crate::core::domain::Configuration;
use crate::core::library::LibraryResult;
use crate::core::repository::CatalogRepository;
use crate::loans::domain::fine::FinePolicy;
use crate::loans::dto::{OverdueLoanDto, TransactionDto};
use crate::members::dto::MemberDto;
use crate::utils::date::Clock;

pub struct CatalogServiceImpl {
    loan_days: i64,
    catalog: Mutex<LibraryCatalog>,
    catalog_repository: Box<dyn CatalogRepository>,
    clock: Box<dyn Clock>,
}

impl CatalogServiceImpl {
    /// Loads the catalog from the repository; an empty store yields an empty catalog.
    pub fn load(config: &Configuration, catalog_repository: Box<dyn CatalogRepository>,
                clock: Box<dyn Clock>) -> LibraryResult<Self> {
        config.validate()?;
        let fine_policy = FinePolicy::new(config.fine_per_day)?;
        let catalog = match catalog_repository.load()? {
            Some(bytes) => LibraryCatalog::decode(&bytes, fine_policy)?,
            None => LibraryCatalog::with_policy(fine_policy),
        };
        let stats = catalog.stats(clock.today());
        info!(books = stats.books, members = stats.members, transactions = stats.transactions, "catalog loaded");
        Ok(Self {
            loan_days: config.loan_days,
            catalog: Mutex::new(catalog),
            catalog_repository,
            clock,
        })
    }

    fn lock(&self) -> MutexGuard<'_, LibraryCatalog> {
        self.catalog.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // applies one mutation and persists the whole document; on any failure the
    // catalog is put back the way it was
    fn mutate<T, F>(&self, operation: &str, f: F) -> LibraryResult<T>
        where F: FnOnce(&mut LibraryCatalog, NaiveDate) -> LibraryResult<T> {
        let mut catalog = self.lock();
        let snapshot = catalog.clone();
        let today = self.clock.today();
        let res = f(&mut *catalog, today).and_then(|value| {
            let bytes = catalog.encode()?;
            self.catalog_repository.save(&bytes)?;
            Ok(value)
        });
        if let Err(err) = &res {
            *catalog = snapshot;
            warn!(operation, error = %err, "catalog operation rejected");
        }
        res
    }

    fn read<T, F>(&self, f: F) -> LibraryResult<T>
        where F: FnOnce(&LibraryCatalog, NaiveDate) -> LibraryResult<T> {
        let catalog = self.lock();
        f(&*catalog, self.clock.today())
    }
}

#[async_trait]
impl CatalogService for CatalogServiceImpl {
    async fn add_book(&self, isbn: &str, title: &str, authors: Vec<String>, copies: i64,
                      pub_year: Option<i32>, tags: Vec<String>) -> LibraryResult<BookDto> {
        let book = self.mutate("add_book", |catalog, _| {
            catalog.add_book(isbn, title, authors, copies, pub_year, tags)
        })?;
        info!(isbn = book.isbn.as_str(), copies, total_copies = book.total_copies, "book added");
        Ok(BookDto::from(&book))
    }

    async fn add_member(&self, name: &str, email: Option<String>, phone: Option<String>) -> LibraryResult<MemberDto> {
        let member = self.mutate("add_member", |catalog, today| {
            catalog.add_member(name, email, phone, today)
        })?;
        info!(member_id = member.member_id.as_str(), "member added");
        Ok(MemberDto::from(&member))
    }

    async fn issue(&self, member_id: &str, isbn: &str, days: Option<i64>) -> LibraryResult<TransactionDto> {
        let days = days.unwrap_or(self.loan_days);
        let txn = self.mutate("issue", |catalog, today| {
            catalog.issue(member_id, isbn, days, today)
        })?;
        info!(txn_id = txn.txn_id.as_str(), member_id, isbn, due_on = %txn.due_on, "book issued");
        Ok(TransactionDto::from(&txn))
    }

    async fn return_book(&self, txn_id: &str) -> LibraryResult<TransactionDto> {
        let txn = self.mutate("return", |catalog, today| {
            catalog.return_book(txn_id, today)?;
            catalog.transaction(txn_id).cloned()
        })?;
        info!(txn_id, isbn = txn.isbn.as_str(), fine = txn.fine_paid, "book returned");
        Ok(TransactionDto::from(&txn))
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<BookDto> {
        self.read(|catalog, _| catalog.book(isbn).map(BookDto::from))
    }

    async fn find_member_by_id(&self, id: &str) -> LibraryResult<MemberDto> {
        self.read(|catalog, _| catalog.member(id).map(MemberDto::from))
    }

    async fn find_transaction_by_id(&self, id: &str) -> LibraryResult<TransactionDto> {
        self.read(|catalog, _| catalog.transaction(id).map(TransactionDto::from))
    }

    async fn books(&self) -> LibraryResult<Vec<BookDto>> {
        self.read(|catalog, _| Ok(catalog.books().into_iter().map(BookDto::from).collect()))
    }

    async fn members(&self) -> LibraryResult<Vec<MemberDto>> {
        self.read(|catalog, _| Ok(catalog.members().into_iter().map(MemberDto::from).collect()))
    }

    async fn transactions(&self) -> LibraryResult<Vec<TransactionDto>> {
        self.read(|catalog, _| Ok(catalog.transactions().into_iter().map(TransactionDto::from).collect()))
    }

    async fn query_overdue(&self) -> LibraryResult<Vec<OverdueLoanDto>> {
        self.read(|catalog, today| {
            let policy = catalog.fine_policy();
            Ok(catalog.overdue(today).into_iter().map(|txn| OverdueLoanDto {
                transaction: TransactionDto::from(txn),
                overdue_days: txn.overdue_days(today),
                accrued_fine: policy.accrued(txn, today),
            }).collect())
        })
    }

    async fn stats(&self) -> LibraryResult<CatalogStats> {
        self.read(|catalog, today| Ok(catalog.stats(today)))
    }

    async fn flush(&self) -> LibraryResult<()> {
        let catalog = self.lock();
        let bytes = catalog.encode()?;
        self.catalog_repository.save(&bytes)?;
        info!(bytes = bytes.len(), "catalog flushed");
        Ok(())
    }
}
