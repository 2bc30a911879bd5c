use std::collections::{BTreeMap, HashMap};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::books::domain::model::BookEntity;
use crate::catalog::dto::CatalogStats;
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};
use crate::loans::domain::fine::FinePolicy;
use crate::loans::domain::model::TransactionEntity;
use crate::members::domain::model::MemberEntity;

/// LibraryCatalog owns every book, member and loan and is the only place
/// where they change.
///
/// All operations are synchronous and take the current date explicitly. A
/// failed operation leaves the catalog exactly as it was. For every book
/// `available_copies == total_copies - open loans of that isbn` holds after
/// each call; [`LibraryCatalog::verify`] checks it.
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryCatalog {
    books: HashMap<String, BookEntity>,
    members: HashMap<String, MemberEntity>,
    transactions: HashMap<String, TransactionEntity>,
    fine_policy: FinePolicy,
}

// on-disk layout, collections sorted by key so saves are stable
#[derive(Serialize)]
struct CatalogDocumentRef<'a> {
    books: BTreeMap<&'a str, &'a BookEntity>,
    members: BTreeMap<&'a str, &'a MemberEntity>,
    transactions: BTreeMap<&'a str, &'a TransactionEntity>,
}

#[derive(Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    books: HashMap<String, BookEntity>,
    #[serde(default)]
    members: HashMap<String, MemberEntity>,
    #[serde(default)]
    transactions: HashMap<String, TransactionEntity>,
}

impl LibraryCatalog {
    pub fn new(fine_per_day: f64) -> LibraryResult<Self> {
        Ok(Self::with_policy(FinePolicy::new(fine_per_day)?))
    }

    pub fn with_policy(fine_policy: FinePolicy) -> Self {
        Self {
            books: HashMap::new(),
            members: HashMap::new(),
            transactions: HashMap::new(),
            fine_policy,
        }
    }

    pub fn fine_policy(&self) -> FinePolicy {
        self.fine_policy
    }

    /// Adds `copies` copies of a title. A known isbn only has its counts
    /// raised; title, authors, year and tags from the first call are kept.
    pub fn add_book(&mut self, isbn: &str, title: &str, authors: Vec<String>, copies: i64,
                    pub_year: Option<i32>, tags: Vec<String>) -> LibraryResult<BookEntity> {
        let isbn = isbn.trim();
        if isbn.is_empty() {
            return Err(LibraryError::invalid_argument("isbn must not be empty", None));
        }
        if copies < 1 {
            return Err(LibraryError::invalid_argument(
                format!("copies must be at least 1, got {}", copies).as_str(), Some(isbn.to_string())));
        }
        let copies = u32::try_from(copies).map_err(|_| LibraryError::invalid_argument(
            format!("copies {} is out of range", copies).as_str(), Some(isbn.to_string())))?;

        if let Some(book) = self.books.get_mut(isbn) {
            book.add_copies(copies)?;
            return Ok(book.clone());
        }
        let book = BookEntity::new(isbn, title.trim(), clean_list(authors), copies, pub_year, clean_list(tags));
        self.books.insert(book.isbn.clone(), book.clone());
        Ok(book)
    }

    pub fn add_member(&mut self, name: &str, email: Option<String>, phone: Option<String>,
                      today: NaiveDate) -> LibraryResult<MemberEntity> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LibraryError::invalid_argument("member name must not be empty", None));
        }
        let mut member = MemberEntity::new(name, clean_opt(email), clean_opt(phone), today);
        while self.members.contains_key(&member.member_id) {
            member = MemberEntity::new(name, member.email, member.phone, today);
        }
        self.members.insert(member.member_id.clone(), member.clone());
        Ok(member)
    }

    /// Lends one copy of `isbn` to `member_id`, due `days` after `today`.
    pub fn issue(&mut self, member_id: &str, isbn: &str, days: i64,
                 today: NaiveDate) -> LibraryResult<TransactionEntity> {
        if !self.members.contains_key(member_id) {
            return Err(LibraryError::not_found(format!("member {} not found", member_id).as_str()));
        }
        let book = self.books.get_mut(isbn)
            .ok_or_else(|| LibraryError::not_found(format!("book {} not found", isbn).as_str()))?;
        if book.available_copies == 0 {
            return Err(LibraryError::unavailable(
                format!("no copies of {} are available", isbn).as_str(), Some(isbn.to_string())));
        }

        let mut txn = TransactionEntity::open(member_id, isbn, today, days)?;
        while self.transactions.contains_key(&txn.txn_id) {
            txn = TransactionEntity::open(member_id, isbn, today, days)?;
        }
        // last fallible step, nothing has changed before it
        if !book.checkout_copy() {
            return Err(LibraryError::unavailable(
                format!("no copies of {} are available", isbn).as_str(), Some(isbn.to_string())));
        }
        self.transactions.insert(txn.txn_id.clone(), txn.clone());
        Ok(txn)
    }

    /// Closes an open loan as of `today` and returns the fine charged.
    pub fn return_book(&mut self, txn_id: &str, today: NaiveDate) -> LibraryResult<f64> {
        let txn = self.transactions.get_mut(txn_id)
            .ok_or_else(|| LibraryError::not_found(format!("transaction {} not found", txn_id).as_str()))?;
        if let Some(returned_on) = txn.returned_on {
            return Err(LibraryError::already_returned(
                format!("transaction {} was already returned on {}", txn_id, returned_on).as_str()));
        }
        let book = self.books.get_mut(&txn.isbn)
            .ok_or_else(|| LibraryError::not_found(
                format!("book {} of transaction {} not found", txn.isbn, txn_id).as_str()))?;

        let fine = self.fine_policy.accrued(txn, today);
        txn.close(today, fine);
        book.return_copy();
        Ok(fine)
    }

    pub fn book(&self, isbn: &str) -> LibraryResult<&BookEntity> {
        self.books.get(isbn)
            .ok_or_else(|| LibraryError::not_found(format!("book {} not found", isbn).as_str()))
    }

    pub fn member(&self, member_id: &str) -> LibraryResult<&MemberEntity> {
        self.members.get(member_id)
            .ok_or_else(|| LibraryError::not_found(format!("member {} not found", member_id).as_str()))
    }

    pub fn transaction(&self, txn_id: &str) -> LibraryResult<&TransactionEntity> {
        self.transactions.get(txn_id)
            .ok_or_else(|| LibraryError::not_found(format!("transaction {} not found", txn_id).as_str()))
    }

    pub fn books(&self) -> Vec<&BookEntity> {
        let mut books: Vec<&BookEntity> = self.books.values().collect();
        books.sort_by(|a, b| a.isbn.cmp(&b.isbn));
        books
    }

    pub fn members(&self) -> Vec<&MemberEntity> {
        let mut members: Vec<&MemberEntity> = self.members.values().collect();
        members.sort_by(|a, b| a.joined_on.cmp(&b.joined_on).then_with(|| a.member_id.cmp(&b.member_id)));
        members
    }

    pub fn transactions(&self) -> Vec<&TransactionEntity> {
        let mut txns: Vec<&TransactionEntity> = self.transactions.values().collect();
        txns.sort_by(|a, b| a.issued_on.cmp(&b.issued_on).then_with(|| a.txn_id.cmp(&b.txn_id)));
        txns
    }

    pub fn open_loans(&self, isbn: &str) -> usize {
        self.transactions.values().filter(|t| t.is_open() && t.isbn == isbn).count()
    }

    // open loans whose due date lies before `today`
    pub fn overdue(&self, today: NaiveDate) -> Vec<&TransactionEntity> {
        self.transactions().into_iter()
            .filter(|t| t.is_overdue(today))
            .collect()
    }

    pub fn stats(&self, today: NaiveDate) -> CatalogStats {
        CatalogStats {
            books: self.books.len(),
            total_copies: self.books.values().map(|b| u64::from(b.total_copies)).sum(),
            available_copies: self.books.values().map(|b| u64::from(b.available_copies)).sum(),
            members: self.members.len(),
            transactions: self.transactions.len(),
            open_loans: self.transactions.values().filter(|t| t.is_open()).count(),
            overdue_loans: self.overdue(today).len(),
            fines_collected: self.transactions.values().map(|t| t.fine_paid).sum(),
        }
    }

    /// Checks keys, references and the copy reconciliation rule for the
    /// whole catalog.
    pub fn verify(&self) -> LibraryResult<()> {
        for (isbn, book) in &self.books {
            if *isbn != book.id() {
                return Err(LibraryError::invalid_argument(
                    format!("book stored under {} has isbn {}", isbn, book.isbn).as_str(), None));
            }
            if book.available_copies > book.total_copies {
                return Err(LibraryError::invalid_argument(
                    format!("book {} has {} available of {} copies", isbn,
                            book.available_copies, book.total_copies).as_str(), None));
            }
            let open = self.open_loans(isbn);
            if u64::from(book.on_loan()) != open as u64 {
                return Err(LibraryError::invalid_argument(
                    format!("book {} has {} copies out but {} open loans", isbn,
                            book.on_loan(), open).as_str(), None));
            }
        }
        for (member_id, member) in &self.members {
            if *member_id != member.id() {
                return Err(LibraryError::invalid_argument(
                    format!("member stored under {} has id {}", member_id, member.member_id).as_str(), None));
            }
        }
        for (txn_id, txn) in &self.transactions {
            if *txn_id != txn.id() {
                return Err(LibraryError::invalid_argument(
                    format!("transaction stored under {} has id {}", txn_id, txn.txn_id).as_str(), None));
            }
            if !self.books.contains_key(&txn.isbn) {
                return Err(LibraryError::invalid_argument(
                    format!("transaction {} references unknown book {}", txn_id, txn.isbn).as_str(), None));
            }
            if !self.members.contains_key(&txn.member_id) {
                return Err(LibraryError::invalid_argument(
                    format!("transaction {} references unknown member {}", txn_id, txn.member_id).as_str(), None));
            }
            if txn.fine_paid < 0.0 {
                return Err(LibraryError::invalid_argument(
                    format!("transaction {} has a negative fine", txn_id).as_str(), None));
            }
        }
        Ok(())
    }

    pub fn encode(&self) -> LibraryResult<Vec<u8>> {
        let document = CatalogDocumentRef {
            books: self.books.iter().map(|(k, v)| (k.as_str(), v)).collect(),
            members: self.members.iter().map(|(k, v)| (k.as_str(), v)).collect(),
            transactions: self.transactions.iter().map(|(k, v)| (k.as_str(), v)).collect(),
        };
        let bytes = serde_json::to_vec_pretty(&document)?;
        debug!(bytes = bytes.len(), "encoded catalog document");
        Ok(bytes)
    }

    /// Rebuilds a catalog from a stored document. A document that decodes
    /// but breaks the catalog's invariants is rejected as corrupt.
    pub fn decode(bytes: &[u8], fine_policy: FinePolicy) -> LibraryResult<Self> {
        let document: CatalogDocument = serde_json::from_slice(bytes)?;
        let catalog = Self {
            books: document.books,
            members: document.members,
            transactions: document.transactions,
            fine_policy,
        };
        catalog.verify().map_err(|err| LibraryError::persistence(
            format!("stored catalog is inconsistent: {}", err).as_str(), Some("corrupt".to_string())))?;
        debug!(books = catalog.books.len(), members = catalog.members.len(),
            transactions = catalog.transactions.len(), "decoded catalog document");
        Ok(catalog)
    }
}

fn clean_opt(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn clean_list(values: Vec<String>) -> Vec<String> {
    values.into_iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect()
}
