use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};

// BookEntity abstracts a title/edition keyed by isbn, and all physical copies of it
// that the library owns.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BookEntity {
    pub isbn: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    pub total_copies: u32,
    pub available_copies: u32,
    #[serde(default)]
    pub pub_year: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl BookEntity {
    pub fn new(isbn: &str, title: &str, authors: Vec<String>, copies: u32,
               pub_year: Option<i32>, tags: Vec<String>) -> Self {
        Self {
            isbn: isbn.to_string(),
            title: title.to_string(),
            authors,
            total_copies: copies,
            available_copies: copies,
            pub_year,
            tags,
        }
    }

    // merges another acquisition of the same isbn; counts are left untouched on overflow
    pub fn add_copies(&mut self, copies: u32) -> LibraryResult<()> {
        match (self.total_copies.checked_add(copies), self.available_copies.checked_add(copies)) {
            (Some(total), Some(available)) => {
                self.total_copies = total;
                self.available_copies = available;
                Ok(())
            }
            _ => Err(LibraryError::invalid_argument(
                format!("adding {} copies to {} exceeds the copy limit", copies, self.isbn).as_str(),
                Some(self.isbn.to_string()))),
        }
    }

    // takes one copy off the shelf, false when none is left
    pub fn checkout_copy(&mut self) -> bool {
        if self.available_copies == 0 {
            return false;
        }
        self.available_copies -= 1;
        true
    }

    pub fn return_copy(&mut self) {
        if self.available_copies < self.total_copies {
            self.available_copies += 1;
        }
    }

    pub fn on_loan(&self) -> u32 {
        self.total_copies.saturating_sub(self.available_copies)
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> String {
        self.isbn.to_string()
    }
}
