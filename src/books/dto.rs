use serde::{Deserialize, Serialize};
use crate::books::domain::model::BookEntity;

// BookDto is the read-only view of a book handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    pub isbn: String,
    pub title: String,
    pub authors: Vec<String>,
    pub total_copies: u32,
    pub available_copies: u32,
    pub pub_year: Option<i32>,
    pub tags: Vec<String>,
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            isbn: other.isbn.to_string(),
            title: other.title.to_string(),
            authors: other.authors.clone(),
            total_copies: other.total_copies,
            available_copies: other.available_copies,
            pub_year: other.pub_year,
            tags: other.tags.clone(),
        }
    }
}
