use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};

pub(crate) struct AddBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl AddBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

fn default_copies() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
pub(crate) struct AddBookCommandRequest {
    pub(crate) isbn: String,
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) authors: Vec<String>,
    #[serde(default = "default_copies")]
    pub(crate) copies: i64,
    #[serde(default)]
    pub(crate) pub_year: Option<i32>,
    #[serde(default)]
    pub(crate) tags: Vec<String>,
}

impl AddBookCommandRequest {
    pub fn new(isbn: &str, title: &str, copies: i64) -> Self {
        Self {
            isbn: isbn.to_string(),
            title: title.to_string(),
            authors: vec![],
            copies,
            pub_year: None,
            tags: vec![],
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddBookCommandResponse {
    pub book: BookDto,
}

impl AddBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        self.catalog_service.add_book(req.isbn.as_str(), req.title.as_str(), req.authors, req.copies,
                                      req.pub_year, req.tags)
            .await.map_err(CommandError::from).map(AddBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;

    fn build_cmd() -> AddBookCommand {
        let svc = factory::create_catalog_service(&Configuration::default(), RepositoryStore::Memory)
            .expect("should create service");
        AddBookCommand::new(Arc::from(svc))
    }

    #[tokio::test]
    async fn test_should_run_add_book() {
        let cmd = build_cmd();
        let res = cmd.execute(AddBookCommandRequest::new("978-0", "Dune", 2)).await.expect("should add book");
        assert_eq!("978-0", res.book.isbn);
        assert_eq!(2, res.book.available_copies);

        let res = cmd.execute(AddBookCommandRequest::new("978-0", "Dune", 1)).await.expect("should add copies");
        assert_eq!(3, res.book.total_copies);
    }

    #[tokio::test]
    async fn test_should_default_copies_from_json() {
        let req: AddBookCommandRequest = serde_json::from_value(serde_json::json!({"isbn": "978-0", "title": "Dune"}))
            .expect("should parse request");
        assert_eq!(1, req.copies);
        assert!(req.authors.is_empty());
    }

    #[tokio::test]
    async fn test_should_reject_invalid_copies() {
        let cmd = build_cmd();
        let res = cmd.execute(AddBookCommandRequest::new("978-0", "Dune", 0)).await;
        assert!(matches!(res, Err(CommandError::Validation { .. })));
    }
}
