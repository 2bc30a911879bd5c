use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::loans::dto::TransactionDto;

pub(crate) struct IssueBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl IssueBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct IssueBookCommandRequest {
    pub(crate) member_id: String,
    pub(crate) isbn: String,
    // loan period in days, configured default when absent
    #[serde(default)]
    pub(crate) days: Option<i64>,
}

impl IssueBookCommandRequest {
    pub fn new(member_id: &str, isbn: &str, days: Option<i64>) -> Self {
        Self {
            member_id: member_id.to_string(),
            isbn: isbn.to_string(),
            days,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct IssueBookCommandResponse {
    pub transaction: TransactionDto,
}

impl IssueBookCommandResponse {
    pub fn new(transaction: TransactionDto) -> Self {
        Self {
            transaction,
        }
    }
}

#[async_trait]
impl Command<IssueBookCommandRequest, IssueBookCommandResponse> for IssueBookCommand {
    async fn execute(&self, req: IssueBookCommandRequest) -> Result<IssueBookCommandResponse, CommandError> {
        self.catalog_service.issue(req.member_id.as_str(), req.isbn.as_str(), req.days)
            .await.map_err(CommandError::from).map(IssueBookCommandResponse::new)
    }
}
