use std::sync::Arc;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::catalog::domain::CatalogService;
use crate::core::command::{Command, CommandError};
use crate::loans::dto::TransactionDto;

pub(crate) struct ReturnBookCommand {
    catalog_service: Arc<dyn CatalogService>,
}

impl ReturnBookCommand {
    pub(crate) fn new(catalog_service: Arc<dyn CatalogService>) -> Self {
        Self {
            catalog_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReturnBookCommandRequest {
    pub(crate) txn_id: String,
}

impl ReturnBookCommandRequest {
    pub fn new(txn_id: &str) -> Self {
        Self {
            txn_id: txn_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ReturnBookCommandResponse {
    pub fine: f64,
    pub transaction: TransactionDto,
}

impl ReturnBookCommandResponse {
    pub fn new(transaction: TransactionDto) -> Self {
        Self {
            fine: transaction.fine_paid,
            transaction,
        }
    }
}

#[async_trait]
impl Command<ReturnBookCommandRequest, ReturnBookCommandResponse> for ReturnBookCommand {
    async fn execute(&self, req: ReturnBookCommandRequest) -> Result<ReturnBookCommandResponse, CommandError> {
        self.catalog_service.return_book(req.txn_id.as_str())
            .await.map_err(CommandError::from).map(ReturnBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use crate::catalog::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest};
    use crate::catalog::domain::CatalogService;
    use crate::catalog::factory;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::library::LoanStatus;
    use crate::core::repository::RepositoryStore;

    #[tokio::test]
    async fn test_should_run_return_book() {
        let svc: Arc<dyn CatalogService> = Arc::from(
            factory::create_catalog_service(&Configuration::default(), RepositoryStore::Memory)
                .expect("should create service"));
        svc.add_book("978-0", "Dune", vec![], 1, None, vec![]).await.expect("should add book");
        let member = svc.add_member("Ada", None, None).await.expect("should add member");
        let txn = svc.issue(member.member_id.as_str(), "978-0", None).await.expect("should issue");

        let cmd = ReturnBookCommand::new(svc.clone());
        let res = cmd.execute(ReturnBookCommandRequest::new(txn.txn_id.as_str())).await.expect("should return");
        assert_eq!(0.0, res.fine);
        assert_eq!(LoanStatus::Returned, res.transaction.status);
        assert_eq!(1, svc.find_book_by_isbn("978-0").await.expect("book").available_copies);

        let res = cmd.execute(ReturnBookCommandRequest::new(txn.txn_id.as_str())).await;
        assert!(matches!(res, Err(CommandError::Conflict { .. })));
        let res = cmd.execute(ReturnBookCommandRequest::new("missing")).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }
}
