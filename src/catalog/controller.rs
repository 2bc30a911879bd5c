use axum::{
    extract::{Path, State},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{Value};
use crate::books::dto::BookDto;
use crate::catalog::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest, AddBookCommandResponse};
use crate::catalog::command::add_member_cmd::{AddMemberCommand, AddMemberCommandRequest, AddMemberCommandResponse};
use crate::catalog::command::issue_book_cmd::{IssueBookCommand, IssueBookCommandRequest, IssueBookCommandResponse};
use crate::catalog::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest, ReturnBookCommandResponse};
use crate::catalog::dto::CatalogStats;
use crate::core::command::Command;
use crate::core::controller::{AppState, json_to_server_error, ServerError};
use crate::loans::dto::{OverdueLoanDto, TransactionDto};
use crate::members::dto::MemberDto;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(stats))
        .route("/books", get(list_books).post(add_book))
        .route("/books/:isbn", get(find_book_by_isbn))
        .route("/members", get(list_members).post(add_member))
        .route("/members/:id", get(find_member_by_id))
        .route("/transactions", get(list_transactions))
        .route("/transactions/overdue", get(list_overdue))
        .route("/transactions/:id", get(find_transaction_by_id))
        .route("/issue", post(issue_book))
        .route("/return", post(return_book))
        .with_state(state)
}

pub(crate) async fn stats(
    State(state): State<AppState>) -> Result<Json<CatalogStats>, ServerError> {
    Ok(Json(state.catalog.stats().await?))
}

pub(crate) async fn list_books(
    State(state): State<AppState>) -> Result<Json<Vec<BookDto>>, ServerError> {
    Ok(Json(state.catalog.books().await?))
}

pub(crate) async fn add_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<AddBookCommandResponse>, ServerError> {
    let req: AddBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = AddBookCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_book_by_isbn(
    State(state): State<AppState>,
    Path(isbn): Path<String>) -> Result<Json<BookDto>, ServerError> {
    Ok(Json(state.catalog.find_book_by_isbn(isbn.as_str()).await?))
}

pub(crate) async fn list_members(
    State(state): State<AppState>) -> Result<Json<Vec<MemberDto>>, ServerError> {
    Ok(Json(state.catalog.members().await?))
}

pub(crate) async fn add_member(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<AddMemberCommandResponse>, ServerError> {
    let req: AddMemberCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = AddMemberCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn find_member_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>) -> Result<Json<MemberDto>, ServerError> {
    Ok(Json(state.catalog.find_member_by_id(id.as_str()).await?))
}

pub(crate) async fn list_transactions(
    State(state): State<AppState>) -> Result<Json<Vec<TransactionDto>>, ServerError> {
    Ok(Json(state.catalog.transactions().await?))
}

pub(crate) async fn list_overdue(
    State(state): State<AppState>) -> Result<Json<Vec<OverdueLoanDto>>, ServerError> {
    Ok(Json(state.catalog.query_overdue().await?))
}

pub(crate) async fn find_transaction_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>) -> Result<Json<TransactionDto>, ServerError> {
    Ok(Json(state.catalog.find_transaction_by_id(id.as_str()).await?))
}

pub(crate) async fn issue_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<IssueBookCommandResponse>, ServerError> {
    let req: IssueBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = IssueBookCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res))
}

pub(crate) async fn return_book(
    State(state): State<AppState>,
    json: Json<Value>) -> Result<Json<ReturnBookCommandResponse>, ServerError> {
    let req: ReturnBookCommandRequest = serde_json::from_value(json.0).map_err(json_to_server_error)?;
    let res = ReturnBookCommand::new(state.catalog).execute(req).await?;
    Ok(Json(res))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use axum::extract::{Path, State};
    use axum::http::StatusCode;
    use axum::response::Json;
    use serde_json::json;
    use crate::catalog::controller::{add_book, add_member, find_book_by_isbn, find_transaction_by_id,
                                     issue_book, list_books, list_overdue, return_book, stats};
    use crate::catalog::factory;
    use crate::core::controller::AppState;
    use crate::core::domain::Configuration;
    use crate::core::library::LoanStatus;
    use crate::core::repository::RepositoryStore;

    fn build_state() -> AppState {
        let svc = factory::create_catalog_service(&Configuration::default(), RepositoryStore::Memory)
            .expect("should create service");
        AppState::new(Arc::from(svc))
    }

    #[tokio::test]
    async fn test_should_lend_and_return_over_handlers() {
        let state = build_state();
        let book = add_book(State(state.clone()), Json(json!({"isbn": "978-0", "title": "Dune", "copies": 2})))
            .await.expect("should add book");
        assert_eq!(2, book.0.book.total_copies);

        let member = add_member(State(state.clone()), Json(json!({"name": "Ada"})))
            .await.expect("should add member");
        let member_id = member.0.member.member_id.clone();

        let issued = issue_book(State(state.clone()), Json(json!({"member_id": member_id, "isbn": "978-0"})))
            .await.expect("should issue");
        let txn_id = issued.0.transaction.txn_id.clone();
        assert_eq!(1, find_book_by_isbn(State(state.clone()), Path("978-0".to_string()))
            .await.expect("should find book").0.available_copies);

        let returned = return_book(State(state.clone()), Json(json!({"txn_id": txn_id})))
            .await.expect("should return");
        assert_eq!(0.0, returned.0.fine);
        let txn = find_transaction_by_id(State(state.clone()), Path(txn_id)).await.expect("should find txn");
        assert_eq!(LoanStatus::Returned, txn.0.status);

        let counts = stats(State(state.clone())).await.expect("should count").0;
        assert_eq!(1, counts.books);
        assert_eq!(1, counts.members);
        assert_eq!(0, counts.open_loans);
        assert_eq!(1, list_books(State(state.clone())).await.expect("should list").0.len());
        assert!(list_overdue(State(state)).await.expect("should list").0.is_empty());
    }

    #[tokio::test]
    async fn test_should_map_failures_to_status() {
        let state = build_state();
        let err = add_book(State(state.clone()), Json(json!({"title": "no isbn"}))).await.err().expect("should fail");
        assert_eq!(StatusCode::BAD_REQUEST, err.0);

        let err = add_book(State(state.clone()), Json(json!({"isbn": "978-0", "title": "Dune", "copies": 0})))
            .await.err().expect("should fail");
        assert_eq!(StatusCode::BAD_REQUEST, err.0);

        let err = find_book_by_isbn(State(state.clone()), Path("missing".to_string())).await.err().expect("should fail");
        assert_eq!(StatusCode::NOT_FOUND, err.0);

        add_book(State(state.clone()), Json(json!({"isbn": "978-0", "title": "Dune"}))).await.expect("should add book");
        let member = add_member(State(state.clone()), Json(json!({"name": "Ada"}))).await.expect("should add member");
        let member_id = member.0.member.member_id.clone();
        issue_book(State(state.clone()), Json(json!({"member_id": member_id, "isbn": "978-0"})))
            .await.expect("should issue");
        let err = issue_book(State(state.clone()), Json(json!({"member_id": member_id, "isbn": "978-0"})))
            .await.err().expect("should fail");
        assert_eq!(StatusCode::CONFLICT, err.0);
    }
}
