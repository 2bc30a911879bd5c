use std::sync::Arc;
use axum::http::StatusCode;
use crate::catalog::domain::CatalogService;
use crate::core::command::CommandError;
use crate::core::library::LibraryError;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogService>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogService>) -> AppState {
        AppState {
            catalog,
        }
    }
}

pub type ServerError = (StatusCode, String);

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    (StatusCode::BAD_REQUEST, format!("{}", err))
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Validation { .. } => {
                (StatusCode::BAD_REQUEST, format!("{:?}", err))
            }
            CommandError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, format!("{:?}", err))
            }
            CommandError::Unavailable { .. } => {
                (StatusCode::CONFLICT, format!("{:?}", err))
            }
            CommandError::Conflict { .. } => {
                (StatusCode::CONFLICT, format!("{:?}", err))
            }
            CommandError::Storage { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{:?}", err))
            }
        }
    }
}

impl From<LibraryError> for ServerError {
    fn from(err: LibraryError) -> Self {
        ServerError::from(CommandError::from(err))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use crate::core::controller::ServerError;
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_map_errors_to_status() {
        assert_eq!(StatusCode::BAD_REQUEST, ServerError::from(LibraryError::invalid_argument("test", None)).0);
        assert_eq!(StatusCode::NOT_FOUND, ServerError::from(LibraryError::not_found("test")).0);
        assert_eq!(StatusCode::CONFLICT, ServerError::from(LibraryError::unavailable("test", None)).0);
        assert_eq!(StatusCode::CONFLICT, ServerError::from(LibraryError::already_returned("test")).0);
        assert_eq!(StatusCode::INTERNAL_SERVER_ERROR, ServerError::from(LibraryError::persistence("test", None)).0);
    }
}
