use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum InfomedError {
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(#[from] SqlxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl From<figment::Error> for InfomedError {
    fn from(e: figment::Error) -> Self {
        InfomedError::Config(Box::new(e))
    }
}

impl InfomedError {
    /// True when the store rejected a write because of a UNIQUE constraint.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            InfomedError::Database(SqlxError::Database(db_err)) => db_err.is_unique_violation(),
            _ => false,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            InfomedError::Conflict(_) => StatusCode::CONFLICT,
            InfomedError::NotFound(_) => StatusCode::NOT_FOUND,
            InfomedError::BadRequest(_) => StatusCode::BAD_REQUEST,
            InfomedError::Database(_) | InfomedError::Io(_) | InfomedError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for InfomedError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let mensagem = match self {
            InfomedError::Conflict(msg)
            | InfomedError::NotFound(msg)
            | InfomedError::BadRequest(msg) => msg,
            InfomedError::Database(_) | InfomedError::Io(_) | InfomedError::Config(_) => {
                "Ocorreu um erro interno no servidor.".to_string()
            }
        };
        (status, Json(ErrorBody { mensagem })).into_response()
    }
}

/// JSON error body shared by every endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub mensagem: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handled_errors_map_to_their_status() {
        assert_eq!(
            InfomedError::Conflict("dup".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            InfomedError::NotFound("gone".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            InfomedError::BadRequest("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            InfomedError::Database(SqlxError::RowNotFound).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn row_not_found_is_not_a_unique_violation() {
        assert!(!InfomedError::Database(SqlxError::RowNotFound).is_unique_violation());
        assert!(!InfomedError::BadRequest("x".into()).is_unique_violation());
    }
}
