use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    /// Storage failures are passed through to the client verbatim.
    #[error("{0}")]
    Storage(#[from] sqlx::Error),
}

#[derive(serde::Serialize)]
pub struct ErrJsonResp {
    pub message: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Storage(err) => tracing::error!("storage error: {err}"),
            other => tracing::debug!("{other}"),
        }

        HttpResponse::build(self.status_code()).json(ErrJsonResp {
            message: self.to_string(),
        })
    }
}
