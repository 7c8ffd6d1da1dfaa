use crate::models::{
    CreateAuthorError, CreateBookError, DeleteAuthorError, DeleteBookError, FindAllAuthorsError,
    FindAllBooksError, FindAuthorError, FindBookError, UpdateAuthorError, UpdateBookError,
};
use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

#[derive(Debug)]
pub struct ApiSuccess<T: Serialize>(StatusCode, Json<T>);

impl<T: Serialize> ApiSuccess<T> {
    pub const fn new(status: StatusCode, data: T) -> Self {
        Self(status, Json(data))
    }

    pub const fn ok(data: T) -> Self {
        Self::new(StatusCode::OK, data)
    }
}

impl<T: Serialize> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> axum::response::Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    status_code: u16,
    data: T,
}

impl<T: Serialize> ApiResponse<T> {
    const fn new(status: StatusCode, data: T) -> Self {
        Self {
            status_code: status.as_u16(),
            data,
        }
    }
}

#[derive(Debug)]
pub enum ApiError {
    InternalServerError(String),
    NotFound(String),
    Conflict(String),
    UnprocessableEntity(String),
}

impl ApiError {
    fn internal(cause: &anyhow::Error) -> Self {
        tracing::error!(error = ?cause, "request failed");
        Self::InternalServerError("Internal server error".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, msg) = match self {
            Self::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
        };
        (status, Json(ApiResponse::new(status, msg))).into_response()
    }
}

impl From<FindAllAuthorsError> for ApiError {
    fn from(err: FindAllAuthorsError) -> Self {
        Self::internal(&err.0)
    }
}

impl From<FindAuthorError> for ApiError {
    fn from(err: FindAuthorError) -> Self {
        match err {
            FindAuthorError::NotFound { .. } => Self::NotFound(err.to_string()),
            FindAuthorError::Other(cause) => Self::internal(&cause),
        }
    }
}

impl From<CreateAuthorError> for ApiError {
    fn from(err: CreateAuthorError) -> Self {
        Self::internal(&err.0)
    }
}

impl From<UpdateAuthorError> for ApiError {
    fn from(err: UpdateAuthorError) -> Self {
        match err {
            UpdateAuthorError::NotFound { .. } => Self::NotFound(err.to_string()),
            UpdateAuthorError::Other(cause) => Self::internal(&cause),
        }
    }
}

impl From<DeleteAuthorError> for ApiError {
    fn from(err: DeleteAuthorError) -> Self {
        match err {
            DeleteAuthorError::Referenced { .. } => Self::Conflict(err.to_string()),
            DeleteAuthorError::Other(cause) => Self::internal(&cause),
        }
    }
}

impl From<FindAllBooksError> for ApiError {
    fn from(err: FindAllBooksError) -> Self {
        Self::internal(&err.0)
    }
}

impl From<FindBookError> for ApiError {
    fn from(err: FindBookError) -> Self {
        match err {
            FindBookError::NotFound { .. } => Self::NotFound(err.to_string()),
            FindBookError::Other(cause) => Self::internal(&cause),
        }
    }
}

impl From<CreateBookError> for ApiError {
    fn from(err: CreateBookError) -> Self {
        match err {
            CreateBookError::UnknownAuthor { .. } => Self::UnprocessableEntity(err.to_string()),
            CreateBookError::Other(cause) => Self::internal(&cause),
        }
    }
}

impl From<UpdateBookError> for ApiError {
    fn from(err: UpdateBookError) -> Self {
        match err {
            UpdateBookError::NotFound { .. } => Self::NotFound(err.to_string()),
            UpdateBookError::UnknownAuthor { .. } => Self::UnprocessableEntity(err.to_string()),
            UpdateBookError::Other(cause) => Self::internal(&cause),
        }
    }
}

impl From<DeleteBookError> for ApiError {
    fn from(err: DeleteBookError) -> Self {
        Self::internal(&err.0)
    }
}
