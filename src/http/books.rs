use crate::http::AppState;
use crate::http::authors::AuthorHttpResponse;
use crate::http::handler::{ApiError, ApiSuccess};
use crate::models::{Book, CreateBookRequest, DeleteBookRequest, FindBookRequest, UpdateBookRequest};
use crate::services::BookService;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Body of `POST` and `PUT` on `/api/livres`. A missing `titre` reads as null.
#[derive(Debug, Deserialize)]
pub struct BookHttpRequest {
    titre: Option<String>,
    auteur: AuthorReferenceHttpRequest,
}

/// Only the id of the embedded author is read, other fields are ignored.
#[derive(Debug, Deserialize)]
pub struct AuthorReferenceHttpRequest {
    id: i64,
}

#[derive(Debug, Serialize)]
pub struct BookHttpResponse {
    id: i64,
    titre: Option<String>,
    auteur: AuthorHttpResponse,
}

impl From<Book> for BookHttpResponse {
    fn from(value: Book) -> Self {
        Self {
            id: value.id(),
            titre: value.title().map(str::to_string),
            auteur: value.author().clone().into(),
        }
    }
}

pub async fn list_books<S: BookService>(
    State(state): State<AppState<S>>,
) -> Result<ApiSuccess<Vec<BookHttpResponse>>, ApiError> {
    let books = state.service.get_all_books().await?;
    Ok(ApiSuccess::ok(
        books.into_iter().map(BookHttpResponse::from).collect(),
    ))
}

pub async fn get_book<S: BookService>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<ApiSuccess<BookHttpResponse>, ApiError> {
    state
        .service
        .get_book(&FindBookRequest::new(id))
        .await
        .map_err(ApiError::from)
        .map(|book| ApiSuccess::ok(book.into()))
}

pub async fn create_book<S: BookService>(
    State(state): State<AppState<S>>,
    Json(body): Json<BookHttpRequest>,
) -> Result<ApiSuccess<BookHttpResponse>, ApiError> {
    let req = CreateBookRequest::new(body.titre, body.auteur.id);
    state
        .service
        .create_book(&req)
        .await
        .map_err(ApiError::from)
        .map(|book| ApiSuccess::ok(book.into()))
}

pub async fn update_book<S: BookService>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
    Json(body): Json<BookHttpRequest>,
) -> Result<ApiSuccess<BookHttpResponse>, ApiError> {
    let req = UpdateBookRequest::new(id, body.titre, body.auteur.id);
    state
        .service
        .update_book(&req)
        .await
        .map_err(ApiError::from)
        .map(|book| ApiSuccess::ok(book.into()))
}

pub async fn delete_book<S: BookService>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .delete_book(&DeleteBookRequest::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
