use crate::http::AppState;
use crate::http::handler::{ApiError, ApiSuccess};
use crate::models::{
    Author, CreateAuthorRequest, DeleteAuthorRequest, FindAuthorRequest, UpdateAuthorRequest,
};
use crate::services::AuthorService;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

/// Body of `POST` and `PUT` on `/api/auteurs`. A client supplied `id` is ignored.
#[derive(Debug, Deserialize)]
pub struct AuthorHttpRequest {
    nom: Option<String>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct AuthorHttpResponse {
    id: i64,
    nom: Option<String>,
}

impl From<Author> for AuthorHttpResponse {
    fn from(value: Author) -> Self {
        Self {
            id: value.id(),
            nom: value.name().map(str::to_string),
        }
    }
}

pub async fn list_authors<S: AuthorService>(
    State(state): State<AppState<S>>,
) -> Result<ApiSuccess<Vec<AuthorHttpResponse>>, ApiError> {
    let authors = state.service.get_all_authors().await?;
    Ok(ApiSuccess::ok(
        authors.into_iter().map(AuthorHttpResponse::from).collect(),
    ))
}

pub async fn get_author<S: AuthorService>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<ApiSuccess<AuthorHttpResponse>, ApiError> {
    state
        .service
        .get_author(&FindAuthorRequest::new(id))
        .await
        .map_err(ApiError::from)
        .map(|author| ApiSuccess::ok(author.into()))
}

pub async fn create_author<S: AuthorService>(
    State(state): State<AppState<S>>,
    Json(body): Json<AuthorHttpRequest>,
) -> Result<ApiSuccess<AuthorHttpResponse>, ApiError> {
    let req = CreateAuthorRequest::new(body.nom);
    state
        .service
        .create_author(&req)
        .await
        .map_err(ApiError::from)
        .map(|author| ApiSuccess::ok(author.into()))
}

pub async fn update_author<S: AuthorService>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
    Json(body): Json<AuthorHttpRequest>,
) -> Result<ApiSuccess<AuthorHttpResponse>, ApiError> {
    let req = UpdateAuthorRequest::new(id, body.nom);
    state
        .service
        .update_author(&req)
        .await
        .map_err(ApiError::from)
        .map(|author| ApiSuccess::ok(author.into()))
}

pub async fn delete_author<S: AuthorService>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state
        .service
        .delete_author(&DeleteAuthorRequest::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
