use std::str::FromStr;
use thiserror::Error;

/// What happens to an author's books when the author is deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthorDeletePolicy {
    /// Refuse to delete an author that is still referenced by a book.
    #[default]
    Restrict,
    /// Delete the author's books together with the author.
    Cascade,
}

impl FromStr for AuthorDeletePolicy {
    type Err = AuthorDeletePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "restrict" => Ok(Self::Restrict),
            "cascade" => Ok(Self::Cascade),
            other => Err(AuthorDeletePolicyError(other.into())),
        }
    }
}

#[derive(Error, Debug)]
#[error("\"{0}\" is not a valid author delete policy, expected \"restrict\" or \"cascade\"")]
pub struct AuthorDeletePolicyError(String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    id: i64,
    name: Option<String>,
}

impl Author {
    pub const fn new(id: i64, name: Option<String>) -> Self {
        Self { id, name }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    id: i64,
    title: Option<String>,
    author: Author,
}

impl Book {
    pub const fn new(id: i64, title: Option<String>, author: Author) -> Self {
        Self { id, title, author }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    pub const fn author(&self) -> &Author {
        &self.author
    }

    /// Points the book at another author. Only the author id is persisted,
    /// so an id-only stub is enough.
    pub fn set_author(&mut self, author: Author) {
        self.author = author;
    }
}

#[derive(Debug)]
pub struct CreateAuthorRequest {
    name: Option<String>,
}

impl CreateAuthorRequest {
    pub const fn new(name: Option<String>) -> Self {
        Self { name }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[derive(Error, Debug)]
#[error(transparent)]
pub struct CreateAuthorError(#[from] pub anyhow::Error);

#[derive(Debug)]
pub struct FindAuthorRequest {
    id: i64,
}

impl FindAuthorRequest {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Error, Debug)]
pub enum FindAuthorError {
    #[error("Author with id \"{id}\" does not exist")]
    NotFound { id: i64 },
    #[error(transparent)]
    Other(anyhow::Error),
}

#[derive(Error, Debug)]
#[error(transparent)]
pub struct FindAllAuthorsError(#[from] pub anyhow::Error);

#[derive(Debug)]
pub struct UpdateAuthorRequest {
    id: i64,
    name: Option<String>,
}

impl UpdateAuthorRequest {
    pub const fn new(id: i64, name: Option<String>) -> Self {
        Self { id, name }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

#[derive(Error, Debug)]
pub enum UpdateAuthorError {
    #[error("Author with id \"{id}\" does not exist")]
    NotFound { id: i64 },
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<FindAuthorError> for UpdateAuthorError {
    fn from(err: FindAuthorError) -> Self {
        match err {
            FindAuthorError::NotFound { id } => Self::NotFound { id },
            FindAuthorError::Other(cause) => Self::Other(cause),
        }
    }
}

#[derive(Debug)]
pub struct DeleteAuthorRequest {
    id: i64,
}

impl DeleteAuthorRequest {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Error, Debug)]
pub enum DeleteAuthorError {
    #[error("Author with id \"{id}\" is still referenced by one or more books")]
    Referenced { id: i64 },
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug)]
pub struct CreateBookRequest {
    title: Option<String>,
    author_id: i64,
}

impl CreateBookRequest {
    pub const fn new(title: Option<String>, author_id: i64) -> Self {
        Self { title, author_id }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub const fn author_id(&self) -> i64 {
        self.author_id
    }
}

#[derive(Error, Debug)]
pub enum CreateBookError {
    #[error("Author with id \"{id}\" does not exist")]
    UnknownAuthor { id: i64 },
    #[error(transparent)]
    Other(anyhow::Error),
}

#[derive(Debug)]
pub struct FindBookRequest {
    id: i64,
}

impl FindBookRequest {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Error, Debug)]
pub enum FindBookError {
    #[error("Book with id \"{id}\" does not exist")]
    NotFound { id: i64 },
    #[error(transparent)]
    Other(anyhow::Error),
}

#[derive(Error, Debug)]
#[error(transparent)]
pub struct FindAllBooksError(#[from] pub anyhow::Error);

#[derive(Debug)]
pub struct UpdateBookRequest {
    id: i64,
    title: Option<String>,
    author_id: i64,
}

impl UpdateBookRequest {
    pub const fn new(id: i64, title: Option<String>, author_id: i64) -> Self {
        Self {
            id,
            title,
            author_id,
        }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub const fn author_id(&self) -> i64 {
        self.author_id
    }
}

#[derive(Error, Debug)]
pub enum UpdateBookError {
    #[error("Book with id \"{id}\" does not exist")]
    NotFound { id: i64 },
    #[error("Author with id \"{id}\" does not exist")]
    UnknownAuthor { id: i64 },
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<FindBookError> for UpdateBookError {
    fn from(err: FindBookError) -> Self {
        match err {
            FindBookError::NotFound { id } => Self::NotFound { id },
            FindBookError::Other(cause) => Self::Other(cause),
        }
    }
}

#[derive(Debug)]
pub struct DeleteBookRequest {
    id: i64,
}

impl DeleteBookRequest {
    pub const fn new(id: i64) -> Self {
        Self { id }
    }

    pub const fn id(&self) -> i64 {
        self.id
    }
}

#[derive(Error, Debug)]
#[error(transparent)]
pub struct DeleteBookError(#[from] pub anyhow::Error);
