use crate::models::{
    Author, AuthorDeletePolicy, Book, CreateAuthorError, CreateAuthorRequest, CreateBookError,
    CreateBookRequest, DeleteAuthorError, DeleteAuthorRequest, DeleteBookError, DeleteBookRequest,
    FindAllAuthorsError, FindAllBooksError, FindAuthorError, FindAuthorRequest, FindBookError,
    FindBookRequest, UpdateAuthorError, UpdateBookError,
};
use async_trait::async_trait;

#[async_trait]
pub trait AuthorRepository: Send + Sync + 'static {
    async fn create_author(&self, req: &CreateAuthorRequest) -> Result<Author, CreateAuthorError>;

    async fn find_author(&self, req: &FindAuthorRequest) -> Result<Author, FindAuthorError>;

    async fn find_all_authors(&self) -> Result<Vec<Author>, FindAllAuthorsError>;

    /// Overwrites every mutable column of an existing author row.
    async fn save_author(&self, author: &Author) -> Result<Author, UpdateAuthorError>;

    /// Returns whether a row was deleted; a missing id is a no-op.
    async fn delete_author(
        &self,
        req: &DeleteAuthorRequest,
        policy: AuthorDeletePolicy,
    ) -> Result<bool, DeleteAuthorError>;
}

#[async_trait]
pub trait BookRepository: Send + Sync + 'static {
    async fn create_book(&self, req: &CreateBookRequest) -> Result<Book, CreateBookError>;

    async fn find_book(&self, req: &FindBookRequest) -> Result<Book, FindBookError>;

    async fn find_all_books(&self) -> Result<Vec<Book>, FindAllBooksError>;

    /// Overwrites the title and author reference of an existing book row and
    /// returns it with the (possibly new) author populated.
    async fn save_book(&self, book: &Book) -> Result<Book, UpdateBookError>;

    /// Returns whether a row was deleted; a missing id is a no-op.
    async fn delete_book(&self, req: &DeleteBookRequest) -> Result<bool, DeleteBookError>;
}
