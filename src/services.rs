use crate::models::{
    Author, AuthorDeletePolicy, Book, CreateAuthorError, CreateAuthorRequest, CreateBookError,
    CreateBookRequest, DeleteAuthorError, DeleteAuthorRequest, DeleteBookError, DeleteBookRequest,
    FindAllAuthorsError, FindAllBooksError, FindAuthorError, FindAuthorRequest, FindBookError,
    FindBookRequest, UpdateAuthorError, UpdateAuthorRequest, UpdateBookError, UpdateBookRequest,
};
use crate::repositories::{AuthorRepository, BookRepository};
use async_trait::async_trait;

#[async_trait]
pub trait AuthorService: Send + Sync + 'static {
    async fn get_all_authors(&self) -> Result<Vec<Author>, FindAllAuthorsError>;

    async fn get_author(&self, req: &FindAuthorRequest) -> Result<Author, FindAuthorError>;

    async fn create_author(&self, req: &CreateAuthorRequest) -> Result<Author, CreateAuthorError>;

    async fn update_author(&self, req: &UpdateAuthorRequest) -> Result<Author, UpdateAuthorError>;

    async fn delete_author(&self, req: &DeleteAuthorRequest) -> Result<(), DeleteAuthorError>;
}

#[async_trait]
pub trait BookService: Send + Sync + 'static {
    async fn get_all_books(&self) -> Result<Vec<Book>, FindAllBooksError>;

    async fn get_book(&self, req: &FindBookRequest) -> Result<Book, FindBookError>;

    async fn create_book(&self, req: &CreateBookRequest) -> Result<Book, CreateBookError>;

    async fn update_book(&self, req: &UpdateBookRequest) -> Result<Book, UpdateBookError>;

    async fn delete_book(&self, req: &DeleteBookRequest) -> Result<(), DeleteBookError>;
}

/// Wraps a repository; the only logic of its own is the load-modify-save
/// cycle of updates and the configured author delete policy.
#[derive(Debug, Clone)]
pub struct Service<R> {
    repo: R,
    author_delete_policy: AuthorDeletePolicy,
}

impl<R> Service<R> {
    pub const fn new(repo: R, author_delete_policy: AuthorDeletePolicy) -> Self {
        Self {
            repo,
            author_delete_policy,
        }
    }
}

#[async_trait]
impl<R: AuthorRepository> AuthorService for Service<R> {
    async fn get_all_authors(&self) -> Result<Vec<Author>, FindAllAuthorsError> {
        self.repo.find_all_authors().await
    }

    async fn get_author(&self, req: &FindAuthorRequest) -> Result<Author, FindAuthorError> {
        self.repo.find_author(req).await
    }

    async fn create_author(&self, req: &CreateAuthorRequest) -> Result<Author, CreateAuthorError> {
        let author = self.repo.create_author(req).await?;
        tracing::info!(author_id = author.id(), "author created");
        Ok(author)
    }

    async fn update_author(&self, req: &UpdateAuthorRequest) -> Result<Author, UpdateAuthorError> {
        let mut author = self
            .repo
            .find_author(&FindAuthorRequest::new(req.id()))
            .await?;
        author.set_name(req.name().map(str::to_string));
        self.repo.save_author(&author).await
    }

    async fn delete_author(&self, req: &DeleteAuthorRequest) -> Result<(), DeleteAuthorError> {
        let policy = self.author_delete_policy;
        if self.repo.delete_author(req, policy).await? {
            tracing::info!(author_id = req.id(), ?policy, "author deleted");
        } else {
            tracing::debug!(author_id = req.id(), "no author to delete");
        }
        Ok(())
    }
}

#[async_trait]
impl<R: BookRepository> BookService for Service<R> {
    async fn get_all_books(&self) -> Result<Vec<Book>, FindAllBooksError> {
        self.repo.find_all_books().await
    }

    async fn get_book(&self, req: &FindBookRequest) -> Result<Book, FindBookError> {
        self.repo.find_book(req).await
    }

    async fn create_book(&self, req: &CreateBookRequest) -> Result<Book, CreateBookError> {
        let book = self.repo.create_book(req).await?;
        tracing::info!(
            book_id = book.id(),
            author_id = book.author().id(),
            "book created"
        );
        Ok(book)
    }

    async fn update_book(&self, req: &UpdateBookRequest) -> Result<Book, UpdateBookError> {
        let mut book = self.repo.find_book(&FindBookRequest::new(req.id())).await?;
        book.set_title(req.title().map(str::to_string));
        if book.author().id() != req.author_id() {
            book.set_author(Author::new(req.author_id(), None));
        }
        self.repo.save_book(&book).await
    }

    async fn delete_book(&self, req: &DeleteBookRequest) -> Result<(), DeleteBookError> {
        if self.repo.delete_book(req).await? {
            tracing::info!(book_id = req.id(), "book deleted");
        } else {
            tracing::debug!(book_id = req.id(), "no book to delete");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Sqlite;

    async fn service(policy: AuthorDeletePolicy) -> Service<Sqlite> {
        let db = Sqlite::new("sqlite::memory:").await.unwrap();
        Service::new(db, policy)
    }

    async fn author(svc: &Service<Sqlite>, name: &str) -> Author {
        svc.create_author(&CreateAuthorRequest::new(Some(name.into())))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn update_author_overwrites_name_only() {
        let svc = service(AuthorDeletePolicy::Restrict).await;
        let hugo = author(&svc, "Hugo").await;

        let updated = svc
            .update_author(&UpdateAuthorRequest::new(
                hugo.id(),
                Some("Victor Hugo".into()),
            ))
            .await
            .unwrap();
        assert_eq!(updated.id(), hugo.id());
        assert_eq!(updated.name(), Some("Victor Hugo"));

        let found = svc
            .get_author(&FindAuthorRequest::new(hugo.id()))
            .await
            .unwrap();
        assert_eq!(found, updated);
    }

    #[tokio::test]
    async fn update_missing_author_is_not_found() {
        let svc = service(AuthorDeletePolicy::Restrict).await;
        let err = svc
            .update_author(&UpdateAuthorRequest::new(3, Some("Nobody".into())))
            .await
            .unwrap_err();
        assert!(matches!(err, UpdateAuthorError::NotFound { id: 3 }));
    }

    #[tokio::test]
    async fn deleted_author_is_not_found() {
        let svc = service(AuthorDeletePolicy::Restrict).await;
        let hugo = author(&svc, "Hugo").await;

        svc.delete_author(&DeleteAuthorRequest::new(hugo.id()))
            .await
            .unwrap();
        let err = svc
            .get_author(&FindAuthorRequest::new(hugo.id()))
            .await
            .unwrap_err();
        assert!(matches!(err, FindAuthorError::NotFound { .. }));
    }

    #[tokio::test]
    async fn update_book_title_keeps_id_and_author() {
        let svc = service(AuthorDeletePolicy::Restrict).await;
        let hugo = author(&svc, "Hugo").await;
        let book = svc
            .create_book(&CreateBookRequest::new(Some("Les Miserables".into()), hugo.id()))
            .await
            .unwrap();

        let updated = svc
            .update_book(&UpdateBookRequest::new(
                book.id(),
                Some("Les Misérables".into()),
                hugo.id(),
            ))
            .await
            .unwrap();
        assert_eq!(updated.id(), book.id());
        assert_eq!(updated.title(), Some("Les Misérables"));
        assert_eq!(updated.author(), &hugo);
    }

    #[tokio::test]
    async fn update_book_reassigns_author() {
        let svc = service(AuthorDeletePolicy::Restrict).await;
        let hugo = author(&svc, "Hugo").await;
        let dumas = author(&svc, "Dumas").await;
        let book = svc
            .create_book(&CreateBookRequest::new(
                Some("Les Trois Mousquetaires".into()),
                hugo.id(),
            ))
            .await
            .unwrap();

        let updated = svc
            .update_book(&UpdateBookRequest::new(
                book.id(),
                book.title().map(str::to_string),
                dumas.id(),
            ))
            .await
            .unwrap();
        assert_eq!(updated.author(), &dumas);
    }

    #[tokio::test]
    async fn update_missing_book_is_not_found() {
        let svc = service(AuthorDeletePolicy::Restrict).await;
        let hugo = author(&svc, "Hugo").await;
        let err = svc
            .update_book(&UpdateBookRequest::new(11, Some("Ghost".into()), hugo.id()))
            .await
            .unwrap_err();
        assert!(matches!(err, UpdateBookError::NotFound { id: 11 }));
    }

    #[tokio::test]
    async fn delete_author_follows_configured_policy() {
        let restrict = service(AuthorDeletePolicy::Restrict).await;
        let hugo = author(&restrict, "Hugo").await;
        restrict
            .create_book(&CreateBookRequest::new(Some("Les Misérables".into()), hugo.id()))
            .await
            .unwrap();
        let err = restrict
            .delete_author(&DeleteAuthorRequest::new(hugo.id()))
            .await
            .unwrap_err();
        assert!(matches!(err, DeleteAuthorError::Referenced { .. }));

        let cascade = service(AuthorDeletePolicy::Cascade).await;
        let hugo = author(&cascade, "Hugo").await;
        cascade
            .create_book(&CreateBookRequest::new(Some("Les Misérables".into()), hugo.id()))
            .await
            .unwrap();
        cascade
            .delete_author(&DeleteAuthorRequest::new(hugo.id()))
            .await
            .unwrap();
        assert!(cascade.get_all_books().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_book_can_clear_title() {
        let svc = service(AuthorDeletePolicy::Restrict).await;
        let hugo = author(&svc, "Hugo").await;
        let book = svc
            .create_book(&CreateBookRequest::new(Some("Cromwell".into()), hugo.id()))
            .await
            .unwrap();

        let updated = svc
            .update_book(&UpdateBookRequest::new(book.id(), None, hugo.id()))
            .await
            .unwrap();
        assert_eq!(updated.title(), None);
        assert_eq!(updated.author(), &hugo);
    }

    #[tokio::test]
    async fn deleting_missing_author_succeeds() {
        let svc = service(AuthorDeletePolicy::Restrict).await;
        svc.delete_author(&DeleteAuthorRequest::new(999))
            .await
            .unwrap();
        assert!(svc.get_all_authors().await.unwrap().is_empty());
    }
}
