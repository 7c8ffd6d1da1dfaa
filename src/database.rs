use crate::models::{
    Author, AuthorDeletePolicy, Book, CreateAuthorError, CreateAuthorRequest, CreateBookError,
    CreateBookRequest, DeleteAuthorError, DeleteAuthorRequest, DeleteBookError, DeleteBookRequest,
    FindAllAuthorsError, FindAllBooksError, FindAuthorError, FindAuthorRequest, FindBookError,
    FindBookRequest, UpdateAuthorError, UpdateBookError,
};
use crate::repositories::{AuthorRepository, BookRepository};
use anyhow::{Context, anyhow};
use async_trait::async_trait;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqliteRow};
use sqlx::{FromRow, Row, SqliteConnection, SqlitePool};
use std::str::FromStr;

static MIGRATOR: Migrator = sqlx::migrate!();

const SELECT_BOOK: &str = "SELECT book.id, book.title, author.id AS author_id, author.name AS author_name \
     FROM book JOIN author ON author.id = book.author_id";

#[derive(Debug, Clone)]
pub struct Sqlite {
    pool: SqlitePool,
}

impl Sqlite {
    pub async fn new(path: &str) -> anyhow::Result<Self> {
        let opts = SqliteConnectOptions::from_str(path)
            .with_context(|| format!("Invalid database path {path}"))?
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal);
        let pool = SqlitePool::connect_with(opts)
            .await
            .with_context(|| format!("Failed to open database at {path}"))?;

        MIGRATOR
            .run(&pool)
            .await
            .context("Failed to run database migrations")?;
        tracing::info!(path, "database ready");

        Ok(Self { pool })
    }
}

impl<'r> FromRow<'r, SqliteRow> for Author {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id = row.try_get("id")?;
        let name = row.try_get("name")?;
        Ok(Self::new(id, name))
    }
}

impl<'r> FromRow<'r, SqliteRow> for Book {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id = row.try_get("id")?;
        let title = row.try_get("title")?;
        let author_id = row.try_get("author_id")?;
        let author_name = row.try_get("author_name")?;
        Ok(Self::new(id, title, Author::new(author_id, author_name)))
    }
}

async fn fetch_book(conn: &mut SqliteConnection, id: i64) -> Result<Book, sqlx::Error> {
    let query = format!("{SELECT_BOOK} WHERE book.id = ?");
    sqlx::query_as(&query).bind(id).fetch_one(conn).await
}

#[async_trait]
impl AuthorRepository for Sqlite {
    async fn create_author(&self, req: &CreateAuthorRequest) -> Result<Author, CreateAuthorError> {
        let author = sqlx::query_as("INSERT INTO author (name) VALUES (?) RETURNING id, name")
            .bind(req.name())
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                let err = anyhow!(err).context(format!(
                    r#"Failed to create author with name "{}""#,
                    req.name().unwrap_or_default()
                ));
                CreateAuthorError(err)
            })?;

        Ok(author)
    }

    async fn find_author(&self, req: &FindAuthorRequest) -> Result<Author, FindAuthorError> {
        let author = sqlx::query_as("SELECT id, name FROM author WHERE id = ?")
            .bind(req.id())
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                if matches!(err, sqlx::Error::RowNotFound) {
                    FindAuthorError::NotFound { id: req.id() }
                } else {
                    let err = anyhow!(err).context(format!(
                        r#"Failed to retrieve author with id "{}""#,
                        req.id()
                    ));
                    FindAuthorError::Other(err)
                }
            })?;

        Ok(author)
    }

    async fn find_all_authors(&self) -> Result<Vec<Author>, FindAllAuthorsError> {
        let authors = sqlx::query_as("SELECT id, name FROM author ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|err| {
                let err = anyhow!(err).context("Failed to retrieve all authors");
                FindAllAuthorsError(err)
            })?;

        Ok(authors)
    }

    async fn save_author(&self, author: &Author) -> Result<Author, UpdateAuthorError> {
        let saved = sqlx::query_as("UPDATE author SET name = ? WHERE id = ? RETURNING id, name")
            .bind(author.name())
            .bind(author.id())
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| {
                let err = anyhow!(err).context(format!(
                    r#"Failed to update author with id "{}""#,
                    author.id()
                ));
                UpdateAuthorError::Other(err)
            })?;

        saved.ok_or(UpdateAuthorError::NotFound { id: author.id() })
    }

    async fn delete_author(
        &self,
        req: &DeleteAuthorRequest,
        policy: AuthorDeletePolicy,
    ) -> Result<bool, DeleteAuthorError> {
        let to_error = |err: sqlx::Error| {
            if is_foreign_key_violation(&err) {
                DeleteAuthorError::Referenced { id: req.id() }
            } else {
                let err = anyhow!(err)
                    .context(format!(r#"Failed to delete author with id "{}""#, req.id()));
                DeleteAuthorError::Other(err)
            }
        };

        let deleted = match policy {
            AuthorDeletePolicy::Restrict => sqlx::query("DELETE FROM author WHERE id = ?")
                .bind(req.id())
                .execute(&self.pool)
                .await
                .map_err(to_error)?,
            AuthorDeletePolicy::Cascade => {
                let mut tx = self.pool.begin().await.map_err(to_error)?;
                let books = sqlx::query("DELETE FROM book WHERE author_id = ?")
                    .bind(req.id())
                    .execute(&mut *tx)
                    .await
                    .map_err(to_error)?;
                let author = sqlx::query("DELETE FROM author WHERE id = ?")
                    .bind(req.id())
                    .execute(&mut *tx)
                    .await
                    .map_err(to_error)?;
                tx.commit().await.map_err(to_error)?;
                tracing::debug!(
                    author_id = req.id(),
                    books = books.rows_affected(),
                    "cascaded author delete"
                );
                author
            }
        };

        Ok(deleted.rows_affected() > 0)
    }
}

#[async_trait]
impl BookRepository for Sqlite {
    async fn create_book(&self, req: &CreateBookRequest) -> Result<Book, CreateBookError> {
        let to_error = |err: sqlx::Error| {
            if is_foreign_key_violation(&err) {
                CreateBookError::UnknownAuthor {
                    id: req.author_id(),
                }
            } else {
                let err = anyhow!(err).context(format!(
                    r#"Failed to create book with title "{}""#,
                    req.title().unwrap_or_default()
                ));
                CreateBookError::Other(err)
            }
        };

        let mut tx = self.pool.begin().await.map_err(to_error)?;
        let id: i64 =
            sqlx::query_scalar("INSERT INTO book (title, author_id) VALUES (?, ?) RETURNING id")
                .bind(req.title())
                .bind(req.author_id())
                .fetch_one(&mut *tx)
                .await
                .map_err(to_error)?;
        let book = fetch_book(&mut *tx, id).await.map_err(to_error)?;
        tx.commit().await.map_err(to_error)?;

        Ok(book)
    }

    async fn find_book(&self, req: &FindBookRequest) -> Result<Book, FindBookError> {
        let query = format!("{SELECT_BOOK} WHERE book.id = ?");
        let book = sqlx::query_as(&query)
            .bind(req.id())
            .fetch_one(&self.pool)
            .await
            .map_err(|err| {
                if matches!(err, sqlx::Error::RowNotFound) {
                    FindBookError::NotFound { id: req.id() }
                } else {
                    let err = anyhow!(err)
                        .context(format!(r#"Failed to retrieve book with id "{}""#, req.id()));
                    FindBookError::Other(err)
                }
            })?;

        Ok(book)
    }

    async fn find_all_books(&self) -> Result<Vec<Book>, FindAllBooksError> {
        let query = format!("{SELECT_BOOK} ORDER BY book.id");
        let books = sqlx::query_as(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|err| {
                let err = anyhow!(err).context("Failed to retrieve all books");
                FindAllBooksError(err)
            })?;

        Ok(books)
    }

    async fn save_book(&self, book: &Book) -> Result<Book, UpdateBookError> {
        let to_error = |err: sqlx::Error| {
            if is_foreign_key_violation(&err) {
                UpdateBookError::UnknownAuthor {
                    id: book.author().id(),
                }
            } else {
                let err = anyhow!(err)
                    .context(format!(r#"Failed to update book with id "{}""#, book.id()));
                UpdateBookError::Other(err)
            }
        };

        let mut tx = self.pool.begin().await.map_err(to_error)?;
        let result = sqlx::query("UPDATE book SET title = ?, author_id = ? WHERE id = ?")
            .bind(book.title())
            .bind(book.author().id())
            .bind(book.id())
            .execute(&mut *tx)
            .await
            .map_err(to_error)?;
        if result.rows_affected() == 0 {
            return Err(UpdateBookError::NotFound { id: book.id() });
        }
        let saved = fetch_book(&mut *tx, book.id()).await.map_err(to_error)?;
        tx.commit().await.map_err(to_error)?;

        Ok(saved)
    }

    async fn delete_book(&self, req: &DeleteBookRequest) -> Result<bool, DeleteBookError> {
        let deleted = sqlx::query("DELETE FROM book WHERE id = ?")
            .bind(req.id())
            .execute(&self.pool)
            .await
            .map_err(|err| {
                let err = anyhow!(err)
                    .context(format!(r#"Failed to delete book with id "{}""#, req.id()));
                DeleteBookError(err)
            })?;

        Ok(deleted.rows_affected() > 0)
    }
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = err {
        return db_err.is_foreign_key_violation();
    }

    false
}
