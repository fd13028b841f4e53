//! Article repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide find/exists/save/delete APIs over the `articles` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `find_all` returns rows in insertion order (ascending id).
//! - `save` on a transient article assigns a fresh id; on a persisted article it
//!   replaces every column and keeps the id.
//! - Repositories opened in read-only mode reject `save` and `delete_by_id`.

use crate::db::DbError;
use crate::model::article::{Article, ArticleId};
use crate::repo::store::TxMode;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ARTICLE_SELECT_SQL: &str = "SELECT id, title, content FROM articles";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for article persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// A write was attempted inside a read-only transactional scope.
    ReadOnly(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::ReadOnly(operation) => {
                write!(f, "`{operation}` is not allowed in a read-only transaction")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::ReadOnly(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for article persistence.
pub trait ArticleRepository {
    /// Returns every stored article in insertion order.
    fn find_all(&self) -> RepoResult<Vec<Article>>;
    /// Returns the article with `id`, or `None` when absent.
    fn find_by_id(&self, id: ArticleId) -> RepoResult<Option<Article>>;
    /// Returns whether an article with `id` is currently stored.
    fn exists_by_id(&self, id: ArticleId) -> RepoResult<bool>;
    /// Inserts a transient article or fully replaces a persisted one.
    fn save(&self, article: &Article) -> RepoResult<Article>;
    /// Removes the article with `id`. A missing id is a no-op.
    fn delete_by_id(&self, id: ArticleId) -> RepoResult<()>;
}

/// SQLite-backed article repository bound to one connection or transaction.
pub struct SqliteArticleRepository<'conn> {
    conn: &'conn Connection,
    mode: TxMode,
}

impl<'conn> SqliteArticleRepository<'conn> {
    pub fn new(conn: &'conn Connection, mode: TxMode) -> Self {
        Self { conn, mode }
    }

    fn ensure_writable(&self, operation: &'static str) -> RepoResult<()> {
        match self.mode {
            TxMode::ReadWrite => Ok(()),
            TxMode::ReadOnly => Err(RepoError::ReadOnly(operation)),
        }
    }
}

impl ArticleRepository for SqliteArticleRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Article>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ARTICLE_SELECT_SQL} ORDER BY id ASC;"))?;
        let rows = stmt.query_map([], parse_article_row)?;
        let articles = rows.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(articles)
    }

    fn find_by_id(&self, id: ArticleId) -> RepoResult<Option<Article>> {
        let article = self
            .conn
            .query_row(
                &format!("{ARTICLE_SELECT_SQL} WHERE id = ?1;"),
                [id],
                parse_article_row,
            )
            .optional()?;
        Ok(article)
    }

    fn exists_by_id(&self, id: ArticleId) -> RepoResult<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM articles WHERE id = ?1);",
            [id],
            |row| row.get::<_, bool>(0),
        )?;
        Ok(exists)
    }

    fn save(&self, article: &Article) -> RepoResult<Article> {
        self.ensure_writable("save")?;

        let id = match article.id {
            Some(id) => {
                self.conn.execute(
                    "INSERT INTO articles (id, title, content) VALUES (?1, ?2, ?3)
                     ON CONFLICT(id) DO UPDATE SET
                        title = excluded.title,
                        content = excluded.content;",
                    params![id, article.title.as_deref(), article.content.as_deref()],
                )?;
                id
            }
            None => {
                self.conn.execute(
                    "INSERT INTO articles (title, content) VALUES (?1, ?2);",
                    params![article.title.as_deref(), article.content.as_deref()],
                )?;
                self.conn.last_insert_rowid()
            }
        };

        Ok(Article {
            id: Some(id),
            title: article.title.clone(),
            content: article.content.clone(),
        })
    }

    fn delete_by_id(&self, id: ArticleId) -> RepoResult<()> {
        self.ensure_writable("delete_by_id")?;
        self.conn
            .execute("DELETE FROM articles WHERE id = ?1;", [id])?;
        Ok(())
    }
}

fn parse_article_row(row: &Row<'_>) -> rusqlite::Result<Article> {
    Ok(Article {
        id: Some(row.get("id")?),
        title: row.get("title")?,
        content: row.get("content")?,
    })
}
