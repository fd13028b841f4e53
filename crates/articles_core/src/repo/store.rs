//! Transactional scopes over article storage.
//!
//! # Responsibility
//! - Bind an `ArticleRepository` to exactly one transaction per unit of work.
//! - Commit when the unit of work succeeds and roll back when it fails.
//!
//! # Invariants
//! - Nothing written inside a failed scope is visible afterwards.
//! - Read-only scopes never mutate storage.

use crate::repo::article_repo::{ArticleRepository, RepoError, SqliteArticleRepository};
use log::warn;
use rusqlite::{Connection, TransactionBehavior};

/// Access mode of one transactional scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxMode {
    ReadOnly,
    ReadWrite,
}

impl TxMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ReadOnly => "read_only",
            Self::ReadWrite => "read_write",
        }
    }
}

/// Storage that can run repository work inside a transaction.
pub trait ArticleStore {
    /// Runs `work` against a repository bound to a fresh transaction.
    ///
    /// `Ok` commits and `Err` rolls back. Errors raised while opening or
    /// committing the transaction are converted into `E`.
    fn in_transaction<T, E, F>(&mut self, mode: TxMode, work: F) -> Result<T, E>
    where
        F: FnOnce(&dyn ArticleRepository) -> Result<T, E>,
        E: From<RepoError>;
}

/// SQLite store owning a single migrated connection.
pub struct SqliteArticleStore {
    conn: Connection,
}

impl SqliteArticleStore {
    /// Wraps a connection returned by `open_db` or `open_db_in_memory`.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Borrows the underlying connection for diagnostics and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl ArticleStore for SqliteArticleStore {
    fn in_transaction<T, E, F>(&mut self, mode: TxMode, work: F) -> Result<T, E>
    where
        F: FnOnce(&dyn ArticleRepository) -> Result<T, E>,
        E: From<RepoError>,
    {
        // Write scopes take the SQLite write lock at BEGIN.
        let behavior = match mode {
            TxMode::ReadOnly => TransactionBehavior::Deferred,
            TxMode::ReadWrite => TransactionBehavior::Immediate,
        };
        let tx = self
            .conn
            .transaction_with_behavior(behavior)
            .map_err(RepoError::from)?;

        let outcome = {
            let repo = SqliteArticleRepository::new(&tx, mode);
            work(&repo)
        };

        match outcome {
            Ok(value) => {
                tx.commit().map_err(RepoError::from)?;
                Ok(value)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback() {
                    warn!(
                        "event=tx_rollback module=repo status=error mode={} error={rollback_err}",
                        mode.as_str()
                    );
                }
                Err(err)
            }
        }
    }
}
