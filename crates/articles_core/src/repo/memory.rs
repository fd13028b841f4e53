//! In-memory article store.
//!
//! Used where a real database is unnecessary, mainly service tests. Ids follow
//! SQLite `AUTOINCREMENT` rules: monotonic and never reused after deletion.

use crate::model::article::{Article, ArticleId};
use crate::repo::article_repo::{ArticleRepository, RepoError, RepoResult};
use crate::repo::store::{ArticleStore, TxMode};
use std::cell::RefCell;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
struct MemoryState {
    rows: BTreeMap<ArticleId, Article>,
    last_id: ArticleId,
}

/// `BTreeMap`-backed store with copy-on-begin transactions.
#[derive(Debug, Default)]
pub struct InMemoryArticleStore {
    committed: MemoryState,
}

impl InMemoryArticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed articles.
    pub fn len(&self) -> usize {
        self.committed.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.committed.rows.is_empty()
    }
}

impl ArticleStore for InMemoryArticleStore {
    fn in_transaction<T, E, F>(&mut self, mode: TxMode, work: F) -> Result<T, E>
    where
        F: FnOnce(&dyn ArticleRepository) -> Result<T, E>,
        E: From<RepoError>,
    {
        let repo = MemoryArticleRepository {
            working: RefCell::new(self.committed.clone()),
            mode,
        };
        let value = work(&repo)?;
        if mode == TxMode::ReadWrite {
            self.committed = repo.working.into_inner();
        }
        Ok(value)
    }
}

struct MemoryArticleRepository {
    working: RefCell<MemoryState>,
    mode: TxMode,
}

impl MemoryArticleRepository {
    fn ensure_writable(&self, operation: &'static str) -> RepoResult<()> {
        match self.mode {
            TxMode::ReadWrite => Ok(()),
            TxMode::ReadOnly => Err(RepoError::ReadOnly(operation)),
        }
    }
}

impl ArticleRepository for MemoryArticleRepository {
    fn find_all(&self) -> RepoResult<Vec<Article>> {
        Ok(self.working.borrow().rows.values().cloned().collect())
    }

    fn find_by_id(&self, id: ArticleId) -> RepoResult<Option<Article>> {
        Ok(self.working.borrow().rows.get(&id).cloned())
    }

    fn exists_by_id(&self, id: ArticleId) -> RepoResult<bool> {
        Ok(self.working.borrow().rows.contains_key(&id))
    }

    fn save(&self, article: &Article) -> RepoResult<Article> {
        self.ensure_writable("save")?;

        let mut state = self.working.borrow_mut();
        let id = match article.id {
            Some(id) => {
                state.last_id = state.last_id.max(id);
                id
            }
            None => {
                state.last_id += 1;
                state.last_id
            }
        };

        let saved = Article {
            id: Some(id),
            title: article.title.clone(),
            content: article.content.clone(),
        };
        state.rows.insert(id, saved.clone());
        Ok(saved)
    }

    fn delete_by_id(&self, id: ArticleId) -> RepoResult<()> {
        self.ensure_writable("delete_by_id")?;
        self.working.borrow_mut().rows.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::InMemoryArticleStore;
    use crate::model::article::Article;
    use crate::repo::article_repo::RepoError;
    use crate::repo::store::{ArticleStore, TxMode};

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = InMemoryArticleStore::new();
        let first = store
            .in_transaction(TxMode::ReadWrite, |repo| {
                let saved = repo.save(&Article::new(Some("a".into()), None))?;
                repo.delete_by_id(saved.id.unwrap())?;
                repo.save(&Article::new(Some("b".into()), None))
            })
            .unwrap();

        assert_eq!(first.id, Some(2));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn failed_scope_discards_working_copy() {
        let mut store = InMemoryArticleStore::new();
        let result: Result<(), RepoError> = store.in_transaction(TxMode::ReadWrite, |repo| {
            repo.save(&Article::new(Some("lost".into()), None))?;
            Err(RepoError::ReadOnly("forced"))
        });

        assert!(result.is_err());
        assert!(store.is_empty());
    }
}
