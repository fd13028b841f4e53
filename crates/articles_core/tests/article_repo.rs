use articles_core::db::open_db_in_memory;
use articles_core::{
    Article, ArticleRepository, ArticleStore, RepoError, SqliteArticleRepository,
    SqliteArticleStore, TxMode,
};

fn article(title: &str, content: &str) -> Article {
    Article::new(Some(title.to_string()), Some(content.to_string()))
}

#[test]
fn save_assigns_increasing_ids_and_find_all_keeps_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArticleRepository::new(&conn, TxMode::ReadWrite);

    let first = repo.save(&article("title1", "content1")).unwrap();
    let second = repo.save(&article("title2", "content2")).unwrap();

    let first_id = first.id.expect("saved article has an id");
    let second_id = second.id.expect("saved article has an id");
    assert!(second_id > first_id);

    let all = repo.find_all().unwrap();
    assert_eq!(all, vec![first, second]);
}

#[test]
fn find_by_id_and_exists_report_absence_without_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArticleRepository::new(&conn, TxMode::ReadWrite);

    assert!(repo.find_by_id(404).unwrap().is_none());
    assert!(!repo.exists_by_id(404).unwrap());
    assert!(repo.find_all().unwrap().is_empty());
}

#[test]
fn save_with_id_replaces_every_field() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArticleRepository::new(&conn, TxMode::ReadWrite);

    let mut saved = repo.save(&article("title", "content")).unwrap();
    saved.title = None;
    saved.content = Some("replaced".to_string());
    let replaced = repo.save(&saved).unwrap();

    assert_eq!(replaced.id, saved.id);
    let loaded = repo.find_by_id(saved.id.unwrap()).unwrap().unwrap();
    assert_eq!(loaded.title, None);
    assert_eq!(loaded.content.as_deref(), Some("replaced"));
    assert_eq!(repo.find_all().unwrap().len(), 1);
}

#[test]
fn delete_removes_row_and_ids_are_not_reused() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArticleRepository::new(&conn, TxMode::ReadWrite);

    let saved = repo.save(&article("title", "content")).unwrap();
    let id = saved.id.unwrap();
    repo.delete_by_id(id).unwrap();

    assert!(!repo.exists_by_id(id).unwrap());
    let next = repo.save(&article("next", "row")).unwrap();
    assert!(next.id.unwrap() > id);
}

#[test]
fn read_only_repository_rejects_writes() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteArticleRepository::new(&conn, TxMode::ReadOnly);

    let save_err = repo.save(&article("title", "content")).unwrap_err();
    assert!(matches!(save_err, RepoError::ReadOnly("save")));

    let delete_err = repo.delete_by_id(1).unwrap_err();
    assert!(matches!(delete_err, RepoError::ReadOnly("delete_by_id")));
}

#[test]
fn failed_transaction_rolls_back() {
    let mut store = SqliteArticleStore::new(open_db_in_memory().unwrap());

    let result: Result<(), RepoError> = store.in_transaction(TxMode::ReadWrite, |repo| {
        repo.save(&article("lost", "write"))?;
        Err(RepoError::ReadOnly("forced failure"))
    });
    assert!(result.is_err());

    let remaining = store
        .in_transaction(TxMode::ReadOnly, |repo| repo.find_all())
        .unwrap();
    assert!(remaining.is_empty());
}

#[test]
fn committed_transaction_is_visible_to_later_scopes() {
    let mut store = SqliteArticleStore::new(open_db_in_memory().unwrap());

    let saved = store
        .in_transaction(TxMode::ReadWrite, |repo| {
            repo.save(&article("kept", "write"))
        })
        .unwrap();

    let count: i64 = store
        .connection()
        .query_row("SELECT COUNT(*) FROM articles;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);

    let loaded = store
        .in_transaction(TxMode::ReadOnly, |repo| repo.find_by_id(saved.id.unwrap()))
        .unwrap();
    assert_eq!(loaded, Some(saved));
}
