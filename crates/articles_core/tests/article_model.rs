use articles_core::{Article, ArticleView, CreateArticleRequest, UpdateArticleRequest};

#[test]
fn new_article_is_transient() {
    let article = Article::new(Some("title".to_string()), None);

    assert_eq!(article.id, None);
    assert!(!article.is_persisted());
    assert_eq!(article.title.as_deref(), Some("title"));
    assert_eq!(article.content, None);
}

#[test]
fn patch_with_all_fields_overwrites_everything_but_id() {
    let mut article = Article {
        id: Some(11),
        title: Some("title".to_string()),
        content: Some("content".to_string()),
    };

    article.apply_patch(Some("newTitle".to_string()), Some("newContent".to_string()));

    assert_eq!(article.id, Some(11));
    assert_eq!(article.title.as_deref(), Some("newTitle"));
    assert_eq!(article.content.as_deref(), Some("newContent"));
}

#[test]
fn empty_patch_changes_nothing() {
    let original = Article {
        id: Some(2),
        title: Some("title".to_string()),
        content: None,
    };
    let mut patched = original.clone();

    patched.apply_patch(None, None);

    assert_eq!(patched, original);
}

#[test]
fn view_serializes_expected_wire_fields() {
    let view = ArticleView {
        id: 5,
        title: Some("title".to_string()),
        content: None,
    };

    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json, serde_json::json!({"id": 5, "title": "title", "content": null}));
}

#[test]
fn requests_treat_missing_and_null_fields_as_absent() {
    let create: CreateArticleRequest = serde_json::from_str(r#"{"title": "only title"}"#).unwrap();
    assert_eq!(create.title.as_deref(), Some("only title"));
    assert_eq!(create.content, None);

    let update: UpdateArticleRequest =
        serde_json::from_str(r#"{"title": null, "content": "body"}"#).unwrap();
    assert_eq!(update.title, None);
    assert_eq!(update.content.as_deref(), Some("body"));

    let empty: UpdateArticleRequest = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, UpdateArticleRequest::default());
}
