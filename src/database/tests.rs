use super::*;
use crate::core::middleware::SessionMiddleware;
use crate::core::session::{Session, SessionHandle};
use httpmock::prelude::*;
use reqwest::Client;
use reqwest_middleware::ClientBuilder;
use serde_json::json;

fn db_against(server: &MockServer) -> FirebaseDatabase {
    let client = ClientBuilder::new(Client::new()).build();
    FirebaseDatabase::new(client, server.url(""))
}

fn test_session(token: &str) -> Session {
    Session {
        local_id: "admin-uid".to_string(),
        email: Some("admin@example.com".to_string()),
        display_name: None,
        id_token: token.to_string(),
        refresh_token: None,
        expires_at: None,
    }
}

#[tokio::test]
async fn test_get_articles_in_key_order() {
    let server = MockServer::start();
    let db = db_against(&server);

    let mock = server.mock(|when, then| {
        when.method(GET).path("/articles.json");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "-NabSecond": {
                    "title": "Second post",
                    "content": "<p>Later.</p>"
                },
                "-NaaFirst": {
                    "title": "First post",
                    "content": "<p>Earlier.</p>",
                    "date": "2024-05-01",
                    "views": 42
                }
            }));
    });

    let articles = db.get_articles().await.unwrap();
    assert_eq!(articles.len(), 2);
    // Push keys sort chronologically, so the earlier key comes first.
    assert_eq!(articles[0].id.as_deref(), Some("-NaaFirst"));
    assert_eq!(articles[0].title.as_deref(), Some("First post"));
    assert_eq!(articles[0].date.as_deref(), Some("2024-05-01"));
    assert_eq!(articles[0].extra.get("views"), Some(&json!(42)));
    assert_eq!(articles[1].id.as_deref(), Some("-NabSecond"));

    mock.assert();
}

#[tokio::test]
async fn test_get_articles_empty_collection() {
    let server = MockServer::start();
    let db = db_against(&server);

    let mock = server.mock(|when, then| {
        when.method(GET).path("/articles.json");
        then.status(200)
            .header("content-type", "application/json")
            .body("null");
    });

    let articles = db.get_articles().await.unwrap();
    assert!(articles.is_empty());

    mock.assert();
}

#[tokio::test]
async fn test_get_article_found() {
    let server = MockServer::start();
    let db = db_against(&server);

    let mock = server.mock(|when, then| {
        when.method(GET).path("/articles/-NaaFirst.json");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "title": "First post",
                "author": "Ada"
            }));
    });

    let article = db.get_article("-NaaFirst").await.unwrap().unwrap();
    assert_eq!(article.id.as_deref(), Some("-NaaFirst"));
    assert_eq!(article.title.as_deref(), Some("First post"));
    assert_eq!(article.author.as_deref(), Some("Ada"));

    mock.assert();
}

#[tokio::test]
async fn test_get_article_absent_reads_as_none() {
    let server = MockServer::start();
    let db = db_against(&server);

    let mock = server.mock(|when, then| {
        when.method(GET).path("/articles/gone.json");
        then.status(200)
            .header("content-type", "application/json")
            .body("null");
    });

    let article = db.get_article("gone").await.unwrap();
    assert!(article.is_none());

    mock.assert();
}

#[tokio::test]
async fn test_save_article_without_id_appends() {
    let server = MockServer::start();
    let db = db_against(&server);

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/articles.json")
            .header("content-type", "application/json")
            // Exact body: no `id` key may reach the wire.
            .json_body(json!({
                "title": "Hello",
                "published": false
            }));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({ "name": "-NnewKey" }));
    });

    let article = Article {
        title: Some("Hello".to_string()),
        published: Some(false),
        ..Default::default()
    };

    let id = db.save_article(&article).await.unwrap();
    assert_eq!(id, "-NnewKey");

    mock.assert();
}

#[tokio::test]
async fn test_save_article_with_id_updates_in_place() {
    let server = MockServer::start();
    let db = db_against(&server);

    let mock = server.mock(|when, then| {
        when.method(PATCH)
            .path("/articles/k1.json")
            .header("content-type", "application/json")
            .json_body(json!({ "title": "Renamed" }));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({ "title": "Renamed" }));
    });

    let article = Article {
        id: Some("k1".to_string()),
        title: Some("Renamed".to_string()),
        ..Default::default()
    };

    let id = db.save_article(&article).await.unwrap();
    assert_eq!(id, "k1");

    mock.assert();
}

#[tokio::test]
async fn test_delete_article() {
    let server = MockServer::start();
    let db = db_against(&server);

    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/articles/k1.json");
        then.status(200)
            .header("content-type", "application/json")
            .body("null");
    });

    db.delete_article("k1").await.unwrap();

    mock.assert();
}

#[tokio::test]
async fn test_get_comments_scoped_to_article() {
    let server = MockServer::start();
    let db = db_against(&server);

    let mock = server.mock(|when, then| {
        when.method(GET).path("/comments/-NaaFirst.json");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "-Nc1": { "author": "Bea", "body": "Nice post" },
                "-Nc2": { "author": "Cal", "body": "Agreed" }
            }));
    });

    let comments = db.get_comments("-NaaFirst").await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].id.as_deref(), Some("-Nc1"));
    assert_eq!(comments[0].article_id.as_deref(), Some("-NaaFirst"));
    assert_eq!(comments[0].author.as_deref(), Some("Bea"));
    assert_eq!(comments[1].body.as_deref(), Some("Agreed"));

    mock.assert();
}

#[tokio::test]
async fn test_add_comment_returns_generated_id() {
    let server = MockServer::start();
    let db = db_against(&server);

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/comments/-NaaFirst.json")
            .json_body(json!({ "author": "Bea", "body": "Nice post" }));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({ "name": "-NcNew" }));
    });

    let comment = Comment {
        author: Some("Bea".to_string()),
        body: Some("Nice post".to_string()),
        ..Default::default()
    };

    let id = db.add_comment("-NaaFirst", &comment).await.unwrap();
    assert_eq!(id, "-NcNew");

    mock.assert();
}

#[tokio::test]
async fn test_delete_comment() {
    let server = MockServer::start();
    let db = db_against(&server);

    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/comments/-NaaFirst/-Nc1.json");
        then.status(200)
            .header("content-type", "application/json")
            .body("null");
    });

    db.delete_comment("-NaaFirst", "-Nc1").await.unwrap();

    mock.assert();
}

#[tokio::test]
async fn test_get_settings_never_written() {
    let server = MockServer::start();
    let db = db_against(&server);

    let mock = server.mock(|when, then| {
        when.method(GET).path("/settings.json");
        then.status(200)
            .header("content-type", "application/json")
            .body("null");
    });

    let settings = db.get_settings().await.unwrap();
    assert!(settings.is_empty());

    mock.assert();
}

#[tokio::test]
async fn test_get_settings_populated() {
    let server = MockServer::start();
    let db = db_against(&server);

    let mock = server.mock(|when, then| {
        when.method(GET).path("/settings.json");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "title": "My Blog",
                "postsPerPage": 10,
                "theme": "dark"
            }));
    });

    let settings = db.get_settings().await.unwrap();
    assert_eq!(settings.title.as_deref(), Some("My Blog"));
    assert_eq!(settings.posts_per_page, Some(10));
    assert_eq!(settings.extra.get("theme"), Some(&json!("dark")));

    mock.assert();
}

#[tokio::test]
async fn test_save_settings_overwrites_record() {
    let server = MockServer::start();
    let db = db_against(&server);

    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/settings.json")
            .header("content-type", "application/json")
            .json_body(json!({
                "title": "My Blog",
                "description": "Notes and posts"
            }));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({
                "title": "My Blog",
                "description": "Notes and posts"
            }));
    });

    let settings = Settings {
        title: Some("My Blog".to_string()),
        description: Some("Notes and posts".to_string()),
        ..Default::default()
    };

    db.save_settings(&settings).await.unwrap();

    mock.assert();
}

#[tokio::test]
async fn test_permission_denied_surfaces_in_error() {
    let server = MockServer::start();
    let db = db_against(&server);

    let mock = server.mock(|when, then| {
        when.method(GET).path("/articles.json");
        then.status(401)
            .header("content-type", "application/json")
            .json_body(json!({ "error": "Permission denied" }));
    });

    let result = db.get_articles().await;
    match result {
        Err(DatabaseError::ApiError(msg)) => assert_eq!(msg, "Permission denied"),
        other => panic!("Expected ApiError, got {:?}", other),
    }

    mock.assert();
}

#[tokio::test]
async fn test_signed_in_requests_carry_auth_param() {
    let server = MockServer::start();

    let session = SessionHandle::new();
    session.establish(test_session("id-token-1")).await;

    let client = ClientBuilder::new(Client::new())
        .with(SessionMiddleware::new(session))
        .build();
    let db = FirebaseDatabase::new(client, server.url(""));

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/articles.json")
            .query_param("auth", "id-token-1");
        then.status(200)
            .header("content-type", "application/json")
            .body("null");
    });

    let articles = db.get_articles().await.unwrap();
    assert!(articles.is_empty());

    mock.assert();
}

#[tokio::test]
async fn test_signed_out_requests_carry_no_auth_param() {
    let server = MockServer::start();

    // Sign-out clears the slot; requests issued afterwards go out bare.
    let session = SessionHandle::new();
    session.establish(test_session("stale-token")).await;
    session.clear().await;

    let client = ClientBuilder::new(Client::new())
        .with(SessionMiddleware::new(session))
        .build();
    let db = FirebaseDatabase::new(client, server.url(""));

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/articles.json")
            .query_param_missing("auth");
        then.status(200)
            .header("content-type", "application/json")
            .body("null");
    });

    let articles = db.get_articles().await.unwrap();
    assert!(articles.is_empty());

    mock.assert();
}
