//! URL shortening, redirect and delete integration tests.
//!
//! Run with: `cargo test -p hibiki-api --test short_url_test`

mod helpers;

use helpers::{assert_redirects_home, setup_test_app, setup_test_app_with};
use hibiki_core::short_code;
use hibiki_core::Notice;

#[tokio::test]
async fn test_shorten_prepends_scheme_and_redirects() {
    let app = setup_test_app().await;

    let response = app.shorten("example.com").await;
    assert_redirects_home(&response);
    assert_eq!(app.notices(&response), vec![Notice::shortened()]);

    let urls = app.state.short_urls.list().await.unwrap();
    assert_eq!(urls.len(), 1);
    let url = &urls[0];
    assert_eq!(url.original_url, "https://example.com");
    assert!(short_code::is_valid(&url.short_code));

    let redirect = app.client().get(&format!("/r/{}", url.short_code)).await;
    assert_eq!(redirect.status_code(), 302);
    assert_eq!(redirect.header("location"), "https://example.com");
}

#[tokio::test]
async fn test_shorten_keeps_explicit_scheme() {
    let app = setup_test_app().await;

    app.shorten("http://example.com").await;
    app.shorten("  https://example.org/path?q=1  ").await;

    let originals: Vec<String> = app
        .state
        .short_urls
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.original_url)
        .collect();
    assert_eq!(
        originals,
        vec!["https://example.org/path?q=1", "http://example.com"]
    );
}

#[tokio::test]
async fn test_shorten_empty_url_is_rejected() {
    let app = setup_test_app().await;

    for input in ["", "   "] {
        let response = app.shorten(input).await;
        assert_redirects_home(&response);
        assert_eq!(
            app.notices(&response),
            vec![Notice::error("URLを入力してください")]
        );
    }

    let response = app.client().post("/shorten").form(&[("other", "x")]).await;
    assert_eq!(
        app.notices(&response),
        vec![Notice::error("URLを入力してください")]
    );

    assert!(app.state.short_urls.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_shorten_overlong_url_is_rejected() {
    let app = setup_test_app().await;

    let long = format!("https://example.com/{}", "a".repeat(600));
    let response = app.shorten(&long).await;

    assert_eq!(app.notices(&response), vec![Notice::error("URLが長すぎます")]);
    assert!(app.state.short_urls.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_each_shortening_gets_a_distinct_code() {
    let app = setup_test_app().await;

    for _ in 0..20 {
        app.shorten("example.com").await;
    }

    let urls = app.state.short_urls.list().await.unwrap();
    let codes: std::collections::HashSet<_> = urls.iter().map(|u| u.short_code.clone()).collect();
    assert_eq!(urls.len(), 20);
    assert_eq!(codes.len(), 20);
}

#[tokio::test]
async fn test_unknown_code_is_404() {
    let app = setup_test_app().await;

    let response = app.client().get("/r/zzzzzz").await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_error_details_follow_configured_environment() {
    let app = setup_test_app().await;
    let body: serde_json::Value = app.client().get("/r/zzzzzz").await.json();
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["error_type"], "NotFound");
    assert!(body["details"].is_string());

    let app = setup_test_app_with(|config| config.environment = "production".to_string()).await;
    let body: serde_json::Value = app.client().get("/r/zzzzzz").await.json();
    assert_eq!(body["code"], "NOT_FOUND");
    assert!(body.get("details").is_none());
    assert!(body.get("error_type").is_none());
}

#[tokio::test]
async fn test_delete_short_url() {
    let app = setup_test_app().await;
    app.shorten("example.com").await;
    let url = app.state.short_urls.list().await.unwrap().remove(0);

    let response = app.client().post(&format!("/delete_url/{}", url.id)).await;
    assert_redirects_home(&response);
    assert_eq!(app.notices(&response), vec![Notice::url_deleted()]);

    let redirect = app.client().get(&format!("/r/{}", url.short_code)).await;
    assert_eq!(redirect.status_code(), 404);

    let again = app.client().post(&format!("/delete_url/{}", url.id)).await;
    assert_eq!(again.status_code(), 404);
}

#[tokio::test]
async fn test_list_page_shows_short_links() {
    let app = setup_test_app().await;
    app.shorten("example.com/docs").await;
    let url = app.state.short_urls.list().await.unwrap().remove(0);

    let page = app.client().get("/").await;
    let html = page.text();
    assert!(html.contains(&format!("/r/{}", url.short_code)));
    assert!(html.contains("https://example.com/docs"));
    assert!(html.contains(&format!("/delete_url/{}", url.id)));
}
