#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use newsflow_backend::{routes::create_router, state::AppState};
    use newsflow_shared::memory_store::MemoryStore;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        create_router(AppState::new(Arc::new(MemoryStore::new())))
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("build request"),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("build request"),
        };
        let response = app.clone().oneshot(request).await.expect("send request");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn send_text(app: &Router, uri: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("build request");
        let response = app.clone().oneshot(request).await.expect("send request");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        (status, String::from_utf8_lossy(&bytes).into_owned())
    }

    fn article_payload(title: &str, category: &str, published: bool) -> Value {
        json!({
            "title": title,
            "content": format!("{title} full report body."),
            "excerpt": format!("{title} in brief."),
            "author": "News Desk",
            "category": category,
            "tags": ["local"],
            "published": published,
        })
    }

    async fn create_article(app: &Router, title: &str, category: &str, published: bool) -> String {
        let (status, body) =
            send(app, "POST", "/api/articles", Some(article_payload(title, category, published)))
                .await;
        assert_eq!(status, StatusCode::CREATED);
        body["id"].as_str().expect("generated id").to_string()
    }

    #[tokio::test]
    async fn creating_without_title_returns_field_errors() {
        let app = app();
        let mut payload = article_payload("x", "World", true);
        payload
            .as_object_mut()
            .expect("object payload")
            .remove("title");

        let (status, body) = send(&app, "POST", "/api/articles", Some(payload)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], 400);
        let fields: Vec<&str> = body["details"]
            .as_array()
            .expect("field details")
            .iter()
            .filter_map(|e| e["field"].as_str())
            .collect();
        assert!(fields.contains(&"title"));
    }

    #[tokio::test]
    async fn creating_valid_article_zeroes_counters() {
        let app = app();
        let (status, body) =
            send(&app, "POST", "/api/articles", Some(article_payload("Launch", "Tech", true)))
                .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(!body["id"].as_str().expect("id").is_empty());
        assert_eq!(body["views"], 0);
        assert_eq!(body["likes"], 0);
    }

    #[tokio::test]
    async fn unknown_article_is_404() {
        let app = app();
        let (status, body) = send(&app, "GET", "/api/articles/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
    }

    #[tokio::test]
    async fn views_increment_exactly_once_per_call() {
        let app = app();
        let id = create_article(&app, "Counted", "World", true).await;

        let (status, body) = send(&app, "POST", &format!("/api/articles/{id}/views"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["views"], 1);

        let (_, body) = send(&app, "POST", &format!("/api/articles/{id}/views"), None).await;
        assert_eq!(body["views"], 2);

        let (_, body) = send(&app, "GET", &format!("/api/articles/{id}"), None).await;
        assert_eq!(body["views"], 2);
    }

    #[tokio::test]
    async fn liking_twice_adds_exactly_two() {
        let app = app();
        let id = create_article(&app, "Liked", "World", true).await;

        send(&app, "POST", &format!("/api/articles/{id}/like"), None).await;
        let (status, body) = send(&app, "POST", &format!("/api/articles/{id}/like"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["likes"], 2);
    }

    #[tokio::test]
    async fn category_filter_is_case_insensitive_and_newest_first() {
        let app = app();
        create_article(&app, "Old tech", "Technology", true).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        create_article(&app, "Draft tech", "technology", false).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
        create_article(&app, "New tech", "TECHNOLOGY", true).await;
        create_article(&app, "Match day", "Sports", true).await;

        let (status, body) =
            send(&app, "GET", "/api/articles?category=Technology&published=true", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        let titles: Vec<&str> = body["articles"]
            .as_array()
            .expect("articles")
            .iter()
            .filter_map(|a| a["title"].as_str())
            .collect();
        assert_eq!(titles, vec!["New tech", "Old tech"]);
    }

    #[tokio::test]
    async fn unrecognized_boolean_filters_are_ignored() {
        let app = app();
        create_article(&app, "Published", "World", true).await;
        create_article(&app, "Draft", "World", false).await;

        let (status, body) = send(&app, "GET", "/api/articles?published=maybe", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
    }

    #[tokio::test]
    async fn comment_lifecycle_leaves_exactly_one() {
        let app = app();
        let id = create_article(&app, "Discussed", "World", true).await;
        let comment = json!({
            "author": "Sam",
            "email": "sam@example.com",
            "content": "Nice reporting.",
        });

        let (status, first) =
            send(&app, "POST", &format!("/api/articles/{id}/comments"), Some(comment.clone()))
                .await;
        assert_eq!(status, StatusCode::CREATED);
        send(&app, "POST", &format!("/api/articles/{id}/comments"), Some(comment)).await;

        let first_id = first["id"].as_str().expect("comment id");
        let (status, _) = send(&app, "DELETE", &format!("/api/comments/{first_id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (_, body) = send(&app, "GET", &format!("/api/articles/{id}/comments"), None).await;
        assert_eq!(body["total"], 1);
    }

    #[tokio::test]
    async fn commenting_on_missing_article_is_404() {
        let app = app();
        let comment = json!({
            "author": "Sam",
            "email": "sam@example.com",
            "content": "Hello?",
        });
        let (status, _) =
            send(&app, "POST", "/api/articles/ghost/comments", Some(comment)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_comment_email_is_rejected() {
        let app = app();
        let id = create_article(&app, "Discussed", "World", true).await;
        let comment = json!({
            "author": "Sam",
            "email": "not-an-email",
            "content": "Hi",
        });
        let (status, body) =
            send(&app, "POST", &format!("/api/articles/{id}/comments"), Some(comment)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"][0]["field"], "email");
    }

    #[tokio::test]
    async fn delete_article_returns_204_then_404() {
        let app = app();
        let id = create_article(&app, "Gone soon", "World", true).await;

        let (status, _) = send(&app, "DELETE", &format!("/api/articles/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "DELETE", &format!("/api/articles/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_patches_only_provided_fields() {
        let app = app();
        let id = create_article(&app, "Before", "World", false).await;

        let (status, body) = send(
            &app,
            "PUT",
            &format!("/api/articles/{id}"),
            Some(json!({ "title": "After", "published": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "After");
        assert_eq!(body["published"], true);
        assert_eq!(body["category"], "World");

        let (status, _) =
            send(&app, "PUT", "/api/articles/ghost", Some(json!({ "title": "x" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn categories_round_trip_by_slug() {
        let app = app();
        let (status, created) = send(
            &app,
            "POST",
            "/api/categories",
            Some(json!({ "name": "Local News", "color": "emerald" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["slug"], "local-news");

        let (status, fetched) = send(&app, "GET", "/api/categories/local-news", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(fetched["name"], "Local News");

        let (status, body) = send(
            &app,
            "POST",
            "/api/categories",
            Some(json!({ "name": "Local News" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["details"][0]["field"], "slug");
    }

    #[tokio::test]
    async fn search_scores_title_above_content() {
        let app = app();
        create_article(&app, "Budget approved", "Politics", true).await;
        let (_, body) = send(
            &app,
            "POST",
            "/api/articles",
            Some(json!({
                "title": "Council meets",
                "content": "The budget dominated discussion.",
                "excerpt": "Council talks.",
                "author": "News Desk",
                "category": "Politics",
                "published": true,
            })),
        )
        .await;
        assert!(!body["id"].as_str().expect("id").is_empty());

        let (status, body) = send(&app, "GET", "/api/search?q=budget", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(body["results"][0]["title"], "Budget approved");
        assert!(body["results"][1]["highlight"]
            .as_str()
            .expect("highlight")
            .contains("<mark>budget</mark>"));

        let (status, body) = send(&app, "GET", "/api/search?q=", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 0);
    }

    #[tokio::test]
    async fn sitemap_lists_static_pages_categories_and_articles() {
        let app = app();
        create_article(&app, "One", "World", true).await;
        create_article(&app, "Two", "World", true).await;
        create_article(&app, "Draft", "World", false).await;
        send(&app, "POST", "/api/categories", Some(json!({ "name": "World" }))).await;
        send(&app, "POST", "/api/categories", Some(json!({ "name": "Sports" }))).await;

        let (status, xml) = send_text(&app, "/sitemap.xml").await;
        assert_eq!(status, StatusCode::OK);
        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("</urlset>"));
        // 3 static pages + 2 categories + 2 published articles (draft excluded)
        assert_eq!(xml.matches("<url>").count(), 7);
        assert!(xml.contains("/categories/world"));
    }

    #[tokio::test]
    async fn robots_txt_points_at_the_sitemap() {
        let app = app();
        let (status, body) = send_text(&app, "/robots.txt").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("User-agent: *"));
        assert!(body.contains("Sitemap: "));
        assert!(body.contains("/sitemap.xml"));
    }

    #[tokio::test]
    async fn sqlite_store_serves_the_same_contract() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let url = format!("sqlite://{}", dir.path().join("news.db").display());
        let store = newsflow_shared::sqlite_store::SqliteStore::connect(&url)
            .await
            .expect("open sqlite store");
        let app = create_router(AppState::new(Arc::new(store)));

        let id = create_article(&app, "Persistent", "World", true).await;
        let (_, body) = send(&app, "POST", &format!("/api/articles/{id}/views"), None).await;
        assert_eq!(body["views"], 1);

        let (status, body) =
            send(&app, "GET", "/api/articles?category=world&published=true", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 1);
        assert_eq!(body["articles"][0]["views"], 1);

        let (status, _) = send(&app, "DELETE", &format!("/api/articles/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "GET", &format!("/api/articles/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_json_body_is_a_client_error() {
        let app = app();
        let request = Request::builder()
            .method("POST")
            .uri("/api/articles")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .expect("build request");
        let response = app.clone().oneshot(request).await.expect("send request");
        assert!(response.status().is_client_error());
    }
}
