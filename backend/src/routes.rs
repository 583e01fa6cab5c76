use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers, seo, state::AppState};

pub fn create_router(state: AppState) -> Router {
    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Define routes
    Router::new()
        .route(
            "/api/articles",
            get(handlers::list_articles).post(handlers::create_article),
        )
        .route(
            "/api/articles/:id",
            get(handlers::get_article)
                .put(handlers::update_article)
                .delete(handlers::delete_article),
        )
        .route("/api/articles/:id/like", post(handlers::like_article))
        .route("/api/articles/:id/views", post(handlers::track_view))
        .route(
            "/api/articles/:id/comments",
            get(handlers::list_comments).post(handlers::create_comment),
        )
        .route("/api/comments/:id", delete(handlers::delete_comment))
        .route(
            "/api/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        // GET resolves by slug; PUT/DELETE address the category id.
        .route(
            "/api/categories/:slug",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .route("/api/tags", get(handlers::list_tags))
        .route("/api/search", get(handlers::search_articles))
        .route("/sitemap.xml", get(seo::sitemap_xml))
        .route("/robots.txt", get(seo::robots_txt))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
