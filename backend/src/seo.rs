use std::env;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::{TimeZone, Utc};
use newsflow_shared::ArticleFilter;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Environment helpers
// ---------------------------------------------------------------------------

fn site_base_url() -> String {
    env::var("SITE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

// ---------------------------------------------------------------------------
// XML escaping
// ---------------------------------------------------------------------------

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Format Unix millis as the YYYY-MM-DD date sitemaps expect.
fn lastmod_date(ms: i64) -> String {
    match Utc.timestamp_millis_opt(ms).single() {
        Some(ts) => ts.format("%Y-%m-%d").to_string(),
        None => String::new(),
    }
}

fn push_url(xml: &mut String, loc: &str, lastmod: Option<&str>, changefreq: &str, priority: &str) {
    xml.push_str("  <url>\n");
    xml.push_str(&format!("    <loc>{}</loc>\n", xml_escape(loc)));
    if let Some(lastmod) = lastmod.filter(|value| !value.is_empty()) {
        xml.push_str(&format!("    <lastmod>{}</lastmod>\n", xml_escape(lastmod)));
    }
    xml.push_str(&format!("    <changefreq>{}</changefreq>\n", changefreq));
    xml.push_str(&format!("    <priority>{}</priority>\n", priority));
    xml.push_str("  </url>\n");
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /sitemap.xml
pub async fn sitemap_xml(State(state): State<AppState>) -> Response {
    let articles = match state
        .store
        .list_articles(&ArticleFilter {
            published: Some(true),
            ..Default::default()
        })
        .await
    {
        Ok(articles) => articles,
        Err(err) => {
            tracing::warn!("sitemap: failed to list articles: {}", err);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate sitemap")
                .into_response();
        },
    };
    let categories = match state.store.list_categories().await {
        Ok(categories) => categories,
        Err(err) => {
            tracing::warn!("sitemap: failed to list categories: {}", err);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate sitemap")
                .into_response();
        },
    };

    let base = site_base_url();
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
"#,
    );

    // Static pages
    push_url(&mut xml, &base, None, "daily", "1.0");
    push_url(&mut xml, &format!("{}/categories", base), None, "weekly", "0.6");
    push_url(&mut xml, &format!("{}/search", base), None, "weekly", "0.4");

    for category in &categories {
        let loc = format!("{}/categories/{}", base, urlencoding::encode(&category.slug));
        push_url(&mut xml, &loc, None, "weekly", "0.6");
    }

    for article in &articles {
        let loc = format!("{}/articles/{}", base, urlencoding::encode(&article.id));
        let lastmod = lastmod_date(article.updated_at);
        push_url(&mut xml, &loc, Some(&lastmod), "weekly", "0.8");
    }

    xml.push_str("</urlset>\n");

    (StatusCode::OK, [(header::CONTENT_TYPE, "application/xml; charset=utf-8")], xml)
        .into_response()
}

/// GET /robots.txt
pub async fn robots_txt() -> Response {
    let base = site_base_url();
    let body = format!("User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n", base);
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_xml_entities() {
        assert_eq!(xml_escape("a & b < c"), "a &amp; b &lt; c");
    }

    #[test]
    fn formats_lastmod_dates() {
        // 2026-01-02T00:00:00Z
        assert_eq!(lastmod_date(1_767_312_000_000), "2026-01-02");
    }
}
