//! Typed client for the NewsFlow REST API.
//!
//! Reads go through the query cache in [`crate::query`]; every mutation
//! invalidates the cache keys it may have made stale.

use gloo_net::http::{Request, Response};
use newsflow_shared::{
    Article, ArticleListItem, ArticlePatch, Category, Comment, NewArticleInput, NewCategoryInput,
    NewCommentInput,
};
use serde::Deserialize;

use crate::query::{cached_get, invalidate_prefix, API_BASE};

#[derive(Debug, Deserialize)]
struct ArticleListResponse {
    articles: Vec<ArticleListItem>,
    #[allow(dead_code)]
    total: usize,
}

#[derive(Debug, Deserialize)]
struct CommentListResponse {
    comments: Vec<Comment>,
    #[allow(dead_code)]
    total: usize,
}

#[derive(Debug, Deserialize)]
struct CategoryListResponse {
    categories: Vec<Category>,
    #[allow(dead_code)]
    total: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchHit {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub tags: Vec<String>,
    pub created_at: i64,
    pub highlight: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchHit>,
    #[allow(dead_code)]
    total: usize,
}

#[derive(Debug, Deserialize)]
struct LikeResponse {
    likes: i64,
}

#[derive(Debug, Deserialize)]
struct ViewResponse {
    views: i64,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: String,
    #[serde(default)]
    details: Option<Vec<ApiFieldError>>,
}

#[derive(Debug, Deserialize)]
struct ApiFieldError {
    field: String,
    message: String,
}

/// Turn a non-2xx response into a readable message, keeping field detail.
async fn error_message(response: Response) -> String {
    let status = response.status();
    match response.json::<ApiErrorBody>().await {
        Ok(body) => match body.details {
            Some(details) if !details.is_empty() => {
                let fields: Vec<String> = details
                    .into_iter()
                    .map(|e| format!("{} {}", e.field, e.message))
                    .collect();
                fields.join(", ")
            },
            _ => body.error,
        },
        Err(_) => format!("HTTP error: {}", status),
    }
}

// ---------------------------------------------------------------------------
// Reads (cached)
// ---------------------------------------------------------------------------

/// Filters for article list fetches; `None` fields are omitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticleListParams {
    pub category: Option<String>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
}

impl ArticleListParams {
    fn to_path(&self) -> String {
        let mut params = Vec::new();
        if let Some(ref category) = self.category {
            params.push(format!("category={}", urlencoding::encode(category)));
        }
        if let Some(published) = self.published {
            params.push(format!("published={}", published));
        }
        if let Some(featured) = self.featured {
            params.push(format!("featured={}", featured));
        }
        if params.is_empty() {
            "/api/articles".to_string()
        } else {
            format!("/api/articles?{}", params.join("&"))
        }
    }
}

pub async fn fetch_articles(params: &ArticleListParams) -> Result<Vec<ArticleListItem>, String> {
    let response: ArticleListResponse = cached_get(&params.to_path()).await?;
    Ok(response.articles)
}

pub async fn fetch_article(id: &str) -> Result<Article, String> {
    cached_get(&format!("/api/articles/{}", urlencoding::encode(id))).await
}

pub async fn fetch_comments(article_id: &str) -> Result<Vec<Comment>, String> {
    let path = format!("/api/articles/{}/comments", urlencoding::encode(article_id));
    let response: CommentListResponse = cached_get(&path).await?;
    Ok(response.comments)
}

pub async fn fetch_categories() -> Result<Vec<Category>, String> {
    let response: CategoryListResponse = cached_get("/api/categories").await?;
    Ok(response.categories)
}

pub async fn fetch_category(slug: &str) -> Result<Category, String> {
    cached_get(&format!("/api/categories/{}", urlencoding::encode(slug))).await
}

pub async fn search_articles(keyword: &str) -> Result<Vec<SearchHit>, String> {
    let path = format!("/api/search?q={}", urlencoding::encode(keyword));
    let response: SearchResponse = cached_get(&path).await?;
    Ok(response.results)
}

// ---------------------------------------------------------------------------
// Mutations (invalidate on success)
// ---------------------------------------------------------------------------

fn invalidate_article_caches() {
    invalidate_prefix("/api/articles");
    invalidate_prefix("/api/search");
    invalidate_prefix("/api/tags");
}

pub async fn create_article(input: &NewArticleInput) -> Result<Article, String> {
    let response = Request::post(&format!("{}/api/articles", API_BASE))
        .json(input)
        .map_err(|e| format!("Encode error: {:?}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {:?}", e))?;
    if !response.ok() {
        return Err(error_message(response).await);
    }
    let article = response
        .json::<Article>()
        .await
        .map_err(|e| format!("Parse error: {:?}", e))?;
    invalidate_article_caches();
    Ok(article)
}

pub async fn update_article(id: &str, patch: &ArticlePatch) -> Result<Article, String> {
    let url = format!("{}/api/articles/{}", API_BASE, urlencoding::encode(id));
    let response = Request::put(&url)
        .json(patch)
        .map_err(|e| format!("Encode error: {:?}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {:?}", e))?;
    if !response.ok() {
        return Err(error_message(response).await);
    }
    let article = response
        .json::<Article>()
        .await
        .map_err(|e| format!("Parse error: {:?}", e))?;
    invalidate_article_caches();
    Ok(article)
}

pub async fn delete_article(id: &str) -> Result<(), String> {
    let url = format!("{}/api/articles/{}", API_BASE, urlencoding::encode(id));
    let response = Request::delete(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {:?}", e))?;
    if !response.ok() {
        return Err(error_message(response).await);
    }
    invalidate_article_caches();
    Ok(())
}

pub async fn like_article(id: &str) -> Result<i64, String> {
    let url = format!("{}/api/articles/{}/like", API_BASE, urlencoding::encode(id));
    let response = Request::post(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {:?}", e))?;
    if !response.ok() {
        return Err(error_message(response).await);
    }
    let body = response
        .json::<LikeResponse>()
        .await
        .map_err(|e| format!("Parse error: {:?}", e))?;
    invalidate_article_caches();
    Ok(body.likes)
}

/// Count a page view; invalidates only this article's cache entries.
pub async fn track_view(id: &str) -> Result<i64, String> {
    let url = format!("{}/api/articles/{}/views", API_BASE, urlencoding::encode(id));
    let response = Request::post(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {:?}", e))?;
    if !response.ok() {
        return Err(error_message(response).await);
    }
    let body = response
        .json::<ViewResponse>()
        .await
        .map_err(|e| format!("Parse error: {:?}", e))?;
    invalidate_prefix(&format!("/api/articles/{}", urlencoding::encode(id)));
    Ok(body.views)
}

pub async fn post_comment(article_id: &str, input: &NewCommentInput) -> Result<Comment, String> {
    let url = format!(
        "{}/api/articles/{}/comments",
        API_BASE,
        urlencoding::encode(article_id)
    );
    let response = Request::post(&url)
        .json(input)
        .map_err(|e| format!("Encode error: {:?}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {:?}", e))?;
    if !response.ok() {
        return Err(error_message(response).await);
    }
    let comment = response
        .json::<Comment>()
        .await
        .map_err(|e| format!("Parse error: {:?}", e))?;
    invalidate_prefix(&format!(
        "/api/articles/{}/comments",
        urlencoding::encode(article_id)
    ));
    Ok(comment)
}

pub async fn delete_comment(id: &str, article_id: &str) -> Result<(), String> {
    let url = format!("{}/api/comments/{}", API_BASE, urlencoding::encode(id));
    let response = Request::delete(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {:?}", e))?;
    if !response.ok() {
        return Err(error_message(response).await);
    }
    invalidate_prefix(&format!(
        "/api/articles/{}/comments",
        urlencoding::encode(article_id)
    ));
    Ok(())
}

pub async fn create_category(input: &NewCategoryInput) -> Result<Category, String> {
    let response = Request::post(&format!("{}/api/categories", API_BASE))
        .json(input)
        .map_err(|e| format!("Encode error: {:?}", e))?
        .send()
        .await
        .map_err(|e| format!("Network error: {:?}", e))?;
    if !response.ok() {
        return Err(error_message(response).await);
    }
    let category = response
        .json::<Category>()
        .await
        .map_err(|e| format!("Parse error: {:?}", e))?;
    invalidate_prefix("/api/categories");
    Ok(category)
}

pub async fn delete_category(id: &str) -> Result<(), String> {
    let url = format!("{}/api/categories/{}", API_BASE, urlencoding::encode(id));
    let response = Request::delete(&url)
        .send()
        .await
        .map_err(|e| format!("Network error: {:?}", e))?;
    if !response.ok() {
        return Err(error_message(response).await);
    }
    invalidate_prefix("/api/categories");
    Ok(())
}
