use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use newsflow_shared::{
    validation, Article, ArticleFilter, ArticleListItem, ArticlePatch, Category, CategoryPatch,
    Comment, NewArticleInput, NewCategoryInput, NewCommentInput,
};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, state::AppState};

// ---------------------------------------------------------------------------
// Query parameters and response envelopes
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct ArticleListQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub featured: Option<String>,
}

impl ArticleListQuery {
    /// Coerce raw query-string values into a typed filter. Anything that is
    /// not a recognizable boolean is dropped rather than rejected.
    fn into_filter(self) -> ArticleFilter {
        ArticleFilter {
            query: self.q.map(|s| s.trim().to_string()).filter(|s| !s.is_empty()),
            category: self
                .category
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            published: self.published.as_deref().and_then(parse_flag),
            featured: self.featured.as_deref().and_then(parse_flag),
        }
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct ArticleListResponse {
    pub articles: Vec<ArticleListItem>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct CommentListResponse {
    pub comments: Vec<Comment>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct CategoryListResponse {
    pub categories: Vec<Category>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct TagInfo {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct TagsResponse {
    pub tags: Vec<TagInfo>,
}

#[derive(Debug, Serialize)]
pub struct LikeResponse {
    pub id: String,
    pub likes: i64,
}

#[derive(Debug, Serialize)]
pub struct ViewResponse {
    pub id: String,
    pub views: i64,
}

#[derive(Debug, Serialize)]
pub struct SearchResult {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub category: String,
    pub tags: Vec<String>,
    pub created_at: i64,
    pub highlight: String,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    pub total: usize,
    pub query: String,
}

// ---------------------------------------------------------------------------
// Articles
// ---------------------------------------------------------------------------

pub async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<ArticleListQuery>,
) -> Result<Json<ArticleListResponse>, ApiError> {
    let articles = state.store.list_articles(&query.into_filter()).await?;
    let articles: Vec<ArticleListItem> = articles.into_iter().map(Into::into).collect();
    let total = articles.len();
    Ok(Json(ArticleListResponse {
        articles,
        total,
    }))
}

pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Article>, ApiError> {
    match state.store.get_article(&id).await? {
        Some(article) => Ok(Json(article)),
        None => Err(ApiError::NotFound("article")),
    }
}

pub async fn create_article(
    State(state): State<AppState>,
    Json(input): Json<NewArticleInput>,
) -> Result<(StatusCode, Json<Article>), ApiError> {
    let errors = validation::validate_new_article(&input);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    let article = state.store.create_article(input).await?;
    Ok((StatusCode::CREATED, Json(article)))
}

pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<ArticlePatch>,
) -> Result<Json<Article>, ApiError> {
    let errors = validation::validate_article_patch(&patch);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    match state.store.update_article(&id, patch).await? {
        Some(article) => Ok(Json(article)),
        None => Err(ApiError::NotFound("article")),
    }
}

pub async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_article(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("article"))
    }
}

pub async fn like_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LikeResponse>, ApiError> {
    match state.store.increment_likes(&id).await? {
        Some(likes) => Ok(Json(LikeResponse {
            id,
            likes,
        })),
        None => Err(ApiError::NotFound("article")),
    }
}

pub async fn track_view(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ViewResponse>, ApiError> {
    match state.store.increment_views(&id).await? {
        Some(views) => Ok(Json(ViewResponse {
            id,
            views,
        })),
        None => Err(ApiError::NotFound("article")),
    }
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

pub async fn list_comments(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
) -> Result<Json<CommentListResponse>, ApiError> {
    let comments = state.store.list_comments(&article_id).await?;
    let total = comments.len();
    Ok(Json(CommentListResponse {
        comments,
        total,
    }))
}

pub async fn create_comment(
    State(state): State<AppState>,
    Path(article_id): Path<String>,
    Json(input): Json<NewCommentInput>,
) -> Result<(StatusCode, Json<Comment>), ApiError> {
    let errors = validation::validate_new_comment(&input);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    match state.store.create_comment(&article_id, input).await? {
        Some(comment) => Ok((StatusCode::CREATED, Json(comment))),
        None => Err(ApiError::NotFound("article")),
    }
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_comment(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("comment"))
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoryListResponse>, ApiError> {
    let categories = state.store.list_categories().await?;
    let total = categories.len();
    Ok(Json(CategoryListResponse {
        categories,
        total,
    }))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Category>, ApiError> {
    match state.store.get_category_by_slug(&slug).await? {
        Some(category) => Ok(Json(category)),
        None => Err(ApiError::NotFound("category")),
    }
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<NewCategoryInput>,
) -> Result<(StatusCode, Json<Category>), ApiError> {
    let mut errors = validation::validate_new_category(&input);
    if errors.is_empty() {
        // Uniqueness is part of the contract; report it as a field error
        // instead of letting the store constraint surface as a 500.
        let slug = input
            .slug
            .clone()
            .unwrap_or_else(|| validation::slugify(&input.name));
        if state.store.get_category_by_slug(&slug).await?.is_some() {
            errors.push(newsflow_shared::validation::FieldError {
                field: "slug".to_string(),
                message: "is already in use".to_string(),
            });
        }
    }
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    let category = state.store.create_category(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<CategoryPatch>,
) -> Result<Json<Category>, ApiError> {
    let errors = validation::validate_category_patch(&patch);
    if !errors.is_empty() {
        return Err(ApiError::Validation(errors));
    }
    match state.store.update_category(&id, patch).await? {
        Some(category) => Ok(Json(category)),
        None => Err(ApiError::NotFound("category")),
    }
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.store.delete_category(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound("category"))
    }
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

pub async fn list_tags(State(state): State<AppState>) -> Result<Json<TagsResponse>, ApiError> {
    let articles = state
        .store
        .list_articles(&ArticleFilter {
            published: Some(true),
            ..Default::default()
        })
        .await?;

    // Aggregate tag counts
    let mut tag_counts: HashMap<String, usize> = HashMap::new();
    for article in articles {
        for tag in article.tags {
            *tag_counts.entry(tag).or_insert(0) += 1;
        }
    }

    // Sort by name
    let mut tags: Vec<TagInfo> = tag_counts
        .into_iter()
        .map(|(name, count)| TagInfo {
            name,
            count,
        })
        .collect();
    tags.sort_by(|a, b| a.name.cmp(&b.name));

    Ok(Json(TagsResponse {
        tags,
    }))
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

pub async fn search_articles(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    let keyword = query.q.trim();
    if keyword.is_empty() {
        return Ok(Json(SearchResponse {
            results: vec![],
            total: 0,
            query: query.q,
        }));
    }

    let articles = state
        .store
        .list_articles(&ArticleFilter {
            published: Some(true),
            ..Default::default()
        })
        .await?;

    let results = score_articles(articles, keyword);

    Ok(Json(SearchResponse {
        total: results.len(),
        results,
        query: query.q,
    }))
}

fn score_articles(articles: Vec<Article>, keyword: &str) -> Vec<SearchResult> {
    let keyword_lower = keyword.to_lowercase();
    let mut results = Vec::new();
    for article in articles {
        let mut score = 0;
        if article.title.to_lowercase().contains(&keyword_lower) {
            score += 10;
        }
        if article.excerpt.to_lowercase().contains(&keyword_lower) {
            score += 5;
        }
        if article.content.to_lowercase().contains(&keyword_lower) {
            score += 1;
        }
        for tag in &article.tags {
            if tag.to_lowercase().contains(&keyword_lower) {
                score += 3;
            }
        }

        if score > 0 {
            results.push((
                SearchResult {
                    highlight: extract_highlight(&article.content, &keyword_lower),
                    id: article.id,
                    title: article.title,
                    excerpt: article.excerpt,
                    category: article.category,
                    tags: article.tags,
                    created_at: article.created_at,
                },
                score,
            ));
        }
    }

    results.sort_by(|a, b| b.1.cmp(&a.1));
    results.into_iter().map(|(r, _)| r).collect()
}

/// Extract a snippet around the keyword with highlighting.
fn extract_highlight(text: &str, keyword: &str) -> String {
    let text_lower = text.to_lowercase();
    let keyword_lower = keyword.to_lowercase();

    if let Some(pos) = text_lower.find(&keyword_lower) {
        let start = pos.saturating_sub(40);
        let end = (pos + keyword.len() + 40).min(text.len());

        let mut snippet: String = text.chars().skip(start).take(end - start).collect();

        if start > 0 {
            snippet.insert_str(0, "...");
        }
        if end < text.len() {
            snippet.push_str("...");
        }

        let snippet_lower = snippet.to_lowercase();
        if let Some(keyword_pos) = snippet_lower.find(&keyword_lower) {
            let before = &snippet[..keyword_pos];
            let matched = &snippet[keyword_pos..keyword_pos + keyword.len()];
            let after = &snippet[keyword_pos + keyword.len()..];
            return format!("{}<mark>{}</mark>{}", before, matched, after);
        }

        snippet
    } else {
        text.chars().take(100).collect::<String>() + "..."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag("FALSE"), Some(false));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("yes"), None);
        assert_eq!(parse_flag(""), None);
    }

    #[test]
    fn blank_query_values_are_dropped() {
        let filter = ArticleListQuery {
            q: Some("  ".to_string()),
            category: Some("Tech".to_string()),
            published: Some("maybe".to_string()),
            featured: None,
        }
        .into_filter();
        assert_eq!(filter.query, None);
        assert_eq!(filter.category, Some("Tech".to_string()));
        assert_eq!(filter.published, None);
    }

    #[test]
    fn highlight_marks_the_keyword() {
        let highlight = extract_highlight("The council approved the budget today.", "budget");
        assert!(highlight.contains("<mark>budget</mark>"));
    }

    #[test]
    fn title_hits_outrank_content_hits() {
        let title_hit = Article {
            id: "a".to_string(),
            title: "Budget approved".to_string(),
            content: "Details inside.".to_string(),
            excerpt: "Short".to_string(),
            author: "Desk".to_string(),
            author_title: None,
            author_image: None,
            category: "Politics".to_string(),
            tags: vec![],
            image_url: None,
            published: true,
            featured: false,
            views: 0,
            likes: 0,
            created_at: 1,
            updated_at: 1,
        };
        let content_hit = Article {
            id: "b".to_string(),
            title: "Council news".to_string(),
            content: "The budget passed.".to_string(),
            ..title_hit.clone()
        };
        let results = score_articles(vec![content_hit, title_hit.clone()], "budget");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "a");
    }
}
