//! Storage abstraction shared by the persistent and in-memory backends.
//!
//! Every route handler talks to the store through this trait, so the two
//! implementations stay interchangeable: SQLite when `DATABASE_URL` is
//! configured, in-memory otherwise.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;

use crate::{
    Article, ArticleFilter, ArticlePatch, Category, CategoryPatch, Comment, NewArticleInput,
    NewCategoryInput, NewCommentInput,
};

#[async_trait]
pub trait ContentStore: Send + Sync {
    /// List articles matching `filter`, newest first.
    async fn list_articles(&self, filter: &ArticleFilter) -> Result<Vec<Article>>;
    async fn get_article(&self, id: &str) -> Result<Option<Article>>;
    async fn create_article(&self, input: NewArticleInput) -> Result<Article>;
    /// Returns `Ok(None)` when `id` does not exist.
    async fn update_article(&self, id: &str, patch: ArticlePatch) -> Result<Option<Article>>;
    /// Returns whether a row existed.
    async fn delete_article(&self, id: &str) -> Result<bool>;

    /// Atomic `views + 1`; returns the new count, `None` if `id` is absent.
    async fn increment_views(&self, id: &str) -> Result<Option<i64>>;
    /// Atomic `likes + 1`; returns the new count, `None` if `id` is absent.
    async fn increment_likes(&self, id: &str) -> Result<Option<i64>>;

    /// Comments for one article, newest first.
    async fn list_comments(&self, article_id: &str) -> Result<Vec<Comment>>;
    /// Returns `Ok(None)` when the target article does not exist.
    async fn create_comment(
        &self,
        article_id: &str,
        input: NewCommentInput,
    ) -> Result<Option<Comment>>;
    async fn delete_comment(&self, id: &str) -> Result<bool>;

    /// Categories ordered by name; the entity carries no creation time.
    async fn list_categories(&self) -> Result<Vec<Category>>;
    async fn get_category(&self, id: &str) -> Result<Option<Category>>;
    async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>>;
    async fn create_category(&self, input: NewCategoryInput) -> Result<Category>;
    async fn update_category(&self, id: &str, patch: CategoryPatch) -> Result<Option<Category>>;
    async fn delete_category(&self, id: &str) -> Result<bool>;
}

pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
}

/// Trim tag entries and drop empties, preserving order.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Build the stored article for a validated create input.
pub fn article_from_input(input: NewArticleInput) -> Article {
    let now = now_ms();
    Article {
        id: new_id(),
        title: input.title.trim().to_string(),
        content: input.content,
        excerpt: input.excerpt.trim().to_string(),
        author: input.author.trim().to_string(),
        author_title: normalize_optional_text(input.author_title),
        author_image: normalize_optional_text(input.author_image),
        category: input.category.trim().to_string(),
        tags: normalize_tags(input.tags),
        image_url: normalize_optional_text(input.image_url),
        published: input.published,
        featured: input.featured,
        views: 0,
        likes: 0,
        created_at: now,
        updated_at: now,
    }
}

/// Apply a patch in place and bump `updated_at`.
pub fn apply_article_patch(article: &mut Article, patch: ArticlePatch) {
    if let Some(title) = patch.title {
        article.title = title.trim().to_string();
    }
    if let Some(content) = patch.content {
        article.content = content;
    }
    if let Some(excerpt) = patch.excerpt {
        article.excerpt = excerpt.trim().to_string();
    }
    if let Some(author) = patch.author {
        article.author = author.trim().to_string();
    }
    if patch.author_title.is_some() {
        article.author_title = normalize_optional_text(patch.author_title);
    }
    if patch.author_image.is_some() {
        article.author_image = normalize_optional_text(patch.author_image);
    }
    if let Some(category) = patch.category {
        article.category = category.trim().to_string();
    }
    if let Some(tags) = patch.tags {
        article.tags = normalize_tags(tags);
    }
    if patch.image_url.is_some() {
        article.image_url = normalize_optional_text(patch.image_url);
    }
    if let Some(published) = patch.published {
        article.published = published;
    }
    if let Some(featured) = patch.featured {
        article.featured = featured;
    }
    article.updated_at = now_ms();
}

/// Build the stored category; the slug falls back to a slugified name.
pub fn category_from_input(input: NewCategoryInput) -> Category {
    let name = input.name.trim().to_string();
    let slug = normalize_optional_text(input.slug)
        .unwrap_or_else(|| crate::validation::slugify(&name));
    Category {
        id: new_id(),
        name,
        slug,
        description: normalize_optional_text(input.description),
        color: normalize_optional_text(input.color),
    }
}

pub fn apply_category_patch(category: &mut Category, patch: CategoryPatch) {
    if let Some(name) = patch.name {
        category.name = name.trim().to_string();
    }
    if let Some(slug) = patch.slug {
        category.slug = slug.trim().to_string();
    }
    if patch.description.is_some() {
        category.description = normalize_optional_text(patch.description);
    }
    if patch.color.is_some() {
        category.color = normalize_optional_text(patch.color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_zeroes_counters_and_stamps_times() {
        let article = article_from_input(NewArticleInput {
            title: "  Title  ".to_string(),
            content: "Body".to_string(),
            excerpt: "Short".to_string(),
            author: "Ana".to_string(),
            category: "World".to_string(),
            tags: vec![" one ".to_string(), String::new(), "two".to_string()],
            ..Default::default()
        });
        assert_eq!(article.views, 0);
        assert_eq!(article.likes, 0);
        assert_eq!(article.title, "Title");
        assert_eq!(article.tags, vec!["one".to_string(), "two".to_string()]);
        assert_eq!(article.created_at, article.updated_at);
        assert!(!article.id.is_empty());
    }

    #[test]
    fn patch_leaves_absent_fields_alone() {
        let mut article = article_from_input(NewArticleInput {
            title: "Original".to_string(),
            content: "Body".to_string(),
            excerpt: "Short".to_string(),
            author: "Ana".to_string(),
            category: "World".to_string(),
            ..Default::default()
        });
        let created = article.created_at;
        apply_article_patch(&mut article, ArticlePatch {
            title: Some("Updated".to_string()),
            published: Some(true),
            ..Default::default()
        });
        assert_eq!(article.title, "Updated");
        assert!(article.published);
        assert_eq!(article.content, "Body");
        assert_eq!(article.created_at, created);
    }

    #[test]
    fn category_slug_falls_back_to_name() {
        let category = category_from_input(NewCategoryInput {
            name: "Local News".to_string(),
            ..Default::default()
        });
        assert_eq!(category.slug, "local-news");

        let explicit = category_from_input(NewCategoryInput {
            name: "Local News".to_string(),
            slug: Some("local".to_string()),
            ..Default::default()
        });
        assert_eq!(explicit.slug, "local");
    }
}
