//! In-memory store, used when no database is configured.
//!
//! Mirrors the SQLite implementation behind the same [`ContentStore`]
//! contract; everything lives in vectors behind one RwLock, counter
//! increments happen under the write lock.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::store::{
    apply_article_patch, apply_category_patch, article_from_input, category_from_input, new_id,
    now_ms, ContentStore,
};
use crate::{
    Article, ArticleFilter, ArticlePatch, Category, CategoryPatch, Comment, NewArticleInput,
    NewCategoryInput, NewCommentInput,
};

#[derive(Default)]
struct Inner {
    articles: Vec<Article>,
    comments: Vec<Comment>,
    categories: Vec<Category>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn list_articles(&self, filter: &ArticleFilter) -> Result<Vec<Article>> {
        let inner = self.inner.read().await;
        let mut articles: Vec<Article> = inner
            .articles
            .iter()
            .filter(|article| filter.matches(article))
            .cloned()
            .collect();
        articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(articles)
    }

    async fn get_article(&self, id: &str) -> Result<Option<Article>> {
        let inner = self.inner.read().await;
        Ok(inner.articles.iter().find(|a| a.id == id).cloned())
    }

    async fn create_article(&self, input: NewArticleInput) -> Result<Article> {
        let article = article_from_input(input);
        let mut inner = self.inner.write().await;
        inner.articles.push(article.clone());
        Ok(article)
    }

    async fn update_article(&self, id: &str, patch: ArticlePatch) -> Result<Option<Article>> {
        let mut inner = self.inner.write().await;
        match inner.articles.iter_mut().find(|a| a.id == id) {
            Some(article) => {
                apply_article_patch(article, patch);
                Ok(Some(article.clone()))
            },
            None => Ok(None),
        }
    }

    async fn delete_article(&self, id: &str) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.articles.len();
        inner.articles.retain(|a| a.id != id);
        let existed = inner.articles.len() != before;
        if existed {
            inner.comments.retain(|c| c.article_id != id);
        }
        Ok(existed)
    }

    async fn increment_views(&self, id: &str) -> Result<Option<i64>> {
        let mut inner = self.inner.write().await;
        Ok(inner.articles.iter_mut().find(|a| a.id == id).map(|article| {
            article.views += 1;
            article.views
        }))
    }

    async fn increment_likes(&self, id: &str) -> Result<Option<i64>> {
        let mut inner = self.inner.write().await;
        Ok(inner.articles.iter_mut().find(|a| a.id == id).map(|article| {
            article.likes += 1;
            article.likes
        }))
    }

    async fn list_comments(&self, article_id: &str) -> Result<Vec<Comment>> {
        let inner = self.inner.read().await;
        let mut comments: Vec<Comment> = inner
            .comments
            .iter()
            .filter(|c| c.article_id == article_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(comments)
    }

    async fn create_comment(
        &self,
        article_id: &str,
        input: NewCommentInput,
    ) -> Result<Option<Comment>> {
        let mut inner = self.inner.write().await;
        if !inner.articles.iter().any(|a| a.id == article_id) {
            return Ok(None);
        }
        let comment = Comment {
            id: new_id(),
            article_id: article_id.to_string(),
            author: input.author.trim().to_string(),
            email: input.email.trim().to_string(),
            content: input.content,
            created_at: now_ms(),
        };
        inner.comments.push(comment.clone());
        Ok(Some(comment))
    }

    async fn delete_comment(&self, id: &str) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.comments.len();
        inner.comments.retain(|c| c.id != id);
        Ok(inner.comments.len() != before)
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let inner = self.inner.read().await;
        let mut categories = inner.categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }

    async fn get_category(&self, id: &str) -> Result<Option<Category>> {
        let inner = self.inner.read().await;
        Ok(inner.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        let inner = self.inner.read().await;
        Ok(inner.categories.iter().find(|c| c.slug == slug).cloned())
    }

    async fn create_category(&self, input: NewCategoryInput) -> Result<Category> {
        let category = category_from_input(input);
        let mut inner = self.inner.write().await;
        if inner
            .categories
            .iter()
            .any(|c| c.name == category.name || c.slug == category.slug)
        {
            anyhow::bail!("category name and slug must be unique");
        }
        inner.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(&self, id: &str, patch: CategoryPatch) -> Result<Option<Category>> {
        let mut inner = self.inner.write().await;
        match inner.categories.iter_mut().find(|c| c.id == id) {
            Some(category) => {
                apply_category_patch(category, patch);
                Ok(Some(category.clone()))
            },
            None => Ok(None),
        }
    }

    async fn delete_category(&self, id: &str) -> Result<bool> {
        let mut inner = self.inner.write().await;
        let before = inner.categories.len();
        inner.categories.retain(|c| c.id != id);
        Ok(inner.categories.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(title: &str, category: &str, published: bool) -> NewArticleInput {
        NewArticleInput {
            title: title.to_string(),
            content: format!("{title} body"),
            excerpt: format!("{title} excerpt"),
            author: "Desk".to_string(),
            category: category.to_string(),
            published,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn filters_by_category_and_published() {
        let store = MemoryStore::new();
        store.create_article(sample("A", "Technology", true)).await.unwrap();
        store.create_article(sample("B", "technology", false)).await.unwrap();
        store.create_article(sample("C", "Sports", true)).await.unwrap();

        let filter = ArticleFilter {
            category: Some("TECHNOLOGY".to_string()),
            published: Some(true),
            ..Default::default()
        };
        let hits = store.list_articles(&filter).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "A");
    }

    #[tokio::test]
    async fn increments_are_exact() {
        let store = MemoryStore::new();
        let article = store.create_article(sample("A", "World", true)).await.unwrap();

        assert_eq!(store.increment_views(&article.id).await.unwrap(), Some(1));
        assert_eq!(store.increment_views(&article.id).await.unwrap(), Some(2));
        assert_eq!(store.increment_likes(&article.id).await.unwrap(), Some(1));
        assert_eq!(store.increment_likes(&article.id).await.unwrap(), Some(2));
        assert_eq!(store.increment_views("missing").await.unwrap(), None);

        let stored = store.get_article(&article.id).await.unwrap().unwrap();
        assert_eq!(stored.views, 2);
        assert_eq!(stored.likes, 2);
    }

    #[tokio::test]
    async fn comment_lifecycle() {
        let store = MemoryStore::new();
        let article = store.create_article(sample("A", "World", true)).await.unwrap();

        let input = NewCommentInput {
            author: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            content: "First!".to_string(),
        };
        let first = store
            .create_comment(&article.id, input.clone())
            .await
            .unwrap()
            .expect("article exists");
        store.create_comment(&article.id, input.clone()).await.unwrap();
        assert!(store.create_comment("missing", input).await.unwrap().is_none());

        assert_eq!(store.list_comments(&article.id).await.unwrap().len(), 2);
        assert!(store.delete_comment(&first.id).await.unwrap());
        assert!(!store.delete_comment(&first.id).await.unwrap());
        assert_eq!(store.list_comments(&article.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_missing_returns_none_and_delete_reports_existence() {
        let store = MemoryStore::new();
        let patched = store
            .update_article("missing", ArticlePatch::default())
            .await
            .unwrap();
        assert!(patched.is_none());
        assert!(!store.delete_article("missing").await.unwrap());

        let article = store.create_article(sample("A", "World", true)).await.unwrap();
        assert!(store.delete_article(&article.id).await.unwrap());
    }

    #[tokio::test]
    async fn category_uniqueness_and_slug_lookup() {
        let store = MemoryStore::new();
        let created = store
            .create_category(NewCategoryInput {
                name: "Local News".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(created.slug, "local-news");

        let duplicate = store
            .create_category(NewCategoryInput {
                name: "Local News".to_string(),
                ..Default::default()
            })
            .await;
        assert!(duplicate.is_err());

        let found = store.get_category_by_slug("local-news").await.unwrap();
        assert_eq!(found.map(|c| c.id), Some(created.id));
    }
}
