//! SQLite-backed store.
//!
//! The schema is ensured at connect time; tag lists are stored as JSON text.
//! Counter bumps are single `UPDATE ... RETURNING` statements so concurrent
//! increments never lose updates.

use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::store::{
    apply_article_patch, apply_category_patch, article_from_input, category_from_input, new_id,
    now_ms, ContentStore,
};
use crate::{
    Article, ArticleFilter, ArticlePatch, Category, CategoryPatch, Comment, NewArticleInput,
    NewCategoryInput, NewCommentInput,
};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS articles (
    id           TEXT PRIMARY KEY,
    title        TEXT NOT NULL,
    content      TEXT NOT NULL,
    excerpt      TEXT NOT NULL,
    author       TEXT NOT NULL,
    author_title TEXT,
    author_image TEXT,
    category     TEXT NOT NULL,
    tags         TEXT NOT NULL DEFAULT '[]',
    image_url    TEXT,
    published    INTEGER NOT NULL DEFAULT 0,
    featured     INTEGER NOT NULL DEFAULT 0,
    views        INTEGER NOT NULL DEFAULT 0,
    likes        INTEGER NOT NULL DEFAULT 0,
    created_at   INTEGER NOT NULL,
    updated_at   INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS comments (
    id         TEXT PRIMARY KEY,
    article_id TEXT NOT NULL,
    author     TEXT NOT NULL,
    email      TEXT NOT NULL,
    content    TEXT NOT NULL,
    created_at INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_comments_article ON comments(article_id);

CREATE TABLE IF NOT EXISTS categories (
    id          TEXT PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE,
    slug        TEXT NOT NULL UNIQUE,
    description TEXT,
    color       TEXT
);
"#;

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .with_context(|| format!("invalid sqlite url: {database_url}"))?
            .create_if_missing(true);
        // In-memory databases are per-connection; keep the pool at one there.
        let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .context("failed to open sqlite database")?;

        // One statement per query: sqlx prepares each call individually.
        for statement in SCHEMA.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            sqlx::query(statement)
                .execute(&pool)
                .await
                .context("failed to ensure sqlite schema")?;
        }

        Ok(Self {
            pool,
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[derive(sqlx::FromRow)]
struct ArticleRow {
    id: String,
    title: String,
    content: String,
    excerpt: String,
    author: String,
    author_title: Option<String>,
    author_image: Option<String>,
    category: String,
    tags: String,
    image_url: Option<String>,
    published: bool,
    featured: bool,
    views: i64,
    likes: i64,
    created_at: i64,
    updated_at: i64,
}

impl ArticleRow {
    fn into_article(self) -> Result<Article> {
        let tags: Vec<String> =
            serde_json::from_str(&self.tags).context("malformed tags column")?;
        Ok(Article {
            id: self.id,
            title: self.title,
            content: self.content,
            excerpt: self.excerpt,
            author: self.author,
            author_title: self.author_title,
            author_image: self.author_image,
            category: self.category,
            tags,
            image_url: self.image_url,
            published: self.published,
            featured: self.featured,
            views: self.views,
            likes: self.likes,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const ARTICLE_COLUMNS: &str = "id, title, content, excerpt, author, author_title, author_image, \
                               category, tags, image_url, published, featured, views, likes, \
                               created_at, updated_at";

async fn insert_article(pool: &SqlitePool, article: &Article) -> Result<()> {
    let tags = serde_json::to_string(&article.tags)?;
    sqlx::query(
        "INSERT INTO articles (id, title, content, excerpt, author, author_title, author_image, \
         category, tags, image_url, published, featured, views, likes, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&article.id)
    .bind(&article.title)
    .bind(&article.content)
    .bind(&article.excerpt)
    .bind(&article.author)
    .bind(&article.author_title)
    .bind(&article.author_image)
    .bind(&article.category)
    .bind(tags)
    .bind(&article.image_url)
    .bind(article.published)
    .bind(article.featured)
    .bind(article.views)
    .bind(article.likes)
    .bind(article.created_at)
    .bind(article.updated_at)
    .execute(pool)
    .await
    .context("failed to insert article")?;
    Ok(())
}

#[async_trait]
impl ContentStore for SqliteStore {
    async fn list_articles(&self, filter: &ArticleFilter) -> Result<Vec<Article>> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {ARTICLE_COLUMNS} FROM articles WHERE 1 = 1"));

        if let Some(ref query) = filter.query {
            let pattern = format!("%{}%", query.to_lowercase());
            builder
                .push(" AND (lower(title) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR lower(content) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR lower(author) LIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(ref category) = filter.category {
            builder
                .push(" AND category = ")
                .push_bind(category.clone())
                .push(" COLLATE NOCASE");
        }
        if let Some(published) = filter.published {
            builder.push(" AND published = ").push_bind(published);
        }
        if let Some(featured) = filter.featured {
            builder.push(" AND featured = ").push_bind(featured);
        }
        builder.push(" ORDER BY created_at DESC");

        let rows: Vec<ArticleRow> = builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .context("failed to list articles")?;
        rows.into_iter().map(ArticleRow::into_article).collect()
    }

    async fn get_article(&self, id: &str) -> Result<Option<Article>> {
        let row: Option<ArticleRow> = sqlx::query_as(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM articles WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("failed to fetch article")?;
        row.map(ArticleRow::into_article).transpose()
    }

    async fn create_article(&self, input: NewArticleInput) -> Result<Article> {
        let article = article_from_input(input);
        insert_article(&self.pool, &article).await?;
        Ok(article)
    }

    async fn update_article(&self, id: &str, patch: ArticlePatch) -> Result<Option<Article>> {
        let mut article = match self.get_article(id).await? {
            Some(article) => article,
            None => return Ok(None),
        };
        apply_article_patch(&mut article, patch);

        let tags = serde_json::to_string(&article.tags)?;
        sqlx::query(
            "UPDATE articles SET title = ?, content = ?, excerpt = ?, author = ?, \
             author_title = ?, author_image = ?, category = ?, tags = ?, image_url = ?, \
             published = ?, featured = ?, updated_at = ? WHERE id = ?",
        )
        .bind(&article.title)
        .bind(&article.content)
        .bind(&article.excerpt)
        .bind(&article.author)
        .bind(&article.author_title)
        .bind(&article.author_image)
        .bind(&article.category)
        .bind(tags)
        .bind(&article.image_url)
        .bind(article.published)
        .bind(article.featured)
        .bind(article.updated_at)
        .bind(id)
        .execute(&self.pool)
        .await
        .context("failed to update article")?;
        Ok(Some(article))
    }

    async fn delete_article(&self, id: &str) -> Result<bool> {
        sqlx::query("DELETE FROM comments WHERE article_id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("failed to delete article comments")?;
        let result = sqlx::query("DELETE FROM articles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("failed to delete article")?;
        Ok(result.rows_affected() > 0)
    }

    async fn increment_views(&self, id: &str) -> Result<Option<i64>> {
        let views = sqlx::query_scalar::<_, i64>(
            "UPDATE articles SET views = views + 1 WHERE id = ? RETURNING views",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("failed to increment views")?;
        Ok(views)
    }

    async fn increment_likes(&self, id: &str) -> Result<Option<i64>> {
        let likes = sqlx::query_scalar::<_, i64>(
            "UPDATE articles SET likes = likes + 1 WHERE id = ? RETURNING likes",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("failed to increment likes")?;
        Ok(likes)
    }

    async fn list_comments(&self, article_id: &str) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            "SELECT id, article_id, author, email, content, created_at FROM comments \
             WHERE article_id = ? ORDER BY created_at DESC",
        )
        .bind(article_id)
        .fetch_all(&self.pool)
        .await
        .context("failed to list comments")?;
        Ok(comments)
    }

    async fn create_comment(
        &self,
        article_id: &str,
        input: NewCommentInput,
    ) -> Result<Option<Comment>> {
        let exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM articles WHERE id = ?")
            .bind(article_id)
            .fetch_one(&self.pool)
            .await
            .context("failed to check article existence")?;
        if exists == 0 {
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
        sqlx::query(
            "INSERT INTO comments (id, article_id, author, email, content, created_at) \
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&comment.id)
        .bind(&comment.article_id)
        .bind(&comment.author)
        .bind(&comment.email)
        .bind(&comment.content)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .context("failed to insert comment")?;
        Ok(Some(comment))
    }

    async fn delete_comment(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("failed to delete comment")?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, slug, description, color FROM categories ORDER BY name ASC",
        )
        .fetch_all(&self.pool)
        .await
        .context("failed to list categories")?;
        Ok(categories)
    }

    async fn get_category(&self, id: &str) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, slug, description, color FROM categories WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("failed to fetch category")?;
        Ok(category)
    }

    async fn get_category_by_slug(&self, slug: &str) -> Result<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            "SELECT id, name, slug, description, color FROM categories WHERE slug = ?",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await
        .context("failed to fetch category by slug")?;
        Ok(category)
    }

    async fn create_category(&self, input: NewCategoryInput) -> Result<Category> {
        let category = category_from_input(input);
        sqlx::query(
            "INSERT INTO categories (id, name, slug, description, color) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&category.id)
        .bind(&category.name)
        .bind(&category.slug)
        .bind(&category.description)
        .bind(&category.color)
        .execute(&self.pool)
        .await
        .context("category name and slug must be unique")?;
        Ok(category)
    }

    async fn update_category(&self, id: &str, patch: CategoryPatch) -> Result<Option<Category>> {
        let mut category = match self.get_category(id).await? {
            Some(category) => category,
            None => return Ok(None),
        };
        apply_category_patch(&mut category, patch);

        sqlx::query("UPDATE categories SET name = ?, slug = ?, description = ?, color = ? WHERE id = ?")
            .bind(&category.name)
            .bind(&category.slug)
            .bind(&category.description)
            .bind(&category.color)
            .bind(id)
            .execute(&self.pool)
            .await
            .context("failed to update category")?;
        Ok(Some(category))
    }

    async fn delete_category(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("failed to delete category")?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn store() -> SqliteStore {
        SqliteStore::connect("sqlite::memory:").await.expect("open in-memory db")
    }

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
    async fn round_trips_tags_and_flags() {
        let store = store().await;
        let created = store
            .create_article(NewArticleInput {
                tags: vec!["one".to_string(), "two".to_string()],
                featured: true,
                ..sample("A", "World", true)
            })
            .await
            .unwrap();

        let fetched = store.get_article(&created.id).await.unwrap().expect("stored");
        assert_eq!(fetched, created);
        assert_eq!(fetched.tags, vec!["one".to_string(), "two".to_string()]);
        assert!(fetched.featured);
    }

    #[tokio::test]
    async fn filters_match_memory_semantics() {
        let store = store().await;
        store.create_article(sample("Alpha", "Technology", true)).await.unwrap();
        store.create_article(sample("Beta", "technology", false)).await.unwrap();
        store.create_article(sample("Gamma", "Sports", true)).await.unwrap();

        let hits = store
            .list_articles(&ArticleFilter {
                category: Some("TECHNOLOGY".to_string()),
                published: Some(true),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Alpha");

        let text_hits = store
            .list_articles(&ArticleFilter {
                query: Some("gamma BODY".to_lowercase()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(text_hits.len(), 1);
        assert_eq!(text_hits[0].title, "Gamma");
    }

    #[tokio::test]
    async fn increments_are_atomic_statements() {
        let store = store().await;
        let article = store.create_article(sample("A", "World", true)).await.unwrap();

        assert_eq!(store.increment_views(&article.id).await.unwrap(), Some(1));
        assert_eq!(store.increment_views(&article.id).await.unwrap(), Some(2));
        assert_eq!(store.increment_likes(&article.id).await.unwrap(), Some(1));
        assert_eq!(store.increment_views("missing").await.unwrap(), None);

        let stored = store.get_article(&article.id).await.unwrap().expect("stored");
        assert_eq!(stored.views, 2);
        assert_eq!(stored.likes, 1);
    }

    #[tokio::test]
    async fn comments_follow_article_lifecycle() {
        let store = store().await;
        let article = store.create_article(sample("A", "World", true)).await.unwrap();
        let input = NewCommentInput {
            author: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            content: "First!".to_string(),
        };

        assert!(store.create_comment("missing", input.clone()).await.unwrap().is_none());
        let comment = store
            .create_comment(&article.id, input.clone())
            .await
            .unwrap()
            .expect("article exists");
        store.create_comment(&article.id, input).await.unwrap();

        assert_eq!(store.list_comments(&article.id).await.unwrap().len(), 2);
        assert!(store.delete_comment(&comment.id).await.unwrap());
        assert_eq!(store.list_comments(&article.id).await.unwrap().len(), 1);

        assert!(store.delete_article(&article.id).await.unwrap());
        assert!(store.list_comments(&article.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn category_unique_constraint_surfaces_as_error() {
        let store = store().await;
        store
            .create_category(NewCategoryInput {
                name: "Local".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();
        let duplicate = store
            .create_category(NewCategoryInput {
                name: "Local".to_string(),
                ..Default::default()
            })
            .await;
        assert!(duplicate.is_err());
    }

    #[tokio::test]
    async fn update_missing_rows_return_none() {
        let store = store().await;
        assert!(store
            .update_article("missing", ArticlePatch::default())
            .await
            .unwrap()
            .is_none());
        assert!(store
            .update_category("missing", CategoryPatch::default())
            .await
            .unwrap()
            .is_none());
        assert!(!store.delete_article("missing").await.unwrap());
    }
}
