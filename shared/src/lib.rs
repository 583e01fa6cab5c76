pub mod validation;

#[cfg(not(target_arch = "wasm32"))]
pub mod memory_store;
#[cfg(not(target_arch = "wasm32"))]
pub mod sqlite_store;
#[cfg(not(target_arch = "wasm32"))]
pub mod store;

use serde::{Deserialize, Serialize};

// Full article data model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub author: String,
    pub author_title: Option<String>,
    pub author_image: Option<String>,
    pub category: String,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub views: i64,
    pub likes: i64,
    pub created_at: i64, // Unix millis
    pub updated_at: i64,
}

// List item (trimmed, no content body)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleListItem {
    pub id: String,
    pub title: String,
    pub excerpt: String,
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub image_url: Option<String>,
    pub published: bool,
    pub featured: bool,
    pub views: i64,
    pub likes: i64,
    pub created_at: i64,
}

impl From<Article> for ArticleListItem {
    fn from(a: Article) -> Self {
        ArticleListItem {
            id: a.id,
            title: a.title,
            excerpt: a.excerpt,
            author: a.author,
            category: a.category,
            tags: a.tags,
            image_url: a.image_url,
            published: a.published,
            featured: a.featured,
            views: a.views,
            likes: a.likes,
            created_at: a.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(not(target_arch = "wasm32"), derive(sqlx::FromRow))]
pub struct Comment {
    pub id: String,
    pub article_id: String,
    pub author: String,
    pub email: String,
    pub content: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(not(target_arch = "wasm32"), derive(sqlx::FromRow))]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub color: Option<String>,
}

// ---------------------------------------------------------------------------
// Mutation inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewArticleInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub author_title: Option<String>,
    #[serde(default)]
    pub author_image: Option<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub featured: bool,
}

// Partial update: absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticlePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub author: Option<String>,
    pub author_title: Option<String>,
    pub author_image: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewCommentInput {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewCategoryInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

// ---------------------------------------------------------------------------
// List filtering
// ---------------------------------------------------------------------------

/// Optional filters applied by `list_articles`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArticleFilter {
    /// Case-insensitive substring match against title, content and author.
    pub query: Option<String>,
    /// Case-insensitive exact match against the category label.
    pub category: Option<String>,
    pub published: Option<bool>,
    pub featured: Option<bool>,
}

impl ArticleFilter {
    pub fn matches(&self, article: &Article) -> bool {
        if let Some(ref q) = self.query {
            let q = q.to_lowercase();
            let hit = article.title.to_lowercase().contains(&q)
                || article.content.to_lowercase().contains(&q)
                || article.author.to_lowercase().contains(&q);
            if !hit {
                return false;
            }
        }
        if let Some(ref category) = self.category {
            if !article.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }
        if let Some(published) = self.published {
            if article.published != published {
                return false;
            }
        }
        if let Some(featured) = self.featured {
            if article.featured != featured {
                return false;
            }
        }
        true
    }
}
