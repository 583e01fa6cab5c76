//! Field-level validation for mutation payloads.
//!
//! Validators collect every problem instead of failing fast so the API can
//! return the full set of field errors in one 400 response.

use serde::{Deserialize, Serialize};

use crate::{ArticlePatch, CategoryPatch, NewArticleInput, NewCategoryInput, NewCommentInput};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: &str) -> Self {
        FieldError {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

fn require(errors: &mut Vec<FieldError>, field: &str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "is required"));
    }
}

fn reject_blank(errors: &mut Vec<FieldError>, field: &str, value: Option<&str>) {
    if let Some(value) = value {
        if value.trim().is_empty() {
            errors.push(FieldError::new(field, "must not be blank"));
        }
    }
}

pub fn validate_new_article(input: &NewArticleInput) -> Vec<FieldError> {
    let mut errors = Vec::new();
    require(&mut errors, "title", &input.title);
    require(&mut errors, "content", &input.content);
    require(&mut errors, "excerpt", &input.excerpt);
    require(&mut errors, "author", &input.author);
    require(&mut errors, "category", &input.category);
    if input.tags.iter().any(|tag| tag.trim().is_empty()) {
        errors.push(FieldError::new("tags", "must not contain blank entries"));
    }
    errors
}

pub fn validate_article_patch(patch: &ArticlePatch) -> Vec<FieldError> {
    let mut errors = Vec::new();
    reject_blank(&mut errors, "title", patch.title.as_deref());
    reject_blank(&mut errors, "content", patch.content.as_deref());
    reject_blank(&mut errors, "excerpt", patch.excerpt.as_deref());
    reject_blank(&mut errors, "author", patch.author.as_deref());
    reject_blank(&mut errors, "category", patch.category.as_deref());
    if let Some(ref tags) = patch.tags {
        if tags.iter().any(|tag| tag.trim().is_empty()) {
            errors.push(FieldError::new("tags", "must not contain blank entries"));
        }
    }
    errors
}

pub fn validate_new_comment(input: &NewCommentInput) -> Vec<FieldError> {
    let mut errors = Vec::new();
    require(&mut errors, "author", &input.author);
    require(&mut errors, "content", &input.content);
    if input.email.trim().is_empty() {
        errors.push(FieldError::new("email", "is required"));
    } else if !is_plausible_email(input.email.trim()) {
        errors.push(FieldError::new("email", "is not a valid email address"));
    }
    errors
}

pub fn validate_new_category(input: &NewCategoryInput) -> Vec<FieldError> {
    let mut errors = Vec::new();
    require(&mut errors, "name", &input.name);
    if let Some(ref slug) = input.slug {
        if !is_valid_slug(slug) {
            errors.push(FieldError::new(
                "slug",
                "must be lowercase letters, digits and single hyphens",
            ));
        }
    }
    errors
}

pub fn validate_category_patch(patch: &CategoryPatch) -> Vec<FieldError> {
    let mut errors = Vec::new();
    reject_blank(&mut errors, "name", patch.name.as_deref());
    if let Some(ref slug) = patch.slug {
        if !is_valid_slug(slug) {
            errors.push(FieldError::new(
                "slug",
                "must be lowercase letters, digits and single hyphens",
            ));
        }
    }
    errors
}

/// Minimal `local@domain` shape check, not an RFC parser.
fn is_plausible_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !value.contains(char::is_whitespace)
}

pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Derive a URL-safe slug from a display name.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_article_requires_core_fields() {
        let errors = validate_new_article(&NewArticleInput::default());
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"title"));
        assert!(fields.contains(&"content"));
        assert!(fields.contains(&"excerpt"));
        assert!(fields.contains(&"author"));
        assert!(fields.contains(&"category"));
    }

    #[test]
    fn valid_article_passes() {
        let input = NewArticleInput {
            title: "Council approves transit plan".to_string(),
            content: "Full report...".to_string(),
            excerpt: "The council voted 7-2.".to_string(),
            author: "Dana Reyes".to_string(),
            category: "Politics".to_string(),
            tags: vec!["transit".to_string(), "city".to_string()],
            ..Default::default()
        };
        assert!(validate_new_article(&input).is_empty());
    }

    #[test]
    fn patch_rejects_blank_provided_fields() {
        let patch = ArticlePatch {
            title: Some("   ".to_string()),
            ..Default::default()
        };
        let errors = validate_article_patch(&patch);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "title");
    }

    #[test]
    fn empty_patch_is_valid() {
        assert!(validate_article_patch(&ArticlePatch::default()).is_empty());
    }

    #[test]
    fn comment_email_shape() {
        let mut input = NewCommentInput {
            author: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            content: "Great piece.".to_string(),
        };
        assert!(validate_new_comment(&input).is_empty());

        input.email = "not-an-email".to_string();
        let errors = validate_new_comment(&input);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "email");

        input.email = "a@b".to_string();
        assert!(!validate_new_comment(&input).is_empty());
    }

    #[test]
    fn slug_rules() {
        assert!(is_valid_slug("local-news"));
        assert!(is_valid_slug("tech2"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("-lead"));
        assert!(!is_valid_slug("trail-"));
        assert!(!is_valid_slug("double--hyphen"));
        assert!(!is_valid_slug("Upper"));
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("World News"), "world-news");
        assert_eq!(slugify("  Arts & Culture  "), "arts-culture");
        assert_eq!(slugify("Tech/2025"), "tech-2025");
    }
}
