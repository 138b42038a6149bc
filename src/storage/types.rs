use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Entities
// ============================================================================

/// A feed category (e.g. "Nature", "Tech").
///
/// `id` is assigned by [`CategoryStore`](super::CategoryStore) and never
/// changes. `name` and `icon` are display values and are not validated here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub icon: String,
}

/// A single post in the feed.
///
/// `category_id` is a weak reference: the category may have been deleted
/// after the post was created. Resolve it through the feed assembly layer,
/// never by assuming presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub category_id: i64,
    pub likes: u64,
    #[serde(default)]
    pub comments: Vec<Comment>,
    pub timestamp: DateTime<Utc>,
}

/// A comment, owned inline by the post it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub content: String,
    pub author: String,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Creation Payloads
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub category_id: i64,
}

/// Comment payload. `author` is a display string supplied by the caller;
/// the feed engine does not resolve users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub content: String,
    pub author: String,
}

// ============================================================================
// Partial Updates
// ============================================================================

/// Partial category update. `None` fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

impl CategoryUpdate {
    pub(crate) fn apply_to(self, category: &mut Category) {
        if let Some(name) = self.name {
            category.name = name;
        }
        if let Some(description) = self.description {
            category.description = description;
        }
        if let Some(icon) = self.icon {
            category.icon = icon;
        }
    }
}

/// Partial post update.
///
/// Only the editable fields are present: id, timestamp, likes and comments
/// have dedicated operations (or none at all). `image_url: Some(None)` clears
/// the image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PostUpdate {
    pub content: Option<String>,
    #[serde(deserialize_with = "double_option")]
    pub image_url: Option<Option<String>>,
    pub category_id: Option<i64>,
}

impl PostUpdate {
    pub(crate) fn apply_to(self, post: &mut Post) {
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(image_url) = self.image_url {
            post.image_url = image_url;
        }
        if let Some(category_id) = self.category_id {
            post.category_id = category_id;
        }
    }
}

/// Distinguishes an explicit `null` (clear the field) from a missing key
/// (leave it alone).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
