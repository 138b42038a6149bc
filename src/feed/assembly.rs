use serde::Serialize;

use super::filter::FeedFilter;
use crate::storage::{Category, CategoryStore, Comment, Post, PostStore};

/// Number of comments shown under a post card.
pub const COMMENT_PREVIEW_LIMIT: usize = 2;

/// Placeholder name for a post whose category no longer exists.
pub const UNKNOWN_CATEGORY_NAME: &str = "Unknown category";

// ============================================================================
// Feed Items
// ============================================================================

/// Category shown on a post card. A dangling reference becomes `Unknown`
/// rather than failing the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status")]
pub enum CategoryLabel {
    Known { id: i64, name: String, icon: String },
    Unknown { id: i64 },
}

impl CategoryLabel {
    fn resolve(category_id: i64, categories: &CategoryStore) -> Self {
        match categories.find(category_id) {
            Some(Category { id, name, icon, .. }) => Self::Known {
                id: *id,
                name: name.clone(),
                icon: icon.clone(),
            },
            None => Self::Unknown { id: category_id },
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Self::Known { id, .. } | Self::Unknown { id } => *id,
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Self::Known { name, .. } => name,
            Self::Unknown { .. } => UNKNOWN_CATEGORY_NAME,
        }
    }

    pub fn icon(&self) -> &str {
        match self {
            Self::Known { icon, .. } => icon,
            Self::Unknown { .. } => "",
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Self::Known { .. })
    }
}

/// A post joined with its category, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    pub post: Post,
    pub category: CategoryLabel,
    pub comment_count: usize,
    /// First comments of the thread, oldest first.
    pub comment_preview: Vec<Comment>,
}

// ============================================================================
// Assembly
// ============================================================================

/// Joins posts with categories for a given filter.
#[derive(Debug, Clone, Copy)]
pub struct FeedAssembler {
    comment_preview_limit: usize,
}

impl Default for FeedAssembler {
    fn default() -> Self {
        Self {
            comment_preview_limit: COMMENT_PREVIEW_LIMIT,
        }
    }
}

impl FeedAssembler {
    pub fn new(comment_preview_limit: usize) -> Self {
        Self {
            comment_preview_limit,
        }
    }

    /// Build the feed for `filter` from the current store contents.
    ///
    /// Read-only: neither store is modified, so calling this any number of
    /// times between mutations yields the same result.
    pub fn assemble(
        &self,
        posts: &PostStore,
        categories: &CategoryStore,
        filter: FeedFilter,
    ) -> Vec<FeedItem> {
        let selected = match filter {
            FeedFilter::All => posts.get_feed(),
            FeedFilter::Category(id) => posts.get_posts_by_category(id),
        };

        selected
            .into_iter()
            .map(|post| {
                let category = CategoryLabel::resolve(post.category_id, categories);
                if !category.is_known() {
                    tracing::trace!(
                        post_id = post.id,
                        category_id = post.category_id,
                        "Post references missing category"
                    );
                }
                let comment_preview = post
                    .comments
                    .iter()
                    .take(self.comment_preview_limit)
                    .cloned()
                    .collect();
                FeedItem {
                    comment_count: post.comments.len(),
                    comment_preview,
                    category,
                    post,
                }
            })
            .collect()
    }
}

/// [`FeedAssembler::assemble`] with the default comment preview size.
pub fn assemble(posts: &PostStore, categories: &CategoryStore, filter: FeedFilter) -> Vec<FeedItem> {
    FeedAssembler::default().assemble(posts, categories, filter)
}
