use std::sync::Arc;

use super::ids::{Clock, IdAllocator, SystemClock};
use super::types::{Comment, NewComment, NewPost, Post, PostUpdate};

// ============================================================================
// PostStore
// ============================================================================

/// Owner of the post set and, through each post, of its comments.
///
/// New posts are prepended, so the stored order is most-recent-insert first.
/// Every query returns owned snapshots; nothing handed out aliases the store.
#[derive(Debug, Clone)]
pub struct PostStore {
    posts: Vec<Post>,
    post_ids: IdAllocator,
    comment_ids: IdAllocator,
    clock: Arc<dyn Clock>,
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PostStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            posts: Vec::new(),
            post_ids: IdAllocator::new(),
            comment_ids: IdAllocator::new(),
            clock,
        }
    }

    // ========================================================================
    // Post Operations
    // ========================================================================

    /// Create a post with zero likes and no comments, prepended to the store.
    ///
    /// `category_id` is not checked against any category set.
    pub fn create(&mut self, data: NewPost) -> Post {
        let now = self.clock.now();
        let post = Post {
            id: self.post_ids.next(now),
            content: data.content,
            image_url: data.image_url,
            category_id: data.category_id,
            likes: 0,
            comments: Vec::new(),
            timestamp: now,
        };
        tracing::debug!(
            post_id = post.id,
            category_id = post.category_id,
            "Created post"
        );
        self.posts.insert(0, post.clone());
        post
    }

    /// Append a post that already has ids and a timestamp (sample data,
    /// restores). Its comment ids are reserved as well.
    pub fn insert_existing(&mut self, post: Post) {
        self.post_ids.observe(post.id);
        for comment in &post.comments {
            self.comment_ids.observe(comment.id);
        }
        match self.posts.iter_mut().find(|p| p.id == post.id) {
            Some(slot) => *slot = post,
            None => self.posts.push(post),
        }
    }

    pub fn get_by_id(&self, id: i64) -> Option<Post> {
        self.find(id).cloned()
    }

    pub fn find(&self, id: i64) -> Option<&Post> {
        self.posts.iter().find(|p| p.id == id)
    }

    fn find_mut(&mut self, id: i64) -> Option<&mut Post> {
        self.posts.iter_mut().find(|p| p.id == id)
    }

    /// Shallow-merge editable fields. `None` if the post doesn't exist.
    pub fn update(&mut self, id: i64, changes: PostUpdate) -> Option<Post> {
        let Some(post) = self.find_mut(id) else {
            tracing::trace!(post_id = id, "update on missing post");
            return None;
        };
        changes.apply_to(post);
        tracing::debug!(post_id = id, "Updated post");
        Some(post.clone())
    }

    /// Remove the post (and its comments) if present.
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.posts.len();
        self.posts.retain(|p| p.id != id);
        let removed = self.posts.len() != before;
        if removed {
            tracing::debug!(post_id = id, "Deleted post");
        }
        removed
    }

    // ========================================================================
    // Feed Queries
    // ========================================================================

    /// All posts, newest timestamp first.
    ///
    /// The sort is stable: posts sharing a timestamp keep their stored
    /// relative order, so output is deterministic for bulk inserts within one
    /// clock tick. The stored collection itself is not reordered.
    pub fn get_feed(&self) -> Vec<Post> {
        sort_newest_first(self.posts.clone())
    }

    /// Posts with exactly this category id, in feed order. The id is not
    /// checked against the category set.
    pub fn get_posts_by_category(&self, category_id: i64) -> Vec<Post> {
        let matching = self
            .posts
            .iter()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect();
        sort_newest_first(matching)
    }

    // ========================================================================
    // Engagement
    // ========================================================================

    /// Add one like. Not idempotent: every call counts.
    pub fn like(&mut self, id: i64) -> Option<Post> {
        let Some(post) = self.find_mut(id) else {
            tracing::trace!(post_id = id, "like on missing post");
            return None;
        };
        post.likes = post.likes.saturating_add(1);
        tracing::debug!(post_id = id, likes = post.likes, "Liked post");
        Some(post.clone())
    }

    /// Append a comment to the post's thread. `None` if the post doesn't exist.
    pub fn add_comment(&mut self, post_id: i64, data: NewComment) -> Option<Comment> {
        let now = self.clock.now();
        if self.find(post_id).is_none() {
            tracing::trace!(post_id, "comment on missing post");
            return None;
        }
        let comment = Comment {
            id: self.comment_ids.next(now),
            post_id,
            content: data.content,
            author: data.author,
            timestamp: now,
        };
        let post = self.find_mut(post_id)?;
        post.comments.push(comment.clone());
        tracing::debug!(post_id, comment_id = comment.id, "Added comment");
        Some(comment)
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

fn sort_newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    // slice::sort_by is stable
    posts.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    posts
}
