//! Session state container and its thread-safe handle.
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::feed::{FeedAssembler, FeedFilter, FeedItem};
use crate::modal::ModalCoordinator;
use crate::storage::{
    Category, CategoryStore, Clock, Comment, NewCategory, NewComment, NewPost, Post, PostStore,
    SystemClock,
};

// ============================================================================
// FeedState
// ============================================================================

/// Everything one UI session owns: both stores, the modal coordinator and the
/// active filter. Passed around explicitly; there is no global instance.
#[derive(Debug, Clone)]
pub struct FeedState {
    pub posts: PostStore,
    pub categories: CategoryStore,
    pub modals: ModalCoordinator,
    pub filter: FeedFilter,
    pub assembler: FeedAssembler,
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedState {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Empty state whose stores share `clock`.
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            posts: PostStore::with_clock(clock.clone()),
            categories: CategoryStore::with_clock(clock),
            modals: ModalCoordinator::new(),
            filter: FeedFilter::All,
            assembler: FeedAssembler::default(),
        }
    }

    /// Feed for the active filter.
    pub fn feed(&self) -> Vec<FeedItem> {
        self.assembler
            .assemble(&self.posts, &self.categories, self.filter)
    }

    /// Apply a filter bar click (see [`FeedFilter::toggle`]).
    pub fn select_category(&mut self, category_id: i64) -> FeedFilter {
        self.filter = self.filter.toggle(category_id);
        tracing::debug!(filter = ?self.filter, "Feed filter changed");
        self.filter
    }

    pub fn clear_filter(&mut self) {
        self.filter = FeedFilter::All;
    }
}

// ============================================================================
// SharedFeed
// ============================================================================

/// Cloneable handle for multi-threaded hosts.
///
/// All state sits behind a single `RwLock`: each mutation is one write
/// critical section and each feed read holds the read guard for the whole
/// join, so readers never see a half-applied change.
#[derive(Debug, Clone, Default)]
pub struct SharedFeed {
    inner: Arc<RwLock<FeedState>>,
}

impl SharedFeed {
    pub fn new(state: FeedState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    /// Run `f` against a consistent snapshot of the state.
    pub async fn read<R>(&self, f: impl FnOnce(&FeedState) -> R) -> R {
        let guard = self.inner.read().await;
        f(&guard)
    }

    /// Run `f` as a single atomic mutation.
    pub async fn write<R>(&self, f: impl FnOnce(&mut FeedState) -> R) -> R {
        let mut guard = self.inner.write().await;
        f(&mut guard)
    }

    pub async fn feed(&self) -> Vec<FeedItem> {
        self.read(FeedState::feed).await
    }

    pub async fn feed_for(&self, filter: FeedFilter) -> Vec<FeedItem> {
        self.read(|state| {
            state
                .assembler
                .assemble(&state.posts, &state.categories, filter)
        })
        .await
    }

    pub async fn categories(&self) -> Vec<Category> {
        self.read(|state| state.categories.get_all()).await
    }

    pub async fn create_category(&self, data: NewCategory) -> Category {
        self.write(|state| state.categories.create(data)).await
    }

    pub async fn delete_category(&self, id: i64) -> bool {
        self.write(|state| state.categories.delete(id)).await
    }

    pub async fn create_post(&self, data: NewPost) -> Post {
        self.write(|state| state.posts.create(data)).await
    }

    pub async fn delete_post(&self, id: i64) -> bool {
        self.write(|state| state.posts.delete(id)).await
    }

    pub async fn like(&self, id: i64) -> Option<Post> {
        self.write(|state| state.posts.like(id)).await
    }

    pub async fn add_comment(&self, post_id: i64, data: NewComment) -> Option<Comment> {
        self.write(|state| state.posts.add_comment(post_id, data))
            .await
    }

    /// Consume the handle and return the state if no other clones remain.
    pub fn try_into_inner(self) -> Result<FeedState, Self> {
        Arc::try_unwrap(self.inner)
            .map(RwLock::into_inner)
            .map_err(|inner| Self { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::CategoryLabel;

    fn nature() -> NewCategory {
        NewCategory {
            name: "Nature".to_string(),
            description: "Photos of nature and outdoors".to_string(),
            icon: "🌿".to_string(),
        }
    }

    #[test]
    fn test_select_category_toggles() {
        let mut state = FeedState::new();
        assert_eq!(state.select_category(3), FeedFilter::Category(3));
        assert_eq!(state.select_category(3), FeedFilter::All);
    }

    #[test]
    fn test_feed_uses_active_filter() {
        let mut state = FeedState::new();
        let cat = state.categories.create(nature());
        state.posts.create(NewPost {
            content: "in category".to_string(),
            image_url: None,
            category_id: cat.id,
        });
        state.posts.create(NewPost {
            content: "elsewhere".to_string(),
            image_url: None,
            category_id: cat.id + 1,
        });

        state.select_category(cat.id);
        let feed = state.feed();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].post.content, "in category");

        state.clear_filter();
        assert_eq!(state.feed().len(), 2);
    }

    #[tokio::test]
    async fn test_shared_feed_round_trip() {
        let shared = SharedFeed::default();
        let cat = shared.create_category(nature()).await;
        let post = shared
            .create_post(NewPost {
                content: "sunset".to_string(),
                image_url: None,
                category_id: cat.id,
            })
            .await;

        assert_eq!(shared.like(post.id).await.map(|p| p.likes), Some(1));
        assert!(shared.delete_category(cat.id).await);

        let feed = shared.feed().await;
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].category, CategoryLabel::Unknown { id: cat.id });
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_likes_are_not_lost() {
        let shared = SharedFeed::default();
        let post = shared
            .create_post(NewPost {
                content: "popular".to_string(),
                image_url: None,
                category_id: 1,
            })
            .await;

        let post_id = post.id;
        let mut handles = Vec::new();
        for _ in 0..50 {
            let handle = shared.clone();
            handles.push(tokio::spawn(async move {
                handle.like(post_id).await;
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let likes = shared
            .read(|state| state.posts.get_by_id(post.id).map(|p| p.likes))
            .await;
        assert_eq!(likes, Some(50));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_readers_see_complete_snapshots() {
        let shared = SharedFeed::default();

        let writer = {
            let shared = shared.clone();
            tokio::spawn(async move {
                for i in 0..100 {
                    shared
                        .write(|state| {
                            // Two posts per critical section
                            for _ in 0..2 {
                                state.posts.create(NewPost {
                                    content: format!("batch {}", i),
                                    image_url: None,
                                    category_id: 1,
                                });
                            }
                        })
                        .await;
                }
            })
        };

        for _ in 0..100 {
            let len = shared.feed().await.len();
            assert_eq!(len % 2, 0, "observed a torn batch of {} posts", len);
            tokio::task::yield_now().await;
        }
        writer.await.unwrap();
        assert_eq!(shared.feed().await.len(), 200);
    }

    #[tokio::test]
    async fn test_try_into_inner() {
        let shared = SharedFeed::default();
        let extra = shared.clone();
        let shared = shared.try_into_inner().unwrap_err();
        drop(extra);
        assert!(shared.try_into_inner().is_ok());
    }
}
