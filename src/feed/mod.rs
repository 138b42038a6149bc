//! Feed assembly: the render-ready view over the post and category stores.
//!
//! The feed is recomputed from both stores on every request, so it always
//! reflects the latest mutations and never caches a stale join.
mod assembly;
mod filter;

pub use assembly::{
    assemble, CategoryLabel, FeedAssembler, FeedItem, COMMENT_PREVIEW_LIMIT,
    UNKNOWN_CATEGORY_NAME,
};
pub use filter::{filter_bar, FeedFilter, FilterChip};
