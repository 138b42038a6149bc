//! In-memory entity stores for the content feed.
//!
//! [`PostStore`] and [`CategoryStore`] each exclusively own one collection.
//! Posts reference categories by id only; nothing here keeps that reference
//! valid.
mod categories;
mod ids;
mod posts;
mod types;

pub use categories::CategoryStore;
pub use ids::{Clock, IdAllocator, ManualClock, SystemClock};
pub use posts::PostStore;
pub use types::{
    Category, CategoryUpdate, Comment, NewCategory, NewComment, NewPost, Post, PostUpdate,
};
