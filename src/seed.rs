//! Sample categories and posts the front end ships with.
use std::sync::Arc;

use crate::state::FeedState;
use crate::storage::{Category, Clock, Comment, Post};

const PLACEHOLDER_IMAGE: &str = "/api/placeholder/400/400";

/// (id, name, description, icon)
const SAMPLE_CATEGORIES: [(i64, &str, &str, &str); 4] = [
    (1, "Nature", "Photos of nature and outdoors", "🌿"),
    (2, "Tech", "Technology and programming", "💻"),
    (3, "Food", "Delicious food and recipes", "🍕"),
    (4, "Travel", "Travel experiences and places", "✈️"),
];

pub fn sample_categories() -> Vec<Category> {
    SAMPLE_CATEGORIES
        .iter()
        .map(|&(id, name, description, icon)| Category {
            id,
            name: name.to_string(),
            description: description.to_string(),
            icon: icon.to_string(),
        })
        .collect()
}

/// Sample posts, all stamped with `clock.now()`.
pub fn sample_posts(clock: &dyn Clock) -> Vec<Post> {
    let now = clock.now();
    let comment = |id: i64, content: &str, author: &str| Comment {
        id,
        post_id: 1,
        content: content.to_string(),
        author: author.to_string(),
        timestamp: now,
    };

    vec![
        Post {
            id: 1,
            content: "Beautiful sunset at the beach!".to_string(),
            image_url: Some(PLACEHOLDER_IMAGE.to_string()),
            category_id: 1,
            likes: 42,
            comments: vec![
                comment(1, "Amazing shot!", "John"),
                comment(2, "Love this!", "Sarah"),
            ],
            timestamp: now,
        },
        Post {
            id: 2,
            content: "Coffee and code 💻☕".to_string(),
            image_url: Some(PLACEHOLDER_IMAGE.to_string()),
            category_id: 2,
            likes: 18,
            comments: Vec::new(),
            timestamp: now,
        },
    ]
}

/// A session state pre-loaded with the sample data.
pub fn sample_state(clock: Arc<dyn Clock>) -> FeedState {
    let mut state = FeedState::with_clock(clock.clone());
    for category in sample_categories() {
        state.categories.insert_existing(category);
    }
    for post in sample_posts(clock.as_ref()) {
        state.posts.insert_existing(post);
    }
    tracing::debug!(
        categories = state.categories.len(),
        posts = state.posts.len(),
        "Loaded sample data"
    );
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FeedFilter;
    use crate::storage::{ManualClock, NewPost};
    use chrono::DateTime;

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            DateTime::from_timestamp_millis(1_700_000_000_000).unwrap(),
        ))
    }

    #[test]
    fn test_sample_state_contents() {
        let state = sample_state(clock());
        let names: Vec<_> = state
            .categories
            .get_all()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Nature", "Tech", "Food", "Travel"]);

        let feed = state.feed();
        let ids: Vec<_> = feed.iter().map(|i| i.post.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(feed[0].post.likes, 42);
        assert_eq!(feed[0].comment_count, 2);
        assert_eq!(feed[0].category.display_name(), "Nature");
    }

    #[test]
    fn test_new_posts_do_not_collide_with_samples() {
        let mut state = sample_state(clock());
        let created = state.posts.create(NewPost {
            content: "new".to_string(),
            image_url: None,
            category_id: 3,
        });
        assert!(created.id > 2);
        assert_eq!(state.posts.len(), 3);
        assert!(state.feed().iter().any(|i| i.post.id == created.id));
        assert_eq!(
            state
                .posts
                .get_posts_by_category(3)
                .into_iter()
                .map(|p| p.id)
                .collect::<Vec<_>>(),
            vec![created.id]
        );
        assert_eq!(state.filter, FeedFilter::All);
    }
}
