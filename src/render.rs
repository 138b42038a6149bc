//! Plain-text rendering of the assembled feed for the command line.
use std::fmt::Write as _;

use crate::feed::{FeedItem, FilterChip};
use crate::util::{strip_control_chars, truncate_to_width};

pub const EMPTY_FEED_MESSAGE: &str = "No posts yet. Create your first post!";

/// One block per post: header line, content preview, comment previews.
pub fn render_feed(items: &[FeedItem], width: usize) -> String {
    if items.is_empty() {
        return format!("{}\n", EMPTY_FEED_MESSAGE);
    }

    let mut out = String::new();
    for item in items {
        let icon = item.category.icon();
        let label = if icon.is_empty() {
            item.category.display_name().to_string()
        } else {
            format!("{} {}", icon, item.category.display_name())
        };
        let _ = writeln!(
            out,
            "#{} [{}] {}  likes: {}  comments: {}",
            item.post.id,
            label,
            item.post.timestamp.format("%Y-%m-%d"),
            item.post.likes,
            item.comment_count
        );

        let content = strip_control_chars(&item.post.content);
        let _ = writeln!(out, "    {}", truncate_to_width(&content, width));
        if let Some(url) = &item.post.image_url {
            let _ = writeln!(out, "    image: {}", url);
        }
        for comment in &item.comment_preview {
            let line = format!("{}: {}", comment.author, comment.content);
            let line = strip_control_chars(&line);
            let _ = writeln!(out, "      > {}", truncate_to_width(&line, width));
        }
        out.push('\n');
    }
    out
}

/// Filter bar as a single line, active chip in brackets.
pub fn render_filter_bar(chips: &[FilterChip]) -> String {
    chips
        .iter()
        .map(|chip| {
            let label = if chip.icon.is_empty() {
                chip.label.clone()
            } else {
                format!("{} {}", chip.icon, chip.label)
            };
            if chip.active {
                format!("[{}]", label)
            } else {
                label
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{assemble, filter_bar, FeedFilter};
    use crate::seed::sample_state;
    use crate::storage::SystemClock;
    use std::sync::Arc;

    #[test]
    fn test_empty_feed_message() {
        assert_eq!(render_feed(&[], 40), format!("{}\n", EMPTY_FEED_MESSAGE));
    }

    #[test]
    fn test_render_sample_feed() {
        let state = sample_state(Arc::new(SystemClock));
        let text = render_feed(&state.feed(), 60);

        assert!(text.contains("#1 [🌿 Nature]"));
        assert!(text.contains("likes: 42  comments: 2"));
        assert!(text.contains("> John: Amazing shot!"));
        assert!(text.contains("Coffee and code"));
    }

    #[test]
    fn test_render_truncates_content() {
        let mut state = sample_state(Arc::new(SystemClock));
        state.posts.update(
            1,
            crate::storage::PostUpdate {
                content: Some("A very long description of a broken traffic signal".to_string()),
                ..Default::default()
            },
        );
        let items = assemble(&state.posts, &state.categories, FeedFilter::Category(1));
        let text = render_feed(&items, 20);
        assert!(text.contains("    A very long descr..."));
    }

    #[test]
    fn test_render_unknown_category() {
        let mut state = sample_state(Arc::new(SystemClock));
        state.categories.delete(2);
        let items = assemble(&state.posts, &state.categories, FeedFilter::Category(2));
        assert!(render_feed(&items, 40).contains("[Unknown category]"));
    }

    #[test]
    fn test_render_filter_bar() {
        let state = sample_state(Arc::new(SystemClock));
        let line = render_filter_bar(&filter_bar(&state.categories, FeedFilter::Category(2)));
        assert!(line.starts_with("All  🌿 Nature  [💻 Tech]"));
    }
}
