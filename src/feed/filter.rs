use serde::{Deserialize, Serialize};

use crate::storage::CategoryStore;

/// Active category filter for the feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "categoryId")]
pub enum FeedFilter {
    #[default]
    All,
    Category(i64),
}

impl FeedFilter {
    pub fn from_option(category_id: Option<i64>) -> Self {
        category_id.map_or(Self::All, Self::Category)
    }

    pub fn category_id(self) -> Option<i64> {
        match self {
            Self::All => None,
            Self::Category(id) => Some(id),
        }
    }

    /// Filter bar behavior: picking the active category again clears it,
    /// picking any other category switches to it.
    pub fn toggle(self, category_id: i64) -> Self {
        match self {
            Self::Category(active) if active == category_id => Self::All,
            _ => Self::Category(category_id),
        }
    }
}

/// One button of the category filter bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterChip {
    /// `None` for the "All" chip.
    pub category_id: Option<i64>,
    pub label: String,
    pub icon: String,
    pub active: bool,
}

/// "All" followed by one chip per category, in category insertion order.
pub fn filter_bar(categories: &CategoryStore, filter: FeedFilter) -> Vec<FilterChip> {
    let all = FilterChip {
        category_id: None,
        label: "All".to_string(),
        icon: String::new(),
        active: filter == FeedFilter::All,
    };
    std::iter::once(all)
        .chain(categories.get_all().into_iter().map(|c| FilterChip {
            category_id: Some(c.id),
            active: filter == FeedFilter::Category(c.id),
            label: c.name,
            icon: c.icon,
        }))
        .collect()
}
