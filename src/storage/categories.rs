use std::sync::Arc;

use super::ids::{Clock, IdAllocator, SystemClock};
use super::types::{Category, CategoryUpdate, NewCategory};

// ============================================================================
// CategoryStore
// ============================================================================

/// Owner of the category set, kept in insertion order.
///
/// No policy is enforced here: empty or duplicate names are accepted. Callers
/// that want such rules apply them before calling in.
#[derive(Debug, Clone)]
pub struct CategoryStore {
    categories: Vec<Category>,
    ids: IdAllocator,
    clock: Arc<dyn Clock>,
}

impl Default for CategoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            categories: Vec::new(),
            ids: IdAllocator::new(),
            clock,
        }
    }

    // ========================================================================
    // Category Operations
    // ========================================================================

    /// Create a category with a freshly allocated id and append it.
    pub fn create(&mut self, data: NewCategory) -> Category {
        let category = Category {
            id: self.ids.next(self.clock.now()),
            name: data.name,
            description: data.description,
            icon: data.icon,
        };
        tracing::debug!(category_id = category.id, name = %category.name, "Created category");
        self.categories.push(category.clone());
        category
    }

    /// Append a category that already has an id (sample data, restores).
    ///
    /// A record whose id is already present replaces the existing one in place.
    pub fn insert_existing(&mut self, category: Category) {
        self.ids.observe(category.id);
        match self.categories.iter_mut().find(|c| c.id == category.id) {
            Some(slot) => *slot = category,
            None => self.categories.push(category),
        }
    }

    /// All categories in insertion order.
    pub fn get_all(&self) -> Vec<Category> {
        self.categories.clone()
    }

    pub fn get_by_id(&self, id: i64) -> Option<Category> {
        self.find(id).cloned()
    }

    /// Borrowing lookup for read paths that don't need an owned copy.
    pub fn find(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Merge the provided fields into the category. `None` if it doesn't exist.
    pub fn update(&mut self, id: i64, changes: CategoryUpdate) -> Option<Category> {
        let Some(category) = self.categories.iter_mut().find(|c| c.id == id) else {
            tracing::trace!(category_id = id, "update on missing category");
            return None;
        };
        changes.apply_to(category);
        tracing::debug!(category_id = id, "Updated category");
        Some(category.clone())
    }

    /// Remove the category if present. Returns whether anything was removed.
    ///
    /// Posts referencing the category are left untouched.
    pub fn delete(&mut self, id: i64) -> bool {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        let removed = self.categories.len() != before;
        if removed {
            tracing::debug!(category_id = id, "Deleted category");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
