//! Tracks which overlays are open and whether the page underneath is blocked.
//!
//! The open set has set semantics (opening an open token changes nothing) and
//! remembers open order so the most recent overlay can be dismissed first,
//! the way Escape closes the dialog on top.
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

// ============================================================================
// ModalToken
// ============================================================================

/// Opaque name of one overlay.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModalToken(Cow<'static, str>);

impl ModalToken {
    /// The post creation dialog.
    pub const CREATE_POST: ModalToken = ModalToken(Cow::Borrowed("create-post"));

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ModalToken {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ModalToken {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for ModalToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// ModalCoordinator
// ============================================================================

/// Set of open overlays. Blocking is true exactly while the set is non-empty.
#[derive(Debug, Clone, Default)]
pub struct ModalCoordinator {
    /// Open tokens, oldest first. Never contains duplicates.
    open: Vec<ModalToken>,
}

impl ModalCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `token` open. Opening an already-open token is a no-op and keeps
    /// its original stacking position.
    pub fn open(&mut self, token: impl Into<ModalToken>) {
        let token = token.into();
        if self.open.contains(&token) {
            return;
        }
        let was_blocking = self.is_blocking();
        tracing::debug!(modal = %token, "Opened modal");
        self.open.push(token);
        if !was_blocking {
            tracing::debug!("Page blocked by modal");
        }
    }

    /// Mark `token` closed. Returns whether it was open.
    pub fn close(&mut self, token: impl Into<ModalToken>) -> bool {
        let token = token.into();
        let Some(pos) = self.open.iter().position(|t| *t == token) else {
            return false;
        };
        self.open.remove(pos);
        tracing::debug!(modal = %token, "Closed modal");
        if self.open.is_empty() {
            tracing::debug!("Page unblocked");
        }
        true
    }

    pub fn is_open(&self, token: impl Into<ModalToken>) -> bool {
        self.open.contains(&token.into())
    }

    pub fn close_all(&mut self) {
        if !self.open.is_empty() {
            tracing::debug!(count = self.open.len(), "Closed all modals");
        }
        self.open.clear();
    }

    pub fn is_blocking(&self) -> bool {
        !self.open.is_empty()
    }

    /// Most recently opened token that is still open.
    pub fn topmost(&self) -> Option<&ModalToken> {
        self.open.last()
    }

    /// Close the topmost overlay, returning its token.
    pub fn dismiss_topmost(&mut self) -> Option<ModalToken> {
        let token = self.open.pop()?;
        tracing::debug!(modal = %token, "Dismissed topmost modal");
        if self.open.is_empty() {
            tracing::debug!("Page unblocked");
        }
        Some(token)
    }

    /// Open tokens, oldest first.
    pub fn open_tokens(&self) -> &[ModalToken] {
        &self.open
    }
}
