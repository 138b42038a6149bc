//! Caller-side checks for the post creation dialog.
//!
//! The stores accept anything; this is the policy the dialog applies before
//! submitting: some text and a selected category are required.
use thiserror::Error;

use crate::storage::NewPost;
use crate::util::strip_control_chars;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Post content cannot be empty or whitespace-only")]
    EmptyContent,

    #[error("A category must be selected")]
    MissingCategory,
}

/// Raw dialog input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub content: String,
    pub image_url: String,
    pub category_id: Option<i64>,
}

impl PostDraft {
    /// Whether the submit button would be enabled.
    pub fn is_submittable(&self) -> bool {
        self.clone().into_new_post().is_ok()
    }

    /// Clean the draft and turn it into a creation payload.
    ///
    /// Content is stripped of control characters and trimmed. A blank image
    /// URL becomes `None`.
    pub fn into_new_post(self) -> Result<NewPost, DraftError> {
        let content = strip_control_chars(&self.content).trim().to_owned();
        if content.is_empty() {
            return Err(DraftError::EmptyContent);
        }
        let category_id = self.category_id.ok_or(DraftError::MissingCategory)?;

        let image_url = strip_control_chars(&self.image_url).trim().to_owned();
        let image_url = (!image_url.is_empty()).then_some(image_url);

        Ok(NewPost {
            content,
            image_url,
            category_id,
        })
    }
}
