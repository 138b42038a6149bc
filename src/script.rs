//! JSON-lines scripts of feed operations, replayed against a [`FeedState`].
//!
//! One operation per line, tagged by `op`:
//!
//! ```text
//! {"op": "createCategory", "name": "Roads", "icon": "🚧"}
//! {"op": "createPost", "content": "Pothole on 5th", "categoryId": 1}
//! {"op": "like", "id": 1}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Ids in a script refer
//! to ids as allocated by the stores; a missing id is reported in the outcome
//! and does not stop the replay.
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::modal::ModalToken;
use crate::state::FeedState;
use crate::storage::{CategoryUpdate, NewCategory, NewComment, NewPost, PostUpdate};

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid operation on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

// ============================================================================
// Operations
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Operation {
    CreateCategory(NewCategory),
    UpdateCategory {
        id: i64,
        #[serde(flatten)]
        changes: CategoryUpdate,
    },
    DeleteCategory {
        id: i64,
    },
    CreatePost(NewPost),
    UpdatePost {
        id: i64,
        #[serde(flatten)]
        changes: PostUpdate,
    },
    DeletePost {
        id: i64,
    },
    Like {
        id: i64,
    },
    Comment {
        #[serde(rename = "postId")]
        post_id: i64,
        #[serde(flatten)]
        comment: NewComment,
    },
    SelectCategory {
        id: i64,
    },
    OpenModal {
        token: ModalToken,
    },
    CloseModal {
        token: ModalToken,
    },
    CloseAllModals,
}

/// What an operation did, for logging and reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created { id: i64 },
    Updated { id: i64 },
    Deleted { id: i64 },
    NotFound { id: i64 },
    FilterChanged,
    ModalsChanged { blocking: bool },
}

/// Apply one operation. Never fails: missing ids become `Outcome::NotFound`.
pub fn apply(state: &mut FeedState, op: Operation) -> Outcome {
    let updated = |id, found: bool| {
        if found {
            Outcome::Updated { id }
        } else {
            Outcome::NotFound { id }
        }
    };
    let deleted = |id, found: bool| {
        if found {
            Outcome::Deleted { id }
        } else {
            Outcome::NotFound { id }
        }
    };

    match op {
        Operation::CreateCategory(data) => Outcome::Created {
            id: state.categories.create(data).id,
        },
        Operation::UpdateCategory { id, changes } => {
            updated(id, state.categories.update(id, changes).is_some())
        }
        Operation::DeleteCategory { id } => deleted(id, state.categories.delete(id)),
        Operation::CreatePost(data) => Outcome::Created {
            id: state.posts.create(data).id,
        },
        Operation::UpdatePost { id, changes } => updated(id, state.posts.update(id, changes).is_some()),
        Operation::DeletePost { id } => deleted(id, state.posts.delete(id)),
        Operation::Like { id } => updated(id, state.posts.like(id).is_some()),
        Operation::Comment { post_id, comment } => match state.posts.add_comment(post_id, comment) {
            Some(created) => Outcome::Created { id: created.id },
            None => Outcome::NotFound { id: post_id },
        },
        Operation::SelectCategory { id } => {
            state.select_category(id);
            Outcome::FilterChanged
        }
        Operation::OpenModal { token } => {
            state.modals.open(token);
            Outcome::ModalsChanged { blocking: true }
        }
        Operation::CloseModal { token } => {
            state.modals.close(token);
            Outcome::ModalsChanged {
                blocking: state.modals.is_blocking(),
            }
        }
        Operation::CloseAllModals => {
            state.modals.close_all();
            Outcome::ModalsChanged { blocking: false }
        }
    }
}

// ============================================================================
// Parsing & Replay
// ============================================================================

pub fn parse_script(text: &str) -> Result<Vec<Operation>, ScriptError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|source| ScriptError::Parse {
                line: idx + 1,
                source,
            })
        })
        .collect()
}

pub fn load_script(path: &Path) -> Result<Vec<Operation>, ScriptError> {
    let text = std::fs::read_to_string(path)?;
    parse_script(&text)
}

/// Apply every operation in order, returning each outcome.
pub fn replay(state: &mut FeedState, ops: Vec<Operation>) -> Vec<Outcome> {
    ops.into_iter()
        .map(|op| {
            let outcome = apply(state, op);
            if let Outcome::NotFound { id } = outcome {
                tracing::warn!(id, "Script operation referenced a missing entity");
            }
            outcome
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{CategoryLabel, FeedFilter};

    #[test]
    fn test_parse_skips_blank_and_comment_lines() {
        let ops = parse_script(
            r#"
# setup
{"op": "createCategory", "name": "Roads", "icon": "R"}

{"op": "closeAllModals"}
"#,
        )
        .unwrap();
        assert_eq!(
            ops,
            vec![
                Operation::CreateCategory(NewCategory {
                    name: "Roads".to_string(),
                    description: String::new(),
                    icon: "R".to_string(),
                }),
                Operation::CloseAllModals,
            ]
        );
    }

    #[test]
    fn test_parse_flattened_updates() {
        let ops = parse_script(
            r#"{"op": "updatePost", "id": 5, "imageUrl": null}
{"op": "updateCategory", "id": 2, "name": "Parks"}
{"op": "comment", "postId": 5, "content": "Seen it too", "author": "Ana"}"#,
        )
        .unwrap();

        assert_eq!(
            ops[0],
            Operation::UpdatePost {
                id: 5,
                changes: PostUpdate {
                    image_url: Some(None),
                    ..Default::default()
                },
            }
        );
        assert_eq!(
            ops[1],
            Operation::UpdateCategory {
                id: 2,
                changes: CategoryUpdate {
                    name: Some("Parks".to_string()),
                    ..Default::default()
                },
            }
        );
        assert_eq!(
            ops[2],
            Operation::Comment {
                post_id: 5,
                comment: NewComment {
                    content: "Seen it too".to_string(),
                    author: "Ana".to_string(),
                },
            }
        );
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = parse_script("{\"op\": \"like\", \"id\": 1}\n{\"op\": \"explode\"}\n").unwrap_err();
        match err {
            ScriptError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_replay_builds_feed() {
        let mut state = FeedState::new();
        let outcomes = replay(
            &mut state,
            vec![Operation::CreateCategory(NewCategory {
                name: "Roads".to_string(),
                description: String::new(),
                icon: "R".to_string(),
            })],
        );
        let Outcome::Created { id: category_id } = outcomes[0] else {
            panic!("expected created category");
        };

        let outcomes = replay(
            &mut state,
            vec![
                Operation::CreatePost(NewPost {
                    content: "Pothole".to_string(),
                    image_url: None,
                    category_id,
                }),
                Operation::Like { id: 999 },
                Operation::SelectCategory { id: category_id },
                Operation::OpenModal {
                    token: ModalToken::CREATE_POST,
                },
            ],
        );

        assert!(matches!(outcomes[0], Outcome::Created { .. }));
        assert_eq!(outcomes[1], Outcome::NotFound { id: 999 });
        assert_eq!(state.filter, FeedFilter::Category(category_id));
        assert!(state.modals.is_blocking());

        let feed = state.feed();
        assert_eq!(feed.len(), 1);
        assert!(matches!(feed[0].category, CategoryLabel::Known { .. }));
    }

    #[test]
    fn test_close_modal_reports_blocking() {
        let mut state = FeedState::new();
        apply(&mut state, Operation::OpenModal { token: "a".into() });
        apply(&mut state, Operation::OpenModal { token: "b".into() });
        assert_eq!(
            apply(&mut state, Operation::CloseModal { token: "a".into() }),
            Outcome::ModalsChanged { blocking: true }
        );
        assert_eq!(
            apply(&mut state, Operation::CloseModal { token: "b".into() }),
            Outcome::ModalsChanged { blocking: false }
        );
    }
}
