//! Cards on the task board

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The opaque identifier the board service assigns to a card.
///
/// Trello ids happen to sort in creation order (their leading characters are a timestamp),
/// a property the reconciler relies on when several cards share a title.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TaskId(String);

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// The identifier of a board column ("list" in Trello parlance)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListId(String);

impl ListId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
impl From<String> for ListId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
impl From<&str> for ListId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}
impl Display for ListId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.0)
    }
}

/// A card on the task board.
///
/// The `title` is the sole identity key the reconciler matches on; the `id` only exists
/// once the board service has created the card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    list_id: ListId,
}

impl Task {
    pub fn new(id: TaskId, title: String, list_id: ListId) -> Self {
        Self { id, title, list_id }
    }

    pub fn id(&self) -> &TaskId {
        &self.id
    }
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn list_id(&self) -> &ListId {
        &self.list_id
    }
}
