//! Task-board backends: the Trello REST adapter and an in-memory board

pub mod memory_board;
pub mod remote_board;

pub use memory_board::MemoryBoard;
pub use remote_board::RemoteBoard;

use serde::{Deserialize, Serialize};

use crate::task::ListId;

/// A board column, as listed by [`TaskBoard::lists`](crate::traits::TaskBoard::lists)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardList {
    pub id: ListId,
    pub name: String,
}
