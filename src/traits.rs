use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::board::BoardList;
use crate::error::{SourceUnavailable, TransportError};
use crate::task::{ListId, Task, TaskId};

/// The capability surface of the remote task-board service.
///
/// Calls are fallible one by one: the board is a remote, eventually-consistent service,
/// and callers are expected to handle per-call failures without aborting a whole run.
#[async_trait]
pub trait TaskBoard {
    /// Returns every list (column) of the board
    async fn lists(&self) -> Result<Vec<BoardList>, TransportError>;

    /// Returns the id of the list with this display name
    async fn find_list(&self, name: &str) -> Result<ListId, TransportError>;

    /// Returns the current tasks of a list
    async fn list_tasks(&self, list: &ListId) -> Result<Vec<Task>, TransportError>;

    /// Creates a task at the bottom of a list, and returns it with its assigned id
    async fn create_task(&mut self, list: &ListId, title: &str) -> Result<Task, TransportError>;

    /// Deletes a task. Deleting a task that no longer exists is a success (idempotent delete)
    async fn delete_task(&mut self, id: &TaskId) -> Result<(), TransportError>;

    /// Deletes every task of a list and returns how many were deleted.
    /// This is the "traditional" update primitive, that the smart update is designed
    /// to avoid calling unconditionally.
    async fn clear_list(&mut self, list: &ListId) -> Result<usize, TransportError>;
}

/// The capability surface of the calendar/template source of expected task titles.
#[async_trait]
pub trait DailyEventSource {
    /// Returns the event titles expected on `date`, grouped by calendar name.
    ///
    /// An empty mapping is a valid answer (a day with no scheduled events);
    /// a source that cannot be read must fail instead, so that callers never
    /// mistake an outage for an empty day.
    async fn events_for_date(
        &self,
        date: NaiveDate,
    ) -> Result<BTreeMap<String, Vec<String>>, SourceUnavailable>;
}
