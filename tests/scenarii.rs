//! Helpers shared by the integration tests: canned event sources and pre-populated
//! in-memory boards that mock the remote Trello board.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;

use pantry_board::error::SourceUnavailable;
use pantry_board::traits::DailyEventSource;
use pantry_board::{ListId, MemoryBoard, Task};

pub const TODO_LIST: &str = "DA FARE";
pub const DONE_LIST: &str = "ESEGUITO";

/// An event source that always answers with the same titles, whatever the date
pub struct StaticSource {
    events: BTreeMap<String, Vec<String>>,
}

impl StaticSource {
    pub fn new(titles_by_calendar: &[(&str, &[&str])]) -> Self {
        let events = titles_by_calendar
            .iter()
            .map(|(calendar, titles)| {
                (
                    calendar.to_string(),
                    titles.iter().map(|t| t.to_string()).collect(),
                )
            })
            .collect();
        Self { events }
    }

    /// A source with every title under a single calendar
    pub fn single_calendar(titles: &[&str]) -> Self {
        Self::new(&[("GIORNALIERO", titles)])
    }
}

#[async_trait]
impl DailyEventSource for StaticSource {
    async fn events_for_date(
        &self,
        _date: NaiveDate,
    ) -> Result<BTreeMap<String, Vec<String>>, SourceUnavailable> {
        Ok(self.events.clone())
    }
}

/// An event source that is always down
pub struct FailingSource;

#[async_trait]
impl DailyEventSource for FailingSource {
    async fn events_for_date(
        &self,
        _date: NaiveDate,
    ) -> Result<BTreeMap<String, Vec<String>>, SourceUnavailable> {
        Err(SourceUnavailable::Other(
            "the calendar service is unreachable".to_string(),
        ))
    }
}

/// A board with the two usual lists, the to-do one pre-populated with `titles`.
/// Returns the board, the to-do list id and the seeded tasks (in creation order).
pub fn board_with_todo_tasks(titles: &[&str]) -> (MemoryBoard, ListId, Vec<Task>) {
    let mut board = MemoryBoard::new();
    let todo = board.add_list(TODO_LIST);
    board.add_list(DONE_LIST);

    let tasks = titles
        .iter()
        .map(|title| board.seed_task(&todo, title))
        .collect();
    (board, todo, tasks)
}

pub fn any_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
}

/// The titles currently on a list, in card order
pub async fn titles_on(board: &MemoryBoard, list: &ListId) -> Vec<String> {
    use pantry_board::traits::TaskBoard;
    board
        .list_tasks(list)
        .await
        .unwrap()
        .iter()
        .map(|t| t.title().to_string())
        .collect()
}
