//! This module provides a [`TaskBoard`] backed by the Trello REST API

use std::sync::Mutex;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde::Deserialize;
use url::Url;

use crate::board::BoardList;
use crate::error::TransportError;
use crate::task::{ListId, Task, TaskId};
use crate::traits::TaskBoard;

static API_BASE: Lazy<Url> = Lazy::new(|| {
    Url::parse("https://api.trello.com/1/").unwrap(/* this is a valid, hard-coded URL */)
});

/// A card, as the Trello API returns it.
///
/// The raw JSON never leaves this module: it is converted to a [`Task`] at this boundary.
#[derive(Debug, Deserialize)]
struct ApiCard {
    id: String,
    name: String,
    #[serde(rename = "idList")]
    id_list: String,
}

impl From<ApiCard> for Task {
    fn from(card: ApiCard) -> Self {
        Task::new(
            TaskId::from(card.id),
            card.name,
            ListId::from(card.id_list),
        )
    }
}

/// A list, as the Trello API returns it
#[derive(Debug, Deserialize)]
struct ApiList {
    id: String,
    name: String,
}

impl From<ApiList> for BoardList {
    fn from(list: ApiList) -> Self {
        Self {
            id: ListId::from(list.id),
            name: list.name,
        }
    }
}

/// A task board that lives on a Trello board
pub struct RemoteBoard {
    http: reqwest::Client,
    api_key: String,
    token: String,
    board_id: String,

    cached_lists: Mutex<Option<Vec<BoardList>>>,
}

impl RemoteBoard {
    /// Create a board handle. This does not start a connection
    pub fn new<K: ToString, T: ToString, B: ToString>(api_key: K, token: T, board_id: B) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.to_string(),
            token: token.to_string(),
            board_id: board_id.to_string(),
            cached_lists: Mutex::new(None),
        }
    }

    fn auth(&self) -> [(&'static str, &str); 2] {
        [("key", self.api_key.as_str()), ("token", self.token.as_str())]
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        Ok(API_BASE.join(path)?)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, TransportError> {
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(TransportError::UnexpectedStatus {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl TaskBoard for RemoteBoard {
    async fn lists(&self) -> Result<Vec<BoardList>, TransportError> {
        if let Some(lists) = &*self.cached_lists.lock().unwrap() {
            log::debug!("Board lists are already cached.");
            return Ok(lists.clone());
        }

        let url = self.endpoint(&format!("boards/{}/lists", self.board_id))?;
        let response = self.http.get(url).query(&self.auth()).send().await?;
        let api_lists: Vec<ApiList> = Self::check(response).await?.json().await?;
        let lists: Vec<BoardList> = api_lists.into_iter().map(BoardList::from).collect();
        log::debug!("Found {} lists on board {}", lists.len(), self.board_id);

        // Note: the mutex cannot be locked during this whole async function, but it can
        // safely be re-entrant (this will just waste an unnecessary request)
        *self.cached_lists.lock().unwrap() = Some(lists.clone());
        Ok(lists)
    }

    async fn find_list(&self, name: &str) -> Result<ListId, TransportError> {
        self.lists()
            .await?
            .into_iter()
            .find(|l| l.name == name)
            .map(|l| l.id)
            .ok_or_else(|| TransportError::ListNotFound(name.to_string()))
    }

    async fn list_tasks(&self, list: &ListId) -> Result<Vec<Task>, TransportError> {
        let url = self.endpoint(&format!("lists/{}/cards", list))?;
        let response = self
            .http
            .get(url)
            .query(&self.auth())
            .query(&[("fields", "name,idList")])
            .send()
            .await?;
        let cards: Vec<ApiCard> = Self::check(response).await?.json().await?;
        Ok(cards.into_iter().map(Task::from).collect())
    }

    async fn create_task(&mut self, list: &ListId, title: &str) -> Result<Task, TransportError> {
        let url = self.endpoint("cards")?;
        let response = self
            .http
            .post(url)
            .query(&self.auth())
            .query(&[("idList", list.as_str()), ("name", title), ("pos", "bottom")])
            .send()
            .await?;
        let card: ApiCard = Self::check(response).await?.json().await?;
        log::debug!("Created card {:?} ({})", card.name, card.id);
        Ok(Task::from(card))
    }

    async fn delete_task(&mut self, id: &TaskId) -> Result<(), TransportError> {
        let url = self.endpoint(&format!("cards/{}", id))?;
        let response = self.http.delete(url).query(&self.auth()).send().await?;

        // A card deleted by someone else in the meantime is fine with us
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            log::debug!("Card {} was already deleted", id);
            return Ok(());
        }
        Self::check(response).await?;
        Ok(())
    }

    async fn clear_list(&mut self, list: &ListId) -> Result<usize, TransportError> {
        let tasks = self.list_tasks(list).await?;
        let mut deleted = 0;
        for task in tasks {
            self.delete_task(task.id()).await?;
            deleted += 1;
        }
        log::info!("Cleared {} cards from list {}", deleted, list);
        Ok(deleted)
    }
}
