//! An in-memory implementation of [`TaskBoard`].
//!
//! It backs the integration tests (where it mocks the remote Trello board) and is handy
//! for dry runs. Its task ids are sequential, so they sort in creation order just like
//! the real board's ids.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::board::BoardList;
use crate::error::TransportError;
use crate::mock_behaviour::MockBehaviour;
use crate::task::{ListId, Task, TaskId};
use crate::traits::TaskBoard;

/// A task board stored in memory
#[derive(Debug, Default)]
pub struct MemoryBoard {
    lists: Vec<BoardList>,
    tasks: HashMap<TaskId, Task>,
    next_id: u64,

    mock_behaviour: Option<Arc<Mutex<MockBehaviour>>>,
}

impl MemoryBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tweak the behaviour of this board, so that it returns errors in some tests
    pub fn set_mock_behaviour(&mut self, behaviour: Option<Arc<Mutex<MockBehaviour>>>) {
        self.mock_behaviour = behaviour;
    }

    /// Add a list (column) to the board and return its id
    pub fn add_list(&mut self, name: &str) -> ListId {
        let id = ListId::from(format!("list-{}", self.lists.len()));
        self.lists.push(BoardList {
            id: id.clone(),
            name: name.to_string(),
        });
        id
    }

    /// Insert a task directly, bypassing any mocked behaviour. Used to set up test states.
    pub fn seed_task(&mut self, list: &ListId, title: &str) -> Task {
        let task = Task::new(self.fresh_id(), title.to_string(), list.clone());
        self.tasks.insert(task.id().clone(), task.clone());
        task
    }

    /// Move a task to another list, as a human would when marking it done
    pub fn move_task(&mut self, id: &TaskId, destination: &ListId) -> Result<(), TransportError> {
        match self.tasks.get(id) {
            None => Err(TransportError::Other(format!("no task {}", id))),
            Some(task) => {
                let moved = Task::new(id.clone(), task.title().to_string(), destination.clone());
                self.tasks.insert(id.clone(), moved);
                Ok(())
            }
        }
    }

    /// How many tasks the whole board holds, all lists included
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    fn fresh_id(&mut self) -> TaskId {
        self.next_id += 1;
        TaskId::from(format!("mem-{:08}", self.next_id))
    }
}

#[async_trait]
impl TaskBoard for MemoryBoard {
    async fn lists(&self) -> Result<Vec<BoardList>, TransportError> {
        if let Some(mb) = &self.mock_behaviour {
            mb.lock().unwrap().can_lists()?;
        }
        Ok(self.lists.clone())
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
        if let Some(mb) = &self.mock_behaviour {
            mb.lock().unwrap().can_list_tasks()?;
        }
        let mut tasks: Vec<Task> = self
            .tasks
            .values()
            .filter(|t| t.list_id() == list)
            .cloned()
            .collect();
        tasks.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(tasks)
    }

    async fn create_task(&mut self, list: &ListId, title: &str) -> Result<Task, TransportError> {
        if let Some(mb) = &self.mock_behaviour {
            mb.lock().unwrap().can_create_task()?;
        }
        let task = Task::new(self.fresh_id(), title.to_string(), list.clone());
        self.tasks.insert(task.id().clone(), task.clone());
        Ok(task)
    }

    async fn delete_task(&mut self, id: &TaskId) -> Result<(), TransportError> {
        if let Some(mb) = &self.mock_behaviour {
            mb.lock().unwrap().can_delete_task()?;
        }
        // A task that is already gone counts as deleted
        self.tasks.remove(id);
        Ok(())
    }

    async fn clear_list(&mut self, list: &ListId) -> Result<usize, TransportError> {
        let victims: Vec<TaskId> = self
            .list_tasks(list)
            .await?
            .into_iter()
            .map(|t| t.id().clone())
            .collect();
        let mut deleted = 0;
        for id in victims {
            self.delete_task(&id).await?;
            deleted += 1;
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn board_basics() {
        let mut board = MemoryBoard::new();
        let todo = board.add_list("DA FARE");
        let done = board.add_list("ESEGUITO");

        assert_eq!(board.find_list("DA FARE").await.unwrap(), todo);
        assert!(matches!(
            board.find_list("NOPE").await,
            Err(TransportError::ListNotFound(_))
        ));

        let a = board.create_task(&todo, "A").await.unwrap();
        let b = board.create_task(&todo, "B").await.unwrap();
        board.create_task(&done, "C").await.unwrap();
        assert!(a.id() < b.id());

        let tasks = board.list_tasks(&todo).await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].title(), "A");

        // Idempotent delete
        board.delete_task(a.id()).await.unwrap();
        board.delete_task(a.id()).await.unwrap();
        assert_eq!(board.list_tasks(&todo).await.unwrap().len(), 1);

        assert_eq!(board.clear_list(&todo).await.unwrap(), 1);
        assert_eq!(board.list_tasks(&todo).await.unwrap().len(), 0);
        assert_eq!(board.list_tasks(&done).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn moved_tasks_leave_the_list() {
        let mut board = MemoryBoard::new();
        let todo = board.add_list("DA FARE");
        let done = board.add_list("ESEGUITO");

        let task = board.seed_task(&todo, "SCARICO Fornitore ABC");
        board.move_task(task.id(), &done).unwrap();

        assert!(board.list_tasks(&todo).await.unwrap().is_empty());
        assert_eq!(board.list_tasks(&done).await.unwrap()[0].title(), "SCARICO Fornitore ABC");
    }
}
