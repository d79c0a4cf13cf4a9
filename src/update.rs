//! Day-level update operations, binding a board and an event source together.
//!
//! This is where the abort-before-mutate rule lives: every operation that writes to the
//! board reads the day's target titles *first*, so that an unreachable template/calendar
//! can never be mistaken for "no tasks today" and wipe the list.

use chrono::NaiveDate;

use crate::error::{TransportError, UpdateError};
use crate::reconciler::{apply, reconcile, ApplyReport, ReconciliationPlan};
use crate::source::flatten_events;
use crate::traits::{DailyEventSource, TaskBoard};

/// Combines a [`TaskBoard`] and a [`DailyEventSource`] into the daily update operations.
///
/// Runs must be serialized by the caller: two overlapping updates of the same list would
/// diff from stale snapshots and could race to duplicate or double-delete cards. A single
/// periodic loop (or a single CLI invocation) satisfies this.
pub struct DailyUpdate<B, S>
where
    B: TaskBoard,
    S: DailyEventSource,
{
    board: B,
    source: S,
    todo_list: String,
}

impl<B, S> DailyUpdate<B, S>
where
    B: TaskBoard,
    S: DailyEventSource,
{
    /// `todo_list` is the display name of the board column to converge (e.g. "DA FARE")
    pub fn new(board: B, source: S, todo_list: &str) -> Self {
        Self {
            board,
            source,
            todo_list: todo_list.to_string(),
        }
    }

    pub fn board(&self) -> &B {
        &self.board
    }
    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The ordered titles that should exist on the to-do list for `date`
    async fn target_titles(&self, date: NaiveDate) -> Result<Vec<String>, UpdateError> {
        let events = self.source.events_for_date(date).await?;
        let titles = flatten_events(&events);
        log::info!("{} target titles for {}", titles.len(), date);
        Ok(titles)
    }

    /// The smart daily update: converge the to-do list to the target set for `date`,
    /// preserving every card whose title is unchanged.
    ///
    /// Per-operation failures are recorded in the report and do not abort the run;
    /// only a run where *every* planned operation failed is an error.
    pub async fn smart_update(&mut self, date: NaiveDate) -> Result<ApplyReport, UpdateError> {
        log::info!("Smart update of {:?} for {}", self.todo_list, date);

        // Read the target set before touching the board
        let targets = self.target_titles(date).await?;

        let list = self.board.find_list(&self.todo_list).await?;
        let current = self.board.list_tasks(&list).await?;

        let plan = reconcile(&targets, &current);
        log::info!(
            "Plan: keep {}, add {}, remove {}",
            plan.preserved.len(),
            plan.to_add.len(),
            plan.to_remove.len()
        );

        let report = apply(&plan, &mut self.board, &list).await;
        if report.is_total_failure() {
            return Err(UpdateError::AllOperationsFailed(plan.operation_count()));
        }
        Ok(report)
    }

    /// The traditional update: delete everything on the to-do list, then recreate the
    /// full target set for `date`. Kept for operators who want a guaranteed-clean list;
    /// the smart update exists so this does not have to run unconditionally.
    pub async fn refresh(&mut self, date: NaiveDate) -> Result<ApplyReport, UpdateError> {
        log::info!("Full refresh of {:?} for {}", self.todo_list, date);

        // Same rule as the smart path: no mutation before the target set is known
        let targets = self.target_titles(date).await?;

        let list = self.board.find_list(&self.todo_list).await?;
        let removed = self.board.clear_list(&list).await?;

        let plan = ReconciliationPlan {
            to_add: targets,
            ..ReconciliationPlan::default()
        };
        let mut report = apply(&plan, &mut self.board, &list).await;
        report.removed += removed;
        if report.added == 0 && !plan.to_add.is_empty() && !report.errors.is_empty() {
            return Err(UpdateError::AllOperationsFailed(plan.to_add.len()));
        }
        Ok(report)
    }

    /// Unconditionally empty the to-do list. Returns how many cards were deleted.
    pub async fn clean(&mut self) -> Result<usize, UpdateError> {
        let list = self.board.find_list(&self.todo_list).await?;
        Ok(self.board.clear_list(&list).await?)
    }

    /// Card counts per list, for the whole board
    pub async fn board_status(&self) -> Result<Vec<(String, usize)>, TransportError> {
        let mut status = Vec::new();
        for list in self.board.lists().await? {
            let count = self.board.list_tasks(&list.id).await?.len();
            status.push((list.name, count));
        }
        Ok(status)
    }
}
