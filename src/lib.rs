//! This crate keeps a hotel supply department's daily to-do list in sync with its
//! weekly schedule.
//!
//! The board lives on a third-party service (Trello); the schedule is a weekly template
//! mapping weekdays to expected task titles. Once a day, the list must be brought to
//! "what the template says for today" — without touching the cards the team is already
//! working on.
//!
//! The heart of the crate is the [`reconciler`] module: [`reconciler::reconcile`]
//! computes the minimal add/remove plan converging the current card titles to the
//! target titles, and [`reconciler::apply`] executes it best-effort against a
//! [`traits::TaskBoard`]. Cards whose title matches are never deleted and recreated,
//! so their id, position and checklists survive the daily rollover; cards moved to
//! other lists (e.g. marked done) are never even seen.
//!
//! The [`board`] module provides two `TaskBoard` backends (the Trello REST API, and an
//! in-memory board used in tests), the [`source`] module reads the weekly template, and
//! the [`update`] module binds them into the day-level operations the `economato`
//! binary exposes.

pub mod traits;

pub mod board;
pub use board::MemoryBoard;
pub use board::RemoteBoard;
mod task;
pub use task::{ListId, Task, TaskId};
pub mod reconciler;
pub use reconciler::{apply, reconcile, ApplyReport, ReconciliationPlan};
pub mod update;
pub use update::DailyUpdate;

pub mod error;
pub mod source;
pub use source::TemplateSource;
pub mod state;

pub mod config;
pub mod mock_behaviour;
