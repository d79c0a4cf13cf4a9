//! This module persists the little state the updater keeps between runs
//!
//! The reconciliation itself is stateless (it recomputes everything from the live board
//! and the template); this record only gates *whether* a run is due, and remembers the
//! operator's mode choices. It is passed around explicitly, never kept in a global.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What the updater remembers between runs
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// The date the to-do list was last prepared for (not the date the run happened)
    pub last_prepared_date: Option<NaiveDate>,
    /// Whether the embedding scheduler should update without being asked
    pub automatic_mode: bool,
    /// Whether `auto` runs use the reconciler (true) or the destructive refresh (false)
    pub smart_mode: bool,
    /// How often the embedding scheduler should re-check, in hours
    pub check_interval_hours: u32,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            last_prepared_date: None,
            automatic_mode: false,
            smart_mode: true,
            check_interval_hours: 1,
        }
    }
}

/// A [`RunState`] tied to its backing file
#[derive(Debug)]
pub struct StateFile {
    backing_file: PathBuf,
    pub state: RunState,
}

impl StateFile {
    /// Load the state from its backing file, or start fresh if the file does not exist
    /// or cannot be parsed. A corrupt state file is not worth failing a run over: the
    /// worst consequence is one redundant (idempotent) update.
    pub fn load(path: &Path) -> Self {
        let state = match std::fs::File::open(path) {
            Err(_) => RunState::default(),
            Ok(file) => match serde_json::from_reader(file) {
                Ok(state) => state,
                Err(err) => {
                    log::warn!("State file {:?} is unreadable ({}), starting fresh", path, err);
                    RunState::default()
                }
            },
        };
        Self {
            backing_file: PathBuf::from(path),
            state,
        }
    }

    /// Store the current state to its backing file
    pub fn save(&self) {
        let file = match std::fs::File::create(&self.backing_file) {
            Err(err) => {
                log::warn!("Unable to save state file {:?}: {}", self.backing_file, err);
                return;
            }
            Ok(f) => f,
        };
        if let Err(err) = serde_json::to_writer_pretty(file, &self.state) {
            log::warn!("Unable to serialize state: {}", err);
        }
    }

    /// Whether the to-do list still needs to be prepared for `today`
    pub fn update_needed(&self, today: NaiveDate) -> bool {
        match self.state.last_prepared_date {
            None => true,
            Some(last) => last != today,
        }
    }

    /// Record that the list has been prepared for `date`, and persist
    pub fn mark_prepared(&mut self, date: NaiveDate) {
        self.state.last_prepared_date = Some(date);
        self.save();
    }

    /// Forget the last prepared date (after a manual clean), and persist
    pub fn reset_prepared(&mut self) {
        self.state.last_prepared_date = None;
        self.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_round_trips_through_its_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("economato_state.json");

        let mut state_file = StateFile::load(&path);
        assert_eq!(state_file.state, RunState::default());

        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        state_file.state.smart_mode = false;
        state_file.mark_prepared(date);

        let reloaded = StateFile::load(&path);
        assert_eq!(reloaded.state.last_prepared_date, Some(date));
        assert!(!reloaded.state.smart_mode);
    }

    #[test]
    fn update_needed_compares_dates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let mut state_file = StateFile::load(&path);

        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let tuesday = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        // Never prepared yet
        assert!(state_file.update_needed(monday));

        state_file.mark_prepared(monday);
        assert!(!state_file.update_needed(monday));
        assert!(state_file.update_needed(tuesday));

        state_file.reset_prepared();
        assert!(state_file.update_needed(monday));
    }

    #[test]
    fn corrupt_state_file_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{not json").unwrap();

        let state_file = StateFile::load(&path);
        assert_eq!(state_file.state, RunState::default());
    }
}
