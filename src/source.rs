//! This module provides the weekly-template implementation of [`DailyEventSource`]
//!
//! The template is a JSON file mapping weekday names to calendars to ordered event
//! titles, e.g.:
//!
//! ```json
//! {
//!     "monday": {
//!         "ORDINI": ["ORDINE Frutta e Verdura"],
//!         "SCARICHI": ["SCARICO Fornitore ABC"]
//!     }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Weekday};

use crate::error::SourceUnavailable;
use crate::traits::DailyEventSource;

type DayEvents = BTreeMap<String, Vec<String>>;
type WeekTemplate = BTreeMap<String, DayEvents>;

/// A [`DailyEventSource`] that reads a weekly template file.
///
/// The file is re-read on every call, so edits to the template are picked up by the
/// next run without restarting anything.
#[derive(Debug, Clone)]
pub struct TemplateSource {
    path: PathBuf,
}

impl TemplateSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: PathBuf::from(path),
        }
    }

    fn load(&self) -> Result<WeekTemplate, SourceUnavailable> {
        let file = std::fs::File::open(&self.path).map_err(|source| SourceUnavailable::Io {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_reader(file).map_err(|source| SourceUnavailable::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

fn weekday_key(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "monday",
        Weekday::Tue => "tuesday",
        Weekday::Wed => "wednesday",
        Weekday::Thu => "thursday",
        Weekday::Fri => "friday",
        Weekday::Sat => "saturday",
        Weekday::Sun => "sunday",
    }
}

#[async_trait]
impl DailyEventSource for TemplateSource {
    async fn events_for_date(&self, date: NaiveDate) -> Result<DayEvents, SourceUnavailable> {
        let mut template = self.load()?;
        let key = weekday_key(date.weekday());
        // A weekday absent from the template is a day with no scheduled events
        let events = template.remove(key).unwrap_or_default();
        log::debug!(
            "Template has {} calendars with events for {} ({})",
            events.len(),
            date,
            key
        );
        Ok(events)
    }
}

/// Flattens a per-calendar event mapping into the ordered target-title sequence.
///
/// Calendars are visited in name order, titles in template order, so the same template
/// always yields the same sequence.
pub fn flatten_events(events: &DayEvents) -> Vec<String> {
    events.values().flatten().cloned().collect()
}
