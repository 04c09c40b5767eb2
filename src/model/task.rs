use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    /// First day of the bar. Rows without both dates get no bar.
    pub start: Option<NaiveDate>,
    /// Last day of the bar, inclusive.
    pub end: Option<NaiveDate>,
    /// Position the row was created at, before any reordering.
    pub base_index: usize,
}

impl Task {
    /// Create a scheduled task.
    pub fn new(title: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            start: Some(start),
            end: Some(end),
            base_index: 0,
        }
    }

    /// Create a row with no dates; it is listed but never drawn as a bar.
    pub fn unscheduled(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            start: None,
            end: None,
            base_index: 0,
        }
    }

    pub fn with_base_index(mut self, base_index: usize) -> Self {
        self.base_index = base_index;
        self
    }

    /// Both dates, if the task is scheduled.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.start?, self.end?))
    }

    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled"
        } else {
            &self.title
        }
    }
}
