use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Pixel density used when a viewport is built without a usable one.
pub const DEFAULT_PX_PER_DAY: f32 = 16.0;

/// Which edge of the calendar window an extension grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
}

/// The visible calendar window of the board and its pixel density.
///
/// The host owns the viewport. The board never mutates it; it only asks for
/// a replacement built with [`Viewport::extend`].
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    /// First visible date (day index 0).
    pub start: NaiveDate,
    /// Last visible date, inclusive.
    pub end: NaiveDate,
    /// Pixels per day. Always positive.
    pub px_per_day: f32,
}

impl Viewport {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            px_per_day: DEFAULT_PX_PER_DAY,
        }
    }

    /// Set the pixel density, keeping the default for non-positive or
    /// non-finite values.
    pub fn with_px_per_day(mut self, px_per_day: f32) -> Self {
        if px_per_day.is_finite() && px_per_day > 0.0 {
            self.px_per_day = px_per_day;
        }
        self
    }

    /// Number of visible days. A window whose end precedes its start still
    /// counts as one day.
    pub fn days(&self) -> i64 {
        ((self.end - self.start).num_days() + 1).max(1)
    }

    /// Total width in pixels of the whole window.
    pub fn total_width(&self) -> f32 {
        self.days() as f32 * self.px_per_day
    }

    /// Last date that is actually laid out.
    pub fn last_day(&self) -> NaiveDate {
        self.end.max(self.start)
    }

    /// Signed day offset of `date` from the window start.
    pub fn day_index(&self, date: NaiveDate) -> i64 {
        (date - self.start).num_days()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.last_day()
    }

    /// Pin `date` to the nearest bound of the window.
    pub fn clamp(&self, date: NaiveDate) -> NaiveDate {
        date.clamp(self.start, self.last_day())
    }

    /// Convert a date to an x-pixel offset from the window start.
    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        self.day_index(date) as f32 * self.px_per_day
    }

    /// A new viewport grown by `days` on one side. The other bound is kept.
    pub fn extend(&self, direction: Direction, days: u32) -> Self {
        let delta = Duration::days(i64::from(days));
        match direction {
            Direction::Left => Self {
                start: self.start - delta,
                ..self.clone()
            },
            Direction::Right => Self {
                end: self.end + delta,
                ..self.clone()
            },
        }
    }
}
