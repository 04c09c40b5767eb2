//! Pixel geometry of the board.
//!
//! Everything here is a pure function of the viewport and the task list.
//! Rows stack at a fixed height, so horizontal changes never move anything
//! vertically.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use uuid::Uuid;

use crate::model::{Task, Viewport};

/// Horizontal extent of one task inside the window.
#[derive(Debug, Clone, PartialEq)]
pub struct BarGeometry {
    pub left: f32,
    pub width: f32,
    /// Clamped start and end fall on the same day; drawn as a marker.
    pub is_point: bool,
    /// Clamped first day.
    pub start: NaiveDate,
    /// Clamped last day.
    pub end: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RowGeometry {
    pub task_id: Uuid,
    pub row_index: usize,
    pub top: f32,
    /// `None` for unscheduled, inverted or fully off-window tasks.
    pub bar: Option<BarGeometry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardLayout {
    pub total_width: f32,
    pub total_height: f32,
    pub rows: Vec<RowGeometry>,
    /// One grid column per visible day.
    pub grid_columns: usize,
    pub today_marker: Option<f32>,
}

impl BoardLayout {
    pub fn row(&self, task_id: Uuid) -> Option<&RowGeometry> {
        self.rows.iter().find(|r| r.task_id == task_id)
    }
}

/// A single day column of the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridColumn {
    pub date: NaiveDate,
    pub left: f32,
    pub is_week_start: bool,
}

/// One month cell of the header strip.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSpan {
    pub label: String,
    pub left: f32,
    pub width: f32,
}

/// Lay out every row of `tasks` against `viewport`.
pub fn layout(
    viewport: &Viewport,
    tasks: &[Task],
    today: NaiveDate,
    row_height: f32,
) -> BoardLayout {
    let rows = tasks
        .iter()
        .enumerate()
        .map(|(row_index, task)| RowGeometry {
            task_id: task.id,
            row_index,
            top: row_index as f32 * row_height,
            bar: bar_geometry(viewport, task),
        })
        .collect();

    BoardLayout {
        total_width: viewport.total_width(),
        total_height: tasks.len() as f32 * row_height,
        rows,
        grid_columns: viewport.days() as usize,
        today_marker: today_marker(viewport, today),
    }
}

/// Geometry of a single task bar. Dates outside the window are pinned to the
/// nearest bound, so a task wholly before or after it shows as a point at
/// the edge column.
pub fn bar_geometry(viewport: &Viewport, task: &Task) -> Option<BarGeometry> {
    let (start, end) = task.span()?;
    if end < start {
        return None;
    }
    let start = viewport.clamp(start);
    let end = viewport.clamp(end);
    let first = viewport.day_index(start);
    let span = viewport.day_index(end) - first;

    Some(BarGeometry {
        left: first as f32 * viewport.px_per_day,
        width: (span + 1) as f32 * viewport.px_per_day,
        is_point: span == 0,
        start,
        end,
    })
}

/// Center of today's column, if today is inside the window.
pub fn today_marker(viewport: &Viewport, today: NaiveDate) -> Option<f32> {
    if !viewport.contains(today) {
        return None;
    }
    Some(viewport.date_to_x(today) + viewport.px_per_day / 2.0)
}

pub fn grid_lines(viewport: &Viewport) -> Vec<GridColumn> {
    (0..viewport.days())
        .map(|i| {
            let date = viewport.start + Duration::days(i);
            GridColumn {
                date,
                left: i as f32 * viewport.px_per_day,
                is_week_start: date.weekday() == Weekday::Sun,
            }
        })
        .collect()
}

/// Header cells, one per calendar month touched by the window.
pub fn month_spans(viewport: &Viewport) -> Vec<MonthSpan> {
    let last = viewport.last_day();
    let mut spans = Vec::new();
    let mut cursor = viewport.start;

    while cursor <= last {
        let month_end = last_of_month(cursor).min(last);
        let days = (month_end - cursor).num_days() + 1;
        spans.push(MonthSpan {
            label: cursor.format("%B %Y").to_string(),
            left: viewport.date_to_x(cursor),
            width: days as f32 * viewport.px_per_day,
        });
        cursor = month_end + Duration::days(1);
    }

    spans
}

fn last_of_month(date: NaiveDate) -> NaiveDate {
    let (y, m) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|first| first.pred_opt())
        .unwrap_or(date)
}
