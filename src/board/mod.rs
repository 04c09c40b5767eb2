//! Viewport and scroll coordination for one timeline board.
//!
//! [`TimelineBoard`] owns both scroll panes, the vertical synchronizer, the
//! edge-extension state machine and the pan gesture. The UI reports what its
//! widgets did, pushes back the offsets the board wrote, and the host drains
//! [`BoardEvent`]s to learn what the board wants changed.

pub mod edge;
pub mod layout;
pub mod pan;
pub mod pane;
pub mod reorder;
pub mod scroll_sync;

use std::time::Duration;

use chrono::NaiveDate;
use egui::Pos2;
use tracing::{debug, trace};
use uuid::Uuid;

use crate::config::BoardConfig;
use crate::model::{Task, Viewport};

use self::edge::{EdgeExtensionController, EdgeProbe, ExtensionRequest, ExtensionState};
use self::layout::BoardLayout;
use self::pan::{PanController, PointerSource};
use self::pane::{PaneKind, PaneMetrics, ScrollPane, ScrollState};
use self::reorder::OrderChange;
use self::scroll_sync::ScrollSynchronizer;

/// Something the host is asked to do or told about.
#[derive(Debug, Clone, PartialEq)]
pub enum BoardEvent {
    /// Replace the viewport with `viewport.extend(direction, days)`.
    ExtendViewport(ExtensionRequest),
    OrderChanged(OrderChange),
    /// A row label was double-clicked.
    RowActivated(Uuid),
}

pub struct TimelineBoard {
    config: BoardConfig,
    viewport: Viewport,
    tasks: Vec<Task>,
    today: NaiveDate,
    layout: BoardLayout,

    label: ScrollPane,
    canvas: ScrollPane,
    sync: ScrollSynchronizer,
    edges: EdgeExtensionController,
    pan: PanController,

    /// Notifications released on the next frame.
    deferred: Vec<BoardEvent>,
    events: Vec<BoardEvent>,
}

impl TimelineBoard {
    pub fn new(
        config: BoardConfig,
        viewport: Viewport,
        tasks: Vec<Task>,
        today: NaiveDate,
    ) -> Self {
        let layout = layout::layout(&viewport, &tasks, today, config.row_height_px);
        let edges = EdgeExtensionController::new(config.edge_config());
        Self {
            config,
            viewport,
            tasks,
            today,
            layout,
            label: ScrollPane::default(),
            canvas: ScrollPane::default(),
            sync: ScrollSynchronizer::default(),
            edges,
            pan: PanController::default(),
            deferred: Vec::new(),
            events: Vec::new(),
        }
    }

    // ── Getters ─────────────────────────────────────────────────

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn label_pane(&self) -> &ScrollPane {
        &self.label
    }

    pub fn canvas_pane(&self) -> &ScrollPane {
        &self.canvas
    }

    pub fn extension_state(&self) -> ExtensionState {
        self.edges.state()
    }

    pub fn pending_scroll_adjustment(&self) -> Option<f32> {
        self.edges.pending_adjustment()
    }

    pub fn is_panning(&self) -> bool {
        self.pan.is_dragging()
    }

    // ── Host input ──────────────────────────────────────────────

    /// The host replaced its viewport (usually after an `ExtendViewport`).
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.relayout();
        self.canvas.set_content_width(self.layout.total_width);
        self.edges.observe_viewport(&self.viewport);
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        if today != self.today {
            self.today = today;
            self.relayout();
        }
    }

    fn relayout(&mut self) {
        self.layout = layout::layout(
            &self.viewport,
            &self.tasks,
            self.today,
            self.config.row_height_px,
        );
    }

    // ── Frames and timers ───────────────────────────────────────

    /// Run both the frame tick and due timers. Call once per painted frame,
    /// before the panes are shown.
    pub fn begin_frame(&mut self, now: Duration) {
        self.on_frame();
        self.advance(now);
    }

    /// Frame tick: release the sync token, apply a pending scroll
    /// compensation and deliver deferred notifications.
    pub fn on_frame(&mut self) {
        self.sync.on_frame();

        if let Some(adjustment) = self.edges.on_frame() {
            let left = self.canvas.state().left + adjustment;
            self.canvas.write_left(left);
            self.pan.rebase(adjustment);
            debug!(
                adjustment,
                left = self.canvas.state().left,
                "scroll compensated for left extension"
            );
        }

        self.events.append(&mut self.deferred);
    }

    /// Fire timers that are due at `now`.
    pub fn advance(&mut self, now: Duration) {
        if let Some(request) = self.edges.advance(now, &self.viewport) {
            self.events.push(BoardEvent::ExtendViewport(request));
        }
    }

    /// Earliest time a timer wants [`advance`](Self::advance) to run.
    pub fn next_wakeup(&self) -> Option<Duration> {
        self.edges.next_deadline()
    }

    /// More frames are needed to finish work already started.
    pub fn needs_frame(&self) -> bool {
        matches!(self.edges.state(), ExtensionState::AdjustingScroll(..))
            || self.sync.is_syncing()
            || !self.deferred.is_empty()
            || self.label.has_pending_write()
            || self.canvas.has_pending_write()
    }

    pub fn drain_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Pane reports ────────────────────────────────────────────

    /// Offsets the label widget must be set to before it is shown.
    pub fn take_label_write(&mut self) -> Option<ScrollState> {
        self.label.take_write()
    }

    /// Offsets the canvas widget must be set to before it is shown.
    pub fn take_canvas_write(&mut self) -> Option<ScrollState> {
        self.canvas.take_write()
    }

    /// What the label widget showed this frame.
    pub fn report_label_pane(&mut self, state: ScrollState, metrics: PaneMetrics) {
        self.label.set_metrics(metrics);
        if self.label.observe(state) {
            self.sync.on_scroll(PaneKind::Label, &mut self.label, &mut self.canvas);
        }
    }

    /// What the canvas widget showed this frame.
    pub fn report_canvas_pane(&mut self, state: ScrollState, metrics: PaneMetrics, now: Duration) {
        self.canvas.set_metrics(metrics);
        if self.canvas.observe(state) {
            self.canvas_scrolled(now);
        }
    }

    /// Shared path for native scrolls, pans and programmatic jumps.
    fn canvas_scrolled(&mut self, now: Duration) {
        self.sync.on_scroll(PaneKind::Canvas, &mut self.label, &mut self.canvas);
        if let Some(probe) = self.canvas_probe() {
            self.edges.observe_scroll(probe, now);
        }
    }

    fn canvas_probe(&self) -> Option<EdgeProbe> {
        let metrics = self.canvas.metrics()?;
        Some(EdgeProbe {
            scroll_left: self.canvas.state().left,
            view_width: metrics.view_width,
            scroll_width: metrics.content_width,
        })
    }

    fn move_canvas(&mut self, target: ScrollState, now: Duration) {
        let before = self.canvas.state();
        self.canvas.write_left(target.left);
        self.canvas.write_top(target.top);
        if self.canvas.state() != before {
            self.canvas_scrolled(now);
        }
    }

    // ── Panning ─────────────────────────────────────────────────

    /// Pointer pressed on the canvas. Ignored until the canvas is measured.
    pub fn pan_start(&mut self, source: PointerSource, pos: Pos2) -> bool {
        if !self.canvas.is_mounted() {
            return false;
        }
        self.pan.pointer_down(source, pos, self.canvas.state())
    }

    pub fn pan_move(&mut self, pos: Pos2, now: Duration) {
        if let Some(target) = self.pan.pointer_move(pos) {
            self.move_canvas(target, now);
        }
    }

    pub fn pan_end(&mut self) -> bool {
        self.pan.pointer_up()
    }

    // ── Rows ────────────────────────────────────────────────────

    /// Move the row at `from` to `to`. The host hears about it on the next
    /// frame.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        let Some(change) = reorder::move_row(&mut self.tasks, from, to) else {
            trace!(from, to, len = self.tasks.len(), "reorder ignored");
            return false;
        };
        debug!(from, to, moved = %change.moved_id, "rows reordered");
        self.relayout();
        self.deferred.push(BoardEvent::OrderChanged(change));
        true
    }

    /// Drop of row `active` onto row `over`.
    pub fn reorder_by_id(&mut self, active: Uuid, over: Uuid) -> bool {
        match reorder::resolve_drop(&self.tasks, active, over) {
            Some((from, to)) => self.reorder(from, to),
            None => false,
        }
    }

    /// Row label double-clicked: bring its bar into view and tell the host.
    pub fn activate_row(&mut self, task_id: Uuid, now: Duration) -> bool {
        if !self.tasks.iter().any(|t| t.id == task_id) {
            return false;
        }
        self.scroll_to_task(task_id, now);
        self.events.push(BoardEvent::RowActivated(task_id));
        true
    }

    /// Center the task's bar horizontally. Bars pinned to a window edge scroll
    /// to that edge. No-op for unknown or unscheduled tasks, or before the
    /// canvas is measured.
    pub fn scroll_to_task(&mut self, task_id: Uuid, now: Duration) -> bool {
        let Some(metrics) = self.canvas.metrics() else {
            return false;
        };
        let Some(bar_left) = self
            .layout
            .row(task_id)
            .and_then(|row| row.bar.as_ref())
            .map(|bar| bar.left)
        else {
            return false;
        };

        let target = ScrollState {
            left: bar_left - metrics.view_width / 2.0,
            top: self.canvas.state().top,
        };
        self.move_canvas(target, now);
        true
    }

    /// Cancel timers and in-progress gestures.
    pub fn teardown(&mut self) {
        self.edges.cancel();
        self.pan.pointer_up();
        self.deferred.clear();
    }
}

impl Drop for TimelineBoard {
    fn drop(&mut self) {
        self.teardown();
    }
}
