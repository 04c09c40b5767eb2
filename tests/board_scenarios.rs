use std::time::Duration;

use chrono::NaiveDate;
use timeline_board::board::edge::{ExtensionRequest, ExtensionState};
use timeline_board::board::layout;
use timeline_board::board::pane::{PaneMetrics, ScrollState};
use timeline_board::board::reorder::OrderChange;
use timeline_board::{BoardConfig, BoardEvent, Direction, Task, TimelineBoard, Viewport};

const VIEW_WIDTH: f32 = 800.0;
const VIEW_HEIGHT: f32 = 400.0;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 6).unwrap() + chrono::Duration::days(offset)
}

/// Stand-in for the host plus both scroll widgets.
struct Harness {
    board: TimelineBoard,
    viewport: Viewport,
    canvas_top: f32,
}

impl Harness {
    fn new(days: i64, tasks: Vec<Task>) -> Self {
        let viewport = Viewport::new(day(0), day(days - 1)).with_px_per_day(16.0);
        let board = TimelineBoard::new(BoardConfig::default(), viewport.clone(), tasks, day(10));
        let mut harness = Self {
            board,
            viewport,
            canvas_top: 0.0,
        };
        harness.paint_label(0.0);
        harness.scroll_canvas(200.0, ms(0));
        harness
    }

    fn content_height(&self) -> f32 {
        self.board.layout().total_height.max(1600.0)
    }

    fn canvas_metrics(&self) -> PaneMetrics {
        PaneMetrics::new(
            VIEW_WIDTH,
            VIEW_HEIGHT,
            self.board.layout().total_width,
            self.content_height(),
        )
    }

    fn paint_label(&mut self, top: f32) {
        let metrics = PaneMetrics::new(256.0, VIEW_HEIGHT, 256.0, self.content_height());
        self.board.report_label_pane(ScrollState::new(0.0, top), metrics);
    }

    /// The user moved the canvas widget.
    fn scroll_canvas(&mut self, left: f32, now: Duration) {
        let metrics = self.canvas_metrics();
        self.board
            .report_canvas_pane(ScrollState::new(left, self.canvas_top), metrics, now);
    }

    /// One painted frame: timers and frame tick, then both widgets apply
    /// pending writes and report back, then the host answers events.
    fn frame(&mut self, now: Duration) -> Vec<BoardEvent> {
        self.board.begin_frame(now);

        let label = self.board.take_label_write();
        let label_top = label.map_or(self.board.label_pane().state().top, |s| s.top);
        self.paint_label(label_top);

        let canvas = self
            .board
            .take_canvas_write()
            .unwrap_or_else(|| self.board.canvas_pane().state());
        self.canvas_top = canvas.top;
        let metrics = self.canvas_metrics();
        self.board.report_canvas_pane(canvas, metrics, now);

        let events = self.board.drain_events();
        for event in &events {
            if let BoardEvent::ExtendViewport(request) = event {
                self.viewport = self.viewport.extend(request.direction, request.days);
                self.board.set_viewport(self.viewport.clone());
            }
        }
        events
    }

    fn left(&self) -> f32 {
        self.board.canvas_pane().state().left
    }
}

fn extension_requests(events: &[BoardEvent]) -> Vec<ExtensionRequest> {
    events
        .iter()
        .filter_map(|e| match e {
            BoardEvent::ExtendViewport(request) => Some(*request),
            _ => None,
        })
        .collect()
}

#[test]
fn left_extension_keeps_visible_content_still() {
    let mut h = Harness::new(75, Vec::new());
    assert_eq!(h.board.layout().total_width, 1200.0);

    h.scroll_canvas(50.0, ms(100));
    assert!(extension_requests(&h.frame(ms(120))).is_empty());

    let events = h.frame(ms(150));
    assert_eq!(
        extension_requests(&events),
        vec![ExtensionRequest {
            direction: Direction::Left,
            days: 30,
        }]
    );
    assert_eq!(h.viewport.start, day(-30));
    assert_eq!(h.board.layout().total_width, 1680.0);
    assert_eq!(h.board.pending_scroll_adjustment(), Some(480.0));

    // adjustment frame, then settle frame
    assert!(extension_requests(&h.frame(ms(166))).is_empty());
    assert_eq!(h.left(), 530.0);
    assert!(matches!(
        h.board.extension_state(),
        ExtensionState::AdjustingScroll(Direction::Left, _)
    ));

    h.frame(ms(183));
    assert_eq!(h.board.extension_state(), ExtensionState::Idle);
    assert_eq!(h.left(), 530.0);
    assert_eq!(h.board.pending_scroll_adjustment(), None);
}

#[test]
fn burst_of_edge_scrolls_sends_one_request() {
    let mut h = Harness::new(75, Vec::new());
    let mut requests = Vec::new();

    // every event re-arms the debounce, so nothing fires mid-burst
    for step in 0..20u64 {
        let now = ms(10 + step * 10);
        h.scroll_canvas(90.0 - step as f32 * 4.0, now);
        requests.extend(extension_requests(&h.frame(now)));
    }
    assert!(requests.is_empty());

    requests.extend(extension_requests(&h.frame(ms(250))));

    // still hammering the edge while the extension is being applied
    for t in [255, 260] {
        h.scroll_canvas(10.0, ms(t));
    }
    for t in [266, 282, 298, 314] {
        requests.extend(extension_requests(&h.frame(ms(t))));
    }

    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].direction, Direction::Left);
}

#[test]
fn debounce_restarts_while_scrolling_continues() {
    let mut h = Harness::new(75, Vec::new());

    h.scroll_canvas(80.0, ms(0));
    h.scroll_canvas(60.0, ms(40));
    assert!(extension_requests(&h.frame(ms(60))).is_empty());
    assert_eq!(extension_requests(&h.frame(ms(90))).len(), 1);
}

#[test]
fn leaving_the_edge_before_debounce_cancels_request() {
    let mut h = Harness::new(75, Vec::new());

    h.scroll_canvas(50.0, ms(0));
    h.scroll_canvas(300.0, ms(20));
    for t in [60, 100, 200] {
        assert!(extension_requests(&h.frame(ms(t))).is_empty());
    }
    assert_eq!(h.viewport.start, day(0));
}

#[test]
fn right_extension_needs_no_compensation() {
    let mut h = Harness::new(75, Vec::new());

    // 1200 - 800 = 400 is the far end
    h.scroll_canvas(350.0, ms(0));
    let events = h.frame(ms(60));
    assert_eq!(
        extension_requests(&events),
        vec![ExtensionRequest {
            direction: Direction::Right,
            days: 30,
        }]
    );
    assert_eq!(h.viewport.end, day(104));
    assert_eq!(h.board.pending_scroll_adjustment(), None);

    h.frame(ms(76));
    h.frame(ms(92));
    assert_eq!(h.left(), 350.0);
    assert_eq!(h.board.extension_state(), ExtensionState::Idle);
}

#[test]
fn unanswered_request_times_out() {
    let mut h = Harness::new(75, Vec::new());
    h.scroll_canvas(20.0, ms(0));
    h.board.advance(ms(50));
    assert_eq!(extension_requests(&h.board.drain_events()).len(), 1);
    assert!(matches!(
        h.board.extension_state(),
        ExtensionState::ExtensionInFlight(Direction::Left)
    ));

    // host never replaces the viewport
    h.scroll_canvas(10.0, ms(500));
    h.board.advance(ms(600));
    assert!(h.board.drain_events().is_empty());

    h.board.advance(ms(1050));
    assert_eq!(h.board.extension_state(), ExtensionState::Idle);

    h.scroll_canvas(15.0, ms(1100));
    h.board.advance(ms(1150));
    assert_eq!(extension_requests(&h.board.drain_events()).len(), 1);
}

#[test]
fn label_scroll_syncs_canvas_without_echo() {
    let tasks: Vec<Task> = (0..60).map(|i| Task::unscheduled(format!("Row {i}"))).collect();
    let mut h = Harness::new(75, tasks);

    h.paint_label(120.0);
    assert_eq!(h.board.canvas_pane().state().top, 120.0);
    assert!(h.board.canvas_pane().has_pending_write());

    // canvas widget applies the write and reports it back
    let canvas = h.board.take_canvas_write().unwrap();
    assert_eq!(canvas, ScrollState::new(200.0, 120.0));
    h.canvas_top = canvas.top;
    h.scroll_canvas(canvas.left, ms(20));

    assert_eq!(h.board.label_pane().state().top, 120.0);
    assert!(!h.board.label_pane().has_pending_write());
}

#[test]
fn canvas_scroll_syncs_label() {
    let tasks: Vec<Task> = (0..60).map(|i| Task::unscheduled(format!("Row {i}"))).collect();
    let mut h = Harness::new(75, tasks);

    h.canvas_top = 120.0;
    h.scroll_canvas(200.0, ms(10));
    assert_eq!(h.board.label_pane().state().top, 120.0);

    h.frame(ms(26));
    assert_eq!(h.board.label_pane().state().top, 120.0);
    assert!(!h.board.label_pane().has_pending_write());
    assert!(!h.board.canvas_pane().has_pending_write());
    assert_eq!(h.board.canvas_pane().state().top, 120.0);
}

#[test]
fn reorder_moves_row_and_reports_new_order() {
    let tasks: Vec<Task> = (0..10)
        .map(|i| Task::unscheduled(format!("{i}")).with_base_index(i))
        .collect();
    let ids: Vec<_> = tasks.iter().map(|t| t.id).collect();
    let mut h = Harness::new(75, tasks);

    assert!(h.board.reorder(2, 5));
    let order: Vec<usize> = h.board.tasks().iter().map(|t| t.base_index).collect();
    assert_eq!(order, vec![0, 1, 3, 4, 5, 2, 6, 7, 8, 9]);

    let events = h.frame(ms(16));
    let expected: Vec<_> = [0, 1, 3, 4, 5, 2, 6, 7, 8, 9].iter().map(|&i| ids[i]).collect();
    assert_eq!(
        events,
        vec![BoardEvent::OrderChanged(OrderChange {
            ordered_ids: expected,
            moved_id: ids[2],
        })]
    );
    assert!(h.frame(ms(32)).is_empty());
}

#[test]
fn drop_onto_row_moves_dragged_row_into_its_place() {
    let tasks: Vec<Task> = (0..10)
        .map(|i| Task::unscheduled(format!("{i}")).with_base_index(i))
        .collect();
    let (active, over) = (tasks[7].id, tasks[1].id);
    let mut h = Harness::new(75, tasks);

    assert!(h.board.reorder_by_id(active, over));
    let order: Vec<usize> = h.board.tasks().iter().map(|t| t.base_index).collect();
    assert_eq!(order, vec![0, 7, 1, 2, 3, 4, 5, 6, 8, 9]);

    let events = h.frame(ms(16));
    assert!(matches!(
        events.as_slice(),
        [BoardEvent::OrderChanged(OrderChange { moved_id, .. })] if *moved_id == active
    ));
}

#[test]
fn point_task_is_one_day_wide() {
    let launch = Task::new("Launch", day(46), day(46));
    let id = launch.id;
    let h = Harness::new(75, vec![launch]);

    let bar = h.board.layout().row(id).and_then(|r| r.bar.clone()).unwrap();
    assert!(bar.is_point);
    assert_eq!(bar.left, 46.0 * 16.0);
    assert_eq!(bar.width, 16.0);
}

#[test]
fn total_width_is_days_times_density() {
    for (days, px) in [(1, 16.0), (7, 10.0), (75, 16.0), (366, 4.5)] {
        let viewport = Viewport::new(day(0), day(days - 1)).with_px_per_day(px);
        let built = layout::layout(&viewport, &[], day(0), 40.0);
        assert_eq!(built.total_width, days as f32 * px);
        assert_eq!(built.grid_columns, days as usize);
    }
}

#[test]
fn bars_stay_inside_the_canvas() {
    let viewport = Viewport::new(day(0), day(29));
    let tasks = vec![
        Task::new("before", day(-10), day(3)),
        Task::new("inside", day(4), day(9)),
        Task::new("after", day(25), day(60)),
        Task::new("around", day(-5), day(40)),
    ];
    let built = layout::layout(&viewport, &tasks, day(0), 40.0);
    for row in &built.rows {
        let bar = row.bar.as_ref().unwrap();
        assert!(bar.left >= 0.0);
        assert!(bar.left + bar.width <= built.total_width);
    }
    let around = built.rows[3].bar.as_ref().unwrap();
    assert_eq!((around.left, around.width), (0.0, built.total_width));
}

#[test]
fn today_outside_window_has_no_marker() {
    let viewport = Viewport::new(day(0), day(74));
    assert!(layout::today_marker(&viewport, day(-1)).is_none());
    assert!(layout::today_marker(&viewport, day(75)).is_none());
    assert_eq!(layout::today_marker(&viewport, day(10)), Some(10.0 * 16.0 + 8.0));
}
