use std::time::Duration;

use chrono::{Local, NaiveDate};
use tracing::info;

use crate::board::{BoardEvent, TimelineBoard};
use crate::config::BoardConfig;
use crate::model::{Direction, Task, Viewport};
use crate::ui;
use crate::ui::label_pane::LabelAction;
use crate::ui::timeline_canvas::{CanvasAction, PanInput};

/// Main application state.
///
/// The app is the host: it owns the viewport and answers the board's
/// extension requests by replacing it.
pub struct TimelineApp {
    pub board: TimelineBoard,
    pub viewport: Viewport,

    // Status message
    pub status_message: String,
}

impl TimelineApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self::with_config(BoardConfig::load_or_default(), Local::now().date_naive())
    }

    pub fn with_config(config: BoardConfig, today: NaiveDate) -> Self {
        let viewport = Viewport::new(
            today - chrono::Duration::days(14),
            today + chrono::Duration::days(70),
        )
        .with_px_per_day(config.px_per_day);
        let tasks = Self::sample_tasks(today);
        info!(
            start = %viewport.start,
            end = %viewport.end,
            tasks = tasks.len(),
            "board opened"
        );

        Self {
            board: TimelineBoard::new(config, viewport.clone(), tasks, today),
            viewport,
            status_message: "Ready".to_string(),
        }
    }

    /// Demonstration rows laid out around `today`.
    fn sample_tasks(today: NaiveDate) -> Vec<Task> {
        let day = |offset: i64| today + chrono::Duration::days(offset);
        let scheduled = [
            ("Kickoff", -10, -7),
            ("Design", -5, 8),
            ("Implementation Phase 1", 2, 18),
            ("Implementation Phase 2", 19, 35),
            ("QA & UAT", 28, 40),
            ("Launch Prep", 36, 45),
            ("Launch", 46, 46),
            ("Post-Launch Monitoring", 47, 60),
            ("Documentation", 5, 25),
            ("Security Audit", 20, 28),
            ("Performance Testing", 30, 38),
            ("User Training", 40, 48),
            ("Data Migration", 15, 22),
            ("API Integration", 10, 20),
            ("Code Review", 25, 30),
            ("Bug Fixes", 35, 42),
            ("Stakeholder Demo", 44, 44),
            ("Retrospective", 55, 56),
        ];

        let mut tasks: Vec<Task> = scheduled
            .iter()
            .map(|&(title, start, end)| Task::new(title, day(start), day(end)))
            .collect();
        tasks.push(Task::unscheduled("Backlog Grooming"));
        tasks
            .into_iter()
            .enumerate()
            .map(|(i, task)| task.with_base_index(i))
            .collect()
    }

    fn task_title(&self, id: uuid::Uuid) -> String {
        self.board
            .tasks()
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.display_title().to_string())
            .unwrap_or_default()
    }

    /// React to something the board asked for or reported.
    pub fn apply_event(&mut self, event: BoardEvent) {
        match event {
            BoardEvent::ExtendViewport(request) => {
                self.viewport = self.viewport.extend(request.direction, request.days);
                self.board.set_viewport(self.viewport.clone());
                let side = match request.direction {
                    Direction::Left => "earlier",
                    Direction::Right => "later",
                };
                info!(
                    direction = ?request.direction,
                    days = request.days,
                    start = %self.viewport.start,
                    end = %self.viewport.end,
                    "viewport extended"
                );
                self.status_message = format!(
                    "Timeline extended {} by {} days ({} → {})",
                    side,
                    request.days,
                    self.viewport.start.format("%Y-%m-%d"),
                    self.viewport.end.format("%Y-%m-%d")
                );
            }
            BoardEvent::OrderChanged(change) => {
                let position = change
                    .ordered_ids
                    .iter()
                    .position(|id| *id == change.moved_id)
                    .map_or(0, |i| i + 1);
                self.status_message = format!(
                    "Moved '{}' to row {}",
                    self.task_title(change.moved_id),
                    position
                );
            }
            BoardEvent::RowActivated(id) => {
                self.status_message = format!("Focused '{}'", self.task_title(id));
            }
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_STATUS)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("Tasks: {}", self.board.tasks().len()))
                                .size(10.5)
                                .color(ui::theme::TEXT_MUTED),
                        );
                        ui.label(
                            egui::RichText::new(" · ")
                                .size(10.5)
                                .color(ui::theme::TEXT_MUTED),
                        );
                        ui.label(
                            egui::RichText::new(format!(
                                "{} – {} ({} days)",
                                self.viewport.start.format("%b %-d, %Y"),
                                self.viewport.end.format("%b %-d, %Y"),
                                self.viewport.days()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_MUTED),
                        );
                    });
                });
            });
    }
}

impl eframe::App for TimelineApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        let now = Duration::from_secs_f64(ctx.input(|i| i.time));
        self.board.set_today(Local::now().date_naive());
        self.board.begin_frame(now);

        self.show_status_bar(ctx);

        let row_height = self.board.config().row_height_px;

        // Left panel: task labels
        let mut label_action = LabelAction::None;
        egui::SidePanel::left("label_pane")
            .exact_width(self.board.config().label_pane_width)
            .resizable(false)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_ROW)
                    .inner_margin(egui::Margin::ZERO)
                    .stroke(egui::Stroke::new(1.0, ui::theme::BORDER)),
            )
            .show(ctx, |ui| {
                ui::label_pane::show_label_header(self.board.tasks().len(), ui);
                let write = self.board.take_label_write();
                let output =
                    ui::label_pane::show_label_pane(self.board.tasks(), row_height, write, ui);
                self.board.report_label_pane(output.state, output.metrics);
                label_action = output.action;
            });

        match label_action {
            LabelAction::Reorder { active, over } => {
                self.board.reorder_by_id(active, over);
            }
            LabelAction::Activate(id) => {
                self.board.activate_row(id, now);
            }
            LabelAction::None => {}
        }

        // Central panel: header strip and bar canvas
        let mut canvas_action = CanvasAction::None;
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_ROW)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| {
            let write = self.board.take_canvas_write();
            let header = ui::timeline_canvas::reserve_timeline_header(ui);
            let output = ui::timeline_canvas::show_timeline_canvas(
                self.board.viewport(),
                self.board.tasks(),
                self.board.layout(),
                row_height,
                write,
                self.board.is_panning(),
                ui,
            );
            self.board.report_canvas_pane(output.state, output.metrics, now);
            // Offset the canvas showed, not one a pan below may queue.
            ui::timeline_canvas::paint_timeline_header(
                self.board.viewport(),
                self.board.layout(),
                self.board.today(),
                output.state.left,
                header,
                ui,
            );

            match output.pan {
                Some(PanInput::Start(source, pos)) => {
                    self.board.pan_start(source, pos);
                }
                Some(PanInput::Move(pos)) => self.board.pan_move(pos, now),
                Some(PanInput::End) => {
                    self.board.pan_end();
                }
                None => {}
            }
            canvas_action = output.action;
        });

        if let CanvasAction::FocusBar(id) = canvas_action {
            self.board.scroll_to_task(id, now);
        }

        for event in self.board.drain_events() {
            self.apply_event(event);
        }

        if self.board.needs_frame() {
            ctx.request_repaint();
        }
        if let Some(deadline) = self.board.next_wakeup() {
            ctx.request_repaint_after(deadline.saturating_sub(now));
        }
    }
}
