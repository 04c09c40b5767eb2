use crate::board::layout::{self, BarGeometry, BoardLayout};
use crate::board::pan::PointerSource;
use crate::board::pane::{PaneMetrics, ScrollState};
use crate::model::{Task, Viewport};
use crate::ui::theme;
use egui::{Color32, PointerButton, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};
use uuid::Uuid;

/// Widest a point-task pill may grow.
const PILL_MAX_WIDTH: f32 = 384.0;

/// Actions that the canvas can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasAction {
    None,
    /// A bar was double-clicked; center it.
    FocusBar(Uuid),
}

/// Pointer gesture on the canvas surface, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanInput {
    Start(PointerSource, Pos2),
    Move(Pos2),
    End,
}

/// What the canvas showed this frame.
pub struct CanvasOutput {
    pub state: ScrollState,
    pub metrics: PaneMetrics,
    pub pan: Option<PanInput>,
    pub action: CanvasAction,
}

/// Claim the header strip above the canvas. It is painted once the canvas
/// has reported this frame's offset.
pub fn reserve_timeline_header(ui: &mut Ui) -> Rect {
    let (rect, _) = ui.allocate_exact_size(
        Vec2::new(ui.available_width(), theme::HEADER_HEIGHT),
        Sense::hover(),
    );
    rect
}

/// Month row and day row in `rect`, shifted by the canvas offset.
pub fn paint_timeline_header(
    viewport: &Viewport,
    board_layout: &BoardLayout,
    today: chrono::NaiveDate,
    scroll_left: f32,
    rect: Rect,
    ui: &Ui,
) {
    let painter = ui.painter_at(rect);
    let origin_x = rect.left() - scroll_left;
    let month_bottom = rect.top() + theme::MONTH_ROW_HEIGHT;

    painter.rect_filled(rect, 0.0, theme::BG_HEADER);

    // Month row
    for span in layout::month_spans(viewport) {
        let x = origin_x + span.left;
        if x + span.width < rect.left() || x > rect.right() {
            continue;
        }
        painter.line_segment(
            [Pos2::new(x, rect.top()), Pos2::new(x, month_bottom)],
            Stroke::new(1.0, theme::BORDER),
        );
        let cell = Rect::from_min_max(
            Pos2::new(x, rect.top()),
            Pos2::new(x + span.width, month_bottom),
        )
        .intersect(rect);
        painter.with_clip_rect(cell).text(
            Pos2::new(x.max(rect.left()) + 8.0, rect.top() + theme::MONTH_ROW_HEIGHT / 2.0),
            egui::Align2::LEFT_CENTER,
            &span.label,
            theme::font_month(),
            theme::TEXT_PRIMARY,
        );
    }

    // Day row: numbers only at week starts
    let px = viewport.px_per_day;
    for column in layout::grid_lines(viewport) {
        let x = origin_x + column.left;
        if x + px < rect.left() || x > rect.right() {
            continue;
        }
        let color = if column.is_week_start {
            theme::GRID_WEEK
        } else {
            theme::GRID_DAY
        };
        painter.line_segment(
            [Pos2::new(x, month_bottom), Pos2::new(x, rect.bottom())],
            Stroke::new(0.5, color),
        );
        if column.is_week_start {
            painter.text(
                Pos2::new(x + px / 2.0, month_bottom + theme::DAY_ROW_HEIGHT / 2.0),
                egui::Align2::CENTER_CENTER,
                column.date.format("%-d").to_string(),
                theme::font_day(),
                theme::TEXT_SECONDARY,
            );
        }
    }

    if let Some(marker) = board_layout.today_marker {
        let x = origin_x + marker;
        painter.line_segment(
            [Pos2::new(x, rect.top()), Pos2::new(x, rect.bottom())],
            Stroke::new(1.0, theme::TODAY),
        );

        let badge_center = Pos2::new(x, month_bottom + theme::DAY_ROW_HEIGHT / 2.0);
        let badge = Rect::from_center_size(badge_center, Vec2::new(26.0, 18.0));
        painter.rect_filled(badge, Rounding::same(8.0), theme::TODAY);
        painter.text(
            badge_center,
            egui::Align2::CENTER_CENTER,
            today.format("%-d").to_string(),
            theme::font_day(),
            Color32::WHITE,
        );
        painter.circle_filled(Pos2::new(x, rect.bottom() - 1.0), 3.0, theme::TODAY);
    }

    painter.line_segment(
        [rect.left_bottom(), rect.right_bottom()],
        Stroke::new(1.0, theme::BORDER),
    );
}

/// Render the scrollable bar canvas.
///
/// Native drag-to-scroll is off; dragging is reported as [`PanInput`] so
/// the board can drive the offsets and watch the edges.
pub fn show_timeline_canvas(
    viewport: &Viewport,
    tasks: &[Task],
    board_layout: &BoardLayout,
    row_height: f32,
    write: Option<ScrollState>,
    panning: bool,
    ui: &mut Ui,
) -> CanvasOutput {
    let mut action = CanvasAction::None;
    let mut pan = None;
    let view_height = ui.available_height();

    let mut area = egui::ScrollArea::both()
        .id_salt("timeline_canvas_scroll")
        .auto_shrink([false, false])
        .drag_to_scroll(false);
    if let Some(write) = write {
        area = area
            .horizontal_scroll_offset(write.left)
            .vertical_scroll_offset(write.top);
    }

    let output = area.show(ui, |ui| {
        let height = board_layout.total_height.max(view_height);
        let (response, painter) = ui.allocate_painter(
            Vec2::new(board_layout.total_width, height),
            Sense::click_and_drag(),
        );
        let origin = response.rect.min;
        let visible = ui.clip_rect();

        painter.rect_filled(response.rect, 0.0, theme::BG_ROW);

        // Row backgrounds
        for row in &board_layout.rows {
            let y = origin.y + row.top;
            if y + row_height < visible.top() || y > visible.bottom() {
                continue;
            }
            let fill = if row.row_index % 2 == 0 {
                theme::BG_ROW
            } else {
                theme::BG_ROW_ALT
            };
            let row_rect = Rect::from_min_size(
                Pos2::new(origin.x, y),
                Vec2::new(board_layout.total_width, row_height),
            );
            painter.rect_filled(row_rect, 0.0, fill);
            painter.line_segment(
                [row_rect.left_bottom(), row_rect.right_bottom()],
                Stroke::new(0.5, theme::BORDER),
            );
        }

        // Day grid
        for column in layout::grid_lines(viewport) {
            let x = origin.x + column.left;
            if x < visible.left() - viewport.px_per_day || x > visible.right() {
                continue;
            }
            let color = if column.is_week_start {
                theme::GRID_WEEK
            } else {
                theme::GRID_DAY
            };
            painter.line_segment(
                [Pos2::new(x, response.rect.top()), Pos2::new(x, response.rect.bottom())],
                Stroke::new(0.5, color),
            );
        }

        if let Some(marker) = board_layout.today_marker {
            let x = origin.x + marker;
            painter.line_segment(
                [Pos2::new(x, response.rect.top()), Pos2::new(x, response.rect.bottom())],
                Stroke::new(1.0, theme::TODAY),
            );
        }

        // Bars
        let mut hit_boxes: Vec<(Rect, Uuid)> = Vec::new();
        for row in &board_layout.rows {
            let (Some(bar), Some(task)) = (row.bar.as_ref(), tasks.get(row.row_index)) else {
                continue;
            };
            let top = origin.y + row.top + theme::BAR_INSET;
            if top > visible.bottom() || top + row_height < visible.top() {
                continue;
            }
            let bar_rect = if bar.is_point {
                draw_point_pill(&painter, origin.x, top, row_height, bar, task)
            } else {
                draw_range_bar(&painter, origin.x, top, row_height, bar, task)
            };
            hit_boxes.push((bar_rect, task.id));
        }

        if response.double_clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                if let Some((_, id)) = hit_boxes.iter().find(|(rect, _)| rect.contains(pos)) {
                    action = CanvasAction::FocusBar(*id);
                }
            }
        }

        if response.drag_started() {
            if let Some(pos) = response.interact_pointer_pos() {
                pan = Some(PanInput::Start(pointer_source(ui, &response), pos));
            }
        } else if response.dragged() && panning {
            if let Some(pos) = response.interact_pointer_pos() {
                pan = Some(PanInput::Move(pos));
            }
        }
        if response.drag_stopped() {
            pan = Some(PanInput::End);
        }

        if panning {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
        } else if response.hovered() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
        }
    });

    let view = output.inner_rect.size();
    CanvasOutput {
        state: ScrollState::new(output.state.offset.x, output.state.offset.y),
        metrics: PaneMetrics::new(view.x, view.y, output.content_size.x, output.content_size.y),
        pan,
        action,
    }
}

fn pointer_source(ui: &Ui, response: &egui::Response) -> PointerSource {
    if ui.input(|i| i.any_touches()) {
        return PointerSource::Touch;
    }
    [
        PointerButton::Primary,
        PointerButton::Secondary,
        PointerButton::Middle,
        PointerButton::Extra1,
        PointerButton::Extra2,
    ]
    .into_iter()
    .find(|button| response.dragged_by(*button))
    .map_or(PointerSource::Mouse(PointerButton::Primary), PointerSource::Mouse)
}

fn draw_range_bar(
    painter: &egui::Painter,
    origin_x: f32,
    top: f32,
    row_height: f32,
    bar: &BarGeometry,
    task: &Task,
) -> Rect {
    let rect = Rect::from_min_size(
        Pos2::new(origin_x + bar.left, top),
        Vec2::new(bar.width, row_height - 2.0 * theme::BAR_INSET),
    );
    let radius = Rounding::same(theme::BAR_RADIUS);

    painter.rect_filled(
        rect.translate(Vec2::new(0.0, 1.0)),
        radius,
        Color32::from_black_alpha(18),
    );
    painter.rect(rect, radius, theme::BAR_FILL, Stroke::new(1.0, theme::BORDER));

    // Accent stripe on the leading edge
    let stripe = Rect::from_min_size(
        rect.min,
        Vec2::new(theme::BAR_STRIPE.min(rect.width()), rect.height()),
    );
    painter.rect_filled(
        stripe,
        Rounding {
            nw: theme::BAR_RADIUS,
            sw: theme::BAR_RADIUS,
            ne: 0.0,
            se: 0.0,
        },
        theme::task_color(task.base_index),
    );

    painter.with_clip_rect(rect.shrink(2.0)).text(
        Pos2::new(rect.left() + theme::BAR_STRIPE + 6.0, rect.center().y),
        egui::Align2::LEFT_CENTER,
        &task.title,
        theme::font_bar(),
        theme::TEXT_PRIMARY,
    );
    rect
}

/// Single-day task: diamond, start date, divider and title in a pill.
fn draw_point_pill(
    painter: &egui::Painter,
    origin_x: f32,
    top: f32,
    row_height: f32,
    bar: &BarGeometry,
    task: &Task,
) -> Rect {
    let height = row_height - 2.0 * theme::BAR_INSET;
    let left = origin_x + bar.left;
    let center_y = top + height / 2.0;

    let date = painter.layout_no_wrap(
        bar.start.format("%b %-d").to_string(),
        theme::font_bar(),
        theme::TEXT_PRIMARY,
    );
    let title = painter.layout_no_wrap(
        task.display_title().to_string(),
        theme::font_bar(),
        theme::TEXT_SECONDARY,
    );

    let diamond = 4.0;
    let gap = 6.0;
    let content = 2.0 * diamond + gap + date.size().x + gap + 1.0 + gap + title.size().x;
    let width = (content + 16.0).min(PILL_MAX_WIDTH);
    let rect = Rect::from_min_size(Pos2::new(left, top), Vec2::new(width, height));

    painter.rect(
        rect,
        Rounding::same(theme::BAR_RADIUS),
        theme::BAR_FILL,
        Stroke::new(1.0, theme::BORDER),
    );

    let inner = painter.with_clip_rect(rect.shrink(1.0));
    let mut x = rect.left() + 8.0;
    let center = Pos2::new(x + diamond, center_y);
    inner.add(egui::Shape::convex_polygon(
        vec![
            center + Vec2::new(0.0, -diamond),
            center + Vec2::new(diamond, 0.0),
            center + Vec2::new(0.0, diamond),
            center + Vec2::new(-diamond, 0.0),
        ],
        theme::POINT_MARKER,
        Stroke::NONE,
    ));
    x += 2.0 * diamond + gap;

    let date_width = date.size().x;
    inner.galley(Pos2::new(x, center_y - date.size().y / 2.0), date, theme::TEXT_PRIMARY);
    x += date_width + gap;

    inner.line_segment(
        [Pos2::new(x, center_y - 6.0), Pos2::new(x, center_y + 6.0)],
        Stroke::new(1.0, theme::BORDER),
    );
    x += 1.0 + gap;

    inner.galley(Pos2::new(x, center_y - title.size().y / 2.0), title, theme::TEXT_SECONDARY);
    rect
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    #[test]
    fn header_follows_offset_shown_in_the_same_frame() {
        let day0 = NaiveDate::from_ymd_opt(2025, 3, 3).unwrap();
        let viewport = Viewport::new(day0, day0 + Duration::days(74)).with_px_per_day(16.0);
        let board_layout = layout::layout(&viewport, &[], day0, 40.0);

        let ctx = egui::Context::default();
        let input = egui::RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))),
            ..Default::default()
        };

        let mut seen = None;
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let header = reserve_timeline_header(ui);
                let output = show_timeline_canvas(
                    &viewport,
                    &[],
                    &board_layout,
                    40.0,
                    Some(ScrollState::new(300.0, 0.0)),
                    false,
                    ui,
                );
                paint_timeline_header(
                    &viewport,
                    &board_layout,
                    day0,
                    output.state.left,
                    header,
                    ui,
                );
                seen = Some((header, output.state.left));
            });
        });

        let (header, left) = seen.unwrap();
        assert_eq!(header.height(), theme::HEADER_HEIGHT);
        assert_eq!(left, 300.0);
    }
}
