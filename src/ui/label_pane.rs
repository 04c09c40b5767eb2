use crate::board::pane::{PaneMetrics, ScrollState};
use crate::model::Task;
use crate::ui::theme;
use egui::scroll_area::ScrollBarVisibility;
use egui::{Align, Layout, Pos2, Rect, RichText, Sense, Stroke, Ui, UiBuilder, Vec2};
use egui_dnd::dnd;
use uuid::Uuid;

/// Actions that the label pane can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAction {
    None,
    /// Row `active` was dropped where row `over` sat.
    Reorder { active: Uuid, over: Uuid },
    Activate(Uuid),
}

/// What the label pane showed this frame.
pub struct LabelPaneOutput {
    pub state: ScrollState,
    pub metrics: PaneMetrics,
    pub action: LabelAction,
}

/// Left half of the header strip, sized to line up with the day header.
pub fn show_label_header(task_count: usize, ui: &mut Ui) {
    let (rect, _) = ui.allocate_exact_size(
        Vec2::new(ui.available_width(), theme::HEADER_HEIGHT),
        Sense::hover(),
    );
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, theme::BG_HEADER);
    painter.line_segment(
        [rect.left_bottom(), rect.right_bottom()],
        Stroke::new(1.0, theme::BORDER),
    );

    let title = painter.text(
        Pos2::new(rect.left() + 10.0, rect.top() + theme::MONTH_ROW_HEIGHT / 2.0),
        egui::Align2::LEFT_CENTER,
        "Tasks",
        theme::font_month(),
        theme::TEXT_PRIMARY,
    );
    painter.text(
        Pos2::new(title.right() + 6.0, title.center().y),
        egui::Align2::LEFT_CENTER,
        format!("({task_count})"),
        theme::font_day(),
        theme::TEXT_MUTED,
    );
}

/// Render the sortable task label list.
///
/// `write` carries offsets the board wants applied before showing.
pub fn show_label_pane(
    tasks: &[Task],
    row_height: f32,
    write: Option<ScrollState>,
    ui: &mut Ui,
) -> LabelPaneOutput {
    let mut action = LabelAction::None;
    let mut order: Vec<Uuid> = tasks.iter().map(|t| t.id).collect();

    // The canvas carries the only visible scrollbar.
    let mut area = egui::ScrollArea::vertical()
        .id_salt("label_pane_scroll")
        .auto_shrink([false, false])
        .scroll_bar_visibility(ScrollBarVisibility::AlwaysHidden);
    if let Some(write) = write {
        area = area.vertical_scroll_offset(write.top);
    }

    let output = area.show(ui, |ui| {
        ui.spacing_mut().item_spacing = Vec2::ZERO;

        if tasks.is_empty() {
            ui.add_space(12.0);
            ui.horizontal(|ui| {
                ui.add_space(10.0);
                ui.label(RichText::new("No tasks").size(12.0).color(theme::TEXT_MUTED));
            });
            return None;
        }

        let response = dnd(ui, "label_rows").show_vec(&mut order, |ui, id, handle, state| {
            let Some(task) = tasks.iter().find(|t| t.id == *id) else {
                return;
            };

            let (row_rect, response) =
                ui.allocate_exact_size(Vec2::new(ui.available_width(), row_height), Sense::click());
            paint_row_background(ui, row_rect, state.index, state.dragged);

            let mut row_ui = ui.new_child(
                UiBuilder::new()
                    .max_rect(row_rect.shrink2(Vec2::new(8.0, 0.0)))
                    .layout(Layout::left_to_right(Align::Center))
                    .id_salt(("label_row", task.id)),
            );
            row_ui.spacing_mut().item_spacing = Vec2::new(6.0, 0.0);

            handle.ui(&mut row_ui, |ui| {
                ui.label(RichText::new("≡").size(13.0).color(theme::TEXT_MUTED));
            });

            let (dot_rect, _) = row_ui.allocate_exact_size(Vec2::splat(6.0), Sense::hover());
            row_ui
                .painter()
                .circle_filled(dot_rect.center(), 3.0, theme::task_color(task.base_index));

            let title_color = if task.title.is_empty() {
                theme::TEXT_MUTED
            } else {
                theme::TEXT_PRIMARY
            };
            row_ui.add(
                egui::Label::new(
                    RichText::new(task.display_title())
                        .font(theme::font_row())
                        .color(title_color),
                )
                .truncate()
                .selectable(false),
            );

            if response.double_clicked() {
                action = LabelAction::Activate(task.id);
            }
        });
        Some(response)
    });

    if let Some(update) = output.inner.as_ref().and_then(|r| r.final_update()) {
        if let Some((active, over)) = drop_target(tasks, update.from, update.to) {
            action = LabelAction::Reorder { active, over };
        }
    }

    let view = output.inner_rect.size();
    LabelPaneOutput {
        state: ScrollState::new(output.state.offset.x, output.state.offset.y),
        metrics: PaneMetrics::new(view.x, view.y, output.content_size.x, output.content_size.y),
        action,
    }
}

fn paint_row_background(ui: &Ui, rect: Rect, index: usize, dragged: bool) {
    let fill = if dragged {
        theme::BG_DROP_TARGET
    } else if index % 2 == 0 {
        theme::BG_ROW
    } else {
        theme::BG_ROW_ALT
    };
    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, fill);
    painter.line_segment(
        [rect.left_bottom(), rect.right_bottom()],
        Stroke::new(0.5, theme::BORDER),
    );
}

/// The dnd list reports an insertion slot counted before the dragged row
/// is removed; the board wants the row's final index.
fn drop_index(from: usize, slot: usize) -> usize {
    if slot > from {
        slot - 1
    } else {
        slot
    }
}

/// Ids of the dragged row and the row whose place it takes. `None` when the
/// drop leaves the row where it was.
fn drop_target(tasks: &[Task], from: usize, slot: usize) -> Option<(Uuid, Uuid)> {
    let to = drop_index(from, slot);
    if to == from {
        return None;
    }
    let active = tasks.get(from)?.id;
    let over = tasks.get(to)?.id;
    Some((active, over))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<Task> {
        (0..n).map(|i| Task::unscheduled(format!("Row {i}"))).collect()
    }

    #[test]
    fn drop_names_the_displaced_row() {
        let tasks = rows(10);
        assert_eq!(drop_target(&tasks, 2, 6), Some((tasks[2].id, tasks[5].id)));
        assert_eq!(drop_target(&tasks, 7, 0), Some((tasks[7].id, tasks[0].id)));
    }

    #[test]
    fn drop_in_place_or_past_the_end_is_ignored() {
        let tasks = rows(3);
        assert_eq!(drop_target(&tasks, 1, 2), None);
        assert_eq!(drop_target(&tasks, 4, 0), None);
    }

    #[test]
    fn dragging_down_lands_before_the_slot() {
        // row 2 dropped into the gap after row 5
        assert_eq!(drop_index(2, 6), 5);
    }

    #[test]
    fn dragging_up_keeps_the_slot() {
        assert_eq!(drop_index(5, 2), 2);
    }

    #[test]
    fn dropping_in_place_is_a_no_op() {
        assert_eq!(drop_index(3, 3), 3);
        assert_eq!(drop_index(3, 4), 3);
    }
}
