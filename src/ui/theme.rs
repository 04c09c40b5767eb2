use egui::{Color32, FontId, Rounding, Stroke, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_ROW: Color32 = Color32::WHITE;
pub const BG_ROW_ALT: Color32 = Color32::from_rgb(249, 250, 251);
pub const BG_HEADER: Color32 = Color32::from_rgb(252, 252, 253);
pub const BG_STATUS: Color32 = Color32::from_rgb(243, 244, 246);
pub const BG_DROP_TARGET: Color32 = Color32::from_rgba_premultiplied(29, 78, 186, 40);

pub const BORDER: Color32 = Color32::from_rgb(229, 231, 235);
pub const GRID_DAY: Color32 = Color32::from_rgb(243, 244, 246);
pub const GRID_WEEK: Color32 = Color32::from_rgb(209, 213, 219);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(31, 41, 55);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(55, 65, 81);
pub const TEXT_MUTED: Color32 = Color32::from_rgb(107, 114, 128);

pub const TODAY: Color32 = Color32::from_rgb(37, 99, 235);
pub const BAR_FILL: Color32 = Color32::WHITE;
pub const POINT_MARKER: Color32 = Color32::from_rgb(75, 85, 99);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const MONTH_ROW_HEIGHT: f32 = 28.0;
pub const DAY_ROW_HEIGHT: f32 = 24.0;
pub const HEADER_HEIGHT: f32 = MONTH_ROW_HEIGHT + DAY_ROW_HEIGHT;
pub const BAR_INSET: f32 = 6.0;
pub const BAR_RADIUS: f32 = 6.0;
pub const BAR_STRIPE: f32 = 3.0;
pub const STATUS_BAR_HEIGHT: f32 = 22.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_month() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_day() -> FontId {
    FontId::proportional(11.0)
}

pub fn font_bar() -> FontId {
    FontId::proportional(13.0)
}

pub fn font_row() -> FontId {
    FontId::proportional(14.0)
}

// ── Row accents ──────────────────────────────────────────────────────────────

const ROW_ACCENTS: [Color32; 8] = [
    Color32::from_rgb(59, 130, 246),
    Color32::from_rgb(16, 185, 129),
    Color32::from_rgb(139, 92, 246),
    Color32::from_rgb(245, 158, 11),
    Color32::from_rgb(244, 63, 94),
    Color32::from_rgb(6, 182, 212),
    Color32::from_rgb(132, 204, 22),
    Color32::from_rgb(217, 70, 239),
];

/// Accent for a row, keyed by its seed position so it follows the row
/// through reorders.
pub fn task_color(base_index: usize) -> Color32 {
    ROW_ACCENTS[base_index % ROW_ACCENTS.len()]
}

// ── Visuals ──────────────────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::light();
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_ROW;
    visuals.extreme_bg_color = BG_ROW_ALT;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER);
    visuals.widgets.noninteractive.rounding = Rounding::same(BAR_RADIUS);
    visuals.selection.bg_fill = BG_DROP_TARGET;
    visuals.selection.stroke = Stroke::new(1.0, TODAY);
    ctx.set_visuals(visuals);

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(6.0, 0.0);
        style.spacing.scroll.floating = true;
    });
}
