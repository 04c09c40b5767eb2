pub mod label_pane;
pub mod theme;
pub mod timeline_canvas;
