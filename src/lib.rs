//! Two-pane Gantt timeline board for egui.
//!
//! The [`board`] module is the headless core: it owns scroll state, vertical
//! sync, the self-extending viewport and row reordering, and is driven with
//! explicit timestamps and frame ticks. [`ui`] and [`app`] wire it to eframe.

pub mod app;
pub mod board;
pub mod config;
pub mod error;
pub mod model;
pub mod ui;

pub use board::{BoardEvent, TimelineBoard};
pub use config::BoardConfig;
pub use model::{Direction, Task, Viewport};
