use egui::{PointerButton, Pos2};
use tracing::trace;

use super::pane::ScrollState;

/// What pressed on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    Mouse(PointerButton),
    Touch,
}

impl PointerSource {
    fn can_pan(self) -> bool {
        matches!(self, PointerSource::Touch | PointerSource::Mouse(PointerButton::Primary))
    }
}

#[derive(Debug, Clone, Copy)]
struct PanSession {
    origin: Pos2,
    start: ScrollState,
}

/// Grab-and-drag panning of the canvas.
///
/// The content follows the pointer, so offsets move opposite to it.
#[derive(Debug, Default)]
pub struct PanController {
    session: Option<PanSession>,
}

impl PanController {
    /// Start a pan. Returns whether the pointer was captured.
    pub fn pointer_down(&mut self, source: PointerSource, pos: Pos2, current: ScrollState) -> bool {
        if !source.can_pan() {
            return false;
        }
        trace!(?source, ?pos, "pan started");
        self.session = Some(PanSession {
            origin: pos,
            start: current,
        });
        true
    }

    /// Offsets for the current pointer position, if panning.
    pub fn pointer_move(&self, pos: Pos2) -> Option<ScrollState> {
        let session = self.session?;
        let delta = pos - session.origin;
        Some(ScrollState {
            left: session.start.left - delta.x,
            top: session.start.top - delta.y,
        })
    }

    /// The canvas origin moved under an active pan; keep the grab point.
    pub fn rebase(&mut self, dx: f32) {
        if let Some(session) = self.session.as_mut() {
            session.start.left += dx;
        }
    }

    /// Release the pointer. Returns whether a pan was active.
    pub fn pointer_up(&mut self) -> bool {
        self.session.take().is_some()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }
}
