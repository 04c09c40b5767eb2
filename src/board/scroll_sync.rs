//! Vertical mirroring between the label pane and the canvas pane.
//!
//! Scroll events carry no origin, so a mirrored write would come back as a
//! fresh event on the other pane. A one-shot token is taken before the write
//! and handed back on the next frame; events seen while it is held are not
//! mirrored.

use tracing::trace;

use super::pane::{PaneKind, ScrollPane};

/// One-shot token that stays held until the next frame tick.
#[derive(Debug, Default)]
pub struct ReentrancyGuard {
    held: bool,
}

impl ReentrancyGuard {
    /// Take the token. Returns `false` if it is already held.
    pub fn try_acquire(&mut self) -> bool {
        if self.held {
            return false;
        }
        self.held = true;
        true
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn release(&mut self) {
        self.held = false;
    }
}

#[derive(Debug, Default)]
pub struct ScrollSynchronizer {
    guard: ReentrancyGuard,
}

impl ScrollSynchronizer {
    /// React to a user scroll of `source`. Returns whether the other pane was
    /// written.
    pub fn on_scroll(
        &mut self,
        source: PaneKind,
        label: &mut ScrollPane,
        canvas: &mut ScrollPane,
    ) -> bool {
        let (from, to) = match source {
            PaneKind::Label => (&*label, canvas),
            PaneKind::Canvas => (&*canvas, label),
        };

        if self.guard.is_held() {
            trace!(?source, "scroll sync suppressed");
            return false;
        }
        if !to.is_mounted() {
            return false;
        }

        let top = from.state().top;
        if to.state().top == top {
            return false;
        }

        self.guard.try_acquire();
        to.write_top(top);
        trace!(?source, top, "mirrored vertical offset");
        true
    }

    /// Frame tick: the mirrored write has been delivered.
    pub fn on_frame(&mut self) {
        self.guard.release();
    }

    pub fn is_syncing(&self) -> bool {
        self.guard.is_held()
    }
}
