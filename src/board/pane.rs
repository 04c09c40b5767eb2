/// Scroll offsets of one pane.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollState {
    pub left: f32,
    pub top: f32,
}

impl ScrollState {
    pub fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }
}

/// Measured geometry of a mounted scroll container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaneMetrics {
    pub view_width: f32,
    pub view_height: f32,
    pub content_width: f32,
    pub content_height: f32,
}

impl PaneMetrics {
    pub fn new(view_width: f32, view_height: f32, content_width: f32, content_height: f32) -> Self {
        Self {
            view_width,
            view_height,
            content_width,
            content_height,
        }
    }

    pub fn max_left(&self) -> f32 {
        (self.content_width - self.view_width).max(0.0)
    }

    pub fn max_top(&self) -> f32 {
        (self.content_height - self.view_height).max(0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneKind {
    Label,
    Canvas,
}

/// One of the board's two scroll containers.
///
/// Offsets written by the board are kept as a pending write until the UI
/// takes it and pushes it into its scroll widget.
#[derive(Debug, Clone, Default)]
pub struct ScrollPane {
    state: ScrollState,
    metrics: Option<PaneMetrics>,
    pending_write: bool,
}

impl ScrollPane {
    pub fn state(&self) -> ScrollState {
        self.state
    }

    pub fn metrics(&self) -> Option<PaneMetrics> {
        self.metrics
    }

    /// Geometry has been measured at least once.
    pub fn is_mounted(&self) -> bool {
        self.metrics.is_some()
    }

    pub fn set_metrics(&mut self, metrics: PaneMetrics) {
        self.metrics = Some(metrics);
    }

    /// Record the offsets the widget reports. Returns whether they moved.
    ///
    /// Reports are stale while a write is still waiting to be pushed.
    pub fn observe(&mut self, state: ScrollState) -> bool {
        if self.pending_write {
            return false;
        }
        let moved = state != self.state;
        self.state = state;
        moved
    }

    /// Content grew or shrank without a fresh measurement (viewport change).
    pub fn set_content_width(&mut self, width: f32) {
        if let Some(metrics) = self.metrics.as_mut() {
            metrics.content_width = width;
        }
    }

    pub fn write_left(&mut self, left: f32) {
        let left = match self.metrics {
            Some(m) => left.clamp(0.0, m.max_left()),
            None => left.max(0.0),
        };
        if left != self.state.left {
            self.state.left = left;
            self.pending_write = true;
        }
    }

    pub fn write_top(&mut self, top: f32) {
        let top = match self.metrics {
            Some(m) => top.clamp(0.0, m.max_top()),
            None => top.max(0.0),
        };
        if top != self.state.top {
            self.state.top = top;
            self.pending_write = true;
        }
    }

    /// Offsets the UI must apply before showing the pane this frame.
    pub fn take_write(&mut self) -> Option<ScrollState> {
        if std::mem::take(&mut self.pending_write) {
            Some(self.state)
        } else {
            None
        }
    }

    pub fn has_pending_write(&self) -> bool {
        self.pending_write
    }
}
