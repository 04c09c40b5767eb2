//! Edge-extension state machine.
//!
//! Scrolling near either end of the calendar window asks the host for more
//! days. A left extension moves the coordinate origin, so the controller
//! remembers how far and pushes the canvas right by the same amount once the
//! wider content has been painted.
//!
//! ```text
//! Idle --(debounce fires, edge still near)--> ExtensionPending
//!      --> ExtensionInFlight --(host moved the bound)--> AdjustingScroll
//!      --(adjust frame, settle frame)--> Idle
//! ```
//!
//! Only `Idle` looks at scroll positions, which keeps a single request
//! outstanding at any time.

use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::model::{Direction, Viewport};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeConfig {
    /// Distance from either end that counts as "at the edge".
    pub threshold_px: f32,
    /// Days requested per extension.
    pub extend_days: u32,
    pub debounce: Duration,
    /// How long to wait for the host to apply a request before giving up.
    pub request_timeout: Duration,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            threshold_px: 100.0,
            extend_days: 30,
            debounce: Duration::from_millis(50),
            request_timeout: Duration::from_millis(1000),
        }
    }
}

/// Horizontal scroll position of the canvas as seen by one event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeProbe {
    pub scroll_left: f32,
    pub view_width: f32,
    pub scroll_width: f32,
}

impl EdgeProbe {
    /// The edge this position is close to. Left wins when both are.
    pub fn edge(&self, threshold: f32) -> Option<Direction> {
        let at_left = self.scroll_left < threshold;
        let at_right = self.scroll_left + self.view_width > self.scroll_width - threshold;
        if at_left {
            Some(Direction::Left)
        } else if at_right {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

/// A request for the host to grow its viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionRequest {
    pub direction: Direction,
    pub days: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustPhase {
    /// New content is laid out; the offset fix goes out on the next frame.
    AwaitingPaint,
    /// Fix applied; one more frame for layout to settle.
    Settling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtensionState {
    Idle,
    ExtensionPending(Direction),
    ExtensionInFlight(Direction),
    AdjustingScroll(Direction, AdjustPhase),
}

#[derive(Debug)]
pub struct EdgeExtensionController {
    config: EdgeConfig,
    state: ExtensionState,
    debounce_deadline: Option<Duration>,
    latest: Option<EdgeProbe>,
    pending_adjustment: Option<f32>,
    /// Viewport the in-flight request was issued against.
    baseline: Option<Viewport>,
    requested_at: Option<Duration>,
}

impl EdgeExtensionController {
    pub fn new(config: EdgeConfig) -> Self {
        Self {
            config,
            state: ExtensionState::Idle,
            debounce_deadline: None,
            latest: None,
            pending_adjustment: None,
            baseline: None,
            requested_at: None,
        }
    }

    pub fn state(&self) -> ExtensionState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == ExtensionState::Idle
    }

    pub fn pending_adjustment(&self) -> Option<f32> {
        self.pending_adjustment
    }

    /// Next instant at which [`advance`](Self::advance) has work to do.
    pub fn next_deadline(&self) -> Option<Duration> {
        match self.state {
            ExtensionState::Idle => self.debounce_deadline,
            ExtensionState::ExtensionInFlight(_) => {
                self.requested_at.map(|at| at + self.config.request_timeout)
            }
            _ => None,
        }
    }

    /// A scroll or pan moved the canvas.
    pub fn observe_scroll(&mut self, probe: EdgeProbe, now: Duration) {
        if !self.is_idle() {
            trace!(state = ?self.state, "edge check skipped while extending");
            return;
        }

        self.latest = Some(probe);
        if probe.edge(self.config.threshold_px).is_some() {
            self.debounce_deadline = Some(now + self.config.debounce);
        }
    }

    /// Fire due timers. Returns the request to hand to the host, if any.
    pub fn advance(&mut self, now: Duration, viewport: &Viewport) -> Option<ExtensionRequest> {
        match self.state {
            ExtensionState::Idle => {
                let deadline = self.debounce_deadline?;
                if now < deadline {
                    return None;
                }
                self.debounce_deadline = None;

                let threshold = self.config.threshold_px;
                let Some(direction) = self.latest.and_then(|p| p.edge(threshold)) else {
                    debug!("edge no longer near after debounce");
                    return None;
                };
                self.enter_pending(direction, viewport);
                Some(self.dispatch(direction, viewport, now))
            }
            ExtensionState::ExtensionInFlight(direction) => {
                let requested_at = self.requested_at?;
                if now < requested_at + self.config.request_timeout {
                    return None;
                }
                warn!(?direction, "viewport extension was never applied; giving up");
                self.reset();
                None
            }
            _ => None,
        }
    }

    fn enter_pending(&mut self, direction: Direction, viewport: &Viewport) {
        self.state = ExtensionState::ExtensionPending(direction);
        self.pending_adjustment = match direction {
            Direction::Left => Some(self.config.extend_days as f32 * viewport.px_per_day),
            Direction::Right => None,
        };
    }

    fn dispatch(
        &mut self,
        direction: Direction,
        viewport: &Viewport,
        now: Duration,
    ) -> ExtensionRequest {
        let request = ExtensionRequest {
            direction,
            days: self.config.extend_days,
        };
        self.baseline = Some(viewport.clone());
        self.requested_at = Some(now);
        self.state = ExtensionState::ExtensionInFlight(direction);
        debug!(
            ?direction,
            days = request.days,
            adjustment = ?self.pending_adjustment,
            "requesting viewport extension"
        );
        request
    }

    /// The host handed the board a viewport. Confirms an in-flight request
    /// once the requested bound has actually moved.
    pub fn observe_viewport(&mut self, viewport: &Viewport) {
        let ExtensionState::ExtensionInFlight(direction) = self.state else {
            return;
        };
        let Some(baseline) = self.baseline.as_ref() else {
            return;
        };

        let confirmed = match direction {
            Direction::Left => viewport.start < baseline.start,
            Direction::Right => viewport.end > baseline.end,
        };
        if confirmed {
            debug!(?direction, "viewport extension applied");
            self.state = ExtensionState::AdjustingScroll(direction, AdjustPhase::AwaitingPaint);
            self.baseline = None;
            self.requested_at = None;
        }
    }

    /// Frame tick. Returns the horizontal offset correction to apply now.
    pub fn on_frame(&mut self) -> Option<f32> {
        match self.state {
            ExtensionState::AdjustingScroll(direction, AdjustPhase::AwaitingPaint) => {
                self.state = ExtensionState::AdjustingScroll(direction, AdjustPhase::Settling);
                self.pending_adjustment.take()
            }
            ExtensionState::AdjustingScroll(_, AdjustPhase::Settling) => {
                self.reset();
                None
            }
            _ => None,
        }
    }

    /// Drop every timer and any half-finished extension.
    pub fn cancel(&mut self) {
        if !self.is_idle() || self.debounce_deadline.is_some() {
            debug!(state = ?self.state, "edge controller cancelled");
        }
        self.reset();
    }

    fn reset(&mut self) {
        self.state = ExtensionState::Idle;
        self.debounce_deadline = None;
        self.latest = None;
        self.pending_adjustment = None;
        self.baseline = None;
        self.requested_at = None;
    }
}
