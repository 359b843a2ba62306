// Horizontal swipe recognition for list and item rows
//
// A recognizer is a small state machine fed discrete pointer events. It owns
// no UI; callers read `offset()` and `transition()` to draw the row and act
// on the binding returned when a gesture ends past the commit threshold.

use tracing::debug;

/// Movement in both axes at or below this stays undecided
pub const AXIS_LOCK_THRESHOLD: f64 = 5.0;
/// Largest visual offset in either direction
pub const MAX_SWIPE: f64 = 80.0;
/// Offset magnitude that must be exceeded on release to commit
pub const COMMIT_THRESHOLD: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    pub axis_lock_threshold: f64,
    pub max_swipe: f64,
    pub commit_threshold: f64,
}

impl SwipeConfig {
    /// Magnitudes of the configured values; a NaN or infinite value falls
    /// back to its default.
    pub fn sanitized(self) -> Self {
        fn magnitude(value: f64, fallback: f64) -> f64 {
            if value.is_finite() { value.abs() } else { fallback }
        }
        Self {
            axis_lock_threshold: magnitude(self.axis_lock_threshold, AXIS_LOCK_THRESHOLD),
            max_swipe: magnitude(self.max_swipe, MAX_SWIPE),
            commit_threshold: magnitude(self.commit_threshold, COMMIT_THRESHOLD),
        }
    }
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            axis_lock_threshold: AXIS_LOCK_THRESHOLD,
            max_swipe: MAX_SWIPE,
            commit_threshold: COMMIT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

/// Whatever a row wants to happen for each direction. A missing side means
/// the row cannot be dragged that way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwipeBindings<A> {
    pub left: Option<A>,
    pub right: Option<A>,
}

impl<A> SwipeBindings<A> {
    pub fn new(left: Option<A>, right: Option<A>) -> Self {
        Self { left, right }
    }

    pub fn get(&self, direction: SwipeDirection) -> Option<&A> {
        match direction {
            SwipeDirection::Left => self.left.as_ref(),
            SwipeDirection::Right => self.right.as_ref(),
        }
    }

    fn allows(&self, offset: f64) -> bool {
        if offset < 0.0 {
            self.left.is_some()
        } else if offset > 0.0 {
            self.right.is_some()
        } else {
            true
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Undecided,
    HorizontalDrag,
    VerticalDrag,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Start { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    End,
}

/// How the row should animate to the current offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Follow the pointer with no animation
    Instant,
    /// Ease back after release
    Eased,
}

/// Response to a move event
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragUpdate {
    pub offset: f64,
    /// The host should cancel native scrolling for this event
    pub suppress_scroll: bool,
}

#[derive(Debug, Clone)]
pub struct SwipeRecognizer<A> {
    bindings: SwipeBindings<A>,
    config: SwipeConfig,
    disabled: bool,
    phase: Phase,
    start_x: f64,
    start_y: f64,
    offset: f64,
    dragging: bool,
}

impl<A: Clone> SwipeRecognizer<A> {
    pub fn new(bindings: SwipeBindings<A>) -> Self {
        Self::with_config(bindings, SwipeConfig::default())
    }

    pub fn with_config(bindings: SwipeBindings<A>, config: SwipeConfig) -> Self {
        Self {
            bindings,
            config: config.sanitized(),
            disabled: false,
            phase: Phase::Idle,
            start_x: 0.0,
            start_y: 0.0,
            offset: 0.0,
            dragging: false,
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.reset();
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn transition(&self) -> Transition {
        if self.dragging {
            Transition::Instant
        } else {
            Transition::Eased
        }
    }

    pub fn start(&mut self, x: f64, y: f64) {
        if self.disabled {
            return;
        }
        self.start_x = x;
        self.start_y = y;
        self.offset = 0.0;
        self.dragging = false;
        self.phase = Phase::Undecided;
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> DragUpdate {
        if self.disabled || self.phase == Phase::Idle {
            return self.update(false);
        }

        let dx = x - self.start_x;
        let dy = y - self.start_y;

        if self.phase == Phase::Undecided {
            let threshold = self.config.axis_lock_threshold;
            if dx.abs() <= threshold && dy.abs() <= threshold {
                return self.update(false);
            }
            self.phase = if dx.abs() > dy.abs() {
                Phase::HorizontalDrag
            } else {
                Phase::VerticalDrag
            };
            debug!(phase = ?self.phase, dx, dy, "Swipe axis locked");
        }

        if self.phase == Phase::VerticalDrag {
            return self.update(false);
        }

        self.dragging = true;
        let clamped = dx.clamp(-self.config.max_swipe, self.config.max_swipe);
        self.offset = if self.bindings.allows(clamped) { clamped } else { 0.0 };
        self.update(true)
    }

    /// Finish the gesture. Returns the committed binding, if any.
    pub fn end(&mut self) -> Option<A> {
        if self.disabled {
            return None;
        }

        let threshold = self.config.commit_threshold;
        let direction = if self.offset < -threshold {
            Some(SwipeDirection::Left)
        } else if self.offset > threshold {
            Some(SwipeDirection::Right)
        } else {
            None
        };
        let committed = direction.and_then(|d| self.bindings.get(d).cloned());
        if committed.is_some() {
            debug!(?direction, offset = self.offset, "Swipe committed");
        }

        self.reset();
        committed
    }

    /// Feed one event; only `End` can produce a commit
    pub fn handle(&mut self, event: PointerEvent) -> Option<A> {
        match event {
            PointerEvent::Start { x, y } => {
                self.start(x, y);
                None
            }
            PointerEvent::Move { x, y } => {
                self.move_to(x, y);
                None
            }
            PointerEvent::End => self.end(),
        }
    }

    /// Feed a scripted sequence, returning the last commit
    pub fn run<I>(&mut self, events: I) -> Option<A>
    where
        I: IntoIterator<Item = PointerEvent>,
    {
        events.into_iter().fold(None, |last, event| self.handle(event).or(last))
    }

    fn update(&self, suppress_scroll: bool) -> DragUpdate {
        DragUpdate {
            offset: self.offset,
            suppress_scroll,
        }
    }

    fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.offset = 0.0;
        self.dragging = false;
    }
}

/// Start at the origin, move to `(dx, dy)`, release
pub fn drag_script(dx: f64, dy: f64) -> Vec<PointerEvent> {
    vec![
        PointerEvent::Start { x: 0.0, y: 0.0 },
        PointerEvent::Move { x: dx, y: dy },
        PointerEvent::End,
    ]
}
