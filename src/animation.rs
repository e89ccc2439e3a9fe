//! Transition animator for track movement between slides.

use crate::position::{Direction, SlidePosition};
use crate::FrameTiming;

/// Result of advancing a transition by one display refresh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransitionStep {
    /// Still moving; the track should be drawn at this offset
    Moving(f64),
    /// Reached the target; offset is exactly `target * 100`
    Settled(f64),
}

impl TransitionStep {
    #[inline]
    pub fn offset(self) -> f64 {
        match self {
            TransitionStep::Moving(offset) | TransitionStep::Settled(offset) => offset,
        }
    }

    #[inline]
    pub fn is_settled(self) -> bool {
        matches!(self, TransitionStep::Settled(_))
    }
}

/// An in-flight movement of the track towards one slide.
///
/// Like the rest of this crate the transition does not own a clock. The
/// host calls [`Transition::advance`] once per display refresh, passing the
/// refresh timestamp in milliseconds.
///
/// ## Example
///
/// ```rust
/// use carousel_core_view::{Direction, FrameTiming, Transition, TransitionStep};
///
/// // 0% -> 100% over 100ms at 60 steps per second: 6 steps.
/// let timing = FrameTiming::FixedRate { fps: 60 };
/// let mut transition = Transition::new(0.0, 1, Direction::Forward, 100, timing);
///
/// let mut steps = 0;
/// let mut now = 0.0;
/// loop {
///     steps += 1;
///     now += 16.7;
///     if let TransitionStep::Settled(offset) = transition.advance(now) {
///         assert_eq!(offset, 100.0);
///         break;
///     }
/// }
/// assert_eq!(steps, 6);
/// ```
#[derive(Clone, Debug)]
pub struct Transition {
    /// Slide being moved to
    target: usize,
    /// Offset when the transition was requested
    from: f64,
    /// Offset of `target`
    to: f64,
    /// Offset after the last step
    offset: f64,
    direction: Direction,
    timing: FrameTiming,
    duration_ms: u32,
    /// Per-refresh increment (fixed-rate only)
    step: f64,
    /// Expected number of refreshes (fixed-rate only)
    frames_total: u32,
    frames_done: u32,
    /// Clock reading the interpolation starts from (elapsed only)
    start_ms: Option<f64>,
}

impl Transition {
    /// Plan a transition from `from` to the offset of slide `target`,
    /// travelling in `direction`.
    pub fn new(from: f64, target: usize, direction: Direction, duration_ms: u32, timing: FrameTiming) -> Self {
        let to = SlidePosition::offset_for(target);
        let frames_total = match timing {
            FrameTiming::FixedRate { fps } => expected_frames(fps, duration_ms),
            FrameTiming::Elapsed => 0,
        };
        let step = if frames_total > 0 {
            (to - from) / frames_total as f64
        } else {
            to - from
        };

        Self {
            target,
            from,
            to,
            offset: from,
            direction,
            timing,
            duration_ms,
            step,
            frames_total,
            frames_done: 0,
            start_ms: None,
        }
    }

    /// Anchor elapsed-time interpolation at `now_ms`.
    ///
    /// Without an anchor the first refresh becomes the start and moves
    /// nothing.
    pub fn starting_at(mut self, now_ms: f64) -> Self {
        self.start_ms = Some(now_ms);
        self
    }

    /// Slide this transition ends on.
    #[inline]
    pub fn target(&self) -> usize {
        self.target
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Offset after the last step.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Total distance to cover, in percent.
    #[inline]
    pub fn distance(&self) -> f64 {
        self.to - self.from
    }

    /// Whether there is nothing to animate.
    #[inline]
    pub fn is_trivial(&self) -> bool {
        self.distance() == 0.0
    }

    /// Per-refresh increment used in fixed-rate timing.
    #[inline]
    pub fn step_size(&self) -> f64 {
        self.step
    }

    /// Advance by one display refresh at `now_ms`.
    ///
    /// Once settled, further calls keep returning the settled offset.
    pub fn advance(&mut self, now_ms: f64) -> TransitionStep {
        if self.is_trivial() {
            self.offset = self.to;
            return TransitionStep::Settled(self.to);
        }

        let settled = match self.timing {
            FrameTiming::FixedRate { .. } => {
                self.offset += self.step;
                self.frames_done = self.frames_done.saturating_add(1);
                self.direction.reached(self.offset, self.to) || self.frames_done >= self.frames_total
            }
            FrameTiming::Elapsed => {
                let start = *self.start_ms.get_or_insert(now_ms);
                let progress = if self.duration_ms == 0 {
                    1.0
                } else {
                    ((now_ms - start) / self.duration_ms as f64).clamp(0.0, 1.0)
                };
                self.offset = self.from + self.distance() * progress;
                progress >= 1.0
            }
        };

        if settled {
            self.offset = self.to;
            TransitionStep::Settled(self.to)
        } else {
            TransitionStep::Moving(self.offset)
        }
    }
}

/// Number of refreshes a fixed-rate transition is expected to take.
///
/// Always at least one so that a zero duration still settles on the next
/// refresh.
pub fn expected_frames(fps: u32, duration_ms: u32) -> u32 {
    let frames = (fps as f64 * duration_ms as f64 / 1000.0).round();
    (frames as u32).max(1)
}
