//! The carousel controller.
//!
//! [`Carousel`] owns every piece of mutable widget state: slide position,
//! the in-flight transition, indicator state and the autoplay timer handle.
//! Hosts forward their events (clicks, refreshes, timer firings, pointer and
//! visibility changes) to its methods and pass in the [`SliderView`] and
//! [`IntervalTimer`] it should drive.

use tracing::{debug, trace, warn};

use crate::animation::{Transition, TransitionStep};
use crate::autoplay::{Autoplay, IntervalTimer};
use crate::position::{Direction, SlidePosition, TrackLayout};
use crate::view::SliderView;
use crate::{CarouselConfig, FrameTiming};

/// Outcome of a navigation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    /// A transition began; the host should start requesting refreshes
    Started { from: usize, to: usize },
    /// Target is the slide already shown; nothing changed
    Unchanged,
    /// Request was rejected
    Ignored(IgnoreReason),
}

impl Navigation {
    #[inline]
    pub fn is_started(&self) -> bool {
        matches!(self, Navigation::Started { .. })
    }
}

/// Why a navigation request was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Another transition is still running
    Transitioning,
    /// Target index does not name a slide
    OutOfRange { index: usize, slide_count: usize },
    /// The carousel has no slides
    NoSlides,
    /// The carousel was torn down
    TornDown,
}

/// Result of a display refresh.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// No transition in flight; stop requesting refreshes
    Idle,
    /// Transition still moving; request another refresh
    Animating,
    /// Transition finished on this slide
    Settled(usize),
}

/// Read-only view of carousel state.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CarouselSnapshot {
    pub slide_count: usize,
    pub current_index: usize,
    pub settled_index: usize,
    pub track_offset: f64,
    pub transitioning: bool,
    pub autoplay_running: bool,
}

/// Slide carousel state engine.
///
/// `H` is the handle type of the host's autoplay timer.
///
/// ## Example
///
/// ```rust
/// use carousel_core_view::{Carousel, CarouselConfig, FrameStatus, MemoryView};
///
/// let config = CarouselConfig::default().with_autoplay(false);
/// let mut view = MemoryView::default();
/// let mut carousel: Carousel = Carousel::new(3, &config);
/// carousel.mount(&mut view);
///
/// assert!(carousel.next(0.0, &mut view).is_started());
/// assert_eq!(carousel.current_index(), 1);
///
/// // Drive refreshes until the transition settles
/// let mut now = 0.0;
/// while carousel.advance_frame(now, &mut view) == FrameStatus::Animating {
///     now += 16.7;
/// }
/// assert_eq!(view.offset, 100.0);
/// assert_eq!(view.active_indicators(), vec![1]);
/// ```
#[derive(Debug)]
pub struct Carousel<H = ()> {
    position: SlidePosition,
    indicators: Vec<bool>,
    transition: Option<Transition>,
    transition_ms: u32,
    timing: FrameTiming,
    autoplay: Autoplay<H>,
    torn_down: bool,
}

impl<H> Carousel<H> {
    /// Create a carousel over `slide_count` slides.
    ///
    /// With zero slides every request is ignored and autoplay never runs.
    pub fn new(slide_count: usize, config: &CarouselConfig) -> Self {
        let mut indicators = vec![false; slide_count];
        if let Some(first) = indicators.first_mut() {
            *first = true;
        }
        Self {
            position: SlidePosition::new(slide_count),
            indicators,
            transition: None,
            transition_ms: config.transition_duration_ms,
            timing: config.timing,
            autoplay: Autoplay::new(
                config.autoplay && slide_count > 0,
                config.autoplay_interval_ms,
            ),
            torn_down: false,
        }
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.position.slide_count()
    }

    /// Slide shown, or being moved to.
    #[inline]
    pub fn current_index(&self) -> usize {
        self.position.current()
    }

    /// Slide whose indicator is active.
    #[inline]
    pub fn settled_index(&self) -> usize {
        self.position.settled()
    }

    #[inline]
    pub fn track_offset(&self) -> f64 {
        self.position.offset()
    }

    #[inline]
    pub fn is_transitioning(&self) -> bool {
        self.transition.is_some()
    }

    /// Direction of the in-flight transition, if any.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        self.transition.as_ref().map(Transition::direction)
    }

    #[inline]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    #[inline]
    pub fn autoplay(&self) -> &Autoplay<H> {
        &self.autoplay
    }

    /// Indicator states, index-aligned with slides.
    #[inline]
    pub fn indicators(&self) -> &[bool] {
        &self.indicators
    }

    pub fn snapshot(&self) -> CarouselSnapshot {
        CarouselSnapshot {
            slide_count: self.slide_count(),
            current_index: self.current_index(),
            settled_index: self.settled_index(),
            track_offset: self.track_offset(),
            transitioning: self.is_transitioning(),
            autoplay_running: self.autoplay.is_running(),
        }
    }

    /// Size the host markup and paint the initial state.
    pub fn mount<V: SliderView>(&mut self, view: &mut V) {
        view.apply_layout(TrackLayout::for_slides(self.slide_count()));
        view.set_track_offset(self.track_offset());
        for (index, active) in self.indicators.iter().enumerate() {
            view.set_indicator_active(index, *active);
        }
        view.set_controls_enabled(!self.position.is_empty());
    }

    /// Move to `target`, requested at `now_ms`.
    ///
    /// The logical index changes immediately; the track catches up over
    /// the following refreshes. Requests made while a transition is in
    /// flight are ignored. `now_ms` must come from the same clock as the
    /// refresh timestamps passed to [`Carousel::advance_frame`].
    pub fn request_transition<V: SliderView>(&mut self, target: usize, now_ms: f64, view: &mut V) -> Navigation {
        if self.torn_down {
            return Navigation::Ignored(IgnoreReason::TornDown);
        }
        if self.position.is_empty() {
            return Navigation::Ignored(IgnoreReason::NoSlides);
        }
        if self.transition.is_some() {
            debug!(index = target, "transition in flight, request ignored");
            return Navigation::Ignored(IgnoreReason::Transitioning);
        }
        if !self.position.contains(target) {
            warn!(index = target, slide_count = self.slide_count(), "slide index out of range");
            return Navigation::Ignored(IgnoreReason::OutOfRange {
                index: target,
                slide_count: self.slide_count(),
            });
        }

        let from = self.position.current();
        if target == from {
            return Navigation::Unchanged;
        }

        let direction = self.position.direction_to(target);
        let transition = Transition::new(self.position.offset(), target, direction, self.transition_ms, self.timing)
            .starting_at(now_ms);
        self.position.set_current(target);
        if transition.is_trivial() {
            self.settle(target, view);
            return Navigation::Unchanged;
        }

        debug!(from, to = target, direction = ?transition.direction(), "transition started");
        self.transition = Some(transition);
        view.set_controls_enabled(false);
        Navigation::Started { from, to: target }
    }

    /// Move to the following slide, wrapping to the first.
    pub fn next<V: SliderView>(&mut self, now_ms: f64, view: &mut V) -> Navigation {
        if self.transition.is_some() {
            return Navigation::Ignored(IgnoreReason::Transitioning);
        }
        let target = self.position.next_index();
        self.request_transition(target, now_ms, view)
    }

    /// Move to the preceding slide, wrapping to the last.
    pub fn previous<V: SliderView>(&mut self, now_ms: f64, view: &mut V) -> Navigation {
        if self.transition.is_some() {
            return Navigation::Ignored(IgnoreReason::Transitioning);
        }
        let target = self.position.previous_index();
        self.request_transition(target, now_ms, view)
    }

    /// Indicator dot `index` was activated.
    pub fn select<V: SliderView>(&mut self, index: usize, now_ms: f64, view: &mut V) -> Navigation {
        self.request_transition(index, now_ms, view)
    }

    /// Autoplay timer fired.
    pub fn autoplay_fired<V: SliderView>(&mut self, now_ms: f64, view: &mut V) -> Navigation {
        self.next(now_ms, view)
    }

    /// Advance the in-flight transition by one display refresh.
    pub fn advance_frame<V: SliderView>(&mut self, now_ms: f64, view: &mut V) -> FrameStatus {
        let Some(transition) = self.transition.as_mut() else {
            return FrameStatus::Idle;
        };

        match transition.advance(now_ms) {
            TransitionStep::Moving(offset) => {
                trace!(offset, "transition step");
                self.position.set_offset(offset);
                view.set_track_offset(self.position.offset());
                FrameStatus::Animating
            }
            TransitionStep::Settled(_) => {
                let target = transition.target();
                self.transition = None;
                self.settle(target, view);
                FrameStatus::Settled(target)
            }
        }
    }

    /// Abandon the in-flight transition and snap to its target.
    ///
    /// Returns the slide snapped to, if a transition was running.
    pub fn cancel_transition<V: SliderView>(&mut self, view: &mut V) -> Option<usize> {
        let transition = self.transition.take()?;
        let target = transition.target();
        debug!(index = target, "transition cancelled");
        self.settle(target, view);
        Some(target)
    }

    /// Start autoplay if configured.
    pub fn start_autoplay<T>(&mut self, timer: &mut T)
    where
        T: IntervalTimer<Handle = H>,
    {
        if !self.torn_down {
            self.autoplay.start(timer);
        }
    }

    pub fn pointer_entered<T>(&mut self, timer: &mut T)
    where
        T: IntervalTimer<Handle = H>,
    {
        self.autoplay.pointer_entered(timer);
    }

    pub fn pointer_left<T>(&mut self, timer: &mut T)
    where
        T: IntervalTimer<Handle = H>,
    {
        self.autoplay.pointer_left(timer);
    }

    pub fn visibility_changed<T>(&mut self, visible: bool, timer: &mut T)
    where
        T: IntervalTimer<Handle = H>,
    {
        self.autoplay.visibility_changed(visible, timer);
    }

    /// Stop everything: snap any transition, cancel autoplay, disable the
    /// controls and reject further requests.
    pub fn teardown<T, V>(&mut self, timer: &mut T, view: &mut V)
    where
        T: IntervalTimer<Handle = H>,
        V: SliderView,
    {
        self.cancel_transition(view);
        self.autoplay.shutdown(timer);
        view.set_controls_enabled(false);
        self.torn_down = true;
        debug!("carousel torn down");
    }

    fn settle<V: SliderView>(&mut self, target: usize, view: &mut V) {
        let previous = self.position.settled();
        self.position.settle(target);
        view.set_track_offset(self.position.offset());

        if previous != target {
            self.indicators[previous] = false;
            view.set_indicator_active(previous, false);
        }
        self.indicators[target] = true;
        view.set_indicator_active(target, true);
        view.set_controls_enabled(true);
        debug!(index = target, "transition settled");
    }
}
