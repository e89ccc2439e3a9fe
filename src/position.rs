//! Slide position state and track layout.

/// Width of one slide in track-offset units (percent of the viewport).
pub const SLIDE_SPAN: f64 = 100.0;

/// Single source of truth for which slide is shown.
///
/// `current` is the logical slide, updated as soon as a transition is
/// requested. `settled` trails it and only moves when a transition
/// completes. `offset` is the visual track position in percent.
#[derive(Clone, Debug, PartialEq)]
pub struct SlidePosition {
    slide_count: usize,
    current: usize,
    settled: usize,
    offset: f64,
}

impl SlidePosition {
    /// Create a position at the first slide.
    pub fn new(slide_count: usize) -> Self {
        Self {
            slide_count,
            current: 0,
            settled: 0,
            offset: 0.0,
        }
    }

    #[inline]
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Logical slide, shown or being transitioned to.
    #[inline]
    pub fn current(&self) -> usize {
        self.current
    }

    /// Slide whose indicator is active.
    #[inline]
    pub fn settled(&self) -> usize {
        self.settled
    }

    /// Current track offset in percent.
    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slide_count == 0
    }

    /// Check that `index` names a slide.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index < self.slide_count
    }

    /// Index after `current`, wrapping to the first slide.
    pub fn next_index(&self) -> usize {
        if self.slide_count == 0 {
            return 0;
        }
        (self.current + 1) % self.slide_count
    }

    /// Index before `current`, wrapping to the last slide.
    pub fn previous_index(&self) -> usize {
        if self.slide_count == 0 {
            return 0;
        }
        (self.current + self.slide_count - 1) % self.slide_count
    }

    /// Track offset at which `index` is fully shown.
    #[inline]
    pub fn offset_for(index: usize) -> f64 {
        index as f64 * SLIDE_SPAN
    }

    /// Direction of travel from `current` to `target`.
    ///
    /// Plain index comparison: wrapping from the last slide to the first
    /// travels backward across the whole strip.
    pub fn direction_to(&self, target: usize) -> Direction {
        if target < self.current {
            Direction::Backward
        } else {
            Direction::Forward
        }
    }

    pub(crate) fn set_current(&mut self, index: usize) {
        self.current = index;
    }

    pub(crate) fn set_offset(&mut self, offset: f64) {
        let max = Self::offset_for(self.slide_count.saturating_sub(1));
        self.offset = offset.clamp(0.0, max);
    }

    /// Pin the offset to `index` exactly and mark it settled.
    pub(crate) fn settle(&mut self, index: usize) {
        self.current = index;
        self.settled = index;
        self.offset = Self::offset_for(index);
    }
}

/// Direction of track movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Whether `offset` has reached or passed `target` in this direction.
    #[inline]
    pub fn reached(self, offset: f64, target: f64) -> bool {
        match self {
            Direction::Forward => offset >= target,
            Direction::Backward => offset <= target,
        }
    }
}

/// Percent widths applied to host markup once at mount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackLayout {
    /// Track width as a percentage of the container
    pub track_width: f64,
    /// Width of each slide as a percentage of the track
    pub slide_width: f64,
}

impl TrackLayout {
    /// Compute layout for `slide_count` slides.
    ///
    /// Slide width is rounded to six decimal places so browsers don't
    /// accumulate sub-pixel gaps across the strip.
    ///
    /// ```rust
    /// use carousel_core_view::TrackLayout;
    ///
    /// let layout = TrackLayout::for_slides(3);
    /// assert_eq!(layout.track_width, 300.0);
    /// assert_eq!(layout.slide_width, 33.333333);
    /// ```
    pub fn for_slides(slide_count: usize) -> Self {
        if slide_count == 0 {
            return Self {
                track_width: 0.0,
                slide_width: 0.0,
            };
        }
        let raw = 100.0 / slide_count as f64;
        Self {
            track_width: slide_count as f64 * SLIDE_SPAN,
            slide_width: (raw * 1e6).round() / 1e6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_previous_wrap() {
        let mut pos = SlidePosition::new(3);
        assert_eq!(pos.next_index(), 1);
        assert_eq!(pos.previous_index(), 2);

        pos.settle(2);
        assert_eq!(pos.next_index(), 0);
        assert_eq!(pos.previous_index(), 1);
    }

    #[test]
    fn test_single_slide_wraps_to_self() {
        let pos = SlidePosition::new(1);
        assert_eq!(pos.next_index(), 0);
        assert_eq!(pos.previous_index(), 0);
    }

    #[test]
    fn test_empty() {
        let pos = SlidePosition::new(0);
        assert!(pos.is_empty());
        assert!(!pos.contains(0));
        assert_eq!(pos.next_index(), 0);
    }

    #[test]
    fn test_direction_by_index() {
        let mut pos = SlidePosition::new(4);
        assert_eq!(pos.direction_to(3), Direction::Forward);

        pos.settle(3);
        // last -> first is backward, not the short way around
        assert_eq!(pos.direction_to(0), Direction::Backward);
    }

    #[test]
    fn test_offset_clamped() {
        let mut pos = SlidePosition::new(3);
        pos.set_offset(250.0);
        assert_eq!(pos.offset(), 200.0);
        pos.set_offset(-3.0);
        assert_eq!(pos.offset(), 0.0);
    }

    #[test]
    fn test_reached() {
        assert!(Direction::Forward.reached(100.0, 100.0));
        assert!(!Direction::Forward.reached(99.9, 100.0));
        assert!(Direction::Backward.reached(-0.1, 0.0));
        assert!(!Direction::Backward.reached(0.1, 0.0));
    }

    #[test]
    fn test_layout() {
        let layout = TrackLayout::for_slides(4);
        assert_eq!(layout.track_width, 400.0);
        assert_eq!(layout.slide_width, 25.0);

        let layout = TrackLayout::for_slides(0);
        assert_eq!(layout.slide_width, 0.0);
    }
}
