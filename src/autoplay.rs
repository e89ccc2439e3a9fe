//! Autoplay scheduling with hover and visibility pauses.

use tracing::debug;

/// Host facility for repeating timers.
///
/// `start_interval` arms a timer that fires every `interval_ms` until the
/// returned handle is passed to `cancel_interval`. Hosts whose handles
/// cancel on drop (such as `gloo` intervals) can implement `cancel_interval`
/// as a plain drop.
pub trait IntervalTimer {
    type Handle;

    fn start_interval(&mut self, interval_ms: u32) -> Self::Handle;

    fn cancel_interval(&mut self, handle: Self::Handle);
}

/// Why autoplay is currently held back.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PauseReasons {
    /// Pointer is over the widget
    pub hovered: bool,
    /// Page is in a background tab
    pub hidden: bool,
}

impl PauseReasons {
    #[inline]
    pub fn any(&self) -> bool {
        self.hovered || self.hidden
    }
}

/// Autoplay scheduler state.
///
/// Owns at most one timer handle. Every stop cancels and forgets the
/// handle; every start first checks that none is held, so a restarted
/// scheduler can never leave a stale timer behind.
///
/// ## Example
///
/// ```rust
/// use carousel_core_view::{Autoplay, IntervalTimer};
///
/// #[derive(Default)]
/// struct Counter { live: usize }
///
/// impl IntervalTimer for Counter {
///     type Handle = ();
///     fn start_interval(&mut self, _ms: u32) { self.live += 1; }
///     fn cancel_interval(&mut self, _handle: ()) { self.live -= 1; }
/// }
///
/// let mut timers = Counter::default();
/// let mut autoplay = Autoplay::new(true, 5000);
///
/// autoplay.start(&mut timers);
/// autoplay.start(&mut timers);
/// assert_eq!(timers.live, 1);
///
/// autoplay.pointer_entered(&mut timers);
/// assert_eq!(timers.live, 0);
///
/// autoplay.pointer_left(&mut timers);
/// assert_eq!(timers.live, 1);
/// ```
#[derive(Debug)]
pub struct Autoplay<H> {
    enabled: bool,
    interval_ms: u32,
    paused: PauseReasons,
    /// Set once `start` is called; cleared by `shutdown`
    active: bool,
    handle: Option<H>,
}

impl<H> Autoplay<H> {
    /// Create an idle scheduler. Nothing runs until [`Autoplay::start`].
    pub fn new(enabled: bool, interval_ms: u32) -> Self {
        Self {
            enabled,
            interval_ms,
            paused: PauseReasons::default(),
            active: false,
            handle: None,
        }
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn interval_ms(&self) -> u32 {
        self.interval_ms
    }

    /// Whether a timer is currently armed.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    #[inline]
    pub fn pause_reasons(&self) -> PauseReasons {
        self.paused
    }

    /// Begin autoplay on widget start.
    pub fn start<T>(&mut self, timer: &mut T)
    where
        T: IntervalTimer<Handle = H>,
    {
        self.active = true;
        self.resume(timer);
    }

    /// Stop for good: cancel the timer and ignore later resume signals.
    pub fn shutdown<T>(&mut self, timer: &mut T)
    where
        T: IntervalTimer<Handle = H>,
    {
        self.active = false;
        self.halt(timer);
    }

    pub fn pointer_entered<T>(&mut self, timer: &mut T)
    where
        T: IntervalTimer<Handle = H>,
    {
        self.paused.hovered = true;
        self.halt(timer);
    }

    pub fn pointer_left<T>(&mut self, timer: &mut T)
    where
        T: IntervalTimer<Handle = H>,
    {
        self.paused.hovered = false;
        self.resume(timer);
    }

    /// React to a page visibility change.
    pub fn visibility_changed<T>(&mut self, visible: bool, timer: &mut T)
    where
        T: IntervalTimer<Handle = H>,
    {
        self.paused.hidden = !visible;
        if visible {
            self.resume(timer);
        } else {
            self.halt(timer);
        }
    }

    /// Arm the timer if allowed and not already armed.
    fn resume<T>(&mut self, timer: &mut T)
    where
        T: IntervalTimer<Handle = H>,
    {
        if !self.enabled || !self.active || self.paused.any() || self.handle.is_some() {
            return;
        }
        debug!(interval_ms = self.interval_ms, "autoplay started");
        self.handle = Some(timer.start_interval(self.interval_ms));
    }

    fn halt<T>(&mut self, timer: &mut T)
    where
        T: IntervalTimer<Handle = H>,
    {
        if let Some(handle) = self.handle.take() {
            debug!(paused = ?self.paused, "autoplay stopped");
            timer.cancel_interval(handle);
        }
    }
}
