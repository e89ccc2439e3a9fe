//! Host markup abstraction.
//!
//! The carousel never touches markup directly. It drives a [`SliderView`],
//! which a host implements for its rendering backend. [`MemoryView`] keeps
//! the last applied state in memory for headless hosts and tests; the
//! `web` feature provides a DOM-backed implementation.

use crate::{CarouselError, TrackLayout};

/// Visual surface driven by a [`Carousel`](crate::Carousel).
pub trait SliderView {
    /// Size the track and every slide. Called once at mount.
    fn apply_layout(&mut self, layout: TrackLayout);

    /// Move the track so that `offset` percent is scrolled out to the left.
    fn set_track_offset(&mut self, offset: f64);

    /// Mark indicator dot `index` active or inactive.
    fn set_indicator_active(&mut self, index: usize, active: bool);

    /// Enable or disable the next/previous controls and dots.
    fn set_controls_enabled(&mut self, enabled: bool);
}

/// In-memory [`SliderView`] recording the latest state.
#[derive(Clone, Debug, Default)]
pub struct MemoryView {
    /// Layout from the last mount
    pub layout: Option<TrackLayout>,
    /// Last track offset in percent
    pub offset: f64,
    /// Indicator states, grown on demand
    pub indicators: Vec<bool>,
    /// Whether controls are enabled
    pub controls_enabled: bool,
    /// Number of track offset updates applied
    pub offset_writes: usize,
}

impl MemoryView {
    /// Indices of active indicators.
    pub fn active_indicators(&self) -> Vec<usize> {
        self.indicators
            .iter()
            .enumerate()
            .filter(|(_, active)| **active)
            .map(|(index, _)| index)
            .collect()
    }
}

impl SliderView for MemoryView {
    fn apply_layout(&mut self, layout: TrackLayout) {
        self.layout = Some(layout);
    }

    fn set_track_offset(&mut self, offset: f64) {
        self.offset = offset;
        self.offset_writes += 1;
    }

    fn set_indicator_active(&mut self, index: usize, active: bool) {
        if index >= self.indicators.len() {
            self.indicators.resize(index + 1, false);
        }
        self.indicators[index] = active;
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        self.controls_enabled = enabled;
    }
}

/// Number of indicator dots to wire for the markup found.
///
/// Dots are optional. When present they must match the slide count, except
/// that a strip with no slides ignores its dots and mounts disabled.
///
/// ```rust
/// use carousel_core_view::view::indicator_count;
///
/// assert_eq!(indicator_count(3, 3).unwrap(), 3);
/// assert_eq!(indicator_count(0, 3).unwrap(), 0);
/// assert_eq!(indicator_count(3, 0).unwrap(), 0);
/// assert!(indicator_count(2, 3).is_err());
/// ```
pub fn indicator_count(dots: usize, slides: usize) -> Result<usize, CarouselError> {
    if slides == 0 || dots == 0 {
        return Ok(0);
    }
    if dots != slides {
        return Err(CarouselError::IndicatorMismatch { dots, slides });
    }
    Ok(dots)
}

/// Web-specific DOM bindings.
#[cfg(feature = "web")]
pub mod web {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};

    use gloo::events::EventListener;
    use gloo::render::{request_animation_frame, AnimationFrame};
    use gloo::timers::callback::Interval;
    use tracing::warn;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element, HtmlElement, NodeList};

    use super::*;
    use crate::{
        Carousel, CarouselConfig, CarouselSnapshot, FrameStatus, IntervalTimer, Navigation,
    };

    /// [`SliderView`] over existing page markup.
    #[derive(Clone, Debug)]
    pub struct DomView {
        track: HtmlElement,
        slides: Vec<HtmlElement>,
        dots: Vec<Element>,
        controls: Vec<Element>,
        active_class: String,
    }

    impl DomView {
        /// Look up the slider markup inside `container`.
        ///
        /// The track and both navigation controls are required. Indicator
        /// dots follow [`indicator_count`].
        pub fn from_container(container: &Element, config: &CarouselConfig) -> Result<Self, CarouselError> {
            let selectors = &config.selectors;
            let track = query_html(container, &selectors.track)?;
            let slides = query_all(&track, &selectors.slides)?
                .into_iter()
                .map(|el| {
                    el.dyn_into::<HtmlElement>().map_err(|_| CarouselError::NotAnElement {
                        selector: selectors.slides.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            let next = query(container, &selectors.next)?;
            let previous = query(container, &selectors.previous)?;
            let found = query_all(container, &selectors.dots)?;
            let wired = indicator_count(found.len(), slides.len())?;

            // Unwired dots are still disabled along with the buttons
            let mut controls = vec![next, previous];
            controls.extend(found.iter().cloned());
            let dots: Vec<Element> = found.into_iter().take(wired).collect();

            Ok(Self {
                track,
                slides,
                dots,
                controls,
                active_class: selectors.active_class.clone(),
            })
        }

        #[inline]
        pub fn slide_count(&self) -> usize {
            self.slides.len()
        }
    }

    impl SliderView for DomView {
        fn apply_layout(&mut self, layout: TrackLayout) {
            set_style(&self.track, "width", &format!("{}%", layout.track_width));
            let slide_width = format!("{}%", layout.slide_width);
            for slide in &self.slides {
                set_style(slide, "width", &slide_width);
            }
        }

        fn set_track_offset(&mut self, offset: f64) {
            set_style(&self.track, "left", &format!("{}%", -offset));
        }

        fn set_indicator_active(&mut self, index: usize, active: bool) {
            let Some(dot) = self.dots.get(index) else {
                return;
            };
            if let Err(err) = dot.class_list().toggle_with_force(&self.active_class, active) {
                warn!(?err, index, "failed to toggle indicator class");
            }
        }

        fn set_controls_enabled(&mut self, enabled: bool) {
            for control in &self.controls {
                let result = if enabled {
                    control.remove_attribute("disabled")
                } else {
                    control.set_attribute("disabled", "")
                };
                if let Err(err) = result {
                    warn!(?err, "failed to update control state");
                }
            }
        }
    }

    fn set_style(el: &HtmlElement, property: &str, value: &str) {
        if let Err(err) = el.style().set_property(property, value) {
            warn!(?err, property, "failed to set style");
        }
    }

    fn query(root: &Element, selector: &str) -> Result<Element, CarouselError> {
        root.query_selector(selector)
            .map_err(|err| CarouselError::Dom(format!("{err:?}")))?
            .ok_or_else(|| CarouselError::MissingElement {
                selector: selector.to_string(),
            })
    }

    fn query_html(root: &Element, selector: &str) -> Result<HtmlElement, CarouselError> {
        query(root, selector)?
            .dyn_into::<HtmlElement>()
            .map_err(|_| CarouselError::NotAnElement {
                selector: selector.to_string(),
            })
    }

    fn query_all(root: &Element, selector: &str) -> Result<Vec<Element>, CarouselError> {
        let list: NodeList = root
            .query_selector_all(selector)
            .map_err(|err| CarouselError::Dom(format!("{err:?}")))?;
        Ok((0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect())
    }

    struct Inner {
        carousel: Carousel<Interval>,
        view: DomView,
        frame: Option<AnimationFrame>,
    }

    type Shared = Rc<RefCell<Inner>>;

    /// Autoplay timer backed by `setInterval`.
    struct WebTimer {
        inner: Weak<RefCell<Inner>>,
    }

    impl WebTimer {
        fn new(inner: &Shared) -> Self {
            Self {
                inner: Rc::downgrade(inner),
            }
        }
    }

    impl IntervalTimer for WebTimer {
        type Handle = Interval;

        fn start_interval(&mut self, interval_ms: u32) -> Interval {
            let inner = self.inner.clone();
            Interval::new(interval_ms, move || {
                if let Some(inner) = inner.upgrade() {
                    navigate(&inner, |carousel, now, view| carousel.autoplay_fired(now, view));
                }
            })
        }

        fn cancel_interval(&mut self, handle: Interval) {
            drop(handle);
        }
    }

    /// Run a navigation and start the refresh loop if it began a transition.
    fn navigate<F>(inner: &Shared, f: F) -> Navigation
    where
        F: FnOnce(&mut Carousel<Interval>, f64, &mut DomView) -> Navigation,
    {
        let navigation = {
            let mut guard = inner.borrow_mut();
            let Inner { carousel, view, .. } = &mut *guard;
            f(carousel, now_ms(), view)
        };
        if navigation.is_started() {
            schedule_frame(inner);
        }
        navigation
    }

    fn schedule_frame(inner: &Shared) {
        if inner.borrow().frame.is_some() {
            return;
        }
        let weak = Rc::downgrade(inner);
        let handle = request_animation_frame(move |timestamp| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            let status = {
                let mut guard = inner.borrow_mut();
                guard.frame.take();
                let Inner { carousel, view, .. } = &mut *guard;
                carousel.advance_frame(timestamp, view)
            };
            if status == FrameStatus::Animating {
                schedule_frame(&inner);
            }
        });
        inner.borrow_mut().frame = Some(handle);
    }

    fn with_timer<F>(inner: &Shared, f: F)
    where
        F: FnOnce(&mut Carousel<Interval>, &mut WebTimer),
    {
        let mut timer = WebTimer::new(inner);
        let mut guard = inner.borrow_mut();
        f(&mut guard.carousel, &mut timer);
    }

    /// A carousel mounted on page markup.
    ///
    /// Dropping it removes every listener, stops autoplay and snaps any
    /// running transition to its target.
    ///
    /// ## Example
    ///
    /// ```rust,ignore
    /// use carousel_core_view::CarouselConfig;
    /// use carousel_core_view::view::web::WebCarousel;
    ///
    /// let carousel = WebCarousel::mount(&CarouselConfig::new("first-slider"))?;
    /// carousel.next();
    /// ```
    pub struct WebCarousel {
        inner: Shared,
        listeners: Vec<EventListener>,
    }

    impl WebCarousel {
        /// Find the container by id, wire up controls and start autoplay.
        pub fn mount(config: &CarouselConfig) -> Result<Self, CarouselError> {
            config.validate()?;
            let document = document()?;
            let container = document
                .get_element_by_id(&config.container_id)
                .ok_or_else(|| CarouselError::MissingElement {
                    selector: format!("#{}", config.container_id),
                })?;

            let mut view = DomView::from_container(&container, config)?;
            let next = query(&container, &config.selectors.next)?;
            let previous = query(&container, &config.selectors.previous)?;
            let dots = view.dots.clone();

            let mut carousel = Carousel::new(view.slide_count(), config);
            carousel.mount(&mut view);
            let inner: Shared = Rc::new(RefCell::new(Inner {
                carousel,
                view,
                frame: None,
            }));

            let mut listeners = Vec::with_capacity(dots.len() + 5);
            let weak = Rc::downgrade(&inner);
            listeners.push(on(&next, "click", &weak, |inner| {
                navigate(inner, |carousel, now, view| carousel.next(now, view));
            }));
            listeners.push(on(&previous, "click", &weak, |inner| {
                navigate(inner, |carousel, now, view| carousel.previous(now, view));
            }));
            for (index, dot) in dots.iter().enumerate() {
                listeners.push(on(dot, "click", &weak, move |inner| {
                    navigate(inner, |carousel, now, view| carousel.select(index, now, view));
                }));
            }
            listeners.push(on(&container, "mouseenter", &weak, |inner| {
                with_timer(inner, |carousel, timer| carousel.pointer_entered(timer));
            }));
            listeners.push(on(&container, "mouseleave", &weak, |inner| {
                with_timer(inner, |carousel, timer| carousel.pointer_left(timer));
            }));
            let doc = document.clone();
            listeners.push(on(&document, "visibilitychange", &weak, move |inner| {
                let visible = !doc.hidden();
                with_timer(inner, |carousel, timer| carousel.visibility_changed(visible, timer));
            }));

            with_timer(&inner, |carousel, timer| carousel.start_autoplay(timer));

            Ok(Self { inner, listeners })
        }

        pub fn next(&self) -> Navigation {
            navigate(&self.inner, |carousel, now, view| carousel.next(now, view))
        }

        pub fn previous(&self) -> Navigation {
            navigate(&self.inner, |carousel, now, view| carousel.previous(now, view))
        }

        pub fn go_to(&self, index: usize) -> Navigation {
            navigate(&self.inner, |carousel, now, view| carousel.request_transition(index, now, view))
        }

        pub fn snapshot(&self) -> CarouselSnapshot {
            self.inner.borrow().carousel.snapshot()
        }
    }

    impl Drop for WebCarousel {
        fn drop(&mut self) {
            self.listeners.clear();
            let mut timer = WebTimer::new(&self.inner);
            let mut guard = self.inner.borrow_mut();
            guard.frame.take();
            let Inner { carousel, view, .. } = &mut *guard;
            carousel.teardown(&mut timer, view);
        }
    }

    fn on<F>(target: &web_sys::EventTarget, event: &'static str, inner: &Weak<RefCell<Inner>>, handler: F) -> EventListener
    where
        F: Fn(&Shared) + 'static,
    {
        let inner = inner.clone();
        EventListener::new(target, event, move |_| {
            if let Some(inner) = inner.upgrade() {
                handler(&inner);
            }
        })
    }

    /// Current `performance.now()`, the clock animation frames are stamped with.
    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|window| window.performance())
            .map(|performance| performance.now())
            .unwrap_or_default()
    }

    fn document() -> Result<Document, CarouselError> {
        web_sys::window()
            .ok_or_else(|| CarouselError::Dom("no window available".to_string()))?
            .document()
            .ok_or_else(|| CarouselError::Dom("no document available".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Carousel, CarouselConfig, Navigation};

    #[test]
    fn test_indicator_count() {
        assert_eq!(indicator_count(4, 4).unwrap(), 4);
        assert_eq!(indicator_count(0, 4).unwrap(), 0);
        assert!(matches!(
            indicator_count(3, 4),
            Err(CarouselError::IndicatorMismatch { dots: 3, slides: 4 })
        ));
    }

    #[test]
    fn test_dots_without_slides_mount_disabled() {
        // Markup with dots but no images still mounts, with nothing enabled
        let wired = indicator_count(3, 0).unwrap();
        assert_eq!(wired, 0);

        let mut view = MemoryView::default();
        let mut carousel: Carousel = Carousel::new(0, &CarouselConfig::default());
        carousel.mount(&mut view);
        assert!(!view.controls_enabled);
        assert!(view.active_indicators().is_empty());
        assert!(matches!(carousel.next(0.0, &mut view), Navigation::Ignored(_)));
    }

    #[test]
    fn test_memory_view_records() {
        let mut view = MemoryView::default();
        view.set_indicator_active(2, true);
        view.set_track_offset(50.0);
        view.set_track_offset(100.0);
        assert_eq!(view.indicators, vec![false, false, true]);
        assert_eq!(view.active_indicators(), vec![2]);
        assert_eq!(view.offset, 100.0);
        assert_eq!(view.offset_writes, 2);
    }
}
