//! # carousel-core-view
//!
//! Core state and animation engine for image carousel widgets.
//!
//! This crate provides platform-agnostic logic for:
//! - Tracking the current and settled slide of a horizontal image strip
//! - Animating the track between slides, frame-driven or time-driven
//! - Next / previous / indicator-dot navigation with a re-entrancy guard
//! - Autoplay with pause on hover and on page visibility loss
//! - Binding all of the above to page markup (with optional web support)
//!
//! ## Features
//!
//! - `serde` - Enable serialization/deserialization for configuration
//! - `toml` - Load configuration from TOML
//! - `web` - Enable web/WASM DOM bindings
//!
//! ## Example
//!
//! ```rust
//! use carousel_core_view::{Carousel, CarouselConfig, FrameStatus, MemoryView};
//!
//! let config = CarouselConfig::new("first-slider").with_autoplay(false);
//! let mut view = MemoryView::default();
//!
//! let mut carousel: Carousel = Carousel::new(3, &config);
//! carousel.mount(&mut view);
//!
//! // Wraps from the first slide to the last
//! carousel.previous(0.0, &mut view);
//! let mut now = 0.0;
//! while carousel.advance_frame(now, &mut view) != FrameStatus::Settled(2) {
//!     now += 16.0;
//! }
//! assert_eq!(carousel.track_offset(), 200.0);
//! ```

mod animation;
mod autoplay;
mod carousel;
mod config;
mod error;
mod position;
pub mod view;

pub use animation::{expected_frames, Transition, TransitionStep};
pub use autoplay::{Autoplay, IntervalTimer, PauseReasons};
pub use carousel::{Carousel, CarouselSnapshot, FrameStatus, IgnoreReason, Navigation};
pub use config::{CarouselConfig, FrameTiming, SelectorConfig};
pub use error::CarouselError;
pub use position::{Direction, SlidePosition, TrackLayout, SLIDE_SPAN};
pub use view::{MemoryView, SliderView};

#[cfg(feature = "web")]
pub use view::web::WebCarousel;
