//! Construction-time configuration.

use crate::CarouselError;

/// Default transition duration in milliseconds.
pub const DEFAULT_TRANSITION_MS: u32 = 1000;
/// Default autoplay interval in milliseconds.
pub const DEFAULT_AUTOPLAY_INTERVAL_MS: u32 = 5000;
/// Assumed display refresh rate for frame-driven transitions.
pub const DEFAULT_FPS: u32 = 60;

/// How the animator converts display refreshes into track movement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FrameTiming {
    /// Advance a constant step per refresh, assuming `fps` refreshes per second.
    ///
    /// Total duration depends on the real refresh rate.
    FixedRate { fps: u32 },
    /// Interpolate by elapsed wall time between refresh timestamps.
    Elapsed,
}

impl Default for FrameTiming {
    fn default() -> Self {
        FrameTiming::FixedRate { fps: DEFAULT_FPS }
    }
}

/// Selectors and class names used to find host markup.
///
/// Only consumed by the `web` bindings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectorConfig {
    /// Track element holding the images, relative to the container
    pub track: String,
    /// Slide images, relative to the track
    pub slides: String,
    /// "Next" control, relative to the container
    pub next: String,
    /// "Previous" control, relative to the container
    pub previous: String,
    /// Indicator dots, relative to the container
    pub dots: String,
    /// Class toggled on the active dot
    pub active_class: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            track: ".slide".to_string(),
            slides: "img".to_string(),
            next: ".slider-next-btn".to_string(),
            previous: ".slider-prev-btn".to_string(),
            dots: ".slider-dot".to_string(),
            active_class: "active".to_string(),
        }
    }
}

/// Carousel configuration.
///
/// ## Example
///
/// ```rust
/// use carousel_core_view::{CarouselConfig, FrameTiming};
///
/// let config = CarouselConfig::new("first-slider")
///     .with_transition_ms(600)
///     .with_autoplay(false)
///     .with_timing(FrameTiming::Elapsed);
///
/// assert_eq!(config.container_id, "first-slider");
/// assert_eq!(config.autoplay_interval_ms, 5000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselConfig {
    /// Id of the container element
    pub container_id: String,
    /// Duration of one transition in milliseconds
    pub transition_duration_ms: u32,
    /// Time between autoplay advances in milliseconds
    pub autoplay_interval_ms: u32,
    /// Whether autoplay runs at all
    pub autoplay: bool,
    /// Animator timing strategy
    pub timing: FrameTiming,
    /// Host markup lookup
    pub selectors: SelectorConfig,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            container_id: "slider".to_string(),
            transition_duration_ms: DEFAULT_TRANSITION_MS,
            autoplay_interval_ms: DEFAULT_AUTOPLAY_INTERVAL_MS,
            autoplay: true,
            timing: FrameTiming::default(),
            selectors: SelectorConfig::default(),
        }
    }
}

impl CarouselConfig {
    /// Create a config for the given container id with default values.
    pub fn new(container_id: impl Into<String>) -> Self {
        Self {
            container_id: container_id.into(),
            ..Self::default()
        }
    }

    pub fn with_transition_ms(mut self, ms: u32) -> Self {
        self.transition_duration_ms = ms;
        self
    }

    pub fn with_autoplay_interval_ms(mut self, ms: u32) -> Self {
        self.autoplay_interval_ms = ms;
        self
    }

    pub fn with_autoplay(mut self, enabled: bool) -> Self {
        self.autoplay = enabled;
        self
    }

    pub fn with_timing(mut self, timing: FrameTiming) -> Self {
        self.timing = timing;
        self
    }

    pub fn with_selectors(mut self, selectors: SelectorConfig) -> Self {
        self.selectors = selectors;
        self
    }

    /// Check that the values can drive a carousel.
    pub fn validate(&self) -> Result<(), CarouselError> {
        if let FrameTiming::FixedRate { fps: 0 } = self.timing {
            return Err(CarouselError::InvalidConfig(
                "fixed-rate timing needs a positive fps".to_string(),
            ));
        }
        if self.autoplay && self.autoplay_interval_ms == 0 {
            return Err(CarouselError::InvalidConfig(
                "autoplay interval must be positive when autoplay is enabled".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse and validate a TOML configuration.
    ///
    /// Missing keys fall back to their defaults.
    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, CarouselError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CarouselConfig::default();
        assert_eq!(config.transition_duration_ms, 1000);
        assert_eq!(config.autoplay_interval_ms, 5000);
        assert!(config.autoplay);
        assert_eq!(config.timing, FrameTiming::FixedRate { fps: 60 });
        assert_eq!(config.selectors.track, ".slide");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_fps_rejected() {
        let config = CarouselConfig::default().with_timing(FrameTiming::FixedRate { fps: 0 });
        assert!(matches!(
            config.validate(),
            Err(CarouselError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_zero_interval() {
        let config = CarouselConfig::default().with_autoplay_interval_ms(0);
        assert!(config.validate().is_err());

        // Irrelevant when autoplay is off
        let config = config.with_autoplay(false);
        assert!(config.validate().is_ok());
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml() {
        let config = CarouselConfig::from_toml_str(
            r#"
            container_id = "first-slider"
            transition_duration_ms = 400
            autoplay = false
            timing = "elapsed"

            [selectors]
            dots = ".dot"
            "#,
        )
        .unwrap();

        assert_eq!(config.container_id, "first-slider");
        assert_eq!(config.transition_duration_ms, 400);
        assert_eq!(config.autoplay_interval_ms, 5000);
        assert!(!config.autoplay);
        assert_eq!(config.timing, FrameTiming::Elapsed);
        assert_eq!(config.selectors.dots, ".dot");
        assert_eq!(config.selectors.next, ".slider-next-btn");
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_invalid() {
        let result = CarouselConfig::from_toml_str("timing = { fixed_rate = { fps = 0 } }");
        assert!(matches!(result, Err(CarouselError::InvalidConfig(_))));

        let result = CarouselConfig::from_toml_str("autoplay = \"yes\"");
        assert!(matches!(result, Err(CarouselError::Toml(_))));
    }
}
