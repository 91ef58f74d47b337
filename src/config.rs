//! Widget configuration. `Default` matches the stock chat page: 50 particles,
//! a 1–3 s simulated reply delay, a greeting 1 s after start, and the page's
//! element ids.

use crate::error::{Result, WidgetError};

/// Upper bound on `particle_count`; each particle is drawn every frame.
pub const MAX_PARTICLE_COUNT: usize = 5_000;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WidgetConfig {
    pub particle_count: usize,
    /// Lower bound (inclusive) of the simulated reply delay.
    pub reply_delay_min_ms: f64,
    /// Upper bound (exclusive) of the simulated reply delay.
    pub reply_delay_max_ms: f64,
    pub welcome_delay_ms: f64,
    pub elements: ElementIds,
    pub log_level: log::LevelFilter,
}

/// DOM hooks the widget binds to.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ElementIds {
    pub particles_host: String,
    /// Id given to the background canvas created inside `particles_host`.
    pub particles_canvas: String,
    pub input: String,
    pub send_button: String,
    pub messages: String,
    pub typing_indicator: String,
    pub sound: String,
    /// Selector for preset prompt buttons; each carries `data-prompt`.
    pub quick_buttons: String,
    /// Selector for the parallax background shapes.
    pub shapes: String,
    /// Class toggled on the typing indicator while a reply is pending.
    pub typing_active_class: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            particles_host: "particles-js".into(),
            particles_canvas: "particles-canvas".into(),
            input: "userInput".into(),
            send_button: "sendBtn".into(),
            messages: "messages".into(),
            typing_indicator: "typingIndicator".into(),
            sound: "messageSound".into(),
            quick_buttons: ".quick-btn".into(),
            shapes: ".shape".into(),
            typing_active_class: "active".into(),
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            particle_count: crate::background::field::PARTICLE_COUNT,
            reply_delay_min_ms: 1000.0,
            reply_delay_max_ms: 3000.0,
            welcome_delay_ms: 1000.0,
            elements: ElementIds::default(),
            log_level: log::LevelFilter::Info,
        }
    }
}

impl WidgetConfig {
    pub fn validate(&self) -> Result<()> {
        let (min, max) = (self.reply_delay_min_ms, self.reply_delay_max_ms);
        if !(min.is_finite() && max.is_finite() && min >= 0.0 && min < max) {
            return Err(WidgetError::Config(format!(
                "reply delay range [{}, {}) must be finite, non-negative and non-empty",
                min, max
            )));
        }
        if !(self.welcome_delay_ms.is_finite() && self.welcome_delay_ms >= 0.0) {
            return Err(WidgetError::Config("welcome delay must be finite and non-negative".into()));
        }
        if self.particle_count > MAX_PARTICLE_COUNT {
            return Err(WidgetError::Config(format!(
                "particle_count {} exceeds {}",
                self.particle_count, MAX_PARTICLE_COUNT
            )));
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON override on top of the defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self> {
        let cfg: WidgetConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let cfg = WidgetConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.particle_count, 50);
        assert_eq!(cfg.elements.input, "userInput");
    }

    #[test]
    fn test_rejects_empty_delay_range() {
        let cfg = WidgetConfig { reply_delay_min_ms: 2000.0, reply_delay_max_ms: 2000.0, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(WidgetError::Config(_))));
        let cfg = WidgetConfig { reply_delay_min_ms: -1.0, ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = WidgetConfig { reply_delay_min_ms: f64::NAN, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_delays() {
        let cfg = WidgetConfig { reply_delay_max_ms: f64::INFINITY, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(WidgetError::Config(_))));
        let cfg = WidgetConfig { welcome_delay_ms: f64::INFINITY, ..Default::default() };
        assert!(cfg.validate().is_err());
        let cfg = WidgetConfig { welcome_delay_ms: f64::NAN, ..Default::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_particle_count_cap() {
        let cfg = WidgetConfig { particle_count: MAX_PARTICLE_COUNT, ..Default::default() };
        assert!(cfg.validate().is_ok());
        let cfg = WidgetConfig { particle_count: MAX_PARTICLE_COUNT + 1, ..Default::default() };
        assert!(matches!(cfg.validate(), Err(WidgetError::Config(_))));
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_partial_json_override() {
        let cfg = WidgetConfig::from_json(r#"{"particle_count": 10, "elements": {"input": "prompt"}, "log_level": "debug"}"#)
            .unwrap();
        assert_eq!(cfg.particle_count, 10);
        assert_eq!(cfg.elements.input, "prompt");
        assert_eq!(cfg.elements.send_button, "sendBtn");
        assert_eq!(cfg.reply_delay_max_ms, 3000.0);
        assert_eq!(cfg.log_level, log::LevelFilter::Debug);
    }

    #[cfg(feature = "serde_json")]
    #[test]
    fn test_json_bad_range_rejected() {
        let res = WidgetConfig::from_json(r#"{"reply_delay_min_ms": 5000}"#);
        assert!(matches!(res, Err(WidgetError::Config(_))));
    }
}
