//! Behavior configuration.
//!
//! [`BehaviorConfig::default`] reproduces the markup contract of the site
//! templates. Pages can override any subset of fields by passing a JSON object
//! to [`BehaviorConfig::from_json`]; missing fields keep their defaults.
//!
//! ```
//! use bistro_pages::BehaviorConfig;
//!
//! let config = BehaviorConfig::from_json(r#"{ "timing": { "rotation_period_ms": 8000 } }"#).unwrap();
//! assert_eq!(config.timing.rotation_period().as_millis(), 8000);
//! assert_eq!(config.selectors.nav_toggle, ".nav-toggle");
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::error::BehaviorResult;

/// Acknowledgment shown after the reservation form is submitted.
pub const ACKNOWLEDGMENT: &str = "Reservation request sent. We will contact you shortly.";

/// Top-level configuration for every behavior module.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
	/// Structural markers used to locate anchor elements.
	pub selectors: Selectors,
	/// CSS presentation classes written by the behaviors.
	pub classes: Classes,
	/// Tuning constants for animations and timers.
	pub timing: Timing,
	/// Text placed in the reservation status element.
	pub acknowledgment: String,
}

impl Default for BehaviorConfig {
	fn default() -> Self {
		Self {
			selectors: Selectors::default(),
			classes: Classes::default(),
			timing: Timing::default(),
			acknowledgment: ACKNOWLEDGMENT.to_string(),
		}
	}
}

impl BehaviorConfig {
	/// Parses a partial JSON override on top of the defaults.
	pub fn from_json(json: &str) -> BehaviorResult<Self> {
		Ok(serde_json::from_str(json)?)
	}
}

/// CSS selectors for the anchor elements of each behavior.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Selectors {
	pub nav_toggle: String,
	pub nav_panel: String,
	pub nav_link: String,
	pub year: String,
	pub reveal: String,
	pub parallax: String,
	pub menu_filters: String,
	pub filter_button: String,
	pub menu_item: String,
	pub testimonials: String,
	pub testimonial_card: String,
	pub reservation_form: String,
}

impl Default for Selectors {
	fn default() -> Self {
		Self {
			nav_toggle: ".nav-toggle".to_string(),
			nav_panel: ".site-nav".to_string(),
			nav_link: "a".to_string(),
			year: "#year".to_string(),
			reveal: "[data-reveal]".to_string(),
			parallax: "[data-parallax]".to_string(),
			menu_filters: "[data-menu-filters]".to_string(),
			filter_button: "button".to_string(),
			menu_item: ".menu-item".to_string(),
			testimonials: "[data-testimonials]".to_string(),
			testimonial_card: ".testimonial".to_string(),
			reservation_form: ".reservation-form".to_string(),
		}
	}
}

impl Selectors {
	/// Descendant selector for the testimonial cards inside their container.
	pub fn testimonial_cards(&self) -> String {
		format!("{} {}", self.testimonials, self.testimonial_card)
	}
}

/// Class names toggled by the behaviors.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Classes {
	pub nav_open: String,
	pub visible: String,
	pub active: String,
	pub hidden: String,
	pub staggered: String,
	pub form_status: String,
}

impl Default for Classes {
	fn default() -> Self {
		Self {
			nav_open: "is-open".to_string(),
			visible: "is-visible".to_string(),
			active: "is-active".to_string(),
			hidden: "is-hidden".to_string(),
			staggered: "is-staggered".to_string(),
			form_status: "form-status".to_string(),
		}
	}
}

/// Animation and timer constants.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Timing {
	/// Fraction of an element that must intersect the viewport to reveal it.
	pub reveal_threshold: f64,
	/// Minimum viewport width (CSS px) for the parallax effect.
	pub desktop_breakpoint_px: u32,
	/// Scroll multiplier for the parallax offset.
	pub parallax_factor: f64,
	/// Upper bound of the parallax offset in px.
	pub parallax_max_px: f64,
	/// Delay between consecutive visible menu items.
	pub stagger_step_ms: u64,
	/// Period of the testimonial rotation.
	pub rotation_period_ms: u64,
}

impl Default for Timing {
	fn default() -> Self {
		Self {
			reveal_threshold: 0.14,
			desktop_breakpoint_px: 981,
			parallax_factor: 0.08,
			parallax_max_px: 22.0,
			stagger_step_ms: 45,
			rotation_period_ms: 5000,
		}
	}
}

impl Timing {
	pub fn stagger_step(&self) -> Duration {
		Duration::from_millis(self.stagger_step_ms)
	}

	pub fn rotation_period(&self) -> Duration {
		Duration::from_millis(self.rotation_period_ms)
	}

	/// Media query matching desktop viewports.
	pub fn desktop_query(&self) -> String {
		format!("(min-width: {}px)", self.desktop_breakpoint_px)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_defaults_match_markup_contract() {
		let config = BehaviorConfig::default();
		assert_eq!(config.selectors.reveal, "[data-reveal]");
		assert_eq!(config.classes.staggered, "is-staggered");
		assert_eq!(config.timing.reveal_threshold, 0.14);
		assert_eq!(config.timing.stagger_step(), Duration::from_millis(45));
		assert_eq!(config.timing.rotation_period(), Duration::from_secs(5));
		assert_eq!(config.acknowledgment, ACKNOWLEDGMENT);
	}

	#[rstest]
	fn test_partial_override_keeps_defaults() {
		let config = BehaviorConfig::from_json(
			r#"{ "classes": { "nav_open": "open" }, "timing": { "parallax_max_px": 40 } }"#,
		)
		.unwrap();

		assert_eq!(config.classes.nav_open, "open");
		assert_eq!(config.classes.visible, "is-visible");
		assert_eq!(config.timing.parallax_max_px, 40.0);
		assert_eq!(config.timing.parallax_factor, 0.08);
	}

	#[rstest]
	fn test_empty_object_is_default() {
		assert_eq!(
			BehaviorConfig::from_json("{}").unwrap(),
			BehaviorConfig::default()
		);
	}

	#[rstest]
	#[case("not json")]
	#[case(r#"{ "timing": { "stagger_step_ms": "fast" } }"#)]
	fn test_invalid_override_rejected(#[case] json: &str) {
		assert!(BehaviorConfig::from_json(json).is_err());
	}

	#[rstest]
	fn test_derived_selectors() {
		let config = BehaviorConfig::default();
		assert_eq!(
			config.selectors.testimonial_cards(),
			"[data-testimonials] .testimonial"
		);
		assert_eq!(config.timing.desktop_query(), "(min-width: 981px)");
	}
}
