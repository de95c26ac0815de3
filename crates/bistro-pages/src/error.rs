//! Error types for behavior mounting.
//!
//! Missing markup is not an error: a behavior whose anchor elements are absent
//! is simply skipped. [`BehaviorError`] covers the cases where the browser
//! rejects an API call while a behavior is being wired up.

use thiserror::Error;

/// Failure while attaching a behavior to the document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BehaviorError {
	/// `addEventListener` rejected the listener.
	#[error("failed to attach '{event_type}' listener: {reason}")]
	Listener {
		/// The event type that failed.
		event_type: String,
		/// The reason reported by the browser.
		reason: String,
	},

	/// The intersection observer could not be created.
	#[error("failed to create intersection observer: {0}")]
	Observer(String),

	/// A timer or animation frame could not be scheduled.
	#[error("failed to schedule {task}: {reason}")]
	Schedule {
		/// `"interval"` or `"animation frame"`.
		task: &'static str,
		/// The reason reported by the browser.
		reason: String,
	},

	/// A DOM query or mutation failed.
	#[error("DOM operation failed: {0}")]
	Dom(String),

	/// The configuration override could not be parsed.
	#[error("invalid behavior configuration: {0}")]
	Config(String),

	/// `window` or `document` is not available.
	#[error("browser environment unavailable: {0}")]
	Environment(&'static str),
}

impl From<serde_json::Error> for BehaviorError {
	fn from(err: serde_json::Error) -> Self {
		Self::Config(err.to_string())
	}
}

/// Renders a thrown JavaScript value for inclusion in an error message.
#[cfg(target_arch = "wasm32")]
pub(crate) fn js_reason(value: &wasm_bindgen::JsValue) -> String {
	value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(target_arch = "wasm32")]
impl From<BehaviorError> for wasm_bindgen::JsValue {
	fn from(err: BehaviorError) -> Self {
		wasm_bindgen::JsValue::from_str(&err.to_string())
	}
}

/// Result alias for behavior mounting.
pub type BehaviorResult<T> = Result<T, BehaviorError>;
