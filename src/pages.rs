//! Browser behaviors for the Bistro pages
//!
//! This module provides access to bistro-pages, the WebAssembly controller
//! that drives the interactive parts of the marketing site.
//!
//! ## Architecture
//!
//! - **Behaviors**: Each page feature keeps its state in a small struct and
//!   writes it to the page through the `DomNode` trait
//! - **Controller**: `PageController` locates the anchor elements, wires the
//!   browser events and records what it mounted
//! - **Configuration**: `BehaviorConfig` holds the selectors, classes and
//!   timing, with JSON overrides
//!
//! ## Example
//!
//! ```rust,ignore
//! use bistro::pages::BehaviorConfig;
//!
//! // Mount with a slower testimonial rotation
//! let config = BehaviorConfig::from_json(r#"{ "timing": { "rotation_period_ms": 8000 } }"#)?;
//! let window = web_sys::window().unwrap();
//! let document = window.document().unwrap();
//! let controller = bistro::pages::PageController::mount(&window, &document, &config);
//! ```

// Re-export all bistro-pages functionality
pub use bistro_pages::*;
