//! # Bistro
//!
//! Interactive behaviors for the Bistro restaurant site, compiled to
//! WebAssembly and loaded next to the static markup.
//!
//! The pages are plain HTML. Once the document is parsed, the controller finds
//! the elements it knows about and attaches:
//!
//! - a collapsible navigation panel (toggle, link, outside click, Escape)
//! - the current year in the footer
//! - reveal-on-scroll for marked sections
//! - a bounded parallax offset on the hero image
//! - menu category filters with a staggered entrance
//! - a rotating testimonial carousel
//! - an intercepted reservation form with an inline acknowledgment
//!
//! Every behavior is independent: a page missing the markup for one of them
//! simply skips it.
//!
//! ## Feature Flags
//!
//! - `pages` (default) - The browser behavior controller
//! - `debug-hooks` - Verbose logging of mount decisions in debug builds
//!
//! ## Quick Example
//!
//! ```rust
//! use bistro::pages::{NavState, Navigation};
//! use bistro::pages::testing::FakeNode;
//!
//! let toggle = FakeNode::new("button");
//! let panel = FakeNode::new("nav");
//! let nav = Navigation::new(toggle, panel, "is-open");
//!
//! assert_eq!(nav.toggle(), NavState::Open);
//! assert_eq!(nav.handle_key("Escape"), NavState::Closed);
//! ```

#[cfg(feature = "pages")]
pub mod pages;
