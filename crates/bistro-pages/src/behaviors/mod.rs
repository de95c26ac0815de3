//! Behavior modules.
//!
//! Each module owns its state and writes it to the page through
//! [`DomNode`](crate::dom::DomNode); none of them touch the browser directly.

pub mod menu;
pub mod nav;
pub mod parallax;
pub mod reservation;
pub mod reveal;
pub mod testimonials;
pub mod year;

pub use menu::{Filter, MenuClasses, MenuFilter, StaggerSlot, apply_stagger, stagger_plan};
pub use nav::{NavState, Navigation};
pub use parallax::{Parallax, ParallaxGate, ScrollParallax, parallax_offset, translate_y};
pub use reservation::ReservationIntercept;
pub use reveal::{RevealPhase, RevealStrategy, RevealTracker};
pub use testimonials::{Rotator, TestimonialRotator};
pub use year::{current_year, stamp_year};
