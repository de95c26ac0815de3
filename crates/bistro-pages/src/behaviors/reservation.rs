//! Reservation form acknowledgment.
//!
//! Submissions never leave the page: the submit event is cancelled by the
//! browser binding, a fixed acknowledgment is shown and the form is reset.

use crate::dom::FormNode;
use crate::error::BehaviorResult;

/// The reservation form and its status line.
#[derive(Debug)]
pub struct ReservationIntercept<N: FormNode> {
	form: N,
	status: N,
	message: String,
}

impl<N: FormNode> ReservationIntercept<N> {
	/// Binds the form's status element, appending it on first mount.
	///
	/// A status element left by an earlier mount is reused, so remounting
	/// never adds a second one.
	pub fn mount(form: N, status_class: &str, message: &str) -> BehaviorResult<Self> {
		let status = match form.find_status(status_class) {
			Some(existing) => existing,
			None => form.append_status(status_class)?,
		};
		Ok(Self {
			form,
			status,
			message: message.to_string(),
		})
	}

	pub fn status(&self) -> &N {
		&self.status
	}

	/// Shows the acknowledgment and resets the form.
	pub fn submit(&self) {
		self.status.set_text(&self.message);
		self.form.reset();
	}
}
