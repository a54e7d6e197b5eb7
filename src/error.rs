//! Error types shared by the display state, the live-update timer and the
//! graph canvas.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by strict lookups and browser setup.
///
/// The permissive setters on [`crate::display::DisplayState`] swallow the
/// lookup variants and keep the previous value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
	/// No preset in the color scheme catalog has this name.
	#[error("unknown color scheme `{0}`")]
	UnknownColorScheme(String),

	/// Not one of the ten interpolation names.
	#[error("unknown curve type `{0}`")]
	UnknownCurve(String),

	/// No chart entry in any group matches the selector.
	#[error("no chart matches selector `{0}`")]
	UnknownChart(String),

	/// Theme name other than `dark` or `light`.
	#[error("unknown theme `{0}`")]
	UnknownTheme(String),

	/// Orientation code other than LR, RL, TB or BT.
	#[error("unknown orientation `{0}`")]
	UnknownOrientation(String),

	/// The canvas or its 2d context could not be obtained.
	#[error("canvas unavailable: {0}")]
	Canvas(String),

	/// The browser refused to schedule the interval.
	#[error("failed to schedule timer: {0}")]
	Timer(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn messages_name_the_missing_key() {
		assert_eq!(
			Error::UnknownColorScheme("sunset".into()).to_string(),
			"unknown color scheme `sunset`"
		);
		assert_eq!(
			Error::UnknownChart("pie".into()).to_string(),
			"no chart matches selector `pie`"
		);
	}
}
