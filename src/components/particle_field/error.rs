//! Errors raised while mounting the particle field.

use std::fmt;

use wasm_bindgen::JsValue;

/// Why the field could not be mounted. The component treats every variant the
/// same way: log it and leave the canvas blank.
#[derive(Debug, Clone, PartialEq)]
pub enum MountError {
	/// No `window` global (not running in a browser).
	NoWindow,
	/// No document or document root element.
	NoDocument,
	/// The canvas would not hand out a 2D context.
	ContextUnavailable,
	/// A DOM call threw.
	Js(String),
}

impl fmt::Display for MountError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			MountError::NoWindow => write!(f, "no window available"),
			MountError::NoDocument => write!(f, "no document root element"),
			MountError::ContextUnavailable => write!(f, "canvas 2d context unavailable"),
			MountError::Js(msg) => write!(f, "DOM call failed: {}", msg),
		}
	}
}

impl std::error::Error for MountError {}

impl From<JsValue> for MountError {
	fn from(value: JsValue) -> Self {
		MountError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
	}
}
