//! Tunable parameters for the particle field.
//!
//! Every field has a default matching the stock hero animation, so a page can
//! override a single knob with a JSON object such as `{"neighbor_window": 24}`.

use serde::{Deserialize, Deserializer};

use super::theme::{StyleOverride, ThemeMode, ThemeStyle};

/// Spawn ranges, link scan window and per-theme styles.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
	/// Each particle is compared with the particles that follow it in the
	/// collection, up to this many indices ahead (counting itself).
	pub neighbor_window: usize,
	/// Full range of each velocity component; speeds fall in `±max_speed / 2`.
	pub max_speed: f64,
	/// Smallest radius; radii fall in `size_min..size_min + size_span`.
	pub size_min: f64,
	/// Width of the radius range.
	pub size_span: f64,
	/// Lowest hue in degrees.
	pub hue_min: f64,
	/// Width of the hue range.
	pub hue_span: f64,
	/// Lowest light-theme fill alpha.
	pub opacity_min: f64,
	/// Width of the alpha range.
	pub opacity_span: f64,
	/// Pins the scatter seed. Unset, the component seeds from the browser RNG.
	pub seed: Option<f64>,
	/// Light theme style. A partial object overrides only the keys it names.
	#[serde(deserialize_with = "light_style")]
	pub light: ThemeStyle,
	/// Dark theme style. A partial object overrides only the keys it names.
	#[serde(deserialize_with = "dark_style")]
	pub dark: ThemeStyle,
}

fn light_style<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ThemeStyle, D::Error> {
	StyleOverride::deserialize(deserializer).map(|o| o.apply(ThemeStyle::light()))
}

fn dark_style<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ThemeStyle, D::Error> {
	StyleOverride::deserialize(deserializer).map(|o| o.apply(ThemeStyle::dark()))
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			neighbor_window: 40,
			max_speed: 1.5,
			size_min: 1.0,
			size_span: 2.0,
			hue_min: 200.0,
			hue_span: 60.0,
			opacity_min: 0.3,
			opacity_span: 0.5,
			seed: None,
			light: ThemeStyle::light(),
			dark: ThemeStyle::dark(),
		}
	}
}

impl FieldConfig {
	/// Parses a JSON override; missing fields keep their defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// Style for `mode`.
	pub fn style(&self, mode: ThemeMode) -> &ThemeStyle {
		match mode {
			ThemeMode::Light => &self.light,
			ThemeMode::Dark => &self.dark,
		}
	}

	/// Pins the scatter seed.
	pub fn with_seed(self, seed: f64) -> Self {
		Self {
			seed: Some(seed),
			..self
		}
	}
}
