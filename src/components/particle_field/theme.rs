//! Visual theming for the particle field.
//!
//! The field reads a single light/dark signal from the page and picks one of
//! two [`ThemeStyle`]s. The dark style trades density and frame rate for glow,
//! the light style draws every frame with translucent particles.

use serde::Deserialize;

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	/// Alpha in `0..=1`; defaults to opaque.
	#[serde(default = "opaque")]
	pub a: f64,
}

fn opaque() -> f64 {
	1.0
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Same color at alpha `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Hex when opaque, `rgba(..)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Hue/saturation/lightness color. Particles carry only a hue; saturation and
/// lightness are fixed per draw mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
	/// Hue in degrees.
	pub hue: f64,
	/// Saturation in percent.
	pub saturation: f64,
	/// Lightness in percent.
	pub lightness: f64,
}

impl Hsl {
	/// Hue in degrees, saturation and lightness in percent.
	pub const fn new(hue: f64, saturation: f64, lightness: f64) -> Self {
		Self {
			hue,
			saturation,
			lightness,
		}
	}

	/// Same hue and saturation at another lightness.
	pub fn with_lightness(self, lightness: f64) -> Self {
		Self { lightness, ..self }
	}

	/// `hsl(..)` string.
	pub fn to_css(self) -> String {
		format!(
			"hsl({}, {}%, {}%)",
			self.hue, self.saturation, self.lightness
		)
	}

	/// `hsla(..)` string at `alpha`.
	pub fn to_css_alpha(self, alpha: f64) -> String {
		format!(
			"hsla({}, {}%, {}%, {})",
			self.hue, self.saturation, self.lightness, alpha
		)
	}
}

/// The page theme as seen by the field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
	/// No `dark` class on the root.
	#[default]
	Light,
	/// Root carries the `dark` class.
	Dark,
}

impl ThemeMode {
	/// Maps the presence of the root `dark` class to a mode.
	pub fn from_dark(dark: bool) -> Self {
		if dark { Self::Dark } else { Self::Light }
	}

	/// Whether this is [`ThemeMode::Dark`].
	pub fn is_dark(self) -> bool {
		self == Self::Dark
	}

	/// Lowercase name for logs.
	pub fn name(self) -> &'static str {
		match self {
			Self::Light => "light",
			Self::Dark => "dark",
		}
	}
}

/// Per-theme density, link and glow parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ThemeStyle {
	/// Viewport CSS pixels per spawned particle.
	pub width_per_particle: f64,
	/// Particles closer than this are linked.
	pub link_distance: f64,
	/// How much of the link alpha is lost at `link_distance` (0..1).
	pub link_fade: f64,
	/// Alpha multiplier applied after fading.
	pub link_alpha: f64,
	/// Base link stroke color; alpha is replaced per link.
	pub link_color: Color,
	/// Link stroke width.
	pub link_width: f64,
	/// Draw particles opaque with a shadow glow instead of translucent.
	pub glow: bool,
	/// Shadow blur per unit of particle radius.
	pub glow_blur: f64,
	/// Fill lightness (percent) used when glowing.
	pub glow_lightness: f64,
	/// Draw on one of every `frame_interval` scheduled frames.
	pub frame_interval: u32,
}

impl ThemeStyle {
	/// Denser field, translucent particles, every frame drawn.
	pub fn light() -> Self {
		Self {
			width_per_particle: 10.0,
			link_distance: 120.0,
			link_fade: 1.0,
			link_alpha: 0.4,
			link_color: Color::rgb(100, 150, 220),
			link_width: 0.2,
			glow: false,
			glow_blur: 0.0,
			glow_lightness: 60.0,
			frame_interval: 1,
		}
	}

	/// Sparser glowing field drawn on every third frame to bound the cost of
	/// shadow blur.
	pub fn dark() -> Self {
		Self {
			width_per_particle: 15.0,
			link_distance: 100.0,
			link_fade: 0.8,
			link_alpha: 0.7,
			link_color: Color::rgb(150, 200, 255),
			link_width: 0.4,
			glow: true,
			glow_blur: 1.5,
			glow_lightness: 70.0,
			frame_interval: 3,
		}
	}

	/// Number of particles to spawn for a viewport this wide.
	pub fn particle_count(&self, viewport_width: f64) -> usize {
		if self.width_per_particle <= 0.0 || viewport_width <= 0.0 {
			return 0;
		}
		(viewport_width / self.width_per_particle).floor() as usize
	}

	/// Link alpha at `distance`, or `None` when the pair is too far apart.
	pub fn link_opacity(&self, distance: f64) -> Option<f64> {
		if distance < self.link_distance {
			Some((1.0 - distance / self.link_distance * self.link_fade) * self.link_alpha)
		} else {
			None
		}
	}

	/// CSS stroke for a link drawn at `opacity`.
	pub fn link_stroke(&self, opacity: f64) -> String {
		self.link_color.with_alpha(opacity).to_css()
	}
}

/// A [`ThemeStyle`] as written in a config override. Absent fields keep the
/// value of the style it is applied to.
#[derive(Debug, Default, Deserialize)]
pub(super) struct StyleOverride {
	width_per_particle: Option<f64>,
	link_distance: Option<f64>,
	link_fade: Option<f64>,
	link_alpha: Option<f64>,
	link_color: Option<Color>,
	link_width: Option<f64>,
	glow: Option<bool>,
	glow_blur: Option<f64>,
	glow_lightness: Option<f64>,
	frame_interval: Option<u32>,
}

impl StyleOverride {
	pub(super) fn apply(self, base: ThemeStyle) -> ThemeStyle {
		ThemeStyle {
			width_per_particle: self.width_per_particle.unwrap_or(base.width_per_particle),
			link_distance: self.link_distance.unwrap_or(base.link_distance),
			link_fade: self.link_fade.unwrap_or(base.link_fade),
			link_alpha: self.link_alpha.unwrap_or(base.link_alpha),
			link_color: self.link_color.unwrap_or(base.link_color),
			link_width: self.link_width.unwrap_or(base.link_width),
			glow: self.glow.unwrap_or(base.glow),
			glow_blur: self.glow_blur.unwrap_or(base.glow_blur),
			glow_lightness: self.glow_lightness.unwrap_or(base.glow_lightness),
			frame_interval: self.frame_interval.unwrap_or(base.frame_interval),
		}
	}
}
