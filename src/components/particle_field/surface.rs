//! Drawing surfaces and viewport metrics.
//!
//! # Coordinate Spaces
//!
//! - **CSS pixels**: the space particles live in. The viewport is measured in
//!   CSS pixels and all drawing commands use them.
//! - **Device pixels**: the canvas backing store, `css × dpr`. The context
//!   transform maps one onto the other so strokes stay crisp on high-density
//!   displays.

use js_sys::{Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::error::MountError;
use super::particles::Bounds;

/// Viewport size in CSS pixels plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	/// Width in CSS pixels.
	pub width: f64,
	/// Height in CSS pixels.
	pub height: f64,
	/// Device pixels per CSS pixel.
	pub dpr: f64,
}

impl Viewport {
	/// Builds a viewport, treating a missing or nonsensical ratio as 1.
	pub fn new(width: f64, height: f64, dpr: f64) -> Self {
		let dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
		Self {
			width: width.max(0.0),
			height: height.max(0.0),
			dpr,
		}
	}

	/// The area particles bounce within.
	pub fn bounds(&self) -> Bounds {
		Bounds {
			width: self.width,
			height: self.height,
		}
	}

	/// Backing store size in device pixels.
	pub fn pixel_size(&self) -> (u32, u32) {
		(
			(self.width * self.dpr) as u32,
			(self.height * self.dpr) as u32,
		)
	}
}

/// Shadow glow around a filled shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Glow<'a> {
	/// Shadow blur radius.
	pub blur: f64,
	/// CSS shadow color.
	pub color: &'a str,
}

/// A 2D drawing target. Coordinates are CSS pixels.
pub trait Surface {
	/// Matches the backing store and transform to `viewport`.
	fn resize(&mut self, viewport: &Viewport);

	/// Erases the whole surface.
	fn clear(&mut self, width: f64, height: f64);

	/// Fills a circle; `glow: None` draws without a shadow.
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, fill: &str, glow: Option<Glow<'_>>);

	/// Strokes a straight segment.
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &str, width: f64);
}

/// [`Surface`] backed by an HTML canvas 2D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Acquires a transparent 2D context on `canvas`.
	pub fn acquire(canvas: HtmlCanvasElement) -> Result<Self, MountError> {
		let options = Object::new();
		Reflect::set(&options, &JsValue::from_str("alpha"), &JsValue::TRUE)?;
		let ctx = canvas
			.get_context_with_context_options("2d", &options)?
			.ok_or(MountError::ContextUnavailable)?
			.dyn_into::<CanvasRenderingContext2d>()
			.map_err(|_| MountError::ContextUnavailable)?;
		Ok(Self { canvas, ctx })
	}
}

impl Surface for CanvasSurface {
	fn resize(&mut self, viewport: &Viewport) {
		let (pw, ph) = viewport.pixel_size();
		self.canvas.set_width(pw);
		self.canvas.set_height(ph);
		let style = self.canvas.style();
		let _ = style.set_property("width", &format!("{}px", viewport.width));
		let _ = style.set_property("height", &format!("{}px", viewport.height));
		// Resizing the backing store resets the context, so the scale is set
		// absolutely rather than accumulated.
		let _ = self
			.ctx
			.set_transform(viewport.dpr, 0.0, 0.0, viewport.dpr, 0.0, 0.0);
	}

	fn clear(&mut self, width: f64, height: f64) {
		self.ctx.clear_rect(0.0, 0.0, width, height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, fill: &str, glow: Option<Glow<'_>>) {
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius, 0.0, std::f64::consts::TAU);
		self.ctx.set_fill_style_str(fill);
		match glow {
			Some(glow) => {
				self.ctx.set_shadow_blur(glow.blur);
				self.ctx.set_shadow_color(glow.color);
			}
			None => self.ctx.set_shadow_blur(0.0),
		}
		self.ctx.fill();
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &str, width: f64) {
		self.ctx.begin_path();
		self.ctx.set_stroke_style_str(stroke);
		self.ctx.set_line_width(width);
		self.ctx.move_to(from.0, from.1);
		self.ctx.line_to(to.0, to.1);
		self.ctx.stroke();
	}
}
