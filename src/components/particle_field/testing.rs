//! In-memory stand-ins for the browser: a surface that records draw calls, a
//! frame scheduler fired by hand, and a page whose viewport and theme are set
//! directly.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::error::MountError;
use super::page::{Page, Subscription};
use super::scheduler::{FrameId, FrameScheduler};
use super::surface::{Glow, Surface, Viewport};

#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
	Resize {
		pixel_width: u32,
		pixel_height: u32,
		dpr: f64,
	},
	Clear {
		width: f64,
		height: f64,
	},
	Circle {
		x: f64,
		y: f64,
		radius: f64,
		fill: String,
		glow: Option<(f64, String)>,
	},
	Line {
		from: (f64, f64),
		to: (f64, f64),
		stroke: String,
		width: f64,
	},
}

/// Records every call. Clones share the same log so a test can keep a handle
/// after moving the surface into a mount.
#[derive(Clone, Default)]
pub struct RecordingSurface {
	pub ops: Vec<DrawOp>,
	shared: Option<Rc<RefCell<Vec<DrawOp>>>>,
}

impl RecordingSurface {
	pub fn shared() -> (Self, Rc<RefCell<Vec<DrawOp>>>) {
		let log = Rc::new(RefCell::new(Vec::new()));
		(
			Self {
				ops: Vec::new(),
				shared: Some(log.clone()),
			},
			log,
		)
	}

	pub fn lines(&self) -> Vec<DrawOp> {
		self.ops
			.iter()
			.filter(|op| matches!(op, DrawOp::Line { .. }))
			.cloned()
			.collect()
	}

	fn push(&mut self, op: DrawOp) {
		if let Some(log) = &self.shared {
			log.borrow_mut().push(op.clone());
		}
		self.ops.push(op);
	}
}

impl Surface for RecordingSurface {
	fn resize(&mut self, viewport: &Viewport) {
		let (pixel_width, pixel_height) = viewport.pixel_size();
		self.push(DrawOp::Resize {
			pixel_width,
			pixel_height,
			dpr: viewport.dpr,
		});
	}

	fn clear(&mut self, width: f64, height: f64) {
		self.push(DrawOp::Clear { width, height });
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, fill: &str, glow: Option<Glow<'_>>) {
		self.push(DrawOp::Circle {
			x,
			y,
			radius,
			fill: fill.to_string(),
			glow: glow.map(|g| (g.blur, g.color.to_string())),
		});
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), stroke: &str, width: f64) {
		self.push(DrawOp::Line {
			from,
			to,
			stroke: stroke.to_string(),
			width,
		});
	}
}

/// Frame scheduler driven by [`ManualScheduler::fire`].
#[derive(Default)]
pub struct ManualScheduler {
	tick: RefCell<Option<Box<dyn FnMut()>>>,
	pending: Cell<Option<FrameId>>,
	next_id: Cell<FrameId>,
	pub cancelled: RefCell<Vec<FrameId>>,
}

impl ManualScheduler {
	pub fn pending(&self) -> Option<FrameId> {
		self.pending.get()
	}

	/// Runs the bound callback if a frame is pending. Returns whether it ran.
	pub fn fire(&self) -> bool {
		if self.pending.take().is_none() {
			return false;
		}
		let Some(mut tick) = self.tick.borrow_mut().take() else {
			return false;
		};
		tick();
		self.restore(tick);
		true
	}

	/// Runs the callback even with nothing pending, like a stale browser
	/// callback racing a cancel.
	pub fn fire_unrequested(&self) {
		let taken = self.tick.borrow_mut().take();
		if let Some(mut tick) = taken {
			tick();
			self.restore(tick);
		}
	}

	fn restore(&self, tick: Box<dyn FnMut()>) {
		if self.tick.borrow().is_none() {
			*self.tick.borrow_mut() = Some(tick);
		}
	}
}

impl FrameScheduler for ManualScheduler {
	fn bind(&self, tick: Box<dyn FnMut()>) {
		*self.tick.borrow_mut() = Some(tick);
	}

	fn request(&self) -> Option<FrameId> {
		let id = self.next_id.get() + 1;
		self.next_id.set(id);
		self.pending.set(Some(id));
		Some(id)
	}

	fn cancel(&self, id: FrameId) {
		if self.pending.get() == Some(id) {
			self.pending.set(None);
		}
		self.cancelled.borrow_mut().push(id);
	}
}

struct PageShared {
	viewport: Cell<Viewport>,
	dark: Cell<bool>,
	resize: RefCell<Option<Box<dyn FnMut()>>>,
	theme: RefCell<Option<Box<dyn FnMut(bool)>>>,
}

/// Page whose viewport and root `dark` class are set by the test.
pub struct ManualPage {
	shared: Rc<PageShared>,
}

/// Drives a [`ManualPage`] without keeping the page itself alive.
pub struct PageRemote {
	shared: Rc<PageShared>,
}

impl ManualPage {
	pub fn new(viewport: Viewport, dark: bool) -> Rc<Self> {
		Rc::new(Self {
			shared: Rc::new(PageShared {
				viewport: Cell::new(viewport),
				dark: Cell::new(dark),
				resize: RefCell::default(),
				theme: RefCell::default(),
			}),
		})
	}

	pub fn remote(&self) -> PageRemote {
		PageRemote {
			shared: self.shared.clone(),
		}
	}

	pub fn resize_attached(&self) -> bool {
		self.remote().resize_attached()
	}

	pub fn theme_attached(&self) -> bool {
		self.remote().theme_attached()
	}

	pub fn resize_to(&self, viewport: Viewport) {
		self.remote().resize_to(viewport);
	}

	pub fn set_dark(&self, dark: bool) {
		self.remote().set_dark(dark);
	}
}

impl PageRemote {
	pub fn resize_attached(&self) -> bool {
		self.shared.resize.borrow().is_some()
	}

	pub fn theme_attached(&self) -> bool {
		self.shared.theme.borrow().is_some()
	}

	/// Changes the viewport and notifies the resize listener.
	pub fn resize_to(&self, viewport: Viewport) {
		self.shared.viewport.set(viewport);
		let taken = self.shared.resize.borrow_mut().take();
		if let Some(mut cb) = taken {
			cb();
			let mut slot = self.shared.resize.borrow_mut();
			if slot.is_none() {
				*slot = Some(cb);
			}
		}
	}

	/// Toggles the root class and notifies the theme observer.
	pub fn set_dark(&self, dark: bool) {
		self.shared.dark.set(dark);
		let taken = self.shared.theme.borrow_mut().take();
		if let Some(mut cb) = taken {
			cb(dark);
			let mut slot = self.shared.theme.borrow_mut();
			if slot.is_none() {
				*slot = Some(cb);
			}
		}
	}
}

impl Page for ManualPage {
	fn viewport(&self) -> Viewport {
		self.shared.viewport.get()
	}

	fn is_dark(&self) -> bool {
		self.shared.dark.get()
	}

	fn on_resize(&self, callback: Box<dyn FnMut()>) -> Result<Subscription, MountError> {
		*self.shared.resize.borrow_mut() = Some(callback);
		let shared = self.shared.clone();
		Ok(Subscription::new(move || {
			// The listener may hold the last page handle; drop it unborrowed.
			let removed = shared.resize.borrow_mut().take();
			drop(removed);
		}))
	}

	fn on_theme_change(&self, callback: Box<dyn FnMut(bool)>) -> Result<Subscription, MountError> {
		*self.shared.theme.borrow_mut() = Some(callback);
		let shared = self.shared.clone();
		Ok(Subscription::new(move || {
			let removed = shared.theme.borrow_mut().take();
			drop(removed);
		}))
	}
}
