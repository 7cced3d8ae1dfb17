//! Display-refresh scheduling.
//!
//! [`FrameLoop`] turns a one-shot "call me on the next frame" primitive into a
//! repeating task that can be stopped from outside. The browser primitive is
//! `requestAnimationFrame`, wrapped by [`AnimationFrames`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;

/// Handle of a pending frame callback.
pub type FrameId = i32;

/// Runs a bound callback once on the next display refresh per request.
pub trait FrameScheduler {
	/// Sets the callback every later [`request`](Self::request) will run.
	fn bind(&self, tick: Box<dyn FnMut()>);

	/// Schedules the bound callback, returning its handle.
	fn request(&self) -> Option<FrameId>;

	/// Drops a pending request.
	fn cancel(&self, id: FrameId);
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for Rc<T> {
	fn bind(&self, tick: Box<dyn FnMut()>) {
		(**self).bind(tick)
	}

	fn request(&self) -> Option<FrameId> {
		(**self).request()
	}

	fn cancel(&self, id: FrameId) {
		(**self).cancel(id)
	}
}

/// A repeating frame task with a stored cancellation handle.
///
/// At most one frame is pending at a time. Once stopped, the loop never
/// reschedules, even if the host still delivers a callback it failed to
/// cancel.
pub struct FrameLoop<S> {
	scheduler: S,
	pending: Cell<Option<FrameId>>,
	stopped: Cell<bool>,
}

impl<S: FrameScheduler> FrameLoop<S> {
	/// An idle loop on `scheduler`; nothing runs until [`start`](Self::start).
	pub fn new(scheduler: S) -> Self {
		Self {
			scheduler,
			pending: Cell::new(None),
			stopped: Cell::new(false),
		}
	}

	/// Binds `body` as the per-frame work and schedules the first frame.
	///
	/// The bound callback only holds a weak reference back to the loop, so
	/// dropping the last `Rc` ends it.
	pub fn start(frames: &Rc<Self>, mut body: impl FnMut() + 'static)
	where
		S: 'static,
	{
		let weak = Rc::downgrade(frames);
		frames.scheduler.bind(Box::new(move || {
			let Some(frames) = weak.upgrade() else {
				return;
			};
			frames.pending.set(None);
			if frames.stopped.get() {
				return;
			}
			body();
			frames.schedule();
		}));
		frames.schedule();
	}

	fn schedule(&self) {
		if !self.stopped.get() {
			self.pending.set(self.scheduler.request());
		}
	}

	/// Cancels the pending frame and stops rescheduling.
	pub fn stop(&self) {
		self.stopped.set(true);
		if let Some(id) = self.pending.take() {
			self.scheduler.cancel(id);
		}
	}

	/// Handle of the requested frame, if any.
	pub fn pending(&self) -> Option<FrameId> {
		self.pending.get()
	}

	/// False once [`stop`](Self::stop) was called.
	pub fn is_running(&self) -> bool {
		!self.stopped.get()
	}
}

/// `requestAnimationFrame`-backed scheduler.
#[derive(Default)]
pub struct AnimationFrames {
	callback: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl FrameScheduler for AnimationFrames {
	fn bind(&self, tick: Box<dyn FnMut()>) {
		*self.callback.borrow_mut() = Some(Closure::wrap(tick));
	}

	fn request(&self) -> Option<FrameId> {
		let window = web_sys::window()?;
		let callback = self.callback.borrow();
		window
			.request_animation_frame(callback.as_ref()?.as_ref().unchecked_ref())
			.ok()
	}

	fn cancel(&self, id: FrameId) {
		if let Some(window) = web_sys::window() {
			let _ = window.cancel_animation_frame(id);
		}
	}
}
