//! The page hosting the field: viewport, theme signal and change notifications.

use wasm_bindgen::prelude::*;
use web_sys::{Element, MutationObserver, MutationObserverInit, MutationRecord, Window};

use super::error::MountError;
use super::surface::Viewport;

/// Root element class that switches the page to its dark theme.
pub const DARK_CLASS: &str = "dark";

/// Detaches a listener or observer when cancelled or dropped.
pub struct Subscription {
	detach: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
	/// Wraps the teardown to run on cancel or drop.
	pub fn new(detach: impl FnOnce() + 'static) -> Self {
		Self {
			detach: Some(Box::new(detach)),
		}
	}

	/// False once detached.
	pub fn is_active(&self) -> bool {
		self.detach.is_some()
	}

	/// Detaches now.
	pub fn cancel(mut self) {
		self.release();
	}

	fn release(&mut self) {
		if let Some(detach) = self.detach.take() {
			detach();
		}
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		self.release();
	}
}

/// What the field needs from its surrounding page.
pub trait Page {
	/// Current CSS size and device pixel ratio.
	fn viewport(&self) -> Viewport;

	/// Whether the root element currently carries the dark class.
	fn is_dark(&self) -> bool;

	/// Calls back after every viewport resize.
	fn on_resize(&self, callback: Box<dyn FnMut()>) -> Result<Subscription, MountError>;

	/// Calls back with the new dark flag whenever the root's class changes.
	fn on_theme_change(&self, callback: Box<dyn FnMut(bool)>) -> Result<Subscription, MountError>;
}

/// The browser window and its document root.
#[derive(Clone)]
pub struct BrowserPage {
	window: Window,
	root: Element,
}

impl BrowserPage {
	/// Binds to the global window and its document element.
	pub fn new() -> Result<Self, MountError> {
		let window = web_sys::window().ok_or(MountError::NoWindow)?;
		let root = window
			.document()
			.and_then(|d| d.document_element())
			.ok_or(MountError::NoDocument)?;
		Ok(Self { window, root })
	}
}

fn root_is_dark(root: &Element) -> bool {
	root.class_list().contains(DARK_CLASS)
}

impl Page for BrowserPage {
	fn viewport(&self) -> Viewport {
		let dimension = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
		Viewport::new(
			dimension(self.window.inner_width()),
			dimension(self.window.inner_height()),
			self.window.device_pixel_ratio(),
		)
	}

	fn is_dark(&self) -> bool {
		root_is_dark(&self.root)
	}

	fn on_resize(&self, callback: Box<dyn FnMut()>) -> Result<Subscription, MountError> {
		let closure = Closure::wrap(callback);
		self.window
			.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
		let window = self.window.clone();
		Ok(Subscription::new(move || {
			let _ = window
				.remove_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
		}))
	}

	fn on_theme_change(
		&self,
		mut callback: Box<dyn FnMut(bool)>,
	) -> Result<Subscription, MountError> {
		let root = self.root.clone();
		let closure = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
			move |records: js_sys::Array, _: MutationObserver| {
				let class_changed = records.iter().any(|record| {
					record
						.dyn_into::<MutationRecord>()
						.ok()
						.and_then(|r| r.attribute_name())
						.is_some_and(|name| name == "class")
				});
				if class_changed {
					callback(root_is_dark(&root));
				}
			},
		);
		let observer = MutationObserver::new(closure.as_ref().unchecked_ref())?;
		let init = MutationObserverInit::new();
		init.set_attributes(true);
		observer.observe_with_options(&self.root, &init)?;
		Ok(Subscription::new(move || {
			observer.disconnect();
			drop(closure);
		}))
	}
}
