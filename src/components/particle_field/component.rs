//! Leptos component wrapping the particle field canvas.
//!
//! The component renders a full-bleed canvas, and once it is in the DOM mounts
//! the field on it: a 2D context, a `requestAnimationFrame` loop, a window
//! resize listener and a `MutationObserver` on the document root's class. All
//! of it is released when the owning scope is cleaned up.

use leptos::prelude::*;
use log::warn;
use web_sys::HtmlCanvasElement;

use super::config::FieldConfig;
use super::error::MountError;
use super::page::BrowserPage;
use super::runtime::{self, MountedField};
use super::scheduler::AnimationFrames;
use super::surface::CanvasSurface;

type BrowserField = MountedField<CanvasSurface, AnimationFrames>;

/// Renders the animated particle backdrop.
///
/// Takes no required props: size comes from the window and the theme from
/// the `dark` class on `<html>`. Without an explicit `config`, each mount gets
/// a fresh random scatter.
#[component]
pub fn ParticleField(#[prop(optional)] config: Option<FieldConfig>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let mounted: StoredValue<Option<BrowserField>, LocalStorage> = StoredValue::new_local(None);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if mounted.with_value(Option::is_some) {
			return;
		}
		let config = config.clone().unwrap_or_default();
		match mount_on(canvas, config) {
			Ok(field) => mounted.set_value(Some(field)),
			// A blank canvas is the whole fallback.
			Err(e) => warn!("particle-field: not started: {}", e),
		}
	});

	on_cleanup(move || {
		if let Some(field) = mounted.try_update_value(Option::take).flatten() {
			field.unmount();
		}
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field"
			aria-hidden="true"
			style="position: absolute; inset: 0; display: block; pointer-events: none;"
		/>
	}
}

fn mount_on(canvas: HtmlCanvasElement, config: FieldConfig) -> Result<BrowserField, MountError> {
	let surface = CanvasSurface::acquire(canvas)?;
	let page = std::rc::Rc::new(BrowserPage::new()?);
	let config = match config.seed {
		Some(_) => config,
		None => config.with_seed(js_sys::Math::random() * 1000.0),
	};
	runtime::mount(&page, surface, AnimationFrames::default(), config)
}
