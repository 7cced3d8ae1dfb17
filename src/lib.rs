//! hero-field: ambient particle backdrop for a personal site's hero section.
//!
//! This crate provides a WASM canvas component that animates a field of
//! drifting, linked particles and follows the page's light/dark theme.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::particle_field::{FieldConfig, MountError, ParticleField, ThemeMode};

use components::particle_field::page::DARK_CLASS;

/// Id of the optional `<script type="application/json">` holding a
/// [`FieldConfig`] override.
pub const CONFIG_ELEMENT_ID: &str = "particle-field-config";

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("hero-field: logging initialized");
}

/// Load a field config override from a script element with
/// `id="particle-field-config"`. Absent or malformed config yields `None`.
pub fn load_field_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!("hero-field: loaded config override");
			Some(config)
		}
		Err(e) => {
			warn!("hero-field: failed to parse field config: {}", e);
			None
		}
	}
}

/// Flips the `dark` class on the document root.
fn toggle_dark_class() {
	let Some(root) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.document_element())
	else {
		return;
	};
	if let Err(e) = root.class_list().toggle(DARK_CLASS) {
		warn!("hero-field: could not toggle theme: {:?}", e);
	}
}

/// Main application component.
/// A hero section with the particle backdrop and a theme toggle.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_field_config().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Home" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<section class="hero">
			<ParticleField config=config />
			<div class="hero-overlay">
				<h1>"Hello, I'm building things"</h1>
				<p class="subtitle">"Notes, projects and experiments."</p>
				<button class="theme-toggle" on:click=move |_| toggle_dark_class()>
					"Toggle theme"
				</button>
			</div>
		</section>
	}
}
