//! Ambient particle field for a hero backdrop.
//!
//! Renders drifting particles on a full-bleed canvas with:
//! - Elastic bouncing off the viewport edges
//! - Faint links between particles close in both space and collection order
//! - Light/dark styling driven by the `dark` class on the document root
//! - Frame skipping under the dark theme to offset the cost of glow
//!
//! # Example
//!
//! ```ignore
//! use hero_field::{FieldConfig, ParticleField};
//!
//! view! {
//!     <section class="hero">
//!         <ParticleField />
//!     </section>
//! }
//! ```

mod component;
pub mod config;
mod error;
mod links;
pub mod page;
mod particles;
mod render;
pub mod runtime;
pub mod scheduler;
mod state;
pub mod surface;
#[cfg(test)]
mod testing;
pub mod theme;

pub use component::ParticleField;
pub use config::FieldConfig;
pub use error::MountError;
pub use render::FrameStats;
pub use runtime::{MountedField, mount};
pub use theme::{ThemeMode, ThemeStyle};
