//! Field state: particles, the cached theme flag and the frame-skip counter.
//!
//! Created once when the component mounts, then mutated by the frame loop,
//! the resize listener and the theme observer. None of them touch the
//! surface directly except through [`FieldState::frame`].

use super::config::FieldConfig;
use super::particles::{ParticleSystem, Scatter};
use super::render::{self, FrameStats};
use super::surface::{Surface, Viewport};
use super::theme::{ThemeMode, ThemeStyle};

/// Result of one scheduled frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
	/// Dropped by frame skipping; nothing moved or was drawn.
	Skipped,
	/// Stepped and drawn.
	Drawn(FrameStats),
}

/// Everything the field carries between frames.
pub struct FieldState {
	config: FieldConfig,
	mode: ThemeMode,
	viewport: Viewport,
	system: ParticleSystem,
	scatter: Scatter,
	frame_skip: u32,
}

impl FieldState {
	/// Spawns a field sized for `viewport` under `mode`.
	pub fn new(config: FieldConfig, viewport: Viewport, mode: ThemeMode) -> Self {
		let mut scatter = Scatter::new(config.seed.unwrap_or_default());
		let count = config.style(mode).particle_count(viewport.width);
		let system = ParticleSystem::spawn(&config, count, viewport.bounds(), &mut scatter);
		Self {
			config,
			mode,
			viewport,
			system,
			scatter,
			frame_skip: 0,
		}
	}

	/// Replaces the whole collection, sized for the current viewport and theme.
	pub fn reinit(&mut self) {
		let count = self.style().particle_count(self.viewport.width);
		self.system = ParticleSystem::spawn(
			&self.config,
			count,
			self.viewport.bounds(),
			&mut self.scatter,
		);
	}

	/// Caches the new theme. Returns whether it changed.
	pub fn set_theme(&mut self, mode: ThemeMode) -> bool {
		let changed = self.mode != mode;
		self.mode = mode;
		changed
	}

	/// Adopts new bounds; particles keep their positions.
	pub fn resize(&mut self, viewport: Viewport) {
		self.viewport = viewport;
		self.system.resize(viewport.bounds());
	}

	/// Runs one scheduled frame: skip it, or step and draw the field.
	pub fn frame<S: Surface>(&mut self, surface: &mut S) -> FrameOutcome {
		if self.skip_frame() {
			return FrameOutcome::Skipped;
		}
		let style = self.config.style(self.mode);
		FrameOutcome::Drawn(render::render(
			surface,
			&mut self.system,
			style,
			self.config.neighbor_window,
		))
	}

	/// Advances the skip counter. With an interval of `n`, the first `n - 1`
	/// calls of each cycle skip and the `n`th draws, so a dark field skips its
	/// very first frame.
	fn skip_frame(&mut self) -> bool {
		let interval = self.style().frame_interval.max(1);
		if self.frame_skip + 1 < interval {
			self.frame_skip += 1;
			true
		} else {
			self.frame_skip = 0;
			false
		}
	}

	/// Style for the cached theme.
	pub fn style(&self) -> &ThemeStyle {
		self.config.style(self.mode)
	}

	pub fn mode(&self) -> ThemeMode {
		self.mode
	}

	pub fn viewport(&self) -> Viewport {
		self.viewport
	}

	pub fn system(&self) -> &ParticleSystem {
		&self.system
	}

	/// Frames skipped so far in the current cycle.
	pub fn frame_skip(&self) -> u32 {
		self.frame_skip
	}
}
