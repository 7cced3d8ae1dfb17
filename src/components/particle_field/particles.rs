//! Drifting particles that bounce off the surface edges.

use super::config::FieldConfig;
use super::theme::Hsl;

/// Saturation and lightness of every particle's base color.
const SATURATION: f64 = 70.0;
const LIGHTNESS: f64 = 60.0;

/// Area particles move in, in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
	/// Right edge.
	pub width: f64,
	/// Bottom edge.
	pub height: f64,
}

impl Bounds {
	/// Inclusive of the edges.
	pub fn contains(&self, x: f64, y: f64) -> bool {
		(0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
	}
}

/// Which velocity components flipped during one step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reflection {
	/// Horizontal velocity flipped.
	pub x: bool,
	/// Vertical velocity flipped.
	pub y: bool,
}

/// A single floating particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	/// Position in CSS pixels.
	pub x: f64,
	/// Position in CSS pixels.
	pub y: f64,
	/// Radius in CSS pixels.
	pub size: f64,
	/// Horizontal pixels per step.
	pub speed_x: f64,
	/// Vertical pixels per step.
	pub speed_y: f64,
	/// Hue in degrees.
	pub hue: f64,
	/// Fill alpha under the light theme.
	pub opacity: f64,
}

impl Particle {
	/// Base fill color.
	pub fn color(&self) -> Hsl {
		Hsl::new(self.hue, SATURATION, LIGHTNESS)
	}

	/// Advances by one velocity step and reflects off any edge crossed.
	pub fn step(&mut self, bounds: Bounds) -> Reflection {
		self.x += self.speed_x;
		self.y += self.speed_y;
		Reflection {
			x: reflect(&mut self.x, &mut self.speed_x, bounds.width),
			y: reflect(&mut self.y, &mut self.speed_y, bounds.height),
		}
	}
}

/// Brings an out-of-range coordinate back inside `[0, max]` and points the
/// velocity inward. Returns whether the velocity sign changed.
///
/// An overshoot within the last step is mirrored at the edge. A particle that
/// was already outside, left there by a shrinking viewport, is clamped to the
/// nearest edge instead.
fn reflect(pos: &mut f64, speed: &mut f64, max: f64) -> bool {
	let max = max.max(0.0);
	let (edge, inward) = if *pos < 0.0 {
		(0.0, 1.0)
	} else if *pos > max {
		(max, -1.0)
	} else {
		return false;
	};
	let overshoot = (*pos - edge).abs();
	let outward = *speed * inward < 0.0;
	*pos = if overshoot > speed.abs() {
		edge
	} else {
		(2.0 * edge - *pos).clamp(0.0, max)
	};
	*speed = speed.abs() * inward;
	outward
}

/// Deterministic scatter sequence for spawning.
///
/// Sine-hash noise: cheap, reproducible from a seed, and plenty for a
/// decorative backdrop.
#[derive(Clone, Debug)]
pub struct Scatter {
	seed: f64,
	cursor: u64,
}

impl Scatter {
	/// Starts the sequence at `seed`.
	pub fn new(seed: f64) -> Self {
		Self { seed, cursor: 0 }
	}

	/// Next sample in `[0, 1)`.
	pub fn sample(&mut self) -> f64 {
		self.cursor += 1;
		pseudo_random(self.seed + self.cursor as f64 * 0.618_033_988_75)
	}
}

fn pseudo_random(seed: f64) -> f64 {
	let x = (seed * 12.9898 + seed * 78.233).sin() * 43758.5453;
	let fract = x - x.floor();
	if fract >= 1.0 { 0.0 } else { fract }
}

/// The particle collection and the bounds it bounces within.
pub struct ParticleSystem {
	/// In spawn order; link scanning depends on it.
	pub particles: Vec<Particle>,
	bounds: Bounds,
}

impl ParticleSystem {
	/// Spawns `count` particles uniformly over `bounds`.
	pub fn spawn(config: &FieldConfig, count: usize, bounds: Bounds, scatter: &mut Scatter) -> Self {
		let mut particles = Vec::with_capacity(count);

		for _ in 0..count {
			particles.push(Particle {
				x: scatter.sample() * bounds.width,
				y: scatter.sample() * bounds.height,
				size: scatter.sample() * config.size_span + config.size_min,
				speed_x: (scatter.sample() - 0.5) * config.max_speed,
				speed_y: (scatter.sample() - 0.5) * config.max_speed,
				hue: scatter.sample() * config.hue_span + config.hue_min,
				opacity: scatter.sample() * config.opacity_span + config.opacity_min,
			});
		}

		Self { particles, bounds }
	}

	/// Wraps an existing collection.
	pub fn from_particles(particles: Vec<Particle>, bounds: Bounds) -> Self {
		Self { particles, bounds }
	}

	/// Current bounds.
	pub fn bounds(&self) -> Bounds {
		self.bounds
	}

	/// Particle count.
	pub fn len(&self) -> usize {
		self.particles.len()
	}

	/// Changes the bounds without moving any particle.
	pub fn resize(&mut self, bounds: Bounds) {
		self.bounds = bounds;
	}
}
