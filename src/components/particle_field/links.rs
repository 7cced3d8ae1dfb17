//! Proximity links between particles.
//!
//! Each particle is only compared with the particles that follow it within a
//! fixed index window, not with its true nearest neighbors. Collection order is
//! random, so this reads as a sparse random subset of the nearby pairs while
//! keeping the per-frame cost linear in the particle count.

use super::particles::Particle;

/// A pair of particles close enough to be joined.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
	pub a: usize,
	pub b: usize,
	pub distance: f64,
}

/// Yields every pair `(a, b)` with `a < b < a + window` whose separation is
/// below `max_distance`.
pub fn scan(
	particles: &[Particle],
	window: usize,
	max_distance: f64,
) -> impl Iterator<Item = Link> + '_ {
	let n = particles.len();
	(0..n).flat_map(move |a| {
		let limit = a.saturating_add(window).min(n);
		(a + 1..limit).filter_map(move |b| {
			let (pa, pb) = (&particles[a], &particles[b]);
			let (dx, dy) = (pa.x - pb.x, pa.y - pb.y);
			let distance = (dx * dx + dy * dy).sqrt();
			(distance < max_distance).then_some(Link { a, b, distance })
		})
	})
}
