//! Per-frame drawing of the particle field.
//!
//! A frame is drawn in passes so links sit on top of the particles:
//! 1. Clear the surface
//! 2. Step and draw each particle
//! 3. Draw links between nearby particles

use super::links;
use super::particles::{Particle, ParticleSystem};
use super::surface::{Glow, Surface};
use super::theme::ThemeStyle;

/// What a drawn frame put on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
	/// Particles stepped and drawn.
	pub particles: usize,
	/// Links stroked.
	pub links: usize,
}

/// Advances the field one step and draws it.
pub fn render<S: Surface>(
	surface: &mut S,
	system: &mut ParticleSystem,
	style: &ThemeStyle,
	neighbor_window: usize,
) -> FrameStats {
	let bounds = system.bounds();
	surface.clear(bounds.width, bounds.height);

	for p in &mut system.particles {
		p.step(bounds);
		draw_particle(surface, p, style);
	}

	let links = draw_links(surface, &system.particles, style, neighbor_window);

	FrameStats {
		particles: system.len(),
		links,
	}
}

fn draw_particle<S: Surface>(surface: &mut S, p: &Particle, style: &ThemeStyle) {
	let color = p.color();
	if style.glow {
		let shadow = color.to_css();
		surface.fill_circle(
			p.x,
			p.y,
			p.size,
			&color.with_lightness(style.glow_lightness).to_css(),
			Some(Glow {
				blur: p.size * style.glow_blur,
				color: &shadow,
			}),
		);
	} else {
		surface.fill_circle(p.x, p.y, p.size, &color.to_css_alpha(p.opacity), None);
	}
}

fn draw_links<S: Surface>(
	surface: &mut S,
	particles: &[Particle],
	style: &ThemeStyle,
	neighbor_window: usize,
) -> usize {
	let mut drawn = 0;
	for link in links::scan(particles, neighbor_window, style.link_distance) {
		let Some(opacity) = style.link_opacity(link.distance) else {
			continue;
		};
		let (a, b) = (&particles[link.a], &particles[link.b]);
		surface.stroke_line(
			(a.x, a.y),
			(b.x, b.y),
			&style.link_stroke(opacity),
			style.link_width,
		);
		drawn += 1;
	}
	drawn
}
