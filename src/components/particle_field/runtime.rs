//! Mount/unmount lifecycle.
//!
//! [`mount`] wires a [`FieldState`] and its surface to the page: it schedules
//! the frame loop, subscribes to viewport resizes and theme changes, and hands
//! back a [`MountedField`] that owns all three. Dropping or unmounting it
//! cancels the pending frame and detaches both subscriptions.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};

use super::config::FieldConfig;
use super::error::MountError;
use super::page::{Page, Subscription};
use super::scheduler::{FrameId, FrameLoop, FrameScheduler};
use super::state::{FieldState, FrameOutcome};
use super::surface::Surface;
use super::theme::ThemeMode;

/// Field state together with the surface it draws on.
struct FieldScene<S> {
	state: FieldState,
	surface: S,
}

impl<S: Surface> FieldScene<S> {
	fn frame(&mut self) -> FrameOutcome {
		self.state.frame(&mut self.surface)
	}
}

/// A running field. Owns the frame loop and page subscriptions.
pub struct MountedField<S, F: FrameScheduler> {
	scene: Rc<RefCell<FieldScene<S>>>,
	frames: Rc<FrameLoop<F>>,
	resize: Option<Subscription>,
	theme: Option<Subscription>,
}

/// Starts the field on `surface`, sized and themed from `page`.
pub fn mount<P, S, F>(
	page: &Rc<P>,
	mut surface: S,
	scheduler: F,
	config: FieldConfig,
) -> Result<MountedField<S, F>, MountError>
where
	P: Page + 'static,
	S: Surface + 'static,
	F: FrameScheduler + 'static,
{
	let viewport = page.viewport();
	let mode = ThemeMode::from_dark(page.is_dark());
	surface.resize(&viewport);
	let state = FieldState::new(config, viewport, mode);
	info!(
		"particle-field: {} particles, {} theme, {}x{} @{}x",
		state.system().len(),
		mode.name(),
		viewport.width,
		viewport.height,
		viewport.dpr
	);

	let scene = Rc::new(RefCell::new(FieldScene { state, surface }));

	// The listener owns the page handle; callers may drop theirs after mounting.
	let resize = {
		let (scene, host) = (Rc::downgrade(&scene), Rc::clone(page));
		page.on_resize(Box::new(move || {
			let Some(scene) = scene.upgrade() else {
				return;
			};
			let viewport = host.viewport();
			debug!(
				"particle-field: resize to {}x{} @{}x",
				viewport.width, viewport.height, viewport.dpr
			);
			let mut scene = scene.borrow_mut();
			scene.surface.resize(&viewport);
			scene.state.resize(viewport);
		}))?
	};

	let theme = {
		let scene = Rc::downgrade(&scene);
		page.on_theme_change(Box::new(move |dark| {
			let Some(scene) = scene.upgrade() else {
				return;
			};
			let mode = ThemeMode::from_dark(dark);
			if scene.borrow_mut().state.set_theme(mode) {
				debug!("particle-field: theme now {}", mode.name());
			}
		}))?
	};

	let frames = Rc::new(FrameLoop::new(scheduler));
	let scene_frames = Rc::downgrade(&scene);
	FrameLoop::start(&frames, move || {
		if let Some(scene) = scene_frames.upgrade() {
			scene.borrow_mut().frame();
		}
	});

	Ok(MountedField {
		scene,
		frames,
		resize: Some(resize),
		theme: Some(theme),
	})
}

impl<S, F: FrameScheduler> MountedField<S, F> {
	/// Stops the animation and detaches from the page.
	pub fn unmount(self) {
		drop(self);
	}

	/// Handle of the frame currently requested, if any.
	pub fn pending_frame(&self) -> Option<FrameId> {
		self.frames.pending()
	}

	/// Reads the current field state.
	pub fn with_state<R>(&self, f: impl FnOnce(&FieldState) -> R) -> R {
		f(&self.scene.borrow().state)
	}

	/// Respawns the particles for the current viewport and theme.
	pub fn reinit(&self) {
		let mut scene = self.scene.borrow_mut();
		scene.state.reinit();
		info!(
			"particle-field: reinitialized with {} particles",
			scene.state.system().len()
		);
	}
}

impl<S, F: FrameScheduler> Drop for MountedField<S, F> {
	fn drop(&mut self) {
		self.frames.stop();
		if let Some(resize) = self.resize.take() {
			resize.cancel();
		}
		if let Some(theme) = self.theme.take() {
			theme.cancel();
		}
		info!("particle-field: unmounted");
	}
}

#[cfg(test)]
mod tests {
	use super::super::surface::Viewport;
	use super::super::testing::{DrawOp, ManualPage, ManualScheduler, RecordingSurface};
	use super::*;

	fn config() -> FieldConfig {
		FieldConfig::default().with_seed(5.0)
	}

	fn draws(log: &RefCell<Vec<DrawOp>>) -> usize {
		log.borrow()
			.iter()
			.filter(|op| matches!(op, DrawOp::Clear { .. }))
			.count()
	}

	#[test]
	fn mount_sizes_surface_and_schedules_first_frame() {
		let page = ManualPage::new(Viewport::new(800.0, 600.0, 2.0), false);
		let (surface, log) = RecordingSurface::shared();
		let scheduler = Rc::new(ManualScheduler::default());
		let field = mount(&page, surface, scheduler.clone(), config()).unwrap();

		assert_eq!(
			log.borrow()[0],
			DrawOp::Resize {
				pixel_width: 1600,
				pixel_height: 1200,
				dpr: 2.0
			}
		);
		assert_eq!(field.with_state(|s| s.system().len()), 80);
		assert!(field.pending_frame().is_some());
		assert!(page.resize_attached());
		assert!(page.theme_attached());

		assert!(scheduler.fire());
		assert_eq!(draws(&log), 1);
	}

	#[test]
	fn unmount_stops_drawing_and_detaches_observers() {
		let page = ManualPage::new(Viewport::new(800.0, 600.0, 1.0), false);
		let (surface, log) = RecordingSurface::shared();
		let scheduler = Rc::new(ManualScheduler::default());
		let field = mount(&page, surface, scheduler.clone(), config()).unwrap();

		scheduler.fire();
		scheduler.fire();
		let handle = field.pending_frame().unwrap();
		assert_eq!(draws(&log), 2);

		field.unmount();

		assert_eq!(*scheduler.cancelled.borrow(), vec![handle]);
		assert_eq!(scheduler.pending(), None);
		assert!(!scheduler.fire());
		scheduler.fire_unrequested();
		assert!(!page.resize_attached());
		assert!(!page.theme_attached());

		let ops_after = log.borrow().len();
		page.resize_to(Viewport::new(1600.0, 1200.0, 1.0));
		page.set_dark(true);
		assert_eq!(log.borrow().len(), ops_after);
		assert_eq!(draws(&log), 2);
	}

	#[test]
	fn resize_rescales_surface_but_not_particles() {
		let page = ManualPage::new(Viewport::new(800.0, 600.0, 2.0), false);
		let (surface, log) = RecordingSurface::shared();
		let scheduler = Rc::new(ManualScheduler::default());
		let field = mount(&page, surface, scheduler, config()).unwrap();
		let before = field.with_state(|s| s.system().particles.clone());

		page.resize_to(Viewport::new(1600.0, 1200.0, 2.0));

		assert_eq!(
			log.borrow().last(),
			Some(&DrawOp::Resize {
				pixel_width: 3200,
				pixel_height: 2400,
				dpr: 2.0
			})
		);
		field.with_state(|s| {
			assert_eq!(s.viewport(), Viewport::new(1600.0, 1200.0, 2.0));
			assert_eq!(s.system().particles, before);
		});
	}

	#[test]
	fn resize_still_applies_after_caller_drops_page() {
		let page = ManualPage::new(Viewport::new(800.0, 600.0, 1.0), false);
		let remote = page.remote();
		let (surface, log) = RecordingSurface::shared();
		let scheduler = Rc::new(ManualScheduler::default());
		let field = mount(&page, surface, scheduler, config()).unwrap();
		drop(page);

		remote.resize_to(Viewport::new(400.0, 300.0, 1.0));

		assert_eq!(
			log.borrow().last(),
			Some(&DrawOp::Resize {
				pixel_width: 400,
				pixel_height: 300,
				dpr: 1.0
			})
		);
		field.with_state(|s| {
			assert_eq!(s.viewport(), Viewport::new(400.0, 300.0, 1.0));
			assert_eq!(s.system().bounds().width, 400.0);
		});

		field.unmount();
		assert!(!remote.resize_attached());
	}

	#[test]
	fn theme_change_switches_style_and_frame_skipping() {
		let page = ManualPage::new(Viewport::new(600.0, 400.0, 1.0), false);
		let (surface, log) = RecordingSurface::shared();
		let scheduler = Rc::new(ManualScheduler::default());
		let field = mount(&page, surface, scheduler.clone(), config()).unwrap();

		scheduler.fire();
		assert_eq!(draws(&log), 1);

		page.set_dark(true);
		assert_eq!(field.with_state(|s| s.mode()), ThemeMode::Dark);
		assert_eq!(field.with_state(|s| s.system().len()), 60);

		for _ in 0..6 {
			scheduler.fire();
		}
		assert_eq!(draws(&log), 3);

		field.reinit();
		assert_eq!(field.with_state(|s| s.system().len()), 40);
	}

	#[test]
	fn dark_mount_skips_first_two_frames() {
		let page = ManualPage::new(Viewport::new(600.0, 400.0, 1.0), true);
		let (surface, log) = RecordingSurface::shared();
		let scheduler = Rc::new(ManualScheduler::default());
		let field = mount(&page, surface, scheduler.clone(), config()).unwrap();
		assert_eq!(field.with_state(|s| s.system().len()), 40);

		scheduler.fire();
		scheduler.fire();
		assert_eq!(draws(&log), 0);
		scheduler.fire();
		assert_eq!(draws(&log), 1);
	}
}
