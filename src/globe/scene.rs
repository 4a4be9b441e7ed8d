//! Scene state shared between the render loop and the spin controller

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::debug;

use super::{Globe, StarField};
use crate::config::WheelConfig;
use crate::{Result, WheelError};

/// Everything drawn in one frame
#[derive(Debug)]
pub struct Scene {
    pub globe: Globe,
    pub stars: StarField,
    clock_secs: f64,
    frames: u64,
}

/// Shared handle; the render loop reads it every frame, the controller writes speed and rotation
pub type SceneHandle = Arc<Mutex<Scene>>;

impl Scene {
    #[must_use]
    pub fn new(globe: Globe, stars: StarField) -> Self {
        Self {
            globe,
            stars,
            clock_secs: 0.0,
            frames: 0,
        }
    }

    /// Build the scene for a viewport of the given width
    pub fn from_config(config: &WheelConfig, viewport_width: f64) -> Result<Self> {
        if !(viewport_width.is_finite() && viewport_width > 0.0) {
            return Err(WheelError::validation(format!(
                "Viewport width must be a positive number of pixels, got {viewport_width}"
            )));
        }
        let radius = Globe::responsive_radius(viewport_width, config.globe.max_radius);
        let stars = StarField::generate(&mut rand::rng(), config.stars.count, config.stars.radius);
        Ok(Self::new(Globe::new(radius), stars))
    }

    #[must_use]
    pub fn into_handle(self) -> SceneHandle {
        Arc::new(Mutex::new(self))
    }

    /// Advance the clock by `elapsed` and step the globe and stars one frame
    pub fn tick(&mut self, elapsed: Duration) {
        self.clock_secs += elapsed.as_secs_f64();
        self.frames += 1;
        self.globe.advance_frame(self.clock_secs);
        self.stars.advance_frame();
    }

    #[must_use]
    pub fn clock_secs(&self) -> f64 {
        self.clock_secs
    }

    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

/// Lock the scene, ignoring poisoning
pub fn lock(handle: &SceneHandle) -> MutexGuard<'_, Scene> {
    handle.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Drive the scene at a fixed frame interval until the returned task is aborted
pub fn spawn_render_loop(handle: SceneHandle, frame_interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = time::interval(frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut last = Instant::now();
        debug!("Render loop started at {:?} per frame", frame_interval);

        loop {
            ticker.tick().await;
            let now = Instant::now();
            lock(&handle).tick(now - last);
            last = now;
        }
    })
}
