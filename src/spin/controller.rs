//! Spin orchestration
//!
//! A spin decelerates the globe from its initial speed to rest while a
//! destination is resolved in the background. Once both are done the marker
//! is placed, an optional slow settle rotation brings it toward the front,
//! and the win effect is raised.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, instrument};

use super::{DecelerationCurve, Destination, DestinationResolver, SettlePlan, WinEffect, facing_distance};
use crate::config::SpinConfig;
use crate::globe::SceneHandle;
use crate::globe::scene::lock;
use crate::models::{HighlightedLocation, Region};

/// Result of a completed spin
#[derive(Debug, Clone, PartialEq)]
pub struct SpinOutcome {
    pub location: HighlightedLocation,
    pub destination: Destination,
    /// Facing distance in degrees when the main spin stopped
    pub facing_distance: f64,
    pub plan: SettlePlan,
}

/// Stops the globe and clears the spinning flag however the spin ends,
/// including when the spin future is dropped mid-animation
struct SpinGuard<'a> {
    spinning: &'a AtomicBool,
    scene: &'a SceneHandle,
}

impl Drop for SpinGuard<'_> {
    fn drop(&mut self) {
        lock(self.scene).globe.set_speed(0.0);
        self.spinning.store(false, Ordering::Release);
    }
}

pub struct SpinController {
    scene: SceneHandle,
    resolver: Arc<DestinationResolver>,
    config: SpinConfig,
    spinning: AtomicBool,
    win_effect: Arc<WinEffect>,
}

impl SpinController {
    #[must_use]
    pub fn new(scene: SceneHandle, resolver: DestinationResolver, config: SpinConfig) -> Self {
        Self {
            scene,
            resolver: Arc::new(resolver),
            config,
            spinning: AtomicBool::new(false),
            win_effect: WinEffect::new(),
        }
    }

    #[must_use]
    pub fn is_spinning(&self) -> bool {
        self.spinning.load(Ordering::Acquire)
    }

    #[must_use]
    pub fn win_effect(&self) -> &Arc<WinEffect> {
        &self.win_effect
    }

    #[must_use]
    pub fn scene(&self) -> &SceneHandle {
        &self.scene
    }

    /// Spin the globe and land on a destination in `region`.
    ///
    /// Returns `None` without touching the scene if a spin is already running.
    #[instrument(skip(self))]
    pub async fn spin(&self, region: Region) -> Option<SpinOutcome> {
        if self
            .spinning
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Spin requested while another is running; ignoring");
            return None;
        }
        let _guard = SpinGuard {
            spinning: &self.spinning,
            scene: &self.scene,
        };

        let curve = DecelerationCurve::new(self.config.initial_speed, self.config.duration());
        {
            let mut scene = lock(&self.scene);
            scene.globe.set_speed(curve.initial_speed());
            scene.globe.highlight(None);
        }
        info!("Spinning towards {}", region);

        let (destination, ()) = tokio::join!(self.resolver.resolve(region), self.decelerate(curve));

        let location = HighlightedLocation::new(destination.coordinate, &destination.place);
        let facing = {
            let mut scene = lock(&self.scene);
            scene.globe.highlight(Some(&location));
            facing_distance(scene.globe.rotation_y(), destination.coordinate.longitude)
        };

        let plan = SettlePlan::for_distance(
            facing,
            self.config.front_tolerance_deg,
            self.config.settle_speed,
        );
        debug!("Facing distance {:.1}°, settle plan {:?}", facing, plan);

        if let SettlePlan::Rotate { speed, duration } = plan {
            lock(&self.scene).globe.set_speed(speed);
            time::sleep(duration).await;
            lock(&self.scene).globe.set_speed(0.0);
        }

        self.win_effect.trigger(self.config.win_effect());
        info!("Landed on {}", location.address);

        Some(SpinOutcome {
            location,
            destination,
            facing_distance: facing,
            plan,
        })
    }

    /// Sample the curve once per frame until it reaches rest
    async fn decelerate(&self, curve: DecelerationCurve) {
        let start = Instant::now();
        let mut frames = time::interval(self.config.frame_interval());
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            frames.tick().await;
            let elapsed = start.elapsed();
            let mut scene = lock(&self.scene);
            if curve.is_finished(elapsed) {
                scene.globe.set_speed(0.0);
                break;
            }
            scene.globe.set_speed(curve.speed_at(elapsed));
        }
    }
}
