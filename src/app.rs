use anyhow::{ensure, Result};
use std::time::{Duration, Instant};

use crate::model::config::{AppConfig, REAL_TIME_SPEED};
use crate::model::metrics::Metrics;
use crate::model::world::World;
use contagion_data::LiveEvent;

/// Drives a [`World`] from wall-clock frames.
///
/// Frame deltas are scaled by `speed / REAL_TIME_SPEED`, so a speed of 60
/// runs the simulation in real time. A stopped runner ignores frames.
pub struct Runner {
    pub running: bool,
    pub world: World,
    pub metrics: Metrics,
    speed: f64,
    last_frame: Option<Instant>,
}

impl Runner {
    pub fn new(config: AppConfig) -> Result<Self> {
        let world = World::new(config)?;
        Ok(Self::from_world(world))
    }

    pub fn from_world(world: World) -> Self {
        Self {
            running: false,
            speed: world.config.world.simulation_speed,
            world,
            metrics: Metrics::new(),
            last_frame: None,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
        self.last_frame = None;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Rebuilds the world from its configuration and stops the runner.
    pub fn reset(&mut self) {
        self.stop();
        self.world.reset();
        self.metrics = Metrics::new();
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f64) -> Result<()> {
        ensure!(
            speed.is_finite() && speed > 0.0,
            "Simulation speed must be positive, got {speed}"
        );
        self.speed = speed;
        Ok(())
    }

    /// Simulated ms for one wall-clock frame.
    #[must_use]
    pub fn scaled_delta(&self, wall_delta_ms: f64) -> f64 {
        wall_delta_ms * self.speed / REAL_TIME_SPEED
    }

    /// Advances one frame of `wall_delta_ms` wall-clock milliseconds.
    pub fn frame(&mut self, wall_delta_ms: f64) -> Result<Vec<LiveEvent>> {
        if !self.running {
            return Ok(Vec::new());
        }
        let started = Instant::now();
        let events = self.world.update(self.scaled_delta(wall_delta_ms))?;
        self.metrics
            .record_tick(started.elapsed(), &self.world.pop_stats);
        for event in &events {
            match event {
                LiveEvent::Infected { .. } => self.metrics.increment_counter("infections"),
                LiveEvent::Died { .. } => self.metrics.increment_counter("deaths"),
                LiveEvent::BodyProcessed { .. } => self.metrics.increment_counter("bodies"),
                _ => {}
            }
        }
        Ok(events)
    }

    /// Wall-clock frame length implied by the configured `target_fps`.
    #[must_use]
    pub fn frame_interval_ms(&self) -> f64 {
        self.world.config.world.frame_interval_ms()
    }

    /// Advances one frame measured from the previous call.
    ///
    /// The first call after `start` uses [`Runner::frame_interval_ms`].
    pub fn frame_realtime(&mut self) -> Result<Vec<LiveEvent>> {
        let now = Instant::now();
        let wall = self
            .last_frame
            .map_or_else(|| self.frame_interval_ms(), |last| duration_ms(now - last));
        self.last_frame = Some(now);
        self.frame(wall)
    }
}

fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
