//! Body collection: dispatch on a cooldown and the collector state machine.
//!
//! A collector walks `EnRoute -> Collecting -> Returning -> done`. The
//! mortuary only reports which bodies were processed; removing them from the
//! population is left to the engine, which owns every counter.

use crate::config::AppConfig;
use crate::rng::RandomSource;
use contagion_data::{Agent, AgentId, Collector, CollectorState, HealthStatus, Mortuary, Position};

/// Outcome of one mortuary step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MortuaryReport {
    pub dispatched: Option<AgentId>,
    pub processed: Vec<AgentId>,
}

pub trait CollectorLogic {
    fn dispatch(home: Position, target: AgentId, speed: f64) -> Self;

    /// Advances the state machine by `delta` simulated ms.
    ///
    /// Returns `true` exactly once, on the step the body reaches the mortuary.
    fn step(&mut self, target: Option<Position>, delta: f64, config: &AppConfig) -> bool;
}

pub trait MortuaryLogic {
    /// Picks a random unclaimed body if the cooldown has strictly elapsed.
    fn try_dispatch<R: RandomSource>(
        &mut self,
        agents: &mut [Agent],
        now: f64,
        config: &AppConfig,
        rng: &mut R,
    ) -> Option<AgentId>;

    /// Steps every collector and prunes the finished ones.
    fn advance_collectors(&mut self, agents: &[Agent], delta: f64, config: &AppConfig)
        -> Vec<AgentId>;

    fn step<R: RandomSource>(
        &mut self,
        agents: &mut [Agent],
        now: f64,
        delta: f64,
        config: &AppConfig,
        rng: &mut R,
    ) -> MortuaryReport {
        let dispatched = self.try_dispatch(agents, now, config, rng);
        let processed = self.advance_collectors(agents, delta, config);
        MortuaryReport {
            dispatched,
            processed,
        }
    }
}

/// Moves `from` toward `to` by at most `max_step`, never overshooting.
fn move_toward(from: &mut Position, to: Position, max_step: f64) {
    let distance = from.distance_to(&to);
    if distance <= max_step || distance == 0.0 {
        *from = to;
        return;
    }
    from.x += (to.x - from.x) / distance * max_step;
    from.y += (to.y - from.y) / distance * max_step;
}

impl CollectorLogic for Collector {
    fn dispatch(home: Position, target: AgentId, speed: f64) -> Self {
        Self {
            position: home,
            home,
            target,
            speed,
            state: CollectorState::EnRoute,
            collection_time: 0.0,
            is_done: false,
            has_reported: false,
        }
    }

    fn step(&mut self, target: Option<Position>, delta: f64, config: &AppConfig) -> bool {
        if self.is_done {
            return false;
        }
        let m = &config.mortuary;
        let max_step = self.speed * delta / config.world.reference_frame_ms;

        match self.state {
            CollectorState::EnRoute => {
                let Some(target) = target else {
                    debug_assert!(false, "collector target {} vanished", self.target);
                    tracing::warn!(target = %self.target, "Collector target missing, dropping collector");
                    self.is_done = true;
                    self.has_reported = true;
                    return false;
                };
                if self.position.distance_to(&target) < m.capture_radius {
                    self.state = CollectorState::Collecting;
                } else {
                    move_toward(&mut self.position, target, max_step);
                }
            }
            CollectorState::Collecting => {
                self.collection_time += delta;
                if self.collection_time >= m.collection_duration {
                    self.state = CollectorState::Returning;
                }
            }
            CollectorState::Returning => {
                if self.position.distance_to(&self.home) < m.capture_radius {
                    self.is_done = true;
                    if !self.has_reported {
                        self.has_reported = true;
                        return true;
                    }
                } else {
                    move_toward(&mut self.position, self.home, max_step);
                }
            }
        }
        false
    }
}

impl MortuaryLogic for Mortuary {
    fn try_dispatch<R: RandomSource>(
        &mut self,
        agents: &mut [Agent],
        now: f64,
        config: &AppConfig,
        rng: &mut R,
    ) -> Option<AgentId> {
        if now - self.last_dispatch <= self.cooldown {
            return None;
        }
        let eligible: Vec<usize> = agents
            .iter()
            .enumerate()
            .filter(|(_, a)| a.status == HealthStatus::Deceased && !a.is_being_collected)
            .map(|(i, _)| i)
            .collect();
        if eligible.is_empty() {
            return None;
        }

        let body = &mut agents[eligible[rng.index(eligible.len())]];
        body.is_being_collected = true;
        self.last_dispatch = now;
        self.collectors.push(Collector::dispatch(
            self.position,
            body.id,
            config.mortuary.collector_speed,
        ));
        tracing::debug!(mortuary = self.id, target = %body.id, "Collector dispatched");
        Some(body.id)
    }

    fn advance_collectors(
        &mut self,
        agents: &[Agent],
        delta: f64,
        config: &AppConfig,
    ) -> Vec<AgentId> {
        let mut processed = Vec::new();
        for collector in &mut self.collectors {
            let target = agents
                .iter()
                .find(|a| a.id == collector.target)
                .map(|a| a.position);
            if collector.step(target, delta, config) {
                processed.push(collector.target);
            }
        }
        self.collectors.retain(|c| !c.is_done);
        processed
    }
}

/// Places the configured mortuaries uniformly over the arena.
pub fn create_mortuaries<R: RandomSource>(config: &AppConfig, rng: &mut R) -> Vec<Mortuary> {
    (0..config.mortuary.count)
        .map(|i| Mortuary {
            id: i as u32,
            position: Position {
                x: rng.range(0.0, config.world.width),
                y: rng.range(0.0, config.world.height),
            },
            cooldown: config.mortuary.collection_interval,
            last_dispatch: 0.0,
            collectors: Vec::new(),
        })
        .collect()
}
