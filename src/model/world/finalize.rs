use crate::model::error::Result;
use crate::model::systems::{disease, stats};
use crate::model::world::World;
use crate::model::MortuaryLogic;
use contagion_data::{AgentId, LiveEvent};
use std::collections::HashSet;

impl World {
    pub fn finalize_tick(&mut self, delta: f64, events: &mut Vec<LiveEvent>) -> Result<()> {
        let tick = self.tick;
        self.pass_mortuaries(delta, events);
        self.enforce_invariants();
        self.refresh_stats();
        self.observer.observe(tick, &self.pop_stats);

        for event in events.iter() {
            self.logger.log_event(event)?;
        }
        Ok(())
    }

    fn pass_mortuaries(&mut self, delta: f64, events: &mut Vec<LiveEvent>) {
        let tick = self.tick;
        let mut removed: HashSet<AgentId> = HashSet::new();

        for mortuary in &mut self.mortuaries {
            let report = mortuary.step(
                &mut self.agents,
                self.elapsed,
                delta,
                &self.config,
                &mut self.rng,
            );
            if let Some(target) = report.dispatched {
                events.push(LiveEvent::CollectorDispatched {
                    mortuary: mortuary.id,
                    target,
                    tick,
                });
            }
            for id in report.processed {
                if removed.insert(id) {
                    self.tally.bodies_processed += 1;
                    tracing::info!(mortuary = mortuary.id, agent = %id, tick, "Body processed");
                    events.push(LiveEvent::BodyProcessed {
                        mortuary: mortuary.id,
                        id,
                        tick,
                    });
                }
            }
        }

        if !removed.is_empty() {
            self.agents.retain(|a| !removed.contains(&a.id));
        }
    }

    /// Self-corrects logic faults that would otherwise corrupt later ticks.
    fn enforce_invariants(&mut self) {
        for agent in &mut self.agents {
            disease::check_infection_invariant(agent, &self.config);
        }

        let mut claimed: HashSet<AgentId> = HashSet::new();
        for mortuary in &mut self.mortuaries {
            mortuary.collectors.retain(|c| {
                let unique = claimed.insert(c.target);
                if !unique {
                    debug_assert!(false, "two collectors target {}", c.target);
                    tracing::warn!(target = %c.target, "Duplicate collector dropped");
                }
                unique
            });
        }
    }

    pub(crate) fn refresh_stats(&mut self) {
        stats::update_population_stats(&mut self.pop_stats, &self.agents, self.tally);
    }
}
