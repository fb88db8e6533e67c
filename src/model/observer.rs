use contagion_data::PopulationStats;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Fraction of the running maximum the infected count must fall to before a
/// wave is reported as having peaked.
const PEAK_DECLINE_RATIO: f64 = 0.9;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MacroEvent {
    pub tick: u64,
    pub event_type: String,
    pub description: String,
    pub severity: f32,
}

/// Watches per-tick statistics and keeps a bounded log of milestones.
pub struct WorldObserver {
    pub history: VecDeque<MacroEvent>,
    pub max_history: usize,
    wave_max: usize,
    peak_reported: bool,
    seen_death: bool,
    last_infected: usize,
    last_alive: usize,
}

impl Default for WorldObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl WorldObserver {
    pub fn new() -> Self {
        Self {
            history: VecDeque::new(),
            max_history: 100,
            wave_max: 0,
            peak_reported: false,
            seen_death: false,
            last_infected: 0,
            last_alive: 0,
        }
    }

    pub fn observe(&mut self, tick: u64, stats: &PopulationStats) {
        if !self.seen_death && stats.total_deaths > 0 {
            self.seen_death = true;
            self.record_event(tick, "FirstDeath", "The disease has claimed its first life.", 0.6);
        }

        if stats.infected > self.wave_max {
            self.wave_max = stats.infected;
            self.peak_reported = false;
        } else if !self.peak_reported
            && self.wave_max > 0
            && (stats.infected as f64) <= self.wave_max as f64 * PEAK_DECLINE_RATIO
        {
            self.peak_reported = true;
            let desc = format!("Infections peaked at {} concurrent cases.", self.wave_max);
            self.record_event(tick, "InfectionPeak", &desc, 0.7);
        }

        if self.last_infected > 0 && stats.infected == 0 {
            self.record_event(tick, "EpidemicContained", "No infected agents remain.", 0.5);
            self.wave_max = 0;
            self.peak_reported = false;
        }

        let alive = stats.healthy + stats.infected + stats.recovered;
        if self.last_alive > 0 && alive == 0 {
            self.record_event(tick, "PopulationWipedOut", "Every agent has died.", 1.0);
        }

        self.last_infected = stats.infected;
        self.last_alive = alive;
    }

    fn record_event(&mut self, tick: u64, etype: &str, desc: &str, severity: f32) {
        if self.history.len() >= self.max_history {
            self.history.pop_front();
        }
        tracing::info!(tick, event_type = etype, "{}", desc);
        self.history.push_back(MacroEvent {
            tick,
            event_type: etype.to_string(),
            description: desc.to_string(),
            severity,
        });
    }

    pub fn generate_macro_report(&self) -> String {
        let mut report = String::new();
        report.push_str("--- EPIDEMIC REPORT ---\n");
        if self.history.is_empty() {
            report.push_str("Status: Quiet. No milestones recorded.\n");
        } else {
            for ev in &self.history {
                report.push_str(&format!(
                    "[Tick {}] {}: {}\n",
                    ev.tick, ev.event_type, ev.description
                ));
            }
        }
        report
    }
}
