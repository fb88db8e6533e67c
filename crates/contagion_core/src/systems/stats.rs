use contagion_data::{Agent, HealthStatus, PopulationStats};

/// Cumulative counters owned by the engine and folded into every report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub total_deaths: u64,
    pub bodies_processed: u64,
    pub total_infections: u64,
}

/// Recomputes all per-state counts from the live agent list.
pub fn update_population_stats(stats: &mut PopulationStats, agents: &[Agent], tally: Tally) {
    *stats = PopulationStats {
        population: agents.len(),
        total_deaths: tally.total_deaths,
        bodies_processed: tally.bodies_processed,
        total_infections: tally.total_infections,
        ..PopulationStats::default()
    };
    for a in agents {
        match a.status {
            HealthStatus::Healthy => stats.healthy += 1,
            HealthStatus::Infected => stats.infected += 1,
            HealthStatus::Recovered => stats.recovered += 1,
            HealthStatus::Deceased => stats.deceased += 1,
        }
        // Bodies keep no zone membership.
        if a.is_active() && a.zones.treatment {
            stats.in_treatment_zone += 1;
        }
        if a.is_active() && a.zones.containment {
            stats.in_containment_zone += 1;
        }
        if a.is_contagious() {
            stats.contagious += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::lifecycle::create_population;
    use crate::rng::ConstantRandom;

    #[test]
    fn test_counts_cover_population() {
        let mut config = AppConfig::default();
        config.world.population = 12;
        config.world.initial_infected = 4;
        let mut agents = create_population(&config, &mut ConstantRandom(0.3));
        agents[5].status = contagion_data::HealthStatus::Deceased;
        agents[6].zones.treatment = true;

        let mut stats = PopulationStats::default();
        let tally = Tally {
            total_deaths: 1,
            ..Default::default()
        };
        update_population_stats(&mut stats, &agents, tally);

        assert_eq!(stats.population, 12);
        assert_eq!(stats.infected, 4);
        assert_eq!(stats.deceased, 1);
        assert_eq!(stats.healthy, 7);
        assert_eq!(stats.in_treatment_zone, 1);
        assert_eq!(stats.contagious, 0);
        assert_eq!(stats.total_deaths, 1);
        assert_eq!(stats.accounted(), stats.population);
    }

    #[test]
    fn test_zone_counts_skip_bodies() {
        let mut config = AppConfig::default();
        config.world.population = 3;
        config.world.initial_infected = 0;
        let mut agents = create_population(&config, &mut ConstantRandom(0.3));
        for agent in &mut agents {
            agent.zones.treatment = true;
            agent.zones.containment = true;
        }
        agents[0].status = HealthStatus::Deceased;
        agents[1].status = HealthStatus::Deceased;
        agents[1].is_being_collected = true;

        let mut stats = PopulationStats::default();
        update_population_stats(&mut stats, &agents, Tally::default());

        assert_eq!(stats.deceased, 2);
        assert_eq!(stats.in_treatment_zone, 1);
        assert_eq!(stats.in_containment_zone, 1);
    }
}
