mod common;
use common::{AgentBuilder, WorldBuilder};
use contagion_data::{AgentId, DiseaseStage, HealthStatus, LiveEvent, ZoneKind};
use contagion_lib::model::config::AppConfig;
use contagion_lib::model::rng::ConstantRandom;
use contagion_lib::model::systems::transmission::{transmission_grid, transmission_pass};

fn contact_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.disease.infection_rate = 1.0;
    config.disease.infection_distance = 10.0;
    config
}

#[test]
fn test_forced_draw_infects_adjacent_target() {
    let config = contact_config();
    let mut agents = vec![
        AgentBuilder::new(0)
            .infected(DiseaseStage::Progression, 400.0)
            .build(),
        AgentBuilder::new(1).at(101.0, 100.0).build(),
    ];
    let mut grid = transmission_grid(&config);

    let result = transmission_pass(&mut agents, &mut grid, &config, &mut ConstantRandom(0.0));

    assert_eq!(result.len(), 1);
    assert_eq!(agents[1].status, HealthStatus::Infected);
    let infection = agents[1].infection.expect("target should carry infection data");
    assert_eq!(infection.since, 0.0);
    assert_eq!(infection.stage, DiseaseStage::Incubation);
}

#[test]
fn test_failed_draw_leaves_target_healthy() {
    let config = contact_config();
    let mut agents = vec![
        AgentBuilder::new(0)
            .infected(DiseaseStage::Progression, 400.0)
            .build(),
        AgentBuilder::new(1).at(101.0, 100.0).build(),
    ];
    let mut grid = transmission_grid(&config);

    let result = transmission_pass(&mut agents, &mut grid, &config, &mut ConstantRandom(1.0));

    assert!(result.is_empty());
    assert_eq!(agents[1].status, HealthStatus::Healthy);
    assert!(agents[1].infection.is_none());
}

#[test]
fn test_world_tick_reports_infection_event() {
    let mut world = WorldBuilder::new()
        .with_config(|c| {
            c.disease.infection_rate = 1.0;
            c.disease.infection_distance = 10.0;
        })
        .with_agent(
            AgentBuilder::new(0)
                .infected(DiseaseStage::Progression, 400.0)
                .build(),
        )
        .with_agent(AgentBuilder::new(1).at(101.0, 100.0).build())
        .build();

    let events = world.update(16.0).expect("Update failed");

    assert!(events.contains(&LiveEvent::Infected {
        id: AgentId(1),
        source: AgentId(0),
        reinfection: false,
        tick: 1,
    }));
    assert_status!(world, AgentId(1), HealthStatus::Infected);
    assert_eq!(world.pop_stats.total_infections, 1);
    assert_eq!(world.pop_stats.infected, 2);
}

#[test]
fn test_incubating_source_does_not_transmit() {
    let mut world = WorldBuilder::new()
        .with_config(|c| c.disease.infection_rate = 1.0)
        .with_agent(
            AgentBuilder::new(0)
                .infected(DiseaseStage::Incubation, 0.0)
                .build(),
        )
        .with_agent(AgentBuilder::new(1).at(101.0, 100.0).build())
        .build();

    for _ in 0..5 {
        world.update(16.0).expect("Update failed");
    }

    assert_status!(world, AgentId(1), HealthStatus::Healthy);
    assert_eq!(world.pop_stats.total_infections, 0);
}

#[test]
fn test_zero_infection_distance_disables_spread() {
    let mut world = WorldBuilder::new()
        .with_config(|c| {
            c.disease.infection_rate = 1.0;
            c.disease.infection_distance = 0.0;
        })
        .with_agent(
            AgentBuilder::new(0)
                .infected(DiseaseStage::Progression, 400.0)
                .build(),
        )
        .with_agent(AgentBuilder::new(1).build())
        .build();

    world.update(16.0).expect("Update failed");

    assert_status!(world, AgentId(1), HealthStatus::Healthy);
}

#[test]
fn test_zero_rate_never_infects() {
    let mut world = WorldBuilder::new()
        .with_config(|c| c.disease.infection_rate = 0.0)
        .with_agent(
            AgentBuilder::new(0)
                .infected(DiseaseStage::Progression, 400.0)
                .super_spreader()
                .build(),
        )
        .with_agent(AgentBuilder::new(1).at(102.0, 100.0).build())
        .build();

    for _ in 0..20 {
        world.update(16.0).expect("Update failed");
    }

    assert_status!(world, AgentId(1), HealthStatus::Healthy);
}

#[test]
fn test_bodies_are_never_infected() {
    let mut world = WorldBuilder::new()
        .with_config(|c| {
            c.disease.infection_rate = 1.0;
            c.mortuary.collection_interval = 1.0e9;
        })
        .with_agent(
            AgentBuilder::new(0)
                .infected(DiseaseStage::Progression, 400.0)
                .build(),
        )
        .with_agent(AgentBuilder::new(1).at(101.0, 100.0).deceased().build())
        .build();

    for _ in 0..10 {
        world.update(16.0).expect("Update failed");
    }

    assert_status!(world, AgentId(1), HealthStatus::Deceased);
    assert_eq!(world.pop_stats.total_infections, 0);
}

#[test]
fn test_containment_zone_protects_target_membership_only() {
    // Reduction 0 blocks every infection of a target standing in containment.
    let mut world = WorldBuilder::new()
        .with_config(|c| {
            c.disease.infection_rate = 1.0;
            c.zones.containment_infection_reduction = 0.0;
        })
        .with_zone(ZoneKind::Containment, 300.0, 300.0, 20.0)
        .with_agent(
            AgentBuilder::new(0)
                .infected(DiseaseStage::Progression, 400.0)
                .at(315.0, 300.0)
                .build(),
        )
        .with_agent(AgentBuilder::new(1).at(300.0, 300.0).build())
        .with_agent(AgentBuilder::new(2).at(325.0, 300.0).build())
        .build();

    world.update(16.0).expect("Update failed");

    // The source stands in the zone too; only the target's membership counts.
    assert_status!(world, AgentId(1), HealthStatus::Healthy);
    assert_status!(world, AgentId(2), HealthStatus::Infected);
}
