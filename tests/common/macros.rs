/// Asserts that the agent with the given ID has the expected health status.
#[macro_export]
macro_rules! assert_status {
    ($world:expr, $id:expr, $status:expr) => {
        let agent = $world.agent($id).expect("Agent not found in world");
        assert_eq!(
            agent.status, $status,
            "Agent {} has status {:?}, expected {:?}",
            $id, agent.status, $status
        );
    };
}

/// Asserts that an agent with the given ID is no longer in the population.
#[macro_export]
macro_rules! assert_agent_removed {
    ($world:expr, $id:expr) => {
        assert!(
            $world.agent($id).is_none(),
            "Agent {} should have been removed",
            $id
        );
    };
}

/// Asserts that every agent lies inside the arena.
#[macro_export]
macro_rules! assert_in_bounds {
    ($world:expr) => {
        for a in &$world.agents {
            assert!(
                a.position.x >= 0.0
                    && a.position.x <= $world.width
                    && a.position.y >= 0.0
                    && a.position.y <= $world.height,
                "Agent {} out of bounds at ({}, {})",
                a.id,
                a.position.x,
                a.position.y
            );
        }
    };
}

/// Asserts that the four health-state counts cover the initial population
/// minus removed bodies.
#[macro_export]
macro_rules! assert_population_conserved {
    ($world:expr, $initial:expr) => {
        let stats = $world.statistics();
        assert_eq!(
            stats.accounted() as u64 + stats.bodies_processed,
            $initial as u64,
            "Population not conserved: {:?}",
            stats
        );
    };
}
