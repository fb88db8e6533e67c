pub mod macros;

use contagion_data::{
    Agent, AgentId, DiseaseStage, HealthStatus, Infection, Position, Velocity, Zone, ZoneKind,
    ZoneMembership,
};
use contagion_lib::model::config::AppConfig;
use contagion_lib::model::world::World;

#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    agents: Vec<Agent>,
    zones: Vec<Zone>,
    mortuary_at: Option<Position>,
}

#[allow(dead_code)]
impl WorldBuilder {
    /// Empty arena: no agents, no zones, one mortuary, fixed seed.
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.population = 0;
        config.world.initial_infected = 0;
        config.world.seed = Some(1);
        config.zones.treatment_count = 0;
        config.zones.containment_count = 0;
        Self {
            config,
            agents: Vec::new(),
            zones: Vec::new(),
            mortuary_at: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_agent(mut self, agent: Agent) -> Self {
        self.agents.push(agent);
        self
    }

    pub fn with_zone(mut self, kind: ZoneKind, x: f64, y: f64, radius: f64) -> Self {
        self.zones.push(Zone {
            id: self.zones.len() as u32,
            position: Position { x, y },
            radius,
            kind,
        });
        self
    }

    pub fn with_mortuary_at(mut self, x: f64, y: f64) -> Self {
        self.mortuary_at = Some(Position { x, y });
        self
    }

    pub fn build(self) -> World {
        let mut world = World::new(self.config).expect("Failed to create world in test builder");
        world.agents.extend(self.agents);
        world.zones.extend(self.zones);
        if let Some(pos) = self.mortuary_at {
            for m in &mut world.mortuaries {
                m.position = pos;
            }
        }
        world.update(0.0).expect("Failed to refresh world in test builder");
        world
    }
}

#[allow(dead_code)]
pub struct AgentBuilder {
    agent: Agent,
}

#[allow(dead_code)]
impl AgentBuilder {
    pub fn new(id: u32) -> Self {
        Self {
            agent: Agent {
                id: AgentId(id),
                position: Position { x: 100.0, y: 100.0 },
                velocity: Velocity::default(),
                status: HealthStatus::Healthy,
                infection: None,
                personal_recovery_time: 1000.0,
                immunity: 0.7,
                has_comorbidities: false,
                is_super_spreader: false,
                zones: ZoneMembership::default(),
                is_being_collected: false,
            },
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.agent.position = Position { x, y };
        self
    }

    pub fn velocity(mut self, dx: f64, dy: f64) -> Self {
        self.agent.velocity = Velocity { dx, dy };
        self
    }

    pub fn immunity(mut self, immunity: f64) -> Self {
        self.agent.immunity = immunity;
        self
    }

    pub fn recovery_time(mut self, time: f64) -> Self {
        self.agent.personal_recovery_time = time;
        self
    }

    pub fn super_spreader(mut self) -> Self {
        self.agent.is_super_spreader = true;
        self
    }

    pub fn recovered(mut self) -> Self {
        self.agent.status = HealthStatus::Recovered;
        self.agent.infection = None;
        self
    }

    pub fn deceased(mut self) -> Self {
        self.agent.status = HealthStatus::Deceased;
        self.agent.infection = None;
        self.agent.velocity = Velocity::default();
        self
    }

    pub fn infected(mut self, stage: DiseaseStage, since: f64) -> Self {
        self.agent.status = HealthStatus::Infected;
        self.agent.infection = Some(Infection {
            since,
            stage,
            ..Infection::onset()
        });
        self
    }

    pub fn build(self) -> Agent {
        self.agent
    }
}
