use crate::config::AppConfig;
use crate::zone::ZoneEffects;
use contagion_data::{Agent, DiseaseStage};

pub const PROGRESSION_SPEED_MULT: f64 = 0.7;

pub struct MovementContext<'a> {
    pub config: &'a AppConfig,
    pub delta: f64,
}

/// Multiplicative speed factor from zones and disease stage.
pub fn speed_factor(agent: &Agent, config: &AppConfig) -> f64 {
    let mut factor = ZoneEffects::for_membership(agent.zones, config).speed;
    if agent.stage() == Some(DiseaseStage::Progression) {
        factor *= PROGRESSION_SPEED_MULT;
    }
    factor
}

/// Integrates position and reflects off the arena walls.
pub fn handle_movement(agent: &mut Agent, ctx: &MovementContext) {
    if !agent.is_active() {
        return;
    }
    let w = &ctx.config.world;
    let step = ctx.delta / w.reference_frame_ms * speed_factor(agent, ctx.config);
    agent.position.x += agent.velocity.dx * step;
    agent.position.y += agent.velocity.dy * step;

    reflect_axis(&mut agent.position.x, &mut agent.velocity.dx, w.width);
    reflect_axis(&mut agent.position.y, &mut agent.velocity.dy, w.height);
}

fn reflect_axis(pos: &mut f64, vel: &mut f64, max: f64) {
    if *pos < 0.0 {
        *pos = 0.0;
        *vel = vel.abs();
    } else if *pos > max {
        *pos = max;
        *vel = -vel.abs();
    }
}
