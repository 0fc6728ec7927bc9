//! Per-frame simulation step
//!
//! dt and the clock are injected so the same sequence of inputs reproduces a
//! run exactly. Integration is not fixed-step: dt is whatever the caller measured.

use glam::DVec3;

use super::player::PlayerInput;
use super::state::GameState;

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickReport {
    /// Last enemy-part hit this tick (explosion position)
    pub hit_position: Option<DVec3>,
    /// The player died during this tick
    pub player_died: bool,
}

/// Advance the game by `dt` seconds at wall-clock time `now`
pub fn tick(state: &mut GameState, input: &PlayerInput, dt: f64, now: f64) -> TickReport {
    let was_dead = state.player.is_dead;
    state.ticks += 1;

    state.player.update(dt, now, input);

    let mut report = TickReport::default();
    if !state.player.is_dead {
        report.hit_position = state
            .enemies
            .update(dt, now, &mut state.player, &mut state.rng);
        if let Some(position) = report.hit_position {
            state.particles.emit_explosion(position, &mut state.rng);
        }
    }

    state.particles.update(dt);
    state.enemies.cleanup();

    report.player_died = !was_dead && state.player.is_dead;
    report
}
