//! HUD values derived from player state
//!
//! Pure functions; a backend turns these into quads and text.

use crate::round_to_tenth;
use crate::sim::Player;

/// Health bar geometry in screen pixels (top-left anchored)
pub const HEALTH_BAR_X: f32 = 10.0;
pub const HEALTH_BAR_Y: f32 = 10.0;
pub const HEALTH_BAR_WIDTH: f32 = 200.0;
pub const HEALTH_BAR_HEIGHT: f32 = 20.0;
pub const HEALTH_BAR_BORDER: f32 = 2.0;

/// Crosshair arm length in pixels
pub const CROSSHAIR_SIZE: f32 = 10.0;

/// Everything the HUD shows for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct HudState {
    /// Fill fraction of the health bar, 0..=1
    pub health_fraction: f64,
    pub health_color: [f32; 4],
    pub percentage_label: String,
    pub fraction_label: String,
    pub show_crosshair: bool,
    /// Whole seconds until respawn, present only while dead
    pub respawn_countdown: Option<u32>,
}

impl HudState {
    pub fn from_player(player: &Player, now: f64) -> Self {
        Self {
            health_fraction: health_fraction(player),
            health_color: health_color(health_fraction(player)),
            percentage_label: percentage_label(player),
            fraction_label: fraction_label(player),
            show_crosshair: crosshair_visible(player),
            respawn_countdown: respawn_countdown(player, now),
        }
    }
}

pub fn health_fraction(player: &Player) -> f64 {
    if player.max_health <= 0.0 {
        return 0.0;
    }
    (player.health / player.max_health).clamp(0.0, 1.0)
}

/// Health bar gradient: green when full, yellow at half, red when empty
pub fn health_color(fraction: f64) -> [f32; 4] {
    let t = fraction.clamp(0.0, 1.0) as f32;
    let (r, g) = if t > 0.5 {
        (2.0 * (1.0 - t), 1.0)
    } else {
        (1.0, 2.0 * t)
    };
    [r, g, 0.0, 1.0]
}

/// Whole percent, truncated ("87%")
pub fn percentage_label(player: &Player) -> String {
    format!("{}%", (health_fraction(player) * 100.0) as u32)
}

/// Current over max health, current rounded to a tenth ("87.4/100")
pub fn fraction_label(player: &Player) -> String {
    format!("{}/{}", round_to_tenth(player.health), player.max_health)
}

pub fn crosshair_visible(player: &Player) -> bool {
    !player.is_dead
}

/// Seconds left before respawn, floored and never negative
pub fn respawn_countdown(player: &Player, now: f64) -> Option<u32> {
    player
        .respawn_remaining(now)
        .map(|remaining| remaining.max(0.0).floor() as u32)
}
