//! Arena Strike - combat core of a small first-person arena shooter
//!
//! Core modules:
//! - `sim`: Combat simulation (projectiles, enemy parts, enemy AI, spawning, player)
//! - `renderer`: Draw-call contract and HUD derivations
//! - `settings`: Startup configuration values

pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::DVec3;

/// Game configuration constants
pub mod consts {
    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f64 = 0.2;
    pub const PROJECTILE_MASS: f64 = 0.1; // kg
    pub const PLAYER_PROJECTILE_SPEED: f64 = 30.0;
    pub const ENEMY_PROJECTILE_SPEED: f64 = 20.0;

    /// Projectiles further than this from their owner (per horizontal axis) are culled
    pub const PLAYER_CULL_DISTANCE: f64 = 100.0;
    pub const ENEMY_CULL_DISTANCE: f64 = 50.0;

    /// Penetration above this threshold is a critical hit
    pub const CRITICAL_PENETRATION: f64 = 0.8;
    pub const CRITICAL_MULTIPLIER: f64 = 1.5;

    /// Player defaults
    pub const PLAYER_SPEED: f64 = 5.0;
    pub const PLAYER_HIT_RADIUS: f64 = 1.0;
    pub const PLAYER_SHOT_COOLDOWN: f64 = 0.2;
    pub const PLAYER_ARMOR_RATING: f64 = 1.0;
    pub const PITCH_LIMIT_DEG: f64 = 90.0;

    /// Zoom
    pub const NORMAL_FOV: f64 = 90.0;
    pub const ZOOM_FOV: f64 = 30.0;
    pub const FOV_TRANSITION_SPEED: f64 = 8.0;
    pub const FOV_EPSILON: f64 = 0.01;
    pub const ZOOM_SENSITIVITY_MULTIPLIER: f64 = 0.4;

    /// Mouse sensitivity bounds
    pub const MIN_SENSITIVITY: f64 = 0.01;
    pub const MAX_SENSITIVITY: f64 = 1.0;

    /// Enemy defaults
    pub const ENEMY_SPEED: f64 = 3.0;
    pub const ENEMY_SHOT_COOLDOWN: f64 = 2.0;
    pub const ENEMY_MOVEMENT_INTERVAL: f64 = 3.0;
    pub const ENEMY_TARGET_MIN_RADIUS: f64 = 8.0;
    pub const ENEMY_TARGET_MAX_RADIUS: f64 = 15.0;
    pub const ENEMY_ARRIVAL_DISTANCE: f64 = 0.1;
    /// Per-axis aim noise added before normalizing the shot direction
    pub const ENEMY_AIM_NOISE: f64 = 1.0;

    /// Behavior modifiers applied when a part is destroyed
    pub const SHIELD_LOSS_ARMOR_MULTIPLIER: f64 = 0.7;
    pub const WEAPON_LOSS_COOLDOWN_MULTIPLIER: f64 = 1.5;
    pub const ENGINE_LOSS_SPEED_MULTIPLIER: f64 = 0.5;

    /// Spawning
    pub const SPAWN_INTERVAL: f64 = 3.0;
    pub const MAX_ENEMIES: usize = 5;
    pub const SPAWN_MIN_RADIUS: f64 = 10.0;
    pub const SPAWN_MAX_RADIUS: f64 = 20.0;

    /// Cosmetic particles
    pub const PARTICLE_GRAVITY: f64 = -9.8;
    pub const MAX_PARTICLES: usize = 1024;
}

/// Point on the ground plane (y = 0) at the given radius and azimuth around `center`
#[inline]
pub fn ground_point(center: DVec3, radius: f64, azimuth: f64) -> DVec3 {
    DVec3::new(
        center.x + radius * azimuth.cos(),
        0.0,
        center.z + radius * azimuth.sin(),
    )
}

/// Unit view direction for a pitch/yaw pair in degrees.
///
/// Yaw 0 looks down -Z, positive pitch looks up.
#[inline]
pub fn view_direction(pitch_deg: f64, yaw_deg: f64) -> DVec3 {
    let pitch = pitch_deg.to_radians();
    let yaw = yaw_deg.to_radians();
    DVec3::new(
        -yaw.sin() * pitch.cos(),
        pitch.sin(),
        -yaw.cos() * pitch.cos(),
    )
}

/// Round to one decimal place
#[inline]
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_point_stays_on_ground() {
        let center = DVec3::new(3.0, 5.0, -2.0);
        let p = ground_point(center, 10.0, 1.3);
        assert_eq!(p.y, 0.0);
        let horizontal = DVec3::new(p.x - center.x, 0.0, p.z - center.z);
        assert!((horizontal.length() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_view_direction_is_unit() {
        for (pitch, yaw) in [(0.0, 0.0), (45.0, 30.0), (-90.0, 180.0), (12.5, -77.0)] {
            let dir = view_direction(pitch, yaw);
            assert!((dir.length() - 1.0).abs() < 1e-9);
        }
        let forward = view_direction(0.0, 0.0);
        assert!((forward - DVec3::NEG_Z).length() < 1e-9);
    }

    #[test]
    fn test_round_to_tenth() {
        assert_eq!(round_to_tenth(70.0), 70.0);
        assert_eq!(round_to_tenth(12.34), 12.3);
        assert_eq!(round_to_tenth(12.36), 12.4);
    }
}
