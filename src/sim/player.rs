//! The player: movement, look, zoom, shooting, damage and respawn

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use super::projectile::Projectile;
use crate::consts::*;
use crate::settings::Settings;
use crate::{round_to_tenth, view_direction};

/// Per-tick input snapshot
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    /// Relative mouse motion since last tick (screen pixels, +y is down)
    pub mouse_delta: DVec2,
    /// Primary button held
    pub fire: bool,
    /// Secondary button held (zoom toggles on press)
    pub zoom: bool,
}

/// Values the player takes from configuration at startup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerConfig {
    pub mouse_sensitivity: f64,
    pub max_health: f64,
    pub respawn_delay: f64,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

impl From<&Settings> for PlayerConfig {
    fn from(settings: &Settings) -> Self {
        let settings = settings.sanitized();
        Self {
            mouse_sensitivity: settings.mouse_sensitivity,
            max_health: settings.max_health,
            respawn_delay: settings.respawn_delay,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: DVec3,
    /// Degrees, clamped to [-90, 90]
    pub pitch: f64,
    /// Degrees
    pub yaw: f64,
    pub speed: f64,
    pub health: f64,
    pub max_health: f64,
    pub is_dead: bool,
    pub death_time: Option<f64>,
    pub respawn_delay: f64,
    pub armor_rating: f64,
    pub mouse_sensitivity: f64,
    pub is_zoomed: bool,
    /// Zoom button state on the previous tick
    #[serde(default)]
    was_zoom_held: bool,
    pub current_fov: f64,
    pub projectiles: Vec<Projectile>,
    pub shot_cooldown: f64,
    pub last_shot_time: f64,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PlayerConfig::default())
    }
}

impl Player {
    pub fn new(config: PlayerConfig) -> Self {
        Self {
            position: DVec3::ZERO,
            pitch: 0.0,
            yaw: 0.0,
            speed: PLAYER_SPEED,
            health: config.max_health,
            max_health: config.max_health,
            is_dead: false,
            death_time: None,
            respawn_delay: config.respawn_delay,
            armor_rating: PLAYER_ARMOR_RATING,
            mouse_sensitivity: config
                .mouse_sensitivity
                .clamp(MIN_SENSITIVITY, MAX_SENSITIVITY),
            is_zoomed: false,
            was_zoom_held: false,
            current_fov: NORMAL_FOV,
            projectiles: Vec::new(),
            shot_cooldown: PLAYER_SHOT_COOLDOWN,
            last_shot_time: 0.0,
        }
    }

    pub fn set_mouse_sensitivity(&mut self, sensitivity: f64) {
        self.mouse_sensitivity = sensitivity.clamp(MIN_SENSITIVITY, MAX_SENSITIVITY);
    }

    pub fn view_direction(&self) -> DVec3 {
        view_direction(self.pitch, self.yaw)
    }

    pub fn target_fov(&self) -> f64 {
        if self.is_zoomed { ZOOM_FOV } else { NORMAL_FOV }
    }

    /// Sensitivity after the zoom multiplier
    pub fn effective_sensitivity(&self) -> f64 {
        if self.is_zoomed {
            self.mouse_sensitivity * ZOOM_SENSITIVITY_MULTIPLIER
        } else {
            self.mouse_sensitivity
        }
    }

    pub fn health_fraction(&self) -> f64 {
        self.health / self.max_health
    }

    /// Seconds until respawn while dead, never negative
    pub fn respawn_remaining(&self, now: f64) -> Option<f64> {
        self.death_time
            .filter(|_| self.is_dead)
            .map(|t| (self.respawn_delay - (now - t)).max(0.0))
    }

    pub fn update(&mut self, dt: f64, now: f64, input: &PlayerInput) {
        if self.is_dead {
            if let Some(death_time) = self.death_time {
                if now - death_time >= self.respawn_delay {
                    self.respawn();
                }
            }
            return;
        }

        self.update_zoom(dt, input.zoom);

        // Mouse look
        let sensitivity = self.effective_sensitivity();
        self.pitch -= input.mouse_delta.y * sensitivity;
        self.yaw -= input.mouse_delta.x * sensitivity;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT_DEG, PITCH_LIMIT_DEG);

        // Movement on the ground plane, relative to yaw
        let move_x = input.right as i32 - input.left as i32;
        let move_z = input.back as i32 - input.forward as i32;
        let (move_x, move_z) = (move_x as f64, move_z as f64);
        let yaw = self.yaw.to_radians();
        let forward = DVec2::new(yaw.sin(), yaw.cos());
        let right = DVec2::new(yaw.cos(), -yaw.sin());
        let step = (forward * move_z + right * move_x) * self.speed * dt;
        self.position.x += step.x;
        self.position.z += step.y;

        if input.fire {
            if let Some(projectile) = self.shoot(now) {
                self.projectiles.push(projectile);
            }
        }

        self.update_projectiles(dt);
    }

    fn update_zoom(&mut self, dt: f64, zoom_held: bool) {
        if zoom_held && !self.was_zoom_held {
            self.is_zoomed = !self.is_zoomed;
            self.current_fov = self.target_fov();
        }
        self.was_zoom_held = zoom_held;

        let target = self.target_fov();
        let diff = target - self.current_fov;
        if diff.abs() > FOV_EPSILON {
            self.current_fov += diff * dt * FOV_TRANSITION_SPEED;
            self.current_fov = if self.is_zoomed {
                self.current_fov.max(ZOOM_FOV)
            } else {
                self.current_fov.min(NORMAL_FOV)
            };
        }
    }

    fn update_projectiles(&mut self, dt: f64) {
        for projectile in &mut self.projectiles {
            projectile.update(dt);
        }
        let origin = self.position;
        self.projectiles
            .retain(|p| p.alive && !p.out_of_range(origin, PLAYER_CULL_DISTANCE));
    }

    /// Fire along the view direction if the cooldown allows
    pub fn shoot(&mut self, now: f64) -> Option<Projectile> {
        if now - self.last_shot_time < self.shot_cooldown {
            return None;
        }
        self.last_shot_time = now;

        let direction = self.view_direction();
        Some(Projectile::player(self.position + direction, direction))
    }

    /// Sphere test against the player's body
    pub fn check_projectile_hit(&self, position: DVec3, radius: f64) -> bool {
        if self.is_dead {
            return false;
        }
        self.position.distance(position) < PLAYER_HIT_RADIUS + radius
    }

    /// Apply damage after armor, rounded to one decimal. Returns true if this killed the player.
    pub fn take_damage(&mut self, damage: f64, now: f64) -> bool {
        if self.is_dead {
            return false;
        }

        let final_damage = round_to_tenth(damage / self.armor_rating);
        self.health = round_to_tenth((self.health - final_damage).max(0.0));

        if self.health <= 0.0 {
            self.die(now);
            return true;
        }
        false
    }

    pub fn die(&mut self, now: f64) {
        if self.is_dead {
            return;
        }
        self.is_dead = true;
        self.health = 0.0;
        self.death_time = Some(now);
        log::info!("Player died, respawning in {:.0}s", self.respawn_delay);
    }

    pub fn respawn(&mut self) {
        self.health = self.max_health;
        self.position = DVec3::ZERO;
        self.pitch = 0.0;
        self.yaw = 0.0;
        self.projectiles.clear();
        self.is_dead = false;
        self.death_time = None;
        log::info!("Player respawned");
    }
}
