//! Multi-part enemies: movement AI, shooting AI and hit resolution

use glam::DVec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use super::part::{EnemyPart, PartName};
use super::projectile::{Material, Projectile};
use crate::consts::*;
use crate::ground_point;

/// Fixed part layout: name, offset, edge length, health, color, material.
/// Order here is hit-resolution priority.
fn part_blueprint() -> [EnemyPart; 5] {
    [
        EnemyPart::new(
            PartName::Core,
            DVec3::ZERO,
            1.0,
            100.0,
            [0.9, 0.1, 0.1, 1.0],
            Material::Core,
        ),
        EnemyPart::new(
            PartName::ShieldGenerator,
            DVec3::new(0.0, 0.9, 0.0),
            0.6,
            60.0,
            [0.2, 0.5, 1.0, 1.0],
            Material::Shield,
        ),
        EnemyPart::new(
            PartName::WeaponRight,
            DVec3::new(0.9, 0.0, 0.0),
            0.5,
            40.0,
            [0.6, 0.6, 0.6, 1.0],
            Material::Metal,
        ),
        EnemyPart::new(
            PartName::WeaponLeft,
            DVec3::new(-0.9, 0.0, 0.0),
            0.5,
            40.0,
            [0.6, 0.6, 0.6, 1.0],
            Material::Metal,
        ),
        EnemyPart::new(
            PartName::Engine,
            DVec3::new(0.0, 0.0, -0.9),
            0.6,
            50.0,
            [1.0, 0.5, 0.1, 1.0],
            Material::Engine,
        ),
    ]
}

/// A hostile unit made of destructible parts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    /// Ground position (y stays 0)
    pub position: DVec3,
    pub speed: f64,
    pub shot_cooldown: f64,
    pub last_shot_time: f64,
    pub movement_timer: f64,
    pub movement_interval: f64,
    pub target_position: Option<DVec3>,
    pub parts: Vec<EnemyPart>,
    pub projectiles: Vec<Projectile>,
    /// False once the core is destroyed
    pub alive: bool,
    /// Set when the shield generator falls; the armor penalty is applied once
    #[serde(default)]
    shield_down: bool,
}

impl Enemy {
    pub fn new(id: u32, position: DVec3) -> Self {
        Self {
            id,
            position: DVec3::new(position.x, 0.0, position.z),
            speed: ENEMY_SPEED,
            shot_cooldown: ENEMY_SHOT_COOLDOWN,
            last_shot_time: 0.0,
            movement_timer: 0.0,
            movement_interval: ENEMY_MOVEMENT_INTERVAL,
            target_position: None,
            parts: part_blueprint().into(),
            projectiles: Vec::new(),
            alive: true,
            shield_down: false,
        }
    }

    pub fn part(&self, name: PartName) -> Option<&EnemyPart> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Periodically pick a point near the player and steer toward it
    pub fn update_movement<R: Rng>(&mut self, dt: f64, player_position: DVec3, rng: &mut R) {
        self.movement_timer += dt;

        if self.movement_timer >= self.movement_interval {
            self.movement_timer = 0.0;
            let azimuth = rng.random_range(0.0..TAU);
            let radius = rng.random_range(ENEMY_TARGET_MIN_RADIUS..ENEMY_TARGET_MAX_RADIUS);
            self.target_position = Some(ground_point(player_position, radius, azimuth));
        }

        if let Some(target) = self.target_position {
            let dx = target.x - self.position.x;
            let dz = target.z - self.position.z;
            let distance = (dx * dx + dz * dz).sqrt();

            if distance > ENEMY_ARRIVAL_DISTANCE {
                self.position.x += dx / distance * self.speed * dt;
                self.position.z += dz / distance * self.speed * dt;
            }
        }
    }

    /// Fire at the player if the cooldown has elapsed. Aim is deliberately noisy.
    pub fn shoot_at_player<R: Rng>(
        &mut self,
        now: f64,
        player_position: DVec3,
        rng: &mut R,
    ) -> Option<Projectile> {
        if now - self.last_shot_time < self.shot_cooldown {
            return None;
        }

        let noise = DVec3::new(
            rng.random_range(-ENEMY_AIM_NOISE..=ENEMY_AIM_NOISE),
            rng.random_range(-ENEMY_AIM_NOISE..=ENEMY_AIM_NOISE),
            rng.random_range(-ENEMY_AIM_NOISE..=ENEMY_AIM_NOISE),
        );
        let direction = player_position - self.position + noise;
        if direction.length_squared() == 0.0 {
            return None;
        }

        self.last_shot_time = now;
        Some(Projectile::enemy(self.position, direction))
    }

    /// Advance owned projectiles and drop spent or distant ones
    pub fn update_projectiles(&mut self, dt: f64) {
        for projectile in &mut self.projectiles {
            projectile.update(dt);
        }
        let origin = self.position;
        self.projectiles
            .retain(|p| p.alive && !p.out_of_range(origin, ENEMY_CULL_DISTANCE));
    }

    /// Resolve a player projectile against the parts, first match wins.
    ///
    /// Returns the world-space hit point. The caller deactivates the projectile.
    pub fn check_hit(&mut self, projectile: &Projectile) -> Option<DVec3> {
        if !self.alive || !projectile.alive {
            return None;
        }

        let position = self.position;
        let (index, collision) = self
            .parts
            .iter()
            .enumerate()
            .filter(|(_, part)| part.alive)
            .map(|(i, part)| (i, part.check_collision(projectile, position)))
            .find(|(_, collision)| collision.hit)?;

        let impact = projectile.calculate_impact(collision.point, collision.normal, collision.material);
        let part = &mut self.parts[index];
        log::debug!(
            "Enemy {} {} hit: {:.1} damage (penetration {:.2})",
            self.id,
            part.name.as_str(),
            impact.damage,
            impact.penetration
        );
        if part.take_damage(&impact) {
            let name = part.name;
            self.on_part_destroyed(name);
        }

        Some(collision.point)
    }

    fn on_part_destroyed(&mut self, name: PartName) {
        match name {
            PartName::Core => {
                self.alive = false;
                log::info!("Enemy {} destroyed", self.id);
            }
            PartName::ShieldGenerator => {
                if self.shield_down {
                    return;
                }
                self.shield_down = true;
                for part in self.parts.iter_mut().filter(|p| p.alive) {
                    part.armor_rating *= SHIELD_LOSS_ARMOR_MULTIPLIER;
                }
                log::info!("Enemy {} shield generator down, armor weakened", self.id);
            }
            PartName::WeaponLeft | PartName::WeaponRight => {
                self.shot_cooldown *= WEAPON_LOSS_COOLDOWN_MULTIPLIER;
                log::info!(
                    "Enemy {} lost {}, cooldown now {:.2}s",
                    self.id,
                    name.as_str(),
                    self.shot_cooldown
                );
            }
            PartName::Engine => {
                self.speed *= ENGINE_LOSS_SPEED_MULTIPLIER;
                log::info!("Enemy {} engine destroyed, speed now {:.2}", self.id, self.speed);
            }
        }
    }
}
