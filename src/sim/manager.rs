//! Enemy population: timed spawning, per-enemy AI and cross-side collision passes

use glam::DVec3;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use super::enemy::Enemy;
use super::player::Player;
use super::projectile::Material;
use crate::consts::*;
use crate::ground_point;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyManager {
    /// Enemies sorted by id; dead ones stay until `cleanup`
    pub enemies: Vec<Enemy>,
    pub spawn_timer: f64,
    pub spawn_interval: f64,
    pub max_enemies: usize,
    next_id: u32,
}

impl Default for EnemyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl EnemyManager {
    pub fn new() -> Self {
        Self {
            enemies: Vec::new(),
            spawn_timer: 0.0,
            spawn_interval: SPAWN_INTERVAL,
            max_enemies: MAX_ENEMIES,
            next_id: 1,
        }
    }

    /// Spawn one enemy around the world origin unless the population is full
    pub fn spawn_enemy<R: Rng>(&mut self, rng: &mut R) -> Option<u32> {
        if self.enemies.len() >= self.max_enemies {
            return None;
        }

        let azimuth = rng.random_range(0.0..TAU);
        let radius = rng.random_range(SPAWN_MIN_RADIUS..SPAWN_MAX_RADIUS);
        self.spawn_at(ground_point(DVec3::ZERO, radius, azimuth))
    }

    /// Spawn one enemy at a ground position unless the population is full
    pub fn spawn_at(&mut self, position: DVec3) -> Option<u32> {
        if self.enemies.len() >= self.max_enemies {
            return None;
        }

        let id = self.next_id;
        self.next_id += 1;
        self.enemies.push(Enemy::new(id, position));
        log::info!(
            "Spawned enemy {} at ({:.1}, {:.1}), population {}",
            id,
            position.x,
            position.z,
            self.enemies.len()
        );
        Some(id)
    }

    /// Advance all enemies one tick against `player`.
    ///
    /// Returns the hit point of the last player projectile that struck an
    /// enemy part this tick, for cosmetic effects.
    pub fn update<R: Rng>(
        &mut self,
        dt: f64,
        now: f64,
        player: &mut Player,
        rng: &mut R,
    ) -> Option<DVec3> {
        self.spawn_timer += dt;
        if self.spawn_timer >= self.spawn_interval {
            self.spawn_timer = 0.0;
            self.spawn_enemy(rng);
        }

        let mut hit_position = None;
        for enemy in self.enemies.iter_mut().filter(|e| e.alive) {
            enemy.update_movement(dt, player.position, rng);

            if let Some(projectile) = enemy.shoot_at_player(now, player.position, rng) {
                enemy.projectiles.push(projectile);
            }

            enemy.update_projectiles(dt);

            // Enemy fire vs player. The player has no part geometry, so the
            // impact uses an upward normal and the default material.
            for projectile in enemy.projectiles.iter_mut().filter(|p| p.alive) {
                if player.check_projectile_hit(projectile.position, projectile.radius) {
                    projectile.alive = false;
                    let impact =
                        projectile.calculate_impact(projectile.position, DVec3::Y, Material::Player);
                    log::debug!("Player hit by enemy {}: {:.1} damage", enemy.id, impact.damage);
                    player.take_damage(impact.damage, now);
                }
            }

            // Player fire vs enemy parts, at most one hit per enemy per tick
            for projectile in player.projectiles.iter_mut().filter(|p| p.alive) {
                if let Some(point) = enemy.check_hit(projectile) {
                    projectile.alive = false;
                    hit_position = Some(point);
                    break;
                }
            }
        }

        hit_position
    }

    /// Drop enemies whose core has been destroyed
    pub fn cleanup(&mut self) {
        let before = self.enemies.len();
        self.enemies.retain(|e| e.alive);
        let removed = before - self.enemies.len();
        if removed > 0 {
            log::debug!("Removed {} dead enemies", removed);
        }
    }

    pub fn living_count(&self) -> usize {
        self.enemies.iter().filter(|e| e.alive).count()
    }
}
