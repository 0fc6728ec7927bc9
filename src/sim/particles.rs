//! Cosmetic particles (explosions and sparks)
//!
//! Not gameplay-affecting. Particles fall under gravity and expire by age.

use glam::DVec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_PARTICLES, PARTICLE_GRAVITY};

pub const EXPLOSION_PARTICLES: usize = 20;
pub const HIT_PARTICLES: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub position: DVec3,
    pub velocity: DVec3,
    /// Seconds since emission
    pub age: f64,
    pub lifetime: f64,
    pub color: [f32; 4],
    pub size: f32,
}

impl Particle {
    pub fn update(&mut self, dt: f64) {
        self.position.x += self.velocity.x * dt;
        self.position.y += self.velocity.y * dt + 0.5 * PARTICLE_GRAVITY * dt * dt;
        self.position.z += self.velocity.z * dt;
        self.velocity.y += PARTICLE_GRAVITY * dt;
        self.age += dt;
    }

    pub fn is_alive(&self) -> bool {
        self.age < self.lifetime
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, particle: Particle) {
        if self.particles.len() >= MAX_PARTICLES {
            // Remove oldest particles to make room
            self.particles.remove(0);
        }
        self.particles.push(particle);
    }

    /// Red-orange burst in all directions
    pub fn emit_explosion<R: Rng>(&mut self, position: DVec3, rng: &mut R) {
        for _ in 0..EXPLOSION_PARTICLES {
            let speed = rng.random_range(5.0..10.0);
            let direction = DVec3::new(
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
                rng.random_range(-1.0..1.0),
            )
            .try_normalize()
            .unwrap_or(DVec3::Y);
            let green = rng.random_range(0.0..0.5);
            let lifetime = rng.random_range(0.3..0.7);
            self.push(Particle {
                position,
                velocity: direction * speed,
                age: 0.0,
                lifetime,
                color: [1.0, green, 0.0, 1.0],
                size: 3.0,
            });
        }
    }

    /// Small upward shower of yellow sparks
    pub fn emit_hit<R: Rng>(&mut self, position: DVec3, rng: &mut R) {
        for _ in 0..HIT_PARTICLES {
            let velocity = DVec3::new(
                rng.random_range(-3.0..3.0),
                rng.random_range(2.0..5.0),
                rng.random_range(-3.0..3.0),
            );
            let lifetime = rng.random_range(0.2..0.4);
            self.push(Particle {
                position,
                velocity,
                age: 0.0,
                lifetime,
                color: [1.0, 1.0, 0.0, 1.0],
                size: 2.0,
            });
        }
    }

    pub fn update(&mut self, dt: f64) {
        for particle in &mut self.particles {
            particle.update(dt);
        }
        self.particles.retain(Particle::is_alive);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_explosion_emits_and_expires() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut system = ParticleSystem::new();
        system.emit_explosion(DVec3::new(1.0, 2.0, 3.0), &mut rng);
        assert_eq!(system.len(), EXPLOSION_PARTICLES);
        for p in &system.particles {
            let speed = p.velocity.length();
            assert!(speed > 5.0 - 1e-9 && speed < 10.0 + 1e-9);
            assert!((0.3..0.7).contains(&p.lifetime));
        }

        system.update(0.25);
        assert_eq!(system.len(), EXPLOSION_PARTICLES);
        system.update(0.5);
        assert!(system.is_empty());
    }

    #[test]
    fn test_hit_sparks_rise() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut system = ParticleSystem::new();
        system.emit_hit(DVec3::ZERO, &mut rng);
        assert_eq!(system.len(), HIT_PARTICLES);
        assert!(system.particles.iter().all(|p| p.velocity.y >= 2.0));
    }

    #[test]
    fn test_gravity_step() {
        let mut particle = Particle {
            position: DVec3::ZERO,
            velocity: DVec3::new(1.0, 0.0, 0.0),
            age: 0.0,
            lifetime: 1.0,
            color: [1.0; 4],
            size: 1.0,
        };
        particle.update(0.1);
        assert!((particle.position.x - 0.1).abs() < 1e-12);
        assert!((particle.position.y - 0.5 * PARTICLE_GRAVITY * 0.01).abs() < 1e-12);
        assert!((particle.velocity.y - PARTICLE_GRAVITY * 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut system = ParticleSystem::new();
        for _ in 0..(MAX_PARTICLES / EXPLOSION_PARTICLES + 2) {
            system.emit_explosion(DVec3::ZERO, &mut rng);
        }
        assert_eq!(system.len(), MAX_PARTICLES);
    }
}
