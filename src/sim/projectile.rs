//! Projectiles and impact physics
//!
//! Projectiles fly in straight lines (no gravity, no drag). Damage is derived
//! from kinetic energy, impact angle and the struck material rather than a
//! fixed per-weapon number.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Surface material of whatever a projectile strikes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Material {
    Core,
    Shield,
    Metal,
    Engine,
    /// The player has no per-part geometry; it uses the table defaults
    Player,
}

/// Fraction of transferred energy a material absorbs
const MATERIAL_FACTORS: [(Material, f64); 4] = [
    (Material::Metal, 0.7),
    (Material::Shield, 0.9),
    (Material::Core, 0.8),
    (Material::Engine, 0.6),
];
pub const DEFAULT_MATERIAL_FACTOR: f64 = 0.7;

/// How strongly a material resists penetration
const MATERIAL_RESISTANCES: [(Material, f64); 4] = [
    (Material::Metal, 0.7),
    (Material::Shield, 0.3),
    (Material::Core, 0.5),
    (Material::Engine, 0.8),
];
pub const DEFAULT_MATERIAL_RESISTANCE: f64 = 0.7;

fn lookup(table: &[(Material, f64)], material: Material, fallback: f64) -> f64 {
    table
        .iter()
        .find(|(m, _)| *m == material)
        .map(|(_, v)| *v)
        .unwrap_or(fallback)
}

impl Material {
    pub fn factor(self) -> f64 {
        lookup(&MATERIAL_FACTORS, self, DEFAULT_MATERIAL_FACTOR)
    }

    pub fn resistance(self) -> f64 {
        lookup(&MATERIAL_RESISTANCES, self, DEFAULT_MATERIAL_RESISTANCE)
    }
}

/// Coefficients consumed by the impact formula
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageProfile {
    /// Base impact damage
    pub impact_base: f64,
    /// How well the round penetrates armor
    pub penetration_coeff: f64,
    /// Splash radius (carried, not applied)
    pub splash_radius: f64,
    /// Share of kinetic energy handed to the target
    pub energy_transfer_coeff: f64,
}

impl Default for DamageProfile {
    fn default() -> Self {
        Self {
            impact_base: 20.0,
            penetration_coeff: 0.5,
            splash_radius: 0.0,
            energy_transfer_coeff: 0.8,
        }
    }
}

impl DamageProfile {
    pub const PLAYER: Self = Self {
        impact_base: 25.0,
        penetration_coeff: 0.7,
        splash_radius: 0.0,
        energy_transfer_coeff: 0.9,
    };

    pub const ENEMY: Self = Self {
        impact_base: 15.0,
        penetration_coeff: 0.4,
        splash_radius: 0.5,
        energy_transfer_coeff: 0.6,
    };
}

/// Who fired the projectile. Only affects how it is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Generic,
    Player,
    Enemy,
}

/// Outcome of a projectile striking a surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactResult {
    pub damage: f64,
    pub penetration: f64,
    pub energy_transfer: f64,
    pub impact_point: DVec3,
    /// Radians between the flight direction and the surface normal
    pub impact_angle: f64,
}

impl ImpactResult {
    /// Whether the consumer should apply the critical multiplier
    pub fn is_critical(&self) -> bool {
        self.penetration > CRITICAL_PENETRATION
    }
}

/// A kinematic point projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub position: DVec3,
    pub velocity: DVec3,
    pub radius: f64,
    pub alive: bool,
    pub profile: DamageProfile,
    pub kind: ProjectileKind,
    pub mass: f64,
    pub kinetic_energy: f64,
}

impl Projectile {
    /// Create a projectile moving along `direction` at `speed`.
    ///
    /// # Panics
    /// If `direction` has zero length or `speed` is not positive.
    pub fn new(
        position: DVec3,
        direction: DVec3,
        speed: f64,
        profile: DamageProfile,
        kind: ProjectileKind,
    ) -> Self {
        let length = direction.length();
        assert!(
            length > 0.0 && length.is_finite(),
            "projectile direction must be a finite non-zero vector, got {direction:?}"
        );
        assert!(speed > 0.0, "projectile speed must be positive, got {speed}");

        let mass = PROJECTILE_MASS;
        Self {
            position,
            velocity: direction / length * speed,
            radius: PROJECTILE_RADIUS,
            alive: true,
            profile,
            kind,
            mass,
            kinetic_energy: 0.5 * mass * speed * speed,
        }
    }

    pub fn player(position: DVec3, direction: DVec3) -> Self {
        Self::new(
            position,
            direction,
            PLAYER_PROJECTILE_SPEED,
            DamageProfile::PLAYER,
            ProjectileKind::Player,
        )
    }

    pub fn enemy(position: DVec3, direction: DVec3) -> Self {
        Self::new(
            position,
            direction,
            ENEMY_PROJECTILE_SPEED,
            DamageProfile::ENEMY,
            ProjectileKind::Enemy,
        )
    }

    /// Straight-line integration
    pub fn update(&mut self, dt: f64) {
        self.position += self.velocity * dt;
    }

    /// True once the projectile has left the box of half-width `limit`
    /// around `owner` on the ground plane
    pub fn out_of_range(&self, owner: DVec3, limit: f64) -> bool {
        (self.position.x - owner.x).abs() >= limit || (self.position.z - owner.z).abs() >= limit
    }

    /// Compute the effect of striking a surface with the given normal
    pub fn calculate_impact(
        &self,
        hit_point: DVec3,
        surface_normal: DVec3,
        target_material: Material,
    ) -> ImpactResult {
        let impact_angle = self.impact_angle(surface_normal);

        let energy_transfer = self.kinetic_energy
            * impact_angle.cos().abs()
            * target_material.factor()
            * self.profile.energy_transfer_coeff;

        let penetration =
            energy_transfer * self.profile.penetration_coeff / target_material.resistance();

        ImpactResult {
            damage: impact_damage(
                &self.profile,
                energy_transfer,
                self.kinetic_energy,
                penetration,
            ),
            penetration,
            energy_transfer,
            impact_point: hit_point,
            impact_angle,
        }
    }

    fn impact_angle(&self, surface_normal: DVec3) -> f64 {
        let cos_angle = self.velocity.normalize().dot(surface_normal.normalize());
        cos_angle.clamp(-1.0, 1.0).acos()
    }
}

/// Final damage: base impact scaled by the transferred energy share, plus up
/// to 100% bonus from penetration
pub fn impact_damage(
    profile: &DamageProfile,
    energy_transfer: f64,
    kinetic_energy: f64,
    penetration: f64,
) -> f64 {
    let energy_factor = energy_transfer / kinetic_energy;
    profile.impact_base * energy_factor * (1.0 + penetration.min(1.0))
}
