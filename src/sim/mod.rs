//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - dt and clock time are injected by the caller
//! - Seeded RNG only
//! - Stable iteration order (enemies by spawn id, parts by blueprint order)
//! - No rendering or platform dependencies

pub mod enemy;
pub mod manager;
pub mod part;
pub mod particles;
pub mod player;
pub mod projectile;
pub mod state;
pub mod tick;

pub use enemy::Enemy;
pub use manager::EnemyManager;
pub use part::{EnemyPart, Face, PartCollision, PartName, point_in_polygon};
pub use particles::{Particle, ParticleSystem};
pub use player::{Player, PlayerConfig, PlayerInput};
pub use projectile::{DamageProfile, ImpactResult, Material, Projectile, ProjectileKind};
pub use state::GameState;
pub use tick::{TickReport, tick};
