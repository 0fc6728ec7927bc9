//! Game state owned by the game loop
//!
//! Everything the simulation mutates per tick lives here, including the
//! seeded RNG, so a run is reproducible from its seed and inputs.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::manager::EnemyManager;
use super::particles::ParticleSystem;
use super::player::{Player, PlayerConfig};

#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub player: Player,
    pub enemies: EnemyManager,
    /// Cosmetic only
    pub particles: ParticleSystem,
    /// Simulation tick counter
    pub ticks: u64,
    pub rng: Pcg32,
}

impl GameState {
    pub fn new(seed: u64, config: PlayerConfig) -> Self {
        Self {
            seed,
            player: Player::new(config),
            enemies: EnemyManager::new(),
            particles: ParticleSystem::new(),
            ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Start over: respawn the player and clear enemies and particles
    pub fn reset(&mut self) {
        self.player.respawn();
        self.enemies = EnemyManager::new();
        self.particles = ParticleSystem::new();
        log::info!("Game reset");
    }
}
