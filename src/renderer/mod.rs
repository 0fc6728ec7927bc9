//! Draw-call interface between the simulation and a graphics backend
//!
//! The simulation never talks to a graphics API. Anything that can show
//! points and cubes implements [`Renderer`]; game objects implement [`Draw`]
//! and only read their own state. [`DrawList`] records the calls, which is
//! all the headless binary and the tests need.

pub mod hud;

use glam::DVec3;

use crate::sim::{
    Enemy, EnemyManager, EnemyPart, GameState, ParticleSystem, Player, Projectile, ProjectileKind,
};

/// Colors for game elements
pub mod colors {
    pub const PLAYER_PROJECTILE: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const ENEMY_PROJECTILE: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const HEALTH_BAR_BORDER: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const HEALTH_BAR_BACKGROUND: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
    pub const FLOOR: [f32; 4] = [0.3, 0.3, 0.3, 1.0];
    pub const TEXT: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}

/// Screen-space point size for projectiles
pub const PROJECTILE_POINT_SIZE: f32 = 5.0;

/// Backend capable of drawing world-space primitives
pub trait Renderer {
    fn point(&mut self, position: DVec3, color: [f32; 4], size: f32);
    fn cube(&mut self, center: DVec3, size: f64, color: [f32; 4]);
}

/// Something that can emit its own draw calls
pub trait Draw {
    fn draw<R: Renderer>(&self, renderer: &mut R);
}

impl Draw for Projectile {
    fn draw<R: Renderer>(&self, renderer: &mut R) {
        let color = match self.kind {
            ProjectileKind::Enemy => colors::ENEMY_PROJECTILE,
            ProjectileKind::Player | ProjectileKind::Generic => colors::PLAYER_PROJECTILE,
        };
        renderer.point(self.position, color, PROJECTILE_POINT_SIZE);
    }
}

impl Draw for [Projectile] {
    fn draw<R: Renderer>(&self, renderer: &mut R) {
        for projectile in self.iter().filter(|p| p.alive) {
            projectile.draw(renderer);
        }
    }
}

/// A part on its own draws at its local offset; enemies place their parts in the world
struct PlacedPart<'a> {
    part: &'a EnemyPart,
    enemy_position: DVec3,
}

impl Draw for PlacedPart<'_> {
    fn draw<R: Renderer>(&self, renderer: &mut R) {
        if !self.part.alive {
            return;
        }
        renderer.cube(
            self.part.world_center(self.enemy_position),
            self.part.size,
            self.part.color,
        );
    }
}

impl Draw for Enemy {
    fn draw<R: Renderer>(&self, renderer: &mut R) {
        if !self.alive {
            return;
        }
        for part in &self.parts {
            PlacedPart {
                part,
                enemy_position: self.position,
            }
            .draw(renderer);
        }
        self.projectiles.draw(renderer);
    }
}

impl Draw for EnemyManager {
    fn draw<R: Renderer>(&self, renderer: &mut R) {
        for enemy in &self.enemies {
            enemy.draw(renderer);
        }
    }
}

impl Draw for ParticleSystem {
    fn draw<R: Renderer>(&self, renderer: &mut R) {
        for particle in &self.particles {
            let life = (1.0 - particle.age / particle.lifetime).clamp(0.0, 1.0) as f32;
            let [r, g, b, a] = particle.color;
            renderer.point(particle.position, [r, g, b, a * life], particle.size);
        }
    }
}

/// The player has no body on screen, only its projectiles
impl Draw for Player {
    fn draw<R: Renderer>(&self, renderer: &mut R) {
        self.projectiles.draw(renderer);
    }
}

impl Draw for GameState {
    fn draw<R: Renderer>(&self, renderer: &mut R) {
        self.enemies.draw(renderer);
        self.player.draw(renderer);
        self.particles.draw(renderer);
    }
}

/// One recorded draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    Point {
        position: DVec3,
        color: [f32; 4],
        size: f32,
    },
    Cube {
        center: DVec3,
        size: f64,
        color: [f32; 4],
    },
}

/// Renderer that records draw calls instead of issuing them
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn points(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Point { .. }))
            .count()
    }

    pub fn cubes(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Cube { .. }))
            .count()
    }
}

impl Renderer for DrawList {
    fn point(&mut self, position: DVec3, color: [f32; 4], size: f32) {
        self.commands.push(DrawCommand::Point {
            position,
            color,
            size,
        });
    }

    fn cube(&mut self, center: DVec3, size: f64, color: [f32; 4]) {
        self.commands.push(DrawCommand::Cube {
            center,
            size,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{PartName, PlayerConfig};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_enemy_draws_living_parts_in_world_space() {
        let mut enemy = Enemy::new(1, DVec3::new(5.0, 0.0, -5.0));
        enemy.parts[4].alive = false;
        enemy
            .projectiles
            .push(Projectile::enemy(DVec3::new(5.0, 0.0, -4.0), DVec3::Z));

        let mut list = DrawList::new();
        enemy.draw(&mut list);
        assert_eq!(list.cubes(), 4);
        assert_eq!(list.points(), 1);

        let shield = enemy.part(PartName::ShieldGenerator).unwrap();
        let expected = DrawCommand::Cube {
            center: DVec3::new(5.0, 0.9, -5.0),
            size: shield.size,
            color: shield.color,
        };
        assert_eq!(list.commands[1], expected);
        assert!(matches!(
            list.commands[4],
            DrawCommand::Point { color, .. } if color == colors::ENEMY_PROJECTILE
        ));
    }

    #[test]
    fn test_dead_enemy_draws_nothing() {
        let mut manager = EnemyManager::new();
        manager.spawn_at(DVec3::new(10.0, 0.0, 0.0));
        manager.spawn_at(DVec3::new(-10.0, 0.0, 0.0));
        manager.enemies[0].alive = false;

        let mut list = DrawList::new();
        manager.draw(&mut list);
        assert_eq!(list.cubes(), 5);
    }

    #[test]
    fn test_player_projectiles_yellow_and_dead_skipped() {
        let mut player = Player::new(PlayerConfig::default());
        player
            .projectiles
            .push(Projectile::player(DVec3::NEG_Z, DVec3::NEG_Z));
        let mut spent = Projectile::player(DVec3::NEG_Z, DVec3::NEG_Z);
        spent.alive = false;
        player.projectiles.push(spent);

        let mut list = DrawList::new();
        player.draw(&mut list);
        assert_eq!(
            list.commands,
            vec![DrawCommand::Point {
                position: DVec3::NEG_Z,
                color: colors::PLAYER_PROJECTILE,
                size: PROJECTILE_POINT_SIZE,
            }]
        );
    }

    #[test]
    fn test_particles_fade_with_age() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut particles = ParticleSystem::new();
        particles.emit_hit(DVec3::ZERO, &mut rng);
        particles.particles[0].age = particles.particles[0].lifetime / 2.0;

        let mut list = DrawList::new();
        particles.draw(&mut list);
        assert_eq!(list.points(), particles.len());
        match list.commands[0] {
            DrawCommand::Point { color, .. } => assert!((color[3] - 0.5).abs() < 1e-6),
            DrawCommand::Cube { .. } => panic!("particles draw as points"),
        }
    }

    #[test]
    fn test_drawing_leaves_state_untouched() {
        let mut state = GameState::new(3, PlayerConfig::default());
        state.enemies.spawn_at(DVec3::new(0.0, 0.0, -10.0));
        let before = format!("{:?}", state);

        let mut list = DrawList::new();
        state.draw(&mut list);
        assert_eq!(list.cubes(), 5);
        assert_eq!(format!("{:?}", state), before);

        list.clear();
        assert!(list.commands.is_empty());
    }
}
