//! Destructible enemy sub-components
//!
//! Each part is an axis-aligned cube positioned relative to its enemy. Faces
//! are precomputed so a projectile can be tested against all six of them:
//! a cheap bounding-sphere check first, then per-face plane distance and a
//! 2D point-in-quad test on the plane.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use super::projectile::{ImpactResult, Material, Projectile};
use crate::consts::CRITICAL_MULTIPLIER;

/// Role of a part within its enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartName {
    Core,
    ShieldGenerator,
    WeaponLeft,
    WeaponRight,
    Engine,
}

impl PartName {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartName::Core => "core",
            PartName::ShieldGenerator => "shield_generator",
            PartName::WeaponLeft => "weapon_left",
            PartName::WeaponRight => "weapon_right",
            PartName::Engine => "engine",
        }
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self, PartName::WeaponLeft | PartName::WeaponRight)
    }

    /// Armor rating for this part, falling back to `DEFAULT_ARMOR_RATING`
    pub fn armor_rating(&self) -> f64 {
        ARMOR_RATINGS
            .iter()
            .find(|(name, _)| name == self)
            .map(|(_, rating)| *rating)
            .unwrap_or(DEFAULT_ARMOR_RATING)
    }
}

const ARMOR_RATINGS: [(PartName, f64); 4] = [
    (PartName::Core, 2.0),
    (PartName::ShieldGenerator, 1.5),
    (PartName::WeaponLeft, 1.2),
    (PartName::WeaponRight, 1.2),
];
pub const DEFAULT_ARMOR_RATING: f64 = 1.0;

/// One cube face in part-local space
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Face {
    /// Outward unit normal
    pub normal: DVec3,
    /// Corners, counter-clockwise seen from outside
    pub vertices: [DVec3; 4],
}

impl Face {
    fn new(normal: DVec3, u: DVec3, v: DVec3, half: f64) -> Self {
        let center = normal * half;
        let (u, v) = (u * half, v * half);
        Self {
            normal,
            vertices: [center - u - v, center + u - v, center + u + v, center - u + v],
        }
    }
}

/// Six outward faces of a cube with edge length `size`.
///
/// Each (normal, u, v) triple satisfies u × v = normal.
fn cube_faces(size: f64) -> [Face; 6] {
    let half = size / 2.0;
    [
        Face::new(DVec3::Z, DVec3::X, DVec3::Y, half),
        Face::new(DVec3::NEG_Z, DVec3::Y, DVec3::X, half),
        Face::new(DVec3::Y, DVec3::Z, DVec3::X, half),
        Face::new(DVec3::NEG_Y, DVec3::X, DVec3::Z, half),
        Face::new(DVec3::X, DVec3::Y, DVec3::Z, half),
        Face::new(DVec3::NEG_X, DVec3::Z, DVec3::Y, half),
    ]
}

/// Result of a projectile vs part check
#[derive(Debug, Clone)]
pub struct PartCollision {
    pub hit: bool,
    /// Projectile center projected onto the struck face
    pub point: DVec3,
    /// Outward normal of the struck face
    pub normal: DVec3,
    pub material: Material,
    /// Perpendicular distance from projectile center to the face plane
    pub distance: f64,
}

impl PartCollision {
    pub fn miss(material: Material) -> Self {
        Self {
            hit: false,
            point: DVec3::ZERO,
            normal: DVec3::ZERO,
            material,
            distance: f64::INFINITY,
        }
    }
}

/// A destructible cube attached to an enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyPart {
    pub name: PartName,
    /// Offset from the owning enemy's position
    pub relative_position: DVec3,
    /// Cube edge length
    pub size: f64,
    pub health: f64,
    pub max_health: f64,
    pub color: [f32; 4],
    pub armor_rating: f64,
    pub material: Material,
    pub alive: bool,
    pub faces: [Face; 6],
}

impl EnemyPart {
    pub fn new(
        name: PartName,
        relative_position: DVec3,
        size: f64,
        health: f64,
        color: [f32; 4],
        material: Material,
    ) -> Self {
        Self {
            name,
            relative_position,
            size,
            health,
            max_health: health,
            color,
            armor_rating: name.armor_rating(),
            material,
            alive: true,
            faces: cube_faces(size),
        }
    }

    /// World-space center given the owning enemy's position
    #[inline]
    pub fn world_center(&self, enemy_position: DVec3) -> DVec3 {
        enemy_position + self.relative_position
    }

    /// Test a projectile against this part.
    ///
    /// Among faces whose plane lies within the projectile radius and whose
    /// bounds contain the projected center, the closest one wins.
    pub fn check_collision(&self, projectile: &Projectile, enemy_position: DVec3) -> PartCollision {
        let center = self.world_center(enemy_position);

        // Broad phase
        if center.distance(projectile.position) > self.size + projectile.radius {
            return PartCollision::miss(self.material);
        }

        let mut best = PartCollision::miss(self.material);
        for face in &self.faces {
            let plane_point = center + face.vertices[0];
            let distance = (projectile.position - plane_point).dot(face.normal);
            if distance.abs() > projectile.radius {
                continue;
            }

            let point = projectile.position - face.normal * distance;
            if !face_contains(face, center, point) {
                continue;
            }

            if distance.abs() < best.distance {
                best = PartCollision {
                    hit: true,
                    point,
                    normal: face.normal,
                    material: self.material,
                    distance: distance.abs(),
                };
            }
        }
        best
    }

    /// Apply an impact. Returns true only on the hit that destroys the part.
    pub fn take_damage(&mut self, impact: &ImpactResult) -> bool {
        if !self.alive {
            return false;
        }

        let mut damage = impact.damage / self.armor_rating;
        if impact.is_critical() {
            damage *= CRITICAL_MULTIPLIER;
        }
        self.health = (self.health - damage).max(0.0);

        // Darken toward black as health drops; compounds across hits
        let fraction = (self.health / self.max_health) as f32;
        for channel in &mut self.color[..3] {
            *channel *= fraction;
        }

        if self.health <= 0.0 {
            self.alive = false;
            return true;
        }
        false
    }
}

/// Whether a point on the face plane lies inside the face quad
fn face_contains(face: &Face, center: DVec3, point: DVec3) -> bool {
    let (a, b) = plane_axes(face.normal);
    let polygon = face.vertices.map(|v| {
        let w = center + v;
        DVec2::new(w[a], w[b])
    });
    point_in_polygon(DVec2::new(point[a], point[b]), &polygon)
}

/// Indices of the two axes orthogonal to the dominant axis of `normal`
fn plane_axes(normal: DVec3) -> (usize, usize) {
    let abs = normal.abs();
    if abs.x >= abs.y && abs.x >= abs.z {
        (1, 2)
    } else if abs.y >= abs.z {
        (0, 2)
    } else {
        (0, 1)
    }
}

/// Even-odd ray casting test
pub fn point_in_polygon(point: DVec2, polygon: &[DVec2]) -> bool {
    let mut inside = false;
    let mut j = polygon.len().wrapping_sub(1);
    for (i, pi) in polygon.iter().enumerate() {
        let pj = polygon[j];
        if (pi.y > point.y) != (pj.y > point.y)
            && point.x < (pj.x - pi.x) * (point.y - pi.y) / (pj.y - pi.y) + pi.x
        {
            inside = !inside;
        }
        j = i;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::projectile::{DamageProfile, ProjectileKind};
    use proptest::prelude::*;

    fn metal_cube(size: f64) -> EnemyPart {
        EnemyPart::new(
            PartName::WeaponLeft,
            DVec3::ZERO,
            size,
            40.0,
            [0.6, 0.6, 0.6, 1.0],
            Material::Metal,
        )
    }

    fn projectile_at(position: DVec3, direction: DVec3) -> Projectile {
        Projectile::new(
            position,
            direction,
            20.0,
            DamageProfile::default(),
            ProjectileKind::Generic,
        )
    }

    fn impact(damage: f64, penetration: f64) -> ImpactResult {
        ImpactResult {
            damage,
            penetration,
            energy_transfer: 0.0,
            impact_point: DVec3::ZERO,
            impact_angle: 0.0,
        }
    }

    #[test]
    fn test_faces_are_outward_and_planar() {
        for face in cube_faces(2.0) {
            for v in face.vertices {
                assert!((v.dot(face.normal) - 1.0).abs() < 1e-12);
            }
            let winding = (face.vertices[1] - face.vertices[0])
                .cross(face.vertices[2] - face.vertices[1])
                .normalize();
            assert!((winding - face.normal).length() < 1e-12);
        }
    }

    #[test]
    fn test_hit_front_face_center() {
        let part = metal_cube(1.0);
        let enemy_pos = DVec3::new(4.0, 0.0, -3.0);
        // Just in front of the +Z face, within the projectile radius
        let projectile = projectile_at(enemy_pos + DVec3::new(0.0, 0.0, 0.6), DVec3::NEG_Z);

        let result = part.check_collision(&projectile, enemy_pos);
        assert!(result.hit);
        assert_eq!(result.normal, DVec3::Z);
        assert_eq!(result.material, Material::Metal);
        assert!((result.point - (enemy_pos + DVec3::new(0.0, 0.0, 0.5))).length() < 1e-12);

        let impact = projectile.calculate_impact(result.point, result.normal, result.material);
        assert!((impact.damage - 22.4).abs() < 1e-9);
    }

    #[test]
    fn test_broad_phase_rejects_far_projectile() {
        let part = metal_cube(1.0);
        let projectile = projectile_at(DVec3::new(0.0, 0.0, 1.3), DVec3::NEG_Z);
        assert!(!part.check_collision(&projectile, DVec3::ZERO).hit);
    }

    #[test]
    fn test_near_plane_but_outside_face_bounds_misses() {
        let part = metal_cube(1.0);
        // Close to the +Z plane but beside the face on X
        let projectile = projectile_at(DVec3::new(0.9, 0.0, 0.55), DVec3::NEG_Z);
        assert!(!part.check_collision(&projectile, DVec3::ZERO).hit);
    }

    #[test]
    fn test_deep_inside_cube_misses() {
        let part = metal_cube(2.0);
        let projectile = projectile_at(DVec3::ZERO, DVec3::X);
        assert!(!part.check_collision(&projectile, DVec3::ZERO).hit);
    }

    #[test]
    fn test_closest_face_wins_near_edge() {
        let part = metal_cube(1.0);
        // Near the +X/+Z edge, slightly closer to the +X plane
        let projectile = projectile_at(DVec3::new(0.45, 0.0, 0.38), DVec3::NEG_X);
        let result = part.check_collision(&projectile, DVec3::ZERO);
        assert!(result.hit);
        assert_eq!(result.normal, DVec3::X);
    }

    #[test]
    fn test_take_damage_applies_armor_and_critical() {
        let mut part = metal_cube(1.0);
        assert_eq!(part.armor_rating, 1.2);

        let destroyed = part.take_damage(&impact(12.0, 0.5));
        assert!(!destroyed);
        assert!((part.health - 30.0).abs() < 1e-9);

        // Critical: 12 / 1.2 * 1.5 = 15
        part.take_damage(&impact(12.0, 0.9));
        assert!((part.health - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_color_darkens_multiplicatively() {
        let mut part = metal_cube(1.0);
        part.armor_rating = 1.0;
        part.take_damage(&impact(20.0, 0.0));
        assert!((part.color[0] - 0.3).abs() < 1e-6);
        part.take_damage(&impact(10.0, 0.0));
        assert!((part.color[0] - 0.075).abs() < 1e-6);
        assert_eq!(part.color[3], 1.0);
    }

    #[test]
    fn test_destroyed_exactly_once() {
        let mut part = metal_cube(1.0);
        assert!(part.take_damage(&impact(1000.0, 0.0)));
        assert_eq!(part.health, 0.0);
        assert!(!part.alive);
        assert!(!part.take_damage(&impact(1000.0, 0.0)));
        assert_eq!(part.health, 0.0);
        assert!(!part.alive);
    }

    #[test]
    fn test_armor_table_default() {
        assert_eq!(PartName::Core.armor_rating(), 2.0);
        assert_eq!(PartName::Engine.armor_rating(), DEFAULT_ARMOR_RATING);
    }

    #[test]
    fn test_point_in_polygon() {
        let square = [
            DVec2::new(-1.0, -1.0),
            DVec2::new(1.0, -1.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(-1.0, 1.0),
        ];
        assert!(point_in_polygon(DVec2::ZERO, &square));
        assert!(point_in_polygon(DVec2::new(0.9, -0.9), &square));
        assert!(!point_in_polygon(DVec2::new(1.1, 0.0), &square));
        assert!(!point_in_polygon(DVec2::new(0.0, -2.0), &square));
    }

    proptest! {
        #[test]
        fn health_never_negative(hits in proptest::collection::vec((0.0f64..80.0, 0.0f64..2.0), 1..20)) {
            let mut part = metal_cube(1.0);
            let mut destroyed_count = 0;
            for (damage, penetration) in hits {
                if part.take_damage(&impact(damage, penetration)) {
                    destroyed_count += 1;
                }
                prop_assert!(part.health >= 0.0);
            }
            prop_assert!(destroyed_count <= 1);
            prop_assert_eq!(part.alive, part.health > 0.0);
        }
    }
}
