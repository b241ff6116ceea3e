//! Static world collider definitions.
//!
//! Everything solid in the city is an axis-aligned box (ground slab,
//! boundary walls, building blocks), so the canonical definition is a posed
//! cuboid. The stable `id` drives deterministic insertion order when the
//! drive world is built: given the same defs, the same Rapier sets come out.
//!
//! Conventions
//! - Units are meters.
//! - `translation` is the cuboid center in world space.

use nalgebra::Vector3;
use rapier3d::prelude::{Collider, ColliderBuilder};

/// One immutable world box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldStaticDef {
    /// Stable unique identifier used to ensure deterministic insertion order.
    pub id: u32,
    /// World-space center.
    pub translation: Vector3<f32>,
    /// Cuboid half-extents.
    pub half_extents: Vector3<f32>,
}

impl WorldStaticDef {
    pub fn new(id: u32, translation: Vector3<f32>, half_extents: Vector3<f32>) -> Self {
        Self {
            id,
            translation,
            half_extents,
        }
    }
}

/// Build the Rapier collider for a def. The pose comes from the parent
/// fixed body, so the collider itself carries the identity transform.
pub fn collider_from_def(def: &WorldStaticDef) -> Collider {
    ColliderBuilder::cuboid(def.half_extents.x, def.half_extents.y, def.half_extents.z)
        .friction(0.6)
        .restitution(0.0)
        .build()
}
