//! Deterministic city layout: ground, boundary walls and building blocks.
//!
//! The city is a square grid of blocks separated by roads. Roads are a
//! rendering concern (flat strips with no collision), so only the ground
//! slab, the four boundary walls and the buildings produce collider defs.
//! Building heights come from a sine-hash of the block's grid coordinates,
//! so the skyline is varied but identical on every run and every machine
//! that evaluates `sin` identically.

use nalgebra::Vector3;

use crate::settings::{
    BLOCK_SIZE, BUILDING_FOOTPRINT_RATIO, BUILDING_HEIGHT_SPAN, BUILDING_MIN_HEIGHT,
    CLEARING_RADIUS, GROUND_HALF_THICKNESS, HALF_WORLD, ROAD_WIDTH, WALL_HEIGHT, WALL_THICKNESS,
};
use crate::statics::WorldStaticDef;

/// Deterministic pseudo-random value in [0, 1) from block grid coordinates.
///
/// The classic shader one-liner: fract(sin(x*12.9898 + z*78.233) * 43758.5453).
#[inline]
pub fn hash01(ix: f32, iz: f32) -> f32 {
    let s = (ix * 12.9898 + iz * 78.233).sin() * 43758.545_3;
    s - s.floor()
}

/// Building height for a block (meters).
#[inline]
pub fn building_height(ix: f32, iz: f32) -> f32 {
    BUILDING_MIN_HEIGHT + (hash01(ix, iz) * BUILDING_HEIGHT_SPAN).floor()
}

/// The ground slab. Centered below the origin so its top surface is y = 0.
pub fn ground_def(id: u32) -> WorldStaticDef {
    WorldStaticDef::new(
        id,
        Vector3::new(0.0, -GROUND_HALF_THICKNESS, 0.0),
        Vector3::new(HALF_WORLD, GROUND_HALF_THICKNESS, HALF_WORLD),
    )
}

/// The four boundary walls that keep the car in bounds, at +/- half-world
/// on each axis.
pub fn boundary_walls(first_id: u32) -> [WorldStaticDef; 4] {
    let half_height = WALL_HEIGHT * 0.5;
    let half_thickness = WALL_THICKNESS * 0.5;

    // North/south walls span X, east/west walls span Z.
    let span = Vector3::new(HALF_WORLD, half_height, half_thickness);
    let span_z = Vector3::new(half_thickness, half_height, HALF_WORLD);

    [
        WorldStaticDef::new(
            first_id,
            Vector3::new(0.0, half_height, HALF_WORLD),
            span,
        ),
        WorldStaticDef::new(
            first_id + 1,
            Vector3::new(0.0, half_height, -HALF_WORLD),
            span,
        ),
        WorldStaticDef::new(
            first_id + 2,
            Vector3::new(HALF_WORLD, half_height, 0.0),
            span_z,
        ),
        WorldStaticDef::new(
            first_id + 3,
            Vector3::new(-HALF_WORLD, half_height, 0.0),
            span_z,
        ),
    ]
}

/// Building defs for every city block outside the central clearing.
///
/// Block centers are spaced `BLOCK_SIZE` apart starting half a block in from
/// the world edge; each building occupies a fixed fraction of the block
/// interior left between roads.
pub fn city_blocks(first_id: u32) -> Vec<WorldStaticDef> {
    let inner = BLOCK_SIZE - ROAD_WIDTH;
    let half_footprint = inner * BUILDING_FOOTPRINT_RATIO * 0.5;

    let mut defs = Vec::new();
    let mut id = first_id;

    let mut iz = -HALF_WORLD + BLOCK_SIZE * 0.5;
    while iz < HALF_WORLD {
        let mut ix = -HALF_WORLD + BLOCK_SIZE * 0.5;
        while ix < HALF_WORLD {
            // Leave the starting area around the origin open.
            if ix.abs() < CLEARING_RADIUS && iz.abs() < CLEARING_RADIUS {
                ix += BLOCK_SIZE;
                continue;
            }

            let height = building_height(ix, iz);
            defs.push(WorldStaticDef::new(
                id,
                Vector3::new(ix, height * 0.5, iz),
                Vector3::new(half_footprint, height * 0.5, half_footprint),
            ));
            id += 1;

            ix += BLOCK_SIZE;
        }
        iz += BLOCK_SIZE;
    }

    defs
}

/// The full static world: ground, walls, buildings, with unique sequential ids.
pub fn city_layout() -> Vec<WorldStaticDef> {
    let mut defs = vec![ground_def(0)];
    defs.extend(boundary_walls(1));
    defs.extend(city_blocks(5));
    defs
}
