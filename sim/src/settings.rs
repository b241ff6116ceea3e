/*!
Shared tolerances and world-geometry constants.

These centralize the parameters used by the vehicle controller, the chase
camera and the static city layout. Keeping them together makes tuning easier
and helps ensure deterministic behavior across platforms.

Notes
- Distances are in meters, time in seconds, angles in radians.
- Favor practical world-space tolerances over machine epsilon for robust
  behavior.
- Vehicle and camera tuning live in `VehicleConfig` / `ChaseConfig`; the
  constants here are either structural (world geometry) or shared between
  modules.
*/

/// Practical small distance for comparisons (meters).
/// Use for dot-product guards, planar-length checks, etc.
pub const DIST_EPS: f32 = 1.0e-6;

/// Gravity magnitude in meters per second squared (positive value).
pub const GRAVITY_MPS2: f32 = 9.81;

/// Vertical position below which the car counts as grounded (meters).
///
/// This is a height check, not a contact query. It holds on the flat city
/// ground the layout produces; on non-flat terrain it would misclassify.
/// Known limitation, kept on purpose: the boolean contract ("respond to
/// ground forces while true") is what the controller depends on, and a
/// raycast-based replacement can slot in behind it without touching the
/// rest of the controller.
pub const GROUNDED_MAX_HEIGHT: f32 = 1.5;

/// Yaw accumulated per pixel of pointer movement while captured (radians).
pub const LOOK_SENSITIVITY: f32 = 0.002;

/// Chassis collider half-extents (meters): half width, half height, half length.
pub const CHASSIS_HALF_EXTENTS: [f32; 3] = [0.9, 0.45, 2.2];

/// Car spawn height (meters). Slightly above resting height so the body
/// settles onto the ground during the first few frames.
pub const CAR_SPAWN_HEIGHT: f32 = 0.9;

/// Full world span per axis (meters). The drivable area is a square.
pub const WORLD_SIZE: f32 = 192.0;

/// Half the world span (meters). Walls sit at +/- this coordinate.
pub const HALF_WORLD: f32 = WORLD_SIZE * 0.5;

/// City block pitch (meters): distance between road centerlines.
pub const BLOCK_SIZE: f32 = 24.0;

/// Road strip width (meters). Roads are visual-only and carry no colliders;
/// the width still shapes the building footprint below.
pub const ROAD_WIDTH: f32 = 8.0;

/// Fraction of a block's interior that a building footprint occupies.
pub const BUILDING_FOOTPRINT_RATIO: f32 = 0.7;

/// Building heights are `BUILDING_MIN_HEIGHT + floor(hash * BUILDING_HEIGHT_SPAN)`.
pub const BUILDING_MIN_HEIGHT: f32 = 4.0;
pub const BUILDING_HEIGHT_SPAN: f32 = 16.0;

/// Blocks whose center lies within this planar radius of the origin are left
/// empty, giving the car an open starting area.
pub const CLEARING_RADIUS: f32 = 15.0;

/// Boundary wall dimensions (meters).
pub const WALL_HEIGHT: f32 = 8.0;
pub const WALL_THICKNESS: f32 = 2.0;

/// Ground slab half-thickness (meters). The slab is centered below y = 0 so
/// its top surface is exactly at y = 0.
pub const GROUND_HALF_THICKNESS: f32 = 1.0;
