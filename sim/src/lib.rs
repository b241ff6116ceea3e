// Re-export Rapier so downstream crates can use Rapier types
// without needing to depend on `rapier3d` directly.
pub use rapier3d;

pub mod camera;
pub mod input;
pub mod layout;
pub mod look;
pub mod settings;
pub mod statics;
pub mod vehicle;
pub mod wheels;
pub mod world;

pub use camera::{CameraPose, ChaseConfig, ChaseState, step_chase_camera};
pub use input::InputIntent;
pub use layout::city_layout;
pub use look::FreeLook;
pub use statics::{WorldStaticDef, collider_from_def};
pub use vehicle::{SteerState, VehicleConfig, VehicleFrame, step_vehicle};
pub use wheels::{WHEEL_NODE_NAMES, WheelNodes, wheel_orientation, wheel_orientations};
pub use world::DriveWorld;
