//! Chase camera: follows the car from behind and above, smoothed.
//!
//! Each frame the camera computes where it wants to be (behind the car
//! along its look direction, above it, aiming at a point ahead of the car
//! that leads further the faster the car moves) and lerps its stored pose
//! toward that with a time-scaled, clamped blend. The stored pose is the
//! only state; the camera never writes to the car's body.
//!
//! The free-look yaw offset rotates the look direction about the vertical
//! axis, so looking around does not require turning the car.

use nalgebra::{Point3, UnitQuaternion, Vector3};
use rapier3d::prelude::{RigidBodyHandle, RigidBodySet};

use crate::vehicle::planar_unit;

/// Immutable chase tuning. Distances in meters, smoothness in 1/s.
#[derive(Clone, Copy, Debug)]
pub struct ChaseConfig {
    /// Follow distance behind the car along the look direction.
    pub distance: f32,
    /// Camera height above the car's position.
    pub height: f32,
    /// Exponential response rate of the smoothed pose toward its target.
    pub smoothness: f32,
    /// Seconds of travel the aim point leads the car by.
    pub look_ahead: f32,
    /// Hard cap on the speed-scaled lead distance.
    pub look_ahead_cap: f32,
    /// Constant forward offset of the aim point, independent of speed.
    pub ahead_offset: f32,
    /// Aim-point height above the car's position.
    pub target_height: f32,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            distance: 8.0,
            height: 4.0,
            smoothness: 2.5,
            look_ahead: 2.0,
            look_ahead_cap: 10.0,
            ahead_offset: 2.0,
            target_height: 1.0,
        }
    }
}

/// Camera-owned smoothing state, persisted across frames.
///
/// Starts at the origin and converges onto the live targets over the first
/// frames, which doubles as a gentle fly-in when the scene appears.
#[derive(Clone, Copy, Debug)]
pub struct ChaseState {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
}

impl Default for ChaseState {
    fn default() -> Self {
        Self::new()
    }
}

impl ChaseState {
    pub fn new() -> Self {
        Self {
            position: Point3::origin(),
            target: Point3::origin(),
        }
    }
}

/// The smoothed viewpoint for one frame: where the camera sits and what it
/// looks at. The host applies this to its camera object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
}

impl CameraPose {
    /// Equivalent look-at orientation for hosts that set a transform rather
    /// than calling a look-at helper. Falls back to identity when eye and
    /// target coincide.
    pub fn orientation(&self) -> UnitQuaternion<f32> {
        let dir = self.target - self.eye;
        if dir.norm_squared() <= f32::EPSILON {
            return UnitQuaternion::identity();
        }
        UnitQuaternion::face_towards(&dir, &Vector3::y())
    }
}

/// Advance the chase camera by one frame.
///
/// Returns `None` when the body handle is dead, leaving `state` untouched so
/// the viewpoint holds last frame's pose.
pub fn step_chase_camera(
    bodies: &RigidBodySet,
    car: RigidBodyHandle,
    state: &mut ChaseState,
    pointer_yaw: f32,
    cfg: &ChaseConfig,
    dt_seconds: f32,
) -> Option<CameraPose> {
    let body = bodies.get(car)?;

    let position = Point3::from(*body.translation());
    let rotation = *body.rotation();
    let velocity = *body.linvel();

    // Look direction: planar forward, swung about +Y by the free-look yaw.
    let forward = planar_unit(rotation * Vector3::z());
    let look_dir = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), pointer_yaw) * forward;

    // Behind and above the car.
    let desired_eye = position - look_dir * cfg.distance + Vector3::new(0.0, cfg.height, 0.0);

    // Aim ahead of the car, leading with speed but capped so high velocities
    // can't swing the view into the distance.
    let speed = velocity.norm();
    let lead = (speed * cfg.look_ahead).min(cfg.look_ahead_cap);
    let desired_target = position
        + look_dir * (lead + cfg.ahead_offset)
        + Vector3::new(0.0, cfg.target_height, 0.0);

    // Time-scaled lerp, clamped so frame hitches can't overshoot the target.
    let blend = (cfg.smoothness * dt_seconds.max(0.0)).min(1.0);
    state.position += (desired_eye - state.position) * blend;
    state.target += (desired_target - state.target) * blend;

    Some(CameraPose {
        eye: state.position,
        target: state.target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapier3d::prelude::{RigidBodyBuilder, RigidBodySet};

    fn parked_car(at: Point3<f32>) -> (RigidBodySet, RigidBodyHandle) {
        let mut bodies = RigidBodySet::new();
        let body = RigidBodyBuilder::dynamic()
            .pose(nalgebra::Isometry3::translation(at.x, at.y, at.z))
            .build();
        let handle = bodies.insert(body);
        (bodies, handle)
    }

    #[test]
    fn missing_body_holds_last_pose() {
        let bodies = RigidBodySet::new();
        let mut state = ChaseState::new();
        state.position = Point3::new(1.0, 2.0, 3.0);

        let pose = step_chase_camera(
            &bodies,
            RigidBodyHandle::invalid(),
            &mut state,
            0.0,
            &ChaseConfig::default(),
            1.0 / 60.0,
        );
        assert!(pose.is_none());
        assert_eq!(state.position, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn smoothing_is_idempotent_at_the_target() {
        let cfg = ChaseConfig::default();
        let at = Point3::new(5.0, 0.5, -3.0);
        let (bodies, handle) = parked_car(at);

        // With identity rotation and zero yaw the look direction is +Z, so
        // the desired pose is known in closed form. Seed the state exactly
        // there: a further frame with no movement must not change a bit.
        let mut state = ChaseState {
            position: at + Vector3::new(0.0, cfg.height, -cfg.distance),
            target: at + Vector3::new(0.0, cfg.target_height, cfg.ahead_offset),
        };
        let seeded = state;

        let pose =
            step_chase_camera(&bodies, handle, &mut state, 0.0, &cfg, 1.0 / 60.0).unwrap();
        assert_eq!(state.position, seeded.position);
        assert_eq!(state.target, seeded.target);
        assert_eq!(pose.eye, seeded.position);
    }

    #[test]
    fn converges_behind_and_above_a_parked_car() {
        let cfg = ChaseConfig::default();
        let at = Point3::new(0.0, 0.5, 0.0);
        let (bodies, handle) = parked_car(at);
        let mut state = ChaseState::new();

        for _ in 0..600 {
            step_chase_camera(&bodies, handle, &mut state, 0.0, &cfg, 1.0 / 60.0).unwrap();
        }

        let expected_eye = at + Vector3::new(0.0, cfg.height, -cfg.distance);
        assert!((state.position - expected_eye).norm() < 1.0e-3);
    }

    #[test]
    fn look_ahead_is_capped_for_large_velocities() {
        let cfg = ChaseConfig::default();
        let (mut bodies, handle) = parked_car(Point3::new(0.0, 0.5, 0.0));
        bodies
            .get_mut(handle)
            .unwrap()
            .set_linvel(Vector3::new(0.0, 0.0, 1.0e6), true);
        let mut state = ChaseState::new();

        // Run to convergence; the aim point must sit at the capped lead, not
        // a megameter downrange.
        for _ in 0..600 {
            step_chase_camera(&bodies, handle, &mut state, 0.0, &cfg, 1.0 / 60.0).unwrap();
        }
        let planar_lead = Vector3::new(state.target.x, 0.0, state.target.z).norm();
        assert!(planar_lead <= cfg.look_ahead_cap + cfg.ahead_offset + 1.0e-2);
    }

    #[test]
    fn pointer_yaw_swings_the_camera_around_the_car() {
        let cfg = ChaseConfig::default();
        let at = Point3::new(0.0, 0.5, 0.0);
        let (bodies, handle) = parked_car(at);
        let mut state = ChaseState::new();

        // Quarter turn to the left: the camera should end up beside the car
        // (on the -X side, since look swings from +Z toward +X) instead of
        // behind it.
        let yaw = std::f32::consts::FRAC_PI_2;
        for _ in 0..600 {
            step_chase_camera(&bodies, handle, &mut state, yaw, &cfg, 1.0 / 60.0).unwrap();
        }

        assert!((state.position.x - (-cfg.distance)).abs() < 1.0e-2);
        assert!(state.position.z.abs() < 1.0e-2);
    }

    #[test]
    fn orientation_faces_the_target() {
        let pose = CameraPose {
            eye: Point3::new(0.0, 4.0, -8.0),
            target: Point3::new(0.0, 1.0, 2.0),
        };
        let q = pose.orientation();
        // face_towards maps local +Z onto the view direction.
        let view = q * Vector3::z();
        let expected = (pose.target - pose.eye).normalize();
        assert!((view - expected).norm() < 1.0e-5);

        let degenerate = CameraPose {
            eye: pose.eye,
            target: pose.eye,
        };
        assert_eq!(degenerate.orientation(), UnitQuaternion::identity());
    }
}
