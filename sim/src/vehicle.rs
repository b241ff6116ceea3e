//! Per-frame arcade vehicle controller.
//!
//! Translates the frame's input intent into impulses on the car's rigid
//! body and keeps the visual steering/wheel-spin state up to date. The
//! controller is the only writer of the body's velocity and angular
//! velocity; everything else reads.
//!
//! Handling model
//! - Propulsion and braking are impulses along the planar forward vector.
//! - Sideways sliding is cancelled by a grip impulse along the right vector,
//!   approximating a non-holonomic ground vehicle without a tire model.
//! - Turning is a bicycle-model yaw rate written directly as the body's
//!   angular velocity. This bypasses the solver's torque/friction response
//!   on purpose: it is what gives the arcade feel. A physically accurate
//!   build would drive yaw with torques instead; do not mix the two.
//! - "Grounded" is a height check, not a contact query (see
//!   [`crate::settings::GROUNDED_MAX_HEIGHT`]).
//!
//! All blend factors are clamped to <= 1 so large or irregular frame deltas
//! (hitches) cannot overshoot.

use nalgebra::Vector3;
use rapier3d::prelude::{RigidBodyHandle, RigidBodySet};

use crate::input::InputIntent;
use crate::settings::{DIST_EPS, GROUNDED_MAX_HEIGHT};

/// Immutable handling tuning for one vehicle.
///
/// Units: forces in newtons, speeds in m/s, angles in radians, rates in 1/s.
#[derive(Clone, Copy, Debug)]
pub struct VehicleConfig {
    /// Impulse magnitude per second while accelerating.
    pub engine_force: f32,
    /// Impulse magnitude per second while braking/reversing.
    pub brake_force: f32,
    /// Horizontal speed above which propulsion stops being applied.
    pub max_speed: f32,
    /// Steering lock.
    pub max_steer_angle: f32,
    /// Exponential response rate of the steering angle toward its target.
    pub steer_rate: f32,
    /// Exponential rate at which sideways velocity is cancelled while grounded.
    pub lateral_grip: f32,
    /// Wheel radius, used to convert ground speed into visual wheel spin.
    pub wheel_radius: f32,
    /// Front-to-rear axle distance for the bicycle steering model.
    pub wheelbase: f32,
    /// Damping applied by the physics integrator to linear velocity.
    pub linear_damping: f32,
    /// Damping applied by the physics integrator to angular velocity.
    pub angular_damping: f32,
    /// Yaw rate is clamped to +/- this value (rad/s).
    pub yaw_rate_limit: f32,
    /// Exponential response rate of yaw rate toward the bicycle-model target.
    pub yaw_response: f32,
    /// Exponential decay rate of planar velocity while coasting.
    pub coast_drag: f32,
    /// Coast drag multiplier below `min_roll_speed`, so the car actually
    /// stops instead of decaying toward zero forever.
    pub rest_drag_multiplier: f32,
    /// Speed under which the strong rest drag kicks in and wheel spin holds.
    pub min_roll_speed: f32,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            engine_force: 140.0,
            brake_force: 90.0,
            max_speed: 28.0,
            max_steer_angle: 0.5,
            steer_rate: 12.0,
            lateral_grip: 9.0,
            wheel_radius: 0.35,
            wheelbase: 2.6,
            linear_damping: 0.1,
            angular_damping: 1.0,
            yaw_rate_limit: 2.5,
            yaw_response: 10.0,
            coast_drag: 1.4,
            rest_drag_multiplier: 5.0,
            min_roll_speed: 0.6,
        }
    }
}

/// Controller-owned state that persists across frames.
///
/// Wheel spin angles are unbounded and wrap-agnostic; only their deltas are
/// visually meaningful. Order: front-left, front-right, rear-left, rear-right.
#[derive(Clone, Copy, Debug, Default)]
pub struct SteerState {
    /// Smoothed steering angle (radians, +left).
    pub angle: f32,
    /// Accumulated visual wheel rotation about the axle (radians).
    pub wheel_spin: [f32; 4],
}

impl SteerState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Diagnostic output of a single [`step_vehicle`] call.
#[derive(Clone, Copy, Debug)]
pub struct VehicleFrame {
    /// Planar (XZ) speed at the start of the frame.
    pub horizontal_speed: f32,
    /// Whether ground-based forces were applied this frame.
    pub grounded: bool,
    /// Smoothed steering angle after this frame's blend.
    pub steer_angle: f32,
    /// Yaw rate written to the body (or the body's own when airborne).
    pub yaw_rate: f32,
}

/// Project onto the ground plane and normalize.
///
/// When the projected length is near zero (car pitched vertical) the raw
/// projection is returned un-normalized to avoid division instability; the
/// impulses computed from it vanish naturally for that frame.
#[inline]
pub(crate) fn planar_unit(v: Vector3<f32>) -> Vector3<f32> {
    let planar = Vector3::new(v.x, 0.0, v.z);
    let len = planar.norm();
    if len > DIST_EPS { planar / len } else { planar }
}

/// Advance the vehicle by one frame.
///
/// Reads the intent and the body's kinematic state, applies grip, drive and
/// coasting impulses, overrides the yaw rate, and updates the steering and
/// wheel-spin state. Returns `None` without touching anything when the body
/// handle is dead — a dropped frame of control is imperceptible and the next
/// frame recovers.
pub fn step_vehicle(
    bodies: &mut RigidBodySet,
    car: RigidBodyHandle,
    intent: InputIntent,
    steer: &mut SteerState,
    cfg: &VehicleConfig,
    dt_seconds: f32,
) -> Option<VehicleFrame> {
    let body = bodies.get_mut(car)?;
    let dt = dt_seconds.max(0.0);

    // 1) Current kinematic state. Speed is planar: vertical motion (falling,
    //    settling onto the ground) must not look like rolling.
    let linvel = *body.linvel();
    let planar_vel = Vector3::new(linvel.x, 0.0, linvel.z);
    let speed = planar_vel.norm();

    // 2) Planar heading basis from the body orientation. Local forward is +Z,
    //    local right is -X (left-turn yaw is positive about +Y).
    let rotation = *body.rotation();
    let forward = planar_unit(rotation * Vector3::z());
    let right = planar_unit(rotation * -Vector3::x());

    // 3) Grounded heuristic: height only, no contact query.
    let grounded = body.translation().y < GROUNDED_MAX_HEIGHT;

    let mass = body.mass();
    let throttle = intent.throttle();

    if grounded {
        // 4) Grip: cancel the sideways velocity component. The blend is
        //    clamped so a frame hitch can't push the car past neutral into a
        //    reversed slide.
        let lateral_speed = linvel.dot(&right);
        let grip = (cfg.lateral_grip * dt).min(1.0);
        body.apply_impulse(right * (-lateral_speed * grip * mass), true);

        if throttle != 0.0 {
            // 5) Propulsion, gated by the speed cap. Reverse uses the brake
            //    force magnitude.
            if speed < cfg.max_speed {
                let force = if throttle > 0.0 {
                    cfg.engine_force
                } else {
                    cfg.brake_force
                };
                body.apply_impulse(forward * (throttle * force * dt), true);
            }
        } else {
            // 6) Coasting drag, boosted near standstill so the car reaches
            //    rest in bounded time.
            let mut drag = cfg.coast_drag;
            if speed < cfg.min_roll_speed {
                drag *= cfg.rest_drag_multiplier;
            }
            let decay = (drag * dt).min(1.0);
            body.apply_impulse(planar_vel * (-decay * mass), true);
        }
    }

    // 7) Steering angle chases its target at a clamped exponential rate.
    let target_angle = intent.steer() * cfg.max_steer_angle;
    let blend = (cfg.steer_rate * dt).min(1.0);
    steer.angle += (target_angle - steer.angle) * blend;

    // 8) Bicycle-model yaw, written directly as angular velocity (X/Z are
    //    zeroed). Curvature = tan(steer)/wheelbase; yaw = v_forward * curvature.
    let forward_speed = linvel.dot(&forward);
    let mut yaw_rate = body.angvel().y;
    if grounded {
        let curvature = steer.angle.tan() / cfg.wheelbase;
        let target_yaw =
            (forward_speed * curvature).clamp(-cfg.yaw_rate_limit, cfg.yaw_rate_limit);
        let yaw_blend = (cfg.yaw_response * dt).min(1.0);
        yaw_rate += (target_yaw - yaw_rate) * yaw_blend;
        body.set_angvel(Vector3::new(0.0, yaw_rate, 0.0), true);
    }

    // 9) Visual wheel spin follows ground speed; it holds when airborne or
    //    near standstill rather than creeping.
    if grounded && speed > cfg.min_roll_speed * 0.1 {
        let direction = if forward_speed >= 0.0 { 1.0 } else { -1.0 };
        let spin_delta = speed / cfg.wheel_radius * dt * direction;
        for angle in &mut steer.wheel_spin {
            *angle += spin_delta;
        }
    }

    Some(VehicleFrame {
        horizontal_speed: speed,
        grounded,
        steer_angle: steer.angle,
        yaw_rate,
    })
}
