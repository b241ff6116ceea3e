//! Visual wheel orientation for the rendered car model.
//!
//! The loaded model exposes its wheels as named sub-nodes; we resolve them
//! once when the asset becomes available and cache the handles for the
//! controller's lifetime. Each frame the host writes the composed
//! orientations back onto whichever nodes resolved — missing wheels are
//! simply skipped.

use nalgebra::{UnitQuaternion, Vector3};

use crate::vehicle::SteerState;

/// Node names in the car model, in state order:
/// front-left, front-right, rear-left, rear-right.
pub const WHEEL_NODE_NAMES: [&str; 4] = ["WHEEL_LF", "WHEEL_RF", "WHEEL_LB", "WHEEL_RB"];

/// Which wheels steer. Only the front axle turns with the steering angle.
pub const WHEEL_STEERS: [bool; 4] = [true, true, false, false];

/// Cached wheel node handles, one per [`WHEEL_NODE_NAMES`] entry.
///
/// `T` is whatever the host scene graph uses to address a node.
#[derive(Clone, Copy, Debug)]
pub struct WheelNodes<T> {
    pub nodes: [Option<T>; 4],
}

impl<T> WheelNodes<T> {
    /// Resolve all four wheels by exact name against the loaded asset.
    ///
    /// Call once when the model finishes loading; nodes that are missing
    /// from the asset stay `None` and are skipped every frame thereafter.
    pub fn resolve(mut lookup: impl FnMut(&str) -> Option<T>) -> Self {
        Self {
            nodes: WHEEL_NODE_NAMES.map(|name| lookup(name)),
        }
    }

    pub fn all_resolved(&self) -> bool {
        self.nodes.iter().all(Option::is_some)
    }
}

/// Compose one wheel's local orientation.
///
/// Fixed order: base, then steering about +Y (front wheels only), then spin
/// about the lateral +X axle axis. Quaternion multiplication in this order
/// keeps steer and spin independent; composing the same angles as Euler
/// rotations would couple them at large spin angles.
#[inline]
pub fn wheel_orientation(
    base: &UnitQuaternion<f32>,
    steer_angle: f32,
    spin_angle: f32,
    steers: bool,
) -> UnitQuaternion<f32> {
    let spin = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), spin_angle);
    if steers {
        let steer = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), steer_angle);
        base * steer * spin
    } else {
        base * spin
    }
}

/// All four wheel orientations for a frame, in node order, ready to be
/// written onto the resolved scene nodes.
pub fn wheel_orientations(
    steer: &SteerState,
    base: &UnitQuaternion<f32>,
) -> [UnitQuaternion<f32>; 4] {
    core::array::from_fn(|i| {
        wheel_orientation(base, steer.angle, steer.wheel_spin[i], WHEEL_STEERS[i])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn resolve_caches_exact_name_matches_only() {
        // Model with one wheel renamed: that slot stays empty, the rest bind.
        let scene: HashMap<&str, u32> =
            [("WHEEL_LF", 1), ("WHEEL_RF", 2), ("WHEEL_LB", 3), ("wheel_rb", 4)]
                .into_iter()
                .collect();

        let nodes = WheelNodes::resolve(|name| scene.get(name).copied());
        assert_eq!(nodes.nodes[0], Some(1));
        assert_eq!(nodes.nodes[1], Some(2));
        assert_eq!(nodes.nodes[2], Some(3));
        assert_eq!(nodes.nodes[3], None);
        assert!(!nodes.all_resolved());
    }

    #[test]
    fn rear_wheels_ignore_the_steering_angle() {
        let base = UnitQuaternion::identity();
        let steered = wheel_orientation(&base, 0.5, 1.3, false);
        let spin_only = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 1.3);
        assert!(steered.angle_to(&spin_only) < 1.0e-6);
    }

    #[test]
    fn front_wheel_composition_order_is_steer_then_spin() {
        let base = UnitQuaternion::identity();
        let q = wheel_orientation(&base, 0.4, 2.0, true);

        let steer = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), 0.4);
        let spin = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), 2.0);
        assert!(q.angle_to(&(steer * spin)) < 1.0e-6);
        // The reversed order is a different rotation; the fixed order matters.
        assert!(q.angle_to(&(spin * steer)) > 1.0e-3);
    }

    #[test]
    fn frame_orientations_follow_state_order() {
        let steer = crate::vehicle::SteerState {
            angle: 0.3,
            wheel_spin: [1.0, 2.0, 3.0, 4.0],
        };
        let base = UnitQuaternion::identity();
        let all = wheel_orientations(&steer, &base);

        for (i, q) in all.iter().enumerate() {
            let expected =
                wheel_orientation(&base, 0.3, steer.wheel_spin[i], WHEEL_STEERS[i]);
            assert!(q.angle_to(&expected) < 1.0e-6);
        }
    }
}
