//! Rapier-backed drive world: static city geometry plus the car body.
//!
//! Design goals
//! - Deterministic: statics are inserted sorted by `id`, so the same defs
//!   build identical in-memory sets, and the same frame sequence produces
//!   bit-identical body state.
//! - Single-threaded and synchronous: one `advance()` per rendered frame.
//!   The vehicle controller runs first and is the only writer of the car's
//!   velocities; the pipeline then integrates. The chase camera may read the
//!   body at any point in the frame — a slightly stale read is visually
//!   imperceptible — but tests pin the controller-before-integration order.

use nalgebra::{Isometry3, Vector3};
use rapier3d::prelude::{
    BroadPhaseBvh, CCDSolver, ColliderBuilder, ColliderSet, ImpulseJointSet,
    IntegrationParameters, IslandManager, MultibodyJointSet, NarrowPhase, PhysicsPipeline,
    RigidBody, RigidBodyBuilder, RigidBodyHandle, RigidBodySet,
};

use crate::input::InputIntent;
use crate::settings::{CAR_SPAWN_HEIGHT, CHASSIS_HALF_EXTENTS, GRAVITY_MPS2};
use crate::statics::{WorldStaticDef, collider_from_def};
use crate::vehicle::{SteerState, VehicleConfig, VehicleFrame, step_vehicle};

pub struct DriveWorld {
    gravity: Vector3<f32>,
    params: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    pub bodies: RigidBodySet,
    pub colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd: CCDSolver,
    /// The one dynamic body in the scene.
    pub car: RigidBodyHandle,
}

impl DriveWorld {
    /// Build the world from static defs and spawn the car at the origin.
    ///
    /// Defs are sorted by `id` before insertion to keep construction
    /// deterministic regardless of how the caller assembled the list.
    pub fn new(mut defs: Vec<WorldStaticDef>, cfg: &VehicleConfig) -> Self {
        defs.sort_by_key(|d| d.id);

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        for def in &defs {
            let pose = Isometry3::translation(
                def.translation.x,
                def.translation.y,
                def.translation.z,
            );
            let body = RigidBodyBuilder::fixed().pose(pose).build();
            let handle = bodies.insert(body);
            colliders.insert_with_parent(collider_from_def(def), handle, &mut bodies);
        }

        let car = spawn_car(&mut bodies, &mut colliders, cfg);
        log::debug!(
            "drive world built: {} statics, car mass {:.2} kg",
            defs.len(),
            bodies.get(car).map(RigidBody::mass).unwrap_or(0.0)
        );

        Self {
            gravity: Vector3::new(0.0, -GRAVITY_MPS2, 0.0),
            params: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            bodies,
            colliders,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd: CCDSolver::new(),
            car,
        }
    }

    /// Integrate the simulation by one timestep.
    pub fn step(&mut self, dt_seconds: f32) {
        self.params.dt = dt_seconds;

        let hooks = ();
        let events = ();
        self.pipeline.step(
            &self.gravity,
            &self.params,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd,
            &hooks,
            &events,
        );
    }

    /// One full frame: vehicle controller first, then integration.
    pub fn advance(
        &mut self,
        intent: InputIntent,
        steer: &mut SteerState,
        cfg: &VehicleConfig,
        dt_seconds: f32,
    ) -> Option<VehicleFrame> {
        let frame = step_vehicle(&mut self.bodies, self.car, intent, steer, cfg, dt_seconds);
        self.step(dt_seconds);
        if let Some(frame) = &frame {
            log::trace!(
                "frame: speed {:.2} m/s, steer {:.3} rad, grounded {}",
                frame.horizontal_speed,
                frame.steer_angle,
                frame.grounded
            );
        }
        frame
    }

    pub fn car_body(&self) -> Option<&RigidBody> {
        self.bodies.get(self.car)
    }

    pub fn car_body_mut(&mut self) -> Option<&mut RigidBody> {
        self.bodies.get_mut(self.car)
    }
}

/// Spawn the car chassis: a dynamic cuboid slightly above its resting height
/// so it settles onto the ground over the first frames.
fn spawn_car(
    bodies: &mut RigidBodySet,
    colliders: &mut ColliderSet,
    cfg: &VehicleConfig,
) -> RigidBodyHandle {
    let body = RigidBodyBuilder::dynamic()
        .pose(Isometry3::translation(0.0, CAR_SPAWN_HEIGHT, 0.0))
        .linear_damping(cfg.linear_damping)
        .angular_damping(cfg.angular_damping)
        .build();
    let handle = bodies.insert(body);

    let [hx, hy, hz] = CHASSIS_HALF_EXTENTS;
    let chassis = ColliderBuilder::cuboid(hx, hy, hz)
        .friction(0.4)
        .restitution(0.0)
        .build();
    colliders.insert_with_parent(chassis, handle, bodies);

    handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::city_layout;

    #[test]
    fn car_settles_onto_the_ground() {
        let cfg = VehicleConfig::default();
        let mut world = DriveWorld::new(city_layout(), &cfg);
        let mut steer = SteerState::new();

        for _ in 0..120 {
            world.advance(InputIntent::NEUTRAL, &mut steer, &cfg, 1.0 / 60.0);
        }

        let body = world.car_body().unwrap();
        let y = body.translation().y;
        // Resting on the slab: roughly chassis half-height above y = 0.
        assert!(y > 0.0 && y < 1.0, "car at unexpected height {y}");
        assert!(body.linvel().norm() < 0.1);
    }

    #[test]
    fn statics_insert_in_id_order_regardless_of_input_order() {
        let cfg = VehicleConfig::default();
        let mut defs = city_layout();
        defs.reverse();

        let shuffled = DriveWorld::new(defs, &cfg);
        let ordered = DriveWorld::new(city_layout(), &cfg);
        assert_eq!(shuffled.bodies.len(), ordered.bodies.len());

        // Same construction order means pairwise-identical body poses.
        for ((_, a), (_, b)) in shuffled.bodies.iter().zip(ordered.bodies.iter()) {
            assert_eq!(a.translation(), b.translation());
        }
    }
}
