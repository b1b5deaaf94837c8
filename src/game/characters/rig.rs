// Character transform, skeleton ownership and equipment attachment

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};
use log::{debug, warn};

use super::stats::CharacterStats;
use super::AnimationError;
use crate::core::math::wrap_angle;
use crate::engine::assets::{Equipment, NodeId, NodeTransform, Skeleton};
use crate::engine::physics::{presets, vector, PhysicsWorld, RigidBodyHandle};

/// Moves the character's position by one tick's displacement
pub trait PositionIntegrator {
    /// Apply `move_delta` (already scaled by speed and `dt`) and return the new position
    fn integrate(&mut self, position: Vec3, move_delta: Vec3, dt: f32) -> Vec3;
}

/// Moves the transform directly and pins it to the ground plane
#[derive(Debug, Clone)]
pub struct KinematicIntegrator {
    ground_height: f32,
}

impl KinematicIntegrator {
    pub fn new(ground_height: f32) -> Self {
        Self { ground_height }
    }
}

impl PositionIntegrator for KinematicIntegrator {
    fn integrate(&mut self, position: Vec3, move_delta: Vec3, _dt: f32) -> Vec3 {
        let mut next = position + move_delta;
        next.y = self.ground_height;
        next
    }
}

/// Drives a rapier body: writes a horizontal velocity, steps, reads the position back.
///
/// Vertical motion (gravity, ground contact) is left entirely to the simulation.
pub struct PhysicsIntegrator {
    world: PhysicsWorld,
    body: RigidBodyHandle,
}

impl PhysicsIntegrator {
    /// Spawn a character capsule into `world` at `spawn`
    pub fn new(mut world: PhysicsWorld, spawn: Vec3, stats: &CharacterStats) -> Self {
        let body = world.add_rigid_body(presets::character_body(spawn.x, spawn.y, spawn.z));
        world.add_collider(presets::character_collider(stats.width, stats.height), body);
        Self { world, body }
    }

    pub fn world(&self) -> &PhysicsWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut PhysicsWorld {
        &mut self.world
    }

    pub fn body(&self) -> RigidBodyHandle {
        self.body
    }
}

impl PositionIntegrator for PhysicsIntegrator {
    fn integrate(&mut self, position: Vec3, move_delta: Vec3, dt: f32) -> Vec3 {
        if dt <= 0.0 {
            return position;
        }
        let Some(body) = self.world.get_rigid_body_mut(self.body) else {
            return position;
        };

        let horizontal = move_delta / dt;
        let vertical = body.linvel().y;
        body.set_linvel(vector![horizontal.x, vertical, horizontal.z], true);

        self.world.set_timestep(dt);
        self.world.step();

        self.world
            .get_rigid_body(self.body)
            .map(|body| {
                let t = body.translation();
                Vec3::new(t.x, t.y, t.z)
            })
            .unwrap_or(position)
    }
}

/// Where the equipment ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachPoint {
    /// Parented to the right-hand node
    Hand(NodeId),
    /// No hand node; parented to the root at the fallback offset
    Fallback,
}

#[derive(Debug, Clone)]
pub struct EquipmentMount {
    pub equipment: Equipment,
    /// Node created for the equipment inside the skeleton
    pub node: NodeId,
    pub attach_point: AttachPoint,
}

/// Model matrix in a GPU-uploadable layout
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct RigUniform {
    pub model: [[f32; 4]; 4],
}

/// First node whose name contains both "hand" and "right", ignoring case
pub fn find_right_hand(skeleton: &Skeleton) -> Option<NodeId> {
    skeleton.find(|name| {
        let lower = name.to_lowercase();
        lower.contains("hand") && lower.contains("right")
    })
}

/// Parent the equipment into the skeleton. Never fails; a missing hand node uses the fallback.
fn attach_equipment(
    skeleton: &mut Skeleton,
    equipment: Equipment,
    stats: &CharacterStats,
) -> EquipmentMount {
    let (parent, local, attach_point) = match find_right_hand(skeleton) {
        Some(hand) => (
            hand,
            NodeTransform {
                translation: Vec3::ZERO,
                rotation: Quat::from_rotation_y(stats.equipment_yaw_offset),
                scale: Vec3::splat(stats.equipment_scale),
            },
            AttachPoint::Hand(hand),
        ),
        None => {
            warn!(
                "{}; attaching {} to the root",
                AnimationError::MissingAttachmentNode,
                equipment.name
            );
            (
                skeleton.root(),
                NodeTransform::from_translation(stats.equipment_fallback_offset),
                AttachPoint::Fallback,
            )
        }
    };

    // `parent` comes from this skeleton, so the insert cannot miss
    let root = skeleton.root();
    let node = skeleton
        .add_node(parent, &equipment.name, local)
        .unwrap_or(root);

    debug!("Equipment {} attached at {:?}", equipment.name, attach_point);
    EquipmentMount {
        equipment,
        node,
        attach_point,
    }
}

/// Owns the character's transform, skeleton and equipment
pub struct CharacterRig {
    position: Vec3,
    yaw: f32,
    skeleton: Skeleton,
    equipment: Option<EquipmentMount>,
    integrator: Box<dyn PositionIntegrator>,
}

impl CharacterRig {
    pub fn new(
        mut skeleton: Skeleton,
        equipment: Option<Equipment>,
        spawn: Vec3,
        stats: &CharacterStats,
        integrator: Box<dyn PositionIntegrator>,
    ) -> Self {
        let equipment = equipment.map(|e| attach_equipment(&mut skeleton, e, stats));
        Self {
            position: spawn,
            yaw: 0.0,
            skeleton,
            equipment,
            integrator,
        }
    }

    /// Apply one tick of displacement and yaw change
    pub fn apply_tick(&mut self, move_vector: Vec3, yaw_delta: f32, dt: f32) {
        self.position = self.integrator.integrate(self.position, move_vector, dt);
        self.yaw = wrap_angle(self.yaw + yaw_delta);
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Yaw in (-PI, PI]; 0 faces +Z
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    /// Teleport without integrating (spawn, respawn)
    pub fn set_transform(&mut self, position: Vec3, yaw: f32) {
        self.position = position;
        self.yaw = wrap_angle(yaw);
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn equipment(&self) -> Option<&EquipmentMount> {
        self.equipment.as_ref()
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(Quat::from_rotation_y(self.yaw), self.position)
    }

    pub fn uniform(&self) -> RigUniform {
        RigUniform {
            model: self.model_matrix().to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::{AssetHandle, AssetId};
    use crate::engine::physics::Real;
    use approx::assert_abs_diff_eq;
    use std::f32::consts::FRAC_PI_2;

    fn sword() -> Equipment {
        Equipment {
            name: "Sword".to_string(),
            handle: AssetHandle::new(AssetId::from_name("sword.glb")),
        }
    }

    fn rig_with(skeleton: Skeleton) -> CharacterRig {
        let stats = CharacterStats::default();
        CharacterRig::new(
            skeleton,
            Some(sword()),
            Vec3::ZERO,
            &stats,
            Box::new(KinematicIntegrator::new(stats.ground_height)),
        )
    }

    #[test]
    fn test_equipment_attaches_to_right_hand() {
        let mut skeleton = Skeleton::new("Armature");
        let hips = skeleton
            .add_node(skeleton.root(), "Hips", NodeTransform::IDENTITY)
            .unwrap();
        skeleton
            .add_node(hips, "mixamorig:LeftHand", NodeTransform::IDENTITY)
            .unwrap();
        let right = skeleton
            .add_node(hips, "mixamorig:RIGHTHAND", NodeTransform::IDENTITY)
            .unwrap();

        let rig = rig_with(skeleton);
        let mount = rig.equipment().unwrap();
        assert_eq!(mount.attach_point, AttachPoint::Hand(right));

        let node = rig.skeleton().node(mount.node).unwrap();
        assert_eq!(node.parent, Some(right));
        assert_eq!(
            node.local.scale,
            Vec3::splat(CharacterStats::default().equipment_scale)
        );
        let (axis, angle) = node.local.rotation.to_axis_angle();
        assert_abs_diff_eq!(angle, FRAC_PI_2, epsilon = 1e-5);
        assert_abs_diff_eq!(axis.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_missing_hand_falls_back_to_root() {
        let mut skeleton = Skeleton::new("Root");
        let spine = skeleton
            .add_node(skeleton.root(), "Spine", NodeTransform::IDENTITY)
            .unwrap();
        skeleton
            .add_node(spine, "Hand_L", NodeTransform::IDENTITY)
            .unwrap();

        let rig = rig_with(skeleton);
        let mount = rig.equipment().unwrap();
        assert_eq!(mount.attach_point, AttachPoint::Fallback);
        assert!(rig
            .skeleton()
            .is_descendant_of(mount.node, rig.skeleton().root()));
        assert_eq!(
            rig.skeleton().node(mount.node).unwrap().local.translation,
            CharacterStats::default().equipment_fallback_offset
        );
    }

    #[test]
    fn test_rig_without_equipment() {
        let stats = CharacterStats::default();
        let rig = CharacterRig::new(
            Skeleton::new("Root"),
            None,
            Vec3::ZERO,
            &stats,
            Box::new(KinematicIntegrator::new(0.0)),
        );
        assert!(rig.equipment().is_none());
        assert_eq!(rig.skeleton().len(), 1);
    }

    #[test]
    fn test_kinematic_clamps_to_ground() {
        let mut integrator = KinematicIntegrator::new(0.5);
        let next = integrator.integrate(Vec3::new(1.0, 3.0, 0.0), Vec3::new(0.5, 1.0, 0.25), 0.016);
        assert_eq!(next, Vec3::new(1.5, 0.5, 0.25));
    }

    #[test]
    fn test_apply_tick_wraps_yaw() {
        let mut rig = rig_with(Skeleton::new("Root"));
        rig.set_transform(Vec3::ZERO, 3.1);
        rig.apply_tick(Vec3::X, 0.1, 0.016);
        assert!(rig.yaw() < 0.0);
        assert_abs_diff_eq!(rig.yaw(), 3.2 - std::f32::consts::TAU, epsilon = 1e-5);
        assert_eq!(rig.position(), Vec3::X);
    }

    #[test]
    fn test_model_matrix_faces_yaw() {
        let mut rig = rig_with(Skeleton::new("Root"));
        rig.set_transform(Vec3::new(2.0, 0.0, 0.0), FRAC_PI_2);
        let facing = rig.model_matrix().transform_vector3(Vec3::Z);
        assert_abs_diff_eq!(facing.x, 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(facing.z, 0.0, epsilon = 1e-6);

        let uniform = rig.uniform();
        assert_eq!(uniform.model[3][0], 2.0);
        assert_eq!(bytemuck::bytes_of(&uniform).len(), 64);
    }

    #[test]
    fn test_physics_integrator_moves_horizontally() {
        let stats = CharacterStats::default();
        let mut world = PhysicsWorld::new();
        world.add_static_collider(presets::ground_collider(50.0, 0.0));

        let spawn = Vec3::new(0.0, stats.height / 2.0, 0.0);
        let mut integrator = PhysicsIntegrator::new(world, spawn, &stats);

        let dt = 1.0 / 60.0;
        let mut position = spawn;
        for _ in 0..30 {
            position = integrator.integrate(position, Vec3::new(0.0, 0.0, 3.0 * dt), dt);
        }

        // ~3 units/s for half a second
        assert!(position.z > 1.0, "z = {}", position.z);
        assert!(position.x.abs() < 1e-3);
        let vel = integrator
            .world()
            .get_rigid_body(integrator.body())
            .unwrap()
            .linvel()
            .z;
        assert_abs_diff_eq!(vel, 3.0 as Real, epsilon = 0.2);
    }
}
