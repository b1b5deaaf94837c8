use rapier3d::prelude::*;

/// Builder for dynamic rigid bodies with common configurations
pub struct BodyBuilder {
    translation: Vector<Real>,
    can_sleep: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self {
            translation: Vector::zeros(),
            can_sleep: true,
            locked_axes: LockedAxes::empty(),
        }
    }

    pub fn position(mut self, x: Real, y: Real, z: Real) -> Self {
        self.translation = vector![x, y, z];
        self
    }

    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Lock all rotations; characters turn by yaw, not by torque
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    pub fn build(self) -> RigidBody {
        let mut body = RigidBodyBuilder::dynamic()
            .translation(self.translation)
            .can_sleep(self.can_sleep)
            .locked_axes(self.locked_axes)
            .build();

        body.set_linear_damping(0.0);
        body.set_angular_damping(1.0);
        body
    }
}

/// Common rigid body configurations
pub mod presets {
    use super::*;

    /// Character body: dynamic, rotation locked, never sleeps
    pub fn character_body(x: Real, y: Real, z: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y, z)
            .lock_rotation()
            .can_sleep(false)
            .build()
    }

    /// Upright capsule for a character of the given width and height
    pub fn character_collider(width: Real, height: Real) -> Collider {
        let radius = width / 2.0;
        let half_height = ((height / 2.0) - radius).max(0.0);

        ColliderBuilder::capsule_y(half_height, radius)
            .friction(0.0)
            .restitution(0.0)
            .density(1.0)
            .build()
    }

    /// Flat ground slab whose top face sits at `top_y`
    pub fn ground_collider(half_extent: Real, top_y: Real) -> Collider {
        ColliderBuilder::cuboid(half_extent, 0.5, half_extent)
            .translation(vector![0.0, top_y - 0.5, 0.0])
            .friction(0.3)
            .restitution(0.0)
            .build()
    }
}
