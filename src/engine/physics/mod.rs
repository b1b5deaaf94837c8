// Physics system using rapier3d
//
// Only the physics-integrated controller variant touches this module.

pub mod body;
mod world;

pub use body::{presets, BodyBuilder};
pub use world::{ColliderHandle, PhysicsWorld, RigidBodyHandle};

pub use rapier3d::prelude::{vector, Real, Vector};
