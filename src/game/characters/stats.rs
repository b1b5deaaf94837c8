// Character tuning values

use glam::Vec3;
use std::f32::consts::FRAC_PI_2;

/// Movement, animation and attachment tuning for a character
#[derive(Debug, Clone)]
pub struct CharacterStats {
    // Movement
    /// Walking speed (units/second)
    pub walk_speed: f32,
    /// Running speed is `walk_speed * run_multiplier`
    pub run_multiplier: f32,
    /// Fraction of the remaining yaw error closed per second
    pub rotation_speed: f32,

    // Animation
    /// Cross-fade duration for every transition (seconds)
    pub fade_duration: f32,

    // Placement
    /// Height the kinematic integrator pins the character to
    pub ground_height: f32,

    // Equipment
    /// Uniform scale applied when parenting equipment to the hand node
    pub equipment_scale: f32,
    /// Yaw offset applied when parenting equipment to the hand node
    pub equipment_yaw_offset: f32,
    /// Offset from the root when no hand node exists
    pub equipment_fallback_offset: Vec3,

    // Dimensions (for the physics capsule)
    pub width: f32,
    pub height: f32,
}

pub const BASE_STATS: CharacterStats = CharacterStats {
    walk_speed: 3.0,
    run_multiplier: 2.0,
    rotation_speed: 10.0,

    fade_duration: 0.2,

    ground_height: 0.0,

    // Skinned rigs are commonly exported at 1/100 scale
    equipment_scale: 100.0,
    equipment_yaw_offset: FRAC_PI_2,
    equipment_fallback_offset: Vec3::new(0.4, 1.0, 0.0),

    width: 0.6,
    height: 1.8,
};

impl Default for CharacterStats {
    fn default() -> Self {
        BASE_STATS
    }
}

impl CharacterStats {
    pub fn run_speed(&self) -> f32 {
        self.walk_speed * self.run_multiplier
    }
}
