// Character system
//
// This module contains everything related to the controlled character:
// - Tuning values
// - Camera-relative steering
// - Animation state machine and clip blending
// - Rig: transform, skeleton, equipment, position integration
// - The per-tick controller tying them together

pub mod animation;
pub mod character;
pub mod rig;
pub mod state;
pub mod stats;
pub mod steering;

use thiserror::Error;

use crate::engine::assets::ClipName;

// Re-export commonly used types
pub use animation::{AnimationMixer, ClipAction};
pub use character::{CameraBasis, Character, TickReport};
pub use rig::{
    AttachPoint, CharacterRig, EquipmentMount, KinematicIntegrator, PhysicsIntegrator,
    PositionIntegrator, RigUniform,
};
pub use state::{
    AnimationStateMachine, CharacterState, Completion, CompletionWatcher, TriggerOutcome,
};
pub use stats::{CharacterStats, BASE_STATS};
pub use steering::{Steering, SteeringSolver};

/// Animation and attachment failures. None of these abort a tick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnimationError {
    #[error("No clip loaded for {0}")]
    MissingClip(ClipName),

    #[error("No right-hand node in the skeleton")]
    MissingAttachmentNode,

    #[error("{0:?} is terminal; no further transitions")]
    Terminal(CharacterState),

    #[error("{0:?} is not a one-shot action")]
    NotAnAction(CharacterState),
}
