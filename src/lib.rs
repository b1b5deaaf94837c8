// Camera-relative 3D character controller
//
// - `core`: math helpers
// - `engine`: input, asset handles and readiness, physics, frame clock
// - `game`: the character itself (steering, animation, rig)

pub mod core;
pub mod engine;
pub mod game;

pub use engine::assets::{LoadedCharacter, PendingAssets};
pub use engine::input::{InputManager, KeyState};
pub use game::characters::{CameraBasis, Character, CharacterState, CharacterStats};
