// Input handling system
//
// The controller never reads window events directly. The driver feeds
// events into an `InputManager`, which keeps a `KeyState` snapshot; each
// tick the controller turns that snapshot into an `Intent`.
//
// - `action`: the fixed key set and default bindings
// - `config`: binding table and remapping
// - `key_state`: held / just-pressed snapshot
// - `manager`: winit event plumbing
// - `sampler`: snapshot -> intent

pub mod action;
pub mod config;
pub mod key_state;
pub mod manager;
pub mod sampler;

pub use action::{InputSource, Key};
pub use config::KeyBindings;
pub use key_state::KeyState;
pub use manager::InputManager;
pub use sampler::{InputSampler, Intent};
