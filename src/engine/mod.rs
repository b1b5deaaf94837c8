// Engine modules: input, assets, physics, frame timing

pub mod assets;
pub mod game_loop;
pub mod input;
pub mod physics;
