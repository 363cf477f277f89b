pub mod components;
pub mod engine;
pub mod error;
pub mod render;
pub mod resources;
pub mod systems;
