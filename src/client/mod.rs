pub mod bridge;
pub mod resources;
pub mod systems;
