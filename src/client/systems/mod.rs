pub mod camera;
pub mod input;
pub mod outline;
pub mod ui;
