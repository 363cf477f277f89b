pub mod config;
pub mod overlay;
pub mod session;
