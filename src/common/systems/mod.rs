pub mod controller;
pub mod highlight;
pub mod transition;
