mod error;
mod grid;
mod layout;
mod qrz;
mod shape;

pub use error::{LayoutError, UnknownCell};
pub use grid::{Grid, MAX_CELLS};
pub use layout::{Convert, Layout};
pub use qrz::{Qrz, DIRECTIONS};
pub use shape::{Orientation, Shape};
