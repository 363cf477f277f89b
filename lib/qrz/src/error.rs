use thiserror::Error;

use crate::{qrz::Qrz, shape::Shape};

/// Reasons a grid cannot be laid out
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LayoutError {
    #[error("grid needs at least one row and one column (got {width}x{height})")]
    EmptyGrid { width: u32, height: u32 },

    #[error("cell radius must be a positive number (got {0})")]
    InvalidRadius(f32),

    #[error("{shape} grids need equal width and height (got {width}x{height})")]
    NotSquare { shape: Shape, width: u32, height: u32 },

    #[error("hexagon grids need an odd size (got {0})")]
    EvenHexagon(u32),

    #[error("trapezoid grids cannot be taller than wide (got {width}x{height})")]
    TrapezoidTooTall { width: u32, height: u32 },

    #[error("{width}x{height} grid exceeds the {max} cell limit")]
    TooLarge { width: u32, height: u32, max: u64 },
}

/// A coordinate that does not belong to the grid it was looked up in
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("cell {0:?} is not part of this grid")]
pub struct UnknownCell(pub Qrz);
