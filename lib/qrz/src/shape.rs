use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{
    error::LayoutError,
    grid::{MAX_CELLS, MAX_EXTENT},
    qrz::Qrz,
};

/// Which way the hexagon vertices point
#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum Orientation {
    #[default]
    #[display("Pointy Top")]
    PointyTop,
    #[display("Flat Top")]
    FlatTop,
}

impl Orientation {
    pub const ALL: [Orientation; 2] = [Orientation::PointyTop, Orientation::FlatTop];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn flipped(self) -> Self {
        match self {
            Orientation::PointyTop => Orientation::FlatTop,
            Orientation::FlatTop => Orientation::PointyTop,
        }
    }
}

/// Overall outline of a grid
#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum Shape {
    #[default]
    #[display("Rectangle")]
    Rectangle,
    #[display("Triangle")]
    Triangle,
    #[display("Hexagon")]
    Hexagon,
    #[display("Trapezoid")]
    Trapezoid,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Rectangle, Shape::Triangle, Shape::Hexagon, Shape::Trapezoid];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Reject width/height combinations this shape cannot be laid out with
    pub fn validate(self, width: u32, height: u32) -> Result<(), LayoutError> {
        if width == 0 || height == 0 {
            return Err(LayoutError::EmptyGrid { width, height });
        }
        if width > MAX_EXTENT || height > MAX_EXTENT || width as u64 * height as u64 > MAX_CELLS {
            return Err(LayoutError::TooLarge { width, height, max: MAX_CELLS });
        }
        match self {
            Shape::Triangle | Shape::Hexagon if width != height =>
                Err(LayoutError::NotSquare { shape: self, width, height }),
            Shape::Hexagon if width % 2 == 0 => Err(LayoutError::EvenHexagon(width)),
            Shape::Trapezoid if height > width => Err(LayoutError::TrapezoidTooTall { width, height }),
            _ => Ok(()),
        }
    }

    /// Enumerate the cells of this shape in a stable row-major order
    pub(crate) fn cells(self, orientation: Orientation, width: u32, height: u32) -> Vec<Qrz> {
        let (w, h) = (width as i16, height as i16);
        let mut cells = Vec::new();
        match self {
            Shape::Rectangle => match orientation {
                Orientation::PointyTop => for row in 0..h {
                    for col in 0..w { cells.push(Qrz::new(col - (row >> 1), row)); }
                },
                Orientation::FlatTop => for row in 0..h {
                    for col in 0..w { cells.push(Qrz::new(col, row - (col >> 1))); }
                },
            },
            Shape::Triangle | Shape::Trapezoid => for r in 0..h {
                for q in 0..(w - r) { cells.push(Qrz::new(q, r)); }
            },
            Shape::Hexagon => {
                let k = w / 2;
                for r in -k..=k {
                    for q in (-k).max(-r - k)..=k.min(-r + k) { cells.push(Qrz::new(q, r)); }
                }
            },
        }
        cells
    }
}
