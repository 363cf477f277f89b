//! Grid engine contract
//!
//! The overlay core never does hex math itself. It builds grids through a
//! `GridEngine` and asks the resulting `HexGrid` about topology and geometry.
//! `QrzEngine` is the production engine backed by the `qrz` crate.

use std::{fmt::Debug, hash::Hash};

use glam::Vec2;
use qrz::Qrz;

use crate::common::{
    error::{LayoutError, OverlayFault},
    resources::config::GridConfig,
};

/// One laid-out grid instance
pub trait HexGrid {
    /// Stable key for a cell, valid for the lifetime of this grid only
    type Cell: Copy + Debug + Eq + Hash;

    /// All cells in a stable order
    fn cells(&self) -> &[Self::Cell];
    fn hit_test(&self, point: Vec2) -> Option<Self::Cell>;
    fn neighbors_of(&self, cell: Self::Cell) -> Vec<Self::Cell>;
    /// Cells within `range` steps of `cell`, `cell` included
    fn cells_within_range(&self, cell: Self::Cell, range: u32) -> Vec<Self::Cell>;
    /// Route from `a` to `b` inclusive; empty when unreachable
    fn shortest_path(&self, a: Self::Cell, b: Self::Cell) -> Result<Vec<Self::Cell>, OverlayFault>;
    fn distance(&self, a: Self::Cell, b: Self::Cell) -> u32;
    fn is_visible(&self, from: Self::Cell, to: Self::Cell, opaque: &dyn Fn(Self::Cell) -> bool) -> Result<bool, OverlayFault>;

    fn center(&self, cell: Self::Cell) -> Vec2;
    fn polygon(&self, cell: Self::Cell) -> Vec<Vec2>;
    /// Cube coordinates shown by the coordinate overlay
    fn coordinates(&self, cell: Self::Cell) -> [i32; 3];
    fn radius(&self) -> f32;
    fn inner_radius(&self) -> f32;
}

/// Builds grids from a configuration
pub trait GridEngine {
    type Grid: HexGrid;

    fn build(&self, config: &GridConfig) -> Result<Self::Grid, LayoutError>;
}

/// Cell key type of an engine's grids
pub type CellOf<E> = <<E as GridEngine>::Grid as HexGrid>::Cell;

#[derive(Clone, Copy, Debug, Default)]
pub struct QrzEngine;

impl GridEngine for QrzEngine {
    type Grid = qrz::Grid;

    fn build(&self, config: &GridConfig) -> Result<qrz::Grid, LayoutError> {
        qrz::Grid::new(config.shape, config.orientation, config.radius, config.width, config.height)
    }
}

impl HexGrid for qrz::Grid {
    type Cell = Qrz;

    fn cells(&self) -> &[Qrz] { qrz::Grid::cells(self) }
    fn hit_test(&self, point: Vec2) -> Option<Qrz> { qrz::Grid::hit_test(self, point) }
    fn neighbors_of(&self, cell: Qrz) -> Vec<Qrz> { self.neighbors(cell).to_vec() }
    fn cells_within_range(&self, cell: Qrz, range: u32) -> Vec<Qrz> { self.within(cell, range) }

    fn shortest_path(&self, a: Qrz, b: Qrz) -> Result<Vec<Qrz>, OverlayFault> {
        Ok(qrz::Grid::shortest_path(self, a, b)?)
    }

    fn distance(&self, a: Qrz, b: Qrz) -> u32 { qrz::Grid::distance(self, a, b) }

    fn is_visible(&self, from: Qrz, to: Qrz, opaque: &dyn Fn(Qrz) -> bool) -> Result<bool, OverlayFault> {
        Ok(qrz::Grid::is_visible(self, from, to, opaque)?)
    }

    fn center(&self, cell: Qrz) -> Vec2 { qrz::Grid::center(self, cell) }
    fn polygon(&self, cell: Qrz) -> Vec<Vec2> { self.vertices(cell).to_vec() }
    fn coordinates(&self, cell: Qrz) -> [i32; 3] { cell.cube() }
    fn radius(&self) -> f32 { qrz::Grid::radius(self) }
    fn inner_radius(&self) -> f32 { qrz::Grid::inner_radius(self) }
}
