//! # Grid: Bounded Hex Lattice
//!
//! A `Grid` is one laid-out set of hexagons: a shape, an orientation and a
//! cell radius. It owns cell membership and answers the topology questions an
//! interactive view needs (hit-testing, neighbors, ranges, paths, sight lines).
//! Every query only ever returns cells that belong to the grid.

use std::collections::HashSet;

use derive_more::IntoIterator;
use glam::Vec2;
use pathfinding::prelude::astar;
use tinyvec::ArrayVec;

use crate::{
    error::{LayoutError, UnknownCell},
    layout::{Convert, Layout},
    qrz::Qrz,
    shape::{Orientation, Shape},
};

/// Upper bound on `width * height` accepted by any shape
pub const MAX_CELLS: u64 = 65_536;

/// Upper bound on either dimension
pub const MAX_EXTENT: u32 = 1_024;

#[derive(Clone, Debug, IntoIterator, PartialEq)]
pub struct Grid {
    shape: Shape,
    layout: Layout,
    bounds: Vec2,
    #[into_iterator(ref)]
    cells: Vec<Qrz>,
    index: HashSet<Qrz>,
}

impl Grid {
    /// Lay out a grid whose bounding box starts at pixel (0, 0)
    pub fn new(shape: Shape, orientation: Orientation, radius: f32, width: u32, height: u32) -> Result<Self, LayoutError> {
        if !radius.is_finite() || radius <= 0. {
            return Err(LayoutError::InvalidRadius(radius));
        }
        shape.validate(width, height)?;

        let cells = shape.cells(orientation, width, height);
        let mut layout = Layout::new(orientation, radius);
        let (min, max) = cells.iter()
            .flat_map(|&qrz| layout.vertices(qrz))
            .fold((Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)), |(min, max), v| (min.min(v), max.max(v)));
        layout.origin = -min;

        Ok(Self {
            shape,
            layout,
            bounds: max - min,
            index: cells.iter().copied().collect(),
            cells,
        })
    }

    pub fn shape(&self) -> Shape { self.shape }
    pub fn orientation(&self) -> Orientation { self.layout.orientation }
    pub fn radius(&self) -> f32 { self.layout.radius }
    pub fn inner_radius(&self) -> f32 { self.layout.inner_radius() }

    /// Pixel size of the grid's bounding box
    pub fn bounds(&self) -> Vec2 { self.bounds }

    /// Cells in layout order; stable for the lifetime of the grid
    pub fn cells(&self) -> &[Qrz] { &self.cells }

    pub fn len(&self) -> usize { self.cells.len() }
    pub fn is_empty(&self) -> bool { self.cells.is_empty() }
    pub fn contains(&self, qrz: Qrz) -> bool { self.index.contains(&qrz) }

    pub fn center(&self, qrz: Qrz) -> Vec2 { self.layout.convert(qrz) }
    pub fn vertices(&self, qrz: Qrz) -> [Vec2; 6] { self.layout.vertices(qrz) }

    /// Cell under a pixel position, if any
    pub fn hit_test(&self, point: Vec2) -> Option<Qrz> {
        if !point.is_finite() { return None; }
        let qrz: Qrz = self.layout.convert(point);
        self.contains(qrz).then_some(qrz)
    }

    pub fn neighbors(&self, qrz: Qrz) -> ArrayVec<[Qrz; 6]> {
        qrz.neighbors().into_iter().filter(|&n| self.contains(n)).collect()
    }

    /// Cells at most `range` steps away, including `qrz` itself
    ///
    /// Ranges whose hexagon would outnumber the grid scan the grid instead.
    pub fn within(&self, qrz: Qrz, range: u32) -> Vec<Qrz> {
        let range64 = range as u64;
        let area = 3_u64.saturating_mul(range64).saturating_mul(range64 + 1).saturating_add(1);
        if area >= self.cells.len() as u64 {
            return self.cells.iter().copied().filter(|c| qrz.distance(c) as u32 <= range).collect();
        }
        qrz.within(range as i16).into_iter().filter(|&c| self.contains(c)).collect()
    }

    pub fn distance(&self, a: Qrz, b: Qrz) -> u32 {
        a.distance(&b) as u32
    }

    /// Fewest-steps route through grid cells, both endpoints included
    ///
    /// Empty when `b` cannot be reached from `a` inside the grid.
    pub fn shortest_path(&self, a: Qrz, b: Qrz) -> Result<Vec<Qrz>, UnknownCell> {
        self.check(a)?;
        self.check(b)?;
        let (path, _) = astar(
                &a,
                |&c| self.neighbors(c).into_iter().map(|n| (n, 1_u32)),
                |&c| c.distance(&b) as u32,
                |&c| c == b,
            ).unwrap_or_default();
        Ok(path)
    }

    /// Whether the straight line from `from` to `to` passes no opaque cell
    ///
    /// Endpoints never block, and line cells outside the grid are transparent.
    pub fn is_visible(&self, from: Qrz, to: Qrz, opaque: impl Fn(Qrz) -> bool) -> Result<bool, UnknownCell> {
        self.check(from)?;
        self.check(to)?;
        Ok(from.line(&to).into_iter()
            .filter(|&c| c != from && c != to && self.contains(c))
            .all(|c| !opaque(c)))
    }

    fn check(&self, qrz: Qrz) -> Result<(), UnknownCell> {
        if self.contains(qrz) { Ok(()) } else { Err(UnknownCell(qrz)) }
    }
}
