//! Per-cell overlay state
//!
//! One `CellState` exists for every cell an overlay has touched. Selection flags
//! are driven by clicks; the neighbor, movable and line-of-sight flags are
//! derived and get rebuilt from scratch whenever their inputs change.

use serde::{Deserialize, Serialize};

/// Line-of-sight result relative to the anchor cell
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum LineOfSight {
    #[default]
    Unset,
    Visible,
    NotVisible,
}

/// Boolean flags that can be bulk-cleared across the overlay store
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OverlayFlag {
    Selected,
    Current,
    Neighbor,
    Movable,
}

/// Overlay flags and rendering handles for one cell
///
/// `H` is whatever handle type the rendering surface hands out; the core never
/// looks inside it.
#[derive(Clone, Debug, PartialEq)]
pub struct CellState<H> {
    pub is_selected: bool,
    pub is_current: bool,
    /// Mirrors `is_selected`; selected cells block line of sight
    pub is_opaque: bool,
    pub show_as_neighbor: bool,
    pub show_as_movable: bool,
    pub visibility: LineOfSight,
    pub path_marker: Option<H>,
    /// One label per cube axis, in q, r, z order
    pub labels: Option<[H; 3]>,
}

impl<H> Default for CellState<H> {
    fn default() -> Self {
        Self {
            is_selected: false,
            is_current: false,
            is_opaque: false,
            show_as_neighbor: false,
            show_as_movable: false,
            visibility: LineOfSight::Unset,
            path_marker: None,
            labels: None,
        }
    }
}

impl<H> CellState<H> {
    pub fn set_selected(&mut self, selected: bool) {
        self.is_selected = selected;
        self.is_opaque = selected;
    }

    /// Make this cell the selected, current anchor
    pub fn promote(&mut self) {
        self.set_selected(true);
        self.is_current = true;
    }

    /// Drop current status but stay selected
    pub fn demote(&mut self) {
        self.is_current = false;
    }

    /// Clear every selection flag
    pub fn release(&mut self) {
        self.set_selected(false);
        self.is_current = false;
    }

    pub fn clear(&mut self, flag: OverlayFlag) {
        match flag {
            OverlayFlag::Selected => self.set_selected(false),
            OverlayFlag::Current => self.is_current = false,
            OverlayFlag::Neighbor => self.show_as_neighbor = false,
            OverlayFlag::Movable => self.show_as_movable = false,
        }
    }

    /// True when nothing about this cell differs from a fresh state
    pub fn is_blank(&self) -> bool {
        !self.is_selected
            && !self.is_current
            && !self.show_as_neighbor
            && !self.show_as_movable
            && self.visibility == LineOfSight::Unset
            && self.path_marker.is_none()
            && self.labels.is_none()
    }
}
