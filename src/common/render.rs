//! Rendering surface boundary
//!
//! The core issues draw, remove and invalidate calls through `RenderBridge` and
//! keeps the returned handles as opaque values inside cell state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::common::components::cell::{CellState, LineOfSight};

/// Straight RGBA color, 0-255 per channel
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct Rgba(pub u8, pub u8, pub u8, pub u8);

impl Rgba {
    pub const BASE: Rgba = Rgba(0xe8, 0xe4, 0xd8, 0xff);
    pub const SELECTED: Rgba = Rgba(0x3c, 0x6e, 0xb4, 0xff);
    pub const NEIGHBOR: Rgba = Rgba(0x9c, 0xc8, 0x8c, 0xff);
    pub const MOVABLE: Rgba = Rgba(0xf0, 0xd2, 0x78, 0xff);
    pub const VISIBLE: Rgba = Rgba(0xb4, 0xdc, 0xf0, 0xff);
    pub const NOT_VISIBLE: Rgba = Rgba(0x78, 0x64, 0x64, 0xff);
    pub const OUTLINE: Rgba = Rgba(0x50, 0x50, 0x50, 0xff);
    pub const CURRENT: Rgba = Rgba(0xdc, 0x32, 0x32, 0xff);
    pub const MARKER: Rgba = Rgba(0x28, 0x28, 0x28, 0xc8);
    pub const LABEL: Rgba = Rgba(0x20, 0x20, 0x20, 0xff);

    pub fn to_f32(self) -> [f32; 4] {
        [self.0, self.1, self.2, self.3].map(|c| c as f32 / 255.)
    }
}

/// Fill and outline of a cell's base polygon
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Style {
    pub fill: Rgba,
    pub stroke: Rgba,
    pub stroke_width: f32,
}

impl Style {
    /// Selection wins over sight lines, which win over range highlights
    pub fn of<H>(state: Option<&CellState<H>>) -> Self {
        let Some(state) = state else { return Self::BASE };
        let fill = if state.is_selected {
            Rgba::SELECTED
        } else if state.visibility == LineOfSight::NotVisible {
            Rgba::NOT_VISIBLE
        } else if state.visibility == LineOfSight::Visible {
            Rgba::VISIBLE
        } else if state.show_as_neighbor {
            Rgba::NEIGHBOR
        } else if state.show_as_movable {
            Rgba::MOVABLE
        } else {
            Rgba::BASE
        };
        let (stroke, stroke_width) = if state.is_current { (Rgba::CURRENT, 3.) } else { (Rgba::OUTLINE, 1.) };
        Self { fill, stroke, stroke_width }
    }

    pub const BASE: Style = Style { fill: Rgba::BASE, stroke: Rgba::OUTLINE, stroke_width: 1. };
}

/// Axis-aligned pixel rectangle, top-left origin
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Region {
    /// Square of side `2 * half` centered on `center`
    pub fn around(center: Vec2, half: f32) -> Self {
        Self { x: center.x - half, y: center.y - half, w: 2. * half, h: 2. * half }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.x + self.w && point.y >= self.y && point.y <= self.y + self.h
    }
}

/// Drawing surface the overlay core renders into
pub trait RenderBridge {
    type Handle: Copy + std::fmt::Debug + Eq;

    fn add_polygon(&mut self, points: &[Vec2]) -> Self::Handle;
    /// Marker centered on `center`, `size` wide and tall
    fn add_marker(&mut self, center: Vec2, size: Vec2) -> Self::Handle;
    fn add_label(&mut self, text: &str) -> Self::Handle;
    fn place_label(&mut self, handle: Self::Handle, center: Vec2, font_size: f32);
    fn remove_handle(&mut self, handle: Self::Handle);
    fn set_fill(&mut self, handle: Self::Handle, color: Rgba);
    fn set_stroke(&mut self, handle: Self::Handle, color: Rgba, width: f32);
    fn invalidate_region(&mut self, region: Region);
    fn invalidate_all(&mut self);
}
