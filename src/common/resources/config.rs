use qrz::{Orientation, Shape};
use serde::{Deserialize, Serialize};

/// Everything needed to lay out a grid
///
/// Changing any field means the grid gets rebuilt from scratch.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct GridConfig {
    pub shape: Shape,
    pub orientation: Orientation,
    /// Center-to-vertex distance in pixels
    pub radius: f32,
    pub width: u32,
    pub height: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            shape: Shape::Rectangle,
            orientation: Orientation::PointyTop,
            radius: 20.,
            width: 10,
            height: 10,
        }
    }
}

/// How clicks on unselected cells treat the previous anchor
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub enum SelectionMode {
    /// The previous anchor is released entirely
    #[default]
    Single,
    /// The previous anchor stays selected and only loses current status
    Multi,
}

/// Overlays a user can switch on and off
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Toggle {
    Neighbors,
    MoveRange,
    Path,
    Visibility,
    Coordinates,
}

/// Session-wide overlay switches
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct OverlayToggles {
    pub neighbors: bool,
    pub move_range: bool,
    pub path: bool,
    pub visibility: bool,
    pub coordinates: bool,
    /// Steps covered by the move-range highlight
    pub range: u32,
    pub selection: SelectionMode,
}

impl Default for OverlayToggles {
    fn default() -> Self {
        Self {
            neighbors: false,
            move_range: false,
            path: false,
            visibility: false,
            coordinates: false,
            range: 2,
            selection: SelectionMode::Single,
        }
    }
}

impl OverlayToggles {
    pub fn get(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::Neighbors => self.neighbors,
            Toggle::MoveRange => self.move_range,
            Toggle::Path => self.path,
            Toggle::Visibility => self.visibility,
            Toggle::Coordinates => self.coordinates,
        }
    }

    pub fn set(&mut self, toggle: Toggle, on: bool) {
        let slot = match toggle {
            Toggle::Neighbors => &mut self.neighbors,
            Toggle::MoveRange => &mut self.move_range,
            Toggle::Path => &mut self.path,
            Toggle::Visibility => &mut self.visibility,
            Toggle::Coordinates => &mut self.coordinates,
        };
        *slot = on;
    }
}
