//! Derived overlay recomputation
//!
//! Every function here clears what it owns first and derives it again from the
//! current selection, so repeated calls never accumulate stale flags or handles.

use glam::Vec2;
use log::{trace, warn};

use crate::common::{
    components::cell::{LineOfSight, OverlayFlag},
    engine::HexGrid,
    render::RenderBridge,
    resources::{config::OverlayToggles, overlay::OverlayStore},
};

/// Marker side length as a fraction of the inner radius
const MARKER_SCALE: f32 = 0.5;
/// Label font size as a fraction of the inner radius
const LABEL_FONT: f32 = 0.35;
/// Vertical offset of the q, r and z labels as fractions of the inner radius
const LABEL_ROWS: [f32; 3] = [-0.45, 0., 0.45];
const LABEL_AXES: [char; 3] = ['q', 'r', 'z'];

/// Flag every neighbor of every selected cell
pub fn recompute_neighbors<G, H>(grid: &G, overlay: &mut OverlayStore<G::Cell, H>, enabled: bool)
where G: HexGrid {
    overlay.reset_all(&[OverlayFlag::Neighbor]);
    if !enabled { return; }
    for selected in overlay.selected() {
        for cell in grid.neighbors_of(selected) {
            overlay.get(cell).show_as_neighbor = true;
        }
    }
}

/// Flag every cell within `range` steps of a selected cell
pub fn recompute_move_range<G, H>(grid: &G, overlay: &mut OverlayStore<G::Cell, H>, enabled: bool, range: u32)
where G: HexGrid {
    overlay.reset_all(&[OverlayFlag::Movable]);
    if !enabled { return; }
    for selected in overlay.selected() {
        for cell in grid.cells_within_range(selected, range) {
            overlay.get(cell).show_as_movable = true;
        }
    }
}

/// Remove every path marker and forget every line-of-sight result
pub fn clear_path<C, H, B>(overlay: &mut OverlayStore<C, H>, bridge: &mut B)
where
    C: Copy + Eq + std::hash::Hash,
    B: RenderBridge<Handle = H>,
{
    for handle in overlay.take_markers() { bridge.remove_handle(handle); }
    overlay.reset_visibility();
}

/// Rebuild the path and visibility overlay between `anchor` and `hovered`
///
/// Engine faults stop the overlay where it stands; whatever was applied before
/// the fault stays. Returns true when new markers were placed.
pub fn recompute_path<G, H, B>(
    grid: &G,
    overlay: &mut OverlayStore<G::Cell, H>,
    toggles: &OverlayToggles,
    anchor: Option<G::Cell>,
    hovered: Option<G::Cell>,
    bridge: &mut B,
) -> bool
where
    G: HexGrid,
    B: RenderBridge<Handle = H>,
{
    clear_path(overlay, bridge);
    let (Some(anchor), Some(hovered)) = (anchor, hovered) else { return false };
    if !toggles.path && !toggles.visibility { return false; }

    let path = match grid.shortest_path(anchor, hovered) {
        Ok(path) => path,
        Err(fault) => {
            warn!("Path {anchor:?} -> {hovered:?} abandoned: {fault}");
            return false;
        }
    };

    let mut placed = false;
    if toggles.path {
        let size = Vec2::splat(MARKER_SCALE * grid.inner_radius());
        for &cell in &path {
            let state = overlay.get(cell);
            if state.path_marker.is_some() { continue; }
            state.path_marker = Some(bridge.add_marker(grid.center(cell), size));
            placed = true;
        }
        trace!("{} path markers {anchor:?} -> {hovered:?}", path.len());
    }

    if toggles.visibility {
        for &cell in &path {
            let seen = {
                let opaque = |c: G::Cell| overlay.peek(c).is_some_and(|state| state.is_opaque);
                grid.is_visible(anchor, cell, &opaque)
            };
            match seen {
                Ok(true) => overlay.get(cell).visibility = LineOfSight::Visible,
                Ok(false) => overlay.get(cell).visibility = LineOfSight::NotVisible,
                Err(fault) => {
                    warn!("Line of sight {anchor:?} -> {cell:?} abandoned: {fault}");
                    break;
                }
            }
        }
    }

    placed
}

/// Remove and re-add the three coordinate labels of every cell
pub fn refresh_labels<G, H, B>(grid: &G, overlay: &mut OverlayStore<G::Cell, H>, bridge: &mut B)
where
    G: HexGrid,
    H: Copy,
    B: RenderBridge<Handle = H>,
{
    let inner = grid.inner_radius();
    let font_size = LABEL_FONT * inner;
    for &cell in grid.cells() {
        let state = overlay.get(cell);
        if let Some(old) = state.labels.take() {
            for handle in old { bridge.remove_handle(handle); }
        }

        let center = grid.center(cell);
        let coords = grid.coordinates(cell);
        state.labels = Some([0, 1, 2].map(|axis| {
            let handle = bridge.add_label(&format!("{}:{}", LABEL_AXES[axis], coords[axis]));
            bridge.place_label(handle, center + Vec2::new(0., LABEL_ROWS[axis] * inner), font_size);
            handle
        }));
    }
}

/// Remove every coordinate label; returns how many handles went away
pub fn clear_labels<C, H, B>(overlay: &mut OverlayStore<C, H>, bridge: &mut B) -> usize
where
    C: Copy + Eq + std::hash::Hash,
    B: RenderBridge<Handle = H>,
{
    let labels = overlay.take_labels();
    let count = labels.len();
    for handle in labels { bridge.remove_handle(handle); }
    count
}
