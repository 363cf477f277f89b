use std::{collections::HashMap, hash::Hash};

use crate::common::components::cell::{CellState, LineOfSight, OverlayFlag};

/// Overlay state for every cell an overlay has touched
///
/// Entries are created lazily; a missing entry reads as a blank `CellState`.
#[derive(Clone, Debug)]
pub struct OverlayStore<C, H> {
    cells: HashMap<C, CellState<H>>,
}

impl<C, H> Default for OverlayStore<C, H> {
    fn default() -> Self {
        Self { cells: HashMap::new() }
    }
}

impl<C, H> OverlayStore<C, H>
where C: Copy + Eq + Hash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable state for `cell`, created blank on first access
    pub fn get(&mut self, cell: C) -> &mut CellState<H> {
        self.cells.entry(cell).or_default()
    }

    /// Read-only lookup that never allocates an entry
    pub fn peek(&self, cell: C) -> Option<&CellState<H>> {
        self.cells.get(&cell)
    }

    pub fn is_selected(&self, cell: C) -> bool {
        self.peek(cell).is_some_and(|state| state.is_selected)
    }

    /// Clear the named flags on every cell
    pub fn reset_all(&mut self, flags: &[OverlayFlag]) {
        for state in self.cells.values_mut() {
            for &flag in flags { state.clear(flag); }
        }
    }

    pub fn reset_visibility(&mut self) {
        for state in self.cells.values_mut() {
            state.visibility = LineOfSight::Unset;
        }
    }

    /// Cells currently flagged as selected
    pub fn selected(&self) -> Vec<C> {
        self.cells.iter()
            .filter(|(_, state)| state.is_selected)
            .map(|(&cell, _)| cell)
            .collect()
    }

    /// Detach every path marker, returning the handles for removal
    pub fn take_markers(&mut self) -> Vec<H> {
        self.cells.values_mut().filter_map(|state| state.path_marker.take()).collect()
    }

    /// Detach every coordinate label, returning the handles for removal
    pub fn take_labels(&mut self) -> Vec<H> {
        self.cells.values_mut()
            .filter_map(|state| state.labels.take())
            .flatten()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&C, &CellState<H>)> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_creates_blank_entry() {
        let mut store = OverlayStore::<u8, u32>::new();
        assert!(store.peek(3).is_none());
        assert!(store.get(3).is_blank());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_reset_all_clears_only_named_flags() {
        let mut store = OverlayStore::<u8, u32>::new();
        for cell in 0..5 {
            let state = store.get(cell);
            state.show_as_neighbor = true;
            state.show_as_movable = true;
        }
        store.get(2).promote();

        store.reset_all(&[OverlayFlag::Neighbor]);

        assert!(store.iter().all(|(_, s)| !s.show_as_neighbor));
        assert!(store.iter().all(|(_, s)| s.show_as_movable), "Movable flags should survive a neighbor reset");
        assert!(store.is_selected(2));
    }

    #[test]
    fn test_selected_lists_every_selected_cell() {
        let mut store = OverlayStore::<u8, u32>::new();
        store.get(1).promote();
        store.get(4).set_selected(true);
        store.get(5);

        let mut selected = store.selected();
        selected.sort();
        assert_eq!(selected, vec![1, 4]);
    }

    #[test]
    fn test_take_markers_and_labels_empties_slots() {
        let mut store = OverlayStore::<u8, u32>::new();
        store.get(0).path_marker = Some(10);
        store.get(1).path_marker = Some(11);
        store.get(1).labels = Some([20, 21, 22]);

        let mut markers = store.take_markers();
        markers.sort();
        assert_eq!(markers, vec![10, 11]);
        assert_eq!(store.take_labels(), vec![20, 21, 22]);
        assert!(store.take_markers().is_empty());
        assert!(store.iter().all(|(_, s)| s.path_marker.is_none() && s.labels.is_none()));
    }

    #[test]
    fn test_reset_visibility_and_clear() {
        let mut store = OverlayStore::<u8, u32>::new();
        store.get(0).visibility = LineOfSight::NotVisible;
        store.get(1).visibility = LineOfSight::Visible;
        store.reset_visibility();
        assert!(store.iter().all(|(_, s)| s.visibility == LineOfSight::Unset));

        store.clear();
        assert!(store.is_empty());
    }
}
