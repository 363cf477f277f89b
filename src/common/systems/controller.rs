//! Interaction controller
//!
//! Consumes one input event at a time and runs it to completion: selection
//! transition, derived highlight recomputation, tile restyling, and finally
//! the invalidation request for the rendering surface.

use std::fmt::Debug;

use glam::Vec2;
use log::{info, trace};

use crate::common::{
    engine::{CellOf, GridEngine, HexGrid},
    error::LayoutError,
    render::{Region, RenderBridge},
    resources::{
        config::{GridConfig, OverlayToggles, SelectionMode, Toggle},
        session::GridSession,
    },
    systems::{highlight::*, transition::click_transition},
};

/// Everything the UI layer can ask of the overlay core
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// Primary click at a pixel position
    Click(Vec2),
    PointerMoved(Vec2),
    Toggle(Toggle, bool),
    /// New move-range step count
    MoveRange(u32),
    Selection(SelectionMode),
    /// Shape, orientation, size or radius changed
    Reconfigure(GridConfig),
}

/// Invalidation requested after an event
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Redraw {
    Nothing,
    Region(Region),
    Full,
}

impl Redraw {
    pub fn apply<B: RenderBridge>(self, bridge: &mut B) {
        match self {
            Redraw::Nothing => {}
            Redraw::Region(region) => {
                trace!("invalidate {region:?}");
                bridge.invalidate_region(region);
            }
            Redraw::Full => {
                trace!("invalidate all");
                bridge.invalidate_all();
            }
        }
    }
}

/// Pointer readouts for the UI
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Readout {
    pub pointer: Option<Vec2>,
    /// Cube coordinates of the cell under the pointer
    pub hovered: Option<[i32; 3]>,
    /// Steps from the anchor to the hovered cell
    pub distance: Option<u32>,
}

pub struct InteractionController<E: GridEngine, H> {
    session: GridSession<E, H>,
    hovered: Option<CellOf<E>>,
    readout: Readout,
}

impl<E, H> InteractionController<E, H>
where
    E: GridEngine,
    H: Copy + Debug + Eq,
{
    pub fn new(engine: E, config: GridConfig, toggles: OverlayToggles) -> Result<Self, LayoutError> {
        Ok(Self {
            session: GridSession::new(engine, config, toggles)?,
            hovered: None,
            readout: Readout::default(),
        })
    }

    pub fn session(&self) -> &GridSession<E, H> { &self.session }
    pub fn toggles(&self) -> &OverlayToggles { &self.session.toggles }
    pub fn readout(&self) -> Readout { self.readout }

    /// Draw the initial grid with whatever toggles are already on
    pub fn start<B>(&mut self, bridge: &mut B) -> Redraw
    where B: RenderBridge<Handle = H> {
        self.session.draw_tiles(bridge);
        self.reapply_toggles(bridge);
        self.session.paint(bridge);
        Redraw::Full.apply(bridge);
        Redraw::Full
    }

    /// Run one event to completion
    ///
    /// Only a rejected reconfiguration fails; the previous grid and overlay
    /// stay in place and on screen when it does.
    pub fn handle<B>(&mut self, event: InputEvent, bridge: &mut B) -> Result<Redraw, LayoutError>
    where B: RenderBridge<Handle = H> {
        let redraw = match event {
            InputEvent::Click(point) => self.click(point, bridge),
            InputEvent::PointerMoved(point) => self.pointer_moved(point, bridge),
            InputEvent::Toggle(toggle, on) => self.toggle(toggle, on, bridge),
            InputEvent::MoveRange(range) => {
                self.session.toggles.range = range;
                info!("Move range set to {range}");
                self.refresh_highlights();
                Redraw::Full
            }
            InputEvent::Selection(mode) => self.select_mode(mode),
            InputEvent::Reconfigure(config) => self.reconfigure(config, bridge)?,
        };
        self.session.paint(bridge);
        redraw.apply(bridge);
        Ok(redraw)
    }

    fn click<B>(&mut self, point: Vec2, bridge: &mut B) -> Redraw
    where B: RenderBridge<Handle = H> {
        let Some(cell) = self.session.hit_test(point) else { return Redraw::Nothing };

        let previous = self.session.anchor();
        let was_selected = self.session.overlay().is_selected(cell);
        let transition = click_transition(previous, cell, was_selected, self.session.toggles.selection);
        self.session.apply(&transition);

        // anchor and opacity both feed the path and sight lines
        self.refresh_path(bridge);
        self.update_readout();
        self.refresh_highlights();

        let toggles = self.session.toggles;
        if (toggles.path || toggles.visibility) && self.hovered.is_some() {
            Redraw::Full
        } else {
            Redraw::Region(Region::around(point, self.session.grid().radius()))
        }
    }

    fn pointer_moved<B>(&mut self, point: Vec2, bridge: &mut B) -> Redraw
    where B: RenderBridge<Handle = H> {
        self.hovered = self.session.hit_test(point);
        self.readout.pointer = Some(point);
        self.update_readout();
        self.refresh_path(bridge);
        self.refresh_highlights();
        Redraw::Full
    }

    fn toggle<B>(&mut self, toggle: Toggle, on: bool, bridge: &mut B) -> Redraw
    where B: RenderBridge<Handle = H> {
        self.session.toggles.set(toggle, on);
        info!("{toggle:?} overlay {}", if on { "on" } else { "off" });
        match toggle {
            Toggle::Neighbors | Toggle::MoveRange => self.refresh_highlights(),
            Toggle::Path | Toggle::Visibility => self.refresh_path(bridge),
            Toggle::Coordinates => {
                let (grid, overlay) = self.session.layers_mut();
                if on { refresh_labels(grid, overlay, bridge); } else { clear_labels(overlay, bridge); }
            }
        }
        Redraw::Full
    }

    fn select_mode(&mut self, mode: SelectionMode) -> Redraw {
        self.session.toggles.selection = mode;
        info!("Selection mode {mode:?}");
        if mode == SelectionMode::Single {
            let anchor = self.session.anchor();
            let overlay = self.session.overlay_mut();
            for cell in overlay.selected() {
                if Some(cell) != anchor { overlay.get(cell).release(); }
            }
        }
        self.refresh_highlights();
        Redraw::Full
    }

    fn reconfigure<B>(&mut self, config: GridConfig, bridge: &mut B) -> Result<Redraw, LayoutError>
    where B: RenderBridge<Handle = H> {
        self.session.rebuild(config, bridge)?;
        self.hovered = None;
        self.readout.hovered = None;
        self.readout.distance = None;
        self.session.draw_tiles(bridge);
        self.reapply_toggles(bridge);
        Ok(Redraw::Full)
    }

    /// Toggles that survive a rebuild; path and visibility need an anchor
    fn reapply_toggles<B>(&mut self, bridge: &mut B)
    where B: RenderBridge<Handle = H> {
        self.refresh_highlights();
        if self.session.toggles.coordinates {
            let (grid, overlay) = self.session.layers_mut();
            refresh_labels(grid, overlay, bridge);
        }
    }

    fn refresh_highlights(&mut self) {
        let toggles = self.session.toggles;
        let (grid, overlay) = self.session.layers_mut();
        recompute_neighbors(grid, overlay, toggles.neighbors);
        recompute_move_range(grid, overlay, toggles.move_range, toggles.range);
    }

    fn refresh_path<B>(&mut self, bridge: &mut B)
    where B: RenderBridge<Handle = H> {
        let toggles = self.session.toggles;
        let anchor = self.session.anchor();
        let hovered = self.hovered;
        let (grid, overlay) = self.session.layers_mut();
        let placed = recompute_path(grid, overlay, &toggles, anchor, hovered, bridge);
        if placed && toggles.coordinates {
            refresh_labels(grid, overlay, bridge);
        }
    }

    fn update_readout(&mut self) {
        let grid = self.session.grid();
        self.readout.hovered = self.hovered.map(|cell| grid.coordinates(cell));
        self.readout.distance = self.session.anchor()
            .zip(self.hovered)
            .map(|(anchor, hovered)| grid.distance(anchor, hovered));
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use qrz::{Qrz, Shape};

    use super::*;
    use crate::common::{
        engine::{testing::FaultyEngine, QrzEngine},
        components::cell::LineOfSight,
        render::testing::{Call, RecordingBridge},
    };

    type Controller = InteractionController<QrzEngine, u32>;

    fn started(toggles: OverlayToggles) -> (Controller, RecordingBridge) {
        let mut controller = Controller::new(QrzEngine, GridConfig::default(), toggles).expect("default grid");
        let mut bridge = RecordingBridge::default();
        controller.start(&mut bridge);
        (controller, bridge)
    }

    fn at(controller: &Controller, cell: Qrz) -> Vec2 {
        controller.session().grid().center(cell)
    }

    fn click(controller: &mut Controller, bridge: &mut RecordingBridge, cell: Qrz) -> Redraw {
        let point = at(controller, cell);
        controller.handle(InputEvent::Click(point), bridge).expect("clicks never fail")
    }

    fn hover(controller: &mut Controller, bridge: &mut RecordingBridge, cell: Qrz) -> Redraw {
        let point = at(controller, cell);
        controller.handle(InputEvent::PointerMoved(point), bridge).expect("pointer moves never fail")
    }

    fn currents(controller: &Controller) -> Vec<Qrz> {
        controller.session().overlay().iter().filter(|(_, s)| s.is_current).map(|(&c, _)| c).collect()
    }

    fn markers(controller: &Controller) -> usize {
        controller.session().overlay().iter().filter(|(_, s)| s.path_marker.is_some()).count()
    }

    #[test]
    fn test_start_draws_every_tile() {
        let (controller, bridge) = started(OverlayToggles::default());
        assert_eq!(bridge.count(|c| matches!(c, Call::Polygon(_))), 100);
        assert_eq!(bridge.count(|c| matches!(c, Call::Fill(..))), 100);
        assert_eq!(bridge.calls.last(), Some(&Call::InvalidateAll));
        assert!(controller.session().overlay().is_empty(), "Fresh grid should carry no overlay state");
    }

    #[test]
    fn test_reference_scenario() {
        let toggles = OverlayToggles { path: true, ..OverlayToggles::default() };
        let (mut controller, mut bridge) = started(toggles);
        assert_eq!(controller.session().grid().cells().len(), 100);

        let corner = Qrz::new(0, 0);
        click(&mut controller, &mut bridge, corner);
        let state = controller.session().overlay().peek(corner).expect("anchor has state").clone();
        assert!(state.is_selected && state.is_current && state.is_opaque);
        assert_eq!(currents(&controller), vec![corner]);

        let second = Qrz::new(5, 4);
        click(&mut controller, &mut bridge, second);
        assert!(controller.session().overlay().peek(corner).is_some_and(|s| !s.is_current));
        assert_eq!(currents(&controller), vec![second]);
        assert_eq!(controller.session().anchor(), Some(second));

        let third = Qrz::new(2, 8);
        hover(&mut controller, &mut bridge, third);
        let route = HexGrid::shortest_path(controller.session().grid(), second, third).expect("cells on grid");
        assert_eq!(route.first(), Some(&second));
        assert_eq!(route.last(), Some(&third));
        for cell in &route {
            assert!(controller.session().overlay().peek(*cell).is_some_and(|s| s.path_marker.is_some()),
                "Route cell {:?} has no marker", cell);
        }
        assert_eq!(markers(&controller), route.len());

        controller.handle(InputEvent::Toggle(Toggle::Coordinates, true), &mut bridge).expect("toggle");
        assert_eq!(bridge.labels.len(), 300);
        controller.handle(InputEvent::Toggle(Toggle::Coordinates, false), &mut bridge).expect("toggle");
        assert!(bridge.labels.is_empty());
        assert!(controller.session().overlay().iter().all(|(_, s)| s.labels.is_none()));

        let grid = controller.session().grid().clone();
        let bad = GridConfig { width: 0, ..GridConfig::default() };
        let err = controller.handle(InputEvent::Reconfigure(bad), &mut bridge).expect_err("width 0 is rejected");
        assert!(matches!(err, LayoutError::EmptyGrid { .. }));
        assert_eq!(controller.session().grid(), &grid);
        assert_eq!(controller.session().anchor(), Some(second));
        assert_eq!(markers(&controller), route.len(), "Overlay should survive a rejected rebuild");
    }

    #[test]
    fn test_single_anchor_invariant() {
        for mode in [SelectionMode::Single, SelectionMode::Multi] {
            let toggles = OverlayToggles { selection: mode, ..OverlayToggles::default() };
            let (mut controller, mut bridge) = started(toggles);
            let clicks = [(0, 0), (3, 3), (3, 3), (1, 2), (0, 0), (1, 2), (4, 5), (0, 0), (6, 1), (6, 1)];
            for (q, r) in clicks {
                click(&mut controller, &mut bridge, Qrz::new(q, r));
                let current = currents(&controller);
                assert!(current.len() <= 1, "{:?}: several current cells {:?}", mode, current);
                assert_eq!(current.first().copied(), controller.session().anchor(), "{:?}: anchor out of sync", mode);
            }
        }
    }

    #[test]
    fn test_click_outside_grid_does_nothing() {
        let (mut controller, mut bridge) = started(OverlayToggles::default());
        let calls = bridge.calls.len();
        let redraw = controller.handle(InputEvent::Click(Vec2::new(-50., -50.)), &mut bridge).expect("click");
        assert_eq!(redraw, Redraw::Nothing);
        assert_eq!(bridge.calls.len(), calls);
        assert_eq!(controller.session().anchor(), None);
    }

    #[test]
    fn test_click_invalidates_square_around_point() {
        let (mut controller, mut bridge) = started(OverlayToggles::default());
        let point = at(&controller, Qrz::new(2, 2));
        let redraw = controller.handle(InputEvent::Click(point), &mut bridge).expect("click");
        let region = Region::around(point, 20.);
        assert_eq!(redraw, Redraw::Region(region));
        assert_eq!(bridge.calls.last(), Some(&Call::InvalidateRegion(region)));
    }

    #[test]
    fn test_neighbor_highlights_under_multi_select() {
        let toggles = OverlayToggles { neighbors: true, selection: SelectionMode::Multi, ..OverlayToggles::default() };
        let (mut controller, mut bridge) = started(toggles);
        let picks = [Qrz::new(1, 1), Qrz::new(5, 5), Qrz::new(2, 6)];
        for cell in picks { click(&mut controller, &mut bridge, cell); }
        click(&mut controller, &mut bridge, picks[1]);

        let grid = controller.session().grid();
        let expected: HashSet<Qrz> = [picks[0], picks[2]].into_iter().flat_map(|c| grid.neighbors_of(c)).collect();
        for &cell in grid.cells() {
            let flagged = controller.session().overlay().peek(cell).is_some_and(|s| s.show_as_neighbor);
            assert_eq!(flagged, expected.contains(&cell), "Neighbor flag wrong for {:?}", cell);
        }

        controller.handle(InputEvent::Toggle(Toggle::Neighbors, false), &mut bridge).expect("toggle");
        assert!(controller.session().overlay().iter().all(|(_, s)| !s.show_as_neighbor));
    }

    #[test]
    fn test_move_range_value_change() {
        let toggles = OverlayToggles { move_range: true, ..OverlayToggles::default() };
        let (mut controller, mut bridge) = started(toggles);
        click(&mut controller, &mut bridge, Qrz::new(3, 4));
        let movable = |c: &Controller| c.session().overlay().iter().filter(|(_, s)| s.show_as_movable).count();
        assert_eq!(movable(&controller), 19);

        let redraw = controller.handle(InputEvent::MoveRange(1), &mut bridge).expect("range");
        assert_eq!(redraw, Redraw::Full);
        assert_eq!(movable(&controller), 7);
    }

    #[test]
    fn test_switching_to_single_keeps_only_anchor() {
        let toggles = OverlayToggles { selection: SelectionMode::Multi, ..OverlayToggles::default() };
        let (mut controller, mut bridge) = started(toggles);
        for cell in [Qrz::new(0, 0), Qrz::new(2, 2), Qrz::new(4, 4)] { click(&mut controller, &mut bridge, cell); }
        assert_eq!(controller.session().overlay().selected().len(), 3);

        controller.handle(InputEvent::Selection(SelectionMode::Single), &mut bridge).expect("mode");
        assert_eq!(controller.session().overlay().selected(), vec![Qrz::new(4, 4)]);
    }

    #[test]
    fn test_coordinate_toggle_is_idempotent() {
        let (mut controller, mut bridge) = started(OverlayToggles::default());
        for on in [true, true, false, true] {
            controller.handle(InputEvent::Toggle(Toggle::Coordinates, on), &mut bridge).expect("toggle");
        }
        assert_eq!(bridge.labels.len(), 300);
        for &cell in controller.session().grid().cells() {
            let labels = controller.session().overlay().peek(cell).and_then(|s| s.labels).expect("labels on every cell");
            assert!(labels.iter().all(|h| bridge.labels.contains(h)), "Stale label handle on {:?}", cell);
        }
    }

    #[test]
    fn test_labels_reinserted_after_new_markers() {
        let toggles = OverlayToggles { path: true, coordinates: true, ..OverlayToggles::default() };
        let (mut controller, mut bridge) = started(toggles);
        click(&mut controller, &mut bridge, Qrz::new(0, 0));
        let before = bridge.count(|c| matches!(c, Call::Label(..)));
        hover(&mut controller, &mut bridge, Qrz::new(3, 0));

        let last_marker = bridge.calls.iter().rposition(|c| matches!(c, Call::Marker(..))).expect("markers placed");
        let last_label = bridge.calls.iter().rposition(|c| matches!(c, Call::Label(..))).expect("labels placed");
        assert!(last_label > last_marker, "Labels should be drawn after the markers");
        assert_eq!(bridge.count(|c| matches!(c, Call::Label(..))), before + 300);
        assert_eq!(bridge.labels.len(), 300);
    }

    #[test]
    fn test_path_clears_on_deselect() {
        let toggles = OverlayToggles { path: true, visibility: true, ..OverlayToggles::default() };
        let (mut controller, mut bridge) = started(toggles);
        let anchor = Qrz::new(1, 1);
        click(&mut controller, &mut bridge, anchor);
        hover(&mut controller, &mut bridge, Qrz::new(5, 3));
        assert!(markers(&controller) > 0);

        click(&mut controller, &mut bridge, anchor);
        assert_eq!(controller.session().anchor(), None);
        assert_eq!(markers(&controller), 0);
        assert!(bridge.markers.is_empty(), "Marker handles must be removed from the surface");
        assert_eq!(controller.readout().distance, None);
    }

    #[test]
    fn test_path_toggle_off_removes_markers() {
        let toggles = OverlayToggles { path: true, ..OverlayToggles::default() };
        let (mut controller, mut bridge) = started(toggles);
        click(&mut controller, &mut bridge, Qrz::new(0, 0));
        hover(&mut controller, &mut bridge, Qrz::new(4, 0));
        assert_eq!(bridge.markers.len(), 5);

        controller.handle(InputEvent::Toggle(Toggle::Path, false), &mut bridge).expect("toggle");
        assert!(bridge.markers.is_empty());
        assert_eq!(markers(&controller), 0);
    }

    #[test]
    fn test_readout_tracks_pointer_and_distance() {
        let (mut controller, mut bridge) = started(OverlayToggles::default());
        hover(&mut controller, &mut bridge, Qrz::new(2, 4));
        let readout = controller.readout();
        assert_eq!(readout.hovered, Some([2, 4, -6]));
        assert_eq!(readout.distance, None, "No anchor means no distance");

        click(&mut controller, &mut bridge, Qrz::new(0, 0));
        hover(&mut controller, &mut bridge, Qrz::new(2, 4));
        assert_eq!(controller.readout().distance, Some(6));

        let redraw = controller.handle(InputEvent::PointerMoved(Vec2::new(-80., 5.)), &mut bridge).expect("move");
        assert_eq!(redraw, Redraw::Full);
        assert_eq!(controller.readout().pointer, Some(Vec2::new(-80., 5.)));
        assert_eq!(controller.readout().hovered, None);
        assert_eq!(controller.readout().distance, None);
    }

    #[test]
    fn test_rebuild_resets_overlay() {
        let toggles = OverlayToggles {
            neighbors: true,
            move_range: true,
            path: true,
            visibility: true,
            coordinates: true,
            ..OverlayToggles::default()
        };
        let (mut controller, mut bridge) = started(toggles);
        click(&mut controller, &mut bridge, Qrz::new(2, 2));
        hover(&mut controller, &mut bridge, Qrz::new(6, 3));

        let config = GridConfig { shape: Shape::Hexagon, width: 7, height: 7, ..GridConfig::default() };
        let redraw = controller.handle(InputEvent::Reconfigure(config), &mut bridge).expect("7x7 hexagon is valid");

        assert_eq!(redraw, Redraw::Full);
        assert_eq!(controller.session().anchor(), None);
        assert_eq!(controller.session().grid().cells().len(), 37);
        for (cell, state) in controller.session().overlay().iter() {
            assert!(!state.is_selected && !state.is_current && !state.show_as_neighbor && !state.show_as_movable,
                "Stale flags on {:?}", cell);
            assert!(state.path_marker.is_none());
            assert_eq!(state.visibility, LineOfSight::Unset);
        }
        assert_eq!(bridge.labels.len(), 37 * 3, "Coordinates toggle should be reapplied");
        assert!(bridge.markers.is_empty());
        assert_eq!(bridge.live.len(), 37 + 37 * 3, "Only new tiles and labels should be live");
    }

    #[test]
    fn test_failed_rebuild_preserves_state() {
        let toggles = OverlayToggles { neighbors: true, ..OverlayToggles::default() };
        let (mut controller, mut bridge) = started(toggles);
        let anchor = Qrz::new(4, 4);
        click(&mut controller, &mut bridge, anchor);
        let grid = controller.session().grid().clone();
        let state = controller.session().overlay().peek(anchor).cloned();
        let live = bridge.live.clone();

        for bad in [
            GridConfig { height: 0, ..GridConfig::default() },
            GridConfig { radius: -1., ..GridConfig::default() },
            GridConfig { shape: Shape::Hexagon, width: 4, height: 4, ..GridConfig::default() },
        ] {
            assert!(controller.handle(InputEvent::Reconfigure(bad), &mut bridge).is_err(), "{:?} should be rejected", bad);
            assert_eq!(controller.session().grid(), &grid);
            assert_eq!(controller.session().overlay().peek(anchor).cloned(), state);
            assert_eq!(controller.session().config(), &GridConfig::default());
            assert_eq!(bridge.live, live, "Rejected rebuild must leave the drawn grid alone");
        }
    }

    #[test]
    fn test_no_handle_leaks_across_toggles_and_rebuilds() {
        let (mut controller, mut bridge) = started(OverlayToggles::default());
        let events = [
            InputEvent::Toggle(Toggle::Path, true),
            InputEvent::Toggle(Toggle::Coordinates, true),
            InputEvent::Click(Vec2::new(20., 20.)),
            InputEvent::PointerMoved(Vec2::new(150., 120.)),
            InputEvent::Toggle(Toggle::Coordinates, false),
            InputEvent::Toggle(Toggle::Coordinates, true),
            InputEvent::PointerMoved(Vec2::new(60., 200.)),
            InputEvent::Reconfigure(GridConfig { shape: Shape::Triangle, width: 6, height: 6, ..GridConfig::default() }),
            InputEvent::Click(Vec2::new(30., 30.)),
            InputEvent::PointerMoved(Vec2::new(90., 100.)),
            InputEvent::Toggle(Toggle::Coordinates, false),
            InputEvent::Toggle(Toggle::Path, false),
        ];
        for event in events {
            controller.handle(event, &mut bridge).expect("every event here is valid");
        }
        assert_eq!(controller.session().grid().cells().len(), 21);
        assert!(bridge.labels.is_empty() && bridge.markers.is_empty());
        assert_eq!(bridge.live.len(), 21, "Only the triangle's tiles should remain");
    }

    #[test]
    fn test_engine_faults_do_not_abort_pointer_moves() {
        let engine = FaultyEngine { fail_paths: true, fail_visibility: true };
        let toggles = OverlayToggles { path: true, visibility: true, ..OverlayToggles::default() };
        let mut controller = InteractionController::<_, u32>::new(engine, GridConfig::default(), toggles).expect("grid");
        let mut bridge = RecordingBridge::default();
        controller.start(&mut bridge);

        let anchor = controller.session().grid().center(Qrz::new(0, 0));
        controller.handle(InputEvent::Click(anchor), &mut bridge).expect("click");
        let hovered = controller.session().grid().center(Qrz::new(3, 3));
        let redraw = controller.handle(InputEvent::PointerMoved(hovered), &mut bridge).expect("faults are swallowed");

        assert_eq!(redraw, Redraw::Full);
        assert_eq!(bridge.calls.last(), Some(&Call::InvalidateAll));
        assert!(bridge.markers.is_empty());
        assert_eq!(controller.readout().distance, Some(6));
    }

    #[test]
    fn test_huge_move_range_covers_grid() {
        let toggles = OverlayToggles { move_range: true, selection: SelectionMode::Multi, ..OverlayToggles::default() };
        let (mut controller, mut bridge) = started(toggles);
        click(&mut controller, &mut bridge, Qrz::new(0, 0));
        click(&mut controller, &mut bridge, Qrz::new(5, 9));
        controller.handle(InputEvent::MoveRange(u32::MAX), &mut bridge).expect("range");
        for cell in [Qrz::new(2, 2), Qrz::new(4, 7), Qrz::new(9, 0)] {
            hover(&mut controller, &mut bridge, cell);
        }
        let movable = controller.session().overlay().iter().filter(|(_, s)| s.show_as_movable).count();
        assert_eq!(movable, 100, "Every cell is within an unbounded range");
    }

    #[test]
    fn test_non_finite_click_selects_nothing() {
        let (mut controller, mut bridge) = started(OverlayToggles::default());
        for point in [Vec2::NAN, Vec2::new(f32::INFINITY, 0.), Vec2::new(0., f32::NAN)] {
            let redraw = controller.handle(InputEvent::Click(point), &mut bridge).expect("click");
            assert_eq!(redraw, Redraw::Nothing);
        }
        assert_eq!(controller.session().anchor(), None);
        assert!(controller.session().overlay().selected().is_empty());
    }

    #[test]
    fn test_deselecting_blocker_updates_sight_lines() {
        let toggles = OverlayToggles { visibility: true, selection: SelectionMode::Multi, ..OverlayToggles::default() };
        let (mut controller, mut bridge) = started(toggles);
        let (anchor, blocker, target) = (Qrz::new(0, 0), Qrz::new(2, 0), Qrz::new(4, 0));
        click(&mut controller, &mut bridge, blocker);
        click(&mut controller, &mut bridge, anchor);
        hover(&mut controller, &mut bridge, target);
        let sight = |c: &Controller| c.session().overlay().peek(target).map(|s| s.visibility);
        assert_eq!(sight(&controller), Some(LineOfSight::NotVisible));

        let redraw = click(&mut controller, &mut bridge, blocker);
        assert_eq!(controller.session().anchor(), Some(anchor));
        assert_eq!(sight(&controller), Some(LineOfSight::Visible), "Released cell should stop blocking at once");
        assert_eq!(redraw, Redraw::Full);
    }
}
