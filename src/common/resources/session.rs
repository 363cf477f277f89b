//! Grid session
//!
//! Owns the current grid, its overlay store, the anchor cell and the base
//! polygons drawn for every cell. Everything here is discarded together when
//! the grid is rebuilt.

use std::{collections::HashMap, fmt::Debug};

use glam::Vec2;
use log::{debug, info, warn};

use crate::common::{
    engine::{CellOf, GridEngine, HexGrid},
    error::LayoutError,
    render::{RenderBridge, Style},
    resources::{
        config::{GridConfig, OverlayToggles, SelectionMode},
        overlay::OverlayStore,
    },
    systems::transition::{FlagEffect, Transition},
};

/// Base polygon drawn for a cell and the style it was last painted with
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tile<H> {
    pub handle: H,
    pub style: Option<Style>,
}

pub struct GridSession<E: GridEngine, H> {
    engine: E,
    config: GridConfig,
    grid: E::Grid,
    overlay: OverlayStore<CellOf<E>, H>,
    tiles: HashMap<CellOf<E>, Tile<H>>,
    anchor: Option<CellOf<E>>,
    pub toggles: OverlayToggles,
}

impl<E, H> GridSession<E, H>
where
    E: GridEngine,
    H: Copy + Debug + Eq,
{
    /// Build the first grid; nothing is drawn until tiles are requested
    pub fn new(engine: E, config: GridConfig, toggles: OverlayToggles) -> Result<Self, LayoutError> {
        let grid = engine.build(&config)?;
        Ok(Self {
            engine,
            config,
            grid,
            overlay: OverlayStore::new(),
            tiles: HashMap::new(),
            anchor: None,
            toggles,
        })
    }

    pub fn config(&self) -> &GridConfig { &self.config }
    pub fn grid(&self) -> &E::Grid { &self.grid }
    pub fn overlay(&self) -> &OverlayStore<CellOf<E>, H> { &self.overlay }
    pub fn overlay_mut(&mut self) -> &mut OverlayStore<CellOf<E>, H> { &mut self.overlay }
    pub fn anchor(&self) -> Option<CellOf<E>> { self.anchor }
    pub fn tile(&self, cell: CellOf<E>) -> Option<&Tile<H>> { self.tiles.get(&cell) }

    /// Grid and overlay borrowed together for recomputation
    pub fn layers_mut(&mut self) -> (&E::Grid, &mut OverlayStore<CellOf<E>, H>) {
        (&self.grid, &mut self.overlay)
    }

    pub fn hit_test(&self, point: Vec2) -> Option<CellOf<E>> {
        self.grid.hit_test(point)
    }

    /// Move the anchor, clearing the previous anchor's flags first
    ///
    /// In multi-selection mode the previous anchor keeps its selection and only
    /// loses current status.
    pub fn set_anchor(&mut self, cell: Option<CellOf<E>>) {
        if let Some(previous) = self.anchor.filter(|&a| Some(a) != cell) {
            let state = self.overlay.get(previous);
            match self.toggles.selection {
                SelectionMode::Single => state.release(),
                SelectionMode::Multi => state.demote(),
            }
        }
        if let Some(cell) = cell {
            self.overlay.get(cell).promote();
        }
        debug!("anchor {:?} -> {:?}", self.anchor, cell);
        self.anchor = cell;
    }

    /// Apply a click transition's flag effects and adopt its anchor
    pub fn apply(&mut self, transition: &Transition<CellOf<E>>) {
        for &effect in &transition.effects {
            match effect {
                FlagEffect::Promote(cell) => self.overlay.get(cell).promote(),
                FlagEffect::Demote(cell) => self.overlay.get(cell).demote(),
                FlagEffect::Release(cell) => self.overlay.get(cell).release(),
            }
        }
        self.set_anchor(transition.anchor);
    }

    /// Replace the grid with one built from `config`
    ///
    /// On failure nothing changes. On success every handle owned by the old
    /// grid is removed from the surface and all overlay state is dropped.
    pub fn rebuild<B>(&mut self, config: GridConfig, bridge: &mut B) -> Result<(), LayoutError>
    where B: RenderBridge<Handle = H> {
        let grid = match self.engine.build(&config) {
            Ok(grid) => grid,
            Err(err) => {
                warn!("Rejected grid {} {} {}x{} r={}: {err}",
                    config.shape, config.orientation, config.width, config.height, config.radius);
                return Err(err);
            }
        };

        self.discard(bridge);
        self.grid = grid;
        self.config = config;
        info!("Grid rebuilt: {} {} {}x{} r={} ({} cells)",
            config.shape, config.orientation, config.width, config.height, config.radius, self.grid.cells().len());
        Ok(())
    }

    /// Draw a base polygon for every cell that does not have one yet
    pub fn draw_tiles<B>(&mut self, bridge: &mut B)
    where B: RenderBridge<Handle = H> {
        for &cell in self.grid.cells() {
            if self.tiles.contains_key(&cell) { continue; }
            let handle = bridge.add_polygon(&self.grid.polygon(cell));
            self.tiles.insert(cell, Tile { handle, style: None });
        }
    }

    /// Restyle every tile whose overlay style changed; returns how many did
    pub fn paint<B>(&mut self, bridge: &mut B) -> usize
    where B: RenderBridge<Handle = H> {
        let mut painted = 0;
        for &cell in self.grid.cells() {
            let Some(tile) = self.tiles.get_mut(&cell) else { continue };
            let style = Style::of(self.overlay.peek(cell));
            if tile.style == Some(style) { continue; }
            bridge.set_fill(tile.handle, style.fill);
            bridge.set_stroke(tile.handle, style.stroke, style.stroke_width);
            tile.style = Some(style);
            painted += 1;
        }
        painted
    }

    fn discard<B>(&mut self, bridge: &mut B)
    where B: RenderBridge<Handle = H> {
        for handle in self.overlay.take_markers() { bridge.remove_handle(handle); }
        for handle in self.overlay.take_labels() { bridge.remove_handle(handle); }
        for (_, tile) in self.tiles.drain() { bridge.remove_handle(tile.handle); }
        self.overlay.clear();
        self.anchor = None;
    }
}
