pub mod common;

pub use common::{
    components::cell::{CellState, LineOfSight, OverlayFlag},
    engine::{GridEngine, HexGrid, QrzEngine},
    error::{LayoutError, OverlayFault},
    render::{Region, RenderBridge, Rgba, Style},
    resources::{
        config::{GridConfig, OverlayToggles, SelectionMode, Toggle},
        overlay::OverlayStore,
        session::GridSession,
    },
    systems::{
        controller::{InputEvent, InteractionController, Readout, Redraw},
        transition::{click_transition, FlagEffect, Transition},
    },
};
