use bevy::prelude::*;

use hex_overlay::{InputEvent, InteractionController, QrzEngine};

/// Key bindings for the viewer
#[derive(Resource)]
pub struct ViewerKeys {
    /// Toggle neighbor highlights (default: N)
    pub neighbors: KeyCode,
    /// Toggle move-range highlights (default: M)
    pub move_range: KeyCode,
    /// Toggle path markers (default: P)
    pub path: KeyCode,
    /// Toggle line-of-sight shading (default: V)
    pub visibility: KeyCode,
    /// Toggle coordinate labels (default: C)
    pub coordinates: KeyCode,
    /// Widen / narrow the move range (default: = and -)
    pub range_up: KeyCode,
    pub range_down: KeyCode,
    /// Pick a shape by catalog position (default: 1-4)
    pub shapes: [KeyCode; 4],
    /// Flip orientation (default: O)
    pub orientation: KeyCode,
    /// Grid size (default: arrows)
    pub wider: KeyCode,
    pub narrower: KeyCode,
    pub taller: KeyCode,
    pub shorter: KeyCode,
    /// Cell radius (default: PageUp / PageDown)
    pub grow: KeyCode,
    pub shrink: KeyCode,
    /// Switch single / multi selection (default: S)
    pub selection: KeyCode,
}

impl Default for ViewerKeys {
    fn default() -> Self {
        Self {
            neighbors: KeyCode::KeyN,
            move_range: KeyCode::KeyM,
            path: KeyCode::KeyP,
            visibility: KeyCode::KeyV,
            coordinates: KeyCode::KeyC,
            range_up: KeyCode::Equal,
            range_down: KeyCode::Minus,
            shapes: [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4],
            orientation: KeyCode::KeyO,
            wider: KeyCode::ArrowRight,
            narrower: KeyCode::ArrowLeft,
            taller: KeyCode::ArrowDown,
            shorter: KeyCode::ArrowUp,
            grow: KeyCode::PageUp,
            shrink: KeyCode::PageDown,
            selection: KeyCode::KeyS,
        }
    }
}

/// Overlay controller plus the last rejected reconfiguration
#[derive(Resource)]
pub struct Viewer {
    pub controller: InteractionController<QrzEngine, Entity>,
    pub error: Option<String>,
}

/// Input events gathered this frame, drained by `input::dispatch`
#[derive(Debug, Default, Resource)]
pub struct InputQueue(pub Vec<InputEvent>);

/// Cell radius step for PageUp / PageDown
pub const RADIUS_STEP: f32 = 2.;
