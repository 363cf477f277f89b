use bevy::{prelude::*, window::PrimaryWindow};

use hex_overlay::{InputEvent, SelectionMode, Toggle};
use qrz::Shape;

use crate::client::{
    bridge::{to_pixel, BevyBridge},
    resources::{InputQueue, Viewer, ViewerKeys, RADIUS_STEP},
};

/// Draw the first grid
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut viewer: ResMut<Viewer>,
) {
    let mut bridge = BevyBridge { commands: &mut commands, meshes: &mut meshes, materials: &mut materials };
    viewer.controller.start(&mut bridge);
}

/// Queue pointer motion and left clicks in pixel space
pub fn pointer(
    mouse: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut last: Local<Option<Vec2>>,
    mut queue: ResMut<InputQueue>,
) {
    let Ok(window) = windows.single() else { return };
    let Ok((camera, transform)) = cameras.single() else { return };
    let Some(cursor) = window.cursor_position() else { return };
    let Ok(world) = camera.viewport_to_world_2d(transform, cursor) else { return };

    let point = to_pixel(world);
    if *last != Some(world) {
        *last = Some(world);
        queue.0.push(InputEvent::PointerMoved(point));
    }
    if mouse.just_pressed(MouseButton::Left) {
        queue.0.push(InputEvent::Click(point));
    }
}

/// Queue toggle and reconfiguration events for pressed keys
pub fn keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    keys: Res<ViewerKeys>,
    viewer: Res<Viewer>,
    mut queue: ResMut<InputQueue>,
) {
    let toggles = *viewer.controller.toggles();
    let config = *viewer.controller.session().config();

    for (key, toggle) in [
        (keys.neighbors, Toggle::Neighbors),
        (keys.move_range, Toggle::MoveRange),
        (keys.path, Toggle::Path),
        (keys.visibility, Toggle::Visibility),
        (keys.coordinates, Toggle::Coordinates),
    ] {
        if keyboard.just_pressed(key) {
            queue.0.push(InputEvent::Toggle(toggle, !toggles.get(toggle)));
        }
    }

    if keyboard.just_pressed(keys.range_up) {
        queue.0.push(InputEvent::MoveRange(toggles.range + 1));
    }
    if keyboard.just_pressed(keys.range_down) {
        queue.0.push(InputEvent::MoveRange(toggles.range.saturating_sub(1)));
    }
    if keyboard.just_pressed(keys.selection) {
        let mode = match toggles.selection {
            SelectionMode::Single => SelectionMode::Multi,
            SelectionMode::Multi => SelectionMode::Single,
        };
        queue.0.push(InputEvent::Selection(mode));
    }

    let mut next = config;
    for (index, &key) in keys.shapes.iter().enumerate() {
        if keyboard.just_pressed(key) {
            next.shape = Shape::from_index(index).unwrap_or(next.shape);
        }
    }
    if keyboard.just_pressed(keys.orientation) { next.orientation = next.orientation.flipped(); }
    if keyboard.just_pressed(keys.wider) { next.width += 1; }
    if keyboard.just_pressed(keys.narrower) { next.width = next.width.saturating_sub(1); }
    if keyboard.just_pressed(keys.taller) { next.height += 1; }
    if keyboard.just_pressed(keys.shorter) { next.height = next.height.saturating_sub(1); }
    if keyboard.just_pressed(keys.grow) { next.radius += RADIUS_STEP; }
    if keyboard.just_pressed(keys.shrink) { next.radius -= RADIUS_STEP; }
    if next != config {
        queue.0.push(InputEvent::Reconfigure(next));
    }
}

/// Run queued events through the controller
pub fn dispatch(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut queue: ResMut<InputQueue>,
    mut viewer: ResMut<Viewer>,
) {
    if queue.0.is_empty() { return; }
    let viewer = viewer.as_mut();
    let mut bridge = BevyBridge { commands: &mut commands, meshes: &mut meshes, materials: &mut materials };
    for event in queue.0.drain(..) {
        match viewer.controller.handle(event, &mut bridge) {
            Ok(_) if matches!(event, InputEvent::Reconfigure(_)) => viewer.error = None,
            Ok(_) => {}
            Err(err) => {
                warn!("Reconfiguration rejected: {err}");
                viewer.error = Some(err.to_string());
            }
        }
    }
}

