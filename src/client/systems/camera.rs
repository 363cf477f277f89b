use bevy::prelude::*;

use crate::client::resources::Viewer;

pub fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Keep the grid's bounding box centered after rebuilds
pub fn update(
    viewer: Res<Viewer>,
    mut camera: Query<&mut Transform, With<Camera2d>>,
) {
    if !viewer.is_changed() { return; }
    let bounds = viewer.controller.session().grid().bounds();
    if let Ok(mut transform) = camera.single_mut() {
        let target = Vec3::new(bounds.x / 2., -bounds.y / 2., transform.translation.z);
        if transform.translation != target { transform.translation = target; }
    }
}
