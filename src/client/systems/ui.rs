use bevy::prelude::*;

use hex_overlay::{Readout, SelectionMode};

use crate::client::resources::Viewer;

#[derive(Component)]
pub enum Info {
    Grid,
    Pointer,
    Toggles,
    Error,
}

pub fn setup(mut commands: Commands) {
    commands.spawn(Node {
        width: Val::Percent(100.),
        height: Val::Percent(100.),
        ..default()
    })
    .with_children(|parent| {
        for (row, info) in [Info::Grid, Info::Pointer, Info::Toggles, Info::Error].into_iter().enumerate() {
            parent.spawn((
                Text::new(""),
                TextFont { font_size: 14., ..default() },
                TextColor(if matches!(info, Info::Error) { Color::srgb(0.9, 0.2, 0.2) } else { Color::srgb(0.1, 0.1, 0.1) }),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(8. + 18. * row as f32),
                    left: Val::Px(8.),
                    ..default()
                },
                info,
            ));
        }
    });
}

fn pointer_line(readout: &Readout) -> String {
    let mut line = match readout.pointer {
        Some(p) => format!("x {:.0}  y {:.0}", p.x, p.y),
        None => "x -  y -".to_owned(),
    };
    if let Some([q, r, z]) = readout.hovered {
        line += &format!("  |  q {q}  r {r}  z {z}");
    }
    if let Some(distance) = readout.distance {
        line += &format!("  |  distance {distance}");
    }
    line
}

pub fn update(
    mut query: Query<(&mut Text, &Info)>,
    viewer: Res<Viewer>,
) {
    if !viewer.is_changed() { return; }
    let session = viewer.controller.session();
    let config = session.config();
    let toggles = session.toggles;
    let flag = |on: bool| if on { "on" } else { "off" };

    for (mut text, info) in &mut query {
        text.0 = match info {
            Info::Grid => format!("{} [1-4]  {} [O]  {}x{} [arrows]  radius {} [PgUp/PgDn]  {} cells",
                config.shape, config.orientation, config.width, config.height, config.radius,
                session.grid().len()),
            Info::Pointer => pointer_line(&viewer.controller.readout()),
            Info::Toggles => format!("neighbors {} [N]  range {} ({}) [M,=,-]  path {} [P]  sight {} [V]  coords {} [C]  {} [S]",
                flag(toggles.neighbors), flag(toggles.move_range), toggles.range, flag(toggles.path),
                flag(toggles.visibility), flag(toggles.coordinates),
                match toggles.selection { SelectionMode::Single => "single", SelectionMode::Multi => "multi" }),
            Info::Error => viewer.error.clone().unwrap_or_default(),
        };
    }
}
