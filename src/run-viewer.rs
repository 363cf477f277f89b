mod client;

use bevy::{
    log::LogPlugin,
    prelude::*,
};

use hex_overlay::{GridConfig, InteractionController, OverlayToggles, QrzEngine};

use client::{
    resources::*,
    systems::{camera, input, outline, ui},
};

fn main() -> AppExit {
    let controller = match InteractionController::new(QrzEngine, GridConfig::default(), OverlayToggles::default()) {
        Ok(controller) => controller,
        Err(err) => {
            eprintln!("default grid rejected: {err}");
            return AppExit::error();
        }
    };

    let mut app = App::new();
    app.add_plugins(DefaultPlugins
        .set(LogPlugin {
            level: bevy::log::Level::DEBUG,
            filter:  "wgpu=error,naga=warn,polling=warn,winit=warn,offset_allocator=warn,gilrs=warn,".to_owned()
                    +"bevy=warn,cosmic_text=warn,hex_overlay=debug,viewer=debug"
                    ,
            ..default()
        })
        .set(WindowPlugin {
            primary_window: Some(Window {
                title: "hex overlay".to_owned(),
                ..default()
            }),
            ..default()
        }),
    );

    app.insert_resource(ClearColor(Color::srgb(0.97, 0.96, 0.93)));
    app.insert_resource(Viewer { controller, error: None });
    app.init_resource::<ViewerKeys>();
    app.init_resource::<InputQueue>();

    app.add_systems(Startup, (
        camera::setup,
        input::setup,
        ui::setup,
    ));

    app.add_systems(Update, (
        (
            input::pointer,
            input::keys,
            input::dispatch,
            camera::update,
            ui::update,
        ).chain(),
        outline::draw,
    ));

    app.run()
}
