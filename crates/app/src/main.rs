//! Loadspan - interactive bridge stress visualization (native desktop)

use bevy::prelude::*;
use bevy::window::WindowResolution;
use loadspan_config::DisplayConfig;
use loadspan_scene::{log_outbound_messages, BridgeSettings, ScenePlugin};

mod config;

use config::LoadspanConfig;

fn main() {
    // Display configuration - single source of truth for window size
    let display_config = DisplayConfig::default();

    let window_config = Window {
        title: display_config.title.clone(),
        resolution: WindowResolution::new(display_config.width, display_config.height),
        present_mode: bevy::window::PresentMode::AutoVsync,
        ..default()
    };

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(window_config),
                ..default()
            })
            .set(bevy::log::LogPlugin {
                level: bevy::log::Level::INFO,
                ..default()
            }),
    );

    // Parsed after LogPlugin so rejected overrides are reported
    let config = LoadspanConfig::from_env();
    info!(
        "Starting Loadspan with {} deck segments",
        config.deck.segment_count
    );

    app.insert_resource(display_config)
        .insert_resource(config.interaction)
        .insert_resource(BridgeSettings {
            params: config.deck,
        })
        .add_plugins(ScenePlugin)
        // No page on desktop: drop what the scene queues for it
        .add_systems(PostUpdate, log_outbound_messages)
        .run();
}
