//! Loadspan Bevy WASM Build
//!
//! This crate compiles the bridge scene to WebAssembly. The scene renders to a
//! canvas element on the hosting page and exchanges JSON CustomEvents with it.

use bevy::prelude::*;
use loadspan_config::DisplayConfig;
use loadspan_scene::{OutboundPageMessages, PageToScene, ScenePlugin};
use wasm_bindgen::prelude::*;

mod bridge;
mod error;

pub use error::PageBridgeError;

/// Main entry point for the WASM module
#[wasm_bindgen(start)]
pub fn main() {
    // Set up panic hook for better error messages in browser console
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    if let Err(e) = bridge::init_bridge() {
        web_sys::console::error_1(&format!("Page bridge unavailable: {}", e).into());
    }

    let display_config = DisplayConfig::default();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: display_config.title.clone(),
                        canvas: Some(display_config.canvas_selector.clone()),
                        fit_canvas_to_parent: true,
                        prevent_default_event_handling: false,
                        ..default()
                    }),
                    ..default()
                })
                .set(bevy::log::LogPlugin {
                    level: bevy::log::Level::INFO,
                    ..default()
                }),
        )
        .insert_resource(display_config)
        .add_plugins(ScenePlugin)
        .add_plugins(PageBridgePlugin)
        .run();
}

/// Plugin moving messages between the page and the scene
pub struct PageBridgePlugin;

impl Plugin for PageBridgePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, forward_page_commands)
            .add_systems(PostUpdate, flush_outbound_messages);
    }
}

/// Hand queued page commands to the scene
fn forward_page_commands(mut commands: MessageWriter<PageToScene>) {
    while let Some(cmd) = bridge::poll_page_command() {
        info!("Page command: {:?}", cmd);
        commands.write(cmd);
    }
}

/// Dispatch everything the scene queued for the page this frame
fn flush_outbound_messages(mut outbound: ResMut<OutboundPageMessages>) {
    if outbound.messages.is_empty() {
        return;
    }
    for msg in outbound.drain() {
        if let Err(e) = bridge::send_to_page(&msg) {
            warn!("Dropped scene message {:?}: {}", msg, e);
        }
    }
}
