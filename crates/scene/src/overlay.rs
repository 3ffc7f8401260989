//! On-screen instructions and the weight readout panel

use bevy::prelude::*;
use deck::{Readout, StressBand};

use crate::bridge::BridgeState;
use crate::protocol::{OutboundPageMessages, SceneToPage};

/// Centered panel showing the last touched weight
#[derive(Component)]
pub struct ReadoutPanel;

/// "Weight: N%" line, tinted by band
#[derive(Component)]
pub struct ReadoutHeadline;

/// Band label line
#[derive(Component)]
pub struct ReadoutStatus;

/// Top-left help panel
#[derive(Component)]
pub struct InstructionsPanel;

const PANEL_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.7);

const INSTRUCTIONS: &[&str] = &[
    "Drag a gold sphere up to add weight",
    "Drag it down to remove weight",
    "Scroll to zoom in/out",
    "Right-drag to rotate the view",
];

const COLOR_GUIDE: &[(StressBand, &str)] = &[
    (StressBand::Safe, "Green = low stress (Safe)"),
    (StressBand::Warning, "Orange = Warning"),
    (StressBand::Danger, "Red = high stress (Danger!)"),
];

/// Display color of a stress band
pub fn band_color(band: StressBand) -> Color {
    let [r, g, b] = band.rgb8();
    Color::srgb_u8(r, g, b)
}

pub struct OverlayPlugin;

impl Plugin for OverlayPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_instructions, setup_readout));
    }
}

fn setup_instructions(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::all(Val::Px(15.0)),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(5.0),
                ..default()
            },
            BackgroundColor(PANEL_BACKGROUND),
            InstructionsPanel,
        ))
        .with_children(|panel| {
            panel.spawn((
                Text::new("Bridge Stress Simulation"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
            for line in INSTRUCTIONS {
                panel.spawn((
                    Text::new(format!("- {}", line)),
                    TextFont {
                        font_size: 14.0,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            }
            for (band, line) in COLOR_GUIDE {
                panel.spawn((
                    Text::new(*line),
                    TextFont {
                        font_size: 14.0,
                        ..default()
                    },
                    TextColor(band_color(*band)),
                ));
            }
        });
}

fn setup_readout(mut commands: Commands) {
    // Full-screen container keeps the panel centered
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            Visibility::Hidden,
            ReadoutPanel,
        ))
        .with_children(|container| {
            container
                .spawn((
                    Node {
                        padding: UiRect::all(Val::Px(15.0)),
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        row_gap: Val::Px(5.0),
                        ..default()
                    },
                    BackgroundColor(PANEL_BACKGROUND),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new(Readout::hidden().headline()),
                        TextFont {
                            font_size: 24.0,
                            ..default()
                        },
                        TextColor(band_color(StressBand::Safe)),
                        ReadoutHeadline,
                    ));
                    panel.spawn((
                        Text::new(StressBand::Safe.label()),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                        ReadoutStatus,
                    ));
                });
        });
}

/// Mirror the engine's readout on screen and report changes to the page
pub(crate) fn sync_readout(
    bridge: Res<BridgeState>,
    mut shown: Local<Option<Readout>>,
    mut panel: Query<&mut Visibility, With<ReadoutPanel>>,
    mut headline: Query<(&mut Text, &mut TextColor), (With<ReadoutHeadline>, Without<ReadoutStatus>)>,
    mut status: Query<&mut Text, (With<ReadoutStatus>, Without<ReadoutHeadline>)>,
    mut outbound: ResMut<OutboundPageMessages>,
) {
    let readout = bridge.readout();
    if *shown == Some(readout) {
        return;
    }
    *shown = Some(readout);

    for mut visibility in panel.iter_mut() {
        *visibility = if readout.visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
    for (mut text, mut color) in headline.iter_mut() {
        **text = readout.headline();
        color.0 = band_color(readout.band);
    }
    for mut text in status.iter_mut() {
        **text = readout.band.label().to_string();
    }

    outbound.send(SceneToPage::readout(readout));
}
