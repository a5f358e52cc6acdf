use crate::game_logic::{BoostText, ClockText, RaceSimulation, StatusText};
use crate::race_plugin::LatestFrame;
use bevy::prelude::*;

const HUD_FONT_SIZE: f32 = 22.0;

fn hud_line(top: f32) -> Node {
    Node {
        position_type: PositionType::Absolute,
        left: Val::Px(20.0),
        top: Val::Px(top),
        ..default()
    }
}

pub fn spawn_hud(mut commands: Commands) {
    let font = TextFont {
        font_size: HUD_FONT_SIZE,
        ..default()
    };

    commands.spawn((
        Text::new(""),
        font.clone(),
        TextColor(Color::BLACK),
        hud_line(20.0),
        StatusText,
    ));
    commands.spawn((
        Text::new(""),
        font.clone(),
        TextColor(Color::BLACK),
        hud_line(50.0),
        BoostText,
    ));
    commands.spawn((
        Text::new(""),
        font,
        TextColor(Color::BLACK),
        hud_line(80.0),
        ClockText,
    ));
}

pub fn update_hud(
    latest: Res<LatestFrame>,
    sim: Res<RaceSimulation>,
    mut status: Single<&mut Text, (With<StatusText>, Without<BoostText>, Without<ClockText>)>,
    mut boost: Single<&mut Text, (With<BoostText>, Without<StatusText>, Without<ClockText>)>,
    mut clock: Single<&mut Text, (With<ClockText>, Without<StatusText>, Without<BoostText>)>,
) {
    let frame = &latest.0;

    status.0 = if frame.status.is_empty() {
        String::new()
    } else {
        format!("{}   [CPU: {}]", frame.status, sim.config.difficulty.as_str())
    };
    boost.0 = frame.boost_bar.clone();
    clock.0 = format!("Time {:>5.1} / {:.0}", frame.clock, sim.config.time_limit);
}
