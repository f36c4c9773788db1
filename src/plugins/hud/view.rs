//! HUD view (render-only): two text nodes mirroring `HudModel`.
//!
//! ```text
//! Startup:           spawn the HUD root (status line + centred overlay)
//! OnEnter(GameOver): spawn a plain UI camera, the world camera is gone
//! PostUpdate:        refresh_hud_view after apply_ui_messages, on change
//! ```

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use super::{HudModel, SkillIcon, apply_ui_messages};
use crate::common::state::GameState;

#[derive(Component)]
pub struct HudStatusText;

#[derive(Component)]
pub struct HudOverlayText;

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_hud_view)
        .add_systems(OnEnter(GameState::GameOver), spawn_overlay_camera)
        .add_systems(
            PostUpdate,
            refresh_hud_view
                .after(apply_ui_messages)
                .run_if(resource_changed::<HudModel>),
        );
}

fn spawn_hud_view(mut commands: Commands) {
    commands.spawn((
        Name::new("Hud"),
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        children![
            (
                Name::new("HudStatus"),
                HudStatusText,
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(8.0),
                    left: Val::Px(8.0),
                    ..default()
                },
                Text::default(),
                TextFont { font_size: 16.0, ..default() },
            ),
            (
                Name::new("HudOverlay"),
                HudOverlayText,
                Text::default(),
                TextFont { font_size: 28.0, ..default() },
                Visibility::Hidden,
            ),
        ],
    ));
}

fn spawn_overlay_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("OverlayCamera"),
        Camera2d,
        DespawnOnExit(GameState::GameOver),
    ));
}

fn icon_label(name: &str, icon: &SkillIcon) -> String {
    let mut label = name.to_string();
    if let Some(uses) = icon.badge {
        label.push_str(&format!(" x{uses}"));
    }
    if icon.overlay > 0.0 {
        label.push_str(&format!(" ({:.0}%)", icon.overlay * 100.0));
    }
    label
}

/// One line of vitals, progress and skill state.
pub fn status_line(hud: &HudModel) -> String {
    let mut line = format!(
        "HP {}/{}  Lv {}  XP {}/{}",
        hud.health, hud.max_health, hud.level, hud.exp, hud.exp_to_next
    );
    if let Some(combo) = hud.combo {
        line.push_str(&format!("  Combo x{combo}"));
    }
    if let Some(meter) = hud.turbo_meter {
        line.push_str(&format!("  Turbo {:.0}%", meter * 100.0));
    }
    for (name, icon) in [("Jump", &hud.jump), ("Dash", &hud.dash), ("Shot", &hud.projectile)] {
        line.push_str("  ");
        line.push_str(&icon_label(name, icon));
    }
    line
}

/// The centred overlay, if one is up. Game over wins over a pending offer.
pub fn overlay_text(hud: &HudModel) -> Option<String> {
    if hud.game_over {
        return Some("Game over\nPress Enter to restart".to_string());
    }
    let offer = hud.level_up_offer.as_ref()?;
    let mut text = format!("Level {}! Choose a power-up", hud.level);
    for (i, power_up) in offer.iter().enumerate() {
        text.push_str(&format!("\n{}) {}", i + 1, power_up.description()));
    }
    Some(text)
}

pub fn refresh_hud_view(
    hud: Res<HudModel>,
    mut q_status: Query<&mut Text, (With<HudStatusText>, Without<HudOverlayText>)>,
    mut q_overlay: Query<(&mut Text, &mut Visibility), With<HudOverlayText>>,
) {
    if let Ok(mut text) = q_status.single_mut() {
        text.0 = status_line(&hud);
    }
    let Ok((mut text, mut visibility)) = q_overlay.single_mut() else {
        return;
    };
    match overlay_text(&hud) {
        Some(overlay) => {
            text.0 = overlay;
            *visibility = Visibility::Inherited;
        }
        None => *visibility = Visibility::Hidden,
    }
}
