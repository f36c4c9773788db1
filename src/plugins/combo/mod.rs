//! Combo plugin: counts kills, runs turbocharge, and feeds the combo HUD.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::enemies::MonsterKilled;
use crate::plugins::hud::UiMessage;
use crate::plugins::player::Player;

pub mod engine;

pub use engine::{ComboEngine, ComboEvent, TurboBoost};

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        tick_combo
            .before(crate::plugins::player::drive_player_state)
            .run_if(in_state(GameState::InGame)),
    );
    app.add_systems(
        FixedPostUpdate,
        count_kills
            .after(crate::plugins::combat::resolve_swing_hits)
            .after(crate::plugins::projectiles::collision::process_projectile_hits)
            .run_if(in_state(GameState::InGame)),
    );
}

fn publish(event: ComboEvent, ui: &mut MessageWriter<UiMessage>) {
    match event {
        ComboEvent::Counted(n) => {
            ui.write(UiMessage::Combo(n));
        }
        ComboEvent::TurboStarted { duration } => {
            info!("Turbocharge for {:.1}s", duration.as_secs_f32());
            ui.write(UiMessage::Combo(0));
            ui.write(UiMessage::TurboMeter(1.0));
        }
        ComboEvent::TurboMeter(fraction) => {
            ui.write(UiMessage::TurboMeter(fraction));
        }
        ComboEvent::TurboEnded => {
            debug!("Turbocharge ended");
            ui.write(UiMessage::TurboEnded);
        }
        ComboEvent::Expired => {
            ui.write(UiMessage::ComboExpired);
        }
    }
}

/// Every kill credited this tick bumps the player's combo.
pub fn count_kills(
    mut kills: MessageReader<MonsterKilled>,
    mut q: Query<&mut ComboEngine, With<Player>>,
    mut ui: MessageWriter<UiMessage>,
) {
    let Ok(mut engine) = q.single_mut() else {
        kills.clear();
        return;
    };
    for _ in kills.read() {
        let event = engine.on_kill();
        publish(event, &mut ui);
    }
}

pub fn tick_combo(
    time: Res<Time<Fixed>>,
    mut q: Query<&mut ComboEngine, With<Player>>,
    mut ui: MessageWriter<UiMessage>,
) {
    for mut engine in &mut q {
        if let Some(event) = engine.tick(time.delta()) {
            publish(event, &mut ui);
        }
    }
}

#[cfg(test)]
mod tests;
