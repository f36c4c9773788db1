//! Progression plugin: experience from kills, level-ups and power-up picks.
//!
//! ```text
//! FixedPostUpdate   MonsterKilled ─► award_experience ─► PendingLevelUps
//! Update (Running)  open_level_up ─► LevelUpOffer + Simulation::ChoosingPowerUp
//! Update (Choosing) choose_power_up (keys 1/2/3) ─► PowerUp::apply ─► Running
//! ```
//!
//! While choosing, virtual time is paused, which also stops the fixed step.

use bevy::prelude::*;

use crate::common::rng::GameRng;
use crate::common::state::{GameState, Simulation};
use crate::plugins::combo::ComboEngine;
use crate::plugins::enemies::MonsterKilled;
use crate::plugins::hud::UiMessage;
use crate::plugins::player::health::PlayerHealth;
use crate::plugins::player::{Player, PlayerStats};
use crate::plugins::skills::PlayerSkills;

pub mod experience;
pub mod power_ups;

pub use experience::Experience;
pub use power_ups::{PowerUp, PowerUpTarget};

/// Level-ups earned but not yet offered.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PendingLevelUps(pub u32);

/// The power-ups currently on screen.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct LevelUpOffer(pub Vec<PowerUp>);

const CHOICE_KEYS: [KeyCode; 3] = [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3];

pub fn plugin(app: &mut App) {
    app.init_resource::<PendingLevelUps>()
        .init_resource::<LevelUpOffer>()
        .add_systems(OnEnter(GameState::InGame), reset_progression)
        .add_systems(
            FixedPostUpdate,
            award_experience
                .after(crate::plugins::combat::resolve_swing_hits)
                .after(crate::plugins::projectiles::collision::process_projectile_hits)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(Update, open_level_up.run_if(in_state(Simulation::Running)))
        .add_systems(Update, choose_power_up.run_if(in_state(Simulation::ChoosingPowerUp)))
        .add_systems(OnEnter(Simulation::ChoosingPowerUp), pause_time)
        .add_systems(OnExit(Simulation::ChoosingPowerUp), resume_time);
}

fn reset_progression(
    mut pending: ResMut<PendingLevelUps>,
    mut offer: ResMut<LevelUpOffer>,
    mut ui: MessageWriter<UiMessage>,
) {
    pending.0 = 0;
    offer.0.clear();
    let exp = Experience::new();
    ui.write(UiMessage::Experience {
        level: exp.level(),
        current: exp.current(),
        to_next: exp.to_next(),
    });
}

pub fn award_experience(
    mut kills: MessageReader<MonsterKilled>,
    mut q: Query<&mut Experience, With<Player>>,
    mut pending: ResMut<PendingLevelUps>,
    mut ui: MessageWriter<UiMessage>,
) {
    let Ok(mut exp) = q.single_mut() else {
        kills.clear();
        return;
    };

    let mut changed = false;
    for kill in kills.read() {
        let levels = exp.gain(kill.exp_reward);
        if levels > 0 {
            info!("Level up: now level {}", exp.level());
            pending.0 += levels;
        }
        changed = true;
    }

    if changed {
        ui.write(UiMessage::Experience {
            level: exp.level(),
            current: exp.current(),
            to_next: exp.to_next(),
        });
    }
}

/// Show one queued level-up and freeze the simulation behind it.
pub fn open_level_up(
    mut pending: ResMut<PendingLevelUps>,
    mut offer: ResMut<LevelUpOffer>,
    mut rng: ResMut<GameRng>,
    mut next: ResMut<NextState<Simulation>>,
    mut ui: MessageWriter<UiMessage>,
) {
    if pending.0 == 0 {
        return;
    }
    pending.0 -= 1;
    offer.0 = PowerUp::offer(&mut rng);
    debug!("Offering {:?}", offer.0);
    ui.write(UiMessage::ShowLevelUp(offer.0.clone()));
    next.set(Simulation::ChoosingPowerUp);
}

pub fn choose_power_up(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mut offer: ResMut<LevelUpOffer>,
    mut q: Query<
        (&mut PlayerSkills, &mut PlayerHealth, &mut PlayerStats, &mut ComboEngine),
        With<Player>,
    >,
    mut next: ResMut<NextState<Simulation>>,
    mut ui: MessageWriter<UiMessage>,
) {
    let Some(keys) = keys else {
        return;
    };
    let Some(index) = CHOICE_KEYS.iter().position(|k| keys.just_pressed(*k)) else {
        return;
    };
    let Some(&power_up) = offer.0.get(index) else {
        return;
    };

    if let Ok((mut skills, mut health, mut stats, mut combo)) = q.single_mut() {
        let mut target = PowerUpTarget {
            skills: &mut *skills,
            health: &mut *health,
            stats: &mut *stats,
            combo: &mut *combo,
        };
        power_up.apply(&mut target);
        info!("Picked {power_up:?}: {}", power_up.description());
        ui.write(UiMessage::Health { current: health.current(), max: health.max() });
    }

    offer.0.clear();
    ui.write(UiMessage::HideLevelUp);
    next.set(Simulation::Running);
}

fn pause_time(mut time: ResMut<Time<Virtual>>) {
    time.pause();
}

fn resume_time(mut time: ResMut<Time<Virtual>>) {
    time.unpause();
}

#[cfg(test)]
mod tests;
