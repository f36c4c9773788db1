//! Skills plugin: charge cooldowns for double jump, dash and projectile.
//!
//! The charges themselves are plain data (`CooldownResource`); this module
//! only ticks them once per fixed step and forwards what the action icons
//! should display to the HUD.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::SkillTunables;
use crate::plugins::hud::UiMessage;
use crate::plugins::player::Player;

pub mod cooldown;

pub use cooldown::{CooldownReport, CooldownResource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Skill {
    Jump,
    Dash,
    Projectile,
}

impl Skill {
    pub const ALL: [Skill; 3] = [Skill::Jump, Skill::Dash, Skill::Projectile];
}

/// The player's three repeatable skills. `jump` gates the double jump only;
/// the ground jump is free.
#[derive(Component, Debug, Clone)]
pub struct PlayerSkills {
    pub jump: CooldownResource,
    pub dash: CooldownResource,
    pub projectile: CooldownResource,
}

impl PlayerSkills {
    pub fn new(t: &SkillTunables) -> Self {
        Self {
            jump: CooldownResource::new(Skill::Jump, t.jump_cooldown),
            dash: CooldownResource::new(Skill::Dash, t.dash_cooldown),
            projectile: CooldownResource::new(Skill::Projectile, t.projectile_cooldown),
        }
    }

    pub fn get(&self, skill: Skill) -> &CooldownResource {
        match skill {
            Skill::Jump => &self.jump,
            Skill::Dash => &self.dash,
            Skill::Projectile => &self.projectile,
        }
    }

    pub fn get_mut(&mut self, skill: Skill) -> &mut CooldownResource {
        match skill {
            Skill::Jump => &mut self.jump,
            Skill::Dash => &mut self.dash,
            Skill::Projectile => &mut self.projectile,
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        tick_skill_cooldowns
            .before(crate::plugins::player::drive_player_state)
            .run_if(in_state(GameState::InGame)),
    );
}

/// Tick every skill and publish icon updates.
pub fn tick_skill_cooldowns(
    time: Res<Time<Fixed>>,
    mut q: Query<&mut PlayerSkills, With<Player>>,
    mut ui: MessageWriter<UiMessage>,
) {
    let dt = time.delta();
    for mut skills in &mut q {
        for skill in Skill::ALL {
            let report = skills.get_mut(skill).update(dt);
            if let Some(fraction) = report.overlay {
                ui.write(UiMessage::CooldownOverlay { skill, fraction });
            }
            if let Some(uses) = report.badge {
                ui.write(UiMessage::UsesBadge { skill, uses });
            }
            if report.recharged > 0 {
                debug!("{skill:?} recharged {} use(s)", report.recharged);
            }
        }
    }
}
