//! HUD plugin.
//!
//! Gameplay writes `UiMessage`s; `apply_ui_messages` folds them into a plain
//! `HudModel` resource. Rendering the model lives in `view`, registered with
//! the render plugins, so the whole HUD state can be asserted on in headless
//! tests.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::progression::PowerUp;
use crate::plugins::skills::Skill;

pub mod view;

#[derive(Message, Debug, Clone, PartialEq)]
pub enum UiMessage {
    /// Remaining share of a skill's recharge, `0.0` when ready.
    CooldownOverlay { skill: Skill, fraction: f32 },
    UsesBadge { skill: Skill, uses: u32 },
    Health { current: u32, max: u32 },
    Experience { level: u32, current: u32, to_next: u32 },
    Combo(u32),
    ComboExpired,
    TurboMeter(f32),
    TurboEnded,
    ShowGameOver,
    ShowLevelUp(Vec<PowerUp>),
    HideLevelUp,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SkillIcon {
    pub overlay: f32,
    pub badge: Option<u32>,
}

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct HudModel {
    pub jump: SkillIcon,
    pub dash: SkillIcon,
    pub projectile: SkillIcon,
    pub health: u32,
    pub max_health: u32,
    pub level: u32,
    pub exp: u32,
    pub exp_to_next: u32,
    /// Hidden when `None`.
    pub combo: Option<u32>,
    pub turbo_meter: Option<f32>,
    pub game_over: bool,
    pub level_up_offer: Option<Vec<PowerUp>>,
}

impl HudModel {
    pub fn icon(&self, skill: Skill) -> &SkillIcon {
        match skill {
            Skill::Jump => &self.jump,
            Skill::Dash => &self.dash,
            Skill::Projectile => &self.projectile,
        }
    }

    fn icon_mut(&mut self, skill: Skill) -> &mut SkillIcon {
        match skill {
            Skill::Jump => &mut self.jump,
            Skill::Dash => &mut self.dash,
            Skill::Projectile => &mut self.projectile,
        }
    }

    pub fn apply(&mut self, msg: &UiMessage) {
        match msg {
            UiMessage::CooldownOverlay { skill, fraction } => {
                self.icon_mut(*skill).overlay = fraction.clamp(0.0, 1.0);
            }
            UiMessage::UsesBadge { skill, uses } => {
                self.icon_mut(*skill).badge = Some(*uses);
            }
            UiMessage::Health { current, max } => {
                self.health = *current;
                self.max_health = *max;
            }
            UiMessage::Experience { level, current, to_next } => {
                self.level = *level;
                self.exp = *current;
                self.exp_to_next = *to_next;
            }
            // A zero combo is a reset, not something to show.
            UiMessage::Combo(0) | UiMessage::ComboExpired => self.combo = None,
            UiMessage::Combo(n) => self.combo = Some(*n),
            UiMessage::TurboMeter(f) => self.turbo_meter = Some(f.clamp(0.0, 1.0)),
            UiMessage::TurboEnded => self.turbo_meter = None,
            UiMessage::ShowGameOver => self.game_over = true,
            UiMessage::ShowLevelUp(offer) => self.level_up_offer = Some(offer.clone()),
            UiMessage::HideLevelUp => self.level_up_offer = None,
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_message::<UiMessage>();
    app.init_resource::<HudModel>();

    app.add_systems(OnEnter(GameState::InGame), reset_hud);
    app.add_systems(PostUpdate, apply_ui_messages);
}

fn reset_hud(mut hud: ResMut<HudModel>) {
    *hud = HudModel::default();
}

pub fn apply_ui_messages(mut reader: MessageReader<UiMessage>, mut hud: ResMut<HudModel>) {
    for msg in reader.read() {
        hud.apply(msg);
    }
}

#[cfg(test)]
mod tests;
