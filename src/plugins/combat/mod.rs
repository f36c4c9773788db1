//! Combat plugin: melee swings against monsters and monster contact damage.
//!
//! ```text
//! FixedUpdate
//!   drive_player_state ──► sync_attack_hitbox
//!                           (size/offset/layers follow the active swing)
//! FixedPostUpdate (after physics)
//!   resolve_swing_hits      hitbox CollidingEntities ─► try_apply_hit ─► MonsterKilled
//!   resolve_touch_damage    touch sensor CollidingEntities ─► try_touch_damage
//! ```
//!
//! The hit rules themselves are plain functions in `resolver`; the systems
//! only gather entities and publish what happened.

use avian2d::collision::narrow_phase::CollisionEventSystems;
use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::facing::Facing;
use crate::common::layers::{Layer, non_interacting};
use crate::common::rng::GameRng;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::combo::ComboEngine;
use crate::plugins::enemies::{HitFlash, MonsterAgent, MonsterKilled};
use crate::plugins::hud::UiMessage;
use crate::plugins::player::health::{Invincibility, PlayerHealth};
use crate::plugins::player::{Player, PlayerParts, PlayerStateMachine, PlayerStats};
use crate::plugins::presentation::{NumberStyle, PresentationRequest, SoundCue};

pub mod resolver;
pub mod swing;

pub use resolver::{Attacker, HitReport, touch_damage, try_apply_hit, try_touch_damage};
pub use swing::{HitLedger, Swing, SwingKind};

/// The player's melee hitbox collider (a child sensor).
#[derive(Component, Debug, Default)]
pub struct AttackHitbox {
    current: Option<SwingKind>,
}

/// The player's body sensor that notices monster contact.
#[derive(Component, Debug, Default)]
pub struct PlayerTouchSensor;

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        sync_attack_hitbox
            .after(crate::plugins::player::drive_player_state)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedPostUpdate,
        (resolve_swing_hits, resolve_touch_damage)
            .after(CollisionEventSystems)
            .run_if(in_state(GameState::InGame)),
    );
}

#[inline]
pub fn active_hitbox_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::AttackHitbox, [Layer::Enemy])
}

/// Where a hit landed and how it should look.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Impact {
    pub monster: Entity,
    pub position: Vec2,
    pub clip: &'static str,
    pub facing: Facing,
    pub turbocharged: bool,
}

/// Apply a resolved hit to the monster's body and publish it.
pub(crate) fn land_hit(
    report: &HitReport,
    impact: Impact,
    velocity: &mut LinearVelocity,
    flash: &mut HitFlash,
    fx: &mut MessageWriter<PresentationRequest>,
    kills: &mut MessageWriter<MonsterKilled>,
) {
    velocity.0 = report.knockback;
    flash.trigger();

    let style = if impact.turbocharged { NumberStyle::TurboHit } else { NumberStyle::Hit };
    fx.write(PresentationRequest::FloatingNumber {
        position: impact.position + Vec2::Y * 20.0,
        value: report.damage,
        style,
    });
    fx.write(PresentationRequest::HitEffect {
        position: impact.position,
        clip: impact.clip,
        flip_x: impact.facing.flip_x(),
    });
    fx.write(PresentationRequest::Sound(SoundCue::new("hit")));

    if let Some(exp_reward) = report.killed() {
        debug!("Monster {:?} killed ({} exp)", impact.monster, exp_reward);
        kills.write(MonsterKilled {
            monster: impact.monster,
            exp_reward,
            position: impact.position,
        });
    }
}

/// Shape, place and arm the hitbox for whatever swing is active.
pub fn sync_attack_hitbox(
    q_player: Query<(&PlayerStateMachine, &Facing, &PlayerParts), With<Player>>,
    mut q_hitbox: Query<(&mut AttackHitbox, &mut Collider, &mut CollisionLayers, &mut Transform)>,
) {
    let Ok((machine, facing, parts)) = q_player.single() else {
        return;
    };
    let Ok((mut hitbox, mut collider, mut layers, mut tf)) = q_hitbox.get_mut(parts.hitbox) else {
        return;
    };

    let active = machine
        .active_swing()
        .filter(|swing| swing.is_hitbox_active())
        .map(Swing::kind);

    let Some(kind) = active else {
        if hitbox.current.take().is_some() {
            *layers = non_interacting(Layer::AttackHitbox);
        }
        return;
    };

    let (size, offset) = kind.hitbox();
    if hitbox.current != Some(kind) {
        *collider = Collider::rectangle(size.x, size.y);
        *layers = active_hitbox_layers();
        hitbox.current = Some(kind);
    }
    let x = facing.sign() * offset.x;
    if tf.translation.x != x || tf.translation.y != offset.y {
        tf.translation.x = x;
        tf.translation.y = offset.y;
    }
}

/// Damage every monster inside the active swing's hitbox, once per swing.
pub fn resolve_swing_hits(
    tunables: Res<Tunables>,
    mut rng: ResMut<GameRng>,
    mut q_player: Query<
        (&mut PlayerStateMachine, &Facing, &PlayerStats, &ComboEngine, &PlayerParts),
        With<Player>,
    >,
    q_hitbox: Query<&CollidingEntities, With<AttackHitbox>>,
    mut q_monsters: Query<(&mut MonsterAgent, &mut LinearVelocity, &mut HitFlash, &Transform)>,
    mut fx: MessageWriter<PresentationRequest>,
    mut kills: MessageWriter<MonsterKilled>,
) {
    let Ok((mut machine, facing, stats, combo, parts)) = q_player.single_mut() else {
        return;
    };
    let Some(swing) = machine.active_swing_mut() else {
        return;
    };
    if !swing.is_hitbox_active() {
        return;
    }
    let Ok(touching) = q_hitbox.get(parts.hitbox) else {
        return;
    };

    let kind = swing.kind();
    let boost = combo.boost();
    for &target in touching.iter() {
        let Ok((mut agent, mut vel, mut flash, tf)) = q_monsters.get_mut(target) else {
            continue;
        };

        let attacker = Attacker {
            base_damage: rng.roll(stats.min_damage, stats.max_damage),
            damage_multiplier: boost.damage,
            turbocharged: combo.is_turbocharged(),
            facing: *facing,
            knockback: tunables.combat.knockback,
        };
        let Some(report) = try_apply_hit(swing.ledger_mut(), &attacker, target, &mut agent) else {
            continue;
        };

        let impact = Impact {
            monster: target,
            position: tf.translation.truncate(),
            clip: kind.hit_animation(),
            facing: *facing,
            turbocharged: attacker.turbocharged,
        };
        land_hit(&report, impact, &mut vel, &mut flash, &mut fx, &mut kills);
    }
}

/// A live monster overlapping the player hurts them, unless invincible.
pub fn resolve_touch_damage(
    tunables: Res<Tunables>,
    mut q_player: Query<
        (Entity, &mut PlayerHealth, &mut Invincibility, &PlayerParts, &Transform),
        With<Player>,
    >,
    q_sensor: Query<&CollidingEntities, With<PlayerTouchSensor>>,
    q_monsters: Query<&MonsterAgent>,
    mut fx: MessageWriter<PresentationRequest>,
    mut ui: MessageWriter<UiMessage>,
) {
    let Ok((player, mut health, mut invincibility, parts, tf)) = q_player.single_mut() else {
        return;
    };
    let Ok(touching) = q_sensor.get(parts.touch_sensor) else {
        return;
    };

    for &monster in touching.iter() {
        let Ok(agent) = q_monsters.get(monster) else {
            continue;
        };
        if !agent.is_hitbox_active() {
            continue;
        }
        let Some(damage) = try_touch_damage(
            &mut health,
            &mut invincibility,
            agent.stats().touch_damage_pct,
            tunables.combat.damage_invincibility,
        ) else {
            break;
        };

        debug!("Player took {damage} from {:?}", agent.kind());
        fx.write(PresentationRequest::FloatingNumber {
            position: tf.translation.truncate() + Vec2::Y * 30.0,
            value: damage,
            style: NumberStyle::PlayerHurt,
        });
        fx.write(PresentationRequest::Sound(SoundCue::new("hurt")));
        fx.write(PresentationRequest::Animation { entity: player, clip: "hurt" });
        ui.write(UiMessage::Health { current: health.current(), max: health.max() });
        break;
    }
}
