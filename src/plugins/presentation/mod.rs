//! Presentation plugin: turns gameplay requests into things on screen.
//!
//! Gameplay code never touches sprites, text or audio directly. It writes a
//! `PresentationRequest` and moves on; this module is the single consumer.
//!
//! ```text
//! FixedUpdate / FixedPostUpdate        PostUpdate
//!   player states  ─┐
//!   combat hits    ─┼─► PresentationRequest ─► apply_presentation_requests
//!   touch damage   ─┘                           ├─ FloatingText (rise + fade)
//!                                               ├─ HitSpark (short-lived)
//!                                               ├─ CurrentAnimation / Sprite tint
//!                                               └─ sound cue (logged)
//! ```
//!
//! There are no assets in this project, so animation clips and sound keys
//! are carried as names. A future sprite-sheet or audio layer reads them from
//! `CurrentAnimation` and `SoundCue`.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberStyle {
    Hit,
    TurboHit,
    PlayerHurt,
}

impl NumberStyle {
    fn color(self) -> Color {
        match self {
            Self::Hit => Color::srgb(1.0, 1.0, 1.0),
            Self::TurboHit => Color::srgb(1.0, 0.75, 0.1),
            Self::PlayerHurt => Color::srgb(1.0, 0.25, 0.25),
        }
    }

    fn font_size(self) -> f32 {
        match self {
            Self::TurboHit => 26.0,
            Self::Hit | Self::PlayerHurt => 20.0,
        }
    }
}

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub enum PresentationRequest {
    FloatingNumber { position: Vec2, value: u32, style: NumberStyle },
    HitEffect { position: Vec2, clip: &'static str, flip_x: bool },
    Sound(SoundCue),
    Animation { entity: Entity, clip: &'static str },
    StopAnimation { entity: Entity },
    /// `None` restores the sprite's base colour.
    Tint { entity: Entity, color: Option<Color> },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoundCue {
    pub key: &'static str,
    pub volume: f32,
}

impl SoundCue {
    pub const fn new(key: &'static str) -> Self {
        Self { key, volume: 1.0 }
    }
}

/// The clip an entity is currently showing.
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct CurrentAnimation {
    pub clip: Option<&'static str>,
}

impl CurrentAnimation {
    pub fn playing(clip: &'static str) -> Self {
        Self { clip: Some(clip) }
    }
}

/// Colour a sprite returns to when a tint is cleared.
#[derive(Component, Debug, Clone, Copy)]
pub struct BaseColor(pub Color);

#[derive(Component, Debug)]
pub struct FloatingText {
    timer: Timer,
    origin_y: f32,
}

#[derive(Component, Debug)]
pub struct HitSpark {
    pub clip: &'static str,
    timer: Timer,
}

const FLOAT_RISE: f32 = 50.0;
const FLOAT_SECS: f32 = 2.0;
const SPARK_SECS: f32 = 0.25;

pub fn plugin(app: &mut App) {
    app.add_message::<PresentationRequest>();

    app.add_systems(
        PostUpdate,
        apply_presentation_requests.run_if(in_state(GameState::InGame)),
    );
    app.add_systems(
        Update,
        (animate_floating_text, expire_hit_sparks).run_if(in_state(GameState::InGame)),
    );
}

pub fn apply_presentation_requests(
    mut commands: Commands,
    mut requests: MessageReader<PresentationRequest>,
    mut q_anim: Query<&mut CurrentAnimation>,
    mut q_sprite: Query<(&mut Sprite, Option<&BaseColor>)>,
) {
    for req in requests.read() {
        match *req {
            PresentationRequest::FloatingNumber { position, value, style } => {
                commands.spawn((
                    Name::new("FloatingNumber"),
                    FloatingText {
                        timer: Timer::from_seconds(FLOAT_SECS, TimerMode::Once),
                        origin_y: position.y,
                    },
                    Text2d::new(value.to_string()),
                    TextFont::from_font_size(style.font_size()),
                    TextColor(style.color()),
                    Transform::from_xyz(position.x, position.y, 50.0),
                    DespawnOnExit(GameState::InGame),
                ));
            }
            PresentationRequest::HitEffect { position, clip, flip_x } => {
                commands.spawn((
                    Name::new("HitSpark"),
                    HitSpark {
                        clip,
                        timer: Timer::from_seconds(SPARK_SECS, TimerMode::Once),
                    },
                    Sprite {
                        color: Color::srgba(1.0, 0.95, 0.7, 0.9),
                        custom_size: Some(Vec2::splat(18.0)),
                        flip_x,
                        ..default()
                    },
                    Transform::from_xyz(position.x, position.y, 40.0),
                    DespawnOnExit(GameState::InGame),
                ));
            }
            PresentationRequest::Sound(cue) => {
                debug!("sound: {} ({:.2})", cue.key, cue.volume);
            }
            PresentationRequest::Animation { entity, clip } => {
                if let Ok(mut anim) = q_anim.get_mut(entity) {
                    if anim.clip != Some(clip) {
                        anim.clip = Some(clip);
                    }
                }
            }
            PresentationRequest::StopAnimation { entity } => {
                if let Ok(mut anim) = q_anim.get_mut(entity) {
                    anim.clip = None;
                }
            }
            PresentationRequest::Tint { entity, color } => {
                let Ok((mut sprite, base)) = q_sprite.get_mut(entity) else {
                    continue;
                };
                match (color, base) {
                    (Some(c), _) => sprite.color = c,
                    (None, Some(base)) => sprite.color = base.0,
                    (None, None) => sprite.color = Color::WHITE,
                }
            }
        }
    }
}

/// Rise and fade, then despawn.
pub fn animate_floating_text(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut FloatingText, &mut Transform, &mut TextColor)>,
) {
    for (e, mut ft, mut tf, mut color) in &mut q {
        ft.timer.tick(time.delta());
        let t = ft.timer.fraction();

        // Ease-out rise, exponential-in fade.
        tf.translation.y = ft.origin_y + FLOAT_RISE * (1.0 - (1.0 - t) * (1.0 - t));
        let alpha = if t <= 0.0 { 1.0 } else { 1.0 - 2f32.powf(10.0 * (t - 1.0)) };
        color.0.set_alpha(alpha.clamp(0.0, 1.0));

        if ft.timer.is_finished() {
            commands.entity(e).despawn();
        }
    }
}

fn expire_hit_sparks(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut HitSpark, &mut Transform)>,
) {
    for (e, mut spark, mut tf) in &mut q {
        spark.timer.tick(time.delta());
        tf.scale = Vec3::splat(1.0 + spark.timer.fraction());
        if spark.timer.is_finished() {
            commands.entity(e).despawn();
        }
    }
}

#[cfg(test)]
mod tests;
