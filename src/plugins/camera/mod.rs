//! Camera plugin (render-only).
//!
//! A system cannot have `Query<&Transform>` and `Query<&mut Transform>` at the
//! same time unless Bevy can prove those queries are disjoint, so the player
//! and camera queries carry opposite `Without<...>` filters.
//!
//! ```text
//! OnEnter(InGame): spawn MainCamera centered on the player spawn
//! PostUpdate:      follow_player eases toward the player, clamped to the world
//! ```

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::player::Player;

/// Half of the 800x600 window.
pub const HALF_VIEW: Vec2 = Vec2::new(400.0, 300.0);

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            follow_player
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

/// Keep the view inside the world; a world smaller than the view is centered.
pub fn clamp_to_world(target: Vec2, half_view: Vec2, world: Vec2) -> Vec2 {
    let axis = |t: f32, half: f32, size: f32| {
        if size <= half * 2.0 { size * 0.5 } else { t.clamp(half, size - half) }
    };
    Vec2::new(axis(target.x, half_view.x, world.x), axis(target.y, half_view.y, world.y))
}

fn spawn_camera(mut commands: Commands, tunables: Res<Tunables>) {
    let world = Vec2::new(tunables.world.width, tunables.world.height);
    let start = clamp_to_world(tunables.player.spawn, HALF_VIEW, world);
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera { responsiveness: 5.0 },
        FireflyConfig::default(),
        Transform::from_xyz(start.x, start.y, 999.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_player(
    time: Res<Time>,
    tunables: Res<Tunables>,
    q_player: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    mut q_cam: Query<(&mut Transform, &MainCamera), Without<Player>>,
) {
    let Ok(tf_player) = q_player.single() else {
        return;
    };
    let Ok((mut tf_cam, main_cam)) = q_cam.single_mut() else {
        return;
    };

    let world = Vec2::new(tunables.world.width, tunables.world.height);
    let target = clamp_to_world(tf_player.translation.truncate(), HALF_VIEW, world);

    let dt = time.delta_secs();
    let alpha = 1.0 - (-main_cam.responsiveness * dt).exp();
    let current = tf_cam.translation.truncate();
    let next = current + (target - current) * alpha;
    tf_cam.translation.x = next.x;
    tf_cam.translation.y = next.y;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_stays_inside_the_world() {
        let world = Vec2::new(900.0, 900.0);
        assert_eq!(clamp_to_world(Vec2::new(40.0, 80.0), HALF_VIEW, world), Vec2::new(400.0, 300.0));
        assert_eq!(clamp_to_world(Vec2::new(450.0, 450.0), HALF_VIEW, world), Vec2::new(450.0, 450.0));
        assert_eq!(clamp_to_world(Vec2::new(890.0, 890.0), HALF_VIEW, world), Vec2::new(500.0, 600.0));
    }

    #[test]
    fn small_world_is_centered() {
        let world = Vec2::new(600.0, 900.0);
        assert_eq!(clamp_to_world(Vec2::new(10.0, 450.0), HALF_VIEW, world).x, 300.0);
    }
}
