//! Collision layers.
//!
//! These double as the body "labels" gameplay code asks about
//! ("is the player touching a `Floor` body?").

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    Floor,
    Wall,
    Player,
    PlayerSensor,
    Enemy,
    AttackHitbox,
    Projectile,
}

#[inline]
pub fn is_in_layer(layers: &CollisionLayers, layer: Layer) -> bool {
    layers.memberships.has_all(layer)
}

/// Membership kept, filters cleared: the collider stops producing contacts
/// without any structural change to the entity.
#[inline]
pub fn non_interacting(layer: Layer) -> CollisionLayers {
    CollisionLayers::new(layer, [] as [Layer; 0])
}
