//! Player-versus-entity collision resolution
//!
//! Runs once per tick after physics and position sync. Each category is
//! walked in reverse index order so hits and offscreen entities can be
//! removed in place.

use super::entity::{ActiveEntities, EndingFlag};
use super::health::HealthManager;
use super::player::Player;
use super::score::ScoreManager;
use super::state::GameEvent;
use crate::tuning::Tuning;

/// Mutable session pieces a collision can affect
pub struct CollisionTargets<'a> {
    pub player: &'a mut Player,
    pub score: &'a mut ScoreManager,
    pub health: &'a mut HealthManager,
    pub events: &'a mut Vec<GameEvent>,
}

/// Apply every player collision for this tick and prune offscreen entities.
pub fn resolve(
    active: &mut ActiveEntities,
    targets: CollisionTargets<'_>,
    tuning: &Tuning,
    now_ms: f64,
) {
    let CollisionTargets {
        player,
        score,
        health,
        events,
    } = targets;

    for i in (0..active.obstacles.len()).rev() {
        let obstacle = &active.obstacles[i];
        if player.collides_with(obstacle) {
            let destroyed = player.is_giant();
            if destroyed {
                score.add(tuning.giant_kill_bonus, now_ms);
            } else {
                health.take_damage(tuning.obstacle_damage);
            }
            log::debug!("Obstacle {} hit (destroyed: {})", obstacle.id, destroyed);
            events.push(GameEvent::ObstacleHit { destroyed });
            active.obstacles.remove(i);
        } else if obstacle.is_offscreen() {
            active.obstacles.remove(i);
        }
    }

    for i in (0..active.power_ups.len()).rev() {
        let item = &active.power_ups[i];
        if player.collides_with(item) {
            log::debug!("Power-up {} collected", item.id);
            player.activate_giant(tuning.giant_duration_ticks);
            events.push(GameEvent::PowerUpCollected);
            active.power_ups.remove(i);
        } else if item.is_offscreen() {
            active.power_ups.remove(i);
        }
    }

    for i in (0..active.health_items.len()).rev() {
        let item = &active.health_items[i];
        if player.collides_with(item) {
            log::debug!("Health item {} collected", item.id);
            health.heal(tuning.heal_amount);
            events.push(GameEvent::HealthRecovered);
            active.health_items.remove(i);
        } else if item.is_offscreen() {
            active.health_items.remove(i);
        }
    }

    active.platforms.retain(|p| !p.is_offscreen());
}

/// Whether the player touches the flag's (inset) hitbox
pub fn reached_flag(player: &Player, flag: &EndingFlag) -> bool {
    player.collides_with(flag)
}
