//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically.

use serde::{Deserialize, Serialize};

use super::collision::{self, CollisionTargets};
use super::state::{GameEvent, GamePhase, GameState, LossCause};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Jump pressed since the last tick (edge)
    pub jump: bool,
    /// Down key currently held (level)
    pub down_held: bool,
}

/// What the presentation layer should show after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickStatus {
    Loading,
    Playing,
    WonFlagReached,
    LostFell,
    LostHealthZero,
}

impl From<LossCause> for TickStatus {
    fn from(cause: LossCause) -> Self {
        match cause {
            LossCause::Fell => TickStatus::LostFell,
            LossCause::HealthDepleted => TickStatus::LostHealthZero,
        }
    }
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> TickStatus {
    match state.phase {
        GamePhase::Loading => {
            if !state.assets.is_ready() {
                return TickStatus::Loading;
            }
            log::info!("Assets ready, starting run");
            state.reset();
        }
        GamePhase::Playing => {}
        GamePhase::Celebrating { ticks_left } => {
            let ticks_left = ticks_left.saturating_sub(1);
            if ticks_left == 0 {
                finish_level(state);
            } else {
                state.phase = GamePhase::Celebrating { ticks_left };
            }
            return TickStatus::WonFlagReached;
        }
        GamePhase::Won => return TickStatus::WonFlagReached,
        GamePhase::Lost(cause) => return cause.into(),
    }

    // Input
    if input.jump && state.player.jump() {
        state.push_event(GameEvent::Jumped);
    }
    if input.down_held {
        state.player.start_slide();
    } else {
        state.player.end_slide();
    }

    // Scroll and stream
    state.world.advance();
    let scroll = state.world.scroll_offset();
    let admitted = state.spawner.admit(
        &state.level,
        scroll,
        &state.tuning,
        &state.catalog,
        &mut state.active,
    );
    if admitted > 0 {
        log::debug!("Admitted {} entities at scroll {}", admitted, scroll);
    }
    state.active.sync_screen_positions(scroll);
    state.flag.sync_screen_position(scroll);

    // Physics
    if state.player.update(&state.active.platforms) {
        state.push_event(GameEvent::GiantExpired);
    }
    // A held key starts the slide as soon as the player touches down
    if input.down_held {
        state.player.start_slide();
    }

    // Passive score
    state.time_ticks += 1;
    let interval = u64::from(state.tuning.score_interval_ticks);
    if interval > 0 && state.time_ticks % interval == 0 {
        let now_ms = state.now_ms();
        state.score.add(1, now_ms);
    }

    // Collisions
    let now_ms = state.now_ms();
    let targets = CollisionTargets {
        player: &mut state.player,
        score: &mut state.score,
        health: &mut state.health,
        events: &mut state.events,
    };
    collision::resolve(&mut state.active, targets, &state.tuning, now_ms);
    let flag_reached = collision::reached_flag(&state.player, &state.flag);

    state
        .pursuer
        .update(state.health.fraction(), state.player.x);

    // Losing overrides reaching the flag on the same tick
    let loss = if state.player.is_dead(state.tuning.viewport_height) {
        Some(LossCause::Fell)
    } else if state.health.is_depleted() {
        Some(LossCause::HealthDepleted)
    } else {
        None
    };

    if let Some(cause) = loss {
        log::info!(
            "Game over ({:?}) at scroll {}, score {}",
            cause,
            scroll,
            state.score.score()
        );
        state.phase = GamePhase::Lost(cause);
        state.push_event(GameEvent::GameOver(cause));
        return cause.into();
    }

    if flag_reached {
        log::info!("Flag reached, score {}", state.score.score());
        state.push_event(GameEvent::FlagReached);
        let ticks_left = state.tuning.celebration_ticks;
        if ticks_left == 0 {
            finish_level(state);
        } else {
            state.phase = GamePhase::Celebrating { ticks_left };
        }
        return TickStatus::WonFlagReached;
    }

    TickStatus::Playing
}

fn finish_level(state: &mut GameState) {
    state.phase = GamePhase::Won;
    state.push_event(GameEvent::LevelCleared);
    log::info!("Level cleared with score {}", state.score.score());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::assets::{AssetCatalog, AssetGate};
    use crate::sim::level::{FlagSpec, LevelDefinition, ObjectSpec, PlatformSpec};
    use crate::tuning::Tuning;

    /// A level that is one long platform with nothing on it
    fn flat_level(flag_x: f32) -> LevelDefinition {
        LevelDefinition {
            length: 20000.0,
            platforms: vec![PlatformSpec {
                x: 0.0,
                width: 20000.0,
                y: None,
            }],
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            health_recoveries: Vec::new(),
            ending_flag: FlagSpec {
                x: flag_x,
                ..Default::default()
            },
        }
    }

    fn playing(level: LevelDefinition) -> GameState {
        let mut state = GameState::new(level, Tuning::default(), 12345).unwrap();
        state.reset();
        state
    }

    fn run(state: &mut GameState, input: TickInput, ticks: usize) -> TickStatus {
        let mut status = TickStatus::Playing;
        for _ in 0..ticks {
            status = tick(state, &input);
        }
        status
    }

    #[test]
    fn test_loading_gate_blocks_gameplay() {
        let mut state = GameState::new(LevelDefinition::level_one(), Tuning::default(), 1)
            .unwrap()
            .with_assets(AssetGate::new(2), AssetCatalog::empty());
        let input = TickInput::default();

        assert_eq!(tick(&mut state, &input), TickStatus::Loading);
        state.assets.resolve();
        assert_eq!(tick(&mut state, &input), TickStatus::Loading);
        assert_eq!(state.world.scroll_offset(), 0.0);
        assert!(state.active.is_empty());

        state.assets.resolve();
        assert_eq!(tick(&mut state, &input), TickStatus::Playing);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.world.scroll_offset(), 5.0);
        assert!(!state.active.platforms.is_empty());
    }

    #[test]
    fn test_scroll_advances_every_tick() {
        let mut state = playing(flat_level(15000.0));
        let input = TickInput::default();
        for n in 1..=100 {
            tick(&mut state, &input);
            assert_eq!(state.world.scroll_offset(), n as f32 * 5.0);
        }
    }

    #[test]
    fn test_time_score() {
        let mut state = playing(flat_level(15000.0));
        run(&mut state, TickInput::default(), 59);
        assert_eq!(state.score.score(), 0);
        run(&mut state, TickInput::default(), 1);
        assert_eq!(state.score.score(), 1);
        let delta = state.score.delta_display(state.now_ms()).unwrap();
        assert_eq!(delta.value, 1);
        run(&mut state, TickInput::default(), 120);
        assert_eq!(state.score.score(), 3);
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut state = playing(flat_level(15000.0));
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };

        // Fresh player has not touched down yet
        tick(&mut state, &jump);
        assert!(state.drain_events().is_empty());
        assert!(state.player.on_ground);

        tick(&mut state, &jump);
        assert_eq!(state.drain_events(), vec![GameEvent::Jumped]);
        assert!(!state.player.on_ground);

        // No double jump
        tick(&mut state, &jump);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_held_down_slides_until_released() {
        let mut state = playing(flat_level(15000.0));
        let down = TickInput {
            down_held: true,
            ..Default::default()
        };

        // Slide begins on the tick the player first lands
        tick(&mut state, &down);
        assert!(state.player.is_sliding());
        assert_eq!(state.player.y + state.player.size().y, 450.0);

        run(&mut state, down, 10);
        assert!(state.player.is_sliding());

        tick(&mut state, &TickInput::default());
        assert!(!state.player.is_sliding());
        assert_eq!(state.player.y + state.player.size().y, 450.0);
    }

    #[test]
    fn test_falling_off_loses() {
        let mut level = flat_level(15000.0);
        level.platforms[0].width = 300.0;
        let mut state = playing(level);

        let mut status = TickStatus::Playing;
        for _ in 0..200 {
            status = tick(&mut state, &TickInput::default());
            if status != TickStatus::Playing {
                break;
            }
        }

        assert_eq!(status, TickStatus::LostFell);
        assert_eq!(state.phase, GamePhase::Lost(LossCause::Fell));
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::GameOver(LossCause::Fell))
        );
        // Finished sessions stay finished
        let scroll = state.world.scroll_offset();
        assert_eq!(tick(&mut state, &TickInput::default()), TickStatus::LostFell);
        assert_eq!(state.world.scroll_offset(), scroll);
    }

    #[test]
    fn test_health_depleted_loses() {
        let mut state = playing(flat_level(15000.0));
        state.health.take_damage(100);
        assert_eq!(
            tick(&mut state, &TickInput::default()),
            TickStatus::LostHealthZero
        );
        assert_eq!(state.phase, GamePhase::Lost(LossCause::HealthDepleted));
    }

    #[test]
    fn test_running_into_obstacles_drains_health() {
        let mut level = flat_level(15000.0);
        level.obstacles = vec![
            ObjectSpec::at(900.0),
            ObjectSpec::at(1000.0),
            ObjectSpec::at(1100.0),
            ObjectSpec::at(1200.0),
        ];
        let mut state = playing(level);

        let mut status = TickStatus::Playing;
        let mut events = Vec::new();
        let mut health_seen = Vec::new();
        for _ in 0..400 {
            status = tick(&mut state, &TickInput::default());
            events.extend(state.drain_events());
            if health_seen.last() != Some(&state.health.current()) {
                health_seen.push(state.health.current());
            }
            if status != TickStatus::Playing {
                break;
            }
        }

        assert_eq!(status, TickStatus::LostHealthZero);
        assert_eq!(state.phase, GamePhase::Lost(LossCause::HealthDepleted));
        assert_eq!(health_seen, vec![100, 75, 50, 25, 0]);
        let hits = events
            .iter()
            .filter(|e| **e == GameEvent::ObstacleHit { destroyed: false })
            .count();
        assert_eq!(hits, 4);
        assert_eq!(
            events.last(),
            Some(&GameEvent::GameOver(LossCause::HealthDepleted))
        );
        assert!(state.active.obstacles.is_empty());
    }

    #[test]
    fn test_flag_celebration_then_win() {
        let mut state = playing(flat_level(300.0));

        let mut status = TickStatus::Playing;
        for _ in 0..100 {
            status = tick(&mut state, &TickInput::default());
            if status != TickStatus::Playing {
                break;
            }
        }
        assert_eq!(status, TickStatus::WonFlagReached);
        assert_eq!(state.phase, GamePhase::Celebrating { ticks_left: 300 });
        assert!(state.drain_events().contains(&GameEvent::FlagReached));

        let scroll = state.world.scroll_offset();
        assert_eq!(
            run(&mut state, TickInput::default(), 299),
            TickStatus::WonFlagReached
        );
        assert!(matches!(state.phase, GamePhase::Celebrating { .. }));
        assert_eq!(state.world.scroll_offset(), scroll);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Won);
        assert_eq!(state.drain_events(), vec![GameEvent::LevelCleared]);
    }

    #[test]
    fn test_loss_overrides_flag() {
        // Flag overlaps the player on the very first tick
        let mut state = playing(flat_level(110.0));
        state.health.take_damage(100);

        assert_eq!(
            tick(&mut state, &TickInput::default()),
            TickStatus::LostHealthZero
        );
        let events = state.drain_events();
        assert!(!events.contains(&GameEvent::FlagReached));
        assert!(events.contains(&GameEvent::GameOver(LossCause::HealthDepleted)));
    }

    #[test]
    fn test_determinism() {
        let catalog = AssetCatalog {
            low_obstacles: 4,
            high_obstacles: 3,
            power_up_image: true,
            health_image: true,
        };
        let make = || {
            GameState::new(LevelDefinition::level_one(), Tuning::default(), 99999)
                .unwrap()
                .with_assets(AssetGate::ready(), catalog.clone())
        };
        let mut a = make();
        let mut b = make();

        for i in 0..900 {
            let input = TickInput {
                jump: i % 97 == 0,
                down_held: (i / 150) % 2 == 1,
            };
            let status_a = tick(&mut a, &input);
            let status_b = tick(&mut b, &input);
            assert_eq!(status_a, status_b);
        }

        let view_a = serde_json::to_string(&a.frame_view()).unwrap();
        let view_b = serde_json::to_string(&b.frame_view()).unwrap();
        assert_eq!(view_a, view_b);
        assert_eq!(a.score.score(), b.score.score());
    }

    #[test]
    fn test_level_one_playthrough() {
        let mut state = GameState::new(LevelDefinition::level_one(), Tuning::default(), 42).unwrap();
        let mut events = Vec::new();
        let mut status = TickStatus::Loading;
        for _ in 0..2000 {
            status = tick(&mut state, &TickInput::default());
            events.extend(state.drain_events());
            if state.phase.is_finished() {
                break;
            }
        }

        assert_eq!(status, TickStatus::WonFlagReached);
        assert_eq!(state.phase, GamePhase::Won);
        assert!(events.contains(&GameEvent::PowerUpCollected));
        assert!(events.contains(&GameEvent::ObstacleHit { destroyed: true }));
        assert!(events.contains(&GameEvent::LevelCleared));
        assert!(state.health.current() > 0);
        assert!(state.score.score() > 0);
    }
}
