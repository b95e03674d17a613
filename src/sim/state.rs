//! Game session state and core simulation types
//!
//! One `GameState` owns every component of a run. Nothing is global, so
//! several sessions can coexist and each can be reset independently.

use serde::{Deserialize, Serialize};

use super::assets::{AssetCatalog, AssetGate};
use super::entity::{ActiveEntities, EndingFlag};
use super::health::HealthManager;
use super::level::{LevelDefinition, LevelError};
use super::player::Player;
use super::pursuer::Pursuer;
use super::score::ScoreManager;
use super::spawner::{Spawner, spawn_flag};
use super::world::World;
use crate::consts::TICK_MS;
use crate::tuning::Tuning;

/// Why a run ended badly
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    /// Dropped below the bottom of the screen
    Fell,
    /// Health reached zero
    HealthDepleted,
}

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for assets to resolve
    Loading,
    /// Active gameplay
    Playing,
    /// Flag reached; credits roll before the win is final
    Celebrating { ticks_left: u32 },
    /// Level cleared
    Won,
    /// Run ended
    Lost(LossCause),
}

impl GamePhase {
    /// No further gameplay will happen without a reset
    pub fn is_finished(&self) -> bool {
        matches!(self, GamePhase::Won | GamePhase::Lost(_))
    }
}

/// Something the presentation layer may want to react to (sound, effects)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    ObstacleHit { destroyed: bool },
    PowerUpCollected,
    HealthRecovered,
    FlagReached,
    GiantExpired,
    LevelCleared,
    GameOver(LossCause),
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub level: LevelDefinition,
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    /// Gameplay ticks since the run started
    pub time_ticks: u64,
    pub world: World,
    pub player: Player,
    pub active: ActiveEntities,
    pub flag: EndingFlag,
    pub spawner: Spawner,
    pub score: ScoreManager,
    pub health: HealthManager,
    pub pursuer: Pursuer,
    pub assets: AssetGate,
    pub catalog: AssetCatalog,
    /// Events raised since the last drain
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session for a validated level and tuning. Assets are treated
    /// as already resolved; use [`GameState::with_assets`] to wait on real ones.
    pub fn new(level: LevelDefinition, tuning: Tuning, seed: u64) -> Result<Self, LevelError> {
        level.validate()?;
        tuning.validate()?;
        log::info!(
            "New session (seed {}, {} platforms, {} obstacles)",
            seed,
            level.platforms.len(),
            level.obstacles.len()
        );

        Ok(Self {
            world: World::new(tuning.scroll_speed),
            player: Player::new(&tuning),
            active: ActiveEntities::default(),
            flag: spawn_flag(&level.ending_flag, &tuning),
            spawner: Spawner::new(seed),
            score: ScoreManager::new(tuning.score_delta_duration_ms),
            health: HealthManager::new(tuning.max_health),
            pursuer: Pursuer::default(),
            assets: AssetGate::ready(),
            catalog: AssetCatalog::empty(),
            phase: GamePhase::Loading,
            time_ticks: 0,
            events: Vec::new(),
            tuning,
            level,
            seed,
        })
    }

    /// Gate gameplay on a set of pending resources
    pub fn with_assets(mut self, gate: AssetGate, catalog: AssetCatalog) -> Self {
        self.assets = gate;
        self.catalog = catalog;
        self
    }

    /// Reinitialize every component: fresh player, empty entity lists,
    /// zeroed cursors and scroll, full health, zero score.
    pub fn reset(&mut self) {
        self.world = World::new(self.tuning.scroll_speed);
        self.player = Player::new(&self.tuning);
        self.active = ActiveEntities::default();
        self.flag = spawn_flag(&self.level.ending_flag, &self.tuning);
        self.spawner = Spawner::new(self.seed);
        self.score.reset();
        self.health.reset();
        self.pursuer = Pursuer::default();
        self.time_ticks = 0;
        self.events.clear();
        self.phase = GamePhase::Playing;
        log::info!("Session reset");
    }

    /// Simulation clock in milliseconds
    pub fn now_ms(&self) -> f64 {
        self.time_ticks as f64 * TICK_MS
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Hand over every event raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
