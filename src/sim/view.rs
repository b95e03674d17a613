//! Per-frame snapshot for renderers
//!
//! Everything a renderer needs to draw one frame, in screen space.

use serde::{Deserialize, Serialize};

use super::entity::EntityKind;
use super::geometry::{Aabb, Collidable};
use super::player::Posture;
use super::pursuer::Pursuer;
use super::score::DeltaDisplay;
use super::state::{GamePhase, GameState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub display: Aabb,
    pub hitbox: Aabb,
    pub posture: Posture,
    pub giant_ticks_remaining: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u32,
    pub kind: EntityKind,
    pub display: Aabb,
    pub hitbox: Aabb,
    /// `None` means draw a placeholder shape
    pub variant: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameView {
    pub phase: GamePhase,
    pub scroll_offset: f32,
    pub player: PlayerView,
    /// Platforms first, then obstacles, power-ups and health items
    pub entities: Vec<EntityView>,
    /// Only present while on screen
    pub flag: Option<Aabb>,
    pub score: u64,
    pub score_delta: Option<DeltaDisplay>,
    pub health: i32,
    pub max_health: i32,
    pub pursuer: Option<Pursuer>,
}

impl GameState {
    /// Snapshot the session for drawing. Expires a faded score delta.
    pub fn frame_view(&mut self) -> FrameView {
        let now_ms = self.now_ms();
        let entities = self
            .active
            .iter()
            .map(|e| EntityView {
                id: e.id,
                kind: e.kind,
                display: e.display_box(),
                hitbox: e.hitbox(),
                variant: e.variant,
            })
            .collect();

        FrameView {
            phase: self.phase,
            scroll_offset: self.world.scroll_offset(),
            player: PlayerView {
                display: self.player.display_box(),
                hitbox: self.player.hitbox(),
                posture: self.player.posture(),
                giant_ticks_remaining: self.player.giant_ticks_remaining(),
            },
            entities,
            flag: self
                .flag
                .is_visible(self.tuning.viewport_width)
                .then(|| self.flag.display_box()),
            score: self.score.score(),
            score_delta: self.score.delta_display(now_ms),
            health: self.health.current(),
            max_health: self.health.max(),
            pursuer: self.pursuer.on_screen().then(|| self.pursuer.clone()),
        }
    }
}
