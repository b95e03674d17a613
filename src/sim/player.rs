//! The runner
//!
//! The player never moves horizontally; it only falls, jumps and changes
//! posture. Each posture has its own display size, and the hitbox is always
//! the same fixed fraction of the current display box.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::geometry::{Aabb, Anchor, Collidable, resize};
use crate::tuning::Tuning;

/// Mutually exclusive body states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Posture {
    Normal,
    Giant,
    Sliding,
}

/// Physics and size parameters captured from tuning at creation
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerParams {
    pub gravity: f32,
    pub jump_strength: f32,
    pub normal_size: Vec2,
    pub giant_size: Vec2,
    pub slide_size: Vec2,
    pub hitbox_scale: f32,
}

impl PlayerParams {
    pub fn from_tuning(tuning: &Tuning) -> Self {
        let v = |(w, h): (f32, f32)| Vec2::new(w, h);
        Self {
            gravity: tuning.gravity,
            jump_strength: tuning.jump_strength,
            normal_size: v(tuning.normal_size),
            giant_size: v(tuning.giant_size),
            slide_size: v(tuning.slide_size),
            hitbox_scale: tuning.player_hitbox_scale,
        }
    }

    fn size_of(&self, posture: Posture) -> Vec2 {
        match posture {
            Posture::Normal => self.normal_size,
            Posture::Giant => self.giant_size,
            Posture::Sliding => self.slide_size,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Fixed screen x of the left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    pub vy: f32,
    pub on_ground: bool,
    posture: Posture,
    giant_ticks: u32,
    size: Vec2,
    params: PlayerParams,
}

impl Player {
    /// A fresh player standing on the ground line
    pub fn new(tuning: &Tuning) -> Self {
        let params = PlayerParams::from_tuning(tuning);
        let size = params.normal_size;
        Self {
            x: tuning.player_x,
            y: tuning.ground_y - size.y,
            vy: 0.0,
            on_ground: false,
            posture: Posture::Normal,
            giant_ticks: 0,
            size,
            params,
        }
    }

    pub fn posture(&self) -> Posture {
        self.posture
    }

    pub fn is_giant(&self) -> bool {
        self.posture == Posture::Giant
    }

    pub fn is_sliding(&self) -> bool {
        self.posture == Posture::Sliding
    }

    pub fn giant_ticks_remaining(&self) -> u32 {
        self.giant_ticks
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    /// Change posture, keeping the feet where they are
    fn enter_posture(&mut self, posture: Posture) {
        let size = self.params.size_of(posture);
        let resized = resize(self.display_box(), size.x, size.y, Anchor::Bottom);
        self.y = resized.pos.y;
        self.size = resized.size;
        self.posture = posture;
    }

    /// Jump if standing on something. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if !self.on_ground {
            return false;
        }
        self.vy = self.params.jump_strength;
        self.on_ground = false;
        true
    }

    /// Grow for `duration` ticks. Refreshes rather than extends an active
    /// giant timer, and cancels a slide.
    pub fn activate_giant(&mut self, duration: u32) {
        if self.posture != Posture::Giant {
            self.enter_posture(Posture::Giant);
        }
        self.giant_ticks = duration;
    }

    fn deactivate_giant(&mut self) {
        // No y correction; the next ground snap uses the smaller height.
        self.posture = Posture::Normal;
        self.size = self.params.normal_size;
        self.giant_ticks = 0;
    }

    /// Duck into the slide posture. Only from normal posture on the ground.
    pub fn start_slide(&mut self) -> bool {
        if !self.on_ground || self.posture != Posture::Normal {
            return false;
        }
        self.enter_posture(Posture::Sliding);
        true
    }

    pub fn end_slide(&mut self) -> bool {
        if self.posture != Posture::Sliding {
            return false;
        }
        self.enter_posture(Posture::Normal);
        true
    }

    /// One physics step against the active platforms.
    ///
    /// Returns true if the giant posture expired this tick.
    pub fn update(&mut self, platforms: &[Entity]) -> bool {
        self.vy += self.params.gravity;
        self.y += self.vy;

        match self.landing_surface(platforms) {
            Some(top) => {
                self.y = top - self.size.y;
                self.vy = 0.0;
                self.on_ground = true;
            }
            None => self.on_ground = false,
        }

        if self.posture == Posture::Giant {
            self.giant_ticks = self.giant_ticks.saturating_sub(1);
            if self.giant_ticks == 0 {
                self.deactivate_giant();
                return true;
            }
        }
        false
    }

    /// Top of the platform the player lands on this tick, if any.
    ///
    /// The band below each top is widened by the current velocity so fast
    /// falls snap instead of tunneling. When several platforms qualify the
    /// highest surface wins; ties go to the earliest spawned.
    fn landing_surface(&self, platforms: &[Entity]) -> Option<f32> {
        let left = self.x;
        let right = self.x + self.size.x;
        let bottom = self.y + self.size.y;

        platforms
            .iter()
            .filter(|p| right > p.screen_x && left < p.screen_x + p.width)
            .filter(|p| bottom >= p.y && bottom <= p.y + p.height + self.vy)
            .map(|p| p.y)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// Fallen below the bottom of the screen
    pub fn is_dead(&self, viewport_height: f32) -> bool {
        self.y > viewport_height
    }

    /// Hitbox-vs-hitbox overlap test
    pub fn collides_with(&self, other: &impl Collidable) -> bool {
        self.hitbox().overlaps(&other.hitbox())
    }
}

impl Collidable for Player {
    fn display_box(&self) -> Aabb {
        Aabb {
            pos: Vec2::new(self.x, self.y),
            size: self.size,
        }
    }

    fn hitbox(&self) -> Aabb {
        self.display_box().inset(self.params.hitbox_scale)
    }
}
