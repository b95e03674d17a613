//! Scrolling level objects
//!
//! Platforms, obstacles and items share one representation: a fixed world x,
//! a screen x recomputed from the scroll offset each tick, and a display box
//! with an optional centered hitbox inset.

use serde::{Deserialize, Serialize};

use super::geometry::{Aabb, Collidable};

/// Vertical placement of an obstacle (selects the image pool only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Placement {
    Low,
    High,
}

impl Placement {
    /// Obstacles placed more than `threshold` above the ground line are high
    pub fn classify(y: Option<f32>, ground_y: f32, threshold: f32) -> Self {
        match y {
            Some(y) if y < ground_y - threshold => Placement::High,
            _ => Placement::Low,
        }
    }
}

/// Entity categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Platform,
    Obstacle(Placement),
    PowerUp,
    HealthRecovery,
}

/// A level object that scrolls with the world
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Fixed at spawn
    pub world_x: f32,
    /// `world_x - scroll_offset`, refreshed every tick
    pub screen_x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Hitbox size relative to the display box (1.0 = whole box)
    pub hitbox_scale: f32,
    /// Image variant picked at spawn; `None` draws a placeholder shape
    pub variant: Option<usize>,
}

impl Entity {
    pub fn sync_screen_position(&mut self, scroll_offset: f32) {
        self.screen_x = self.world_x - scroll_offset;
    }

    /// Fully behind the camera's left edge
    pub fn is_offscreen(&self) -> bool {
        self.screen_x + self.width < 0.0
    }
}

impl Collidable for Entity {
    fn display_box(&self) -> Aabb {
        Aabb::new(self.screen_x, self.y, self.width, self.height)
    }

    fn hitbox(&self) -> Aabb {
        self.display_box().inset(self.hitbox_scale)
    }
}

/// Every entity currently streamed in, by category
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEntities {
    pub platforms: Vec<Entity>,
    pub obstacles: Vec<Entity>,
    pub power_ups: Vec<Entity>,
    pub health_items: Vec<Entity>,
}

impl ActiveEntities {
    pub fn sync_screen_positions(&mut self, scroll_offset: f32) {
        for entity in self.iter_mut() {
            entity.sync_screen_position(scroll_offset);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.platforms
            .iter()
            .chain(&self.obstacles)
            .chain(&self.power_ups)
            .chain(&self.health_items)
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.platforms
            .iter_mut()
            .chain(&mut self.obstacles)
            .chain(&mut self.power_ups)
            .chain(&mut self.health_items)
    }

    pub fn len(&self) -> usize {
        self.platforms.len() + self.obstacles.len() + self.power_ups.len() + self.health_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The level's end marker; touching it clears the level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndingFlag {
    pub world_x: f32,
    pub screen_x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub hitbox_scale: f32,
}

impl EndingFlag {
    pub fn sync_screen_position(&mut self, scroll_offset: f32) {
        self.screen_x = self.world_x - scroll_offset;
    }

    /// Whether any part of the flag is inside the viewport
    pub fn is_visible(&self, viewport_width: f32) -> bool {
        self.screen_x < viewport_width && self.screen_x + self.width > 0.0
    }
}

impl Collidable for EndingFlag {
    fn display_box(&self) -> Aabb {
        Aabb::new(self.screen_x, self.y, self.width, self.height)
    }

    fn hitbox(&self) -> Aabb {
        self.display_box().inset(self.hitbox_scale)
    }
}
