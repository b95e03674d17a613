//! World scroll
//!
//! Every object's screen x is derived from the scroll offset kept here.

use serde::{Deserialize, Serialize};

/// Horizontal camera position in world space
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    scroll_offset: f32,
    scroll_speed: f32,
}

impl World {
    pub fn new(scroll_speed: f32) -> Self {
        Self {
            scroll_offset: 0.0,
            scroll_speed,
        }
    }

    /// Scroll right by one tick's worth
    pub fn advance(&mut self) {
        self.scroll_offset += self.scroll_speed;
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn scroll_speed(&self) -> f32 {
        self.scroll_speed
    }
}
