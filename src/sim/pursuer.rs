//! The chaser that creeps in from the left as health drops
//!
//! Purely presentational: it never collides with anything.

use serde::{Deserialize, Serialize};

/// x where the chaser parks when health is high
const PARKED_X: f32 = -250.0;
/// Below this x a retreating chaser is hidden
const HIDE_X: f32 = -240.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pursuer {
    pub x: f32,
    pub visible: bool,
    /// Running pose (critical health)
    pub running: bool,
}

impl Default for Pursuer {
    fn default() -> Self {
        Self {
            x: PARKED_X,
            visible: false,
            running: false,
        }
    }
}

impl Pursuer {
    /// Ease toward the position matching the health fraction
    pub fn update(&mut self, health_fraction: f32, player_x: f32) {
        self.running = health_fraction <= 0.25;
        if health_fraction <= 0.25 {
            self.visible = true;
            self.approach(player_x - 80.0, 0.1);
        } else if health_fraction <= 0.5 {
            self.visible = true;
            self.approach(-50.0, 0.05);
        } else {
            self.approach(PARKED_X, 0.03);
            if self.x <= HIDE_X {
                self.visible = false;
            }
        }
    }

    fn approach(&mut self, target: f32, rate: f32) {
        self.x += (target - self.x) * rate;
    }

    /// Whether the renderer should draw it
    pub fn on_screen(&self) -> bool {
        self.visible || self.x > HIDE_X
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closes_in_at_low_health() {
        let mut pursuer = Pursuer::default();
        for _ in 0..200 {
            pursuer.update(0.25, 100.0);
        }
        assert!(pursuer.visible);
        assert!(pursuer.running);
        assert!((pursuer.x - 20.0).abs() < 0.5);
    }

    #[test]
    fn test_retreats_and_hides() {
        let mut pursuer = Pursuer::default();
        for _ in 0..100 {
            pursuer.update(0.5, 100.0);
        }
        assert!(pursuer.visible);
        assert!(!pursuer.running);
        for _ in 0..300 {
            pursuer.update(1.0, 100.0);
        }
        assert!(!pursuer.visible);
        assert!(!pursuer.on_screen());
    }
}
