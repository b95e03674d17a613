//! Player health, clamped to [0, max]

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthManager {
    current: i32,
    max: i32,
}

impl Default for HealthManager {
    fn default() -> Self {
        Self::new(100)
    }
}

impl HealthManager {
    /// Full health
    pub fn new(max: i32) -> Self {
        let max = max.max(0);
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.current = self.current.saturating_sub(amount).clamp(0, self.max);
        log::debug!("Took {} damage, health now {}", amount, self.current);
    }

    pub fn heal(&mut self, amount: i32) {
        self.current = self.current.saturating_add(amount).clamp(0, self.max);
        log::debug!("Healed {}, health now {}", amount, self.current);
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Fraction of max health remaining
    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }

    pub fn reset(&mut self) {
        self.current = self.max;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_damage_and_heal() {
        let mut health = HealthManager::new(100);
        health.take_damage(25);
        assert_eq!(health.current(), 75);
        health.heal(10);
        assert_eq!(health.current(), 85);
        health.heal(50);
        assert_eq!(health.current(), 100);
        health.take_damage(150);
        assert_eq!(health.current(), 0);
        assert!(health.is_depleted());
        health.reset();
        assert_eq!(health.current(), 100);
    }

    proptest! {
        #[test]
        fn health_stays_in_range(
            max in 1i32..1000,
            ops in proptest::collection::vec((any::<bool>(), -2000i32..2000), 0..100),
        ) {
            let mut health = HealthManager::new(max);
            for (damage, amount) in ops {
                if damage {
                    health.take_damage(amount);
                } else {
                    health.heal(amount);
                }
                prop_assert!(health.current() >= 0);
                prop_assert!(health.current() <= health.max());
            }
        }
    }
}
