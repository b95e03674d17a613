//! Score counter with a fading "+N" display record

use serde::{Deserialize, Serialize};

/// The most recent score change, for the HUD
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct DeltaRecord {
    value: u64,
    start_ms: f64,
    duration_ms: f64,
}

/// What the HUD should show for the last score change
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaDisplay {
    pub value: u64,
    /// 1.0 when fresh, fading linearly to 0
    pub opacity: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreManager {
    score: u64,
    delta: Option<DeltaRecord>,
    delta_duration_ms: f64,
}

impl ScoreManager {
    pub fn new(delta_duration_ms: f64) -> Self {
        Self {
            score: 0,
            delta: None,
            delta_duration_ms,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Add points and restart the fade-out display
    pub fn add(&mut self, delta: u64, now_ms: f64) {
        self.score = self.score.saturating_add(delta);
        self.delta = Some(DeltaRecord {
            value: delta,
            start_ms: now_ms,
            duration_ms: self.delta_duration_ms,
        });
    }

    /// Current fade state of the last change; expires the record once faded
    pub fn delta_display(&mut self, now_ms: f64) -> Option<DeltaDisplay> {
        let record = self.delta?;
        let progress = (now_ms - record.start_ms) / record.duration_ms;
        if progress >= 1.0 {
            self.delta = None;
            return None;
        }
        Some(DeltaDisplay {
            value: record.value,
            opacity: (1.0 - progress.max(0.0)) as f32,
        })
    }

    pub fn reset(&mut self) {
        self.score = 0;
        self.delta = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_accumulates() {
        let mut score = ScoreManager::new(500.0);
        score.add(1, 0.0);
        score.add(100, 10.0);
        assert_eq!(score.score(), 101);
    }

    #[test]
    fn test_delta_fades_then_expires() {
        let mut score = ScoreManager::new(500.0);
        assert_eq!(score.delta_display(0.0), None);

        score.add(100, 1000.0);
        let fresh = score.delta_display(1000.0).unwrap();
        assert_eq!(fresh.value, 100);
        assert_eq!(fresh.opacity, 1.0);

        let half = score.delta_display(1250.0).unwrap();
        assert!((half.opacity - 0.5).abs() < 1e-6);

        assert_eq!(score.delta_display(1500.0), None);
        // Expired records stay gone even if asked about an earlier time
        assert_eq!(score.delta_display(1100.0), None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut score = ScoreManager::new(500.0);
        score.add(5, 0.0);
        score.reset();
        assert_eq!(score.score(), 0);
        assert_eq!(score.delta_display(0.0), None);
    }
}
