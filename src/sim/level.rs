//! Level definitions
//!
//! A level is a static table of object placements, each category sorted by
//! world x. The spawner streams it in order and never re-sorts, so the order
//! is checked when the level is loaded.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tuning::TuningError;

/// Errors that can occur when loading a level
#[derive(Debug, Error)]
pub enum LevelError {
    /// JSON parsing failed
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// A category's x coordinates go backwards
    #[error("{category}[{index}] is placed before the entry preceding it")]
    Unsorted { category: &'static str, index: usize },
    /// A width or height is negative or NaN
    #[error("{category}[{index}] has a negative or undefined {field}")]
    NegativeDimension {
        category: &'static str,
        index: usize,
        field: &'static str,
    },
    /// Hitbox scale outside (0, 1]
    #[error("{category}[{index}] has hitbox scale {scale}, expected (0, 1]")]
    InvalidHitboxScale {
        category: &'static str,
        index: usize,
        scale: f32,
    },
    /// The balance values paired with the level are unusable
    #[error("invalid tuning: {0}")]
    Tuning(#[from] TuningError),
}

/// A ground segment
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub x: f32,
    pub width: f32,
    /// Top surface; defaults to the ground line
    #[serde(default)]
    pub y: Option<f32>,
}

/// An obstacle, power-up or health item placement
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectSpec {
    pub x: f32,
    pub y: Option<f32>,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub hitbox_scale: Option<f32>,
}

impl ObjectSpec {
    pub fn at(x: f32) -> Self {
        Self {
            x,
            ..Default::default()
        }
    }

    pub fn at_height(x: f32, y: f32) -> Self {
        Self {
            x,
            y: Some(y),
            ..Default::default()
        }
    }
}

/// The end-of-level flag
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FlagSpec {
    pub x: f32,
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub hitbox_scale: Option<f32>,
}

/// A complete level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelDefinition {
    /// Total length in world units
    pub length: f32,
    pub platforms: Vec<PlatformSpec>,
    #[serde(default)]
    pub obstacles: Vec<ObjectSpec>,
    #[serde(default)]
    pub power_ups: Vec<ObjectSpec>,
    #[serde(default)]
    pub health_recoveries: Vec<ObjectSpec>,
    pub ending_flag: FlagSpec,
}

impl LevelDefinition {
    /// Parse and validate a level from JSON
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: Self = serde_json::from_str(json)?;
        level.validate()?;
        log::info!(
            "Loaded level: {} platforms, {} obstacles, {} power-ups, {} health items",
            level.platforms.len(),
            level.obstacles.len(),
            level.power_ups.len(),
            level.health_recoveries.len()
        );
        Ok(level)
    }

    /// Check ordering and dimensions of every category
    pub fn validate(&self) -> Result<(), LevelError> {
        check_sorted("platforms", self.platforms.iter().map(|p| p.x))?;
        for (index, p) in self.platforms.iter().enumerate() {
            if !is_dimension(p.width) {
                return Err(LevelError::NegativeDimension {
                    category: "platforms",
                    index,
                    field: "width",
                });
            }
        }

        for (category, objects) in [
            ("obstacles", &self.obstacles),
            ("power_ups", &self.power_ups),
            ("health_recoveries", &self.health_recoveries),
        ] {
            check_sorted(category, objects.iter().map(|o| o.x))?;
            for (index, o) in objects.iter().enumerate() {
                check_dimensions(category, index, o.width, o.height, o.hitbox_scale)?;
            }
        }

        let flag = &self.ending_flag;
        check_dimensions("ending_flag", 0, flag.width, flag.height, flag.hitbox_scale)
    }

    /// The built-in level
    pub fn level_one() -> Self {
        Self {
            length: 5000.0,
            platforms: vec![
                PlatformSpec { x: 0.0, width: 1200.0, y: None },
                PlatformSpec { x: 1300.0, width: 500.0, y: None },
                PlatformSpec { x: 1900.0, width: 800.0, y: None },
                PlatformSpec { x: 2800.0, width: 1000.0, y: None },
                PlatformSpec { x: 3900.0, width: 1100.0, y: None },
            ],
            obstacles: vec![
                ObjectSpec::at(800.0),
                ObjectSpec::at(1400.0),
                ObjectSpec::at(1450.0),
                ObjectSpec::at_height(2000.0, 280.0),
                ObjectSpec::at(2200.0),
                ObjectSpec::at(3000.0),
                ObjectSpec::at(3050.0),
                ObjectSpec::at_height(3100.0, 280.0),
                ObjectSpec::at_height(4000.0, 280.0),
            ],
            power_ups: vec![ObjectSpec::at(1000.0), ObjectSpec::at(3500.0)],
            health_recoveries: vec![ObjectSpec::at(2500.0), ObjectSpec::at(4200.0)],
            ending_flag: FlagSpec {
                x: 4700.0,
                ..Default::default()
            },
        }
    }
}

fn check_sorted(
    category: &'static str,
    xs: impl Iterator<Item = f32>,
) -> Result<(), LevelError> {
    let mut prev = f32::NEG_INFINITY;
    for (index, x) in xs.enumerate() {
        if x.is_nan() || x < prev {
            return Err(LevelError::Unsorted { category, index });
        }
        prev = x;
    }
    Ok(())
}

fn is_dimension(value: f32) -> bool {
    value >= 0.0
}

fn check_dimensions(
    category: &'static str,
    index: usize,
    width: Option<f32>,
    height: Option<f32>,
    hitbox_scale: Option<f32>,
) -> Result<(), LevelError> {
    for (field, value) in [("width", width), ("height", height)] {
        if value.is_some_and(|v| !is_dimension(v)) {
            return Err(LevelError::NegativeDimension {
                category,
                index,
                field,
            });
        }
    }
    if let Some(scale) = hitbox_scale {
        if !(scale > 0.0 && scale <= 1.0) {
            return Err(LevelError::InvalidHitboxScale {
                category,
                index,
                scale,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_one_is_valid() {
        assert!(LevelDefinition::level_one().validate().is_ok());
    }

    #[test]
    fn test_unsorted_obstacles_rejected() {
        let mut level = LevelDefinition::level_one();
        level.obstacles.swap(0, 1);
        match level.validate() {
            Err(LevelError::Unsorted { category, index }) => {
                assert_eq!(category, "obstacles");
                assert_eq!(index, 1);
            }
            other => panic!("expected Unsorted, got {:?}", other),
        }
    }

    #[test]
    fn test_equal_x_is_allowed() {
        let mut level = LevelDefinition::level_one();
        level.power_ups = vec![ObjectSpec::at(500.0), ObjectSpec::at(500.0)];
        assert!(level.validate().is_ok());
    }

    #[test]
    fn test_negative_dimension_rejected() {
        let mut level = LevelDefinition::level_one();
        level.health_recoveries[0].height = Some(-1.0);
        assert!(matches!(
            level.validate(),
            Err(LevelError::NegativeDimension { field: "height", .. })
        ));

        let mut level = LevelDefinition::level_one();
        level.platforms[2].width = -10.0;
        assert!(matches!(
            level.validate(),
            Err(LevelError::NegativeDimension { category: "platforms", index: 2, .. })
        ));
    }

    #[test]
    fn test_nan_dimension_rejected() {
        let mut level = LevelDefinition::level_one();
        level.platforms[0].width = f32::NAN;
        assert!(matches!(
            level.validate(),
            Err(LevelError::NegativeDimension { category: "platforms", index: 0, field: "width" })
        ));

        let mut level = LevelDefinition::level_one();
        level.obstacles[3].width = Some(f32::NAN);
        assert!(matches!(
            level.validate(),
            Err(LevelError::NegativeDimension { category: "obstacles", index: 3, field: "width" })
        ));

        let mut level = LevelDefinition::level_one();
        level.ending_flag.height = Some(f32::NAN);
        assert!(matches!(
            level.validate(),
            Err(LevelError::NegativeDimension { category: "ending_flag", field: "height", .. })
        ));
    }

    #[test]
    fn test_flag_hitbox_scale_checked() {
        let mut level = LevelDefinition::level_one();
        level.ending_flag.hitbox_scale = Some(0.0);
        assert!(matches!(
            level.validate(),
            Err(LevelError::InvalidHitboxScale { category: "ending_flag", .. })
        ));
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "length": 2000,
            "platforms": [{ "x": 0, "width": 2000 }],
            "obstacles": [{ "x": 600 }, { "x": 900, "y": 250, "width": 40 }],
            "ending_flag": { "x": 1800, "hitbox_scale": 0.5 }
        }"#;
        let level = LevelDefinition::from_json(json).unwrap();
        assert_eq!(level.obstacles[1].y, Some(250.0));
        assert!(level.power_ups.is_empty());
        assert_eq!(level.ending_flag.hitbox_scale, Some(0.5));
    }

    #[test]
    fn test_from_json_rejects_unsorted() {
        let json = r#"{
            "length": 2000,
            "platforms": [{ "x": 500, "width": 100 }, { "x": 0, "width": 100 }],
            "ending_flag": { "x": 1800 }
        }"#;
        assert!(matches!(
            LevelDefinition::from_json(json),
            Err(LevelError::Unsorted { category: "platforms", index: 1 })
        ));
        assert!(matches!(
            LevelDefinition::from_json("not json"),
            Err(LevelError::Json(_))
        ));
    }
}
