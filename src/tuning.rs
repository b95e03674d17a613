//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here so a level can be
//! re-balanced from JSON without touching code.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Tuning that cannot drive a session
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{field} is {value}, expected {expected}")]
    Invalid {
        field: &'static str,
        value: f32,
        expected: &'static str,
    },
}

fn require(
    field: &'static str,
    value: f32,
    ok: bool,
    expected: &'static str,
) -> Result<(), TuningError> {
    if ok {
        Ok(())
    } else {
        Err(TuningError::Invalid {
            field,
            value,
            expected,
        })
    }
}

// NaN fails every comparison, so each check is phrased as the accepted range
fn positive(field: &'static str, value: f32) -> Result<(), TuningError> {
    require(field, value, value > 0.0 && value.is_finite(), "> 0")
}

fn non_negative(field: &'static str, value: f32) -> Result<(), TuningError> {
    require(field, value, value >= 0.0 && value.is_finite(), ">= 0")
}

fn unit_scale(field: &'static str, value: f32) -> Result<(), TuningError> {
    require(field, value, value > 0.0 && value <= 1.0, "in (0, 1]")
}

/// Display size and hitbox inset for one kind of spawned object
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnSize {
    pub width: f32,
    pub height: f32,
    pub hitbox_scale: f32,
}

impl SpawnSize {
    pub const fn new(width: f32, height: f32, hitbox_scale: f32) -> Self {
        Self {
            width,
            height,
            hitbox_scale,
        }
    }

    fn validate(&self, field: &'static str) -> Result<(), TuningError> {
        positive(field, self.width)?;
        positive(field, self.height)?;
        unit_scale(field, self.hitbox_scale)
    }
}

/// Game balance values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Viewport ===
    pub viewport_width: f32,
    pub viewport_height: f32,
    /// Default top surface for platforms and ground-resting objects
    pub ground_y: f32,

    // === World ===
    /// Horizontal scroll per tick
    pub scroll_speed: f32,

    // === Player ===
    /// Fixed screen x of the player's left edge
    pub player_x: f32,
    pub gravity: f32,
    /// Initial vertical velocity of a jump (negative is up)
    pub jump_strength: f32,
    pub normal_size: (f32, f32),
    pub giant_size: (f32, f32),
    pub slide_size: (f32, f32),
    pub player_hitbox_scale: f32,

    // === Platforms ===
    pub platform_thickness: f32,

    // === Collision outcomes ===
    pub obstacle_damage: i32,
    pub giant_kill_bonus: u64,
    pub heal_amount: i32,
    pub giant_duration_ticks: u32,
    pub max_health: i32,

    // === Score ===
    /// Ticks between passive +1 score awards
    pub score_interval_ticks: u32,
    pub score_delta_duration_ms: f64,

    // === Spawn presentation ===
    /// Obstacles whose y is further than this above the ground are "high"
    pub high_obstacle_threshold: f32,
    pub obstacle_image: SpawnSize,
    pub obstacle_fallback: SpawnSize,
    pub item_image: SpawnSize,
    pub power_up_fallback: SpawnSize,
    pub health_fallback: SpawnSize,
    /// Default float height of items above the ground line
    pub item_float: f32,
    pub flag: SpawnSize,

    // === Ending ===
    pub celebration_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
            ground_y: GROUND_Y,

            scroll_speed: 5.0,

            player_x: 100.0,
            gravity: 0.6,
            jump_strength: -16.0,
            normal_size: (160.0, 100.0),
            giant_size: (240.0, 150.0),
            slide_size: (200.0, 60.0),
            player_hitbox_scale: 0.6,

            platform_thickness: 40.0,

            obstacle_damage: 25,
            giant_kill_bonus: 100,
            heal_amount: 25,
            giant_duration_ticks: 300,
            max_health: 100,

            score_interval_ticks: 60,
            score_delta_duration_ms: 500.0,

            high_obstacle_threshold: 100.0,
            obstacle_image: SpawnSize::new(120.0, 100.0, 0.5),
            obstacle_fallback: SpawnSize::new(30.0, 60.0, 0.6),
            item_image: SpawnSize::new(120.0, 60.0, 0.7),
            power_up_fallback: SpawnSize::new(40.0, 40.0, 0.7),
            health_fallback: SpawnSize::new(35.0, 35.0, 0.7),
            item_float: 30.0,
            flag: SpawnSize::new(150.0, 200.0, 0.4),

            celebration_ticks: 300,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides; fields left out keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!(
            "Loaded tuning (scroll {} px/tick, gravity {})",
            tuning.scroll_speed,
            tuning.gravity
        );
        Ok(tuning)
    }

    /// Reject values that would break geometry or freeze the run
    pub fn validate(&self) -> Result<(), TuningError> {
        positive("viewport_width", self.viewport_width)?;
        positive("viewport_height", self.viewport_height)?;
        require(
            "ground_y",
            self.ground_y,
            self.ground_y.is_finite(),
            "finite",
        )?;
        non_negative("scroll_speed", self.scroll_speed)?;
        require(
            "player_x",
            self.player_x,
            self.player_x.is_finite(),
            "finite",
        )?;
        positive("gravity", self.gravity)?;
        require(
            "jump_strength",
            self.jump_strength,
            self.jump_strength < 0.0 && self.jump_strength.is_finite(),
            "< 0",
        )?;
        for (field, (w, h)) in [
            ("normal_size", self.normal_size),
            ("giant_size", self.giant_size),
            ("slide_size", self.slide_size),
        ] {
            positive(field, w)?;
            positive(field, h)?;
        }
        unit_scale("player_hitbox_scale", self.player_hitbox_scale)?;
        positive("platform_thickness", self.platform_thickness)?;
        require(
            "max_health",
            self.max_health as f32,
            self.max_health > 0,
            "> 0",
        )?;
        non_negative("high_obstacle_threshold", self.high_obstacle_threshold)?;
        self.obstacle_image.validate("obstacle_image")?;
        self.obstacle_fallback.validate("obstacle_fallback")?;
        self.item_image.validate("item_image")?;
        self.power_up_fallback.validate("power_up_fallback")?;
        self.health_fallback.validate("health_fallback")?;
        require(
            "item_float",
            self.item_float,
            self.item_float.is_finite(),
            "finite",
        )?;
        self.flag.validate("flag")
    }

    /// Right edge of the camera in world coordinates
    pub fn camera_right(&self, scroll_offset: f32) -> f32 {
        scroll_offset + self.viewport_width
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "scroll_speed": 8.0 }"#).unwrap();
        assert_eq!(tuning.scroll_speed, 8.0);
        assert_eq!(tuning.gravity, 0.6);
        assert_eq!(tuning.flag, SpawnSize::new(150.0, 200.0, 0.4));
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            Tuning::from_json("{ scroll_speed: }"),
            Err(TuningError::Json(_))
        ));
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        let cases = [
            (r#"{ "scroll_speed": -5.0 }"#, "scroll_speed"),
            (r#"{ "gravity": 0.0 }"#, "gravity"),
            (r#"{ "viewport_width": 0.0 }"#, "viewport_width"),
            (r#"{ "player_hitbox_scale": 1.5 }"#, "player_hitbox_scale"),
            (r#"{ "slide_size": [200.0, -60.0] }"#, "slide_size"),
            (r#"{ "platform_thickness": 0.0 }"#, "platform_thickness"),
            (r#"{ "max_health": 0 }"#, "max_health"),
            (
                r#"{ "flag": { "width": 150.0, "height": 200.0, "hitbox_scale": 0.0 } }"#,
                "flag",
            ),
            (
                r#"{ "obstacle_fallback": { "width": 0.0, "height": 60.0, "hitbox_scale": 0.6 } }"#,
                "obstacle_fallback",
            ),
        ];
        for (json, expected_field) in cases {
            match Tuning::from_json(json) {
                Err(TuningError::Invalid { field, .. }) => assert_eq!(field, expected_field),
                other => panic!("{json} gave {other:?}"),
            }
        }
    }

    #[test]
    fn test_nan_rejected() {
        let tuning = Tuning {
            scroll_speed: f32::NAN,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::Invalid {
                field: "scroll_speed",
                ..
            })
        ));

        let tuning = Tuning {
            player_hitbox_scale: f32::NAN,
            ..Tuning::default()
        };
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_zero_scroll_allowed() {
        let tuning = Tuning::from_json(r#"{ "scroll_speed": 0.0 }"#).unwrap();
        assert_eq!(tuning.scroll_speed, 0.0);
    }
}
