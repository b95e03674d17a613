//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order within each category)
//! - No rendering or platform dependencies

pub mod assets;
pub mod collision;
pub mod entity;
pub mod geometry;
pub mod health;
pub mod level;
pub mod player;
pub mod pursuer;
pub mod score;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod view;
pub mod world;

pub use assets::{AssetCatalog, AssetGate};
pub use entity::{ActiveEntities, EndingFlag, Entity, EntityKind, Placement};
pub use geometry::{Aabb, Anchor, Collidable, resize};
pub use health::HealthManager;
pub use level::{FlagSpec, LevelDefinition, LevelError, ObjectSpec, PlatformSpec};
pub use player::{Player, Posture};
pub use pursuer::Pursuer;
pub use score::{DeltaDisplay, ScoreManager};
pub use spawner::Spawner;
pub use state::{GameEvent, GamePhase, GameState, LossCause};
pub use tick::{TickInput, TickStatus, tick};
pub use view::{EntityView, FrameView, PlayerView};
pub use world::World;
