//! Spawn-on-approach streaming
//!
//! Each level category has its own cursor into the (x-sorted) level table.
//! An entry is admitted the moment its world x passes the camera's right
//! edge, and each entry is admitted exactly once.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::assets::AssetCatalog;
use super::entity::{ActiveEntities, EndingFlag, Entity, EntityKind, Placement};
use super::level::{FlagSpec, LevelDefinition, ObjectSpec, PlatformSpec};
use crate::tuning::{SpawnSize, Tuning};

/// Streams level entries into the active set
#[derive(Debug, Clone)]
pub struct Spawner {
    next_platform: usize,
    next_obstacle: usize,
    next_power_up: usize,
    next_health: usize,
    next_id: u32,
    /// Picks obstacle image variants
    rng: Pcg32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            next_platform: 0,
            next_obstacle: 0,
            next_power_up: 0,
            next_health: 0,
            next_id: 1,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Cursor positions as (platforms, obstacles, power-ups, health items)
    pub fn cursors(&self) -> (usize, usize, usize, usize) {
        (
            self.next_platform,
            self.next_obstacle,
            self.next_power_up,
            self.next_health,
        )
    }

    /// Admit every entry whose world x is left of the camera's right edge.
    ///
    /// Returns the number of entities admitted.
    pub fn admit(
        &mut self,
        level: &LevelDefinition,
        scroll_offset: f32,
        tuning: &Tuning,
        catalog: &AssetCatalog,
        active: &mut ActiveEntities,
    ) -> usize {
        let camera_right = tuning.camera_right(scroll_offset);
        let mut admitted = 0;

        while let Some(spec) = level.platforms.get(self.next_platform) {
            if spec.x >= camera_right {
                break;
            }
            let entity = self.platform(spec, scroll_offset, tuning);
            active.platforms.push(entity);
            self.next_platform += 1;
            admitted += 1;
        }

        while let Some(spec) = level.obstacles.get(self.next_obstacle) {
            if spec.x >= camera_right {
                break;
            }
            let entity = self.obstacle(spec, scroll_offset, tuning, catalog);
            active.obstacles.push(entity);
            self.next_obstacle += 1;
            admitted += 1;
        }

        while let Some(spec) = level.power_ups.get(self.next_power_up) {
            if spec.x >= camera_right {
                break;
            }
            let size = if catalog.power_up_image {
                tuning.item_image
            } else {
                tuning.power_up_fallback
            };
            let entity = self.item(EntityKind::PowerUp, spec, size, scroll_offset, tuning);
            active.power_ups.push(entity);
            self.next_power_up += 1;
            admitted += 1;
        }

        while let Some(spec) = level.health_recoveries.get(self.next_health) {
            if spec.x >= camera_right {
                break;
            }
            let size = if catalog.health_image {
                tuning.item_image
            } else {
                tuning.health_fallback
            };
            let entity = self.item(EntityKind::HealthRecovery, spec, size, scroll_offset, tuning);
            active.health_items.push(entity);
            self.next_health += 1;
            admitted += 1;
        }

        admitted
    }

    fn platform(&mut self, spec: &PlatformSpec, scroll_offset: f32, tuning: &Tuning) -> Entity {
        log::debug!("Spawning platform at x={} (width {})", spec.x, spec.width);
        Entity {
            id: self.next_entity_id(),
            kind: EntityKind::Platform,
            world_x: spec.x,
            screen_x: spec.x - scroll_offset,
            y: spec.y.unwrap_or(tuning.ground_y),
            width: spec.width,
            height: tuning.platform_thickness,
            hitbox_scale: 1.0,
            variant: None,
        }
    }

    fn obstacle(
        &mut self,
        spec: &ObjectSpec,
        scroll_offset: f32,
        tuning: &Tuning,
        catalog: &AssetCatalog,
    ) -> Entity {
        let placement = Placement::classify(spec.y, tuning.ground_y, tuning.high_obstacle_threshold);
        let pool = catalog.obstacle_variants(placement);

        let (width, height, default_scale, variant) = if pool > 0 {
            let image = tuning.obstacle_image;
            let variant = self.rng.random_range(0..pool);
            (image.width, image.height, image.hitbox_scale, Some(variant))
        } else {
            log::warn!(
                "No {:?} obstacle images loaded; spawning placeholder at x={}",
                placement,
                spec.x
            );
            let fallback = tuning.obstacle_fallback;
            (
                spec.width.unwrap_or(fallback.width),
                spec.height.unwrap_or(fallback.height),
                fallback.hitbox_scale,
                None,
            )
        };

        log::debug!("Spawning {:?} obstacle at x={}", placement, spec.x);
        Entity {
            id: self.next_entity_id(),
            kind: EntityKind::Obstacle(placement),
            world_x: spec.x,
            screen_x: spec.x - scroll_offset,
            y: spec.y.unwrap_or(tuning.ground_y - height),
            width,
            height,
            hitbox_scale: spec.hitbox_scale.unwrap_or(default_scale),
            variant,
        }
    }

    fn item(
        &mut self,
        kind: EntityKind,
        spec: &ObjectSpec,
        size: SpawnSize,
        scroll_offset: f32,
        tuning: &Tuning,
    ) -> Entity {
        log::debug!("Spawning {:?} at x={}", kind, spec.x);
        Entity {
            id: self.next_entity_id(),
            kind,
            world_x: spec.x,
            screen_x: spec.x - scroll_offset,
            y: spec
                .y
                .unwrap_or(tuning.ground_y - size.height - tuning.item_float),
            width: size.width,
            height: size.height,
            hitbox_scale: spec.hitbox_scale.unwrap_or(size.hitbox_scale),
            variant: None,
        }
    }
}

/// Build the level's flag, resting on the ground line
pub fn spawn_flag(spec: &FlagSpec, tuning: &Tuning) -> EndingFlag {
    let width = spec.width.unwrap_or(tuning.flag.width);
    let height = spec.height.unwrap_or(tuning.flag.height);
    EndingFlag {
        world_x: spec.x,
        screen_x: spec.x,
        y: tuning.ground_y - height,
        width,
        height,
        hitbox_scale: spec.hitbox_scale.unwrap_or(tuning.flag.hitbox_scale),
    }
}
