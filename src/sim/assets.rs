//! Asset readiness
//!
//! Loading itself happens outside the simulation. The simulation only needs
//! to know when every declared resource has finished (either way) and which
//! image pools ended up non-empty.

use serde::{Deserialize, Serialize};

use super::entity::Placement;

/// Counts resources still in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetGate {
    pending: u32,
}

impl AssetGate {
    pub fn new(total: u32) -> Self {
        Self { pending: total }
    }

    /// A gate with nothing to wait for
    pub fn ready() -> Self {
        Self::new(0)
    }

    /// One resource finished; failures count the same as successes
    pub fn resolve(&mut self) {
        self.pending = self.pending.saturating_sub(1);
        if self.pending == 0 {
            log::info!("All assets resolved");
        }
    }

    pub fn pending(&self) -> u32 {
        self.pending
    }

    pub fn is_ready(&self) -> bool {
        self.pending == 0
    }
}

/// Which presentation pools are available to the spawner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetCatalog {
    /// Loaded image variants for ground-level obstacles
    pub low_obstacles: usize,
    /// Loaded image variants for raised obstacles
    pub high_obstacles: usize,
    pub power_up_image: bool,
    pub health_image: bool,
}

impl AssetCatalog {
    /// Nothing loaded; every spawn uses placeholder shapes
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn obstacle_variants(&self, placement: Placement) -> usize {
        match placement {
            Placement::Low => self.low_obstacles,
            Placement::High => self.high_obstacles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gate_opens_after_all_resolve() {
        let mut gate = AssetGate::new(3);
        assert!(!gate.is_ready());
        gate.resolve();
        gate.resolve();
        assert_eq!(gate.pending(), 1);
        assert!(!gate.is_ready());
        gate.resolve();
        assert!(gate.is_ready());
        gate.resolve();
        assert_eq!(gate.pending(), 0);
    }

    #[test]
    fn test_catalog_pools() {
        let catalog = AssetCatalog {
            low_obstacles: 4,
            high_obstacles: 3,
            ..Default::default()
        };
        assert_eq!(catalog.obstacle_variants(Placement::Low), 4);
        assert_eq!(catalog.obstacle_variants(Placement::High), 3);
        assert_eq!(AssetCatalog::empty().obstacle_variants(Placement::Low), 0);
    }
}
