use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::types::{Purchase, Resource};

/// A multiset of resource cards, indexed by [`Resource::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceBundle {
    counts: [u8; Resource::ALL.len()],
}

impl Default for ResourceBundle {
    fn default() -> Self {
        Self::zero()
    }
}

impl ResourceBundle {
    pub const fn from_counts(counts: [u8; 5]) -> Self {
        Self { counts }
    }

    pub const fn zero() -> Self {
        Self {
            counts: [0; Resource::ALL.len()],
        }
    }

    pub fn single(resource: Resource, amount: u8) -> Self {
        let mut bundle = Self::zero();
        bundle.add(resource, amount);
        bundle
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().copied().map(u32::from).sum()
    }

    pub fn add(&mut self, resource: Resource, amount: u8) {
        let slot = &mut self.counts[resource.index()];
        *slot = slot.saturating_add(amount);
    }

    pub fn add_bundle(&mut self, other: &ResourceBundle) {
        for (resource, amount) in other.iter() {
            self.add(resource, amount);
        }
    }

    pub fn subtract(&mut self, resource: Resource, amount: u8) -> Result<(), ResourceError> {
        let available = self.get(resource);
        let Some(left) = available.checked_sub(amount) else {
            return Err(ResourceError::InsufficientResource {
                resource,
                available,
                requested: amount,
            });
        };
        self.counts[resource.index()] = left;
        Ok(())
    }

    /// Removes all of `other` or nothing at all.
    pub fn subtract_bundle(&mut self, other: &ResourceBundle) -> Result<(), ResourceError> {
        if !self.can_afford(other) {
            return Err(ResourceError::InsufficientBundle);
        }
        for (slot, amount) in self.counts.iter_mut().zip(other.counts) {
            *slot -= amount;
        }
        Ok(())
    }

    /// Removes every card of `resource`, returning how many there were.
    pub fn take_all(&mut self, resource: Resource) -> u8 {
        std::mem::take(&mut self.counts[resource.index()])
    }

    pub fn can_afford(&self, other: &ResourceBundle) -> bool {
        other.iter().all(|(resource, need)| self.get(resource) >= need)
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Resource, u8)> + '_ {
        Resource::ALL
            .into_iter()
            .map(move |resource| (resource, self.get(resource)))
    }

    /// Every card as an individual entry, in resource order.
    pub fn cards(&self) -> Vec<Resource> {
        self.iter()
            .flat_map(|(resource, amount)| std::iter::repeat(resource).take(amount as usize))
            .collect()
    }

    /// Zero-filled count map over all five resources.
    pub fn count_map(&self) -> BTreeMap<Resource, u8> {
        self.iter().collect()
    }

    pub fn get(&self, resource: Resource) -> u8 {
        self.counts[resource.index()]
    }
}

impl fmt::Display for ResourceBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "nothing");
        }
        let held = self
            .iter()
            .filter(|(_, amount)| *amount > 0)
            .map(|(resource, amount)| format!("{amount}x{resource}"))
            .join(", ");
        write!(f, "{held}")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    #[error("insufficient {resource}: have {available}, need {requested}")]
    InsufficientResource {
        resource: Resource,
        available: u8,
        requested: u8,
    },
    #[error("insufficient resources to cover bundle")]
    InsufficientBundle,
}

pub const COST_ROAD: ResourceBundle = ResourceBundle::from_counts([0, 1, 0, 1, 0]);
pub const COST_SETTLEMENT: ResourceBundle = ResourceBundle::from_counts([1, 1, 1, 1, 0]);
pub const COST_CITY: ResourceBundle = ResourceBundle::from_counts([2, 0, 0, 0, 3]);
pub const COST_DEVELOPMENT: ResourceBundle = ResourceBundle::from_counts([1, 0, 1, 0, 1]);

pub const BUILDING_COSTS: [(Purchase, ResourceBundle); 4] = [
    (Purchase::Road, COST_ROAD),
    (Purchase::Settlement, COST_SETTLEMENT),
    (Purchase::City, COST_CITY),
    (Purchase::DevelopmentCard, COST_DEVELOPMENT),
];

pub fn cost_of(purchase: Purchase) -> ResourceBundle {
    match purchase {
        Purchase::Road => COST_ROAD,
        Purchase::Settlement => COST_SETTLEMENT,
        Purchase::City => COST_CITY,
        Purchase::DevelopmentCard => COST_DEVELOPMENT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn costs_follow_resource_order() {
        assert_eq!(COST_CITY.get(Resource::Wheat), 2);
        assert_eq!(COST_CITY.get(Resource::Rock), 3);
        assert_eq!(COST_ROAD.get(Resource::Wood), 1);
        assert_eq!(COST_ROAD.get(Resource::Clay), 1);
        assert_eq!(COST_DEVELOPMENT.total(), 3);
        assert_eq!(COST_SETTLEMENT.get(Resource::Rock), 0);
    }

    #[test]
    fn subtract_bundle_is_all_or_nothing() {
        let mut hand = ResourceBundle::from_counts([1, 1, 0, 1, 0]);
        assert!(hand.subtract_bundle(&COST_SETTLEMENT).is_err());
        assert_eq!(hand.total(), 3);
        assert!(hand.subtract_bundle(&COST_ROAD).is_ok());
        assert_eq!(hand, ResourceBundle::single(Resource::Wheat, 1));
    }

    #[test]
    fn count_map_is_zero_filled() {
        let map = ResourceBundle::single(Resource::Sheep, 2).count_map();
        assert_eq!(map.len(), 5);
        assert_eq!(map[&Resource::Sheep], 2);
        assert_eq!(map[&Resource::Rock], 0);
    }
}
