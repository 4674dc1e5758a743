use serde::Serialize;
use thiserror::Error;

use crate::catalog::models::{DesignId, HouseDesign};

pub const COMPARE_CAPACITY: usize = 3;

/// The compare action needs at least this many designs.
pub const MIN_TO_COMPARE: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    #[error("You can only compare up to {capacity} designs at a time")]
    CapacityReached { capacity: usize },
    #[error("design {id} is already selected for comparison")]
    AlreadySelected { id: DesignId },
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CompareToggle {
    Added,
    Removed,
    /// Set was full; nothing changed.
    Rejected,
}

/// Designs picked for side-by-side comparison, in the order they were
/// picked. Never holds two designs with the same id and never grows past
/// `COMPARE_CAPACITY`; a full set refuses new entries instead of evicting.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct ComparisonSet {
    designs: Vec<HouseDesign>,
}

impl ComparisonSet {
    pub fn new() -> Self {
        Self {
            designs: Vec::with_capacity(COMPARE_CAPACITY),
        }
    }

    pub fn try_add(&mut self, design: HouseDesign) -> Result<(), CompareError> {
        if self.contains(design.id) {
            return Err(CompareError::AlreadySelected { id: design.id });
        }
        if self.is_full() {
            return Err(CompareError::CapacityReached {
                capacity: COMPARE_CAPACITY,
            });
        }
        self.designs.push(design);
        Ok(())
    }

    pub fn remove(&mut self, id: DesignId) -> bool {
        let before = self.designs.len();
        self.designs.retain(|design| design.id != id);
        self.designs.len() != before
    }

    pub fn toggle(&mut self, design: &HouseDesign) -> CompareToggle {
        if self.remove(design.id) {
            return CompareToggle::Removed;
        }
        match self.try_add(design.clone()) {
            Ok(()) => CompareToggle::Added,
            Err(_) => CompareToggle::Rejected,
        }
    }

    pub fn clear(&mut self) {
        self.designs.clear();
    }

    pub fn contains(&self, id: DesignId) -> bool {
        self.designs.iter().any(|design| design.id == id)
    }

    pub fn len(&self) -> usize {
        self.designs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.designs.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.designs.len() >= COMPARE_CAPACITY
    }

    pub fn can_compare(&self) -> bool {
        self.designs.len() >= MIN_TO_COMPARE
    }

    pub fn ids(&self) -> Vec<DesignId> {
        self.designs.iter().map(|design| design.id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HouseDesign> {
        self.designs.iter()
    }

    pub fn as_slice(&self) -> &[HouseDesign] {
        &self.designs
    }
}
