//! Lazily populated storage for feature weights.
//!
//! The [`WeightStore`] is the single owner of every [`FunctionWeight`]. Weights live in
//! an arena indexed by feature id, so the slot a feature gets on first encounter stays
//! the same until the store is reset. Prediction results refer to weights through
//! [`WeightHandle`]s, which can be resolved back to the live weight as long as the
//! store that issued them has not been reset since.

use crate::error::{Error, Result};
use crate::feature::FeatureId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_STORE_ID: AtomicU64 = AtomicU64::new(1);

/// A learned scalar coefficient for one feature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FunctionWeight {
    id: FeatureId,
    value: f64,
}

impl FunctionWeight {
    /// Creates a new weight for `id` with the given value.
    pub fn new(id: FeatureId, value: f64) -> Self {
        Self { id, value }
    }

    /// Returns the feature this weight belongs to.
    pub fn id(&self) -> FeatureId {
        self.id
    }

    /// Returns the current weight value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Overwrites the weight value in place.
    pub fn set_value(&mut self, value: f64) {
        self.value = value;
    }
}

/// A non-owning reference to a weight held by a [`WeightStore`].
///
/// The handle also caches the weight value read when it was issued; that value never
/// changes, even if the live weight is later updated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightHandle {
    feature_id: FeatureId,
    slot: usize,
    store: u64,
    generation: u64,
    value: f64,
}

impl WeightHandle {
    /// Returns the feature the referenced weight belongs to.
    pub fn feature_id(&self) -> FeatureId {
        self.feature_id
    }

    /// Returns the weight value at the time the handle was issued.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns `true` if both handles refer to the same live weight object.
    pub fn same_weight(&self, other: &WeightHandle) -> bool {
        self.store == other.store && self.generation == other.generation && self.slot == other.slot
    }
}

/// Maps feature ids to weights, creating them on first use.
///
/// There is no internal synchronization; callers sharing a store across threads must
/// guard it themselves.
#[derive(Debug)]
pub struct WeightStore {
    id: u64,
    generation: u64,
    default_weight: f64,
    slots: Vec<FunctionWeight>,
    index: HashMap<FeatureId, usize>,
}

impl WeightStore {
    /// Creates an empty store whose new weights start at `default_weight`.
    pub fn new(default_weight: f64) -> Self {
        Self::with_capacity(default_weight, 0)
    }

    /// Creates an empty store with room for `capacity` weights before reallocating.
    pub fn with_capacity(default_weight: f64, capacity: usize) -> Self {
        Self {
            id: NEXT_STORE_ID.fetch_add(1, Ordering::Relaxed),
            generation: 0,
            default_weight,
            slots: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Returns the initial value given to lazily created weights.
    pub fn default_weight(&self) -> f64 {
        self.default_weight
    }

    /// Returns a handle to the weight for `id`, creating it at the default value if
    /// it has never been seen.
    pub fn get_or_create(&mut self, id: FeatureId) -> WeightHandle {
        let slot = match self.index.get(&id) {
            Some(&slot) => slot,
            None => self.insert(FunctionWeight::new(id, self.default_weight)),
        };
        self.handle(slot)
    }

    /// Sets the weight for `id`, updating it in place if it exists and creating it
    /// with `value` otherwise.
    pub fn set(&mut self, id: FeatureId, value: f64) {
        match self.index.get(&id) {
            Some(&slot) => self.slots[slot].set_value(value),
            None => {
                self.insert(FunctionWeight::new(id, value));
            }
        }
    }

    /// Looks up the weight for `id` without creating it.
    pub fn get(&self, id: FeatureId) -> Option<&FunctionWeight> {
        self.index.get(&id).map(|&slot| &self.slots[slot])
    }

    /// Resolves a handle to the live weight it refers to.
    ///
    /// Returns `None` if the handle was issued by another store or before the last reset.
    pub fn resolve(&self, handle: &WeightHandle) -> Option<&FunctionWeight> {
        if handle.store != self.id || handle.generation != self.generation {
            return None;
        }
        self.slots.get(handle.slot)
    }

    /// Sets the value of the weight a handle refers to.
    pub fn update(&mut self, handle: &WeightHandle, value: f64) -> Result<()> {
        if handle.store != self.id || handle.generation != self.generation {
            return Err(Error::StaleHandle {
                feature_id: handle.feature_id,
            });
        }
        let weight = self
            .slots
            .get_mut(handle.slot)
            .ok_or(Error::StaleHandle {
                feature_id: handle.feature_id,
            })?;
        weight.set_value(value);
        Ok(())
    }

    /// Discards every weight. Handles issued before the reset become stale.
    pub fn reset(&mut self) {
        self.slots.clear();
        self.index.clear();
        self.generation += 1;
    }

    /// Returns the number of weights in the store.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if no weight has been created yet.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates over all weights in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &FunctionWeight> {
        self.slots.iter()
    }

    /// Returns an independent store holding a fresh copy of every weight.
    ///
    /// Handles issued by `self` do not resolve against the copy.
    pub fn deep_copy(&self) -> Self {
        let mut copy = Self::with_capacity(self.default_weight, self.slots.len());
        for weight in &self.slots {
            copy.insert(FunctionWeight::new(weight.id(), weight.value()));
        }
        copy
    }

    fn insert(&mut self, weight: FunctionWeight) -> usize {
        let slot = self.slots.len();
        log::trace!("Created weight for feature {} = {}", weight.id(), weight.value());
        self.index.insert(weight.id(), slot);
        self.slots.push(weight);
        slot
    }

    fn handle(&self, slot: usize) -> WeightHandle {
        let weight = &self.slots[slot];
        WeightHandle {
            feature_id: weight.id(),
            slot,
            store: self.id,
            generation: self.generation,
            value: weight.value(),
        }
    }
}
