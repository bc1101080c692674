//! Sparse state features and the feature database contract.
//!
//! A feature database turns a state, or a state paired with candidate actions, into a
//! sparse list of `(feature id, activation)` pairs. Tile coding, radial basis functions
//! and raw attribute extraction are all feature databases; the approximator only ever
//! sees this trait.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// An opaque identifier for a feature, assigned by a [`FeatureDatabase`].
///
/// Identifiers are not validated; whatever the database emits is used as a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FeatureId(i32);

impl FeatureId {
    /// Creates a `FeatureId` from a raw integer.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Returns the raw integer identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for FeatureId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single active feature of a state: its identifier and activation value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateFeature {
    /// The feature identifier.
    pub id: FeatureId,
    /// The activation value, typically but not necessarily in `[0, 1]`.
    pub value: f64,
}

impl StateFeature {
    /// Creates a new `StateFeature`.
    pub fn new(id: impl Into<FeatureId>, value: f64) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }
}

/// The features of a state paired with one candidate action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionFeatures<A> {
    /// The candidate action these features were generated for.
    pub action: A,
    /// The active features of the state-action pair.
    pub features: Vec<StateFeature>,
}

impl<A> ActionFeatures<A> {
    /// Creates a new `ActionFeatures` entry.
    pub fn new(action: A, features: Vec<StateFeature>) -> Self {
        Self { action, features }
    }
}

/// A source of sparse features for states and state-action pairs.
///
/// Feature extraction takes `&mut self` because databases that generate features on
/// demand allocate new identifiers the first time they see a novel state structure.
pub trait FeatureDatabase {
    /// The state type features are extracted from.
    type State;
    /// The action type used for state-action queries.
    type Action;

    /// Returns the declared total number of features, or 0 if features are
    /// generated lazily and the count is not known in advance.
    fn feature_count(&self) -> usize;

    /// Returns the active features of `state`, in a deterministic order.
    fn state_features(&mut self, state: &Self::State) -> Vec<StateFeature>;

    /// Returns one feature set per candidate action, in the order of `actions`.
    fn action_feature_sets(
        &mut self,
        state: &Self::State,
        actions: &[Self::Action],
    ) -> Vec<ActionFeatures<Self::Action>>;

    /// Returns an independent copy of this database.
    ///
    /// Databases that cannot be copied in their current configuration return
    /// [`Error::FeatureDatabase`](crate::Error::FeatureDatabase).
    fn copy(&self) -> Result<Self>
    where
        Self: Sized;
}
