//! Value function approximation over sparse features.
//!
//! [`ValueFunctionApproximation`] is the capability a learner programs against: it
//! produces predictions for states and state-action pairs, exposes the gradient of a
//! prediction with respect to its weights, and lets the learner write weights back.
//!
//! [`LinearVfa`] implements it as a linear combination `V(s) = Σ xᵢ·wᵢ` of the
//! activations returned by a [`FeatureDatabase`] and a lazily grown weight table.

use crate::approximation::{ActionApproximationResult, ApproximationResult, WeightGradient};
use crate::config::VfaConfig;
use crate::error::Result;
use crate::feature::{FeatureDatabase, FeatureId, StateFeature};
use crate::snapshot::WeightSnapshot;
use crate::weights::{FunctionWeight, WeightHandle, WeightStore};

/// A trait for value function approximators driven by a feature database.
pub trait ValueFunctionApproximation {
    /// The state type values are predicted for.
    type State;
    /// The action type used for state-action queries.
    type Action;

    /// Predicts the value of a state.
    fn state_value(&mut self, state: &Self::State) -> ApproximationResult;

    /// Predicts the value of a state paired with each candidate action, preserving the
    /// order of `actions`.
    fn state_action_values(
        &mut self,
        state: &Self::State,
        actions: &[Self::Action],
    ) -> Vec<ActionApproximationResult<Self::Action>>;

    /// Returns the gradient of a previous prediction with respect to its weights.
    fn weight_gradient(&self, result: &ApproximationResult) -> WeightGradient;

    /// Discards all learned weights.
    fn reset_weights(&mut self);

    /// Sets the weight for a feature, creating it if necessary.
    fn set_weight(&mut self, id: FeatureId, value: f64);

    /// Returns the number of features declared by the feature database.
    fn num_features(&self) -> usize;

    /// Looks up the weight for a feature without creating it.
    fn function_weight(&self, id: FeatureId) -> Option<&FunctionWeight>;

    /// Returns an independent deep copy of this approximator.
    fn copy(&self) -> Result<Self>
    where
        Self: Sized;
}

/// A linear value function approximator with one weight per feature id.
///
/// Weights are created the first time their feature shows up, either in a prediction
/// or through [`set_weight`](ValueFunctionApproximation::set_weight).
///
/// ```
/// use linear_vfa::{
///     ActionFeatures, FeatureDatabase, FeatureId, LinearVfa, StateFeature,
///     ValueFunctionApproximation,
/// };
///
/// struct Identity;
///
/// impl FeatureDatabase for Identity {
///     type State = Vec<StateFeature>;
///     type Action = ();
///
///     fn feature_count(&self) -> usize {
///         0
///     }
///
///     fn state_features(&mut self, state: &Self::State) -> Vec<StateFeature> {
///         state.clone()
///     }
///
///     fn action_feature_sets(
///         &mut self,
///         state: &Self::State,
///         actions: &[()],
///     ) -> Vec<ActionFeatures<()>> {
///         actions.iter().map(|_| ActionFeatures::new((), state.clone())).collect()
///     }
///
///     fn copy(&self) -> linear_vfa::Result<Self> {
///         Ok(Identity)
///     }
/// }
///
/// let mut vfa = LinearVfa::new(Identity);
/// vfa.set_weight(FeatureId::new(1), 0.5);
/// vfa.set_weight(FeatureId::new(2), -1.0);
///
/// let state = vec![StateFeature::new(1, 2.0), StateFeature::new(2, 3.0)];
/// let result = vfa.state_value(&state);
/// assert_eq!(result.predicted_value(), -2.0);
///
/// let gradient = vfa.weight_gradient(&result);
/// assert_eq!(gradient.get(FeatureId::new(1)), Some(2.0));
/// ```
#[derive(Debug)]
pub struct LinearVfa<D> {
    feature_database: D,
    weights: WeightStore,
    config: VfaConfig,
}

impl<D: FeatureDatabase> LinearVfa<D> {
    /// Creates an approximator whose weights start at zero.
    pub fn new(feature_database: D) -> Self {
        Self::build(feature_database, VfaConfig::default())
    }

    /// Creates an approximator whose weights start at `default_weight`.
    pub fn with_default_weight(feature_database: D, default_weight: f64) -> Self {
        Self::build(feature_database, VfaConfig::new(default_weight))
    }

    /// Creates an approximator from a validated configuration.
    pub fn with_config(feature_database: D, config: VfaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(feature_database, config))
    }

    fn build(feature_database: D, config: VfaConfig) -> Self {
        let capacity = config
            .capacity_hint
            .unwrap_or_else(|| feature_database.feature_count());
        Self {
            weights: WeightStore::with_capacity(config.default_weight, capacity),
            feature_database,
            config,
        }
    }

    /// Returns the approximator's configuration.
    pub fn config(&self) -> &VfaConfig {
        &self.config
    }

    /// Returns the feature database.
    pub fn feature_database(&self) -> &D {
        &self.feature_database
    }

    /// Returns the weight store.
    pub fn weight_store(&self) -> &WeightStore {
        &self.weights
    }

    /// Computes the linear combination of `features` with their weights.
    ///
    /// Features are visited once, in order. Missing weights are created at the default
    /// value. A feature id that appears more than once contributes once per occurrence.
    pub fn approximate(&mut self, features: Vec<StateFeature>) -> ApproximationResult {
        let mut active = Vec::with_capacity(features.len());
        let mut predicted_value = 0.0;
        for feature in &features {
            let weight = self.weights.get_or_create(feature.id);
            predicted_value += feature.value * weight.value();
            active.push(weight);
        }
        ApproximationResult::new(predicted_value, features, active)
    }

    /// Returns the live weight a handle from a previous result refers to.
    pub fn resolve_weight(&self, handle: &WeightHandle) -> Option<&FunctionWeight> {
        self.weights.resolve(handle)
    }

    /// Sets the live weight a handle from a previous result refers to.
    ///
    /// Fails with [`Error::StaleHandle`](crate::Error::StaleHandle) if the weights were
    /// reset after the handle was issued.
    pub fn update_weight(&mut self, handle: &WeightHandle, value: f64) -> Result<()> {
        self.weights.update(handle, value)
    }

    /// Returns an independent approximator with a copied feature database and fresh
    /// copies of every weight.
    pub fn deep_copy(&self) -> Result<Self> {
        let feature_database = self.feature_database.copy()?;
        log::debug!("Copying linear VFA with {} weights", self.weights.len());
        Ok(Self {
            feature_database,
            weights: self.weights.deep_copy(),
            config: self.config.clone(),
        })
    }

    /// Captures every weight for persistence.
    pub fn snapshot(&self) -> WeightSnapshot {
        WeightSnapshot::capture(&self.weights)
    }

    /// Replaces all weights with the contents of `snapshot`.
    ///
    /// Weights created afterwards still use this approximator's configured default.
    pub fn restore(&mut self, snapshot: &WeightSnapshot) {
        if snapshot.default_weight != self.config.default_weight {
            log::warn!(
                "Snapshot default weight {} differs from configured {}; keeping configured",
                snapshot.default_weight,
                self.config.default_weight
            );
        }
        self.weights.reset();
        for weight in &snapshot.weights {
            self.weights.set(weight.id(), weight.value());
        }
        log::debug!("Restored {} weights from snapshot", snapshot.len());
    }
}

impl<D: FeatureDatabase> ValueFunctionApproximation for LinearVfa<D> {
    type State = D::State;
    type Action = D::Action;

    fn state_value(&mut self, state: &D::State) -> ApproximationResult {
        let features = self.feature_database.state_features(state);
        self.approximate(features)
    }

    fn state_action_values(
        &mut self,
        state: &D::State,
        actions: &[D::Action],
    ) -> Vec<ActionApproximationResult<D::Action>> {
        let feature_sets = self.feature_database.action_feature_sets(state, actions);
        feature_sets
            .into_iter()
            .map(|set| ActionApproximationResult::new(set.action, self.approximate(set.features)))
            .collect()
    }

    fn weight_gradient(&self, result: &ApproximationResult) -> WeightGradient {
        result.gradient()
    }

    fn reset_weights(&mut self) {
        log::debug!("Resetting {} weights", self.weights.len());
        self.weights.reset();
    }

    fn set_weight(&mut self, id: FeatureId, value: f64) {
        self.weights.set(id, value);
    }

    fn num_features(&self) -> usize {
        self.feature_database.feature_count()
    }

    fn function_weight(&self, id: FeatureId) -> Option<&FunctionWeight> {
        self.weights.get(id)
    }

    fn copy(&self) -> Result<Self> {
        self.deep_copy()
    }
}
