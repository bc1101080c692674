//! Prediction results and weight gradients.

use crate::feature::{FeatureId, StateFeature};
use crate::weights::WeightHandle;
use std::collections::HashMap;

/// An immutable record of one linear prediction.
///
/// `weights` is index-aligned with `state_features`: the weight at position `i` is the
/// one that multiplied the feature at position `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApproximationResult {
    predicted_value: f64,
    state_features: Vec<StateFeature>,
    weights: Vec<WeightHandle>,
}

impl ApproximationResult {
    pub(crate) fn new(
        predicted_value: f64,
        state_features: Vec<StateFeature>,
        weights: Vec<WeightHandle>,
    ) -> Self {
        debug_assert_eq!(state_features.len(), weights.len());
        Self {
            predicted_value,
            state_features,
            weights,
        }
    }

    /// Returns the predicted value.
    pub fn predicted_value(&self) -> f64 {
        self.predicted_value
    }

    /// Returns the features the prediction was computed from, in input order.
    pub fn state_features(&self) -> &[StateFeature] {
        &self.state_features
    }

    /// Returns the weights that were active in the prediction, aligned with
    /// [`state_features`](Self::state_features).
    pub fn weights(&self) -> &[WeightHandle] {
        &self.weights
    }

    /// Returns the handle used for the first occurrence of `id`, if it was active.
    pub fn weight_for(&self, id: FeatureId) -> Option<&WeightHandle> {
        self.weights.iter().find(|w| w.feature_id() == id)
    }

    /// Returns the gradient of the prediction with respect to its active weights.
    pub fn gradient(&self) -> WeightGradient {
        WeightGradient::from(self)
    }
}

/// A prediction for one candidate action of a state-action query.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionApproximationResult<A> {
    /// The candidate action.
    pub action: A,
    /// The prediction for the state paired with `action`.
    pub result: ApproximationResult,
}

impl<A> ActionApproximationResult<A> {
    /// Creates a new `ActionApproximationResult`.
    pub fn new(action: A, result: ApproximationResult) -> Self {
        Self { action, result }
    }
}

/// Sparse partial derivatives of a prediction, keyed by feature id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightGradient {
    partials: HashMap<FeatureId, f64>,
}

impl WeightGradient {
    /// Creates an empty gradient with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            partials: HashMap::with_capacity(capacity),
        }
    }

    /// Sets the partial derivative for `id`, replacing any previous entry.
    pub fn insert(&mut self, id: FeatureId, partial: f64) {
        self.partials.insert(id, partial);
    }

    /// Returns the partial derivative for `id`, if present.
    pub fn get(&self, id: FeatureId) -> Option<f64> {
        self.partials.get(&id).copied()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.partials.len()
    }

    /// Returns `true` if the gradient has no entries.
    pub fn is_empty(&self) -> bool {
        self.partials.is_empty()
    }

    /// Iterates over `(feature id, partial derivative)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (FeatureId, f64)> + '_ {
        self.partials.iter().map(|(&id, &partial)| (id, partial))
    }
}

impl From<&ApproximationResult> for WeightGradient {
    /// For a linear model the partial derivative with respect to a weight is the
    /// activation that multiplied it. Repeated ids keep the last activation.
    fn from(result: &ApproximationResult) -> Self {
        let mut gradient = WeightGradient::with_capacity(result.state_features.len());
        for feature in &result.state_features {
            gradient.insert(feature.id, feature.value);
        }
        gradient
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weights::WeightStore;

    fn predict(store: &mut WeightStore, features: Vec<StateFeature>) -> ApproximationResult {
        let weights: Vec<WeightHandle> = features
            .iter()
            .map(|f| store.get_or_create(f.id))
            .collect();
        let value = features
            .iter()
            .zip(&weights)
            .map(|(f, w)| f.value * w.value())
            .sum();
        ApproximationResult::new(value, features, weights)
    }

    #[test]
    fn test_gradient_is_activations() {
        let mut store = WeightStore::new(0.7);
        let result = predict(
            &mut store,
            vec![StateFeature::new(1, 2.0), StateFeature::new(2, 3.0)],
        );

        let gradient = result.gradient();
        assert_eq!(gradient.len(), 2);
        assert_eq!(gradient.get(FeatureId::new(1)), Some(2.0));
        assert_eq!(gradient.get(FeatureId::new(2)), Some(3.0));
        assert_eq!(gradient.get(FeatureId::new(3)), None);
    }

    #[test]
    fn test_gradient_duplicate_ids_keep_last() {
        let mut store = WeightStore::new(0.0);
        let result = predict(
            &mut store,
            vec![StateFeature::new(4, 1.0), StateFeature::new(4, 0.25)],
        );

        let gradient = WeightGradient::from(&result);
        assert_eq!(gradient.len(), 1);
        assert_eq!(gradient.get(FeatureId::new(4)), Some(0.25));
    }

    #[test]
    fn test_empty_result() {
        let result = ApproximationResult::new(0.0, Vec::new(), Vec::new());
        assert_eq!(result.predicted_value(), 0.0);
        assert!(result.weights().is_empty());
        assert!(result.gradient().is_empty());
    }

    #[test]
    fn test_weight_for() {
        let mut store = WeightStore::new(0.0);
        let result = predict(&mut store, vec![StateFeature::new(8, 1.0)]);
        assert!(result.weight_for(FeatureId::new(8)).is_some());
        assert!(result.weight_for(FeatureId::new(9)).is_none());
    }
}
