//! Serializable snapshots of a weight table.
//!
//! A snapshot captures every weight of a [`WeightStore`] so a surrounding component can
//! persist learned values and restore them later with
//! [`LinearVfa::restore`](crate::LinearVfa::restore). Only JSON encoding is provided;
//! where the bytes go is up to the caller.

use crate::error::Result;
use crate::weights::{FunctionWeight, WeightStore};
use serde::{Deserialize, Serialize};

/// A point-in-time copy of all weights in a store, sorted by feature id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSnapshot {
    /// The default weight of the store the snapshot was taken from.
    pub default_weight: f64,
    /// Capture time in microseconds since the Unix epoch.
    pub created_at: u64,
    /// Every weight in the store.
    pub weights: Vec<FunctionWeight>,
}

impl WeightSnapshot {
    /// Captures all weights currently held by `store`.
    pub fn capture(store: &WeightStore) -> Self {
        let mut weights: Vec<FunctionWeight> = store.iter().copied().collect();
        weights.sort_by_key(|w| w.id());
        Self {
            default_weight: store.default_weight(),
            created_at: now_micros(),
            weights,
        }
    }

    /// Returns the number of weights in the snapshot.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns `true` if the snapshot holds no weights.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Encodes the snapshot as JSON.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }

    /// Decodes a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn now_micros() -> u64 {
    let now = chrono::Utc::now();
    (now.timestamp() as u64) * 1_000_000 + (now.timestamp_subsec_micros() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::feature::FeatureId;

    #[test]
    fn test_capture_sorts_by_id() {
        let mut store = WeightStore::new(0.5);
        store.set(FeatureId::new(10), 1.0);
        store.set(FeatureId::new(-2), 2.0);
        store.get_or_create(FeatureId::new(4));

        let snapshot = WeightSnapshot::capture(&store);
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.default_weight, 0.5);
        let ids: Vec<i32> = snapshot.weights.iter().map(|w| w.id().get()).collect();
        assert_eq!(ids, vec![-2, 4, 10]);
        assert!(snapshot.created_at > 0);
    }

    #[test]
    fn test_json_round_trip() {
        let mut store = WeightStore::new(0.0);
        store.set(FeatureId::new(1), -0.125);

        let snapshot = WeightSnapshot::capture(&store);
        let json = snapshot.to_json(true).unwrap();
        assert!(json.contains("default_weight"));

        let decoded = WeightSnapshot::from_json(&json).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_from_json_invalid() {
        let result = WeightSnapshot::from_json("{\"weights\": 3}");
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_empty_snapshot() {
        let store = WeightStore::new(0.0);
        assert!(WeightSnapshot::capture(&store).is_empty());
    }
}
