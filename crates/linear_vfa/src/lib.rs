//! # Linear VFA - Linear Value Function Approximation
//!
//! Linear value function approximation over sparse features, for AIngle reinforcement
//! learning agents.
//!
//! ## Overview
//!
//! A [`FeatureDatabase`] turns a state (or a state paired with candidate actions) into a
//! sparse list of `(feature id, activation)` pairs. [`LinearVfa`] keeps one learned
//! weight per feature id and predicts
//!
//! ```text
//! V(s) = Σ xᵢ · wᵢ
//! ```
//!
//! over the active features. Because the model is linear, the gradient of a prediction
//! with respect to weight `wᵢ` is just the activation `xᵢ`, which is what
//! [`ValueFunctionApproximation::weight_gradient`] returns. Learning rules (TD, SARSA,
//! gradient-descent Q-learning) live outside this crate; they consume predictions and
//! gradients and write weights back.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐  features   ┌───────────────────────────────┐
//! │ FeatureDatabase │────────────►│           LinearVfa           │
//! │ (tile coding,   │             │                               │
//! │  RBF, raw attrs)│             │  predictor ─► Approximation-  │
//! └─────────────────┘             │     │         Result          │
//!                                 │     ▼           │             │
//!                                 │  WeightStore    ▼             │
//!                                 │  (lazy, by id)  WeightGradient│
//!                                 └───────────────────────────────┘
//! ```
//!
//! ## Learning Loop
//!
//! ```rust,ignore
//! use linear_vfa::{LinearVfa, ValueFunctionApproximation};
//!
//! let mut vfa = LinearVfa::with_default_weight(tile_coder, 0.0);
//!
//! let current = vfa.state_value(&state);
//! let next = vfa.state_value(&next_state);
//! let td_error = reward + gamma * next.predicted_value() - current.predicted_value();
//!
//! let gradient = vfa.weight_gradient(&current);
//! for (id, partial) in gradient.iter() {
//!     let w = vfa.function_weight(id).map(|w| w.value()).unwrap_or(0.0);
//!     vfa.set_weight(id, w + alpha * td_error * partial);
//! }
//! ```
//!
//! ## Threading
//!
//! Nothing here is synchronized. Share an approximator between threads only behind
//! your own lock.

pub mod approximation;
pub mod config;
pub mod error;
pub mod feature;
pub mod snapshot;
pub mod value_function;
pub mod weights;

pub use approximation::{ActionApproximationResult, ApproximationResult, WeightGradient};
pub use config::VfaConfig;
pub use error::{Error, Result};
pub use feature::{ActionFeatures, FeatureDatabase, FeatureId, StateFeature};
pub use snapshot::WeightSnapshot;
pub use value_function::{LinearVfa, ValueFunctionApproximation};
pub use weights::{FunctionWeight, WeightHandle, WeightStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
