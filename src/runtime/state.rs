//! Base trait for feature state.

use std::fmt::Debug;

/// Marker trait for feature state objects.
///
/// States should be:
/// - Plain data (Clone to publish snapshots)
/// - Self-contained (everything the feature needs to decide and render)
/// - Comparable (PartialEq for exact assertions in the test harness)
pub trait FeatureState: Clone + Debug + PartialEq + Send + 'static {}
