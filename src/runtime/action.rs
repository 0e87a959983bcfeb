//! Base trait for actions in the unidirectional runtime.

use std::fmt::Debug;

/// Marker trait for action enums.
///
/// Actions represent:
/// - User intents (button taps, tab switches)
/// - Effect results (port responses tagged success/failure)
/// - Child actions wrapped by the parent feature
///
/// Actions are processed by reducers to mutate state and describe effects.
/// `Clone` lets scoping combinators hand a copy to the child before the
/// parent sees the original; `PartialEq` lets the test harness compare
/// received actions.
pub trait Action: Clone + Debug + PartialEq + Send + 'static {}
