//! Unidirectional state runtime.
//!
//! # Architecture
//!
//! ```text
//! Action ──→ Reducer ──→ State ──→ Observers
//!    ↑          │
//!    │          ↓
//!    └────── Effect
//! ```
//!
//! - **State**: Plain data describing one feature
//! - **Action**: User events and effect results
//! - **Reducer**: Synchronous transition that mutates state and describes effects
//! - **Effect**: Cancellable async work feeding actions back
//!
//! Reducers compose through [`ReducerExt`]: `scope` for plain fields,
//! `if_let` for optional children and `for_each` for [`IdentifiedVec`]
//! collections.

mod action;
mod effect;
mod engine;
mod identified;
mod reducer;
mod scope;
mod state;
mod store;
mod test_store;

pub use action::Action;
pub use effect::{CancelId, Effect, Emitter};
pub use identified::{Identifiable, IdentifiedError, IdentifiedVec};
pub use reducer::{Reduce, Reducer};
pub use scope::{Case, ElementCase, ForEach, IfLet, Lens, ReducerExt, Scope};
pub use state::FeatureState;
pub use store::{Store, StoreError, StoreSettings, Subscription};
pub use test_store::TestStore;
