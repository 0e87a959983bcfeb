use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use uuid::Uuid;

/// Source of fresh identifiers for collection elements.
///
/// Clones share the same sequence.
#[derive(Clone)]
pub struct IdGenerator {
    generate: Arc<dyn Fn() -> Uuid + Send + Sync>,
}

impl IdGenerator {
    /// Random v4 UUIDs.
    pub fn random() -> Self {
        Self {
            generate: Arc::new(Uuid::new_v4),
        }
    }

    /// `00000000-0000-0000-0000-000000000000`, `...0001`, and so on.
    ///
    /// Each call starts its own sequence, so parallel tests never interfere.
    pub fn incrementing() -> Self {
        let next = AtomicU64::new(0);
        Self {
            generate: Arc::new(move || {
                let value = next.fetch_add(1, Ordering::Relaxed);
                Uuid::from_u128(u128::from(value))
            }),
        }
    }

    pub fn constant(id: Uuid) -> Self {
        Self {
            generate: Arc::new(move || id),
        }
    }

    pub fn generate(&self) -> Uuid {
        (self.generate)()
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::random()
    }
}

impl fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdGenerator").finish_non_exhaustive()
    }
}
