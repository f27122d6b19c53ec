use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::feature::Feature;
use crate::store::{FeatureReader, FeatureWriter, Features};

/// The default, process-local store: one [Features] value behind a lock.
///
/// Each trait call is atomic with respect to the others, which is all the
/// core requires (see [FeatureWriter]). Suitable for tests and single-process
/// deployments; anything needing shared or durable state should implement
/// the capability traits over its own backend instead.
#[derive(Debug, Default)]
pub struct MemoryStore {
    features: RwLock<Features>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with an initial snapshot.
    pub fn with_features(features: Features) -> Self {
        Self {
            features: RwLock::new(features),
        }
    }

    // A poisoned lock only means another thread panicked mid-access; the
    // snapshot itself is always a coherent value, so recover it rather than
    // propagate the poison.
    fn read(&self) -> RwLockReadGuard<'_, Features> {
        self.features.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Features> {
        self.features
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl FeatureReader for MemoryStore {
    fn features(&self) -> Features {
        self.read().clone()
    }

    fn feature(&self, name: &str) -> Option<Feature> {
        self.read().get(name).cloned()
    }
}

impl FeatureWriter for MemoryStore {
    fn update_features(&self, features: Features) {
        *self.write() = features;
    }

    fn update_feature(&self, feature: Feature) {
        self.write().insert(feature);
    }
}
