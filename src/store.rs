use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::feature::{Feature, FeatureName};

/// The full set of features known to a store: a mapping from feature name to
/// [Feature], keys unique, order irrelevant.
///
/// This is the unit of persistence. Backends hand out whole snapshots by
/// value and accept whole (or single-entry) replacements; the mapping itself
/// carries no interior mutability.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Features {
    features: HashMap<FeatureName, Feature>,
}

impl Features {
    /// An empty feature set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Look up one feature by name.
    pub fn get(&self, name: &str) -> Option<&Feature> {
        self.features.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.features.contains_key(name)
    }

    /// Iterate over all features, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.values()
    }

    /// Insert `feature` under its own name, overwriting any existing entry.
    ///
    /// This bypasses the merge rule; use [Features::upsert] to combine with
    /// an existing definition instead.
    pub fn insert(&mut self, feature: Feature) {
        self.features.insert(feature.name.clone(), feature);
    }

    /// Insert `feature` under its own name, combining with any existing
    /// entry via [Feature::merge] (the existing entry is the older
    /// definition).
    pub fn upsert(&mut self, feature: Feature) {
        let merged = match self.features.remove(feature.name.as_str()) {
            Some(old) => feature.merge(&old),
            None => feature,
        };
        self.features.insert(merged.name.clone(), merged);
    }

    /// Point-update primitive: apply `f` to the current entry for `name` (or
    /// its absence) and write back the result. Returning `None` removes the
    /// entry.
    pub fn alter<F>(&mut self, name: &str, f: F)
    where
        F: FnOnce(Option<Feature>) -> Option<Feature>,
    {
        if let Some(feature) = f(self.features.remove(name)) {
            self.insert(feature);
        }
    }

    /// Key-wise union of two snapshots, `newer` taking precedence.
    ///
    /// Where both snapshots define the same name, the entries are combined
    /// with [Feature::merge]: flags and percentage come from `newer`, actor
    /// allow-lists are unioned.
    pub fn merge(mut self, newer: Features) -> Features {
        for feature in newer.features.into_values() {
            self.upsert(feature);
        }
        self
    }
}

impl FromIterator<Feature> for Features {
    fn from_iter<I: IntoIterator<Item = Feature>>(iter: I) -> Self {
        let mut features = Features::new();
        for feature in iter {
            features.upsert(feature);
        }
        features
    }
}

/// Read access to a feature store.
///
/// Ordinarily the only implementation is the in-memory
/// [crate::MemoryStore], but any backend (file, external cache, database)
/// that can produce a [Features] snapshot qualifies.
pub trait FeatureReader {
    /// The whole feature set, as a snapshot taken at one logical point in
    /// time.
    fn features(&self) -> Features;

    /// Retrieve the feature named `name`, or `None` if absent.
    ///
    /// The default implementation reads a whole snapshot, so it is always
    /// consistent with [FeatureReader::features]; backends with a cheaper
    /// single-key path may override it.
    fn feature(&self, name: &str) -> Option<Feature> {
        self.features().get(name).cloned()
    }
}

/// Read and write access to a feature store.
///
/// Each call is atomic with respect to other calls on the same store, but
/// there is no cross-call transaction: an interleaved read-compute-write from
/// another caller can race, and the last write wins. Backends wanting
/// compound atomicity must provide their own transaction scope.
pub trait FeatureWriter: FeatureReader {
    /// Replace the entire feature set.
    fn update_features(&self, features: Features);

    /// Replace or insert a single feature, keyed by its own name.
    ///
    /// This is a direct overwrite; the merge rule does not apply.
    fn update_feature(&self, feature: Feature);
}

// Delegation is explicit composition: a context that holds a reference (or a
// shared handle) to a store satisfies the capabilities by forwarding to it.

impl<S: FeatureReader + ?Sized> FeatureReader for &S {
    fn features(&self) -> Features {
        (**self).features()
    }

    fn feature(&self, name: &str) -> Option<Feature> {
        (**self).feature(name)
    }
}

impl<S: FeatureWriter + ?Sized> FeatureWriter for &S {
    fn update_features(&self, features: Features) {
        (**self).update_features(features)
    }

    fn update_feature(&self, feature: Feature) {
        (**self).update_feature(feature)
    }
}

impl<S: FeatureReader + ?Sized> FeatureReader for Box<S> {
    fn features(&self) -> Features {
        (**self).features()
    }

    fn feature(&self, name: &str) -> Option<Feature> {
        (**self).feature(name)
    }
}

impl<S: FeatureWriter + ?Sized> FeatureWriter for Box<S> {
    fn update_features(&self, features: Features) {
        (**self).update_features(features)
    }

    fn update_feature(&self, feature: Feature) {
        (**self).update_feature(feature)
    }
}

impl<S: FeatureReader + ?Sized> FeatureReader for Arc<S> {
    fn features(&self) -> Features {
        (**self).features()
    }

    fn feature(&self, name: &str) -> Option<Feature> {
        (**self).feature(name)
    }
}

impl<S: FeatureWriter + ?Sized> FeatureWriter for Arc<S> {
    fn update_features(&self, features: Features) {
        (**self).update_features(features)
    }

    fn update_feature(&self, feature: Feature) {
        (**self).update_feature(feature)
    }
}
