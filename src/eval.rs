use log::debug;

use crate::feature::Feature;
use crate::store::{FeatureReader, FeatureWriter};

/// Whether the feature named `name` is globally enabled.
///
/// An absent feature reads as disabled. This deliberately consults only the
/// global switch: a feature with a percentage rollout or an allow-list and
/// the global switch off still reads as `false` here. Per-actor activation
/// paths are answered by [Feature::is_enabled_for], which is the fine-grained
/// counterpart to this coarse check.
pub fn enabled<S: FeatureReader + ?Sized>(store: &S, name: &str) -> bool {
    store.feature(name).map(|f| f.enabled).unwrap_or(false)
}

/// Globally enable the feature named `name`, creating it with all-off
/// defaults first if it does not exist.
pub fn enable<S: FeatureWriter + ?Sized>(store: &S, name: &str) {
    alter_feature(store, name, |mut feature| {
        feature.enabled = true;
        feature
    });
}

/// Globally disable the feature named `name`, creating it with all-off
/// defaults first if it does not exist.
pub fn disable<S: FeatureWriter + ?Sized>(store: &S, name: &str) {
    alter_feature(store, name, |mut feature| {
        feature.enabled = false;
        feature
    });
}

/// Flip the global switch of the feature named `name`. Toggling an absent
/// feature creates it enabled.
pub fn toggle<S: FeatureWriter + ?Sized>(store: &S, name: &str) {
    alter_feature(store, name, |mut feature| {
        feature.enabled = !feature.enabled;
        feature
    });
}

/// Run `action` only if the feature named `name` is globally enabled.
///
/// The closure is not invoked at all when the feature is disabled or absent.
pub fn when_enabled<S, F>(store: &S, name: &str, action: F)
where
    S: FeatureReader + ?Sized,
    F: FnOnce(),
{
    if enabled(store, name) {
        action();
    }
}

// Every mutation is the same read-modify-write: fetch the current value (or
// all-off defaults), apply the change, and write the result back as a direct
// overwrite. There is no cross-call transaction, so two concurrent mutations
// of the same name race and the last write wins.
fn alter_feature<S, F>(store: &S, name: &str, f: F)
where
    S: FeatureWriter + ?Sized,
    F: FnOnce(Feature) -> Feature,
{
    let feature = store.feature(name).unwrap_or_else(|| {
        debug!("creating feature {} on first write", name);
        Feature::new(name)
    });
    store.update_feature(f(feature));
}
