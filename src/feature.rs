use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::actor::{Actor, ActorId};
use crate::percentage::Percentage;

/// The unique, case-sensitive name of a feature; the key into the store.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureName(String);

impl FeatureName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FeatureName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for FeatureName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&str> for FeatureName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

// Lets `&str` key lookups work against HashMap<FeatureName, _>.
impl Borrow<str> for FeatureName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for FeatureName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A named, independently toggleable capability.
///
/// A feature is active for an actor through any of three paths, combined by
/// logical OR: the global switch, the percentage rollout, or the explicit
/// actor allow-list. See [Feature::is_enabled_for].
///
/// Features are plain values. Every mutation is a replacement of the stored
/// value through a [crate::FeatureWriter]; nothing mutates a shared `Feature`
/// in place.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    /// The feature's immutable key.
    pub name: FeatureName,
    /// When true, the feature is active for everyone regardless of the other
    /// fields. Serialized as `globallyEnabled`.
    #[serde(rename = "globallyEnabled", default)]
    pub enabled: bool,
    /// Actors explicitly granted access regardless of percentage or the
    /// global switch.
    #[serde(default)]
    pub enabled_actors: HashSet<ActorId>,
    /// The rollout proportion used for hash-bucket evaluation.
    #[serde(default)]
    pub enabled_percentage: Percentage,
}

impl Feature {
    /// A feature with the given name and everything switched off.
    pub fn new(name: impl Into<FeatureName>) -> Self {
        Self {
            name: name.into(),
            enabled: false,
            enabled_actors: HashSet::new(),
            enabled_percentage: Percentage::ZERO,
        }
    }

    /// Whether this feature is active for `actor`.
    ///
    /// An actor is granted access if any of the three activation paths
    /// matches: the global switch is on, the actor's CRC-32 bucket falls
    /// below the rollout percentage (see [ActorId::bucket]), or the actor's
    /// id is in the allow-list.
    pub fn is_enabled_for<A: Actor>(&self, actor: &A) -> bool {
        if self.enabled {
            return true;
        }

        let actor_id = actor.actor_id();
        if actor_id.bucket() < u32::from(self.enabled_percentage.value()) {
            return true;
        }

        self.enabled_actors.contains(&actor_id)
    }

    /// Combine this feature (the newer definition) with an older definition
    /// of the same feature.
    ///
    /// `name`, `enabled`, and `enabled_percentage` are taken from the newer
    /// definition verbatim. `enabled_actors` is the union of both: an actor
    /// granted access once is never silently dropped by a later merge. There
    /// is no remove-actor operation; an allow-list only shrinks through a
    /// direct overwrite ([crate::FeatureWriter::update_feature]).
    pub fn merge(mut self, old: &Feature) -> Feature {
        self.enabled_actors
            .extend(old.enabled_actors.iter().cloned());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_common::TestUser;
    use assert_json_diff::assert_json_eq;
    use maplit::hashset;
    use serde_json::json;
    use spectral::prelude::*;
    use test_case::test_case;

    fn feature(enabled: bool, percentage: u8, actors: HashSet<ActorId>) -> Feature {
        Feature {
            name: "beta".into(),
            enabled,
            enabled_actors: actors,
            enabled_percentage: Percentage::new(percentage).unwrap(),
        }
    }

    #[test]
    fn new_feature_defaults_everything_off() {
        let feature = Feature::new("search");
        assert_that!(feature.name.as_str()).is_equal_to("search");
        assert_that!(feature.enabled).is_false();
        assert_that!(feature.enabled_actors.is_empty()).is_true();
        assert_that!(feature.enabled_percentage).is_equal_to(Percentage::ZERO);
    }

    #[test]
    fn global_switch_wins_regardless_of_other_fields() {
        let feature = feature(true, 0, hashset![]);
        assert_that!(feature.is_enabled_for(&TestUser::new("anyone"))).is_true();
    }

    #[test]
    fn allow_list_grants_access_with_everything_else_off() {
        let user = TestUser::new("alice");
        // alice's bucket is 22, so percentage 0 cannot be the granting path.
        let feature = feature(false, 0, hashset![user.actor_id()]);
        assert_that!(feature.is_enabled_for(&user)).is_true();
        assert_that!(feature.is_enabled_for(&TestUser::new("mallory"))).is_false();
    }

    // "user:bob" hashes to CRC-32 bucket 10.
    #[test_case("bob", 50, true; "bucket 10 is inside a 50 percent rollout")]
    #[test_case("bob", 10, false; "bucket 10 is outside a 10 percent rollout")]
    #[test_case("bob", 11, true; "bucket 10 is inside an 11 percent rollout")]
    fn percentage_rollout_uses_crc32_bucket(key: &str, percentage: u8, expected: bool) {
        let feature = feature(false, percentage, hashset![]);
        assert_that!(feature.is_enabled_for(&TestUser::new(key))).is_equal_to(expected);
    }

    #[test]
    fn fifty_percent_rollout_splits_known_actors() {
        let feature = feature(false, 50, hashset![]);
        let in_rollout = TestUser::new("bob"); // bucket 10
        let out_of_rollout = TestUser::new("grace"); // bucket 90
        assert_that!(feature.is_enabled_for(&in_rollout)).is_true();
        assert_that!(feature.is_enabled_for(&out_of_rollout)).is_false();
    }

    #[test]
    fn zero_percent_enables_no_one_and_full_enables_everyone() {
        let zero = feature(false, 0, hashset![]);
        let full = feature(false, 100, hashset![]);
        for key in ["alice", "bob", "judy", "51"] {
            let user = TestUser::new(key);
            assert_that!(zero.is_enabled_for(&user)).is_false();
            assert_that!(full.is_enabled_for(&user)).is_true();
        }
    }

    #[test]
    fn merge_unions_actors_and_replaces_flags() {
        let alice = ActorId::from("user:alice");
        let bob = ActorId::from("user:bob");

        let old = feature(false, 25, hashset![alice.clone()]);
        let new = feature(true, 0, hashset![bob.clone()]);

        let merged = new.merge(&old);
        assert_that!(merged.enabled).is_true();
        assert_that!(merged.enabled_percentage).is_equal_to(Percentage::ZERO);
        assert_that!(merged.enabled_actors).is_equal_to(hashset![alice, bob]);
    }

    #[test]
    fn merge_preserves_grants_when_new_definition_omits_them() {
        let alice = ActorId::from("user:alice");
        let old = feature(false, 0, hashset![alice.clone()]);
        let new = feature(false, 50, hashset![]);

        let merged = new.merge(&old);
        assert_that!(merged.enabled_actors).is_equal_to(hashset![alice]);
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let mut feature = Feature::new("beta");
        feature.enabled = true;
        feature.enabled_percentage = Percentage::new(25).unwrap();

        assert_json_eq!(
            serde_json::to_value(&feature).unwrap(),
            json!({
                "name": "beta",
                "globallyEnabled": true,
                "enabledActors": [],
                "enabledPercentage": 25
            })
        );
    }

    #[test]
    fn deserializes_with_missing_fields_as_defaults() {
        let feature: Feature = serde_json::from_str(r#"{"name": "beta"}"#).unwrap();
        assert_that!(feature).is_equal_to(Feature::new("beta"));
    }
}
