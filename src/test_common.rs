#![cfg(test)]

use crate::actor::{Actor, ActorId};
use crate::memory::MemoryStore;
use crate::store::Features;

pub struct TestUser {
    key: String,
}

impl TestUser {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Actor for TestUser {
    fn actor_id(&self) -> ActorId {
        ActorId::from(format!("user:{}", self.key))
    }
}

pub struct TestOrg {
    key: String,
}

impl TestOrg {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Actor for TestOrg {
    fn actor_id(&self) -> ActorId {
        ActorId::from(format!("org:{}", self.key))
    }
}

/// A store with one feature per activation shape: globally on, rollout with
/// an allow-list, and all-off. Actor ids serialize as raw bytes; the array
/// below is `"user:alice"`.
pub fn seeded_store() -> MemoryStore {
    let features: Features = serde_json::from_str(
        r#"{
            "new-dashboard": {
                "name": "new-dashboard",
                "globallyEnabled": true
            },
            "beta": {
                "name": "beta",
                "globallyEnabled": false,
                "enabledPercentage": 50,
                "enabledActors": [[117, 115, 101, 114, 58, 97, 108, 105, 99, 101]]
            },
            "dark-mode": {
                "name": "dark-mode"
            }
        }"#,
    )
    .unwrap();

    MemoryStore::with_features(features)
}
