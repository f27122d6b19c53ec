//! Feature flag evaluation with three activation paths per feature, combined
//! by logical OR: a global switch, a deterministic percentage rollout, and an
//! explicit actor allow-list.
//!
//! Flags live in a [Features] mapping behind a storage backend. The library
//! ships one backend, the in-memory [MemoryStore]; anything else (file,
//! external cache, database) plugs in by implementing [FeatureReader] and
//! [FeatureWriter]. Rollout bucketing is a standard CRC-32 of the actor id,
//! so the same actor lands in the same bucket across processes and versions.
//!
//! ```
//! use flagpole::{self, Actor, ActorId, Feature, FeatureReader, FeatureWriter,
//!                MemoryStore, Percentage};
//!
//! struct User {
//!     id: u64,
//! }
//!
//! impl Actor for User {
//!     fn actor_id(&self) -> ActorId {
//!         ActorId::from(format!("user:{}", self.id))
//!     }
//! }
//!
//! let store = MemoryStore::new();
//!
//! // Coarse, global switches.
//! flagpole::enable(&store, "new-dashboard");
//! assert!(flagpole::enabled(&store, "new-dashboard"));
//!
//! // Fine-grained, per-actor evaluation.
//! let mut beta = Feature::new("beta");
//! beta.enabled_percentage = Percentage::new(25).unwrap();
//! store.update_feature(beta);
//!
//! let beta = store.feature("beta").unwrap();
//! let user = User { id: 42 };
//! if beta.is_enabled_for(&user) {
//!     // roll out the beta to this user
//! }
//! ```

mod actor;
mod eval;
mod feature;
mod memory;
mod percentage;
mod store;
mod test_common;

pub use actor::*;
pub use eval::*;
pub use feature::*;
pub use memory::*;
pub use percentage::*;
pub use store::*;
