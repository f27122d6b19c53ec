use std::fmt;

use serde::{Deserialize, Serialize};

/// An opaque byte identifier for one actor, as produced by an [Actor]
/// implementation.
///
/// The library never constructs these itself; they only exist so that an
/// actor can be hashed into a rollout bucket and looked up in a feature's
/// allow-list. Two ids are the same actor iff their bytes are equal.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(Vec<u8>);

impl ActorId {
    /// The raw identifier bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The rollout bucket this actor falls into, in the range 0..100.
    ///
    /// The bucket is the standard CRC-32 (IEEE) checksum of the id bytes,
    /// modulo 100. CRC-32 is load-bearing: the same actor must land in the
    /// same bucket across library versions and across reimplementations,
    /// or a redeploy would silently shuffle which actors sit inside a
    /// percentage rollout.
    ///
    /// The bucket does not incorporate the feature name, so one actor
    /// occupies the same numeric bucket for every feature; only the
    /// percentage threshold differs per feature.
    pub fn bucket(&self) -> u32 {
        crc32fast::hash(&self.0) % 100
    }
}

impl fmt::Debug for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match std::str::from_utf8(&self.0) {
            Ok(s) => write!(f, "ActorId({:?})", s),
            Err(_) => write!(f, "ActorId({:02x?})", self.0),
        }
    }
}

impl From<Vec<u8>> for ActorId {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for ActorId {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<String> for ActorId {
    fn from(s: String) -> Self {
        Self(s.into_bytes())
    }
}

impl From<&str> for ActorId {
    fn from(s: &str) -> Self {
        Self(s.as_bytes().to_vec())
    }
}

/// Anything that can be evaluated against a feature's activation rules.
///
/// Implementations must derive a stable id: the same logical actor must
/// always produce the same [ActorId], and distinct actors evaluated against
/// the same feature must produce distinct ids. When several actor kinds
/// share a feature (say, users and organizations), prefix the id with the
/// kind (`"user:42"` vs `"org:42"`); the library cannot detect collisions,
/// and a collision silently grants or withholds access for the wrong actor.
///
/// # Example
/// ```
/// use flagpole::{Actor, ActorId};
///
/// struct User {
///     id: u64,
/// }
///
/// impl Actor for User {
///     fn actor_id(&self) -> ActorId {
///         ActorId::from(format!("user:{}", self.id))
///     }
/// }
/// ```
pub trait Actor {
    /// Derive the stable identifier for this actor.
    fn actor_id(&self) -> ActorId;
}
