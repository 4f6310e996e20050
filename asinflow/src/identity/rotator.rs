//! Per-attempt identity and relay selection.

use rand::seq::SliceRandom;
use rand::Rng;

use super::pool::{IdentityPool, RelayPool};

/// The identity/relay pair presented on one attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkIdentity {
    /// Client identity string (sent as `User-Agent`).
    pub identity: String,
    /// Relay endpoint, `None` for a direct connection.
    pub relay: Option<String>,
}

/// Draws identities and relays uniformly at random from shared pools.
///
/// The rotator holds no mutable state; randomness comes from the caller so
/// each retry controller can use its own seedable source.
#[derive(Debug, Clone)]
pub struct IdentityRotator {
    identities: IdentityPool,
    relays: RelayPool,
    use_relays: bool,
}

impl IdentityRotator {
    /// Creates a rotator over the given pools.
    #[must_use]
    pub fn new(identities: IdentityPool, relays: RelayPool, use_relays: bool) -> Self {
        Self {
            identities,
            relays,
            use_relays,
        }
    }

    /// Picks an identity.
    pub fn next_identity<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.identities
            .as_slice()
            .choose(rng)
            .cloned()
            .unwrap_or_default()
    }

    /// Picks a relay, or `None` when rotation is off or the pool is empty.
    pub fn next_relay<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<String> {
        if !self.use_relays {
            return None;
        }
        self.relays.as_slice().choose(rng).cloned()
    }

    /// Picks a fresh identity/relay pair for an attempt.
    pub fn rotate<R: Rng + ?Sized>(&self, rng: &mut R) -> NetworkIdentity {
        NetworkIdentity {
            identity: self.next_identity(rng),
            relay: self.next_relay(rng),
        }
    }

    /// Whether attempts may go through relays.
    #[must_use]
    pub fn relays_enabled(&self) -> bool {
        self.use_relays && !self.relays.is_empty()
    }
}
