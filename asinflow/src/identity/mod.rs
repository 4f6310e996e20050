//! Network identity rotation.
//!
//! This module provides:
//! - Immutable pools of client identities and relay endpoints
//! - Relay list loading
//! - Uniform random selection per attempt

mod pool;
mod rotator;

pub use pool::{IdentityPool, RelayPool, DEFAULT_USER_AGENTS};
pub use rotator::{IdentityRotator, NetworkIdentity};
