//! In-memory session registry for single-node deployments.

use std::collections::HashSet;
use std::sync::RwLock;

use super::registry::SessionRegistry;

/// Process-local, volatile session registry.
///
/// Known limitation, preserved from the original system: a restart
/// discards every entry, silently invalidating all previously issued
/// refresh tokens even when they are still cryptographically valid.
/// Entries for expired tokens linger until logout removes them; the
/// token codec still rejects those tokens on expiry.
#[derive(Debug, Default)]
pub struct MemorySessionRegistry {
    tokens: RwLock<HashSet<String>>,
}

impl MemorySessionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionRegistry for MemorySessionRegistry {
    fn insert(&self, token: &str) {
        self.tokens
            .write()
            .expect("session registry lock poisoned")
            .insert(token.to_string());
    }

    fn contains(&self, token: &str) -> bool {
        self.tokens
            .read()
            .expect("session registry lock poisoned")
            .contains(token)
    }

    fn remove(&self, token: &str) -> bool {
        self.tokens
            .write()
            .expect("session registry lock poisoned")
            .remove(token)
    }
}
