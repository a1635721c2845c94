//! The session registry abstraction.

/// The set of refresh tokens currently considered valid.
///
/// A refresh token is usable only while it is present here, in addition
/// to being cryptographically sound and unexpired. The auth service
/// depends on this trait rather than a concrete store so that a
/// persistent or shared implementation can be slotted in later.
pub trait SessionRegistry: Send + Sync {
    /// Registers a refresh token as valid.
    fn insert(&self, token: &str);

    /// Checks whether a refresh token is currently registered.
    fn contains(&self, token: &str) -> bool;

    /// Revokes a refresh token. Returns `true` if it was registered.
    fn remove(&self, token: &str) -> bool;
}
