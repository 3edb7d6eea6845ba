//! Outbound ports for the API Gateway.

use shared_types::SubjectId;

/// Resolves a bearer token to the authenticated subject.
///
/// Registration and login live outside this system; the gateway only needs
/// the opaque subject handle a token stands for.
pub trait IdentityProvider: Send + Sync {
    /// `None` for unknown or revoked tokens.
    fn resolve(&self, token: &str) -> Option<SubjectId>;
}
