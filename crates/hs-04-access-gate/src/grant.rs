//! # Administrative Grants
//!
//! Capability token for ledger mutations reserved to operators.

use shared_types::Caller;
use std::fmt;
use tracing::warn;

/// Proof that the current operation runs with administrative rights.
///
/// The private field keeps construction inside this crate; the only way to
/// obtain one is [`admin_grant`].
#[derive(Clone, PartialEq, Eq)]
pub struct AdminGrant {
    _private: (),
}

impl fmt::Debug for AdminGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AdminGrant")
    }
}

/// Issue a grant for an administrative caller.
pub fn admin_grant(caller: &Caller) -> Option<AdminGrant> {
    if caller.is_admin() {
        Some(AdminGrant { _private: () })
    } else {
        warn!("[hs-04] Administrative grant refused for subject caller");
        None
    }
}
