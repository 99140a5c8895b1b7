//! Bearer-token claims carried by authenticated requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for access tokens.
///
/// The subject is the opaque principal id issued by the external
/// authentication provider; nothing else about the principal is assumed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (principal ID).
    pub sub: Uuid,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Creates new claims for a principal.
    #[must_use]
    pub fn new(principal: Uuid, expires_at: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            sub: principal,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        }
    }

    /// Returns the principal ID from claims.
    #[must_use]
    pub const fn principal(&self) -> Uuid {
        self.sub
    }
}
