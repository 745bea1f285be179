//! User model.
//!
//! A user is created by idempotent registration and mutated only by the
//! purchase reconciler (which flips `is_premium`). Users are never
//! deleted by this service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered user with their entitlement state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    /// Accumulated points, never negative.
    pub points: i32,
    /// Current level, starts at 1.
    pub level: i32,
    /// Entitlement granted by a confirmed purchase.
    pub is_premium: bool,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_roundtrip() {
        let user = User {
            id: Uuid::new_v4(),
            email: "erik@example.com".to_string(),
            points: 120,
            level: 3,
            is_premium: false,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        let parsed: User = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, user);
    }
}
