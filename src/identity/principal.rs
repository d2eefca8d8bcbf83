use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Verified caller identity attached to a request context after the bearer
/// token checks out. Mirrors the token claims, nothing more.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub subject_id: Uuid,
    pub email: String,
}
