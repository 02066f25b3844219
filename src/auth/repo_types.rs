use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored login for the password authenticator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    pub email: String,       // normalized, lowercase
    pub profile_id: Uuid,
    pub password_hash: String, // Argon2 PHC string
}
