//! Cache key builders for all ClubHub cache entries.
//!
//! Centralising key construction prevents typos and makes it easy
//! to find every key the application uses.

use uuid::Uuid;

/// Fast-lookup key for a refresh token, addressed by its SHA-256 hash.
///
/// The value is the owning user's id.
pub fn refresh_token(token_hash: &str) -> String {
    format!("refresh:{token_hash}")
}

/// Set of refresh token hashes a user currently holds.
pub fn user_sessions(user_id: Uuid) -> String {
    format!("user_sessions:{user_id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_token_key_embeds_hash() {
        assert_eq!(refresh_token("abc123"), "refresh:abc123");
    }

    #[test]
    fn user_sessions_key_embeds_user_id() {
        let id = Uuid::nil();
        assert_eq!(
            user_sessions(id),
            "user_sessions:00000000-0000-0000-0000-000000000000"
        );
    }
}
