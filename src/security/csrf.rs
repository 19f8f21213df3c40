use crate::utils::time::is_expired;
use dashmap::DashMap;
use rand::RngCore;
use tracing::warn;

/// Request header carrying the anti-forgery token
pub const CSRF_HEADER: &str = "x-csrf-token";

/// Anti-forgery tokens handed out with the form page
///
/// A token stays valid until `ttl` seconds after it was issued and may be
/// used for any number of submissions in that window. At most `max_tokens`
/// are held; once full, the oldest tokens make room for new ones.
pub struct CsrfStore {
    tokens: DashMap<String, i64>,
    ttl: i64,
    max_tokens: usize,
}

impl CsrfStore {
    pub fn new(ttl: i64, max_tokens: usize) -> Self {
        Self {
            tokens: DashMap::new(),
            ttl,
            max_tokens: max_tokens.max(1),
        }
    }

    /// Create and remember a new token (32 random bytes, hex encoded)
    pub fn issue(&self, current_time: i64) -> String {
        if self.tokens.len() >= self.max_tokens {
            self.make_room(current_time);
        }

        let mut bytes = [0u8; 32];
        rand::rng().fill_bytes(&mut bytes);

        let token = hex::encode(bytes);
        self.tokens.insert(token.clone(), current_time);

        token
    }

    pub fn verify(&self, token: &str, current_time: i64) -> bool {
        if token.is_empty() {
            return false;
        }

        self.tokens
            .get(token)
            .map(|issued_at| !is_expired(*issued_at, self.ttl, current_time))
            .unwrap_or(false)
    }

    /// Drop expired tokens, returning how many were removed
    pub fn cleanup_expired(&self, current_time: i64) -> usize {
        let before = self.tokens.len();
        self.tokens
            .retain(|_, issued_at| !is_expired(*issued_at, self.ttl, current_time));
        before.saturating_sub(self.tokens.len())
    }

    /// Drop expired tokens, then evict the oldest live ones down to ~90% of capacity
    fn make_room(&self, current_time: i64) {
        self.cleanup_expired(current_time);

        let target = self.max_tokens - self.max_tokens / 10;
        let excess = (self.tokens.len() + 1).saturating_sub(target);
        if excess == 0 {
            return;
        }

        let mut by_age: Vec<(String, i64)> = self
            .tokens
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        by_age.sort_unstable_by_key(|(_, issued_at)| *issued_at);

        for (token, _) in by_age.into_iter().take(excess) {
            self.tokens.remove(&token);
        }

        warn!(
            evicted = excess,
            max_tokens = self.max_tokens,
            "CSRF token store full, evicted oldest tokens"
        );
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
