//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

// == Cache Entry ==
/// A single cached value with its expiry metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Write timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry that expires `ttl_seconds` after `now_ms`.
    pub fn new(value: String, ttl_seconds: u64, now_ms: u64) -> Self {
        Self {
            value,
            created_at: now_ms,
            expires_at: now_ms.saturating_add(ttl_seconds.saturating_mul(1000)),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now_ms`.
    ///
    /// An entry is expired once the current time reaches the expiration
    /// time, so a 600s entry written at T is gone at exactly T+600s.
    pub fn is_expired_at(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at
    }

    // == Time To Live ==
    /// Returns remaining TTL in milliseconds, `0` once expired.
    pub fn ttl_remaining_ms(&self, now_ms: u64) -> u64 {
        self.expires_at.saturating_sub(now_ms)
    }

    /// Returns remaining TTL in whole seconds.
    pub fn ttl_remaining(&self, now_ms: u64) -> u64 {
        self.ttl_remaining_ms(now_ms) / 1000
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const T0: u64 = 1_700_000_000_000;

    #[test]
    fn test_entry_creation() {
        let entry = CacheEntry::new("alice".to_string(), 600, T0);

        assert_eq!(entry.value, "alice");
        assert_eq!(entry.created_at, T0);
        assert_eq!(entry.expires_at, T0 + 600_000);
        assert!(!entry.is_expired_at(T0));
    }

    #[test]
    fn test_entry_expiration_boundary() {
        let entry = CacheEntry::new("alice".to_string(), 600, T0);

        assert!(!entry.is_expired_at(T0 + 599_999));
        assert!(entry.is_expired_at(T0 + 600_000));
        assert!(entry.is_expired_at(T0 + 600_001));
    }

    #[test]
    fn test_ttl_remaining() {
        let entry = CacheEntry::new("bob".to_string(), 10, T0);

        assert_eq!(entry.ttl_remaining_ms(T0), 10_000);
        assert_eq!(entry.ttl_remaining(T0 + 2_500), 7);
    }

    #[test]
    fn test_ttl_remaining_expired() {
        let entry = CacheEntry::new("bob".to_string(), 1, T0);

        assert_eq!(entry.ttl_remaining_ms(T0 + 5_000), 0);
        assert_eq!(entry.ttl_remaining(T0 + 5_000), 0);
    }

    #[test]
    fn test_zero_ttl_is_immediately_expired() {
        let entry = CacheEntry::new("gone".to_string(), 0, T0);
        assert!(entry.is_expired_at(T0), "Entry should be expired at boundary");
    }
}
