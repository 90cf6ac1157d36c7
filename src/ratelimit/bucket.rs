//! Bounded token store implementation.

use parking_lot::Mutex;

/// A bounded, thread-safe token store.
///
/// The store holds between 0 and `capacity` tokens and starts full. Both
/// mutating operations are non-blocking attempts: `try_take` removes one
/// token if any is held, `try_put` adds one token if there is room. Neither
/// can violate the bounds, regardless of how callers interleave.
pub struct TokenBucket {
    /// Maximum number of tokens the store can hold
    capacity: u32,
    /// Current number of tokens held
    tokens: Mutex<u32>,
}

impl TokenBucket {
    /// Create a new token store, pre-filled to `capacity`.
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            tokens: Mutex::new(capacity),
        }
    }

    /// Attempt to remove one token.
    ///
    /// Returns `true` if a token was removed, `false` if the store is empty.
    /// Each successful call consumes a distinct token; two callers can never
    /// succeed on the same one.
    pub fn try_take(&self) -> bool {
        let mut tokens = self.tokens.lock();
        if *tokens == 0 {
            return false;
        }
        *tokens -= 1;
        true
    }

    /// Attempt to add one token.
    ///
    /// Returns `true` if a token was added, `false` if the store is already
    /// at capacity. A full store is not an error; the attempt is a no-op.
    pub fn try_put(&self) -> bool {
        let mut tokens = self.tokens.lock();
        if *tokens == self.capacity {
            return false;
        }
        *tokens += 1;
        true
    }

    /// Get the number of tokens currently held.
    pub fn available(&self) -> u32 {
        *self.tokens.lock()
    }

    /// Get the maximum number of tokens the store can hold.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_bucket_starts_full() {
        let bucket = TokenBucket::new(5);

        assert_eq!(bucket.capacity(), 5);
        assert_eq!(bucket.available(), 5);
    }

    #[test]
    fn test_take_until_empty() {
        let bucket = TokenBucket::new(3);

        for _ in 0..3 {
            assert!(bucket.try_take());
        }

        // The 4th attempt should fail
        assert!(!bucket.try_take());
        assert_eq!(bucket.available(), 0);
    }

    #[test]
    fn test_put_never_exceeds_capacity() {
        let bucket = TokenBucket::new(2);

        // Already full, so puts are no-ops
        assert!(!bucket.try_put());
        assert!(!bucket.try_put());
        assert_eq!(bucket.available(), 2);

        assert!(bucket.try_take());
        assert!(bucket.try_put());
        assert!(!bucket.try_put());
        assert_eq!(bucket.available(), 2);
    }

    #[test]
    fn test_concurrent_takes_are_exact() {
        let bucket = Arc::new(TokenBucket::new(4));

        // 16 threads race for 4 tokens; exactly 4 must win
        let handles: Vec<_> = (0..16)
            .map(|_| {
                let bucket = Arc::clone(&bucket);
                thread::spawn(move || bucket.try_take())
            })
            .collect();

        let successes = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&succeeded| succeeded)
            .count();

        assert_eq!(successes, 4);
        assert_eq!(bucket.available(), 0);
    }

    #[test]
    fn test_concurrent_takes_and_puts_stay_in_bounds() {
        let bucket = Arc::new(TokenBucket::new(8));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let bucket = Arc::clone(&bucket);
                thread::spawn(move || {
                    for _ in 0..100 {
                        if i % 2 == 0 {
                            bucket.try_take();
                        } else {
                            bucket.try_put();
                        }
                        assert!(bucket.available() <= bucket.capacity());
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(bucket.available() <= 8);
    }
}
