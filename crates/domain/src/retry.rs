/// How the dispatcher treats a reminder whose delivery keeps failing.
///
/// A failed item stays due and is retried on every sweep until the policy
/// declares it exhausted. There is no backoff; the sweep interval is the
/// retry interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RetryPolicy {
    /// Retry on every sweep until delivery succeeds or an operator
    /// removes the event
    RetryForever,
    /// Drop the event from both stores once this many delivery attempts
    /// have failed
    MaxAttempts(i64),
}

impl RetryPolicy {
    pub fn is_exhausted(&self, attempts: i64) -> bool {
        match self {
            RetryPolicy::RetryForever => false,
            RetryPolicy::MaxAttempts(max) => attempts >= *max,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::RetryForever
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_forever_never_exhausts() {
        assert!(!RetryPolicy::RetryForever.is_exhausted(i64::MAX));
    }

    #[test]
    fn max_attempts_exhausts_at_cap() {
        let policy = RetryPolicy::MaxAttempts(3);
        assert!(!policy.is_exhausted(2));
        assert!(policy.is_exhausted(3));
        assert!(policy.is_exhausted(4));
    }
}
