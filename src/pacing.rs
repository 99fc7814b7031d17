//! Inter-request pacing policies.
//!
//! The pipeline pauses between lookups to respect the Semantic Scholar
//! rate-limit policy. The policy is pluggable: the default is a fixed
//! interval, with a token bucket available for callers that prefer a
//! rate expressed in requests per second.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

/// Delay between requests when an API key is supplied.
pub const DELAY_WITH_KEY: Duration = Duration::from_millis(1500);

/// Delay between requests on the keyless (heavily throttled) tier.
pub const DELAY_WITHOUT_KEY: Duration = Duration::from_millis(3000);

/// A pacing policy applied between consecutive lookups.
#[async_trait]
pub trait Pacer: Send + Sync {
    /// Pause until the next request may be sent.
    async fn pause(&self);
}

/// Sleeps for a fixed interval on every pause.
///
/// Not adaptive: the interval does not grow after a 429.
#[derive(Debug, Clone)]
pub struct FixedInterval {
    interval: Duration,
}

impl FixedInterval {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }

    /// The default interval for a client: shorter when a key raises the
    /// rate-limit allowance.
    pub fn for_credential(has_api_key: bool) -> Self {
        if has_api_key {
            Self::new(DELAY_WITH_KEY)
        } else {
            Self::new(DELAY_WITHOUT_KEY)
        }
    }
}

#[async_trait]
impl Pacer for FixedInterval {
    async fn pause(&self) {
        tokio::time::sleep(self.interval).await;
    }
}

/// Token-bucket pacer enforcing a maximum request rate.
///
/// The first pause is immediate; subsequent pauses wait out the remainder
/// of the minimum interval since the last request.
#[derive(Debug, Clone)]
pub struct TokenBucket {
    inner: Arc<Mutex<TokenBucketInner>>,
}

#[derive(Debug)]
struct TokenBucketInner {
    /// Maximum requests per second.
    max_per_second: f64,
    /// Time of the last request.
    last_request: Option<Instant>,
}

impl TokenBucket {
    /// Create a token bucket allowing `max_per_second` requests per second.
    pub fn new(max_per_second: f64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TokenBucketInner {
                max_per_second,
                last_request: None,
            })),
        }
    }
}

#[async_trait]
impl Pacer for TokenBucket {
    async fn pause(&self) {
        let mut inner = self.inner.lock().await;

        if let Some(last) = inner.last_request {
            let min_interval = Duration::from_secs_f64(1.0 / inner.max_per_second);
            let elapsed = last.elapsed();
            if elapsed < min_interval {
                let wait = min_interval - elapsed;
                drop(inner);
                tokio::time::sleep(wait).await;
                inner = self.inner.lock().await;
            }
        }

        inner.last_request = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fixed_interval_sleeps() {
        let pacer = FixedInterval::new(Duration::from_millis(20));
        let start = Instant::now();
        pacer.pause().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_fixed_interval_defaults() {
        assert_eq!(FixedInterval::for_credential(true).interval, DELAY_WITH_KEY);
        assert_eq!(
            FixedInterval::for_credential(false).interval,
            DELAY_WITHOUT_KEY
        );
    }

    #[tokio::test]
    async fn test_token_bucket_basic() {
        let pacer = TokenBucket::new(100.0); // 100/sec = 10ms interval
        let start = Instant::now();

        pacer.pause().await;
        pacer.pause().await;
        pacer.pause().await;

        // 3 paced requests at 100/sec should take at least ~20ms
        assert!(start.elapsed() >= Duration::from_millis(15));
    }

    #[tokio::test]
    async fn test_token_bucket_first_pause_immediate() {
        let pacer = TokenBucket::new(1.0);
        let start = Instant::now();
        pacer.pause().await;
        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
