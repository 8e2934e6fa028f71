use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the first one)
    pub max_attempts: u32,
    /// Delay before the first retry
    pub initial_delay: Duration,
    /// Upper bound for any single delay
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    pub fn new(max_attempts: u32, initial_delay: Duration) -> Self {
        Self {
            max_attempts,
            initial_delay,
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    pub fn with_backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Preset: database connection at startup (5 attempts)
    /// Delays: 1s, 2s, 4s, 5s = 12s total wait time
    pub fn database_connect() -> Self {
        Self::new(5, Duration::from_secs(1))
            .with_max_delay(Duration::from_secs(5))
            .with_backoff_multiplier(2.0)
    }

    /// Delay before the given attempt (0-indexed).
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        let delay_ms = self.initial_delay.as_millis() as f64
            * self.backoff_multiplier.powi((attempt - 1) as i32);

        Duration::from_millis(delay_ms as u64).min(self.max_delay)
    }
}

/// Run `operation` until it succeeds, `should_retry` classifies its error as
/// permanent, or `config.max_attempts` is used up. The last error is returned.
///
/// # Panics
/// Panics if `config.max_attempts` is 0
pub async fn with_retry_if<T, E, F, Fut, P>(
    config: &RetryConfig,
    operation_name: &str,
    mut operation: F,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    assert!(
        config.max_attempts >= 1,
        "RetryConfig.max_attempts must be >= 1, got {}",
        config.max_attempts
    );

    let mut attempts = 0;
    loop {
        let error = match operation().await {
            Ok(value) => {
                if attempts > 0 {
                    info!(operation = operation_name, attempts = attempts + 1, "Recovered after retrying");
                }
                return Ok(value);
            }
            Err(error) => error,
        };
        attempts += 1;

        if !should_retry(&error) {
            warn!(operation = operation_name, %error, "Permanent failure, not retrying");
            return Err(error);
        }
        if attempts >= config.max_attempts {
            warn!(operation = operation_name, attempts, %error, "Transient failure persisted, giving up");
            return Err(error);
        }

        let delay = config.delay_for_attempt(attempts);
        warn!(
            operation = operation_name,
            attempt = attempts,
            max_attempts = config.max_attempts,
            ?delay,
            %error,
            "Transient failure, retrying"
        );
        sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_database_connect_preset() {
        let config = RetryConfig::database_connect();
        assert_eq!(config.max_attempts, 5);
        assert_eq!(config.delay_for_attempt(0), Duration::ZERO);
        assert_eq!(config.delay_for_attempt(1), Duration::from_secs(1));
        assert_eq!(config.delay_for_attempt(3), Duration::from_secs(4));
        assert_eq!(config.delay_for_attempt(4), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_until_success() {
        let config = RetryConfig::new(3, Duration::from_millis(10));
        let counter = Arc::new(AtomicU32::new(0));

        let result: Result<u32, String> = with_retry_if(
            &config,
            "connect",
            || {
                let c = counter.clone();
                async move {
                    if c.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err("connection refused".to_string())
                    } else {
                        Ok(7)
                    }
                }
            },
            |_| true,
        )
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_retryable_error_stops_immediately() {
        let config = RetryConfig::new(5, Duration::from_millis(10));
        let counter = Arc::new(AtomicU32::new(0));

        let result: Result<(), String> = with_retry_if(
            &config,
            "connect",
            || {
                let c = counter.clone();
                async move {
                    c.fetch_add(1, Ordering::SeqCst);
                    Err("invalid connection string".to_string())
                }
            },
            |e| !e.contains("invalid"),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_returns_last_error_after_exhaustion() {
        let config = RetryConfig::new(2, Duration::from_millis(10));

        let result: Result<(), String> =
            with_retry_if(&config, "connect", || async { Err("timeout".to_string()) }, |_| true).await;

        assert_eq!(result.unwrap_err(), "timeout");
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_backoff_between_attempts() {
        let config = RetryConfig::new(3, Duration::from_secs(1));
        let started = tokio::time::Instant::now();

        let result: Result<(), String> =
            with_retry_if(&config, "connect", || async { Err("timeout".to_string()) }, |_| true).await;

        assert!(result.is_err());
        // 1s then 2s
        assert!(started.elapsed() >= Duration::from_secs(3));
        assert!(started.elapsed() < Duration::from_secs(4));
    }
}
