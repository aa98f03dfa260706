use reqwest::StatusCode;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::shared::errors::{AppError, AppResult};

/// Retry configuration for catalog API calls
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// Conservative config used for the shared public catalog tier.
    pub fn conservative() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(10),
            backoff_multiplier: 1.5,
            jitter: true,
        }
    }
}

/// Retry utility for catalog calls with exponential backoff
pub struct RetryUtil;

impl RetryUtil {
    /// Execute a function with retry logic and exponential backoff
    pub async fn with_retry<F, Fut, T>(
        operation: F,
        config: &RetryConfig,
        operation_name: &str,
    ) -> AppResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = AppResult<T>>,
    {
        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match operation().await {
                Ok(result) => {
                    if attempt > 0 {
                        debug!(
                            "{} succeeded on attempt {} after {} retries",
                            operation_name,
                            attempt + 1,
                            attempt
                        );
                    }
                    return Ok(result);
                }
                Err(error) => {
                    if !error.is_retryable() {
                        debug!(
                            "{} failed with non-retryable error: {}",
                            operation_name, error
                        );
                        return Err(error);
                    }

                    last_error = Some(error.clone());

                    if attempt < config.max_retries {
                        let delay = Self::calculate_delay(attempt, config);
                        warn!(
                            "{} failed on attempt {} ({}), retrying in {:?}",
                            operation_name,
                            attempt + 1,
                            error,
                            delay
                        );
                        sleep(delay).await;
                    } else {
                        warn!(
                            "{} failed on final attempt {} ({}), giving up",
                            operation_name,
                            attempt + 1,
                            error
                        );
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| AppError::NetworkError("All retries exhausted".to_string())))
    }

    /// Calculate delay for the given attempt with exponential backoff and jitter
    fn calculate_delay(attempt: u32, config: &RetryConfig) -> Duration {
        let exponential_delay =
            config.base_delay.as_millis() as f64 * config.backoff_multiplier.powi(attempt as i32);

        let mut delay = Duration::from_millis(exponential_delay as u64);

        if delay > config.max_delay {
            delay = config.max_delay;
        }

        // Jitter spreads concurrent clients across the retry window
        if config.jitter {
            let jitter_factor = 0.1;
            let jitter_ms =
                (delay.as_millis() as f64 * jitter_factor * rand::random::<f64>()) as u64;
            delay = Duration::from_millis(delay.as_millis() as u64 + jitter_ms);
        }

        delay
    }
}

/// Common HTTP response handling for the catalog client
pub struct CommonHttpHandler;

impl CommonHttpHandler {
    /// Map HTTP status codes to application errors
    pub fn handle_response_status(status: StatusCode) -> AppResult<()> {
        match status {
            StatusCode::OK => Ok(()),
            StatusCode::TOO_MANY_REQUESTS => Err(AppError::RateLimited(
                "Catalog rate limit exceeded".to_string(),
            )),
            StatusCode::NOT_FOUND => Err(AppError::NotFound("Resource not found".to_string())),
            StatusCode::BAD_REQUEST => {
                Err(AppError::ValidationError("Bad request to catalog API".to_string()))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::NetworkError(
                "Not authorized for catalog API".to_string(),
            )),
            StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::BAD_GATEWAY
            | StatusCode::GATEWAY_TIMEOUT => {
                Err(AppError::NetworkError("Catalog service unavailable".to_string()))
            }
            _ => Err(AppError::NetworkError(format!(
                "Unexpected status code from catalog: {}",
                status
            ))),
        }
    }

    /// Create an HTTP client with consistent configuration
    pub fn create_http_client(timeout: Duration, user_agent: &str) -> AppResult<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to create HTTP client: {}", e)))
    }

    /// Execute an HTTP request with retry logic and status handling
    pub async fn execute_with_retry<F, Fut>(
        request_fn: F,
        config: &RetryConfig,
        operation_name: &str,
    ) -> AppResult<reqwest::Response>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = Result<reqwest::Response, reqwest::Error>>,
    {
        RetryUtil::with_retry(
            || async {
                let response = request_fn().await.map_err(AppError::from)?;
                Self::handle_response_status(response.status())?;
                Ok(response)
            },
            config,
            operation_name,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_delay_grows_exponentially() {
        let config = RetryConfig {
            jitter: false,
            ..Default::default()
        };
        let d0 = RetryUtil::calculate_delay(0, &config);
        let d1 = RetryUtil::calculate_delay(1, &config);
        let d2 = RetryUtil::calculate_delay(2, &config);

        assert_eq!(d0, Duration::from_millis(500));
        assert_eq!(d1, Duration::from_millis(1000));
        assert_eq!(d2, Duration::from_millis(2000));
    }

    #[test]
    fn test_delay_is_capped() {
        let config = RetryConfig {
            jitter: false,
            max_delay: Duration::from_secs(2),
            ..Default::default()
        };
        assert_eq!(
            RetryUtil::calculate_delay(10, &config),
            Duration::from_secs(2)
        );
    }

    #[test]
    fn test_jitter_never_shortens_delay() {
        let config = RetryConfig::default();
        for attempt in 0..4 {
            let base = RetryUtil::calculate_delay(
                attempt,
                &RetryConfig {
                    jitter: false,
                    ..Default::default()
                },
            );
            let jittered = RetryUtil::calculate_delay(attempt, &config);
            assert!(jittered >= base.min(config.max_delay));
        }
    }

    #[test]
    fn test_status_mapping() {
        assert!(CommonHttpHandler::handle_response_status(StatusCode::OK).is_ok());
        assert!(matches!(
            CommonHttpHandler::handle_response_status(StatusCode::TOO_MANY_REQUESTS),
            Err(AppError::RateLimited(_))
        ));
        assert!(matches!(
            CommonHttpHandler::handle_response_status(StatusCode::NOT_FOUND),
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            CommonHttpHandler::handle_response_status(StatusCode::SERVICE_UNAVAILABLE),
            Err(AppError::NetworkError(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_until_success() {
        let config = RetryConfig {
            jitter: false,
            base_delay: Duration::from_millis(10),
            ..Default::default()
        };
        let calls = AtomicU32::new(0);

        let result = RetryUtil::with_retry(
            || async {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                if n < 2 {
                    Err(AppError::NetworkError("flaky".to_string()))
                } else {
                    Ok(n)
                }
            },
            &config,
            "test op",
        )
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_non_retryable_error_fails_fast() {
        let calls = AtomicU32::new(0);

        let result: AppResult<()> = RetryUtil::with_retry(
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(AppError::ValidationError("bad input".to_string()))
            },
            &RetryConfig::default(),
            "test op",
        )
        .await;

        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
