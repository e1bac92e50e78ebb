//! # Retry Policy
//!
//! Bounded retries with exponential backoff, applied around a single
//! [`HttpTransport::send`]. A request is retried when the transport fails
//! outright or when the response status is in the configured retryable set.
//! Once the bound is reached the last outcome is handed back unchanged, so a
//! persistent 502 still reaches the caller as a 502.

use crate::framework::{HttpRequest, HttpResponse, HttpTransport, TransportError};
use std::time::Duration;
use tracing::warn;

/// Upper bound on a single backoff sleep.
pub const MAX_BACKOFF: Duration = Duration::from_secs(120);

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt. `0` disables retrying.
    pub max_retries: u32,
    /// Base delay in seconds; the n-th retry sleeps `factor * 2^(n-1)`.
    pub backoff_factor: f64,
    /// Response statuses that trigger a retry.
    pub retry_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            backoff_factor: 0.3,
            retry_statuses: vec![500, 502, 504],
        }
    }
}

impl RetryPolicy {
    /// A policy that performs exactly one attempt.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff_factor: 0.0,
            retry_statuses: Vec::new(),
        }
    }

    pub fn is_retryable_status(&self, status: u16) -> bool {
        self.retry_statuses.contains(&status)
    }

    /// Sleep before the given retry (1-based).
    pub fn backoff(&self, retry: u32) -> Duration {
        if retry == 0 || self.backoff_factor <= 0.0 || !self.backoff_factor.is_finite() {
            return Duration::ZERO;
        }
        let exponent = i32::try_from(retry - 1).unwrap_or(i32::MAX);
        let seconds = self.backoff_factor * 2f64.powi(exponent);
        if !seconds.is_finite() || seconds >= MAX_BACKOFF.as_secs_f64() {
            return MAX_BACKOFF;
        }
        Duration::from_secs_f64(seconds)
    }

    /// Sends `request` through `transport`, retrying per this policy.
    pub async fn send(
        &self,
        transport: &dyn HttpTransport,
        request: &HttpRequest,
    ) -> Result<HttpResponse, TransportError> {
        let mut retry = 0;
        loop {
            let outcome = transport.send(request.clone()).await;
            let reason = match &outcome {
                Ok(response) if self.is_retryable_status(response.status) => {
                    Some(format!("status {}", response.status))
                }
                Ok(_) => None,
                Err(e) => Some(e.to_string()),
            };
            let Some(reason) = reason else {
                return outcome;
            };

            if retry >= self.max_retries {
                return outcome;
            }
            retry += 1;
            let delay = self.backoff(retry);
            warn!(
                method = %request.method,
                url = %request.url,
                retry,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                %reason,
                "Retrying request"
            );
            tokio::time::sleep(delay).await;
        }
    }
}
