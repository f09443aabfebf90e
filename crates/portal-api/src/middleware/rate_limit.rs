//! Token bucket rate limiter middleware.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, warn};

use portal_core::config::{RateLimitConfig, RatePreset};
use portal_core::error::AppError;

use crate::error::ApiError;

/// In-memory token bucket rate limiter, one bucket per client key.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// Preset name, for logs.
    name: &'static str,
    /// Client key → bucket state.
    buckets: Arc<Mutex<HashMap<String, TokenBucket>>>,
    /// Maximum tokens per bucket.
    max_tokens: u32,
    /// Token refill rate per second.
    refill_rate: f64,
    /// Whether `X-Forwarded-For` identifies the client.
    trust_forwarded_for: bool,
}

#[derive(Debug, Clone)]
struct TokenBucket {
    tokens: f64,
    last_refill: Instant,
}

impl RateLimiter {
    /// Creates a new rate limiter.
    pub fn new(name: &'static str, max_tokens: u32, refill_rate: f64) -> Self {
        Self {
            name,
            buckets: Arc::new(Mutex::new(HashMap::new())),
            max_tokens,
            refill_rate,
            trust_forwarded_for: false,
        }
    }

    /// Keys clients on `X-Forwarded-For` when `trust` is set.
    pub fn trusting_forwarded_for(mut self, trust: bool) -> Self {
        self.trust_forwarded_for = trust;
        self
    }

    /// A limiter allowing `max_requests` per `window_seconds`.
    pub fn from_preset(name: &'static str, preset: &RatePreset) -> Self {
        Self::new(name, preset.max_requests, preset.refill_per_second())
    }

    /// Preset name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Attempts to consume a token for the given key.
    ///
    /// On rejection returns how long until the next token is available.
    pub async fn check(&self, key: &str) -> Result<(), Duration> {
        let mut buckets = self.buckets.lock().await;
        let now = Instant::now();

        let bucket = buckets.entry(key.to_string()).or_insert(TokenBucket {
            tokens: self.max_tokens as f64,
            last_refill: now,
        });

        // Refill tokens
        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.refill_rate).min(self.max_tokens as f64);
        bucket.last_refill = now;

        // Try to consume
        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            Ok(())
        } else {
            let wait = (1.0 - bucket.tokens) / self.refill_rate;
            Err(Duration::from_secs_f64(wait))
        }
    }

    /// Drops buckets untouched for `idle`. Returns how many were removed.
    pub async fn purge_idle(&self, idle: Duration) -> usize {
        let mut buckets = self.buckets.lock().await;
        let now = Instant::now();
        let before = buckets.len();
        buckets.retain(|_, bucket| now.duration_since(bucket.last_refill) < idle);
        before - buckets.len()
    }

    /// Time for an empty bucket to fill completely.
    fn full_refill(&self) -> Duration {
        Duration::from_secs_f64(self.max_tokens as f64 / self.refill_rate)
    }

    /// Number of tracked clients.
    pub async fn tracked(&self) -> usize {
        self.buckets.lock().await.len()
    }
}

/// The named presets applied to route groups.
#[derive(Debug, Clone)]
pub struct RateLimits {
    /// Credential endpoints: sign-in, sign-up, verify-email.
    pub auth: RateLimiter,
    /// Every other rate-limited API route.
    pub api: RateLimiter,
}

impl RateLimits {
    /// Builds both limiters from configuration.
    pub fn from_config(config: &RateLimitConfig) -> Self {
        let trust = config.trust_forwarded_for;
        Self {
            auth: RateLimiter::from_preset("auth", &config.auth).trusting_forwarded_for(trust),
            api: RateLimiter::from_preset("api", &config.api).trusting_forwarded_for(trust),
        }
    }

    /// Periodically drops buckets that have refilled to capacity.
    ///
    /// A bucket idle for its full refill time is indistinguishable from a
    /// fresh one, so removing it never changes a decision.
    pub fn spawn_sweeper(&self, every: Duration) -> JoinHandle<()> {
        let limiters = [self.auth.clone(), self.api.clone()];
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                for limiter in &limiters {
                    let removed = limiter.purge_idle(limiter.full_refill()).await;
                    if removed > 0 {
                        debug!(preset = limiter.name(), removed, "Purged idle rate-limit buckets");
                    }
                }
            }
        })
    }
}

/// Identifies the caller by peer address, else `"unknown"`.
///
/// With `trust_forwarded_for` the first `X-Forwarded-For` entry wins. Without
/// it the header is ignored, since any client can set it.
pub fn client_key(
    headers: &HeaderMap,
    peer: Option<SocketAddr>,
    trust_forwarded_for: bool,
) -> String {
    let forwarded = trust_forwarded_for
        .then(|| headers.get("x-forwarded-for"))
        .flatten()
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from);

    forwarded
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Rejects the request with 429 when the caller's bucket is empty.
///
/// Installed with `route_layer`, so it runs before any body extraction.
pub async fn enforce(State(limiter): State<RateLimiter>, request: Request, next: Next) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let key = client_key(request.headers(), peer, limiter.trust_forwarded_for);

    match limiter.check(&key).await {
        Ok(()) => next.run(request).await,
        Err(retry_after) => {
            let seconds = retry_after.as_secs_f64().ceil().max(1.0) as u64;
            warn!(
                preset = limiter.name(),
                client = %key,
                retry_after = seconds,
                "Rate limit exceeded"
            );

            let mut response =
                ApiError(AppError::rate_limited("Too many requests, please try again later"))
                    .into_response();
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(seconds));
            response
        }
    }
}
