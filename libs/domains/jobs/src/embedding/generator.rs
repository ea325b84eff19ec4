use rand::RngExt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use super::openai::{DEFAULT_EMBEDDING_MODEL, OpenAIConfig, OpenAIProvider};
use super::provider::{EmbeddingError, EmbeddingProvider};

/// Length of every embedding vector in the system
pub const EMBEDDING_DIM: usize = 1536;

/// Component value of the degraded-mode sentinel vector
pub const SENTINEL_VALUE: f32 = 1e-5;

/// Bounded retry policy for rate-limited embedding attempts
///
/// The delay doubles each attempt, gains a small random jitter, and is
/// capped per attempt. Only rate limits are retried; any other failure
/// short-circuits to the sentinel vector.
#[derive(Debug, Clone)]
pub struct BackoffPolicy {
    /// Maximum number of attempts before giving up
    pub max_attempts: u32,

    /// Delay before the second attempt, in milliseconds
    pub initial_delay_ms: u64,

    /// Cap applied to each attempt's delay, in milliseconds
    pub max_delay_ms: u64,

    /// Upper bound of the random jitter added to each delay, in milliseconds
    pub jitter_ms: u64,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_delay_ms: 1_000,
            max_delay_ms: 20_000,
            jitter_ms: 250,
        }
    }
}

/// Turns free text into a fixed-length vector, degrading instead of failing.
///
/// With no provider configured every call yields the sentinel vector, which
/// keeps job ingestion working without an embedding credential. Callers must
/// not assume the stored vector reflects real text when [`is_sentinel`]
/// detects the pattern.
pub struct EmbeddingGenerator {
    provider: Option<Arc<dyn EmbeddingProvider>>,
    model: String,
    policy: BackoffPolicy,
}

impl EmbeddingGenerator {
    pub fn new(
        provider: Option<Arc<dyn EmbeddingProvider>>,
        model: impl Into<String>,
        policy: BackoffPolicy,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            policy,
        }
    }

    /// Build from the environment: a configured `OPENAI_API_KEY` selects the
    /// real provider, otherwise the generator starts degraded.
    pub fn from_env() -> Self {
        match OpenAIConfig::from_env() {
            Ok(config) => Self::new(
                Some(Arc::new(OpenAIProvider::new(config))),
                DEFAULT_EMBEDDING_MODEL,
                BackoffPolicy::default(),
            ),
            Err(_) => {
                warn!("no embedding credential configured; job vectors will be sentinels");
                Self::degraded()
            }
        }
    }

    /// A generator with no provider: every call yields the sentinel vector.
    pub fn degraded() -> Self {
        Self::new(None, DEFAULT_EMBEDDING_MODEL, BackoffPolicy::default())
    }

    /// The constant fallback vector.
    pub fn sentinel() -> Vec<f32> {
        vec![SENTINEL_VALUE; EMBEDDING_DIM]
    }

    /// Embed `text`; infallible by contract.
    ///
    /// Rate limits are retried under the backoff policy; an exhausted budget
    /// or any other failure yields the sentinel vector.
    pub async fn embed(&self, text: &str) -> Vec<f32> {
        let Some(provider) = &self.provider else {
            return Self::sentinel();
        };

        let mut delay = self.policy.initial_delay_ms;
        for attempt in 1..=self.policy.max_attempts {
            match provider.embed(&self.model, text).await {
                Ok(vector) if vector.len() == EMBEDDING_DIM => return vector,
                Ok(vector) => {
                    warn!(
                        dimension = vector.len(),
                        expected = EMBEDDING_DIM,
                        "embedding has wrong dimension; using sentinel vector"
                    );
                    return Self::sentinel();
                }
                Err(EmbeddingError::RateLimited) => {
                    if attempt == self.policy.max_attempts {
                        break;
                    }
                    let jitter = rand::rng().random_range(0..=self.policy.jitter_ms);
                    let wait = delay.min(self.policy.max_delay_ms) + jitter;
                    debug!(
                        attempt,
                        wait_ms = wait,
                        "embedding service rate limited; backing off"
                    );
                    tokio::time::sleep(Duration::from_millis(wait)).await;
                    delay = delay.saturating_mul(2);
                }
                Err(e) => {
                    warn!(error = %e, "embedding request failed; using sentinel vector");
                    return Self::sentinel();
                }
            }
        }

        warn!(
            attempts = self.policy.max_attempts,
            "embedding retry budget exhausted; using sentinel vector"
        );
        Self::sentinel()
    }
}

/// Detect the degraded-mode fallback pattern in a stored vector.
pub fn is_sentinel(vector: &[f32]) -> bool {
    vector.len() == EMBEDDING_DIM && vector.iter().all(|c| *c == SENTINEL_VALUE)
}
