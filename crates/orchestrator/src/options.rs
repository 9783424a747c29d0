//! Tunables for the orchestrator: call timeouts and cache write policy.

use std::str::FromStr;
use std::time::Duration;

/// What to do when a cache write fails after the durable store already
/// holds the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CacheWritePolicy {
    /// Log and count the failure; the request still succeeds.
    #[default]
    BestEffort,
    /// Fail the request. The durable record is kept.
    Strict,
}

impl FromStr for CacheWritePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "best_effort" | "best-effort" | "besteffort" => Ok(CacheWritePolicy::BestEffort),
            "strict" => Ok(CacheWritePolicy::Strict),
            other => Err(format!(
                "unknown cache write policy '{other}' (expected 'best_effort' or 'strict')"
            )),
        }
    }
}

impl std::fmt::Display for CacheWritePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheWritePolicy::BestEffort => f.write_str("best_effort"),
            CacheWritePolicy::Strict => f.write_str("strict"),
        }
    }
}

/// Upper bounds for each kind of outbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// Customer and product lookups.
    pub lookup: Duration,
    /// Durable store insert and read.
    pub store: Duration,
    /// Cache get and set.
    pub cache: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            lookup: Duration::from_secs(5),
            store: Duration::from_secs(5),
            cache: Duration::from_secs(2),
        }
    }
}

/// Orchestrator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OrchestratorOptions {
    pub timeouts: Timeouts,
    pub cache_write_policy: CacheWritePolicy,
}
