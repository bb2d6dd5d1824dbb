//! Price Oracle Service - validated, normalized feed reads

use crate::domain::{normalize_answer, validate_round, OracleError, OracleReading, OracleResult};
use crate::ports::inbound::PriceOracleApi;
use crate::ports::outbound::AggregatorV3;
use crate::COMPONENT;
use async_trait::async_trait;
use shared_types::{SystemTimeSource, TimeSource};
use std::env;
use std::sync::Arc;
use tracing::warn;
use wh_telemetry::log_price_event;

/// Oracle configuration
#[derive(Clone, Debug, Default)]
pub struct OracleConfig {
    /// Reject answers older than this many seconds (disabled when `None`)
    pub max_price_age_secs: Option<u64>,
    /// Description the feed must report, checked by `verify_feed`
    pub expected_description: Option<String>,
}

impl OracleConfig {
    /// Load from `WH_ORACLE_MAX_PRICE_AGE_SECS` and `WH_ORACLE_DESCRIPTION`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            max_price_age_secs: lookup("WH_ORACLE_MAX_PRICE_AGE_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|secs| *secs > 0),
            expected_description: lookup("WH_ORACLE_DESCRIPTION").filter(|d| !d.is_empty()),
        }
    }
}

/// Price oracle service over an aggregator feed.
pub struct PriceOracleService<A>
where
    A: AggregatorV3,
{
    feed: Arc<A>,
    config: OracleConfig,
    time_source: Arc<dyn TimeSource>,
}

impl<A> PriceOracleService<A>
where
    A: AggregatorV3,
{
    /// Create a service reading `feed` with wall-clock staleness checks.
    pub fn new(feed: Arc<A>, config: OracleConfig) -> Self {
        Self::with_time_source(feed, config, Arc::new(SystemTimeSource))
    }

    /// Create a service with an explicit clock.
    pub fn with_time_source(
        feed: Arc<A>,
        config: OracleConfig,
        time_source: Arc<dyn TimeSource>,
    ) -> Self {
        Self {
            feed,
            config,
            time_source,
        }
    }

    /// The underlying feed.
    pub fn feed(&self) -> &Arc<A> {
        &self.feed
    }

    /// Active configuration.
    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    /// Check that the feed is reachable and, if configured, is the expected pair.
    pub async fn verify_feed(&self) -> OracleResult<String> {
        let found = self.feed.description().await?;
        if let Some(expected) = &self.config.expected_description {
            if *expected != found {
                return Err(OracleError::FeedMismatch {
                    expected: expected.clone(),
                    found,
                });
            }
        }
        Ok(found)
    }

    async fn read(&self) -> OracleResult<OracleReading> {
        let round = self.feed.latest_round_data().await?;
        validate_round(&round, self.time_source.now(), self.config.max_price_age_secs)?;

        let decimals = self.feed.decimals().await?;
        let price = normalize_answer(round.answer, decimals)?;

        Ok(OracleReading {
            round_id: round.round_id,
            price,
            updated_at: round.updated_at,
        })
    }
}

#[async_trait]
impl<A> PriceOracleApi for PriceOracleService<A>
where
    A: AggregatorV3,
{
    async fn latest_reading(&self) -> OracleResult<OracleReading> {
        match self.read().await {
            Ok(reading) => {
                log_price_event!(
                    debug,
                    COMPONENT,
                    "[wh-01] price read",
                    reading.round_id,
                    reading.price,
                    updated_at = reading.updated_at
                );
                Ok(reading)
            }
            Err(e) => {
                warn!(component = COMPONENT, error = %e, "[wh-01] oracle read rejected");
                Err(e)
            }
        }
    }

    async fn feed_decimals(&self) -> OracleResult<u8> {
        self.feed.decimals().await
    }

    async fn description(&self) -> OracleResult<String> {
        self.feed.description().await
    }
}
