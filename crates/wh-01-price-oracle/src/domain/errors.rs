//! # Domain Errors
//!
//! Error types for the price oracle adapter.

use super::value_objects::RoundId;
use shared_types::Timestamp;
use thiserror::Error;

/// Result alias for oracle operations.
pub type OracleResult<T> = Result<T, OracleError>;

/// Reasons a price could not be produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// Zero or negative answer; meaningless as a USD price.
    #[error("Non-positive answer {answer} in round {round_id}")]
    NonPositiveAnswer {
        /// Offending round
        round_id: RoundId,
        /// Reported answer
        answer: i128,
    },

    /// Round has no update timestamp yet.
    #[error("Round {0} is not complete")]
    IncompleteRound(RoundId),

    /// Answer was carried over from an earlier round.
    #[error("Stale round: round {round_id} answered in round {answered_in_round}")]
    StaleRound {
        /// Latest round
        round_id: RoundId,
        /// Round that actually produced the answer
        answered_in_round: RoundId,
    },

    /// Answer is older than the configured maximum age.
    #[error("Stale price: updated at {updated_at}, now {now}, max age {max_age_secs}s")]
    StalePrice {
        /// Feed update timestamp
        updated_at: Timestamp,
        /// Evaluation time
        now: Timestamp,
        /// Configured limit
        max_age_secs: u64,
    },

    /// Feed precision outside the supported range.
    #[error("Unsupported feed decimals: {0}")]
    UnsupportedDecimals(u8),

    /// Answer vanishes when truncated to the normalized precision.
    #[error("Answer {answer} with {decimals} decimals is below price precision")]
    BelowPrecision {
        /// Reported answer
        answer: i128,
        /// Feed decimals
        decimals: u8,
    },

    /// Scaling the answer overflowed.
    #[error("Price overflow while normalizing")]
    PriceOverflow,

    /// Requested round does not exist.
    #[error("Round not found: {0}")]
    RoundNotFound(RoundId),

    /// Feed description differs from the configured one.
    #[error("Feed mismatch: expected {expected:?}, found {found:?}")]
    FeedMismatch {
        /// Configured description
        expected: String,
        /// Reported description
        found: String,
    },

    /// The feed could not be reached.
    #[error("Feed unreachable: {0}")]
    Unreachable(String),
}
