//! # Domain Invariants
//!
//! Rules a round must satisfy before its answer is used, and the conversion
//! into normalized precision.

use super::errors::{OracleError, OracleResult};
use super::value_objects::{RoundData, MAX_FEED_DECIMALS, PRICE_DECIMALS};
use shared_types::{Timestamp, U256};

/// Check that a round carries a usable answer.
///
/// Checks run in order: positive answer, complete round, answer computed in
/// this round, then age (only when `max_age_secs` is set). A round stamped
/// in the future passes the age check.
pub fn validate_round(
    round: &RoundData,
    now: Timestamp,
    max_age_secs: Option<u64>,
) -> OracleResult<()> {
    if round.answer <= 0 {
        return Err(OracleError::NonPositiveAnswer {
            round_id: round.round_id,
            answer: round.answer,
        });
    }

    if round.updated_at == 0 {
        return Err(OracleError::IncompleteRound(round.round_id));
    }

    if round.answered_in_round < round.round_id {
        return Err(OracleError::StaleRound {
            round_id: round.round_id,
            answered_in_round: round.answered_in_round,
        });
    }

    if let Some(max_age_secs) = max_age_secs {
        if now.saturating_sub(round.updated_at) > max_age_secs {
            return Err(OracleError::StalePrice {
                updated_at: round.updated_at,
                now,
                max_age_secs,
            });
        }
    }

    Ok(())
}

/// Convert a positive feed answer into [`PRICE_DECIMALS`] precision.
///
/// Feeds with more decimals are truncated, feeds with fewer are scaled up.
pub fn normalize_answer(answer: i128, feed_decimals: u8) -> OracleResult<U256> {
    if feed_decimals > MAX_FEED_DECIMALS {
        return Err(OracleError::UnsupportedDecimals(feed_decimals));
    }

    if answer <= 0 {
        return Err(OracleError::NonPositiveAnswer {
            round_id: 0,
            answer,
        });
    }

    let raw = U256::from(answer.unsigned_abs());

    let price = if feed_decimals >= PRICE_DECIMALS {
        raw / U256::exp10((feed_decimals - PRICE_DECIMALS) as usize)
    } else {
        raw.checked_mul(U256::exp10((PRICE_DECIMALS - feed_decimals) as usize))
            .ok_or(OracleError::PriceOverflow)?
    };

    if price.is_zero() {
        return Err(OracleError::BelowPrecision {
            answer,
            decimals: feed_decimals,
        });
    }

    Ok(price)
}

/// Convert a whole-USD threshold into [`PRICE_DECIMALS`] precision.
///
/// Returns `None` on overflow.
pub fn usd_to_price(usd: U256) -> Option<U256> {
    usd.checked_mul(U256::exp10(PRICE_DECIMALS as usize))
}
