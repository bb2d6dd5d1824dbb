//! Mock Aggregator Adapter
//!
//! Implements `AggregatorV3` with rounds driven by test code or a scenario.

use crate::domain::{OracleError, OracleResult, RoundData, RoundId};
use crate::ports::outbound::AggregatorV3;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{SystemTimeSource, TimeSource, Timestamp};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Version reported by the mock feed.
const MOCK_VERSION: u64 = 0;

struct MockState {
    latest_round: RoundId,
    rounds: BTreeMap<RoundId, RoundData>,
    description: String,
    unreachable: bool,
}

/// In-memory aggregator for tests and local runs.
///
/// Mirrors the behaviour of the standard `MockV3Aggregator` test contract:
/// each `update_answer` opens a new round stamped with the current time.
pub struct MockV3Aggregator {
    decimals: u8,
    state: RwLock<MockState>,
    time_source: Arc<dyn TimeSource>,
}

impl MockV3Aggregator {
    /// Create a feed whose first round carries `initial_answer`.
    pub fn new(decimals: u8, initial_answer: i128) -> Self {
        Self::with_time_source(decimals, initial_answer, Arc::new(SystemTimeSource))
    }

    /// Create a feed stamped by the given clock.
    pub fn with_time_source(
        decimals: u8,
        initial_answer: i128,
        time_source: Arc<dyn TimeSource>,
    ) -> Self {
        let feed = Self {
            decimals,
            state: RwLock::new(MockState {
                latest_round: 0,
                rounds: BTreeMap::new(),
                description: "MockV3Aggregator".to_string(),
                unreachable: false,
            }),
            time_source,
        };
        feed.update_answer(initial_answer);
        feed
    }

    /// Replace the reported description.
    pub fn with_description(self, description: impl Into<String>) -> Self {
        self.state.write().description = description.into();
        self
    }

    /// Open a new round with `answer`, stamped now.
    pub fn update_answer(&self, answer: i128) -> RoundId {
        let now = self.time_source.now();
        let mut state = self.state.write();
        let round_id = state.latest_round + 1;
        state.latest_round = round_id;
        state.rounds.insert(
            round_id,
            RoundData {
                round_id,
                answer,
                started_at: now,
                updated_at: now,
                answered_in_round: round_id,
            },
        );
        debug!(round_id, answer, "[wh-01] mock feed answer updated");
        round_id
    }

    /// Write an arbitrary round and make it the latest.
    pub fn update_round_data(
        &self,
        round_id: RoundId,
        answer: i128,
        timestamp: Timestamp,
        started_at: Timestamp,
    ) {
        let mut state = self.state.write();
        state.latest_round = round_id;
        state.rounds.insert(
            round_id,
            RoundData {
                round_id,
                answer,
                started_at,
                updated_at: timestamp,
                answered_in_round: round_id,
            },
        );
    }

    /// Make the latest round report an answer carried over from `answered_in_round`.
    pub fn set_answered_in_round(&self, answered_in_round: RoundId) {
        let mut state = self.state.write();
        let latest = state.latest_round;
        if let Some(round) = state.rounds.get_mut(&latest) {
            round.answered_in_round = answered_in_round;
        }
    }

    /// Simulate transport failure on every read.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.state.write().unreachable = unreachable;
    }

    /// Latest round id.
    pub fn latest_round(&self) -> RoundId {
        self.state.read().latest_round
    }

    fn ensure_reachable(&self) -> OracleResult<()> {
        if self.state.read().unreachable {
            return Err(OracleError::Unreachable("mock feed offline".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl AggregatorV3 for MockV3Aggregator {
    async fn decimals(&self) -> OracleResult<u8> {
        self.ensure_reachable()?;
        Ok(self.decimals)
    }

    async fn description(&self) -> OracleResult<String> {
        self.ensure_reachable()?;
        Ok(self.state.read().description.clone())
    }

    async fn version(&self) -> OracleResult<u64> {
        self.ensure_reachable()?;
        Ok(MOCK_VERSION)
    }

    async fn latest_round_data(&self) -> OracleResult<RoundData> {
        self.ensure_reachable()?;
        let state = self.state.read();
        state
            .rounds
            .get(&state.latest_round)
            .copied()
            .ok_or(OracleError::RoundNotFound(state.latest_round))
    }

    async fn get_round_data(&self, round_id: RoundId) -> OracleResult<RoundData> {
        self.ensure_reachable()?;
        self.state
            .read()
            .rounds
            .get(&round_id)
            .copied()
            .ok_or(OracleError::RoundNotFound(round_id))
    }
}
