//! # Vault Events
//!
//! Defines all event types that flow through the shared bus.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Timestamp, U256};

/// All events that can be published to the event bus.
///
/// Each variant is emitted exactly once per committed lock transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaultEvent {
    /// Value was added to a lock.
    Deposited {
        /// The lock owner.
        owner: Address,
        /// Value added by this deposit.
        amount: U256,
        /// Locked total after the deposit.
        total: U256,
    },

    /// Unlock parameters were committed.
    ParametersCommitted {
        /// The lock owner.
        owner: Address,
        /// Unlock date (seconds since epoch).
        target_date: Timestamp,
        /// Unlock price in oracle precision.
        target_price: U256,
    },

    /// The lock was released to its owner.
    Withdrawn {
        /// The lock owner.
        owner: Address,
        /// Value transferred out.
        amount: U256,
    },
}

impl VaultEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::Deposited { .. } => EventTopic::Deposits,
            Self::ParametersCommitted { .. } => EventTopic::Parameters,
            Self::Withdrawn { .. } => EventTopic::Withdrawals,
        }
    }

    /// Get the lock owner the event concerns.
    #[must_use]
    pub fn owner(&self) -> &Address {
        match self {
            Self::Deposited { owner, .. }
            | Self::ParametersCommitted { owner, .. }
            | Self::Withdrawn { owner, .. } => owner,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Deposit events.
    Deposits,
    /// Parameter commitment events.
    Parameters,
    /// Withdrawal events.
    Withdrawals,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Lock owners to include. Empty means all owners.
    pub owners: Vec<Address>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            owners: Vec::new(),
        }
    }

    /// Create a filter for events about specific owners.
    #[must_use]
    pub fn owners(owners: Vec<Address>) -> Self {
        Self {
            topics: Vec::new(),
            owners,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &VaultEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let owner_match = self.owners.is_empty() || self.owners.contains(event.owner());

        topic_match && owner_match
    }
}
