//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the outbound feed port.

mod mock_aggregator;

pub use mock_aggregator::MockV3Aggregator;
