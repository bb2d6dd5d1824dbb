//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the custody port.

mod in_memory_custody;

pub use in_memory_custody::InMemoryCustody;
