//! # Domain Module
//!
//! Feed rounds, normalized readings and the rules that connect them.

pub mod errors;
pub mod invariants;
pub mod value_objects;

pub use errors::*;
pub use invariants::*;
pub use value_objects::*;
