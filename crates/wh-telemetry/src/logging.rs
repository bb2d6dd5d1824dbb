//! Structured logging helpers.
//!
//! Every component logs through `tracing` with a `component` field and a
//! `[wh-NN]` message prefix so JSON logs can be filtered per component.

/// Log with a component field at any level.
#[macro_export]
macro_rules! log_event {
    ($level:ident, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a lock-related event with standard fields.
///
/// `$owner` must implement `Display` (usually `short_address(&owner)`).
#[macro_export]
macro_rules! log_lock_event {
    ($level:ident, $component:expr, $msg:expr, $owner:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            owner = %$owner,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log an oracle reading with standard fields.
#[macro_export]
macro_rules! log_price_event {
    ($level:ident, $component:expr, $msg:expr, $round_id:expr, $price:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = $component,
            round_id = $round_id,
            price = %$price,
            $($($field)*,)?
            $msg
        )
    };
}
