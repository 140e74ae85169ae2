//! Per-client-IP rate limiting.
//!
//! Rate limits live in the governor layer in front of the routers, not in
//! handler-local state, so every instance of the service enforces the same
//! policy without sharing an in-process map.

/// Moderate limit for general endpoints: 10 requests per second, burst of 20.
pub const GENERAL_RATE_PER_SECOND: u64 = 10;
pub const GENERAL_BURST_SIZE: u32 = 20;

/// Strict limit for credential endpoints: 2 requests per second, burst of 5
/// (slows brute force and account enumeration).
pub const SENSITIVE_RATE_PER_SECOND: u64 = 2;
pub const SENSITIVE_BURST_SIZE: u32 = 5;

/// Limit for the play-count endpoint: one counted play per second per
/// client, burst of 3, so a looping client cannot inflate totals.
pub const PLAY_RATE_PER_SECOND: u64 = 1;
pub const PLAY_BURST_SIZE: u32 = 3;

/// Build a `GovernorLayer` from a per-second rate and burst size.
///
/// A macro rather than a function so callers don't have to name the
/// governor's full layer type.
#[macro_export]
macro_rules! make_rate_limit_layer {
    ($per_second:expr, $burst_size:expr) => {{
        tower_governor::GovernorLayer::new(
            tower_governor::governor::GovernorConfigBuilder::default()
                .per_second($per_second)
                .burst_size($burst_size)
                .use_headers()
                .finish()
                .expect("invalid rate limiter configuration"),
        )
    }};
}
