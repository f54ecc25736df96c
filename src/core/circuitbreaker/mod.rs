//!  Circuit Breaker State Machine:
//!
//!                    trip: ready_to_trip(counts) after a failure
//!
//!             +-----------------------------------------------------------------------+
//!             |                                                                       |
//!             |                                                                       v
//!     +----------------+                   +----------------+  retry timeout  +----------------+
//!     |                |                   |                |<----------------|                |
//!     |                | max_requests      |                |  (next call)    |                |
//!     |     Closed     |<------------------|    HalfOpen    |                 |      Open      |
//!     |                | probes succeeded  |                |  a probe failed |                |
//!     |                |                   |                +---------------->|                |
//!     +----------------+                   +----------------+                 +----------------+
//!
//! - Closed lets every call through and records its outcome in `Counts`.
//! - Open rejects every call with `BreakerError::Open` until its retry timeout elapsed.
//!   The switch to HalfOpen happens lazily, on the first call after the deadline.
//! - HalfOpen lets at most `max_requests` probes through and rejects the rest with
//!   `BreakerError::TooManyRequests`. One failed probe re-opens the breaker,
//!   `max_requests` consecutive successful probes close it.
//!
//! Counts are cleared on every transition. Rejected calls are never counted.

mod breaker;
mod counts;
mod error;
mod settings;

pub use breaker::*;
pub use counts::*;
pub use error::*;
pub use settings::*;
