//! # DROPSIGHT Core
//!
//! Allocation-free building blocks for the overlay engine:
//! - A bounded widget pool that recycles host widgets instead of
//!   creating and destroying them every time an object appears
//! - A fixed-interval accumulator that turns variable frame deltas into a
//!   deterministic number of scheduler passes
//!
//! ## Architecture Rules
//!
//! 1. **No heap allocations in the steady state** - pools are pre-warmed and
//!    bookkeeping collections are sized once
//! 2. **Single-threaded** - nothing here locks; wrap in a mutex if you must
//!    share across threads

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod memory;
pub mod timing;

pub use error::{PoolError, PoolResult};
pub use memory::{PoolConfig, PoolSource, PoolStats, WidgetPool};
pub use timing::FixedInterval;
