//! # Scheduling Primitives
//!
//! Fixed-interval stepping decoupled from the host frame rate.

mod interval;

pub use interval::FixedInterval;
