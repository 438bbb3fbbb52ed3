//! # Memory Management
//!
//! Recycled widget instances for zero-allocation overlay maintenance.
//!
//! Widgets are created by the host, handed out to exactly one owner at a
//! time, and returned inactive when the owner goes away.

mod pool;

pub use pool::{PoolConfig, PoolSource, PoolStats, WidgetPool};
