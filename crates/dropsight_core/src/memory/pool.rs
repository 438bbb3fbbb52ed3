//! # Widget Pool
//!
//! Bounded, lazily-growing pool of host widgets.

use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{PoolError, PoolResult};

/// Host side of the pool: creates, deactivates and destroys widgets.
///
/// The pool never touches a widget except through this trait, so the same
/// pool works for a real UI toolkit and for a headless recorder.
pub trait PoolSource {
    /// Handle type identifying one widget instance.
    type Handle: Copy + Eq + Hash + Debug;

    /// Creates a new, inactive widget.
    ///
    /// Returns `None` when the host cannot create one right now (for
    /// example, the template widget has not been built yet).
    fn create(&mut self) -> Option<Self::Handle>;

    /// Deactivates a widget that is being returned to the pool.
    fn deactivate(&mut self, handle: Self::Handle);

    /// Permanently destroys a widget the pool no longer retains.
    fn destroy(&mut self, handle: Self::Handle);
}

/// Pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Widgets created up-front by [`WidgetPool::warm`].
    pub initial_capacity: usize,
    /// Hard ceiling on owned + idle widgets.
    pub max_capacity: usize,
    /// Idle widgets retained on release; the rest are destroyed.
    pub max_idle: usize,
}

impl PoolConfig {
    /// Creates a config where every live widget may be retained.
    #[must_use]
    pub const fn new(initial_capacity: usize, max_capacity: usize) -> Self {
        Self {
            initial_capacity,
            max_capacity,
            max_idle: max_capacity,
        }
    }
}

/// Pool counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Widgets created through the source.
    pub created: u64,
    /// Widgets destroyed through the source.
    pub destroyed: u64,
    /// Successful acquisitions.
    pub acquired: u64,
    /// Successful releases.
    pub released: u64,
    /// Acquisitions refused at the ceiling.
    pub exhausted: u64,
}

/// A pool of reusable widgets.
///
/// Handles are exclusively owned between [`acquire`](Self::acquire) and
/// [`release`](Self::release). The pool never hands out a handle that is
/// currently owned.
///
/// # Thread Safety
///
/// This pool is NOT thread-safe. Use it from the tick thread only, or wrap
/// it in a mutex when work is distributed across threads.
///
/// # Example
///
/// ```rust,ignore
/// let mut pool = WidgetPool::new(PoolConfig::new(16, 512));
/// pool.warm(&mut backend);
///
/// let widget = pool.acquire(&mut backend)?;
/// // ... configure, position, activate ...
/// pool.release(&mut backend, widget)?;
/// ```
pub struct WidgetPool<H> {
    /// Inactive widgets ready for reuse (LIFO).
    idle: Vec<H>,
    /// Widgets currently handed out.
    owned: HashSet<H>,
    /// Sizing limits.
    config: PoolConfig,
    /// Counters.
    stats: PoolStats,
}

impl<H: Copy + Eq + Hash + Debug> WidgetPool<H> {
    /// Creates an empty pool.
    ///
    /// Bookkeeping storage is reserved for the ceiling so that steady-state
    /// acquire/release never reallocates.
    #[must_use]
    pub fn new(config: PoolConfig) -> Self {
        assert!(config.max_capacity > 0, "Capacity must be greater than zero");

        Self {
            idle: Vec::with_capacity(config.max_capacity.min(config.max_idle)),
            owned: HashSet::with_capacity(config.max_capacity),
            config,
            stats: PoolStats::default(),
        }
    }

    /// Pre-creates up to `initial_capacity` idle widgets.
    ///
    /// Returns how many were created. Stops early if the source cannot
    /// create more; calling again later tops the pool up.
    pub fn warm<S: PoolSource<Handle = H> + ?Sized>(&mut self, source: &mut S) -> usize {
        let target = self
            .config
            .initial_capacity
            .min(self.config.max_capacity)
            .min(self.config.max_idle);
        let mut created = 0;

        while self.idle.len() < target && self.live_count() < self.config.max_capacity {
            let Some(handle) = source.create() else { break };
            self.idle.push(handle);
            self.stats.created += 1;
            created += 1;
        }

        created
    }

    /// Hands out an inactive widget.
    ///
    /// Reuses an idle widget when one exists, otherwise creates one if the
    /// ceiling allows. The widget is NOT activated; the caller shows it once
    /// its placement is valid.
    ///
    /// # Errors
    ///
    /// [`PoolError::Exhausted`] at the ceiling with nothing idle,
    /// [`PoolError::SourceUnavailable`] when the source refuses to create.
    pub fn acquire<S>(&mut self, source: &mut S) -> PoolResult<H>
    where
        S: PoolSource<Handle = H> + ?Sized,
    {
        let handle = if let Some(handle) = self.idle.pop() {
            handle
        } else if self.live_count() < self.config.max_capacity {
            let handle = source.create().ok_or(PoolError::SourceUnavailable)?;
            self.stats.created += 1;
            handle
        } else {
            self.stats.exhausted += 1;
            return Err(PoolError::Exhausted {
                max_capacity: self.config.max_capacity,
            });
        };

        self.owned.insert(handle);
        self.stats.acquired += 1;
        Ok(handle)
    }

    /// Returns an owned widget to the pool.
    ///
    /// The widget is deactivated, then retained for reuse or destroyed when
    /// the pool is already holding as many widgets as it may.
    ///
    /// # Errors
    ///
    /// [`PoolError::NotOwned`] if the handle is not currently owned. That is
    /// a lifecycle bug in the caller; debug builds panic.
    pub fn release<S: PoolSource<Handle = H> + ?Sized>(
        &mut self,
        source: &mut S,
        handle: H,
    ) -> PoolResult<()> {
        debug_assert!(
            self.owned.contains(&handle),
            "widget {handle:?} released while not owned"
        );
        if !self.owned.remove(&handle) {
            tracing::error!(?handle, "widget released while not owned");
            return Err(PoolError::NotOwned);
        }

        source.deactivate(handle);
        self.stats.released += 1;

        let retain = self.idle.len() < self.config.max_idle
            && self.live_count() < self.config.max_capacity;
        if retain {
            self.idle.push(handle);
        } else {
            source.destroy(handle);
            self.stats.destroyed += 1;
        }

        Ok(())
    }

    /// Destroys every idle widget.
    ///
    /// Owned widgets are untouched; their owners release them normally.
    pub fn drain_idle<S: PoolSource<Handle = H> + ?Sized>(&mut self, source: &mut S) {
        for handle in self.idle.drain(..) {
            source.destroy(handle);
            self.stats.destroyed += 1;
        }
    }

    /// Applies new limits, destroying idle widgets above them.
    ///
    /// Owned widgets above a lowered ceiling stay with their owners and are
    /// destroyed when released.
    pub fn reconfigure<S: PoolSource<Handle = H> + ?Sized>(
        &mut self,
        source: &mut S,
        config: PoolConfig,
    ) {
        assert!(config.max_capacity > 0, "Capacity must be greater than zero");
        self.config = config;

        while !self.idle.is_empty()
            && (self.idle.len() > config.max_idle || self.live_count() > config.max_capacity)
        {
            if let Some(handle) = self.idle.pop() {
                source.destroy(handle);
                self.stats.destroyed += 1;
            }
        }
    }

    /// Returns true if the handle is currently handed out.
    #[inline]
    #[must_use]
    pub fn is_owned(&self, handle: H) -> bool {
        self.owned.contains(&handle)
    }

    /// Number of widgets currently handed out.
    #[inline]
    #[must_use]
    pub fn owned_count(&self) -> usize {
        self.owned.len()
    }

    /// Number of inactive widgets waiting for reuse.
    #[inline]
    #[must_use]
    pub fn idle_count(&self) -> usize {
        self.idle.len()
    }

    /// Owned + idle widgets.
    #[inline]
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.owned.len() + self.idle.len()
    }

    /// Current limits.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> PoolConfig {
        self.config
    }

    /// Counters since creation.
    #[inline]
    #[must_use]
    pub const fn stats(&self) -> PoolStats {
        self.stats
    }
}
