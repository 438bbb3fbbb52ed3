//! # Overlay Engine
//!
//! The facade the host drives once per frame.
//!
//! ## Tick order
//!
//! 1. Mark every record dirty if the teleport override flipped.
//! 2. Drain the inbox (lifecycle, attribute and config events queued since
//!    the previous tick), then retry entities still waiting for a widget.
//! 3. Run every due position pass.
//! 4. Run every due content pass.
//!
//! Events are only applied between passes, so a removal is never seen by
//! an in-flight iteration.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut engine = OverlayEngine::new(OverlayConfig::load("dropsight.toml")?)?;
//! engine.warm(&mut backend);
//! let events = engine.inbox();
//!
//! // per frame, on the tick thread
//! let ctx = FrameContext::new(&items).with_viewer(viewer).with_camera(&camera);
//! engine.tick(dt, &ctx, &mut backend);
//! ```

use dropsight_core::{PoolStats, WidgetPool};
use dropsight_shared::{ConfigChange, EntityKey, HostEvent};
use dropsight_ui::{WidgetBackend, WidgetId};

use crate::attributes::PaintContext;
use crate::bus::{ChangeBus, ChangePublisher, EventInbox, EventSender};
use crate::config::{finite_offset, positive, OverlayConfig};
use crate::content::ContentRefresh;
use crate::error::{OverlayError, OverlayResult};
use crate::host::FrameContext;
use crate::position::{PositionScheduler, PositionSettings};
use crate::record::DisplayRecord;
use crate::registry::DisplayRegistry;
use crate::stats::{EngineStats, TickReport};

/// Snapshot of one display record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordState {
    /// The widget the record owns.
    pub widget: WidgetId,
    /// Last applied show/hide state.
    pub visible: bool,
    /// Waiting for a content pass.
    pub dirty: bool,
}

/// Pooled, dirty-tracked overlay engine.
///
/// Owns the registry, the widget pool and both schedulers. Construct one
/// per host session and drive it from the tick thread.
pub struct OverlayEngine {
    config: OverlayConfig,
    pool: WidgetPool<WidgetId>,
    registry: DisplayRegistry,
    position: PositionScheduler,
    content: ContentRefresh,
    inbox: EventInbox,
    bus: ChangeBus,
    /// Reused drain buffer.
    events: Vec<HostEvent>,
    /// Appeared entities that could not get a widget yet.
    starved: Vec<EntityKey>,
    overlays_hidden: bool,
    /// Teleport override seen by the last tick.
    last_teleport_all: bool,
    stats: EngineStats,
}

impl OverlayEngine {
    /// Creates an engine. No widgets exist until [`Self::warm`] or the
    /// first appearance.
    ///
    /// # Errors
    ///
    /// [`OverlayError::InvalidConfig`] if the config fails validation.
    pub fn new(config: OverlayConfig) -> OverlayResult<Self> {
        config.validate()?;

        let inbox = EventInbox::new();
        let bus = ChangeBus::new(inbox.sender());
        let capacity = config.pool.max_capacity;

        tracing::info!(
            position_interval = config.general.position_interval,
            content_interval = config.general.content_interval,
            max_distance = config.general.max_distance,
            max_capacity = capacity,
            "overlay engine created"
        );

        Ok(Self {
            pool: WidgetPool::new(config.pool.to_pool_config()),
            registry: DisplayRegistry::with_capacity(capacity),
            position: PositionScheduler::new(&config.general),
            content: ContentRefresh::new(config.general.content_interval),
            inbox,
            bus,
            events: Vec::with_capacity(64),
            starved: Vec::new(),
            overlays_hidden: false,
            last_teleport_all: false,
            stats: EngineStats::default(),
            config,
        })
    }

    /// Pre-creates the pool's initial widgets. Returns how many were made.
    pub fn warm(&mut self, backend: &mut dyn WidgetBackend) -> usize {
        let created = self.pool.warm(backend);
        tracing::debug!(created, "widget pool warmed");
        created
    }

    /// Sender for events raised off the tick thread.
    #[must_use]
    pub fn inbox(&self) -> EventSender {
        self.inbox.sender()
    }

    /// Publisher for host attribute-mutation hooks.
    #[must_use]
    pub fn change_publisher(&self) -> ChangePublisher {
        self.bus.publisher()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Starts tracking an entity.
    ///
    /// Returns `Ok(false)` if it is already tracked. When no widget can be
    /// had, the entity is queued and retried every tick.
    ///
    /// # Errors
    ///
    /// [`OverlayError::PoolExhausted`] or
    /// [`OverlayError::MissingCollaborator`] when no widget is available.
    pub fn object_appeared(
        &mut self,
        entity: EntityKey,
        ctx: &FrameContext<'_>,
        backend: &mut dyn WidgetBackend,
    ) -> OverlayResult<bool> {
        match self.track(entity, ctx, backend) {
            Ok(created) => {
                self.starved.retain(|&k| k != entity);
                Ok(created)
            }
            Err(err) => {
                if !self.starved.contains(&entity) {
                    tracing::warn!(%entity, %err, "no widget for entity, retrying every tick");
                    self.starved.push(entity);
                    self.stats.starved += 1;
                }
                Err(err)
            }
        }
    }

    fn track(
        &mut self,
        entity: EntityKey,
        ctx: &FrameContext<'_>,
        backend: &mut dyn WidgetBackend,
    ) -> OverlayResult<bool> {
        if self.registry.contains(entity) {
            return Ok(false);
        }

        let widget = self.pool.acquire(backend)?;
        let mut record = DisplayRecord::new(entity, widget, self.bus.subscribe(entity));

        // Cold start: paint now. A miss leaves the record dirty for the
        // content pass.
        if let Some(item) = ctx.items.item(entity) {
            let paint = PaintContext {
                features: &self.config.features,
                palette: &self.config.palette,
                localizer: ctx.localizer,
                teleport_all: ctx.teleport_all,
            };
            record.paint(item, &paint, backend);
        }
        if ctx.teleport_all != self.last_teleport_all {
            record.mark_dirty();
        }

        if let Err(record) = self.registry.insert(record) {
            record.retire(&mut self.pool, backend)?;
            return Err(OverlayError::StateInconsistency(format!(
                "entity {entity} inserted twice"
            )));
        }

        self.stats.records_created += 1;
        tracing::debug!(%entity, widget = widget.raw(), "display record created");
        Ok(true)
    }

    /// Stops tracking an entity and returns its widget to the pool.
    ///
    /// Returns `Ok(false)` if the entity had no record.
    ///
    /// # Errors
    ///
    /// [`OverlayError::StateInconsistency`] if the pool did not own the
    /// record's widget.
    pub fn object_removed(
        &mut self,
        entity: EntityKey,
        backend: &mut dyn WidgetBackend,
    ) -> OverlayResult<bool> {
        self.starved.retain(|&k| k != entity);

        let Some(record) = self.registry.remove(entity) else {
            tracing::trace!(%entity, "removal for untracked entity ignored");
            return Ok(false);
        };
        record.retire(&mut self.pool, backend)?;

        self.stats.records_removed += 1;
        tracing::debug!(%entity, "display record removed");
        Ok(true)
    }

    /// Marks an entity's record dirty. Returns false if it has none.
    pub fn attribute_changed(&mut self, entity: EntityKey) -> bool {
        match self.registry.get_mut(entity) {
            Some(record) => {
                record.mark_dirty();
                self.stats.notifications += 1;
                true
            }
            None => {
                tracing::trace!(%entity, "change for untracked entity ignored");
                false
            }
        }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Applies one runtime config change.
    ///
    /// # Errors
    ///
    /// [`OverlayError::InvalidConfig`]; the old value is kept.
    pub fn apply_config(&mut self, change: ConfigChange) -> OverlayResult<()> {
        self.try_apply(change).map_err(|err| {
            tracing::warn!(?change, %err, "configuration change rejected");
            err
        })
    }

    fn try_apply(&mut self, change: ConfigChange) -> OverlayResult<()> {
        let general = &mut self.config.general;
        match change {
            ConfigChange::PositionInterval(secs) => {
                general.position_interval = positive("position_interval", secs)?;
            }
            ConfigChange::ContentInterval(secs) => {
                general.content_interval = positive("content_interval", secs)?;
                self.content.set_interval(secs);
                return Ok(());
            }
            ConfigChange::MaxDistance(distance) => {
                general.max_distance = positive("max_distance", distance)?;
            }
            ConfigChange::WorldOffset(offset) => {
                general.world_offset = finite_offset("world_offset", offset)?;
            }
            ConfigChange::SubtractCameraOffset(on) => {
                general.subtract_camera_offset = on;
            }
            ConfigChange::Feature(feature, on) => {
                if self.config.features.set(feature, on) {
                    self.registry.mark_all_dirty();
                }
                return Ok(());
            }
            ConfigChange::OverlaysHidden(hidden) => {
                self.set_overlays_hidden(hidden);
                return Ok(());
            }
        }
        self.position.configure(&self.config.general);
        Ok(())
    }

    /// Replaces the whole configuration (file reload).
    ///
    /// A `pool.max_capacity` below [`Self::owned_widgets`] takes effect
    /// gradually: existing records keep their widgets, new records are
    /// refused, and released widgets are destroyed until the pool is back
    /// under the new ceiling.
    ///
    /// # Errors
    ///
    /// [`OverlayError::InvalidConfig`]; nothing is changed.
    pub fn reload_config(
        &mut self,
        config: OverlayConfig,
        backend: &mut dyn WidgetBackend,
    ) -> OverlayResult<()> {
        if let Err(err) = config.validate() {
            tracing::warn!(%err, "configuration reload rejected");
            return Err(err);
        }
        if config == self.config {
            return Ok(());
        }

        if config.general != self.config.general {
            self.position.configure(&config.general);
            self.content.set_interval(config.general.content_interval);
        }
        if config.features != self.config.features || config.palette != self.config.palette {
            self.registry.mark_all_dirty();
        }
        if config.pool != self.config.pool {
            if config.pool.max_capacity < self.pool.owned_count() {
                tracing::warn!(
                    owned = self.pool.owned_count(),
                    max_capacity = config.pool.max_capacity,
                    "pool ceiling lowered below owned widgets; shrinking as records retire"
                );
            }
            self.pool.reconfigure(backend, config.pool.to_pool_config());
        }

        self.config = config;
        tracing::info!("configuration reloaded");
        Ok(())
    }

    /// Flips the global overlay toggle. Returns true if overlays are now
    /// hidden.
    pub fn toggle_overlays(&mut self) -> bool {
        self.set_overlays_hidden(!self.overlays_hidden);
        self.overlays_hidden
    }

    fn set_overlays_hidden(&mut self, hidden: bool) {
        if self.overlays_hidden != hidden {
            tracing::info!(hidden, "overlay toggle changed");
            self.overlays_hidden = hidden;
        }
    }

    // =========================================================================
    // Tick
    // =========================================================================

    /// Applies queued events and retries starved entities.
    pub fn process_events(&mut self, ctx: &FrameContext<'_>, backend: &mut dyn WidgetBackend) {
        let mut events = std::mem::take(&mut self.events);
        self.inbox.drain_into(&mut events);

        for event in events.drain(..) {
            match event {
                HostEvent::ObjectAppeared(entity) => {
                    if let Err(err) = self.object_appeared(entity, ctx, backend) {
                        tracing::trace!(%entity, %err, "appearance queued");
                    }
                }
                HostEvent::ObjectRemoved(entity) => {
                    if let Err(err) = self.object_removed(entity, backend) {
                        tracing::error!(%entity, %err, "failed to retire display record");
                    }
                }
                HostEvent::AttributeChanged(entity) => {
                    self.attribute_changed(entity);
                }
                HostEvent::ConfigChanged(change) => {
                    // rejected values are logged by apply_config
                    let _ = self.apply_config(change);
                }
            }
        }
        self.events = events;

        if self.starved.is_empty() {
            return;
        }
        let waiting = std::mem::take(&mut self.starved);
        for entity in waiting {
            match self.track(entity, ctx, backend) {
                Ok(_) => tracing::debug!(%entity, "starved entity got a widget"),
                Err(_) => self.starved.push(entity),
            }
        }
    }

    /// Advances the engine by one frame.
    ///
    /// Every pass that came due during `delta_secs` runs, all against the
    /// same `ctx`. After a long hitch that is many identical position
    /// passes, each writing every shown record's position again; content
    /// passes after the first find nothing dirty. Hosts that can stall for
    /// seconds should clamp `delta_secs` before calling.
    pub fn tick(
        &mut self,
        delta_secs: f32,
        ctx: &FrameContext<'_>,
        backend: &mut dyn WidgetBackend,
    ) -> TickReport {
        if ctx.teleport_all != self.last_teleport_all {
            self.registry.mark_all_dirty();
            self.last_teleport_all = ctx.teleport_all;
        }

        self.process_events(ctx, backend);

        let mut report = TickReport::default();

        let position_passes = self.position.due(delta_secs);
        for _ in 0..position_passes {
            report.position +=
                self.position
                    .run_pass(&mut self.registry, ctx, backend, self.overlays_hidden);
        }
        report.position_passes = position_passes;

        let content_passes = self.content.due(delta_secs);
        for _ in 0..content_passes {
            report.content += ContentRefresh::run_pass(
                &mut self.registry,
                ctx,
                &self.config.features,
                &self.config.palette,
                backend,
            );
        }
        report.content_passes = content_passes;

        self.stats.record_tick(&report);
        report
    }

    /// Releases every record and destroys every widget the pool holds.
    ///
    /// # Errors
    ///
    /// The first release failure; the remaining records are still retired.
    pub fn shutdown(&mut self, backend: &mut dyn WidgetBackend) -> OverlayResult<()> {
        let mut first_error = None;
        let mut retired = 0_u64;
        for record in self.registry.drain() {
            match record.retire(&mut self.pool, backend) {
                Ok(()) => retired += 1,
                Err(err) => {
                    first_error.get_or_insert(err);
                }
            }
        }
        self.stats.records_removed += retired;
        self.starved.clear();
        self.pool.drain_idle(backend);

        tracing::info!(retired, "overlay engine shut down");
        first_error.map_or(Ok(()), Err)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// State of an entity's record.
    ///
    /// # Errors
    ///
    /// [`OverlayError::UnknownEntity`] if the entity is not tracked.
    pub fn record_state(&self, entity: EntityKey) -> OverlayResult<RecordState> {
        self.registry
            .get(entity)
            .map(|record| RecordState {
                widget: record.widget(),
                visible: record.is_visible(),
                dirty: record.is_dirty(),
            })
            .ok_or(OverlayError::UnknownEntity(entity))
    }

    /// Whether an entity has a display record.
    #[must_use]
    pub fn is_tracked(&self, entity: EntityKey) -> bool {
        self.registry.contains(entity)
    }

    /// Whether an entity is waiting for a widget.
    #[must_use]
    pub fn is_starved(&self, entity: EntityKey) -> bool {
        self.starved.contains(&entity)
    }

    /// Tracked entities in iteration order.
    pub fn tracked(&self) -> impl Iterator<Item = EntityKey> + '_ {
        self.registry.iter().map(DisplayRecord::entity)
    }

    /// Live display records.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.registry.len()
    }

    /// Widgets currently owned by records.
    #[must_use]
    pub fn owned_widgets(&self) -> usize {
        self.pool.owned_count()
    }

    /// Widgets idle in the pool.
    #[must_use]
    pub fn idle_widgets(&self) -> usize {
        self.pool.idle_count()
    }

    /// Pool counters.
    #[must_use]
    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Engine counters.
    #[must_use]
    pub const fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &OverlayConfig {
        &self.config
    }

    /// Derived placement settings.
    #[must_use]
    pub fn position_settings(&self) -> PositionSettings {
        self.position.settings()
    }

    /// Whether the global toggle hides every overlay.
    #[must_use]
    pub const fn overlays_hidden(&self) -> bool {
        self.overlays_hidden
    }

    /// Events waiting in the inbox.
    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.inbox.pending()
    }
}
