//! # Display Registry
//!
//! Live display records keyed by entity, iterated in insertion order.
//!
//! Records sit in a dense vector so both passes walk contiguous memory; a
//! side index maps entities to slots. Removal keeps the order of the
//! remaining records.

use std::collections::HashMap;

use dropsight_shared::EntityKey;

use crate::record::DisplayRecord;

pub(crate) struct DisplayRegistry {
    records: Vec<DisplayRecord>,
    index: HashMap<EntityKey, usize>,
}

impl DisplayRegistry {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Appends a record.
    ///
    /// Returns the record back if its entity is already tracked.
    pub(crate) fn insert(&mut self, record: DisplayRecord) -> Result<(), DisplayRecord> {
        let entity = record.entity();
        if self.index.contains_key(&entity) {
            return Err(record);
        }
        self.index.insert(entity, self.records.len());
        self.records.push(record);
        Ok(())
    }

    pub(crate) fn remove(&mut self, entity: EntityKey) -> Option<DisplayRecord> {
        let slot = self.index.remove(&entity)?;
        let record = self.records.remove(slot);
        for moved in &self.records[slot..] {
            if let Some(i) = self.index.get_mut(&moved.entity()) {
                *i -= 1;
            }
        }
        Some(record)
    }

    pub(crate) fn contains(&self, entity: EntityKey) -> bool {
        self.index.contains_key(&entity)
    }

    pub(crate) fn get(&self, entity: EntityKey) -> Option<&DisplayRecord> {
        self.index.get(&entity).map(|&i| &self.records[i])
    }

    pub(crate) fn get_mut(&mut self, entity: EntityKey) -> Option<&mut DisplayRecord> {
        let i = *self.index.get(&entity)?;
        self.records.get_mut(i)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &DisplayRecord> {
        self.records.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut DisplayRecord> {
        self.records.iter_mut()
    }

    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }

    pub(crate) fn mark_all_dirty(&mut self) {
        for record in &mut self.records {
            record.mark_dirty();
        }
    }

    /// Removes every record, oldest first.
    pub(crate) fn drain(&mut self) -> std::vec::Drain<'_, DisplayRecord> {
        self.index.clear();
        self.records.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::{ChangeBus, EventInbox};
    use dropsight_ui::WidgetId;

    fn records(keys: &[u32]) -> (DisplayRegistry, ChangeBus, EventInbox) {
        let inbox = EventInbox::new();
        let bus = ChangeBus::new(inbox.sender());
        let mut registry = DisplayRegistry::with_capacity(8);
        for &k in keys {
            let key = EntityKey::new(k, 0);
            let record = DisplayRecord::new(key, WidgetId::new(u64::from(k)), bus.subscribe(key));
            assert!(registry.insert(record).is_ok());
        }
        (registry, bus, inbox)
    }

    fn order(registry: &DisplayRegistry) -> Vec<u32> {
        registry.iter().map(|r| r.entity().index()).collect()
    }

    #[test]
    fn test_insertion_order_survives_removal() {
        let (mut registry, _bus, _inbox) = records(&[1, 2, 3, 4]);
        assert!(registry.remove(EntityKey::new(2, 0)).is_some());

        assert_eq!(order(&registry), vec![1, 3, 4]);
        assert_eq!(
            registry.get(EntityKey::new(4, 0)).map(DisplayRecord::widget),
            Some(WidgetId::new(4))
        );
        assert!(registry.get_mut(EntityKey::new(3, 0)).is_some());
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let (mut registry, bus, _inbox) = records(&[7]);
        let key = EntityKey::new(7, 0);
        let duplicate = DisplayRecord::new(key, WidgetId::new(99), bus.subscribe(key));

        assert!(registry.insert(duplicate).is_err());
        assert_eq!(registry.len(), 1);
        assert!(registry.contains(key));
    }

    #[test]
    fn test_remove_unknown_is_none() {
        let (mut registry, _bus, _inbox) = records(&[1]);
        assert!(registry.remove(EntityKey::new(1, 1)).is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_mark_all_dirty_and_drain() {
        let (mut registry, bus, _inbox) = records(&[1, 2]);
        assert!(registry.iter().all(DisplayRecord::is_dirty));
        registry.mark_all_dirty();

        let drained: Vec<_> = registry.drain().map(|r| r.entity().index()).collect();
        assert_eq!(drained, vec![1, 2]);
        assert_eq!(registry.len(), 0);
        assert_eq!(bus.subscriber_count(), 0);
    }
}
