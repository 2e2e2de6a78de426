use divicuenta_domain::{
    Allocation, Assignment, BillAllocator, Diner, DinerId, HistoryEntry, HistoryId, Item, Money,
    PaymentSummary, Payments,
};

use crate::{
    error::StoreError,
    ports::{Clock, IdGenerator, KeyValueStore},
    storage::{HISTORY_KEY, load_json, save_json},
};

/// Owned copy of a finalized bill, detached from the live session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BillSnapshot {
    pub restaurant: String,
    pub total: Money,
    pub items: Vec<Item>,
    pub diners: Vec<Diner>,
    pub assignments: Assignment,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentUpdate {
    Applied,
    UnknownEntry,
    UnknownDiner,
}

/// Finalized bills, most recent first, persisted under one key.
///
/// Every mutation re-reads the stored collection, changes it and writes the
/// whole collection back. `&mut self` keeps writers sequential.
pub struct HistoryLedger<'a> {
    store: &'a dyn KeyValueStore,
    clock: &'a dyn Clock,
    ids: &'a dyn IdGenerator,
    allocator: BillAllocator,
    entries: Vec<HistoryEntry>,
}

impl<'a> HistoryLedger<'a> {
    pub fn open(
        store: &'a dyn KeyValueStore,
        clock: &'a dyn Clock,
        ids: &'a dyn IdGenerator,
    ) -> Result<Self, StoreError> {
        let entries = load_history(store)?;
        tracing::debug!(entry_count = entries.len(), "history loaded");
        Ok(Self {
            store,
            clock,
            ids,
            allocator: BillAllocator::default(),
            entries,
        })
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn find(&self, id: &HistoryId) -> Option<&HistoryEntry> {
        self.entries.iter().find(|entry| &entry.id == id)
    }

    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.entries = load_history(self.store)?;
        Ok(())
    }

    /// Records a finalized bill with every diner marked unpaid.
    pub fn add_entry(&mut self, snapshot: BillSnapshot) -> Result<&HistoryEntry, StoreError> {
        let BillSnapshot {
            restaurant,
            total,
            items,
            diners,
            assignments,
        } = snapshot;
        let payments: Payments = diners
            .iter()
            .map(|diner| (diner.id.clone(), false))
            .collect();
        let entry = HistoryEntry {
            id: HistoryId::new(self.ids.next_id("hist")),
            date: self.clock.now(),
            restaurant,
            total,
            items,
            diners,
            assignments,
            payments,
        };

        let mut history = load_history(self.store)?;
        history.insert(0, entry);
        save_json(self.store, HISTORY_KEY, &history)?;
        self.entries = history;

        let entry = &self.entries[0];
        tracing::info!(
            entry_id = %entry.id,
            restaurant = %entry.restaurant,
            total = entry.total.amount(),
            diner_count = entry.diners.len(),
            "history entry added"
        );
        Ok(entry)
    }

    /// Sets one diner's paid flag. Unknown entries or diners leave history
    /// untouched and are reported through [`PaymentUpdate`].
    pub fn set_payment_status(
        &mut self,
        entry_id: &HistoryId,
        diner_id: &DinerId,
        paid: bool,
    ) -> Result<PaymentUpdate, StoreError> {
        let mut history = load_history(self.store)?;

        let Some(entry) = history.iter_mut().find(|entry| &entry.id == entry_id) else {
            tracing::debug!(entry_id = %entry_id, "payment update for unknown entry ignored");
            self.entries = history;
            return Ok(PaymentUpdate::UnknownEntry);
        };
        if !entry.set_paid(diner_id, paid) {
            tracing::debug!(
                entry_id = %entry_id,
                diner_id = %diner_id,
                "payment update for unknown diner ignored"
            );
            self.entries = history;
            return Ok(PaymentUpdate::UnknownDiner);
        }

        save_json(self.store, HISTORY_KEY, &history)?;
        self.entries = history;
        tracing::info!(entry_id = %entry_id, diner_id = %diner_id, paid, "payment status updated");
        Ok(PaymentUpdate::Applied)
    }

    /// Diner bills recomputed from the frozen snapshot.
    pub fn allocation(&self, id: &HistoryId) -> Option<Allocation> {
        self.find(id).map(|entry| {
            self.allocator
                .allocate(&entry.diners, &entry.items, &entry.assignments)
        })
    }

    pub fn summary(&self, id: &HistoryId) -> Option<PaymentSummary> {
        let entry = self.find(id)?;
        let allocation = self
            .allocator
            .allocate(&entry.diners, &entry.items, &entry.assignments);
        Some(PaymentSummary::compute(
            entry.total,
            &allocation.diner_bills,
            &entry.payments,
        ))
    }
}

fn load_history(store: &dyn KeyValueStore) -> Result<Vec<HistoryEntry>, StoreError> {
    Ok(load_json(store, HISTORY_KEY)?.unwrap_or_default())
}
