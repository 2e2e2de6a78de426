use crate::{
    model::{Assignment, BillLine, BillTotal, Diner, DinerBill, DinerId, Item, ItemId, Money},
    services::{Share, TipPolicy},
};
use fxhash::FxHashMap;

/// Per-diner bills plus the bill-wide total, computed from one snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Allocation {
    pub diner_bills: Vec<DinerBill>,
    pub bill_total: BillTotal,
}

impl Allocation {
    pub fn bill_for(&self, diner: &DinerId) -> Option<&DinerBill> {
        self.diner_bills.iter().find(|bill| &bill.diner.id == diner)
    }

    /// Sum of every diner's rounded total. Not expected to match
    /// `bill_total.total`; per-diner rounding makes them drift apart.
    pub fn sum_of_diner_totals(&self) -> Money {
        self.diner_bills.iter().map(|bill| bill.total).sum()
    }
}

/// Splits shared item costs across diners.
///
/// Pure: the same diners, items and assignment always produce the same
/// allocation, whether they come from the live session or a history entry.
///
/// Rounding rule: each diner accumulates exact `price / count` shares, the sum
/// is ceiled once to a whole unit, and the tip is ceiled from that rounded
/// subtotal. Line amounts shown to the user are ceiled independently.
#[derive(Clone, Copy, Debug, Default)]
pub struct BillAllocator {
    tip_policy: TipPolicy,
}

impl BillAllocator {
    pub fn allocate(&self, diners: &[Diner], items: &[Item], assignment: &Assignment) -> Allocation {
        let lookup = item_lookup(items);
        let diner_bills: Vec<DinerBill> = diners
            .iter()
            .map(|diner| self.bill_with_lookup(diner, &lookup, assignment))
            .collect();
        let bill_total = self.bill_total(items);

        tracing::debug!(
            diner_count = diners.len(),
            item_count = items.len(),
            assigned_item_count = assignment.len(),
            bill_total = bill_total.total.amount(),
            "bill allocated"
        );

        Allocation {
            diner_bills,
            bill_total,
        }
    }

    pub fn bill_for_diner(&self, diner: &Diner, items: &[Item], assignment: &Assignment) -> DinerBill {
        self.bill_with_lookup(diner, &item_lookup(items), assignment)
    }

    /// Undivided item prices plus tip on their raw sum.
    pub fn bill_total(&self, items: &[Item]) -> BillTotal {
        let subtotal: Money = items.iter().map(|item| item.price).sum();
        let tip = self.tip_policy.tip_for(subtotal);
        BillTotal {
            subtotal,
            tip,
            total: subtotal + tip,
        }
    }

    fn bill_with_lookup(
        &self,
        diner: &Diner,
        lookup: &FxHashMap<&ItemId, &Item>,
        assignment: &Assignment,
    ) -> DinerBill {
        let mut lines = Vec::new();
        let mut exact_subtotal = Share::zero();

        for (item_id, diner_ids) in assignment.iter() {
            if !diner_ids.contains(&diner.id) {
                continue;
            }
            let Some(item) = lookup.get(item_id) else {
                tracing::trace!(item_id = %item_id, "skipping assignment for missing item");
                continue;
            };

            // Non-empty: it contains this diner.
            let shared_with = diner_ids.len();
            let share = Share::of(item.price, shared_with);
            exact_subtotal += share;
            lines.push(BillLine {
                item_id: item.id.clone(),
                item_name: item.name.clone(),
                share,
                shared_with,
            });
        }

        let subtotal = exact_subtotal.ceil();
        let tip = self.tip_policy.tip_for(subtotal);

        DinerBill {
            diner: diner.clone(),
            lines,
            exact_subtotal,
            subtotal,
            tip,
            total: subtotal + tip,
        }
    }
}

fn item_lookup(items: &[Item]) -> FxHashMap<&ItemId, &Item> {
    items.iter().map(|item| (&item.id, item)).collect()
}
