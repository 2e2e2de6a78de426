use std::{
    fmt,
    iter::Sum,
    ops::{Add, Sub},
};

use chrono::{DateTime, Utc};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::services::Share;

/// Amount in the smallest currency unit (CLP has no fractional sub-units).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Largest price accepted for a single item.
    pub const MAX_PRICE: Self = Self(999_999_999_999);

    pub const fn zero() -> Self {
        Self(0)
    }

    pub const fn from_i64(value: i64) -> Self {
        Self(value)
    }

    pub const fn amount(self) -> i64 {
        self.0
    }

    /// Clamps into `0..=MAX_PRICE`.
    pub fn clamp_price(self) -> Self {
        self.clamp(Self::zero(), Self::MAX_PRICE)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

string_id!(
    /// Receipt line identifier.
    ItemId
);
string_id!(DinerId);
string_id!(HistoryId);

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub price: Money,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diner {
    pub id: DinerId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Diner {
    /// First word of the display name, used when greeting the diner.
    pub fn first_name(&self) -> &str {
        self.name.split(' ').next().unwrap_or_default()
    }
}

/// Bank-transfer target shown on every diner's bill.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayerInfo {
    pub name: String,
    pub rut: String,
    pub bank: String,
    pub account_type: String,
    pub account_number: String,
}

/// Item id → diners sharing that item.
///
/// Both levels keep insertion order: a diner's bill lists items in the order
/// they were first assigned.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Assignment {
    entries: IndexMap<ItemId, IndexSet<DinerId>>,
}

impl Assignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `diner` for `item`. Returns whether the diner is
    /// assigned afterwards.
    pub fn toggle(&mut self, item: &ItemId, diner: &DinerId) -> bool {
        let diners = self.entries.entry(item.clone()).or_default();
        if diners.shift_remove(diner) {
            false
        } else {
            diners.insert(diner.clone());
            true
        }
    }

    pub fn remove_item(&mut self, item: &ItemId) -> Option<IndexSet<DinerId>> {
        self.entries.shift_remove(item)
    }

    pub fn diners_for(&self, item: &ItemId) -> Option<&IndexSet<DinerId>> {
        self.entries.get(item)
    }

    pub fn is_assigned(&self, item: &ItemId, diner: &DinerId) -> bool {
        self.entries
            .get(item)
            .is_some_and(|diners| diners.contains(diner))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, &IndexSet<DinerId>)> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when at least one item is shared by at least one diner.
    pub fn has_assignments(&self) -> bool {
        self.entries.values().any(|diners| !diners.is_empty())
    }

    /// Drops keys whose item no longer exists.
    pub fn prune_items<'a, I>(&mut self, existing: I)
    where
        I: IntoIterator<Item = &'a ItemId>,
    {
        let existing: IndexSet<&ItemId> = existing.into_iter().collect();
        self.entries.retain(|item, _| existing.contains(item));
    }
}

impl FromIterator<(ItemId, IndexSet<DinerId>)> for Assignment {
    fn from_iter<T: IntoIterator<Item = (ItemId, IndexSet<DinerId>)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// One line of a diner's bill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BillLine {
    pub item_id: ItemId,
    pub item_name: String,
    /// Exact per-person portion of the item price.
    pub share: Share,
    pub shared_with: usize,
}

impl BillLine {
    /// Amount shown for this line. Rounded on its own and never fed back into
    /// the subtotal.
    pub fn display_amount(&self) -> Money {
        self.share.ceil()
    }

    pub fn is_shared(&self) -> bool {
        self.shared_with > 1
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DinerBill {
    pub diner: Diner,
    pub lines: Vec<BillLine>,
    /// Sum of the exact line shares before rounding.
    pub exact_subtotal: Share,
    pub subtotal: Money,
    pub tip: Money,
    pub total: Money,
}

/// Bill-wide figures computed from undivided item prices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BillTotal {
    pub subtotal: Money,
    pub tip: Money,
    pub total: Money,
}

/// Diner id → paid flag.
pub type Payments = IndexMap<DinerId, bool>;

/// Frozen copy of a finalized bill. Only `payments` changes after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: HistoryId,
    pub date: DateTime<Utc>,
    pub restaurant: String,
    pub total: Money,
    pub items: Vec<Item>,
    pub diners: Vec<Diner>,
    pub assignments: Assignment,
    #[serde(default)]
    pub payments: Payments,
}

impl HistoryEntry {
    pub fn diner(&self, id: &DinerId) -> Option<&Diner> {
        self.diners.iter().find(|diner| &diner.id == id)
    }

    pub fn is_paid(&self, diner: &DinerId) -> bool {
        self.payments.get(diner).copied().unwrap_or(false)
    }

    /// Updates the paid flag of a diner present in the snapshot. Returns
    /// `false` and leaves the map untouched for unknown diners.
    pub fn set_paid(&mut self, diner: &DinerId, paid: bool) -> bool {
        if self.diner(diner).is_none() {
            return false;
        }
        self.payments.insert(diner.clone(), paid);
        true
    }
}
