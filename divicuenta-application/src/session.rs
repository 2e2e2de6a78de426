use std::sync::LazyLock;

use divicuenta_domain::{Allocation, Assignment, BillAllocator, Diner, DinerId, Item, ItemId, Money};
use divicuenta_i18n as i18n;
use regex::Regex;

use crate::{
    error::DinerValidationError,
    ledger::BillSnapshot,
    ports::IdGenerator,
    receipt::ScannedItem,
};

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Raw diner form input.
#[derive(Clone, Copy, Debug, Default)]
pub struct NewDiner<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
}

impl NewDiner<'_> {
    fn validate(&self) -> Result<(), DinerValidationError> {
        if self.name.trim().is_empty() {
            return Err(DinerValidationError::MissingName);
        }
        let email = self.email.trim();
        if email.is_empty() && self.phone.trim().is_empty() {
            return Err(DinerValidationError::MissingContact);
        }
        if !email.is_empty() && !EMAIL_PATTERN.is_match(email) {
            return Err(DinerValidationError::InvalidEmail);
        }
        Ok(())
    }
}

/// The bill currently being edited: items, diners and who shares what.
///
/// Owned by one editing flow and replaced wholesale by [`BillSession::reset`]
/// when a new bill starts.
pub struct BillSession<'a> {
    ids: &'a dyn IdGenerator,
    allocator: BillAllocator,
    restaurant: String,
    items: Vec<Item>,
    diners: Vec<Diner>,
    assignment: Assignment,
}

impl<'a> BillSession<'a> {
    pub fn new(ids: &'a dyn IdGenerator) -> Self {
        Self {
            ids,
            allocator: BillAllocator::default(),
            restaurant: String::new(),
            items: Vec::new(),
            diners: Vec::new(),
            assignment: Assignment::new(),
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn diners(&self) -> &[Diner] {
        &self.diners
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn restaurant(&self) -> &str {
        &self.restaurant
    }

    pub fn set_restaurant(&mut self, restaurant: impl Into<String>) {
        self.restaurant = restaurant.into();
    }

    /// Restaurant name to record, falling back to a generic label.
    pub fn restaurant_or_default(&self) -> &str {
        let name = self.restaurant.trim();
        if name.is_empty() {
            i18n::UNNAMED_BILL
        } else {
            name
        }
    }

    pub fn add_item(&mut self, name: impl Into<String>, price: Money) -> &Item {
        let item = Item {
            id: ItemId::new(self.ids.next_id("item")),
            name: name.into(),
            price,
        };
        self.items.push(item);
        &self.items[self.items.len() - 1]
    }

    /// Blank line the user fills in afterwards.
    pub fn add_placeholder_item(&mut self) -> &Item {
        self.add_item(i18n::PLACEHOLDER_ITEM, Money::zero())
    }

    /// Replaces every item with freshly scanned ones. Existing assignments
    /// refer to the old ids and are dropped.
    pub fn replace_items(&mut self, scanned: Vec<ScannedItem>) {
        self.items.clear();
        self.assignment = Assignment::new();
        for ScannedItem { name, price } in scanned {
            self.add_item(name, price);
        }
    }

    pub fn rename_item(&mut self, id: &ItemId, name: impl Into<String>) -> bool {
        match self.item_mut(id) {
            Some(item) => {
                item.name = name.into();
                true
            }
            None => false,
        }
    }

    pub fn set_item_price(&mut self, id: &ItemId, price: Money) -> bool {
        match self.item_mut(id) {
            Some(item) => {
                item.price = price;
                true
            }
            None => false,
        }
    }

    /// Applies free-form price input, keeping only its digits.
    pub fn set_item_price_from_input(&mut self, id: &ItemId, input: &str) -> bool {
        self.set_item_price(id, parse_price_input(input))
    }

    /// Removes the item together with its assignment entry.
    pub fn delete_item(&mut self, id: &ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        let removed_assignment = self.assignment.remove_item(id).is_some();
        let removed = self.items.len() != before;
        if removed || removed_assignment {
            tracing::debug!(item_id = %id, "item deleted");
        }
        removed
    }

    pub fn add_diner(&mut self, input: NewDiner<'_>) -> Result<&Diner, DinerValidationError> {
        input.validate()?;

        let diner = Diner {
            id: DinerId::new(self.ids.next_id("diner")),
            name: input.name.trim().to_string(),
            email: non_empty(input.email),
            phone: non_empty(input.phone),
        };
        self.diners.push(diner);
        Ok(&self.diners[self.diners.len() - 1])
    }

    /// Flips whether `diner` shares `item`. Returns the new membership.
    pub fn toggle(&mut self, item: &ItemId, diner: &DinerId) -> bool {
        self.assignment.toggle(item, diner)
    }

    pub fn diners_for_item(&self, item: &ItemId) -> Vec<&Diner> {
        let Some(ids) = self.assignment.diners_for(item) else {
            return Vec::new();
        };
        self.diners
            .iter()
            .filter(|diner| ids.contains(&diner.id))
            .collect()
    }

    pub fn has_assignments(&self) -> bool {
        self.assignment.has_assignments()
    }

    /// Both items and diners are needed before the bill can be confirmed.
    pub fn can_confirm(&self) -> bool {
        !self.items.is_empty() && !self.diners.is_empty()
    }

    pub fn allocate(&self) -> Allocation {
        self.allocator
            .allocate(&self.diners, &self.items, &self.assignment)
    }

    /// Deep copy of the current bill for the history ledger.
    pub fn snapshot(&self) -> BillSnapshot {
        let mut assignments = self.assignment.clone();
        assignments.prune_items(self.items.iter().map(|item| &item.id));

        BillSnapshot {
            restaurant: self.restaurant_or_default().to_string(),
            total: self.allocator.bill_total(&self.items).total,
            items: self.items.clone(),
            diners: self.diners.clone(),
            assignments,
        }
    }

    pub fn reset(&mut self) {
        self.restaurant.clear();
        self.items.clear();
        self.diners.clear();
        self.assignment = Assignment::new();
    }

    fn item_mut(&mut self, id: &ItemId) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| &item.id == id)
    }
}

/// Reads a price typed by the user: every non-digit (thousand separators,
/// currency signs) is dropped and an empty result means zero. Amounts above
/// [`Money::MAX_PRICE`] are capped.
pub fn parse_price_input(input: &str) -> Money {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Money::zero();
    }
    digits
        .parse::<i64>()
        .map_or(Money::MAX_PRICE, Money::from_i64)
        .clamp_price()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
