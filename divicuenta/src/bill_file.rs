//! JSON bill files for the command line. Items and diners are referenced by
//! name, so names must be unique within a file.

use std::borrow::Cow;

use divicuenta_application::{BillSession, NewDiner};
use divicuenta_domain::{DinerId, Item, ItemId, Money};
use divicuenta_presentation::format_diner_error;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

type FileResult<T> = Result<T, Cow<'static, str>>;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BillFile {
    #[serde(default)]
    pub restaurant: String,
    pub items: Vec<BillFileItem>,
    #[serde(default)]
    pub diners: Vec<BillFileDiner>,
    /// Item name → names of the diners sharing it.
    #[serde(default)]
    pub assignments: IndexMap<String, Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BillFileItem {
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BillFileDiner {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

impl BillFile {
    pub fn from_json(source: &str) -> FileResult<Self> {
        serde_json::from_str(source).map_err(|err| format!("Invalid bill file: {err}").into())
    }

    /// Skeleton holding freshly scanned items, ready for diners and
    /// assignments to be filled in.
    pub fn from_items(restaurant: &str, items: &[Item]) -> Self {
        Self {
            restaurant: restaurant.to_string(),
            items: items
                .iter()
                .map(|item| BillFileItem {
                    name: item.name.clone(),
                    price: item.price.amount(),
                })
                .collect(),
            diners: Vec::new(),
            assignments: IndexMap::new(),
        }
    }

    pub fn load_into(&self, session: &mut BillSession<'_>) -> FileResult<()> {
        session.set_restaurant(self.restaurant.trim());

        let mut items: IndexMap<&str, ItemId> = IndexMap::new();
        for item in &self.items {
            if item.price < 0 {
                return Err(format!("Item '{}' has a negative price", item.name).into());
            }
            if item.price > Money::MAX_PRICE.amount() {
                return Err(format!(
                    "Item '{}' costs more than {}",
                    item.name,
                    Money::MAX_PRICE
                )
                .into());
            }
            if items.contains_key(item.name.as_str()) {
                return Err(format!("Item '{}' is listed twice", item.name).into());
            }
            let id = session
                .add_item(item.name.clone(), Money::from_i64(item.price))
                .id
                .clone();
            items.insert(item.name.as_str(), id);
        }

        let mut diners: IndexMap<&str, DinerId> = IndexMap::new();
        for diner in &self.diners {
            let name = diner.name.trim();
            if diners.contains_key(name) {
                return Err(format!("Diner '{name}' is listed twice").into());
            }
            let id = session
                .add_diner(NewDiner {
                    name,
                    email: &diner.email,
                    phone: &diner.phone,
                })
                .map_err(|err| format!("Diner '{name}': {}", format_diner_error(err)))?
                .id
                .clone();
            diners.insert(name, id);
        }

        for (item_name, diner_names) in &self.assignments {
            let item = items
                .get(item_name.as_str())
                .ok_or_else(|| format!("Assignment refers to unknown item '{item_name}'"))?;
            for diner_name in diner_names {
                let diner = diners
                    .get(diner_name.trim())
                    .ok_or_else(|| format!("Assignment refers to unknown diner '{diner_name}'"))?;
                if !session.assignment().is_assigned(item, diner) {
                    session.toggle(item, diner);
                }
            }
        }

        tracing::debug!(
            item_count = items.len(),
            diner_count = diners.len(),
            "bill file loaded"
        );
        Ok(())
    }
}
