#![warn(clippy::uninlined_format_args)]

pub mod model;
pub mod services;

pub use model::{
    Assignment, BillLine, BillTotal, Diner, DinerBill, DinerId, HistoryEntry, HistoryId, Item,
    ItemId, Money, PayerInfo, Payments,
};
pub use services::{Allocation, BillAllocator, PaymentSummary, Share, TipPolicy};
