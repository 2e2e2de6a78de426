use crate::model::{DinerBill, Money, Payments};

/// Paid/remaining figures for a finalized bill.
///
/// `paid_amount` sums per-diner totals while the entry total is the bill-wide
/// figure, so `remaining_amount` carries the rounding drift between the two and
/// can end slightly below zero once everyone has paid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaymentSummary {
    pub paid_amount: Money,
    pub remaining_amount: Money,
    pub is_fully_paid: bool,
}

impl PaymentSummary {
    pub fn compute(entry_total: Money, diner_bills: &[DinerBill], payments: &Payments) -> Self {
        let paid_amount: Money = diner_bills
            .iter()
            .filter(|bill| payments.get(&bill.diner.id).copied().unwrap_or(false))
            .map(|bill| bill.total)
            .sum();
        let remaining_amount = entry_total - paid_amount;

        Self {
            paid_amount,
            remaining_amount,
            is_fully_paid: remaining_amount <= Money::zero(),
        }
    }
}
