use std::fmt::Write as _;

use divicuenta_domain::{Allocation, HistoryEntry, PaymentSummary};
use divicuenta_i18n as i18n;

use crate::currency::{format_currency, format_short_date};

pub struct HistoryPresenter;

/// Dashboard line for one finalized bill.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryRow {
    pub id: String,
    pub restaurant: String,
    pub date: String,
    pub total: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DinerPaymentRow {
    pub diner_id: String,
    pub name: String,
    pub total: String,
    pub paid: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryDetailView {
    pub restaurant: String,
    pub date: String,
    pub total: String,
    pub paid_amount: String,
    pub remaining_amount: String,
    pub is_fully_paid: bool,
    pub diners: Vec<DinerPaymentRow>,
}

impl HistoryPresenter {
    pub fn rows(entries: &[HistoryEntry]) -> Vec<HistoryRow> {
        entries
            .iter()
            .map(|entry| HistoryRow {
                id: entry.id.to_string(),
                restaurant: entry.restaurant.clone(),
                date: format_short_date(entry.date),
                total: format_currency(entry.total),
            })
            .collect()
    }

    pub fn render_dashboard(entries: &[HistoryEntry]) -> String {
        let mut out = format!("{}\n", i18n::BILL_HISTORY);
        if entries.is_empty() {
            out.push_str(i18n::EMPTY_HISTORY);
            return out;
        }

        let rows = Self::rows(entries);
        let name_width = rows
            .iter()
            .map(|row| row.restaurant.chars().count())
            .max()
            .unwrap_or(0);
        for row in rows {
            let pad = name_width - row.restaurant.chars().count();
            let _ = writeln!(
                out,
                "{}  {}{}  {}  {}",
                row.id,
                row.restaurant,
                " ".repeat(pad),
                row.date,
                row.total
            );
        }
        out.truncate(out.trim_end().len());
        out
    }

    /// Detail of a finalized bill. `allocation` and `summary` must come from
    /// the same entry.
    pub fn detail(
        entry: &HistoryEntry,
        allocation: &Allocation,
        summary: &PaymentSummary,
    ) -> HistoryDetailView {
        let diners = allocation
            .diner_bills
            .iter()
            .map(|bill| DinerPaymentRow {
                diner_id: bill.diner.id.to_string(),
                name: bill.diner.name.clone(),
                total: format_currency(bill.total),
                paid: entry.is_paid(&bill.diner.id),
            })
            .collect();

        HistoryDetailView {
            restaurant: entry.restaurant.clone(),
            date: format_short_date(entry.date),
            total: format_currency(entry.total),
            paid_amount: format_currency(summary.paid_amount),
            remaining_amount: format_currency(summary.remaining_amount),
            is_fully_paid: summary.is_fully_paid,
            diners,
        }
    }
}

impl HistoryDetailView {
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} ({})", self.restaurant, self.date);
        let _ = writeln!(out, "{}: {}", i18n::BILL_TOTAL, self.total);
        let _ = writeln!(out, "{}: {}", i18n::PAID_AMOUNT, self.paid_amount);
        let _ = writeln!(out, "{}: {}", i18n::REMAINING_AMOUNT, self.remaining_amount);
        if self.is_fully_paid {
            let _ = writeln!(out, "{}", i18n::FULLY_PAID);
        }
        let _ = write!(out, "\n{}", i18n::DINER_PAYMENTS);
        for diner in &self.diners {
            let status = if diner.paid { i18n::PAID } else { i18n::PENDING };
            let _ = write!(
                out,
                "\n[{}] {} ({}) {} - {status}",
                if diner.paid { 'x' } else { ' ' },
                diner.name,
                diner.diner_id,
                diner.total
            );
        }
        out
    }
}
