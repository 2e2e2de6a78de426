#![warn(clippy::uninlined_format_args)]

pub mod currency;
pub mod error_presenter;
pub mod history_presenter;
pub mod message;

pub use currency::{format_currency, format_short_date};
pub use error_presenter::{
    format_auth_error, format_diner_error, format_scan_error, format_store_error,
};
pub use history_presenter::{DinerPaymentRow, HistoryDetailView, HistoryPresenter, HistoryRow};
pub use message::{BillMessage, EMAIL_SUBJECT, whatsapp_number};
