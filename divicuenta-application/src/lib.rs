#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod identity;
pub mod ledger;
pub mod ports;
pub mod receipt;
pub mod session;
pub mod storage;

pub use error::{AuthError, DinerValidationError, ReceiptOcrError, ReceiptScanError, StoreError};
pub use identity::{IdentityProvider, Registration, UserProfile, guest_payer};
pub use ledger::{BillSnapshot, HistoryLedger, PaymentUpdate};
pub use ports::{Clock, IdGenerator, KeyValueStore, ReceiptOcr};
pub use receipt::{
    CaptureResult, ReceiptImage, ReceiptScanner, ScanGuard, ScanOutcome, ScannedItem,
    sanitize_scanned_items,
};
pub use session::{BillSession, NewDiner, parse_price_input};
