pub mod bill_allocator;
pub mod payment_summary;
pub mod share;

pub use bill_allocator::{Allocation, BillAllocator};
pub use payment_summary::PaymentSummary;
pub use share::{Share, TipPolicy};
