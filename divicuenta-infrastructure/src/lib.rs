#![warn(clippy::uninlined_format_args)]

pub mod gemini;
pub mod store;
pub mod system;

pub use gemini::{GeminiConfig, GeminiReceiptOcr};
pub use store::{JsonFileStore, MemoryStore};
pub use system::{SystemClock, UuidIdGenerator};
