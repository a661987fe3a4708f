pub mod types;
pub mod storage;
pub mod operations;

// Re-export main types and functions for easier access
pub use types::{SafelistDocument, SafelistReport, SafelistStats};
pub use operations::{SafelistOperations, GenerateOutcome, CheckOutcome, generate, check, top_classes};
pub use storage::SafelistStorage;
