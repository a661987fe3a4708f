mod class_processor;
mod stats;
pub mod filter;

// Re-export from submodules
pub use class_processor::ClassProcessor;
pub use filter::{FilterPolicy, RejectRule, TokenFilter, Verdict, REJECT_RULES};
