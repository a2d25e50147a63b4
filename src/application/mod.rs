//! Application layer - Use cases and orchestration

pub mod analyze_log;

pub use analyze_log::{AnalyzeLogService, AnalyzeOptions, AnalyzeReport};
