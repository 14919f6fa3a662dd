// Event pattern analysis
//
// Derives a PatternSummary from a batch of event records.

mod analyzer;
mod summary;

pub use analyzer::{analyze_patterns, PatternAnalyzer};
pub use summary::{keys, BusiestDay, BusiestHour, DominantEventType, PatternSummary};
