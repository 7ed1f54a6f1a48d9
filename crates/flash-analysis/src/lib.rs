//! KPI aggregation and theme extraction for Flash Narrative.
//!
//! Every function here is a pure, single pass over the in-memory mention
//! list: the window filter, the KPI rollup, frequency-based keyword
//! extraction, and the threshold-driven recommendation lines.

mod keywords;
mod kpis;
mod recommendations;

pub use keywords::extract_keywords;
pub use kpis::{compute_kpis, KpiReport, SovEntry};
pub use recommendations::recommendations;

/// Default number of keywords/phrases reported.
pub const DEFAULT_TOP_KEYWORDS: usize = 10;
