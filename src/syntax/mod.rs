// Text-level analysis: cursor context heuristics and template placeholders
pub mod context;
pub mod template;

pub use context::{Context, Pattern, detect_pattern, parse_context};
pub use template::{TabStop, expand_template, parse_tab_stops};
