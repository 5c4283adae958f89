//! Multi-factor snippet scoring.
//!
//! A snippet's total score blends three signals:
//!
//! ```text
//! total = 0.5 * context (0..=50) + 0.3 * min(3 * uses, 50) + 0.2 * prefix (0..=10)
//! ```
//!
//! The context score picks exactly one pattern branch (see
//! [`detect_pattern`]) and then adds structural bonuses that apply
//! regardless of the branch.

use std::cmp::Ordering;

use crate::snippet::{Snippet, UsageStats, names};
use crate::syntax::{Context, Pattern, detect_pattern};

/// Upper bound for [`score_context_match`].
pub const MAX_CONTEXT_SCORE: u32 = 50;
/// Upper bound for the usage component before weighting.
pub const MAX_USAGE_SCORE: u32 = 50;

const CONTEXT_WEIGHT: f64 = 0.5;
const USAGE_WEIGHT: f64 = 0.3;
const PREFIX_WEIGHT: f64 = 0.2;

/// Snippets that start a statement and get a bonus at the start of a line.
const STATEMENT_SNIPPETS: &[&str] = &[
    "if",
    "ifelse",
    names::FOR,
    names::FOR_PAIRS,
    names::FOR_IPAIRS,
    "while",
    "repeat",
    names::LOCAL,
    names::FUNCTION,
    "pcall",
    "print",
];

/// Tags that get a bonus inside a function body.
const FUNCTION_BODY_TAGS: &[&str] = &["conditional", "loop", "pcall"];

/// A snippet paired with its score for one ranking call.
#[derive(Clone, Copy, Debug)]
pub struct ScoredSnippet<'a> {
    pub snippet: &'a Snippet,
    pub score: f64,
}

/// How well a snippet fits the cursor context, in `0..=50`.
pub fn score_context_match(snippet: &Snippet, context: &Context) -> u32 {
    let name = snippet.name();

    if context.is_empty {
        return match name {
            names::MODULE => 40,
            names::SERVICE | names::FUNCTION => 20,
            _ => 0,
        };
    }

    let tag_bonus = |tags: &[&str], per_tag: u32| -> u32 {
        tags.iter().filter(|t| snippet.has_tag(t)).count() as u32 * per_tag
    };

    let mut score = match detect_pattern(context) {
        Some(Pattern::ServiceAccess) => {
            let named = if name == names::SERVICE { 50 } else { 0 };
            named + tag_bonus(&["service"], 30)
        }
        Some(Pattern::EventConnection) => {
            let named = if name == names::FUNCTION { 40 } else { 0 };
            named + tag_bonus(&["function", "callback"], 30)
        }
        Some(Pattern::VariableDeclaration) => {
            let named = match name {
                names::LOCAL => 35,
                names::SERVICE => 30,
                names::INSTANCE => 25,
                _ => 0,
            };
            named + tag_bonus(&["variable", "declaration"], 20)
        }
        Some(Pattern::InstanceCreation) => {
            let named = if name == names::INSTANCE { 40 } else { 0 };
            named + tag_bonus(&["instance", "creation"], 25)
        }
        Some(Pattern::EventHandler) => match name {
            names::CONNECT | names::TOUCHED => 40,
            _ => 0,
        },
        Some(Pattern::NumericLoop) => {
            let named = match name {
                names::FOR | names::FOR_PAIRS | names::FOR_IPAIRS => 35,
                _ => 0,
            };
            named + tag_bonus(&["loop"], 25)
        }
        // Handled above; detect_pattern only reports it for empty contexts.
        Some(Pattern::EmptyScript) | None => 0,
    };

    if context.line_start && STATEMENT_SNIPPETS.contains(&name) {
        score += 10;
    }
    if context.in_function {
        score += tag_bonus(FUNCTION_BODY_TAGS, 8);
    }
    if context.in_table {
        score += tag_bonus(&["table"], 10);
    }

    score.min(MAX_CONTEXT_SCORE)
}

/// How well a snippet name matches the token being typed, in `0..=10`.
///
/// An empty token is neutral and scores 5.
pub fn prefix_score(name: &str, token: &str) -> u32 {
    if token.is_empty() {
        return 5;
    }
    let token = token.to_lowercase();
    let lowered = name.to_lowercase();

    if lowered.starts_with(&token) {
        10
    } else if lowered.contains(&token) {
        5
    } else if initials(name).starts_with(&token) {
        2
    } else {
        0
    }
}

/// First letter of every word in `name`.
///
/// Words break on whitespace, underscores, and lower-to-upper case changes.
/// The result is lowercase.
pub fn initials(name: &str) -> String {
    let mut out = String::new();
    let mut prev: Option<char> = None;
    for c in name.chars() {
        let separator = c.is_whitespace() || c == '_';
        let starts_word = !separator
            && match prev {
                None => true,
                Some(p) => p.is_whitespace() || p == '_' || (p.is_lowercase() && c.is_uppercase()),
            };
        if starts_word {
            out.extend(c.to_lowercase());
        }
        prev = Some(c);
    }
    out
}

/// Weighted total for one snippet.
pub fn total_score(snippet: &Snippet, context: &Context, usage: &UsageStats) -> f64 {
    let context_score = score_context_match(snippet, context) as f64;
    let usage_score = usage
        .count(snippet.name())
        .saturating_mul(3)
        .min(MAX_USAGE_SCORE) as f64;
    let prefix = prefix_score(snippet.name(), &context.current_token) as f64;

    CONTEXT_WEIGHT * context_score + USAGE_WEIGHT * usage_score + PREFIX_WEIGHT * prefix
}

/// Score, filter, and order snippets for a context.
///
/// Zero-scored snippets are dropped unless no token is being typed. The sort
/// is stable: equal totals keep the iteration order of `snippets`.
pub fn rank_snippets<'a>(
    snippets: impl IntoIterator<Item = &'a Snippet>,
    context: &Context,
    usage: &UsageStats,
    limit: usize,
) -> Vec<ScoredSnippet<'a>> {
    let keep_zero = context.current_token.is_empty();

    let mut scored: Vec<ScoredSnippet<'a>> = snippets
        .into_iter()
        .map(|snippet| ScoredSnippet {
            snippet,
            score: total_score(snippet, context, usage),
        })
        .filter(|s| keep_zero || s.score > 0.0)
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(limit);
    scored
}
