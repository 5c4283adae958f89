//! Snippet completion: turning a cursor request into ranked suggestions.

use std::time::Instant;

use smol_str::SmolStr;

use crate::base::{LineCol, LineIndex, TextSize};
use crate::snippet::{Snippet, SnippetRepository, UsageStats};
use crate::syntax::{Context, parse_context};

use super::config::EngineConfig;
use super::ranking::rank_snippets;

/// An autocomplete request: the cursor and the text on either side of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompletionRequest {
    pub position: LineCol,
    /// Text before the cursor, already bounded by the host's lookback.
    pub text_before: String,
    pub text_after: String,
}

impl CompletionRequest {
    pub fn new(
        position: LineCol,
        text_before: impl Into<String>,
        text_after: impl Into<String>,
    ) -> Self {
        Self {
            position,
            text_before: text_before.into(),
            text_after: text_after.into(),
        }
    }

    /// Build a request from a whole document.
    ///
    /// At most `lookback` characters are kept on each side of the cursor.
    /// Positions past the end of a line clamp to the line end; unknown lines
    /// clamp to the end of the document.
    pub fn at(source: &str, position: LineCol, lookback: usize) -> Self {
        let index = LineIndex::new(source);
        let mut offset = index
            .offset(position)
            .map_or(source.len(), |o| u32::from(o) as usize);
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }

        let (before, after) = source.split_at(offset);
        let start = match lookback {
            0 => before.len(),
            n => before.char_indices().rev().nth(n - 1).map_or(0, |(i, _)| i),
        };
        let end = after.char_indices().nth(lookback).map_or(after.len(), |(i, _)| i);

        let position = index.line_col(TextSize::from(offset as u32));
        Self::new(position, &before[start..], &after[..end])
    }

    /// The cursor line from its start up to the cursor.
    pub fn current_line(&self) -> &str {
        self.text_before
            .rfind('\n')
            .map_or(self.text_before.as_str(), |nl| &self.text_before[nl + 1..])
    }

    pub fn context(&self) -> Context {
        parse_context(&self.text_before, &self.text_after, self.current_line())
    }
}

/// Kind of completion item. Only snippets are produced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionKind {
    Snippet,
}

impl CompletionKind {
    /// Convert to the LSP `CompletionItemKind` number.
    pub fn to_lsp(self) -> u32 {
        match self {
            CompletionKind::Snippet => 15,
        }
    }
}

/// A completion descriptor handed back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    /// Snippet name, also what gets inserted on acceptance.
    pub label: SmolStr,
    pub kind: CompletionKind,
    /// One-line description.
    pub detail: String,
    /// The template body.
    pub documentation: String,
}

impl From<&Snippet> for CompletionItem {
    fn from(snippet: &Snippet) -> Self {
        Self {
            label: snippet.name().into(),
            kind: CompletionKind::Snippet,
            detail: snippet.description().to_owned(),
            documentation: snippet.template().to_owned(),
        }
    }
}

/// Rank repository snippets for a request.
///
/// Pure: the same request, repository, and usage always give the same list.
/// Equal scores keep repository order. At most `limit` entries are returned.
pub fn rank_completions<'a>(
    request: &CompletionRequest,
    snippets: &'a SnippetRepository,
    usage: &UsageStats,
    limit: usize,
) -> Vec<&'a Snippet> {
    let context = request.context();
    rank_snippets(snippets.iter(), &context, usage, limit)
        .into_iter()
        .map(|scored| scored.snippet)
        .collect()
}

/// Produce completion items for a request.
///
/// Nothing is suggested inside a line comment. Ranking that runs past the
/// configured budget is logged and still returned.
pub fn completions(
    request: &CompletionRequest,
    snippets: &SnippetRepository,
    usage: &UsageStats,
    config: &EngineConfig,
) -> Vec<CompletionItem> {
    let started = Instant::now();
    let context = request.context();

    if context.in_comment {
        tracing::debug!(position = %request.position, "no completions inside a comment");
        return Vec::new();
    }

    let items: Vec<CompletionItem> =
        rank_snippets(snippets.iter(), &context, usage, config.max_results)
            .into_iter()
            .map(|scored| CompletionItem::from(scored.snippet))
            .collect();

    let elapsed = started.elapsed();
    if elapsed > config.ranking_budget {
        tracing::warn!(
            ?elapsed,
            budget = ?config.ranking_budget,
            candidates = snippets.len(),
            "snippet ranking exceeded its time budget"
        );
    }
    items
}
