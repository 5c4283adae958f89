//! Ranking behavior over realistic Luau cursor positions.
//!
//! Each case builds a request from a whole document, the way a host would,
//! and checks which snippets come out on top.

use rstest::rstest;
use snipkit::ide::{CompletionRequest, rank_completions};
use snipkit::snippet::{Category, Snippet, SnippetRepository, UsageStats};
use snipkit::LineCol;

fn top_names(source: &str, usage: &UsageStats) -> Vec<String> {
    let index_end = source.lines().count().saturating_sub(1) as u32;
    let last_len = source.lines().last().map_or(0, str::len) as u32;
    let request = CompletionRequest::at(source, LineCol::new(index_end, last_len), 1000);
    let repo = SnippetRepository::new();
    rank_completions(&request, &repo, usage, 10)
        .into_iter()
        .map(|s| s.name().to_owned())
        .collect()
}

#[rstest]
#[case::service_call("local Players = game:GetService(", "service")]
#[case::connect_callback("workspace.Part.Touched:Connect(", "function")]
#[case::instance_class("print(\"start\")\npart = Instance.new(\"", "instance")]
#[case::numeric_loop("print(\"start\")\nfor ", "for")]
fn test_pattern_puts_expected_snippet_first(#[case] source: &str, #[case] expected: &str) {
    let names = top_names(source, &UsageStats::new());
    assert_eq!(names.first().map(String::as_str), Some(expected), "{names:?}");
}

#[test]
fn test_declaration_ties_keep_library_order() {
    let names = top_names("print(\"start\")\nlocal ", &UsageStats::new());
    // Both hit the context cap; the library lists `service` first.
    assert_eq!(&names[..2], ["service", "local"]);
    assert_eq!(names[2], "instance");
}

#[test]
fn test_event_property_prefers_connect_snippets() {
    let names = top_names("local part = workspace.Part\npart.Touched", &UsageStats::new());
    assert!(names.len() >= 2, "{names:?}");
    let top: Vec<&str> = names[..2].iter().map(String::as_str).collect();
    assert!(top.contains(&"connect") && top.contains(&"touched"), "{top:?}");
}

#[test]
fn test_prefix_filters_unrelated_snippets() {
    let names = top_names("print(\"start\")\nx = wh", &UsageStats::new());
    assert_eq!(names, ["while"]);
}

#[test]
fn test_results_never_exceed_limit() {
    let mut snippets = Vec::new();
    for i in 0..30 {
        snippets.push(
            Snippet::custom(&format!("loop{i}"), "Loop", "for $1 do\n\t$0\nend", ["loop"]).unwrap(),
        );
    }
    let repo = SnippetRepository::from_snippets(snippets);
    let request = CompletionRequest::new(LineCol::new(1, 4), "print(\"start\")\nfor ", "");

    let ranked = rank_completions(&request, &repo, &UsageStats::new(), 10);
    assert_eq!(ranked.len(), 10);
}

#[test]
fn test_equal_scores_keep_repository_order() {
    let snippets = ["zeta", "alpha", "mid"].map(|name| {
        Snippet::new(name, "d", "$0", Category::Common, ["loop"]).unwrap()
    });
    let repo = SnippetRepository::from_snippets(snippets);
    let request = CompletionRequest::new(LineCol::new(1, 4), "print(\"start\")\nfor ", "");

    let names: Vec<&str> = rank_completions(&request, &repo, &UsageStats::new(), 10)
        .into_iter()
        .map(Snippet::name)
        .collect();
    assert_eq!(names, ["zeta", "alpha", "mid"]);
}

#[test]
fn test_ranking_is_deterministic() {
    let mut usage = UsageStats::new();
    usage.record("pcall");
    usage.record("pcall");
    let source = "local function f()\n\tif x then\n\t\t";

    assert_eq!(top_names(source, &usage), top_names(source, &usage));
}

#[test]
fn test_function_body_lifts_control_flow() {
    let names = top_names("local function f()\n\t", &UsageStats::new());
    assert_eq!(
        &names[..8],
        ["if", "for", "forpairs", "foripairs", "while", "repeat", "ifelse", "pcall"]
    );
    assert!(!names.iter().any(|n| n == "print"), "{names:?}");
}
