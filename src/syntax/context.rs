//! Cursor context analysis.
//!
//! Derives a [`Context`] from the text around the cursor using bounded,
//! line-oriented heuristics. Nothing here parses Luau: block and table
//! nesting are estimated by counting keywords and braces, quotes are tracked
//! by parity, and escapes or multi-line strings/comments are not understood.
//! Those approximations feed the ranking engine as-is.

use std::fmt;

use indexmap::IndexSet;
use smol_str::SmolStr;

/// Scripts shorter than this (in characters) count as empty.
pub const EMPTY_SCRIPT_THRESHOLD: usize = 10;

/// Event properties whose access marks an event-handler context.
const EVENT_PROPERTIES: &[&str] = &[
    "Touched",
    "Changed",
    "Activated",
    "MouseButton1Click",
    "PlayerAdded",
    "PlayerRemoving",
    "CharacterAdded",
    "Heartbeat",
    "RenderStepped",
    "Died",
    "ChildAdded",
    "ChildRemoved",
];

/// A recognizable shape in the text before the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Fewer than [`EMPTY_SCRIPT_THRESHOLD`] characters before the cursor.
    EmptyScript,
    /// `game:GetService(...)` or a dangling `game:`.
    ServiceAccess,
    /// An open `:Connect(` call.
    EventConnection,
    /// A line starting with `local `.
    VariableDeclaration,
    /// A line starting with `for `.
    NumericLoop,
    /// `Instance.new("` with the class-name string still open.
    InstanceCreation,
    /// Access to a known event property such as `.Touched`.
    EventHandler,
}

impl Pattern {
    /// Order used by [`detect_pattern`] to pick a single scoring branch.
    pub const PRIORITY: [Pattern; 7] = [
        Pattern::EmptyScript,
        Pattern::ServiceAccess,
        Pattern::EventConnection,
        Pattern::VariableDeclaration,
        Pattern::InstanceCreation,
        Pattern::EventHandler,
        Pattern::NumericLoop,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Pattern::EmptyScript => "empty_script",
            Pattern::ServiceAccess => "service_access",
            Pattern::EventConnection => "event_connection",
            Pattern::VariableDeclaration => "variable_declaration",
            Pattern::NumericLoop => "numeric_loop",
            Pattern::InstanceCreation => "instance_creation",
            Pattern::EventHandler => "event_handler",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured summary of the text surrounding the cursor.
///
/// Built by [`parse_context`] once per request and only read afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Context {
    /// Identifier fragment directly before the cursor (may be empty).
    pub current_token: SmolStr,
    /// Identifier before `current_token`, skipping whitespace.
    pub previous_token: SmolStr,
    /// Text of the cursor line up to the cursor.
    pub current_line: String,
    pub is_empty: bool,
    /// Only whitespace precedes `current_token` on this line.
    pub line_start: bool,
    pub after_dot: bool,
    pub after_colon: bool,
    /// More `function` than `end` keywords before the cursor.
    pub in_function: bool,
    /// More `{` than `}` before the cursor.
    pub in_table: bool,
    /// A `--` comment opener precedes the cursor on this line.
    pub in_comment: bool,
    /// Detected patterns in detection order.
    pub patterns: IndexSet<Pattern>,
}

impl Context {
    pub fn has_pattern(&self, pattern: Pattern) -> bool {
        self.patterns.contains(&pattern)
    }
}

/// Analyze the text around the cursor.
///
/// `current_line` is the cursor line from its start up to the cursor.
/// Detection only looks backwards; `_text_after` is accepted so hosts can
/// pass both halves of the document unchanged.
pub fn parse_context(text_before: &str, _text_after: &str, current_line: &str) -> Context {
    let current_token = trailing_identifier(text_before);
    let before_token = &text_before[..text_before.len() - current_token.len()];
    let previous_token = trailing_identifier(before_token.trim_end());

    let line_before_token = current_line
        .strip_suffix(current_token)
        .unwrap_or(current_line);

    let is_empty = text_before.chars().count() < EMPTY_SCRIPT_THRESHOLD;

    let mut patterns = IndexSet::new();
    if is_empty {
        patterns.insert(Pattern::EmptyScript);
    }
    for (pattern, found) in [
        (
            Pattern::ServiceAccess,
            is_service_access(current_line, line_before_token),
        ),
        (Pattern::EventConnection, current_line.contains(":Connect(")),
        (
            Pattern::VariableDeclaration,
            current_line.trim_start().starts_with("local "),
        ),
        (
            Pattern::NumericLoop,
            current_line.trim_start().starts_with("for "),
        ),
        (Pattern::InstanceCreation, is_open_instance_new(current_line)),
        (
            Pattern::EventHandler,
            is_event_handler(current_line, line_before_token, current_token),
        ),
    ] {
        if found {
            patterns.insert(pattern);
        }
    }

    let context = Context {
        current_token: current_token.into(),
        previous_token: previous_token.into(),
        current_line: current_line.to_owned(),
        is_empty,
        line_start: line_before_token.trim().is_empty(),
        after_dot: before_token.ends_with('.'),
        after_colon: before_token.ends_with(':'),
        in_function: count_word(text_before, "function") > count_word(text_before, "end"),
        in_table: text_before.matches('{').count() > text_before.matches('}').count(),
        in_comment: opens_comment(current_line),
        patterns,
    };

    tracing::debug!(
        token = %context.current_token,
        patterns = ?context.patterns,
        in_function = context.in_function,
        in_table = context.in_table,
        "parsed completion context"
    );

    context
}

/// Pick the single pattern that selects the scoring branch.
pub fn detect_pattern(context: &Context) -> Option<Pattern> {
    Pattern::PRIORITY
        .into_iter()
        .find(|p| context.patterns.contains(p))
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Longest trailing run of `[A-Za-z0-9_]`.
fn trailing_identifier(text: &str) -> &str {
    let start = text
        .char_indices()
        .rev()
        .take_while(|&(_, c)| is_ident_char(c))
        .last()
        .map_or(text.len(), |(i, _)| i);
    &text[start..]
}

/// Whole-word occurrences of `word`.
fn count_word(text: &str, word: &str) -> usize {
    text.split(|c: char| !is_ident_char(c))
        .filter(|w| *w == word)
        .count()
}

fn is_service_access(line: &str, line_before_token: &str) -> bool {
    line.contains("game:GetService") || line_before_token.ends_with("game:")
}

fn is_open_instance_new(line: &str) -> bool {
    const OPENER: &str = "Instance.new(\"";
    line.rfind(OPENER)
        .is_some_and(|at| !line[at + OPENER.len()..].contains('"'))
}

fn is_event_handler(line: &str, line_before_token: &str, token: &str) -> bool {
    let accessed = line.match_indices('.').any(|(at, _)| {
        let rest = &line[at + 1..];
        EVENT_PROPERTIES.iter().any(|event| rest.starts_with(event))
    });
    // A partially typed event name right after the dot counts too.
    let typing = !token.is_empty()
        && line_before_token.ends_with('.')
        && EVENT_PROPERTIES.iter().any(|event| event.starts_with(token));
    accessed || typing
}

/// Whether `--` appears outside a string literal. Quote parity only.
fn opens_comment(line: &str) -> bool {
    let mut quote: Option<char> = None;
    let mut prev = '\0';
    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '"' || c == '\'' => quote = Some(c),
            None if c == '-' && prev == '-' => return true,
            None => {}
        }
        prev = c;
    }
    false
}
