//! The built-in snippet library.
//!
//! Order matters: the repository enumerates built-ins in this order and the
//! ranking engine keeps that order between equal scores.

use super::record::{Category, Snippet};

/// Canonical snippet names that the ranking engine refers to directly.
pub mod names {
    pub const MODULE: &str = "module";
    pub const SERVICE: &str = "service";
    pub const FUNCTION: &str = "function";
    pub const LOCAL: &str = "local";
    pub const INSTANCE: &str = "instance";
    pub const CONNECT: &str = "connect";
    pub const TOUCHED: &str = "touched";
    pub const FOR: &str = "for";
    pub const FOR_PAIRS: &str = "forpairs";
    pub const FOR_IPAIRS: &str = "foripairs";
}

type Entry = (&'static str, &'static str, &'static str, Category, &'static [&'static str]);

const BUILTINS: &[Entry] = &[
    // Essential
    (
        "service",
        "Get a Roblox service",
        "local $1 = game:GetService(\"$2\")",
        Category::Essential,
        &["service", "variable", "declaration"],
    ),
    (
        "function",
        "Local function",
        "local function $1($2)\n\t$0\nend",
        Category::Essential,
        &["function", "declaration"],
    ),
    (
        "module",
        "ModuleScript skeleton",
        "local $1 = {}\n\n$0\n\nreturn $1",
        Category::Essential,
        &["module", "table"],
    ),
    (
        "local",
        "Local variable",
        "local $1 = $0",
        Category::Essential,
        &["variable", "declaration"],
    ),
    (
        "if",
        "If statement",
        "if $1 then\n\t$0\nend",
        Category::Essential,
        &["conditional"],
    ),
    (
        "for",
        "Numeric for loop",
        "for $1 = $2, $3 do\n\t$0\nend",
        Category::Essential,
        &["loop"],
    ),
    (
        "connect",
        "Connect to an event",
        "$1:Connect(function($2)\n\t$0\nend)",
        Category::Essential,
        &["event", "callback"],
    ),
    // Common
    (
        "forpairs",
        "Iterate a dictionary with pairs",
        "for $1, $2 in pairs($3) do\n\t$0\nend",
        Category::Common,
        &["loop", "table"],
    ),
    (
        "foripairs",
        "Iterate an array with ipairs",
        "for $1, $2 in ipairs($3) do\n\t$0\nend",
        Category::Common,
        &["loop", "table"],
    ),
    (
        "while",
        "While loop",
        "while $1 do\n\t$0\nend",
        Category::Common,
        &["loop"],
    ),
    (
        "repeat",
        "Repeat-until loop",
        "repeat\n\t$0\nuntil $1",
        Category::Common,
        &["loop"],
    ),
    (
        "ifelse",
        "If-else statement",
        "if $1 then\n\t$2\nelse\n\t$0\nend",
        Category::Common,
        &["conditional"],
    ),
    (
        "instance",
        "Create an Instance",
        "local $1 = Instance.new(\"$2\")\n$1.Parent = $0",
        Category::Common,
        &["instance", "creation", "variable"],
    ),
    (
        "pcall",
        "Protected call",
        "local success, result = pcall(function()\n\t$0\nend)",
        Category::Common,
        &["pcall", "error"],
    ),
    (
        "touched",
        "Touched event handler",
        "$1.Touched:Connect(function(hit)\n\t$0\nend)",
        Category::Common,
        &["event", "callback"],
    ),
    (
        "callback",
        "Anonymous function",
        "function($1)\n\t$0\nend",
        Category::Common,
        &["function", "callback"],
    ),
    (
        "table",
        "Table literal",
        "local $1 = {\n\t$0\n}",
        Category::Common,
        &["table", "variable", "declaration"],
    ),
    (
        "print",
        "Print to output",
        "print($0)",
        Category::Common,
        &["debug"],
    ),
    (
        "wait",
        "Yield with task.wait",
        "task.wait($1)",
        Category::Common,
        &["async"],
    ),
    (
        "field",
        "Table field",
        "$1 = $2,",
        Category::Common,
        &["table"],
    ),
    // Advanced
    (
        "players",
        "Players service with PlayerAdded",
        "local Players = game:GetService(\"Players\")\n\nPlayers.PlayerAdded:Connect(function(player)\n\t$0\nend)",
        Category::Advanced,
        &["service", "event"],
    ),
    (
        "remote",
        "RemoteEvent from ReplicatedStorage",
        "local $1 = game:GetService(\"ReplicatedStorage\"):WaitForChild(\"$2\")",
        Category::Advanced,
        &["service", "remote"],
    ),
    (
        "tween",
        "Tween an instance",
        "local TweenService = game:GetService(\"TweenService\")\nlocal $1 = TweenService:Create($2, TweenInfo.new($3), { $4 })\n$1:Play()$0",
        Category::Advanced,
        &["service", "animation"],
    ),
    (
        "spawn",
        "Run a function on a new thread",
        "task.spawn(function()\n\t$0\nend)",
        Category::Advanced,
        &["function", "callback", "async"],
    ),
    (
        "class",
        "Metatable-based class",
        "local $1 = {}\n$1.__index = $1\n\nfunction $1.new($2)\n\tlocal self = setmetatable({}, $1)\n\t$0\n\treturn self\nend\n\nreturn $1",
        Category::Advanced,
        &["module", "table", "class"],
    ),
    (
        "heartbeat",
        "RunService Heartbeat loop",
        "game:GetService(\"RunService\").Heartbeat:Connect(function(dt)\n\t$0\nend)",
        Category::Advanced,
        &["service", "event", "loop"],
    ),
];

/// Build the built-in snippets in their canonical order.
pub fn builtin_snippets() -> Vec<Snippet> {
    BUILTINS
        .iter()
        .filter_map(|&(name, description, template, category, tags)| {
            match Snippet::new(name, description, template, category, tags.iter().copied()) {
                Ok(snippet) => Some(snippet),
                Err(err) => {
                    tracing::error!(%err, "skipping malformed built-in snippet");
                    None
                }
            }
        })
        .collect()
}
