//! At-rule classification.
//!
//! Decides how the rules nested inside a `{ … }` block are treated by the
//! scoping pass.

/// Kind of an open `{ … }` block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `@media`, `@supports`, …: nested rules are scoped like top-level ones
    Conditional,
    /// `@keyframes`, `@font-face`, `@page`, …: nested preludes are not selectors
    Opaque,
    /// A style rule. Nested rules (CSS nesting) already sit under its selector.
    Rule,
}

/// At-rules whose nested rules are ordinary style rules
const CONDITIONAL_AT_RULES: &[&str] = &[
    "media",
    "supports",
    "container",
    "layer",
    "document",
    "-moz-document",
];

/// Name of an at-rule prelude, lowercased and without the `@`
/// (`@media screen` -> `media`).
pub fn at_rule_name(prelude: &str) -> Option<String> {
    let rest = prelude.trim_start().strip_prefix('@')?;
    let name: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    Some(name.to_ascii_lowercase())
}

/// Block kind for an at-rule prelude. Anything that is not a known
/// conditional group rule is opaque.
pub fn classify(prelude: &str) -> BlockKind {
    match at_rule_name(prelude) {
        Some(name) if CONDITIONAL_AT_RULES.contains(&name.as_str()) => BlockKind::Conditional,
        _ => BlockKind::Opaque,
    }
}
