//! # Placeholder substitution
//!
//! A deliberately small template language over arbitrary HTML text. Three
//! passes run in order, each over the output of the previous one:
//!
//! 1. `{{key}}` is replaced with the scalar value of `key` (exact name, no
//!    paths or helpers). Other tokens are left for the later passes.
//! 2. `{{#each list}} … {{/each}}` repeats its inner markup once per row of
//!    `list`. Inside a row `{{this.field}}` and `{{field}}` read the row.
//!    Only the first block is expanded unless [`IterationMode::All`] is set.
//!    Blocks do not nest.
//! 3. Cleanup: any `{{…}}` still present, matched lazily up to the next `}}`
//!    (braces and line breaks included), is unresolved.
//!    [`PlaceholderMode::Lenient`] removes it, the other modes leave it
//!    visible. Whitespace-only tokens such as `{{ }}` are plain text.
//!
//! Top-level keys resolve first, so a top-level key wins over a row field
//! of the same name and also works inside rows (`{{clientName}}` in a
//! signatory row). Use `{{this.field}}` to read a shadowed row field.
//!
//! Values are not substituted into again, but they do go through cleanup:
//! a value carrying `{{…}}` text loses it in lenient mode.

use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;

use crate::config::{IterationMode, PlaceholderMode, SubstituteOptions};
use crate::data::{DataRecord, RowRecord, Scalar};

fn each_regex() -> &'static Regex {
    static EACH_REGEX: OnceLock<Regex> = OnceLock::new();
    EACH_REGEX.get_or_init(|| {
        Regex::new(r"(?s)\{\{#each\s+([^\s{}]+)\s*\}\}(.*?)\{\{/each\s*\}\}").unwrap()
    })
}

/// Tokens a key lookup can satisfy: no braces inside
fn token_regex() -> &'static Regex {
    static TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();
    TOKEN_REGEX.get_or_init(|| Regex::new(r"\{\{([^{}]*)\}\}").unwrap())
}

/// Anything left between `{{` and the next `}}`
fn leftover_regex() -> &'static Regex {
    static LEFTOVER_REGEX: OnceLock<Regex> = OnceLock::new();
    LEFTOVER_REGEX.get_or_init(|| Regex::new(r"(?s)\{\{(.*?)\}\}").unwrap())
}

/// Output of a substitution plus the placeholders nothing resolved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Substitution {
    pub output: String,
    /// Token contents in order of first appearance, without duplicates
    pub unresolved: Vec<String>,
}

/// Substitute `data` into `body` with default options
pub fn substitute(body: &str, data: &DataRecord) -> String {
    substitute_with_options(body, data, SubstituteOptions::default())
}

pub fn substitute_with_options(body: &str, data: &DataRecord, options: SubstituteOptions) -> String {
    substitute_with_report(body, data, options).output
}

/// Substitute and report which placeholders were left unresolved
pub fn substitute_with_report(
    body: &str,
    data: &DataRecord,
    options: SubstituteOptions,
) -> Substitution {
    let interpolated = interpolate_scalars(body, data, options);
    let expanded = expand_each_blocks(&interpolated, data, options);
    let (output, unresolved) = clean_up(&expanded, options.placeholders);

    if !unresolved.is_empty() {
        log::debug!(
            "{} unresolved placeholder(s) ({:?}): {}",
            unresolved.len(),
            options.placeholders,
            unresolved.join(", ")
        );
    }

    Substitution { output, unresolved }
}

fn interpolate_scalars<'a>(body: &'a str, data: &DataRecord, options: SubstituteOptions) -> Cow<'a, str> {
    if data.is_empty() {
        return Cow::Borrowed(body);
    }

    token_regex().replace_all(body, |caps: &Captures| match data.scalar(&caps[1]) {
        Some(value) => render_value(value, options),
        None => caps[0].to_string(),
    })
}

fn expand_each_blocks<'a>(body: &'a str, data: &DataRecord, options: SubstituteOptions) -> Cow<'a, str> {
    let regex = each_regex();

    match options.iteration {
        IterationMode::Single => {
            let expanded = regex.replace(body, |caps: &Captures| {
                expand_block(&caps[1], &caps[2], data, options)
            });
            if regex.is_match(&expanded) {
                log::debug!("only the first {{{{#each}}}} block is expanded; later blocks are treated as text");
            }
            expanded
        }
        IterationMode::All => regex.replace_all(body, |caps: &Captures| {
            expand_block(&caps[1], &caps[2], data, options)
        }),
    }
}

fn expand_block(list_key: &str, inner: &str, data: &DataRecord, options: SubstituteOptions) -> String {
    let Some(rows) = data.list(list_key) else {
        log::debug!("{{{{#each {}}}}}: no list under this key, block removed", list_key);
        return String::new();
    };

    rows.iter()
        .map(|row| instantiate_row(inner, row, options))
        .collect()
}

/// Fill `{{this.field}}` and `{{field}}` from `row`; other tokens are kept
/// for cleanup.
fn instantiate_row(inner: &str, row: &RowRecord, options: SubstituteOptions) -> String {
    token_regex()
        .replace_all(inner, |caps: &Captures| {
            let key = &caps[1];
            let field = key.strip_prefix("this.").unwrap_or(key);
            match row.scalar(field) {
                Some(value) => render_value(value, options),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Drop (lenient) or keep every leftover token, collecting its content
fn clean_up(text: &str, mode: PlaceholderMode) -> (String, Vec<String>) {
    let mut unresolved: Vec<String> = Vec::new();
    let output = leftover_regex()
        .replace_all(text, |caps: &Captures| {
            let token = &caps[0];
            let content = &caps[1];
            if content.trim().is_empty() {
                return token.to_string();
            }
            if !unresolved.iter().any(|name| name == content) {
                unresolved.push(content.to_string());
            }
            match mode {
                PlaceholderMode::Lenient => String::new(),
                PlaceholderMode::Visible | PlaceholderMode::Strict => token.to_string(),
            }
        })
        .into_owned();
    (output, unresolved)
}

fn render_value(value: &Scalar, options: SubstituteOptions) -> String {
    let text = value.to_string();
    if options.escape_values {
        escape_html(&text)
    } else {
        text
    }
}

fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
