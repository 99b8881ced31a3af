//! Rewriting of a single selector prelude.

use crate::config::ScopeOptions;
use crate::scope_id::ScopeId;

/// Selectors that name the document root. Inside a preview the wrapper
/// element is the root, so they collapse to the scope selector itself.
const ROOT_SELECTORS: &[&str] = &["html", "body", ":root"];

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

/// Whether `selector` already contains `#<scope id>` as a whole id
/// (`#tpl-1` does not count inside `#tpl-10`).
pub fn contains_scope(selector: &str, scope_id: &ScopeId) -> bool {
    let needle = scope_id.selector();
    selector.match_indices(&needle).any(|(at, _)| {
        selector[at + needle.len()..]
            .chars()
            .next()
            .map_or(true, |c| !is_ident_char(c))
    })
}

/// Rewrite one selector (no commas considered). `None` leaves it as written.
fn scope_one(selector: &str, scope_id: &ScopeId) -> Option<String> {
    let trimmed = selector.trim();
    if trimmed.is_empty() || contains_scope(trimmed, scope_id) {
        return None;
    }

    let scope = scope_id.selector();
    if trimmed == "*" {
        return Some(format!("{} *", scope));
    }
    if ROOT_SELECTORS
        .iter()
        .any(|root| trimmed.eq_ignore_ascii_case(root))
    {
        return Some(scope);
    }
    Some(format!("{} {}", scope, trimmed))
}

/// Split at commas outside `()`, `[]` and quotes
fn split_selector_list(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, c) in list.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(' | '[') => depth += 1,
            (None, ')' | ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&list[start..]);
    parts
}

/// Scope a selector prelude (trimmed, comments already moved out).
///
/// By default the whole list is one unit: `h1, h2` becomes `#s h1, h2`, and
/// `html, body` becomes `#s html, body`, leaving `body` unscoped.
/// With `split_selector_lists` every member is prefixed. Returns `None` when
/// nothing changes.
pub fn scope_selector(selector: &str, scope_id: &ScopeId, options: ScopeOptions) -> Option<String> {
    if !options.split_selector_lists {
        return scope_one(selector, scope_id);
    }

    let parts = split_selector_list(selector);
    let mut changed = false;
    let rewritten: Vec<String> = parts
        .iter()
        .map(|part| match scope_one(part, scope_id) {
            Some(scoped) => {
                changed = true;
                let leading = &part[..part.len() - part.trim_start().len()];
                format!("{}{}", leading, scoped)
            }
            None => part.to_string(),
        })
        .collect();

    changed.then(|| rewritten.join(","))
}
