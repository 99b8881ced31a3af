//! # CSS scoping
//!
//! Rewrites an author stylesheet so that every style rule only matches
//! inside the wrapper element carrying the scope id. Works on raw text: each
//! `{` closes a prelude, each `}` closes a block, and nothing else of the CSS
//! grammar is interpreted.
//!
//! Per prelude, in order:
//! 1. `*` becomes `#<id> *`
//! 2. `html`, `body` and `:root` become `#<id>`
//! 3. at-rule headers, preludes that already contain `#<id>`, and preludes
//!    nested in non-conditional blocks are left byte-identical
//! 4. anything else is prefixed with `#<id> `
//!
//! Rules nested in `@media`, `@supports`, `@container`, `@layer` and
//! `@document` are scoped like top-level rules. Keyframe selectors,
//! `@font-face`/`@page` bodies and CSS-nested rules are not.
//!
//! The pass is idempotent: running it again over its own output changes
//! nothing.
//!
//! ## Limitations
//! - `{`, `}` or `;` inside strings or comments confuse rule detection. The
//!   affected selector is left unscoped.
//! - With the default options a selector list is prefixed once as a whole
//!   (`h1, h2` -> `#id h1, h2`); enable `split_selector_lists` to prefix each
//!   member. Only the first member is confined, so the common root reset
//!   `html, body { … }` becomes `#id html, body{…}` and its `body` part still
//!   styles the host page. `split_selector_lists` turns it into `#id, #id`.

pub mod at_rule;
pub mod selector;

use regex::Regex;
use std::sync::OnceLock;

use crate::config::ScopeOptions;
use crate::scope_id::ScopeId;
use at_rule::BlockKind;

/// Text up to an opening brace that contains no other brace or `;`
fn prelude_regex() -> &'static Regex {
    static PRELUDE_REGEX: OnceLock<Regex> = OnceLock::new();
    PRELUDE_REGEX.get_or_init(|| Regex::new(r"[^{};]*\{").unwrap())
}

/// Scope `css` to the element with id `scope_id` using default options
pub fn scope(css: &str, scope_id: &ScopeId) -> String {
    scope_with_options(css, scope_id, ScopeOptions::default())
}

/// Scope `css` to the element with id `scope_id`
pub fn scope_with_options(css: &str, scope_id: &ScopeId, options: ScopeOptions) -> String {
    let mut out = String::with_capacity(css.len() + css.len() / 4);
    let mut open_blocks: Vec<BlockKind> = Vec::new();
    let mut last = 0;

    for m in prelude_regex().find_iter(css) {
        let between = &css[last..m.start()];
        for _ in between.matches('}') {
            open_blocks.pop();
        }
        out.push_str(between);

        let prelude = &css[m.start()..m.end() - 1];
        let (kind, rewritten) = rewrite_prelude(prelude, scope_id, &open_blocks, options);
        out.push_str(rewritten.as_deref().unwrap_or(prelude));
        out.push('{');

        open_blocks.push(kind);
        last = m.end();
    }

    out.push_str(&css[last..]);
    out
}

/// Decide the block kind opened by `prelude` and its replacement text, if any
fn rewrite_prelude(
    prelude: &str,
    scope_id: &ScopeId,
    open_blocks: &[BlockKind],
    options: ScopeOptions,
) -> (BlockKind, Option<String>) {
    let (leading, core) = split_leading_trivia(prelude);
    let core = core.trim_end();

    if core.starts_with('@') {
        log::trace!("keeping at-rule header {:?}", core);
        return (at_rule::classify(core), None);
    }

    if !open_blocks.iter().all(|kind| *kind == BlockKind::Conditional) {
        return (BlockKind::Rule, None);
    }

    match selector::scope_selector(core, scope_id, options) {
        Some(scoped) => (BlockKind::Rule, Some(format!("{}{}", leading, scoped))),
        None => {
            log::trace!("selector {:?} left as written", core);
            (BlockKind::Rule, None)
        }
    }
}

/// Split leading whitespace and `/* … */` comments off a prelude.
/// An unterminated comment stays in the second half.
fn split_leading_trivia(prelude: &str) -> (&str, &str) {
    let mut rest = prelude;
    loop {
        let trimmed = rest.trim_start();
        match trimmed.strip_prefix("/*").and_then(|c| c.find("*/").map(|end| &c[end + 2..])) {
            Some(after_comment) => rest = after_comment,
            None => {
                rest = trimmed;
                break;
            }
        }
    }
    prelude.split_at(prelude.len() - rest.len())
}
