use std::fmt;

use crate::config::{PlaceholderMode, RenderOptions};
use crate::data::DataRecord;
use crate::document::{rewrite_style_blocks, split};
use crate::error::{PreviewError, PreviewResult};
use crate::scope_id::ScopeId;
use crate::scoping::scope_with_options;
use crate::template::substitute_with_report;

/// Rendered preview: one wrapper element holding the scoped styles followed
/// by the substituted body. Ready to be injected as markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult(String);

impl RenderResult {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RenderResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RenderResult {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<RenderResult> for String {
    fn from(result: RenderResult) -> Self {
        result.0
    }
}

/// Render `template` against `data` inside the element `#scope_id`.
///
/// Never fails: see [`render_with_options`].
pub fn render(template: &str, data: &DataRecord, scope_id: &ScopeId) -> RenderResult {
    render_with_options(template, data, scope_id, &RenderOptions::default())
}

/// Render with explicit options.
///
/// When [`try_render`] fails the raw template is returned instead, with its
/// styles scoped and no substitution applied, so the preview surface always
/// has something to show.
pub fn render_with_options(
    template: &str,
    data: &DataRecord,
    scope_id: &ScopeId,
    options: &RenderOptions,
) -> RenderResult {
    match try_render(template, data, scope_id, options) {
        Ok(result) => result,
        Err(err) => {
            log::warn!("preview #{} falls back to the raw template: {}", scope_id, err);
            raw_passthrough(template, scope_id, options)
        }
    }
}

/// Split, substitute, scope and wrap.
///
/// Fails on invalid options, or in [`PlaceholderMode::Strict`] when a
/// placeholder stays unresolved.
pub fn try_render(
    template: &str,
    data: &DataRecord,
    scope_id: &ScopeId,
    options: &RenderOptions,
) -> PreviewResult<RenderResult> {
    options.validate()?;
    let substitute_options = options.substitution();
    let scope_options = options.scoping();

    let document = split(template);
    let body = substitute_with_report(&document.body, data, substitute_options);
    let mut unresolved = body.unresolved;

    let mut styles = String::new();
    for block in &document.head_styles {
        let css = substitute_with_report(&block.css, data, substitute_options);
        for name in css.unresolved {
            if !unresolved.contains(&name) {
                unresolved.push(name);
            }
        }
        let scoped = scope_with_options(&css.output, scope_id, scope_options);
        styles.push_str(&block.with_css(scoped).to_html());
    }

    if options.placeholders == PlaceholderMode::Strict && !unresolved.is_empty() {
        return Err(PreviewError::UnresolvedPlaceholders { names: unresolved });
    }

    let content = if options.scope_inline_styles {
        rewrite_style_blocks(&body.output, |block| {
            block.with_css(scope_with_options(&block.css, scope_id, scope_options))
        })
    } else {
        body.output
    };

    Ok(RenderResult(wrap(&options.wrapper_tag, scope_id, &styles, &content)))
}

/// The unmodified template with every `<style>` block scoped, wrapped
fn raw_passthrough(template: &str, scope_id: &ScopeId, options: &RenderOptions) -> RenderResult {
    let tag = match options.validate() {
        Ok(()) => options.wrapper_tag.as_str(),
        Err(_) => "div",
    };
    let scoped = rewrite_style_blocks(template, |block| {
        block.with_css(scope_with_options(&block.css, scope_id, options.scoping()))
    });
    RenderResult(wrap(tag, scope_id, "", &scoped))
}

fn wrap(tag: &str, scope_id: &ScopeId, styles: &str, content: &str) -> String {
    let mut html = String::with_capacity(tag.len() * 2 + scope_id.as_str().len() + styles.len() + content.len() + 16);
    html.push('<');
    html.push_str(tag);
    html.push_str(" id=\"");
    html.push_str(scope_id.as_str());
    html.push_str("\">");
    html.push_str(styles);
    html.push_str(content);
    html.push_str("</");
    html.push_str(tag);
    html.push('>');
    html
}
