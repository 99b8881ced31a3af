//! # Template Preview
//!
//! Renders author-written HTML/CSS templates (contracts, proposals) against a
//! data record and returns markup that can be embedded in a live page without
//! its styles leaking out, or the page's styles leaking in.
//!
//! ## Pipeline
//! 1. [`split`]: pull `<style>` blocks out of `<head>`, keep the `<body>`
//!    content (plain fragments pass through as-is)
//! 2. [`substitute`]: fill `{{key}}` placeholders and one `{{#each list}}` block
//! 3. [`scope`]: confine every CSS rule to `#<scope id>`
//! 4. wrap styles and content in a single element with `id="<scope id>"`
//!
//! [`render`] runs all four and never fails: on any internal error it
//! degrades to the raw template with its styles scoped.
//!
//! ## Example
//! ```ignore
//! use template_preview::{render, DataRecord, RowRecord, ScopeId};
//!
//! let template = r#"
//! <html>
//!   <head><style>body { color: #333 } .hdr { font-weight: bold }</style></head>
//!   <body>
//!     <h1 class="hdr">{{clientName}}</h1>
//!     {{#each signatories}}<p>{{this.name}}</p>{{/each}}
//!   </body>
//! </html>"#;
//!
//! let mut data = DataRecord::new();
//! data.insert("clientName", "Acme")
//!     .insert_list("signatories", vec![RowRecord::from_iter([("name", "Ann")])]);
//!
//! let scope_id = ScopeId::new("contract-preview").expect("valid scope id");
//! let html = render(template, &data, &scope_id);
//! ```

pub mod config;
pub mod data;
pub mod document;
pub mod error;
pub mod render;
pub mod scope_id;
pub mod scoping;
pub mod template;

// --- Core types ---
pub use config::{IterationMode, PlaceholderMode, RenderOptions, ScopeOptions, SubstituteOptions};
pub use data::{DataRecord, RowRecord, Scalar, Value};
pub use document::{SplitDocument, StyleBlock};
pub use error::{PreviewError, PreviewResult};
pub use render::RenderResult;
pub use scope_id::ScopeId;
pub use template::Substitution;

/// Render a template into a scoped, embeddable fragment with default options
pub fn render(template: &str, data: &DataRecord, scope_id: &ScopeId) -> RenderResult {
    render::render(template, data, scope_id)
}

/// Render with explicit options; still never fails
pub fn render_with_options(
    template: &str,
    data: &DataRecord,
    scope_id: &ScopeId,
    options: &RenderOptions,
) -> RenderResult {
    render::render_with_options(template, data, scope_id, options)
}

/// Render, surfacing invalid options and (in strict mode) unresolved placeholders
pub fn try_render(
    template: &str,
    data: &DataRecord,
    scope_id: &ScopeId,
    options: &RenderOptions,
) -> PreviewResult<RenderResult> {
    render::try_render(template, data, scope_id, options)
}

/// Separate head styles from body content
pub fn split(raw_html: &str) -> SplitDocument {
    document::split(raw_html)
}

/// Fill placeholders with default options
pub fn substitute(body: &str, data: &DataRecord) -> String {
    template::substitute(body, data)
}

/// Confine a stylesheet to `#<scope id>` with default options
pub fn scope(css: &str, scope_id: &ScopeId) -> String {
    scoping::scope(css, scope_id)
}
