use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A `<style>` element: the raw attribute text of its opening tag and its CSS
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleBlock {
    /// Everything between `<style` and `>`, leading whitespace included
    pub attributes: String,
    pub css: String,
}

impl StyleBlock {
    pub fn new(css: impl Into<String>) -> Self {
        Self {
            attributes: String::new(),
            css: css.into(),
        }
    }

    /// Same attributes, different CSS
    pub fn with_css(&self, css: impl Into<String>) -> Self {
        Self {
            attributes: self.attributes.clone(),
            css: css.into(),
        }
    }

    pub fn to_html(&self) -> String {
        format!("<style{}>{}</style>", self.attributes, self.css)
    }
}

/// A template separated into head styles and body content
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitDocument {
    /// `<style>` blocks from `<head>`, in document order
    pub head_styles: Vec<StyleBlock>,
    pub body: String,
}

impl SplitDocument {
    /// Whole input treated as body content
    pub fn fragment(raw_html: &str) -> Self {
        Self {
            head_styles: Vec::new(),
            body: raw_html.to_string(),
        }
    }
}

fn head_regex() -> &'static Regex {
    static HEAD_REGEX: OnceLock<Regex> = OnceLock::new();
    HEAD_REGEX.get_or_init(|| Regex::new(r"(?is)<head\b[^>]*>(.*?)</head\s*>").unwrap())
}

fn body_regex() -> &'static Regex {
    static BODY_REGEX: OnceLock<Regex> = OnceLock::new();
    BODY_REGEX.get_or_init(|| Regex::new(r"(?is)<body\b[^>]*>(.*)</body\s*>").unwrap())
}

fn style_regex() -> &'static Regex {
    static STYLE_REGEX: OnceLock<Regex> = OnceLock::new();
    STYLE_REGEX.get_or_init(|| Regex::new(r"(?is)<style\b([^>]*)>(.*?)</style\s*>").unwrap())
}

fn style_block(caps: &Captures) -> StyleBlock {
    StyleBlock {
        attributes: caps.get(1).map_or("", |m| m.as_str()).to_string(),
        css: caps.get(2).map_or("", |m| m.as_str()).to_string(),
    }
}

/// Separate `<head>` styles from `<body>` content.
///
/// - With a `<head>…</head>` region, every `<style>` inside it is collected and
///   the whole region is dropped. Other head content (`<title>`, `<meta>`,
///   `<link>`) is discarded.
/// - With a `<body>…</body>` region (after head removal), its inner content is
///   the body. Otherwise the remaining text is the body as-is, so plain
///   fragments pass through untouched.
///
/// Tag matching is case-insensitive and tolerates attributes. Unterminated
/// tags simply fail to match.
pub fn split(raw_html: &str) -> SplitDocument {
    let Some(head) = head_regex().captures(raw_html) else {
        return SplitDocument {
            head_styles: Vec::new(),
            body: extract_body(raw_html).to_string(),
        };
    };

    let (Some(region), Some(inner)) = (head.get(0), head.get(1)) else {
        return SplitDocument::fragment(raw_html);
    };

    let head_styles = style_regex()
        .captures_iter(inner.as_str())
        .map(|caps| style_block(&caps))
        .collect();

    let mut rest = String::with_capacity(raw_html.len() - region.len());
    rest.push_str(&raw_html[..region.start()]);
    rest.push_str(&raw_html[region.end()..]);

    SplitDocument {
        head_styles,
        body: extract_body(&rest).to_string(),
    }
}

fn extract_body(html: &str) -> &str {
    body_regex()
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map_or(html, |m| m.as_str())
}

/// Replace every `<style>` block of `html` with the output of `rewrite`,
/// leaving the surrounding markup untouched.
pub fn rewrite_style_blocks<F>(html: &str, mut rewrite: F) -> String
where
    F: FnMut(&StyleBlock) -> StyleBlock,
{
    style_regex()
        .replace_all(html, |caps: &Captures| rewrite(&style_block(caps)).to_html())
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_document() {
        let html = "<html><head><title>T</title><style>h1{color:red}</style></head>\
                    <body><h1>Hi</h1></body></html>";
        let doc = split(html);
        assert_eq!(doc.head_styles, vec![StyleBlock::new("h1{color:red}")]);
        assert_eq!(doc.body, "<h1>Hi</h1>");
    }

    #[test]
    fn test_fragment_passes_through() {
        let html = "<h1>{{clientName}}</h1><p>Terms</p>";
        let doc = split(html);
        assert!(doc.head_styles.is_empty());
        assert_eq!(doc.body, html);
    }

    #[test]
    fn test_styles_in_document_order_with_attributes() {
        let html = r#"<HEAD lang="en"><Style type="text/css">a{}</Style><style media="print">b{}</STYLE></HEAD><BODY class="x">c</BODY>"#;
        let doc = split(html);
        assert_eq!(doc.head_styles.len(), 2);
        assert_eq!(doc.head_styles[0].attributes, r#" type="text/css""#);
        assert_eq!(doc.head_styles[0].css, "a{}");
        assert_eq!(doc.head_styles[1].attributes, r#" media="print""#);
        assert_eq!(doc.head_styles[1].css, "b{}");
        assert_eq!(doc.body, "c");
    }

    #[test]
    fn test_head_without_body_keeps_remainder() {
        let html = "<head><style>p{}</style></head><p>text</p>";
        let doc = split(html);
        assert_eq!(doc.head_styles.len(), 1);
        assert_eq!(doc.body, "<p>text</p>");
    }

    #[test]
    fn test_header_element_is_not_head() {
        let html = "<header><style>p{}</style></header><p>x</p>";
        let doc = split(html);
        assert!(doc.head_styles.is_empty());
        assert_eq!(doc.body, html);
    }

    #[test]
    fn test_unterminated_tags_do_not_fail() {
        let html = "<head><style>p{color:red}<body><p>x";
        let doc = split(html);
        assert!(doc.head_styles.is_empty());
        assert_eq!(doc.body, html);
    }

    #[test]
    fn test_body_only() {
        let doc = split("<body>\n<p>x</p>\n</body>");
        assert!(doc.head_styles.is_empty());
        assert_eq!(doc.body, "\n<p>x</p>\n");
    }

    #[test]
    fn test_rewrite_style_blocks() {
        let html = r#"<p>a</p><style id="s">p{}</style><p>b</p>"#;
        let out = rewrite_style_blocks(html, |block| block.with_css("q{}"));
        assert_eq!(out, r#"<p>a</p><style id="s">q{}</style><p>b</p>"#);
    }
}
