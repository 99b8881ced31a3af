use serde::{Deserialize, Serialize};

use crate::error::{PreviewError, PreviewResult};

/// What happens to a `{{token}}` that no data value resolves
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderMode {
    /// Removed from the output
    #[default]
    Lenient,
    /// Left in the output verbatim so the author can spot it
    Visible,
    /// Left verbatim by `substitute`; `try_render` reports them as an error
    Strict,
}

/// How many `{{#each}}` blocks are expanded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IterationMode {
    /// Only the first block; later blocks fall through to cleanup
    #[default]
    Single,
    /// Every top-level block, each against its own list
    All,
}

/// Render pipeline options. `RenderOptions::default()` is the behavior
/// every preview surface uses unless configured otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderOptions {
    pub placeholders: PlaceholderMode,
    pub iteration: IterationMode,
    /// Prefix each selector of a comma-separated list instead of the list as a whole
    pub split_selector_lists: bool,
    /// Scope `<style>` blocks found in the body as well as those in `<head>`
    pub scope_inline_styles: bool,
    /// HTML-escape substituted values
    pub escape_values: bool,
    /// Element name of the wrapper carrying the scope id
    pub wrapper_tag: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            placeholders: PlaceholderMode::default(),
            iteration: IterationMode::default(),
            split_selector_lists: false,
            scope_inline_styles: true,
            escape_values: false,
            wrapper_tag: "div".to_string(),
        }
    }
}

impl RenderOptions {
    pub fn from_yaml_str(yaml: &str) -> PreviewResult<Self> {
        let options: RenderOptions = serde_yaml::from_str(yaml)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_json_str(json: &str) -> PreviewResult<Self> {
        let options: RenderOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> PreviewResult<()> {
        let mut chars = self.wrapper_tag.chars();
        let valid = match chars.next() {
            Some(c) if c.is_ascii_alphabetic() => chars.all(|c| c.is_ascii_alphanumeric()),
            _ => false,
        };
        if !valid {
            return Err(PreviewError::InvalidWrapperTag {
                tag: self.wrapper_tag.clone(),
            });
        }
        Ok(())
    }

    /// Options for the substitution engine
    pub(crate) fn substitution(&self) -> SubstituteOptions {
        SubstituteOptions {
            placeholders: self.placeholders,
            iteration: self.iteration,
            escape_values: self.escape_values,
        }
    }

    /// Options for the scoping transformer
    pub(crate) fn scoping(&self) -> ScopeOptions {
        ScopeOptions {
            split_selector_lists: self.split_selector_lists,
        }
    }
}

/// Subset of [`RenderOptions`] read by the substitution engine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubstituteOptions {
    pub placeholders: PlaceholderMode,
    pub iteration: IterationMode,
    pub escape_values: bool,
}

/// Subset of [`RenderOptions`] read by the scoping transformer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeOptions {
    pub split_selector_lists: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = RenderOptions::default();
        assert_eq!(options.placeholders, PlaceholderMode::Lenient);
        assert_eq!(options.iteration, IterationMode::Single);
        assert!(!options.split_selector_lists);
        assert!(options.scope_inline_styles);
        assert_eq!(options.wrapper_tag, "div");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "placeholders: strict\niteration: all\nsplitSelectorLists: true\n";
        let options = RenderOptions::from_yaml_str(yaml).unwrap();
        assert_eq!(options.placeholders, PlaceholderMode::Strict);
        assert_eq!(options.iteration, IterationMode::All);
        assert!(options.split_selector_lists);
        assert!(options.scope_inline_styles);
        assert_eq!(options.wrapper_tag, "div");
    }

    #[test]
    fn test_json_options() {
        let options = RenderOptions::from_json_str(r#"{"wrapperTag": "section"}"#).unwrap();
        assert_eq!(options.wrapper_tag, "section");
    }

    #[test]
    fn test_invalid_wrapper_tag() {
        for tag in ["", "1div", "di v", "div>", "x-y"] {
            let options = RenderOptions {
                wrapper_tag: tag.to_string(),
                ..RenderOptions::default()
            };
            assert!(
                matches!(options.validate(), Err(PreviewError::InvalidWrapperTag { .. })),
                "should reject {:?}",
                tag
            );
        }
    }

    #[test]
    fn test_unknown_mode_is_an_error() {
        let result = RenderOptions::from_yaml_str("placeholders: loud\n");
        assert!(matches!(result, Err(PreviewError::Yaml(_))));
    }
}
