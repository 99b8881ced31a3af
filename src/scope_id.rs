use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PreviewError, PreviewResult};

/// Identifier of the wrapper element that contains one rendered preview.
///
/// Rendered as `id="<scope id>"` on the wrapper and as `#<scope id>` in
/// every scoped selector, so it must be a valid CSS identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ScopeId(String);

impl ScopeId {
    pub fn new(id: impl Into<String>) -> PreviewResult<Self> {
        let id = id.into();
        if is_css_identifier(&id) {
            Ok(ScopeId(id))
        } else {
            Err(PreviewError::InvalidScopeId { id })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id selector, e.g. `#tpl-1`
    pub fn selector(&self) -> String {
        format!("#{}", self.0)
    }
}

/// Check `[A-Za-z_][A-Za-z0-9_-]*`, also allowing a single leading `-`
/// before the first letter (`-preview`).
fn is_css_identifier(s: &str) -> bool {
    let body = s.strip_prefix('-').unwrap_or(s);
    let mut chars = body.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        }
        _ => false,
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ScopeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ScopeId {
    type Err = PreviewError;

    fn from_str(s: &str) -> PreviewResult<Self> {
        ScopeId::new(s)
    }
}

impl TryFrom<String> for ScopeId {
    type Error = PreviewError;

    fn try_from(s: String) -> PreviewResult<Self> {
        ScopeId::new(s)
    }
}

impl From<ScopeId> for String {
    fn from(id: ScopeId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_css_identifiers() {
        for id in ["tpl-1", "preview", "_x", "contract_preview", "-edge", "A9"] {
            assert!(ScopeId::new(id).is_ok(), "should accept {}", id);
        }
    }

    #[test]
    fn test_rejects_non_identifiers() {
        for id in ["", "1tpl", "--x", "-1", "tpl 1", "tpl{", "a.b", "#tpl"] {
            assert!(
                matches!(ScopeId::new(id), Err(PreviewError::InvalidScopeId { .. })),
                "should reject {:?}",
                id
            );
        }
    }

    #[test]
    fn test_selector_prefixes_hash() {
        let id: ScopeId = "tpl-1".parse().unwrap();
        assert_eq!(id.selector(), "#tpl-1");
        assert_eq!(id.to_string(), "tpl-1");
    }

    #[test]
    fn test_deserializes_with_validation() {
        let ok: ScopeId = serde_json::from_str("\"tpl-1\"").unwrap();
        assert_eq!(ok.as_str(), "tpl-1");
        assert!(serde_json::from_str::<ScopeId>("\"9bad\"").is_err());
    }
}
