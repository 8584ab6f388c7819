//! Design tokens
//!
//! Provides [`Token`], a named design decision identified by its path.

use crate::reference;
use crate::value::{TokenKind, TokenValue};
use serde::{Deserialize, Serialize};

/// A named design decision
///
/// # Invariants
/// - `path` is the identity; a store holds at most one token per path
/// - `value` is the source of truth; `resolved_value` is derived from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Unique key, e.g. `background.action.accent`
    pub path: String,

    /// Literal or reference-bearing value
    pub value: TokenValue,

    /// Value after reference resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_value: Option<TokenValue>,

    /// Declared kind
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub token_type: Option<TokenKind>,

    /// Human description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Token {
    /// Create token with a typed value
    #[inline]
    #[must_use]
    pub fn new(path: impl Into<String>, value: TokenValue) -> Self {
        Self {
            path: path.into(),
            value,
            resolved_value: None,
            token_type: None,
            description: None,
        }
    }

    /// Create token from a raw string, inferring its kind
    #[inline]
    #[must_use]
    pub fn from_raw(path: impl Into<String>, raw: &str) -> Self {
        Self::new(path, TokenValue::infer(raw))
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// With declared kind
    #[inline]
    #[must_use]
    pub fn with_type(mut self, kind: TokenKind) -> Self {
        self.token_type = Some(kind);
        self
    }

    /// With resolved value
    #[inline]
    #[must_use]
    pub fn with_resolved(mut self, resolved: TokenValue) -> Self {
        self.resolved_value = Some(resolved);
        self
    }

    /// Declared kind, falling back to the kind of the value
    #[inline]
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        self.token_type.unwrap_or_else(|| self.effective_value().kind())
    }

    /// Resolved value if present, raw value otherwise
    #[inline]
    #[must_use]
    pub fn effective_value(&self) -> &TokenValue {
        self.resolved_value.as_ref().unwrap_or(&self.value)
    }

    /// Raw value rendered as text
    #[inline]
    #[must_use]
    pub fn raw_text(&self) -> String {
        self.value.to_string()
    }

    /// Whether this token describes a color
    ///
    /// True when declared as a color, when either value is a color, or when
    /// the resolved value carries a literal color.
    #[must_use]
    pub fn is_color(&self) -> bool {
        self.token_type == Some(TokenKind::Color)
            || self.value.kind() == TokenKind::Color
            || self
                .resolved_value
                .as_ref()
                .is_some_and(|v| v.kind() == TokenKind::Color || v.is_color_literal())
    }

    /// Whether the raw value carries any reference syntax
    #[inline]
    #[must_use]
    pub fn has_reference_syntax(&self) -> bool {
        self.value
            .as_text()
            .is_some_and(reference::has_embedded_reference)
    }

    /// Whether this token's raw value references `target`
    #[inline]
    #[must_use]
    pub fn references(&self, target: &str) -> bool {
        self.path != target
            && self
                .value
                .as_text()
                .is_some_and(|text| reference::references_path(text, target))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_infers_kind() {
        let token = Token::from_raw("color.blue.500", "#3B82F6");
        assert_eq!(token.kind(), TokenKind::Color);
        assert!(token.is_color());
        assert!(!token.has_reference_syntax());
    }

    #[test]
    fn declared_type_wins() {
        let token = Token::from_raw("background.action.accent", "{color.blue.500}")
            .with_type(TokenKind::Color);
        assert_eq!(token.kind(), TokenKind::Color);
        assert!(token.is_color());
        assert!(token.has_reference_syntax());
    }

    #[test]
    fn resolved_color_marks_reference_as_color() {
        let token = Token::from_raw("text.action.accent", "{color.white}")
            .with_resolved(TokenValue::Color("#ffffff".into()));
        assert!(token.is_color());
        assert_eq!(token.effective_value().hex_color().as_deref(), Some("#ffffff"));
    }

    #[test]
    fn references_ignores_self() {
        let token = Token::from_raw("a", "{a}");
        assert!(!token.references("a"));
        let token = Token::from_raw("b", "{a}");
        assert!(token.references("a"));
    }

    #[test]
    fn serde_uses_type_key() {
        let token = Token::from_raw("a", "#fff").with_type(TokenKind::Color);
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["type"], "color");
        assert!(json.get("resolvedValue").is_none());
    }
}
