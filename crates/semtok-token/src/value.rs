//! Token values
//!
//! Provides [`TokenValue`], a tagged union over the supported token kinds,
//! plus the minimal hex color helpers the analyzers need.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

static DIMENSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(-?\d+(?:\.\d+)?)(px|rem|em|%|vh|vw|pt|ch|ms|s)$")
        .expect("dimension pattern is valid")
});

/// Kind of a token value
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TokenKind {
    /// Color literal (`#3b82f6`, `rgb(...)`)
    Color,
    /// Number with unit (`16px`, `1.5rem`)
    Dimension,
    /// Unitless number
    Number,
    /// Font family stack
    FontFamily,
    /// Box shadow shorthand
    Shadow,
    /// Anything else, including reference-bearing strings
    Text,
}

impl TokenKind {
    /// Stable identifier
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::Dimension => "dimension",
            Self::Number => "number",
            Self::FontFamily => "font-family",
            Self::Shadow => "shadow",
            Self::Text => "text",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric value with a unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimension {
    /// Magnitude
    pub value: f64,
    /// Unit suffix (`px`, `rem`, `%`)
    pub unit: String,
}

/// Value of a design token
///
/// String-bearing variants may carry embedded `{path}` references; the
/// numeric variants never do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum TokenValue {
    /// Color literal or color reference
    Color(String),
    /// Dimension literal
    Dimension(Dimension),
    /// Unitless number
    Number(f64),
    /// Font family stack
    FontFamily(String),
    /// Shadow shorthand
    Shadow(String),
    /// Free-form text, usually a reference such as `{color.blue.500}`
    Text(String),
}

impl TokenValue {
    /// Classify a raw string into a typed value
    ///
    /// Reference-bearing strings always become [`TokenValue::Text`] so the
    /// literal/reference distinction stays visible to the analyzers.
    #[must_use]
    pub fn infer(raw: &str) -> Self {
        let trimmed = raw.trim();

        if trimmed.contains('{') {
            return Self::Text(raw.to_string());
        }

        if is_color_literal(trimmed) {
            return Self::Color(trimmed.to_string());
        }

        if let Some(caps) = DIMENSION_PATTERN.captures(trimmed) {
            if let Ok(value) = caps[1].parse::<f64>() {
                return Self::Dimension(Dimension {
                    value,
                    unit: caps[2].to_string(),
                });
            }
        }

        if let Ok(number) = trimmed.parse::<f64>() {
            return Self::Number(number);
        }

        Self::Text(raw.to_string())
    }

    /// Kind of this value
    #[inline]
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::Color(_) => TokenKind::Color,
            Self::Dimension(_) => TokenKind::Dimension,
            Self::Number(_) => TokenKind::Number,
            Self::FontFamily(_) => TokenKind::FontFamily,
            Self::Shadow(_) => TokenKind::Shadow,
            Self::Text(_) => TokenKind::Text,
        }
    }

    /// Underlying string for string-bearing variants
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Color(s) | Self::FontFamily(s) | Self::Shadow(s) | Self::Text(s) => Some(s),
            Self::Dimension(_) | Self::Number(_) => None,
        }
    }

    /// Mutable access to the string of string-bearing variants
    #[inline]
    pub fn text_mut(&mut self) -> Option<&mut String> {
        match self {
            Self::Color(s) | Self::FontFamily(s) | Self::Shadow(s) | Self::Text(s) => Some(s),
            Self::Dimension(_) | Self::Number(_) => None,
        }
    }

    /// Literal hex color carried by this value, normalized to `#rrggbb`
    ///
    /// Returns `None` for references, non-hex colors, and non-color kinds.
    #[must_use]
    pub fn hex_color(&self) -> Option<String> {
        let text = self.as_text()?.trim();
        parse_hex(text).map(|[r, g, b]| format!("#{r:02x}{g:02x}{b:02x}"))
    }

    /// Whether this value is a literal color (no references)
    #[inline]
    #[must_use]
    pub fn is_color_literal(&self) -> bool {
        self.as_text().is_some_and(|s| is_color_literal(s.trim()))
    }
}

impl Display for TokenValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(s) | Self::FontFamily(s) | Self::Shadow(s) | Self::Text(s) => f.write_str(s),
            Self::Dimension(d) => write!(f, "{}{}", d.value, d.unit),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for TokenValue {
    fn from(raw: &str) -> Self {
        Self::infer(raw)
    }
}

/// Parse `#rgb`, `#rrggbb`, or `#rrggbbaa` into RGB channels
///
/// Alpha is ignored.
#[must_use]
pub fn parse_hex(text: &str) -> Option<[u8; 3]> {
    let digits = text.strip_prefix('#')?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |s: &str| u8::from_str_radix(s, 16).ok();

    match digits.len() {
        3 => {
            let mut out = [0u8; 3];
            for (slot, c) in out.iter_mut().zip(digits.chars()) {
                let pair = format!("{c}{c}");
                *slot = channel(&pair)?;
            }
            Some(out)
        }
        6 | 8 => Some([
            channel(&digits[0..2])?,
            channel(&digits[2..4])?,
            channel(&digits[4..6])?,
        ]),
        _ => None,
    }
}

/// Whether a trimmed string is a literal color
#[must_use]
pub fn is_color_literal(text: &str) -> bool {
    if parse_hex(text).is_some() {
        return true;
    }
    let lower = text.to_ascii_lowercase();
    ["rgb(", "rgba(", "hsl(", "hsla(", "oklch("]
        .iter()
        .any(|prefix| lower.starts_with(prefix) && lower.ends_with(')'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infer_hex_color() {
        assert_eq!(TokenValue::infer("#3B82F6"), TokenValue::Color("#3B82F6".into()));
        assert_eq!(TokenValue::infer("#fff").kind(), TokenKind::Color);
    }

    #[test]
    fn infer_functional_color() {
        assert_eq!(TokenValue::infer("rgb(0, 0, 0)").kind(), TokenKind::Color);
        assert_eq!(TokenValue::infer("hsla(0, 0%, 0%, 0.5)").kind(), TokenKind::Color);
    }

    #[test]
    fn infer_dimension_and_number() {
        assert_eq!(
            TokenValue::infer("16px"),
            TokenValue::Dimension(Dimension {
                value: 16.0,
                unit: "px".into()
            })
        );
        assert_eq!(TokenValue::infer("1.5"), TokenValue::Number(1.5));
    }

    #[test]
    fn infer_reference_is_text() {
        assert_eq!(
            TokenValue::infer("{color.blue.500}"),
            TokenValue::Text("{color.blue.500}".into())
        );
        assert_eq!(TokenValue::infer("1px solid {border.base}").kind(), TokenKind::Text);
    }

    #[test]
    fn hex_color_normalizes() {
        assert_eq!(TokenValue::Color("#ABC".into()).hex_color().as_deref(), Some("#aabbcc"));
        assert_eq!(
            TokenValue::Color("#3B82F6FF".into()).hex_color().as_deref(),
            Some("#3b82f6")
        );
        assert!(TokenValue::Text("{a}".into()).hex_color().is_none());
        assert!(TokenValue::Number(1.0).hex_color().is_none());
    }

    #[test]
    fn parse_hex_rejects_garbage() {
        assert!(parse_hex("#12").is_none());
        assert!(parse_hex("#gggggg").is_none());
        assert!(parse_hex("123456").is_none());
        assert_eq!(parse_hex("#ff0000"), Some([255, 0, 0]));
    }

    #[test]
    fn display_round_trips_dimension() {
        assert_eq!(TokenValue::infer("4px").to_string(), "4px");
        assert_eq!(TokenValue::infer("0.5rem").to_string(), "0.5rem");
    }

    #[test]
    fn serde_is_tagged() {
        let json = serde_json::to_value(TokenValue::Color("#fff".into())).unwrap();
        assert_eq!(json["kind"], "color");
        assert_eq!(json["value"], "#fff");
    }
}
