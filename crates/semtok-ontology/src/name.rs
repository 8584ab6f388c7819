//! Structured semantic token names
//!
//! A [`SemanticTokenName`] is a point in the five-axis naming space. Its
//! canonical path is `<class>[.<context>].<intent>[.<modifier>][.<state>]`,
//! with default modifier and default state omitted.

use crate::axes::{EmphasisModifier, Intent, InteractionState, PropertyClass, UxContext};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Canonical path separator
pub const SEPARATOR: char = '.';

/// Structured form of a canonical token path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticTokenName {
    /// Where the value lands in CSS
    pub property_class: PropertyClass,

    /// Component domain; absent for context-free tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ux_context: Option<UxContext>,

    /// Semantic meaning
    pub intent: Intent,

    /// Emphasis modifier; absent means default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modifier: Option<EmphasisModifier>,

    /// Interaction state; absent means default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<InteractionState>,
}

impl SemanticTokenName {
    /// Create a context-free name
    #[inline]
    #[must_use]
    pub fn new(property_class: PropertyClass, intent: Intent) -> Self {
        Self {
            property_class,
            ux_context: None,
            intent,
            modifier: None,
            state: None,
        }
    }

    /// With UX context
    #[inline]
    #[must_use]
    pub fn with_context(mut self, context: UxContext) -> Self {
        self.ux_context = Some(context);
        self
    }

    /// With emphasis modifier
    #[inline]
    #[must_use]
    pub fn with_modifier(mut self, modifier: EmphasisModifier) -> Self {
        self.modifier = Some(modifier);
        self
    }

    /// With interaction state
    #[inline]
    #[must_use]
    pub fn with_state(mut self, state: InteractionState) -> Self {
        self.state = Some(state);
        self
    }

    /// Modifier with the implied default filled in
    #[inline]
    #[must_use]
    pub fn effective_modifier(&self) -> EmphasisModifier {
        self.modifier.unwrap_or(EmphasisModifier::Default)
    }

    /// State with the implied default filled in
    #[inline]
    #[must_use]
    pub fn effective_state(&self) -> InteractionState {
        self.state.unwrap_or(InteractionState::Default)
    }

    /// Canonical dotted path
    #[must_use]
    pub fn build_path(&self) -> String {
        let mut segments: Vec<&str> = Vec::with_capacity(5);
        segments.push(self.property_class.as_str());
        if let Some(context) = self.ux_context {
            segments.push(context.as_str());
        }
        segments.push(self.intent.as_str());
        if let Some(modifier) = self.modifier.filter(|m| !m.is_default()) {
            segments.push(modifier.as_str());
        }
        if let Some(state) = self.state.filter(|s| !s.is_default()) {
            segments.push(state.as_str());
        }
        segments.join(".")
    }

    /// Same name with default modifier/state dropped
    ///
    /// Two names that build the same path normalize to equal values.
    #[must_use]
    pub fn normalized(&self) -> Self {
        Self {
            property_class: self.property_class,
            ux_context: self.ux_context,
            intent: self.intent.clone(),
            modifier: self.modifier.filter(|m| !m.is_default()),
            state: self.state.filter(|s| !s.is_default()),
        }
    }
}

impl Display for SemanticTokenName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build_path())
    }
}

/// Build the canonical path of `name`
#[inline]
#[must_use]
pub fn build_path(name: &SemanticTokenName) -> String {
    name.build_path()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_minimal_path() {
        let name = SemanticTokenName::new(PropertyClass::Background, Intent::Accent);
        assert_eq!(name.build_path(), "background.accent");
    }

    #[test]
    fn builds_full_path() {
        let name = SemanticTokenName::new(PropertyClass::Text, Intent::Danger)
            .with_context(UxContext::Action)
            .with_modifier(EmphasisModifier::Strong)
            .with_state(InteractionState::Hover);
        assert_eq!(name.build_path(), "text.action.danger.strong.hover");
    }

    #[test]
    fn omits_defaults() {
        let name = SemanticTokenName::new(PropertyClass::Border, Intent::Base)
            .with_context(UxContext::Input)
            .with_modifier(EmphasisModifier::Default)
            .with_state(InteractionState::Default);
        assert_eq!(name.build_path(), "border.input.base");
        assert_eq!(name.normalized().modifier, None);
    }

    #[test]
    fn compound_class_keeps_hyphen() {
        let name = SemanticTokenName::new(PropertyClass::SpacingInline, Intent::Base)
            .with_context(UxContext::Action);
        assert_eq!(name.to_string(), "spacing-inline.action.base");
    }
}
