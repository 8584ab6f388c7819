//! Component surfaces
//!
//! Maps a component name (`button`, `primary-button`, `text-field`) to its
//! UX context and the property classes, states, and intents a complete
//! token set for that component defines.

use crate::axes::{Intent, InteractionState, PropertyClass, UxContext};
use crate::registry::UxContextEntry;
use serde::Serialize;

/// Expected token surface of a component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentSurface {
    /// Name that was looked up
    pub component: String,
    /// Registry component it matched
    pub matched: &'static str,
    /// Whether the match was exact
    pub exact: bool,
    /// Owning UX context
    pub context: UxContext,
    /// Property classes the component paints
    pub property_classes: Vec<PropertyClass>,
    /// Interaction states the component renders
    pub states: Vec<InteractionState>,
    /// Intents the component is offered in
    pub intents: Vec<Intent>,
}

impl ComponentSurface {
    /// Canonical paths of every token this surface expects
    #[must_use]
    pub fn expected_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        for class in &self.property_classes {
            for intent in &self.intents {
                for state in &self.states {
                    let mut path = format!("{class}.{}.{intent}", self.context);
                    if !state.is_default() {
                        path.push('.');
                        path.push_str(state.as_str());
                    }
                    paths.push(path);
                }
            }
        }
        paths
    }
}

use InteractionState as S;

fn context_states(context: UxContext) -> &'static [InteractionState] {
    match context {
        UxContext::Action => &[S::Default, S::Hover, S::Active, S::Focus, S::Disabled],
        UxContext::Input => &[S::Default, S::Hover, S::Focus, S::Disabled],
        UxContext::Navigation => &[S::Default, S::Hover, S::Active, S::Selected],
        UxContext::Data => &[S::Default, S::Hover, S::Selected],
        UxContext::Surface | UxContext::Feedback => &[S::Default],
    }
}

fn context_intents(context: UxContext) -> Vec<Intent> {
    match context {
        UxContext::Action => vec![Intent::Accent, Intent::Base, Intent::Danger],
        UxContext::Feedback => vec![Intent::Success, Intent::Warning, Intent::Danger, Intent::Info],
        UxContext::Input | UxContext::Surface | UxContext::Navigation | UxContext::Data => {
            vec![Intent::Base, Intent::Muted]
        }
    }
}

/// Apply per-component adjustments to the context template
fn apply_override(surface: &mut ComponentSurface) {
    match surface.matched {
        "icon-button" => {
            surface.property_classes = vec![PropertyClass::Background, PropertyClass::Icon, PropertyClass::Outline];
        }
        "link" => {
            surface.property_classes = vec![PropertyClass::Text, PropertyClass::Outline];
            surface.intents = vec![Intent::Accent];
        }
        "badge" | "progress" => {
            surface.property_classes = vec![PropertyClass::Background, PropertyClass::Text];
        }
        "tooltip" => {
            surface.property_classes = vec![PropertyClass::Background, PropertyClass::Text];
            surface.intents = vec![Intent::Inverted];
        }
        "checkbox" | "radio" | "switch" => {
            surface.states.push(InteractionState::Selected);
        }
        _ => {}
    }
}

pub(crate) fn resolve(contexts: &'static [UxContextEntry], component: &str) -> Option<ComponentSurface> {
    let needle = component.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return None;
    }

    let exact = contexts.iter().find_map(|entry| {
        entry
            .components
            .iter()
            .find(|name| **name == needle)
            .map(|name| (entry, *name))
    });

    let (entry, matched, is_exact) = match exact {
        Some((entry, name)) => (entry, name, true),
        None => {
            // Longest registry name wins so `icon-button-large` maps to `icon-button`.
            let (entry, name) = contexts
                .iter()
                .flat_map(|entry| entry.components.iter().map(move |name| (entry, *name)))
                .filter(|(_, name)| needle.contains(name) || name.contains(needle.as_str()))
                .max_by_key(|(_, name)| name.len())?;
            (entry, name, false)
        }
    };

    let mut surface = ComponentSurface {
        component: component.to_string(),
        matched,
        exact: is_exact,
        context: entry.id,
        property_classes: entry.required_classes.to_vec(),
        states: context_states(entry.id).to_vec(),
        intents: context_intents(entry.id),
    };
    apply_override(&mut surface);
    Some(surface)
}

#[cfg(test)]
mod tests {
    use crate::registry::Ontology;
    use crate::axes::{InteractionState, PropertyClass, UxContext};

    #[test]
    fn exact_match() {
        let surface = Ontology::standard().resolve_component("button").unwrap();
        assert!(surface.exact);
        assert_eq!(surface.context, UxContext::Action);
        assert!(surface.states.contains(&InteractionState::Hover));
    }

    #[test]
    fn substring_match_prefers_longest() {
        let surface = Ontology::standard()
            .resolve_component("icon-button-large")
            .unwrap();
        assert!(!surface.exact);
        assert_eq!(surface.matched, "icon-button");
        assert!(surface.property_classes.contains(&PropertyClass::Icon));
    }

    #[test]
    fn unknown_component() {
        assert!(Ontology::standard().resolve_component("spaceship").is_none());
        assert!(Ontology::standard().resolve_component("  ").is_none());
    }

    #[test]
    fn expected_paths_cover_states() {
        let surface = Ontology::standard().resolve_component("link").unwrap();
        let paths = surface.expected_paths();
        assert!(paths.contains(&"text.action.accent".to_string()));
        assert!(paths.contains(&"outline.action.accent.focus".to_string()));
    }
}
