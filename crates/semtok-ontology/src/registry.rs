//! Ontology registry
//!
//! [`Ontology`] holds the axis catalogs, alias tables, and component
//! surfaces. It is immutable after construction and is passed by reference
//! to every analyzer and planner.

use crate::axes::{EmphasisModifier, Intent, InteractionState, PropertyClass, UxContext};
use crate::components::{self, ComponentSurface};
use crate::name::SemanticTokenName;
use crate::parser::LenientConfig;
use serde::Serialize;
use std::collections::HashMap;

/// Catalog metadata for a property class
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyClassEntry {
    /// Class identifier
    pub id: PropertyClass,
    /// Human label
    pub label: &'static str,
    /// CSS properties this class drives
    pub css_properties: &'static [&'static str],
    /// One-line description
    pub description: &'static str,
}

/// Catalog metadata for an intent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentEntry {
    /// Intent identifier
    pub id: Intent,
    /// One-line description
    pub description: &'static str,
}

/// Catalog metadata for a UX context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UxContextEntry {
    /// Context identifier
    pub id: UxContext,
    /// One-line description
    pub description: &'static str,
    /// Classes every complete token set defines in this context
    pub required_classes: &'static [PropertyClass],
    /// Classes that make sense in this context at all
    pub allowed_classes: &'static [PropertyClass],
    /// Known component names belonging to this context
    pub components: &'static [&'static str],
}

/// Catalog metadata for an interaction state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateEntry {
    /// State identifier
    pub id: InteractionState,
    /// One-line description
    pub description: &'static str,
}

/// Catalog metadata for an emphasis modifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModifierEntry {
    /// Modifier identifier
    pub id: EmphasisModifier,
    /// One-line description
    pub description: &'static str,
}

use PropertyClass as P;

const PROPERTY_CLASSES: &[PropertyClassEntry] = &[
    PropertyClassEntry {
        id: P::Background,
        label: "Background",
        css_properties: &["background-color"],
        description: "Fill color behind content",
    },
    PropertyClassEntry {
        id: P::Text,
        label: "Text",
        css_properties: &["color"],
        description: "Foreground color of text",
    },
    PropertyClassEntry {
        id: P::Icon,
        label: "Icon",
        css_properties: &["color", "fill"],
        description: "Foreground color of icons",
    },
    PropertyClassEntry {
        id: P::Border,
        label: "Border",
        css_properties: &["border-color"],
        description: "Stroke color of borders",
    },
    PropertyClassEntry {
        id: P::Outline,
        label: "Outline",
        css_properties: &["outline-color"],
        description: "Focus ring color",
    },
    PropertyClassEntry {
        id: P::Shadow,
        label: "Shadow",
        css_properties: &["box-shadow"],
        description: "Elevation shadow",
    },
    PropertyClassEntry {
        id: P::SpacingInline,
        label: "Inline spacing",
        css_properties: &["padding-inline"],
        description: "Horizontal padding",
    },
    PropertyClassEntry {
        id: P::SpacingBlock,
        label: "Block spacing",
        css_properties: &["padding-block"],
        description: "Vertical padding",
    },
    PropertyClassEntry {
        id: P::Gap,
        label: "Gap",
        css_properties: &["gap"],
        description: "Space between children",
    },
    PropertyClassEntry {
        id: P::Sizing,
        label: "Sizing",
        css_properties: &["width", "height"],
        description: "Element dimensions",
    },
    PropertyClassEntry {
        id: P::Radius,
        label: "Radius",
        css_properties: &["border-radius"],
        description: "Corner rounding",
    },
];

const CONTEXTS: &[UxContextEntry] = &[
    UxContextEntry {
        id: UxContext::Action,
        description: "Interactive controls that trigger something",
        required_classes: &[P::Background, P::Text, P::Border],
        allowed_classes: &[
            P::Background,
            P::Text,
            P::Icon,
            P::Border,
            P::Outline,
            P::Shadow,
            P::SpacingInline,
            P::SpacingBlock,
            P::Gap,
            P::Sizing,
            P::Radius,
        ],
        components: &["button", "icon-button", "link", "toggle", "fab"],
    },
    UxContextEntry {
        id: UxContext::Input,
        description: "Form controls that accept data",
        required_classes: &[P::Background, P::Text, P::Border, P::Outline],
        allowed_classes: &[
            P::Background,
            P::Text,
            P::Icon,
            P::Border,
            P::Outline,
            P::SpacingInline,
            P::SpacingBlock,
            P::Gap,
            P::Sizing,
            P::Radius,
        ],
        components: &["text-field", "select", "checkbox", "radio", "switch", "slider"],
    },
    UxContextEntry {
        id: UxContext::Surface,
        description: "Containers and layers that hold content",
        required_classes: &[P::Background, P::Border, P::Shadow],
        allowed_classes: &[
            P::Background,
            P::Text,
            P::Border,
            P::Shadow,
            P::SpacingInline,
            P::SpacingBlock,
            P::Gap,
            P::Radius,
        ],
        components: &["card", "modal", "popover", "sheet", "tooltip"],
    },
    UxContextEntry {
        id: UxContext::Feedback,
        description: "Status communication to the user",
        required_classes: &[P::Background, P::Text, P::Icon],
        allowed_classes: &[
            P::Background,
            P::Text,
            P::Icon,
            P::Border,
            P::SpacingInline,
            P::SpacingBlock,
            P::Gap,
            P::Radius,
        ],
        components: &["alert", "toast", "badge", "banner", "progress"],
    },
    UxContextEntry {
        id: UxContext::Navigation,
        description: "Wayfinding between views",
        required_classes: &[P::Background, P::Text],
        allowed_classes: &[
            P::Background,
            P::Text,
            P::Icon,
            P::Border,
            P::Outline,
            P::SpacingInline,
            P::SpacingBlock,
            P::Gap,
        ],
        components: &["tabs", "menu", "breadcrumb", "sidebar", "pagination"],
    },
    UxContextEntry {
        id: UxContext::Data,
        description: "Structured data display",
        required_classes: &[P::Text, P::Border],
        allowed_classes: &[
            P::Background,
            P::Text,
            P::Icon,
            P::Border,
            P::SpacingInline,
            P::SpacingBlock,
            P::Gap,
            P::Sizing,
        ],
        components: &["table", "list", "chart", "tree", "avatar"],
    },
];

const STATES: &[StateEntry] = &[
    StateEntry {
        id: InteractionState::Default,
        description: "Resting state",
    },
    StateEntry {
        id: InteractionState::Hover,
        description: "Pointer is over the element",
    },
    StateEntry {
        id: InteractionState::Active,
        description: "Element is being pressed",
    },
    StateEntry {
        id: InteractionState::Focus,
        description: "Element has keyboard focus",
    },
    StateEntry {
        id: InteractionState::Disabled,
        description: "Element cannot be interacted with",
    },
    StateEntry {
        id: InteractionState::Selected,
        description: "Element is chosen or current",
    },
];

const MODIFIERS: &[ModifierEntry] = &[
    ModifierEntry {
        id: EmphasisModifier::Default,
        description: "Normal emphasis",
    },
    ModifierEntry {
        id: EmphasisModifier::Strong,
        description: "Higher emphasis",
    },
    ModifierEntry {
        id: EmphasisModifier::Soft,
        description: "Lower emphasis",
    },
    ModifierEntry {
        id: EmphasisModifier::Plain,
        description: "No fill, content only",
    },
];

const INTENT_DESCRIPTIONS: &[(&str, &str)] = &[
    ("base", "Neutral baseline"),
    ("accent", "Brand emphasis"),
    ("muted", "De-emphasized content"),
    ("inverted", "Contrasting surfaces"),
    ("success", "Positive outcome"),
    ("warning", "Needs attention"),
    ("danger", "Destructive action or error"),
    ("info", "Informational"),
];

const PROPERTY_ALIASES: &[(&str, PropertyClass)] = &[
    ("bg", P::Background),
    ("fill", P::Background),
    ("color", P::Text),
    ("fg", P::Text),
    ("foreground", P::Text),
    ("font", P::Text),
    ("stroke", P::Border),
    ("ring", P::Outline),
    ("focus-ring", P::Outline),
    ("elevation", P::Shadow),
    ("px", P::SpacingInline),
    ("padding-x", P::SpacingInline),
    ("py", P::SpacingBlock),
    ("padding-y", P::SpacingBlock),
    ("gutter", P::Gap),
    ("size", P::Sizing),
    ("width", P::Sizing),
    ("height", P::Sizing),
    ("rounded", P::Radius),
    ("corner", P::Radius),
];

const INTENT_ALIASES: &[(&str, &str)] = &[
    ("primary", "accent"),
    ("brand", "accent"),
    ("secondary", "muted"),
    ("subtle", "muted"),
    ("error", "danger"),
    ("critical", "danger"),
    ("destructive", "danger"),
    ("positive", "success"),
    ("caution", "warning"),
    ("warn", "warning"),
    ("neutral", "base"),
    ("inverse", "inverted"),
    ("informational", "info"),
];

const CONTEXT_ALIASES: &[(&str, UxContext)] = &[
    ("button", UxContext::Action),
    ("btn", UxContext::Action),
    ("cta", UxContext::Action),
    ("form", UxContext::Input),
    ("field", UxContext::Input),
    ("card", UxContext::Surface),
    ("container", UxContext::Surface),
    ("page", UxContext::Surface),
    ("alert", UxContext::Feedback),
    ("notification", UxContext::Feedback),
    ("status", UxContext::Feedback),
    ("nav", UxContext::Navigation),
    ("menu", UxContext::Navigation),
    ("table", UxContext::Data),
    ("chart", UxContext::Data),
];

const STATE_ALIASES: &[(&str, InteractionState)] = &[
    ("hovered", InteractionState::Hover),
    ("pressed", InteractionState::Active),
    ("focused", InteractionState::Focus),
    ("inactive", InteractionState::Disabled),
    ("checked", InteractionState::Selected),
    ("current", InteractionState::Selected),
    ("rest", InteractionState::Default),
    ("idle", InteractionState::Default),
];

/// Immutable naming ontology
///
/// Construct once (usually via [`Ontology::standard`]) and share by
/// reference; nothing mutates it after construction.
#[derive(Debug, Clone)]
pub struct Ontology {
    intents: Vec<IntentEntry>,
    property_aliases: HashMap<&'static str, PropertyClass>,
    intent_aliases: HashMap<&'static str, Intent>,
    context_aliases: HashMap<&'static str, UxContext>,
    state_aliases: HashMap<&'static str, InteractionState>,
    lenient: LenientConfig,
}

impl Default for Ontology {
    fn default() -> Self {
        Self::standard()
    }
}

impl Ontology {
    /// Built-in catalogs and alias tables with default lenient scoring
    #[must_use]
    pub fn standard() -> Self {
        let intents = INTENT_DESCRIPTIONS
            .iter()
            .filter_map(|&(id, description)| {
                Intent::from_id(id).map(|id| IntentEntry { id, description })
            })
            .collect();

        let intent_aliases = INTENT_ALIASES
            .iter()
            .filter_map(|(alias, id)| Intent::from_id(id).map(|intent| (*alias, intent)))
            .collect();

        Self {
            intents,
            property_aliases: PROPERTY_ALIASES.iter().copied().collect(),
            intent_aliases,
            context_aliases: CONTEXT_ALIASES.iter().copied().collect(),
            state_aliases: STATE_ALIASES.iter().copied().collect(),
            lenient: LenientConfig::default(),
        }
    }

    /// With lenient scoring configuration
    #[inline]
    #[must_use]
    pub fn with_lenient_config(mut self, config: LenientConfig) -> Self {
        self.lenient = config;
        self
    }

    /// Lenient scoring configuration
    #[inline]
    #[must_use]
    pub fn lenient_config(&self) -> &LenientConfig {
        &self.lenient
    }

    // Catalogs

    /// Property class catalog
    #[inline]
    #[must_use]
    pub fn property_classes(&self) -> &'static [PropertyClassEntry] {
        PROPERTY_CLASSES
    }

    /// Intent catalog
    #[inline]
    #[must_use]
    pub fn intents(&self) -> &[IntentEntry] {
        &self.intents
    }

    /// UX context catalog
    #[inline]
    #[must_use]
    pub fn contexts(&self) -> &'static [UxContextEntry] {
        CONTEXTS
    }

    /// Interaction state catalog
    #[inline]
    #[must_use]
    pub fn states(&self) -> &'static [StateEntry] {
        STATES
    }

    /// Emphasis modifier catalog
    #[inline]
    #[must_use]
    pub fn modifiers(&self) -> &'static [ModifierEntry] {
        MODIFIERS
    }

    /// Metadata for one property class
    #[must_use]
    pub fn property_class(&self, id: PropertyClass) -> Option<&'static PropertyClassEntry> {
        PROPERTY_CLASSES.iter().find(|e| e.id == id)
    }

    /// Metadata for one UX context
    #[must_use]
    pub fn context(&self, id: UxContext) -> Option<&'static UxContextEntry> {
        CONTEXTS.iter().find(|e| e.id == id)
    }

    /// Classes required for complete coverage of `context`
    #[must_use]
    pub fn required_classes(&self, context: UxContext) -> &'static [PropertyClass] {
        self.context(context).map_or(&[], |e| e.required_classes)
    }

    /// Whether `class` belongs to the surface of `context`
    #[must_use]
    pub fn context_allows(&self, context: UxContext, class: PropertyClass) -> bool {
        self.context(context)
            .is_some_and(|e| e.allowed_classes.contains(&class))
    }

    // Alias lookups

    /// Property class by alias (exact identifiers are not aliases)
    #[inline]
    #[must_use]
    pub fn property_alias(&self, alias: &str) -> Option<PropertyClass> {
        self.property_aliases.get(alias).copied()
    }

    /// Intent by alias
    #[inline]
    #[must_use]
    pub fn intent_alias(&self, alias: &str) -> Option<Intent> {
        self.intent_aliases.get(alias).cloned()
    }

    /// UX context by alias
    #[inline]
    #[must_use]
    pub fn context_alias(&self, alias: &str) -> Option<UxContext> {
        self.context_aliases.get(alias).copied()
    }

    /// Interaction state by alias
    #[inline]
    #[must_use]
    pub fn state_alias(&self, alias: &str) -> Option<InteractionState> {
        self.state_aliases.get(alias).copied()
    }

    /// Whether `segment` is an identifier or alias on any axis
    #[must_use]
    pub fn is_known_segment(&self, segment: &str) -> bool {
        PropertyClass::from_id(segment).is_some()
            || UxContext::from_id(segment).is_some()
            || Intent::from_id(segment).is_some()
            || EmphasisModifier::from_id(segment).is_some()
            || InteractionState::from_id(segment).is_some()
            || self.property_aliases.contains_key(segment)
            || self.intent_aliases.contains_key(segment)
            || self.context_aliases.contains_key(segment)
            || self.state_aliases.contains_key(segment)
    }

    // Components

    /// Resolve a component name to its context and property surface
    ///
    /// Exact registry names match first, then substring matches in either
    /// direction (`primary-button` finds `button`).
    #[must_use]
    pub fn resolve_component(&self, component: &str) -> Option<ComponentSurface> {
        components::resolve(CONTEXTS, component)
    }

    /// Human description of a structured name
    #[must_use]
    pub fn describe(&self, name: &SemanticTokenName) -> String {
        let class_label = self
            .property_class(name.property_class)
            .map_or(name.property_class.as_str(), |e| e.description);

        let mut parts = vec![class_label.to_string()];
        if let Some(context) = name.ux_context {
            parts.push(format!("in {context} elements"));
        }
        parts.push(format!("{} intent", name.intent));
        let modifier = name.effective_modifier();
        if !modifier.is_default() {
            parts.push(format!("{modifier} emphasis"));
        }
        let state = name.effective_state();
        if !state.is_default() {
            parts.push(format!("{state} state"));
        }
        parts.join(", ")
    }
}
