//! Naming axes
//!
//! The five orthogonal axes of a semantic token name. Each closed axis is an
//! enum with a stable kebab-case identifier; [`Intent`] additionally admits
//! ad-hoc values so non-catalog intents survive a strict parse.

use crate::error::OntologyError;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

macro_rules! closed_axis {
    (
        $(#[$meta:meta])*
        $name:ident, $axis:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $id:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "kebab-case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every value of this axis, in catalog order
            pub const ALL: &'static [Self] = &[ $( Self::$variant ),+ ];

            /// Stable identifier used in token paths
            #[inline]
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $id ),+
                }
            }

            /// Exact identifier lookup
            #[must_use]
            pub fn from_id(id: &str) -> Option<Self> {
                match id {
                    $( $id => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = OntologyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_id(s).ok_or_else(|| OntologyError::UnknownIdentifier {
                    axis: $axis,
                    id: s.to_string(),
                })
            }
        }
    };
}

closed_axis! {
    /// CSS destination of a token
    PropertyClass, "property class" {
        /// Fill behind content
        Background => "background",
        /// Text foreground
        Text => "text",
        /// Icon foreground
        Icon => "icon",
        /// Border stroke
        Border => "border",
        /// Focus ring / outline
        Outline => "outline",
        /// Elevation shadow
        Shadow => "shadow",
        /// Horizontal padding
        SpacingInline => "spacing-inline",
        /// Vertical padding
        SpacingBlock => "spacing-block",
        /// Gap between children
        Gap => "gap",
        /// Width / height
        Sizing => "sizing",
        /// Corner radius
        Radius => "radius",
    }
}

impl PropertyClass {
    /// Whether tokens of this class carry colors
    #[inline]
    #[must_use]
    pub fn is_color(self) -> bool {
        matches!(
            self,
            Self::Background | Self::Text | Self::Icon | Self::Border | Self::Outline | Self::Shadow
        )
    }

    /// Whether tokens of this class carry lengths
    #[inline]
    #[must_use]
    pub fn is_dimension(self) -> bool {
        matches!(
            self,
            Self::SpacingInline | Self::SpacingBlock | Self::Gap | Self::Sizing | Self::Radius
        )
    }

    /// Whether this class paints content on top of a background
    #[inline]
    #[must_use]
    pub fn is_foreground(self) -> bool {
        matches!(self, Self::Text | Self::Icon)
    }
}

closed_axis! {
    /// Component domain a token belongs to
    UxContext, "ux context" {
        /// Buttons, links, toggles
        Action => "action",
        /// Form controls
        Input => "input",
        /// Containers and layers
        Surface => "surface",
        /// Alerts, toasts, badges
        Feedback => "feedback",
        /// Tabs, menus, breadcrumbs
        Navigation => "navigation",
        /// Tables, lists, charts
        Data => "data",
    }
}

closed_axis! {
    /// Interaction state
    InteractionState, "interaction state" {
        /// Resting state
        Default => "default",
        /// Pointer over
        Hover => "hover",
        /// Pressed
        Active => "active",
        /// Keyboard focus
        Focus => "focus",
        /// Not interactive
        Disabled => "disabled",
        /// Chosen / current
        Selected => "selected",
    }
}

impl InteractionState {
    /// Whether this is the implied default state
    #[inline]
    #[must_use]
    pub fn is_default(self) -> bool {
        self == Self::Default
    }
}

closed_axis! {
    /// Emphasis modifier
    EmphasisModifier, "emphasis modifier" {
        /// Normal emphasis
        Default => "default",
        /// Higher emphasis
        Strong => "strong",
        /// Lower emphasis
        Soft => "soft",
        /// No fill
        Plain => "plain",
    }
}

impl EmphasisModifier {
    /// Whether this is the implied default modifier
    #[inline]
    #[must_use]
    pub fn is_default(self) -> bool {
        self == Self::Default
    }
}

/// Semantic meaning of a token
///
/// Catalog intents are closed; [`Intent::Custom`] carries an ad-hoc intent
/// recognized by the strict parser when no UX context is present.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Intent {
    /// Neutral baseline
    Base,
    /// Brand emphasis
    Accent,
    /// De-emphasized
    Muted,
    /// Inverted for dark/contrasting surfaces
    Inverted,
    /// Positive outcome
    Success,
    /// Needs attention
    Warning,
    /// Destructive or error
    Danger,
    /// Informational
    Info,
    /// Non-catalog intent
    Custom(String),
}

impl Intent {
    /// Catalog intents, in catalog order
    pub const CATALOG: &'static [Self] = &[
        Self::Base,
        Self::Accent,
        Self::Muted,
        Self::Inverted,
        Self::Success,
        Self::Warning,
        Self::Danger,
        Self::Info,
    ];

    /// Stable identifier used in token paths
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Base => "base",
            Self::Accent => "accent",
            Self::Muted => "muted",
            Self::Inverted => "inverted",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Info => "info",
            Self::Custom(id) => id,
        }
    }

    /// Exact catalog lookup (never yields [`Intent::Custom`])
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::CATALOG.iter().find(|i| i.as_str() == id).cloned()
    }

    /// Whether this intent is part of the catalog
    #[inline]
    #[must_use]
    pub fn is_catalog(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

impl Display for Intent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Intent {
    fn from(id: String) -> Self {
        Self::from_id(&id).unwrap_or(Self::Custom(id))
    }
}

impl From<Intent> for String {
    fn from(intent: Intent) -> Self {
        match intent {
            Intent::Custom(id) => id,
            other => other.as_str().to_string(),
        }
    }
}

/// Axis identifier, used when reporting alias normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Axis {
    /// [`PropertyClass`]
    PropertyClass,
    /// [`UxContext`]
    UxContext,
    /// [`Intent`]
    Intent,
    /// [`EmphasisModifier`]
    Modifier,
    /// [`InteractionState`]
    State,
}
