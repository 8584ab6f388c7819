//! Semtok Ontology
//!
//! Controlled multi-axis naming scheme for semantic design tokens.
//!
//! # Overview
//!
//! A canonical token path reads
//! `<property-class>[.<ux-context>].<intent>[.<modifier>][.<state>]`:
//! - **Axes**: closed catalogs of property classes, UX contexts, intents,
//!   interaction states, and emphasis modifiers
//! - **Ontology**: immutable registry of catalogs, alias tables, and
//!   component surfaces
//! - **Parsers**: a strict parser for canonical paths and a lenient parser
//!   that scores its own confidence on non-compliant names
//!
//! # Example
//!
//! ```rust
//! use semtok_ontology::{Intent, Ontology, PropertyClass, UxContext};
//!
//! let ontology = Ontology::standard();
//!
//! let name = ontology.parse_strict("background.action.accent.hover").unwrap();
//! assert_eq!(name.property_class, PropertyClass::Background);
//! assert_eq!(name.ux_context, Some(UxContext::Action));
//! assert_eq!(name.intent, Intent::Accent);
//!
//! let guess = ontology.parse_lenient("bg.button.primary").unwrap();
//! assert_eq!(guess.suggested_path(), "background.action.accent");
//! assert!(guess.confidence < 1.0);
//! ```

#![warn(missing_docs)]

pub mod axes;
pub mod components;
pub mod error;
pub mod name;
pub mod parser;
pub mod registry;

// Re-exports
pub use axes::{Axis, EmphasisModifier, Intent, InteractionState, PropertyClass, UxContext};
pub use components::ComponentSurface;
pub use error::{OntologyError, Result};
pub use name::{build_path, SemanticTokenName};
pub use parser::{split_segments, AliasUse, LenientConfig, LenientParse, ParseStrategy};
pub use registry::{IntentEntry, ModifierEntry, Ontology, PropertyClassEntry, StateEntry, UxContextEntry};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for naming operations
    pub use crate::{
        EmphasisModifier, Intent, InteractionState, LenientParse, Ontology, PropertyClass,
        SemanticTokenName, UxContext,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
