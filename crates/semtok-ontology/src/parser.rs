//! Strict and lenient name parsers
//!
//! The strict parser accepts only canonical identifiers in canonical order.
//! The lenient parser recovers structure from non-compliant paths through
//! alias tables and prefix skipping, scoring its own certainty with the
//! formula in [`LenientConfig::confidence`].

use crate::axes::{Axis, EmphasisModifier, Intent, InteractionState, PropertyClass, UxContext};
use crate::error::{OntologyError, Result};
use crate::name::SemanticTokenName;
use crate::registry::Ontology;
use serde::{Deserialize, Serialize};

/// Characters that separate path segments
pub const SEPARATORS: &[char] = &['.', '/', '-'];

/// Split a path into its non-empty segments
pub fn split_segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(SEPARATORS).filter(|s| !s.is_empty())
}

/// Scoring constants of the lenient parser
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LenientConfig {
    /// Starting confidence of any non-strict parse
    pub base_confidence: f64,
    /// Penalty per alias used on any axis
    pub alias_penalty: f64,
    /// Penalty per skipped namespace prefix
    pub prefix_penalty: f64,
    /// Additional penalty per alias on a non-property axis
    pub non_property_alias_penalty: f64,
    /// Lowest confidence ever reported
    pub floor: f64,
}

impl Default for LenientConfig {
    fn default() -> Self {
        Self {
            base_confidence: 0.95,
            alias_penalty: 0.05,
            prefix_penalty: 0.08,
            non_property_alias_penalty: 0.03,
            floor: 0.30,
        }
    }
}

impl LenientConfig {
    /// Confidence of a lenient parse
    ///
    /// `aliases` counts every alias used, `non_property_aliases` the subset
    /// used on axes other than the property class.
    #[must_use]
    pub fn confidence(&self, aliases: usize, prefixes: usize, non_property_aliases: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let raw = self.base_confidence
            - self.alias_penalty * aliases as f64
            - self.prefix_penalty * prefixes as f64
            - self.non_property_alias_penalty * non_property_aliases as f64;
        let rounded = (raw * 1000.0).round() / 1000.0;
        rounded.clamp(self.floor, 1.0)
    }
}

/// How a lenient parse arrived at its result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseStrategy {
    /// Path was already canonical
    Strict,
    /// First segment normalized, rest canonical
    FirstSegment,
    /// Property class found by scanning
    Scan,
}

/// One alias normalization applied during a lenient parse
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasUse {
    /// Axis the alias belongs to
    pub axis: Axis,
    /// Segment as written
    pub alias: String,
    /// Canonical identifier it mapped to
    pub canonical: String,
}

/// Result of a lenient parse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LenientParse {
    /// Inferred structured name
    pub name: SemanticTokenName,
    /// Certainty in `[floor, 1.0]`
    pub confidence: f64,
    /// Strategy that produced the name
    pub strategy: ParseStrategy,
    /// Aliases applied
    pub aliases: Vec<AliasUse>,
    /// Namespace segments skipped before the property class
    pub skipped_prefix: Vec<String>,
    /// Tail segments that matched no axis
    pub unrecognized: Vec<String>,
}

impl LenientParse {
    /// Canonical path of the inferred name
    #[inline]
    #[must_use]
    pub fn suggested_path(&self) -> String {
        self.name.build_path()
    }
}

/// Property class located at a segment position
struct ClassHit {
    class: PropertyClass,
    width: usize,
    alias: Option<String>,
}

impl Ontology {
    /// Parse a canonical path
    ///
    /// Returns `None` when the first segment is not a property class, when
    /// no intent can be determined, or when segments remain unconsumed.
    #[must_use]
    pub fn parse_strict(&self, path: &str) -> Option<SemanticTokenName> {
        let segments: Vec<&str> = split_segments(path).collect();
        let hit = exact_class_at(&segments, 0)?;
        self.strict_tail(hit.class, &segments[hit.width..])
    }

    /// Parse a canonical path, reporting why it failed
    ///
    /// # Errors
    /// Returns [`OntologyError::NonCanonical`] when [`Self::parse_strict`]
    /// yields nothing.
    pub fn try_parse_strict(&self, path: &str) -> Result<SemanticTokenName> {
        self.parse_strict(path)
            .ok_or_else(|| OntologyError::NonCanonical(path.to_string()))
    }

    /// Whether `path` is exactly the canonical rendering of its parse
    #[must_use]
    pub fn is_canonical(&self, path: &str) -> bool {
        self.parse_strict(path)
            .is_some_and(|name| name.build_path() == path)
    }

    /// Best-effort parse of a non-compliant path
    ///
    /// Returns `None` only when no property class signal (identifier or
    /// alias) appears anywhere in the path.
    #[must_use]
    pub fn parse_lenient(&self, path: &str) -> Option<LenientParse> {
        if let Some(name) = self.parse_strict(path) {
            return Some(LenientParse {
                name,
                confidence: 1.0,
                strategy: ParseStrategy::Strict,
                aliases: Vec::new(),
                skipped_prefix: Vec::new(),
                unrecognized: Vec::new(),
            });
        }

        let lowered: Vec<String> = split_segments(path).map(str::to_ascii_lowercase).collect();
        let segments: Vec<&str> = lowered.iter().map(String::as_str).collect();

        if let Some(parse) = self.parse_first_segment(&segments) {
            return Some(parse);
        }

        self.parse_scan(&segments)
    }

    /// Like [`Self::parse_lenient`], with a typed failure
    ///
    /// # Errors
    /// Returns [`OntologyError::NoPropertyClass`] when nothing in the path
    /// signals a property class.
    pub fn try_parse_lenient(&self, path: &str) -> Result<LenientParse> {
        self.parse_lenient(path)
            .ok_or_else(|| OntologyError::NoPropertyClass(path.to_string()))
    }

    fn strict_tail(&self, class: PropertyClass, tail: &[&str]) -> Option<SemanticTokenName> {
        let mut i = 0;

        let context = tail.first().and_then(|s| UxContext::from_id(s));
        if context.is_some() {
            i += 1;
        }

        let segment = *tail.get(i)?;
        let intent = match Intent::from_id(segment) {
            Some(intent) => intent,
            // Ad-hoc intents only without a context, and never an identifier of another axis.
            None if context.is_none() && is_identifier(segment) && !self.is_known_segment(segment) => {
                Intent::Custom(segment.to_string())
            }
            None => return None,
        };
        i += 1;

        let modifier = tail.get(i).and_then(|s| EmphasisModifier::from_id(s));
        if modifier.is_some() {
            i += 1;
        }

        let state = tail.get(i).and_then(|s| InteractionState::from_id(s));
        if state.is_some() {
            i += 1;
        }

        if i != tail.len() {
            return None;
        }

        Some(SemanticTokenName {
            property_class: class,
            ux_context: context,
            intent,
            modifier,
            state,
        })
    }

    fn parse_first_segment(&self, segments: &[&str]) -> Option<LenientParse> {
        let hit = exact_class_at(segments, 0).or_else(|| self.alias_class_at(segments, 0))?;
        let name = self.strict_tail(hit.class, &segments[hit.width..])?;

        let aliases: Vec<AliasUse> = hit
            .alias
            .map(|alias| AliasUse {
                axis: Axis::PropertyClass,
                alias,
                canonical: hit.class.as_str().to_string(),
            })
            .into_iter()
            .collect();

        Some(LenientParse {
            name,
            confidence: self.lenient_config().confidence(aliases.len(), 0, 0),
            strategy: ParseStrategy::FirstSegment,
            aliases,
            skipped_prefix: Vec::new(),
            unrecognized: Vec::new(),
        })
    }

    fn parse_scan(&self, segments: &[&str]) -> Option<LenientParse> {
        let (position, hit) = (0..segments.len()).find_map(|i| {
            exact_class_at(segments, i)
                .or_else(|| self.alias_class_at(segments, i))
                .map(|hit| (i, hit))
        })?;

        let mut aliases = Vec::new();
        if let Some(alias) = hit.alias {
            aliases.push(AliasUse {
                axis: Axis::PropertyClass,
                alias,
                canonical: hit.class.as_str().to_string(),
            });
        }

        let mut context: Option<(UxContext, &str)> = None;
        let mut intent: Option<Intent> = None;
        let mut modifier: Option<EmphasisModifier> = None;
        let mut state: Option<InteractionState> = None;
        let mut unrecognized = Vec::new();

        for &segment in &segments[position + hit.width..] {
            if context.is_none() {
                if let Some(found) = UxContext::from_id(segment) {
                    context = Some((found, segment));
                    continue;
                }
                if let Some(found) = self.context_alias(segment) {
                    aliases.push(alias_use(Axis::UxContext, segment, found.as_str()));
                    context = Some((found, segment));
                    continue;
                }
            }
            if intent.is_none() {
                if let Some(found) = Intent::from_id(segment) {
                    intent = Some(found);
                    continue;
                }
                if let Some(found) = self.intent_alias(segment) {
                    aliases.push(alias_use(Axis::Intent, segment, found.as_str()));
                    intent = Some(found);
                    continue;
                }
            }
            if modifier.is_none() {
                if let Some(found) = EmphasisModifier::from_id(segment) {
                    modifier = Some(found);
                    continue;
                }
            }
            if state.is_none() {
                if let Some(found) = InteractionState::from_id(segment) {
                    state = Some(found);
                    continue;
                }
                if let Some(found) = self.state_alias(segment) {
                    aliases.push(alias_use(Axis::State, segment, found.as_str()));
                    state = Some(found);
                    continue;
                }
            }
            unrecognized.push(segment.to_string());
        }

        let intent = match intent {
            Some(intent) => intent,
            None => match context.and_then(|(_, segment)| self.intent_alias(segment)) {
                Some(found) => {
                    context = None;
                    found
                }
                None => Intent::Base,
            },
        };

        let non_property = aliases
            .iter()
            .filter(|a| a.axis != Axis::PropertyClass)
            .count();
        let skipped_prefix: Vec<String> = segments[..position].iter().map(|s| (*s).to_string()).collect();

        Some(LenientParse {
            name: SemanticTokenName {
                property_class: hit.class,
                ux_context: context.map(|(c, _)| c),
                intent,
                modifier,
                state,
            },
            confidence: self
                .lenient_config()
                .confidence(aliases.len(), skipped_prefix.len(), non_property),
            strategy: ParseStrategy::Scan,
            aliases,
            skipped_prefix,
            unrecognized,
        })
    }

    fn alias_class_at(&self, segments: &[&str], i: usize) -> Option<ClassHit> {
        if let Some(next) = segments.get(i + 1) {
            let compound = format!("{}-{next}", segments[i]);
            if let Some(class) = self.property_alias(&compound) {
                return Some(ClassHit {
                    class,
                    width: 2,
                    alias: Some(compound),
                });
            }
        }
        let segment = segments.get(i)?;
        self.property_alias(segment).map(|class| ClassHit {
            class,
            width: 1,
            alias: Some((*segment).to_string()),
        })
    }
}

fn exact_class_at(segments: &[&str], i: usize) -> Option<ClassHit> {
    if let Some(next) = segments.get(i + 1) {
        if let Some(class) = PropertyClass::from_id(&format!("{}-{next}", segments[i])) {
            return Some(ClassHit {
                class,
                width: 2,
                alias: None,
            });
        }
    }
    segments
        .get(i)
        .and_then(|s| PropertyClass::from_id(s))
        .map(|class| ClassHit {
            class,
            width: 1,
            alias: None,
        })
}

fn alias_use(axis: Axis, alias: &str, canonical: &str) -> AliasUse {
    AliasUse {
        axis,
        alias: alias.to_string(),
        canonical: canonical.to_string(),
    }
}

fn is_identifier(segment: &str) -> bool {
    segment
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}
