//! Naming law property tests
//!
//! Round-trip between structured names and canonical paths, and the
//! monotonicity of lenient confidence.

use proptest::prelude::*;
use semtok_ontology::{
    EmphasisModifier, Intent, InteractionState, LenientConfig, Ontology, PropertyClass,
    SemanticTokenName, UxContext,
};

fn arb_class() -> impl Strategy<Value = PropertyClass> {
    prop::sample::select(PropertyClass::ALL.to_vec())
}

fn arb_context() -> impl Strategy<Value = Option<UxContext>> {
    prop::option::of(prop::sample::select(UxContext::ALL.to_vec()))
}

fn arb_catalog_intent() -> impl Strategy<Value = Intent> {
    prop::sample::select(Intent::CATALOG.to_vec())
}

fn arb_modifier() -> impl Strategy<Value = Option<EmphasisModifier>> {
    prop::option::of(prop::sample::select(vec![
        EmphasisModifier::Strong,
        EmphasisModifier::Soft,
        EmphasisModifier::Plain,
    ]))
}

fn arb_state() -> impl Strategy<Value = Option<InteractionState>> {
    prop::option::of(prop::sample::select(vec![
        InteractionState::Hover,
        InteractionState::Active,
        InteractionState::Focus,
        InteractionState::Disabled,
        InteractionState::Selected,
    ]))
}

proptest! {
    #[test]
    fn prop_strict_round_trip(
        class in arb_class(),
        context in arb_context(),
        intent in arb_catalog_intent(),
        modifier in arb_modifier(),
        state in arb_state(),
    ) {
        let ontology = Ontology::standard();
        let name = SemanticTokenName { property_class: class, ux_context: context, intent, modifier, state };

        let path = name.build_path();
        let parsed = ontology.parse_strict(&path);

        prop_assert_eq!(parsed, Some(name));
        prop_assert!(ontology.is_canonical(&path));
    }

    #[test]
    fn prop_custom_intent_round_trip(
        class in arb_class(),
        custom in "q[a-z]{2,6}",
        state in arb_state(),
    ) {
        let ontology = Ontology::standard();
        let mut name = SemanticTokenName::new(class, Intent::Custom(custom));
        name.state = state;

        let parsed = ontology.parse_strict(&name.build_path());
        prop_assert_eq!(parsed, Some(name));
    }

    #[test]
    fn prop_confidence_decreases_with_aliases(aliases in 0usize..4, prefixes in 0usize..3) {
        let config = LenientConfig::default();
        let fewer = config.confidence(aliases, prefixes, 0);
        let more = config.confidence(aliases + 1, prefixes, 0);
        prop_assert!(more < fewer);
        prop_assert!(more >= config.floor);
        prop_assert!(fewer <= 1.0);
    }

    #[test]
    fn prop_confidence_decreases_with_prefixes(aliases in 0usize..3, prefixes in 0usize..4) {
        let config = LenientConfig::default();
        let fewer = config.confidence(aliases, prefixes, 0);
        let more = config.confidence(aliases, prefixes + 1, 0);
        prop_assert!(more < fewer);
    }

    #[test]
    fn prop_confidence_is_bounded(a in 0usize..50, p in 0usize..50, n in 0usize..50) {
        let config = LenientConfig::default();
        let c = config.confidence(a, p, n.min(a));
        prop_assert!((0.30..=1.0).contains(&c));
    }

    #[test]
    fn prop_lenient_never_panics(path in "[a-zA-Z0-9./-]{0,40}") {
        let ontology = Ontology::standard();
        if let Some(parse) = ontology.parse_lenient(&path) {
            prop_assert!(parse.confidence >= 0.30 && parse.confidence <= 1.0);
        }
    }
}

#[test]
fn prefixes_lower_confidence_on_real_paths() {
    let ontology = Ontology::standard();
    let direct = ontology.parse_lenient("bg.accent").unwrap();
    let one = ontology.parse_lenient("ds.bg.accent").unwrap();
    let two = ontology.parse_lenient("ds.core.bg.accent").unwrap();

    assert!(direct.confidence > one.confidence);
    assert!(one.confidence > two.confidence);
    assert_eq!(two.skipped_prefix, vec!["ds", "core"]);
    assert_eq!(two.suggested_path(), "background.accent");
}
