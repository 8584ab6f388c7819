//! Reference rewriting must be exhaustive and precise: after rewriting
//! `old` to `new`, no `{old}` occurrence survives and unrelated references
//! are left alone.

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use semtok_token::reference::{embedded_references, references_path, rewrite_references};

fn segment() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,6}"
}

fn token_path() -> impl Strategy<Value = String> {
    proptest::collection::vec(segment(), 1..4).prop_map(|s| s.join("."))
}

proptest! {
    #[test]
    fn prop_rewrite_removes_every_old_reference(
        old in token_path(),
        new in token_path(),
        other in token_path(),
        prefix in "[a-z0-9 ]{0,8}",
    ) {
        prop_assume!(old != other && new != old);

        let text = format!("{prefix}{{{old}}} {{{other}}} {{{old}}}");
        let rewritten = rewrite_references(&text, &old, &new).expect("text references old");

        prop_assert!(!embedded_references(&rewritten).any(|p| p == old));
        prop_assert!(references_path(&rewritten, &new));
        prop_assert!(references_path(&rewritten, &other));
    }

    #[test]
    fn prop_rewrite_is_noop_without_reference(
        old in token_path(),
        other in token_path(),
    ) {
        prop_assume!(old != other);
        let text = format!("{{{other}}}");
        prop_assert!(rewrite_references(&text, &old, "x").is_none());
    }
}

#[test]
fn rewrite_keeps_surrounding_text() {
    let text = "calc({spacing.base} * 2) {spacing.base}";
    let rewritten = rewrite_references(text, "spacing.base", "spacing.unit").expect("references old");
    assert_eq!(rewritten, "calc({spacing.unit} * 2) {spacing.unit}");
}
