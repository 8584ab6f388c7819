//! Per-token parse view shared by the analyzers

use semtok_ontology::{Ontology, SemanticTokenName};
use semtok_token::{Token, TokenStore};

/// A token together with its structured name
#[derive(Debug, Clone)]
pub(crate) struct ParsedToken<'a> {
    pub(crate) token: &'a Token,
    pub(crate) name: SemanticTokenName,
    /// Strict parse succeeded
    pub(crate) compliant: bool,
}

/// Parse every token, strict first with lenient fallback
///
/// Tokens with no property class signal are left out.
pub(crate) fn parse_store<'a>(ontology: &Ontology, store: &'a dyn TokenStore) -> Vec<ParsedToken<'a>> {
    store
        .iter()
        .filter_map(|token| {
            if let Some(name) = ontology.parse_strict(&token.path) {
                return Some(ParsedToken {
                    token,
                    name,
                    compliant: true,
                });
            }
            ontology.parse_lenient(&token.path).map(|parse| ParsedToken {
                token,
                name: parse.name,
                compliant: false,
            })
        })
        .collect()
}
