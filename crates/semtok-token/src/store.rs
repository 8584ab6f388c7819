//! Token store seam
//!
//! [`TokenStore`] is the boundary to whatever owns the tokens (file loader,
//! editor session, test fixture). Analyzers borrow it read-only; the
//! migration executor borrows it mutably and edits in place.

use crate::error::{Result, TokenError};
use crate::reference;
use crate::token::Token;
use crate::value::TokenValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Path-keyed token collection owned by the caller
///
/// Implementations must keep paths unique: `insert` replaces any token
/// already stored under the same path.
pub trait TokenStore {
    /// Lookup by path
    fn get(&self, path: &str) -> Option<&Token>;

    /// Mutable lookup by path
    fn get_mut(&mut self, path: &str) -> Option<&mut Token>;

    /// Insert or replace the token stored under `token.path`
    fn insert(&mut self, token: Token) -> Option<Token>;

    /// Remove by path
    fn remove(&mut self, path: &str) -> Option<Token>;

    /// Iterate over all tokens
    fn iter(&self) -> Box<dyn Iterator<Item = &Token> + '_>;

    /// Number of tokens
    fn len(&self) -> usize;

    /// Whether the store is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether a token exists at `path`
    fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// All paths, in iteration order
    fn paths(&self) -> Vec<String> {
        self.iter().map(|t| t.path.clone()).collect()
    }

    /// Remove every token
    fn clear(&mut self) {
        for path in self.paths() {
            self.remove(&path);
        }
    }
}

/// In-memory store preserving insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryTokenStore {
    tokens: IndexMap<String, Token>,
}

impl MemoryTokenStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from `(path, raw value)` pairs, inferring kinds
    #[must_use]
    pub fn from_raw<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        pairs
            .into_iter()
            .map(|(path, raw)| Token::from_raw(path, raw))
            .collect()
    }
}

impl FromIterator<Token> for MemoryTokenStore {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        let mut store = Self::new();
        for token in iter {
            store.insert(token);
        }
        store
    }
}

impl TokenStore for MemoryTokenStore {
    #[inline]
    fn get(&self, path: &str) -> Option<&Token> {
        self.tokens.get(path)
    }

    #[inline]
    fn get_mut(&mut self, path: &str) -> Option<&mut Token> {
        self.tokens.get_mut(path)
    }

    #[inline]
    fn insert(&mut self, token: Token) -> Option<Token> {
        self.tokens.insert(token.path.clone(), token)
    }

    #[inline]
    fn remove(&mut self, path: &str) -> Option<Token> {
        self.tokens.shift_remove(path)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &Token> + '_> {
        Box::new(self.tokens.values())
    }

    #[inline]
    fn len(&self) -> usize {
        self.tokens.len()
    }

    fn clear(&mut self) {
        self.tokens.clear();
    }
}

/// Maximum hops followed by [`resolve_value`]
const MAX_ALIAS_HOPS: usize = 32;

/// Literal value of the token at `path`, following pure references
///
/// Uses `resolved_value` when present, otherwise walks pure and bare-path
/// references. Returns `None` for missing tokens, cycles, and values with
/// embedded references that were never resolved.
#[must_use]
pub fn resolve_value(store: &dyn TokenStore, path: &str) -> Option<TokenValue> {
    let mut current = store.get(path)?;
    for _ in 0..MAX_ALIAS_HOPS {
        if let Some(resolved) = &current.resolved_value {
            return Some(resolved.clone());
        }
        let Some(text) = current.value.as_text() else {
            return Some(current.value.clone());
        };
        let targets = reference::extract_references(&current.path, text, |p| store.contains(p));
        if targets.is_empty() {
            return Some(current.value.clone());
        }
        let target = match reference::pure_reference(text) {
            Some(target) => target,
            None if targets.len() == 1 && text.trim() == targets[0] => text.trim(),
            None => return None,
        };
        current = store.get(target)?;
    }
    None
}

/// Move the token at `from` to `to`, keeping its value
///
/// # Errors
/// [`TokenError::NotFound`] if `from` is absent, [`TokenError::AlreadyExists`]
/// if `to` is occupied. The store is unchanged on error.
pub fn move_token(store: &mut dyn TokenStore, from: &str, to: &str) -> Result<()> {
    if from == to {
        return if store.contains(from) {
            Ok(())
        } else {
            Err(TokenError::NotFound(from.to_string()))
        };
    }
    if store.contains(to) {
        return Err(TokenError::AlreadyExists(to.to_string()));
    }
    let mut token = store
        .remove(from)
        .ok_or_else(|| TokenError::NotFound(from.to_string()))?;
    token.path = to.to_string();
    store.insert(token);
    Ok(())
}

/// Insert `token` only if its path is free
///
/// # Errors
/// [`TokenError::AlreadyExists`] if the path is occupied.
pub fn insert_new(store: &mut dyn TokenStore, token: Token) -> Result<()> {
    if store.contains(&token.path) {
        return Err(TokenError::AlreadyExists(token.path));
    }
    store.insert(token);
    Ok(())
}

/// Deep copy of every token, in iteration order
#[must_use]
pub fn export_tokens(store: &dyn TokenStore) -> Vec<Token> {
    store.iter().cloned().collect()
}

/// Replace the whole store content with `tokens`
pub fn replace_tokens(store: &mut dyn TokenStore, tokens: impl IntoIterator<Item = Token>) {
    store.clear();
    for token in tokens {
        store.insert(token);
    }
}

/// Outcome of a resolution pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionSummary {
    /// Reference-bearing tokens that received a resolved value
    pub resolved: Vec<String>,

    /// Reference-bearing tokens whose chain never reached a literal
    pub unresolved: Vec<String>,
}

/// Rewrite `resolved_value` for every reference-bearing token
///
/// Resolution is transitive and cycle-safe: the pass iterates to a fixed
/// point, so tokens on a cycle (or pointing at missing paths) simply stay
/// unresolved. `value` is never touched.
pub fn resolve_references(store: &mut dyn TokenStore) -> ResolutionSummary {
    struct Pending {
        path: String,
        text: String,
        targets: Vec<String>,
        pure: bool,
    }

    let mut known: HashMap<String, TokenValue> = HashMap::new();
    let mut pending: Vec<Pending> = Vec::new();

    {
        let view: &dyn TokenStore = &*store;
        for token in view.iter() {
            let targets = match token.value.as_text() {
                Some(text) => reference::extract_references(&token.path, text, |p| view.contains(p)),
                None => Vec::new(),
            };

            if targets.is_empty() {
                known.insert(token.path.clone(), token.value.clone());
            } else {
                let text = token.raw_text();
                let pure = targets.len() == 1
                    && (reference::pure_reference(&text).is_some() || text.trim() == targets[0]);
                pending.push(Pending {
                    path: token.path.clone(),
                    text,
                    targets,
                    pure,
                });
            }
        }
    }

    // Each round resolves at least one more link of every live chain.
    let mut resolved_paths: Vec<String> = Vec::new();
    loop {
        let mut progressed = false;
        pending.retain(|item| {
            let value = if item.pure {
                known.get(&item.targets[0]).cloned()
            } else {
                reference::substitute_references(&item.text, |p| known.get(p).map(ToString::to_string))
                    .map(|s| TokenValue::infer(&s))
            };

            match value {
                Some(value) => {
                    known.insert(item.path.clone(), value);
                    resolved_paths.push(item.path.clone());
                    progressed = true;
                    false
                }
                None => true,
            }
        });

        if !progressed || pending.is_empty() {
            break;
        }
    }

    for path in &resolved_paths {
        if let (Some(value), Some(token)) = (known.get(path), store.get_mut(path)) {
            token.resolved_value = Some(value.clone());
        }
    }

    ResolutionSummary {
        resolved: resolved_paths,
        unresolved: pending.into_iter().map(|p| p.path).collect(),
    }
}
