//! Semtok Token Model
//!
//! Design tokens, the store seam, and the embedded reference grammar.
//!
//! # Core Concepts
//!
//! - [`Token`]: a named design decision keyed by its path
//! - [`TokenValue`]: tagged union over the supported token kinds
//! - [`TokenStore`]: caller-owned path → token mapping
//! - [`reference`]: the `{path}` micro-grammar shared by every consumer
//!
//! # Example
//!
//! ```rust
//! use semtok_token::{resolve_references, MemoryTokenStore, TokenStore};
//!
//! let mut store = MemoryTokenStore::from_raw([
//!     ("color.blue.500", "#3B82F6"),
//!     ("background.action.accent", "{color.blue.500}"),
//! ]);
//!
//! resolve_references(&mut store);
//! let token = store.get("background.action.accent").unwrap();
//! assert_eq!(token.effective_value().hex_color().as_deref(), Some("#3b82f6"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod error;
pub mod reference;
mod store;
mod token;
mod value;

// Re-exports
pub use error::{Result, TokenError};
pub use store::{
    export_tokens, insert_new, move_token, replace_tokens, resolve_references, resolve_value,
    MemoryTokenStore, ResolutionSummary, TokenStore,
};
pub use token::Token;
pub use value::{is_color_literal, parse_hex, Dimension, TokenKind, TokenValue};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for token operations
    pub use crate::{MemoryTokenStore, Token, TokenKind, TokenStore, TokenValue};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
