/// Trie builder, failure-link compiler and pattern-file loader.
pub mod builder;
/// Trait for types that can serve as transition labels.
pub mod char_trait;
/// Build options.
pub mod config;
/// Error types.
pub mod error;
/// The compiled automaton and its search operations.
pub mod search;
/// State identifiers and the borrowed state view.
pub mod state;
/// Compact sorted edge storage for trie states.
pub(crate) mod transitions;

pub use builder::{build_automaton, build_automaton_with_config, Builder, IntoPattern};
pub use char_trait::MatchChar;
pub use config::{Config, EmptyPattern};
pub use error::LoadError;
pub use search::{Automaton, FindIter, IntoText, Match, SearchReport};
pub use state::{PatternId, StateId, StateRef};
