/// How an inserted empty pattern is reported during a search.
///
/// The empty pattern trivially occurs everywhere, so reporting it is opt-in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EmptyPattern {
    /// The empty pattern is stored but never reported.
    #[default]
    Ignore,
    /// The empty pattern is reported once at every symbol index of the text,
    /// i.e. at `0..text_len`. An empty text still produces no matches.
    EveryPosition,
}

/// Options for building an [`Automaton`](super::Automaton).
///
/// # Examples
///
/// ```
/// use libaho::automaton::{Builder, Config, EmptyPattern};
///
/// let config = Config::new().empty_pattern(EmptyPattern::EveryPosition);
/// let mut builder = Builder::with_config(config);
/// builder.add_pattern("");
/// let automaton = builder.build();
///
/// let report = automaton.search("ab");
/// assert_eq!(report.get(""), Some(&[0, 1][..]));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    empty_pattern: EmptyPattern,
    capacity: usize,
}

impl Config {
    /// Returns the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how an inserted empty pattern is reported.
    pub fn empty_pattern(mut self, policy: EmptyPattern) -> Self {
        self.empty_pattern = policy;
        self
    }

    /// Sets the number of states to preallocate.
    pub fn capacity(mut self, states: usize) -> Self {
        self.capacity = states;
        self
    }

    /// Returns the empty-pattern policy.
    pub fn get_empty_pattern(&self) -> EmptyPattern {
        self.empty_pattern
    }

    /// Returns the state preallocation hint.
    pub fn get_capacity(&self) -> usize {
        self.capacity
    }
}
