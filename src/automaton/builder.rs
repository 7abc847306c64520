use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, trace};
use smallvec::SmallVec;

use super::char_trait::MatchChar;
use super::config::Config;
use super::error::LoadError;
use super::search::Automaton;
use super::state::{PatternId, State, StateId};

/// Trait for types that can be used as a pattern (or a pattern lookup key).
///
/// Implemented for common string and sequence types so that
/// [`Builder::add_pattern`] and [`build_automaton`] accept them directly.
pub trait IntoPattern<C: MatchChar> {
    /// Collects this pattern into a symbol buffer.
    fn collect_pattern(self) -> SmallVec<[C; 32]>;
}

// String types → char

impl IntoPattern<char> for &str {
    fn collect_pattern(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoPattern<char> for &&str {
    fn collect_pattern(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoPattern<char> for String {
    fn collect_pattern(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

impl IntoPattern<char> for &String {
    fn collect_pattern(self) -> SmallVec<[char; 32]> {
        self.chars().collect()
    }
}

// Generic sequence types → C

impl<C: MatchChar> IntoPattern<C> for &[C] {
    fn collect_pattern(self) -> SmallVec<[C; 32]> {
        self.iter().copied().collect()
    }
}

impl<C: MatchChar> IntoPattern<C> for Vec<C> {
    fn collect_pattern(self) -> SmallVec<[C; 32]> {
        self.into_iter().collect()
    }
}

impl<C: MatchChar> IntoPattern<C> for &Vec<C> {
    fn collect_pattern(self) -> SmallVec<[C; 32]> {
        self.iter().copied().collect()
    }
}

impl<C: MatchChar, const N: usize> IntoPattern<C> for [C; N] {
    fn collect_pattern(self) -> SmallVec<[C; 32]> {
        self.into_iter().collect()
    }
}

impl<C: MatchChar, const N: usize> IntoPattern<C> for &[C; N] {
    fn collect_pattern(self) -> SmallVec<[C; 32]> {
        self.iter().copied().collect()
    }
}

/// Incrementally builds the pattern trie and compiles it into an [`Automaton`].
///
/// Patterns may be added in any order. The trie has no failure links until
/// [`build`](Builder::build) runs, so a `Builder` cannot be searched; that is
/// only possible on the `Automaton` it produces.
///
/// # Examples
///
/// ```
/// use libaho::automaton::Builder;
///
/// let mut builder = Builder::new();
/// for pattern in ["he", "she", "his", "hers"] {
///     builder.add_pattern(pattern);
/// }
/// let automaton = builder.build();
///
/// let report = automaton.search("ushers");
/// assert_eq!(report.get("she"), Some(&[1][..]));
/// assert_eq!(report.get("hers"), Some(&[2][..]));
/// assert_eq!(report.get("his"), None);
/// ```
#[derive(Clone, Debug)]
pub struct Builder<C: MatchChar> {
    config: Config,
    states: Vec<State<C>>,
    patterns: Vec<Box<[C]>>,
}

impl<C: MatchChar> Default for Builder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: MatchChar> Builder<C> {
    /// Creates an empty builder with the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates an empty builder with the given configuration.
    pub fn with_config(config: Config) -> Self {
        let mut states = Vec::with_capacity(config.get_capacity().max(1));
        states.push(State::new(0));
        Builder {
            config,
            states,
            patterns: Vec::new(),
        }
    }

    pub(crate) fn from_parts(
        config: Config,
        states: Vec<State<C>>,
        patterns: Vec<Box<[C]>>,
    ) -> Self {
        Builder {
            config,
            states,
            patterns,
        }
    }

    /// Inserts a pattern into the trie and returns its id.
    ///
    /// Re-inserting a pattern that is already present is a no-op returning the
    /// id it was first given. The empty pattern is accepted and marks the root;
    /// whether it is ever reported depends on [`Config::empty_pattern`].
    pub fn add_pattern(&mut self, pattern: impl IntoPattern<C>) -> PatternId {
        let pattern = pattern.collect_pattern();
        let mut current = StateId::ROOT;
        for (i, &ch) in pattern.iter().enumerate() {
            current = match self.states[current.as_usize()].transitions.get(ch) {
                Some(next) => next,
                None => self.push_state(current, ch, i + 1),
            };
        }

        let state = &mut self.states[current.as_usize()];
        if let Some(id) = state.terminal {
            return id;
        }
        let id = PatternId::new(self.patterns.len());
        state.terminal = Some(id);
        trace!("pattern {id} {pattern:?} ends at state {}", current.as_usize());
        self.patterns.push(pattern.into_vec().into_boxed_slice());
        id
    }

    fn push_state(&mut self, parent: StateId, ch: C, depth: usize) -> StateId {
        let id = StateId::new(self.states.len());
        self.states.push(State::new(depth));
        self.states[parent.as_usize()].transitions.insert(ch, id);
        id
    }

    /// Returns the number of distinct patterns inserted so far.
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Returns the number of trie states, including the root.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Computes failure links and output sets and returns the searchable automaton.
    ///
    /// Every link and output set is recomputed from scratch, so a builder
    /// obtained from [`Automaton::into_builder`] can be extended and rebuilt.
    pub fn build(mut self) -> Automaton<C> {
        self.compile();
        debug!(
            "compiled automaton: {} states, {} patterns",
            self.states.len(),
            self.patterns.len()
        );
        Automaton::from_parts(self.config, self.states, self.patterns)
    }

    fn compile(&mut self) {
        for state in &mut self.states {
            state.failure = StateId::ROOT;
            state.outputs = state.terminal.into_iter().collect();
        }

        // Depth-one states fail to the root, which was just reset for all states.
        let mut queue: VecDeque<StateId> = self.states[StateId::ROOT.as_usize()]
            .transitions
            .iter()
            .map(|(_, child)| child)
            .collect();

        while let Some(parent) = queue.pop_front() {
            let edges: SmallVec<[(C, StateId); 4]> =
                self.states[parent.as_usize()].transitions.iter().collect();
            for (ch, child) in edges {
                let failure = self.failure_target(parent, ch);
                // The root's outputs hold at most the empty pattern, which is
                // reported by policy rather than by inheritance.
                let inherited = if failure.is_root() {
                    SmallVec::new()
                } else {
                    self.states[failure.as_usize()].outputs.clone()
                };
                let state = &mut self.states[child.as_usize()];
                state.failure = failure;
                // Inherited patterns are strictly shorter than this state's own,
                // so the union is disjoint.
                state.outputs.extend(inherited);
                queue.push_back(child);
            }
        }
    }

    /// Follows the parent's failure chain to the deepest state with an edge on `ch`.
    fn failure_target(&self, parent: StateId, ch: C) -> StateId {
        let mut state = self.states[parent.as_usize()].failure;
        loop {
            let candidate = &self.states[state.as_usize()];
            if let Some(next) = candidate.transitions.get(ch) {
                return next;
            }
            if state.is_root() {
                return StateId::ROOT;
            }
            state = candidate.failure;
        }
    }
}

/// Builds a compiled automaton from an iterator of patterns.
///
/// Each pattern must implement [`IntoPattern`], so `&str`, `String`, slices,
/// vectors and arrays are all accepted.
///
/// # Examples
///
/// Building from strings:
///
/// ```
/// use libaho::automaton::build_automaton;
///
/// let automaton = build_automaton(["a", "ab", "bab", "bc", "bca", "c", "caa"]);
/// let report = automaton.search("abccab");
///
/// assert_eq!(report.get("a"), Some(&[0, 4][..]));
/// assert_eq!(report.get("c"), Some(&[2, 3][..]));
/// assert_eq!(report.get("caa"), None);
/// assert_eq!(report.len(), 4);
/// ```
///
/// Building from byte sequences:
///
/// ```
/// use libaho::automaton::build_automaton;
///
/// let automaton = build_automaton([vec![1u8, 2], vec![2, 3]]);
/// let report = automaton.search([1u8, 2, 3, 1, 2]);
/// assert_eq!(report.get([1u8, 2]), Some(&[0, 3][..]));
/// assert_eq!(report.get([2u8, 3]), Some(&[1][..]));
/// ```
pub fn build_automaton<C, P>(patterns: impl IntoIterator<Item = P>) -> Automaton<C>
where
    C: MatchChar,
    P: IntoPattern<C>,
{
    build_automaton_with_config(patterns, Config::default())
}

/// Like [`build_automaton`], with an explicit [`Config`].
pub fn build_automaton_with_config<C, P>(
    patterns: impl IntoIterator<Item = P>,
    config: Config,
) -> Automaton<C>
where
    C: MatchChar,
    P: IntoPattern<C>,
{
    let mut builder = Builder::with_config(config);
    for pattern in patterns {
        builder.add_pattern(pattern);
    }
    builder.build()
}

/// Builds an automaton from a pattern file.
///
/// Reads one pattern per line. Trailing whitespace is trimmed, empty lines are
/// skipped and lines starting with '#' are treated as comments.
///
/// # Examples
///
/// ```no_run
/// use libaho::automaton::builder::build_from_file;
/// use libaho::automaton::Config;
///
/// let automaton = build_from_file("signatures.txt", Config::default()).unwrap();
/// ```
pub fn build_from_file(
    path: impl AsRef<Path>,
    config: Config,
) -> Result<Automaton<char>, LoadError> {
    let path = path.as_ref();
    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(io_err)?;
    let mut reader = BufReader::new(file);
    let mut builder = Builder::with_config(config);

    // Reuse one line buffer for the whole file instead of allocating per line.
    let mut buf = String::with_capacity(80);
    while reader.read_line(&mut buf).map_err(io_err)? > 0 {
        let pattern = buf.trim_end();
        if !pattern.is_empty() && !is_comment(pattern) {
            builder.add_pattern(pattern);
        }
        buf.clear();
    }
    debug!(
        "loaded {} patterns from {}",
        builder.pattern_count(),
        path.display()
    );
    Ok(builder.build())
}

/// Returns true if this line is a comment.
pub(crate) fn is_comment(line: &str) -> bool {
    line.trim_start().starts_with('#')
}

#[cfg(test)]
mod test {
    use std::io::Write;

    use super::*;

    #[test]
    fn shared_prefixes_share_states() {
        let mut builder = Builder::new();
        builder.add_pattern("ABCDEF");
        assert_eq!(builder.state_count(), "ABCDEF".len() + 1);

        builder.add_pattern("ABC");
        builder.add_pattern("ABCDXY");
        assert_eq!(builder.state_count(), "ABCDEF".len() + 1 + 2);
        assert_eq!(builder.pattern_count(), 3);
    }

    #[test]
    fn unicode_patterns_are_split_by_char() {
        let mut builder = Builder::new();
        builder.add_pattern("授人以鱼");
        builder.add_pattern("授人以渔");
        assert_eq!(builder.state_count(), 1 + 3 + 2);
    }

    #[test]
    fn reinserting_a_pattern_is_idempotent() {
        let mut builder = Builder::new();
        let first = builder.add_pattern("hers");
        let states = builder.state_count();
        let second = builder.add_pattern(String::from("hers"));
        assert_eq!(first, second);
        assert_eq!(builder.pattern_count(), 1);
        assert_eq!(builder.state_count(), states);

        let automaton = builder.build();
        assert_eq!(automaton.search("hershers").get("hers"), Some(&[0, 4][..]));
    }

    #[test]
    fn pattern_ids_follow_insertion_order() {
        let mut builder = Builder::new();
        assert_eq!(builder.add_pattern("b").as_usize(), 0);
        assert_eq!(builder.add_pattern("a").as_usize(), 1);
        assert_eq!(builder.add_pattern("b").as_usize(), 0);
        assert_eq!(builder.add_pattern("ab").as_usize(), 2);
    }

    #[test]
    fn empty_pattern_marks_root() {
        let mut builder = Builder::new();
        let id = builder.add_pattern("");
        assert_eq!(builder.state_count(), 1);
        let automaton = builder.build();
        assert_eq!(automaton.root().terminal(), Some(id));
        assert!(automaton.search("abc").is_empty());
    }

    #[test]
    fn prefix_pattern_inserted_after_extension() {
        let mut builder = Builder::new();
        builder.add_pattern("abcd");
        let states = builder.state_count();
        builder.add_pattern("ab");
        assert_eq!(builder.state_count(), states);
        let automaton = builder.build();
        let report = automaton.search("xabcd");
        assert_eq!(report.get("ab"), Some(&[1][..]));
        assert_eq!(report.get("abcd"), Some(&[1][..]));
    }

    #[test]
    fn generic_automaton_with_u8() {
        let mut builder = Builder::<u8>::new();
        builder.add_pattern([1, 2, 3]);
        builder.add_pattern(&[2, 3][..]);
        builder.add_pattern(vec![3]);
        let automaton = builder.build();
        let report = automaton.search(&[0u8, 1, 2, 3, 3][..]);
        assert_eq!(report.get([1u8, 2, 3]), Some(&[1][..]));
        assert_eq!(report.get([2u8, 3]), Some(&[2][..]));
        assert_eq!(report.get([3u8]), Some(&[3, 4][..]));
    }

    #[test]
    fn capacity_hint_does_not_change_result() {
        let config = Config::new().capacity(1024);
        let automaton = build_automaton_with_config(["he", "she"], config.clone());
        assert_eq!(automaton.config(), &config);
        assert_eq!(automaton.search("she").len(), 2);
    }

    #[test]
    fn comment_that_starts_with_pound() {
        assert!(is_comment("# This is a comment"));
    }

    #[test]
    fn comment_with_whitespace_before_pound() {
        assert!(is_comment("        # This is a comment with whitespace"));
    }

    #[test]
    fn non_comment() {
        assert!(!is_comment("REVERBERATE"));
        assert!(!is_comment(" REVERBERATE"));
    }

    #[test]
    fn build_from_file_skips_comments_and_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "# signatures\nhe\r\n\nshe   \n  # his\nhers\n").unwrap();
        file.flush().unwrap();

        let automaton = build_from_file(file.path(), Config::default()).unwrap();
        assert_eq!(automaton.pattern_count(), 3);
        assert!(automaton.pattern_id("his").is_none());
        assert!(automaton.pattern_id("she").is_some());

        let report = automaton.search("ushers");
        assert_eq!(report.get("she"), Some(&[1][..]));
        assert_eq!(report.get("he"), Some(&[2][..]));
        assert_eq!(report.get("hers"), Some(&[2][..]));
    }

    #[test]
    fn build_from_missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        let err = build_from_file(&path, Config::default()).unwrap_err();
        let LoadError::Io { path: err_path, source } = &err;
        assert_eq!(err_path, &path);
        assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn build_from_file_rejects_invalid_utf8() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"ok\n\xff\xfe\n").unwrap();
        file.flush().unwrap();

        let err = build_from_file(file.path(), Config::default()).unwrap_err();
        let LoadError::Io { source, .. } = err;
        assert_eq!(source.kind(), std::io::ErrorKind::InvalidData);
    }
}
