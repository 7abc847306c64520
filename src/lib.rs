//! # libaho
//!
//! An [Aho-Corasick](https://en.wikipedia.org/wiki/Aho%E2%80%93Corasick_algorithm)
//! multi-pattern matching automaton for Rust.
//!
//! Patterns are inserted into a trie, which is then compiled by a breadth-first
//! pass that gives every state a failure link (the longest proper suffix of its
//! prefix that is also in the trie) and inherits output sets along those links.
//! A compiled [`Automaton`](automaton::Automaton) scans a text once and reports
//! every occurrence of every pattern, overlapping and nested ones included, in
//! O(text length + matches).
//!
//! ## Features
//!
//! - **Generic over symbol type**: works with `char`, `u8`, `u16`, or any type
//!   implementing [`MatchChar`](automaton::MatchChar)
//! - **Unicode-aware**: `&str` text is scanned by `char`, so reported offsets are
//!   character offsets and multi-byte sequences are never split
//! - **Arena-allocated**: states live in one vector; failure links are indices
//! - **Thread-safe**: a compiled automaton is immutable and `Send + Sync`
//!
//! ## Quick Start
//!
//! ```
//! use libaho::automaton::build_automaton;
//!
//! let automaton = build_automaton(["he", "she", "his", "hers"]);
//! let report = automaton.search("ushers");
//!
//! assert_eq!(report.get("she"), Some(&[1][..]));
//! assert_eq!(report.get("he"), Some(&[2][..]));
//! assert_eq!(report.get("hers"), Some(&[2][..]));
//! assert_eq!(report.get("his"), None);
//! ```
//!
//! Building incrementally, and adding patterns after a build:
//!
//! ```
//! use libaho::automaton::Builder;
//!
//! let mut builder = Builder::new();
//! builder.add_pattern("abc");
//! let automaton = builder.build();
//! assert!(!automaton.is_match("xbcd"));
//!
//! let mut builder = automaton.into_builder();
//! builder.add_pattern("bcd");
//! let automaton = builder.build();
//! assert!(automaton.is_match("xbcd"));
//! ```
//!
//! ## Generic Usage
//!
//! ```
//! use libaho::automaton::build_automaton;
//!
//! let automaton = build_automaton([[0xde_u8, 0xad], [0xbe, 0xef]]);
//! let offsets: Vec<usize> = automaton
//!     .find_iter([0x00_u8, 0xde, 0xad, 0xbe, 0xef])
//!     .map(|m| m.start())
//!     .collect();
//! assert_eq!(offsets, [1, 3]);
//! ```

#![warn(missing_docs)]

/// Core automaton: builder, compiled automaton, states and configuration.
pub mod automaton;
