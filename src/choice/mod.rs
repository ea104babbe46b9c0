//! Tie-breaking for orderings the rules leave open.
//!
//! When two or more replacement effects rank equally, the engine asks the
//! snapshot's [`Chooser`] to pick one. A chooser must be a pure function of
//! its inputs: the same count and descriptions always give the same index.
//! That keeps resolution replayable even when an AI or a test supplies its
//! own policy.
//!
//! ```
//! use rules_core::choice::{Chooser, FirstChooser};
//!
//! let names = ["ward", "shield"];
//! let pick = FirstChooser.choose(names.len(), &|i| names[i].to_string());
//! assert_eq!(pick, 0);
//! ```

mod seeded;

pub use seeded::SeededChooser;

/// Picks one of `count` tied candidates.
///
/// `describe(i)` returns a human-readable description of candidate `i`.
/// The returned index must be below `count`; the engine rejects anything
/// else with [`ResolutionError::InvalidChoice`](crate::core::ResolutionError::InvalidChoice).
pub trait Chooser: std::fmt::Debug + Send + Sync {
    fn choose(&self, count: usize, describe: &dyn Fn(usize) -> String) -> usize;
}

/// Always picks the first candidate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FirstChooser;

impl Chooser for FirstChooser {
    fn choose(&self, _count: usize, _describe: &dyn Fn(usize) -> String) -> usize {
        0
    }
}
