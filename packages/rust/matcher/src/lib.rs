//! Major classification: free-text selection → canonical majors.
//!
//! Two steps:
//! 1. [`normalize_selection`] cleans a raw selection string and splits it
//!    into candidate tokens.
//! 2. [`MajorMatcher`] resolves those tokens against the taxonomy through
//!    tiered substring rules with a bounded fuzzy fallback.
//!
//! The matcher holds no mutable state, so one instance can serve any number
//! of threads.

mod normalize;
mod resolve;
mod set;

pub use normalize::{UNSPECIFIED, normalize_selection};
pub use resolve::{MajorMatcher, Resolution};
pub use set::MajorSet;

/// Resolve a raw selection string with the built-in taxonomy.
pub fn resolve_majors(text: &str) -> MajorSet {
    MajorMatcher::default().resolve_selection(text).majors
}
