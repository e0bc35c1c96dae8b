//! # memds
//!
//! Two small in-memory data structures:
//!
//! - [`AutocompleteSystem`]: a typeahead service. Characters arrive one at a
//!   time; each keystroke returns the three historically most frequent
//!   sentences sharing the typed prefix, and `#` records the typed sentence.
//! - [`PhoneDirectory`]: a pool of distinct ids from `[0, N)` with explicit
//!   release and availability checks.
//!
//! Both are single-threaded; [`SharedAutocomplete`] and [`SharedDirectory`]
//! wrap them in a coarse lock for use across threads.
//!
//! ## Example
//!
//! ```rust
//! use memds::{AutocompleteSystem, PhoneDirectory};
//!
//! let mut ac = AutocompleteSystem::new(
//!     &["i love you", "island", "ironman", "i love leetcode"],
//!     &[5, 3, 2, 2],
//! );
//! assert_eq!(ac.input('i'), vec!["i love you", "island", "i love leetcode"]);
//! assert_eq!(ac.input(' '), vec!["i love you", "i love leetcode"]);
//!
//! let mut dir = PhoneDirectory::new(3);
//! assert_eq!(dir.get(), 0);
//! assert!(!dir.check(0));
//! dir.release(0);
//! assert!(dir.check(0));
//! ```

#![warn(clippy::all)]

pub mod alphabet;
pub mod autocomplete;
pub mod directory;
pub mod error;
pub mod index;
pub mod ranking;
pub mod released;
pub mod shared;

pub use autocomplete::{AutocompleteConfig, AutocompleteSystem};
pub use directory::{PhoneDirectory, EXHAUSTED, MAX_CAPACITY};
pub use error::{Error, Result};
pub use index::PrefixIndex;
pub use ranking::{Suggestion, TopK};
pub use released::ReleasedSet;
pub use shared::{SharedAutocomplete, SharedDirectory};

#[cfg(test)]
mod proptests;
