//! The 27-symbol sentence alphabet.
//!
//! Symbols are numbered so that index order is the ranking tie-break order:
//!
//! ```text
//! index:  0    1    2   ...  26
//! char:  ' '  'a'  'b'  ... 'z'
//! ```
//!
//! A depth-first walk that visits children in index order therefore yields
//! sentences in ascending byte order, which is the order suggestions with equal
//! frequency are returned in.

use smallvec::SmallVec;

use crate::error::{Error, Result};

/// Encoded form of a sentence. Most sentences typed into a search box fit inline.
pub type Path = SmallVec<[Symbol; 32]>;

/// A single alphabet symbol: the space or one lowercase ASCII letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(u8);

impl Symbol {
    pub const ALPHABET_SIZE: usize = 27;
    pub const SPACE: Symbol = Symbol(0);

    #[inline]
    pub fn from_char(c: char) -> Option<Symbol> {
        match c {
            ' ' => Some(Self::SPACE),
            'a'..='z' => Some(Symbol(c as u8 - b'a' + 1)),
            _ => None,
        }
    }

    #[inline]
    pub fn from_index(index: usize) -> Option<Symbol> {
        if index < Self::ALPHABET_SIZE {
            Some(Symbol(index as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn to_byte(self) -> u8 {
        if self.0 == 0 {
            b' '
        } else {
            b'a' + self.0 - 1
        }
    }

    #[inline]
    pub fn to_char(self) -> char {
        self.to_byte() as char
    }
}

/// Encodes `s`, failing on the first character outside the alphabet.
pub fn encode(s: &str) -> Result<Path> {
    s.chars()
        .enumerate()
        .map(|(position, ch)| Symbol::from_char(ch).ok_or(Error::InvalidSymbol { ch, position }))
        .collect()
}

pub fn decode(path: &[Symbol]) -> String {
    path.iter().map(|s| s.to_char()).collect()
}
