//! Two-level bitmap of released pool ids.
//!
//! ```text
//! summary: [s0][s1]...          bit j of s_i set <=> words[i*64 + j] != 0
//! words:   [w0][w1][w2]...      bit b of w_k set <=> id k*64 + b is released
//! ```
//!
//! `first` scans the summary, so finding the least id costs one word per 4096
//! ids of range rather than one per 64.

const WORD_BITS: usize = 64;

#[inline]
fn split(id: u32) -> (usize, u64) {
    let id = id as usize;
    (id / WORD_BITS, 1u64 << (id % WORD_BITS))
}

/// Ordered set of `u32` ids backed by a two-level bitmap.
///
/// Storage grows on demand up to the largest id ever inserted.
#[derive(Clone, Default)]
pub struct ReleasedSet {
    words: Vec<u64>,
    summary: Vec<u64>,
    len: usize,
}

impl ReleasedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sizes storage for ids in `0..ids`.
    pub fn with_capacity(ids: usize) -> Self {
        let words = ids.div_ceil(WORD_BITS);
        Self {
            words: Vec::with_capacity(words),
            summary: Vec::with_capacity(words.div_ceil(WORD_BITS)),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn contains(&self, id: u32) -> bool {
        let (w, mask) = split(id);
        self.words.get(w).is_some_and(|&word| word & mask != 0)
    }

    /// Adds `id`. Returns `false` if it was already present.
    pub fn insert(&mut self, id: u32) -> bool {
        let (w, mask) = split(id);
        if w >= self.words.len() {
            self.words.resize(w + 1, 0);
            self.summary.resize(self.words.len().div_ceil(WORD_BITS), 0);
        }

        let word = &mut self.words[w];
        if *word & mask != 0 {
            return false;
        }
        if *word == 0 {
            self.summary[w / WORD_BITS] |= 1u64 << (w % WORD_BITS);
        }
        *word |= mask;
        self.len += 1;
        true
    }

    /// Removes `id`. Returns `false` if it was not present.
    pub fn remove(&mut self, id: u32) -> bool {
        let (w, mask) = split(id);
        let Some(word) = self.words.get_mut(w) else {
            return false;
        };
        if *word & mask == 0 {
            return false;
        }
        *word &= !mask;
        if *word == 0 {
            self.summary[w / WORD_BITS] &= !(1u64 << (w % WORD_BITS));
        }
        self.len -= 1;
        true
    }

    /// Least id in the set.
    pub fn first(&self) -> Option<u32> {
        let (s, summary) = self
            .summary
            .iter()
            .enumerate()
            .find(|(_, bits)| **bits != 0)?;
        let w = s * WORD_BITS + summary.trailing_zeros() as usize;
        let bit = self.words[w].trailing_zeros() as usize;
        Some((w * WORD_BITS + bit) as u32)
    }

    pub fn pop_first(&mut self) -> Option<u32> {
        let id = self.first()?;
        self.remove(id);
        Some(id)
    }

    pub fn clear(&mut self) {
        self.words.clear();
        self.summary.clear();
        self.len = 0;
    }

    pub fn memory_usage(&self) -> usize {
        (self.words.capacity() + self.summary.capacity()) * std::mem::size_of::<u64>()
    }

    /// Ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.words.iter().enumerate().flat_map(|(w, &word)| {
            let mut bits = word;
            std::iter::from_fn(move || {
                if bits == 0 {
                    return None;
                }
                let bit = bits.trailing_zeros() as usize;
                bits &= bits - 1;
                Some((w * WORD_BITS + bit) as u32)
            })
        })
    }
}

impl std::fmt::Debug for ReleasedSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
