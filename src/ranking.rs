//! Bounded best-k selection over `(frequency, text)` candidates.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A ranked candidate sentence.
///
/// Ordering is rank order: `a < b` means `a` is suggested before `b`. Higher
/// frequency ranks first; equal frequencies fall back to ascending byte order of
/// the text, which places `' '` before every letter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suggestion {
    pub text: String,
    pub frequency: u32,
}

impl Suggestion {
    pub fn new(text: impl Into<String>, frequency: u32) -> Self {
        Self {
            text: text.into(),
            frequency,
        }
    }
}

#[inline]
fn rank(a_freq: u32, a_text: &[u8], b_freq: u32, b_text: &[u8]) -> Ordering {
    b_freq.cmp(&a_freq).then_with(|| a_text.cmp(b_text))
}

impl Ord for Suggestion {
    fn cmp(&self, other: &Self) -> Ordering {
        rank(
            self.frequency,
            self.text.as_bytes(),
            other.frequency,
            other.text.as_bytes(),
        )
    }
}

impl PartialOrd for Suggestion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Keeps the best `k` suggestions seen so far.
///
/// Backed by a max-heap under rank order, so the heap top is the worst kept
/// candidate and is the one evicted when a better candidate arrives.
#[derive(Clone, Debug)]
pub struct TopK {
    k: usize,
    heap: BinaryHeap<Suggestion>,
}

impl TopK {
    pub fn new(k: usize) -> Self {
        Self {
            k,
            heap: BinaryHeap::with_capacity(k.saturating_add(1).min(64)),
        }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.heap.len() >= self.k
    }

    /// Frequency of the worst kept candidate, once `k` candidates are held.
    pub fn threshold(&self) -> Option<u32> {
        if self.is_full() {
            self.heap.peek().map(|s| s.frequency)
        } else {
            None
        }
    }

    /// Whether a candidate would be kept by [`TopK::push`].
    ///
    /// Lets callers avoid materializing a `String` for candidates that lose.
    pub fn would_accept(&self, frequency: u32, text: &[u8]) -> bool {
        if self.k == 0 {
            return false;
        }
        if !self.is_full() {
            return true;
        }
        match self.heap.peek() {
            Some(worst) => {
                rank(frequency, text, worst.frequency, worst.text.as_bytes()) == Ordering::Less
            }
            None => true,
        }
    }

    pub fn push(&mut self, candidate: Suggestion) {
        if self.k == 0 {
            return;
        }
        self.heap.push(candidate);
        if self.heap.len() > self.k {
            self.heap.pop();
        }
    }

    /// Kept candidates, best first.
    pub fn into_sorted_vec(self) -> Vec<Suggestion> {
        self.heap.into_sorted_vec()
    }

    pub fn into_texts(self) -> Vec<String> {
        self.into_sorted_vec().into_iter().map(|s| s.text).collect()
    }
}

impl Extend<Suggestion> for TopK {
    fn extend<I: IntoIterator<Item = Suggestion>>(&mut self, iter: I) {
        for s in iter {
            self.push(s);
        }
    }
}
