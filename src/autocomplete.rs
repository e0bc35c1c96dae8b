//! Typeahead service: ranked suggestions per keystroke, history on commit.

use std::collections::HashMap;

use log::{debug, trace, warn};

use crate::alphabet::{encode, Path, Symbol};
use crate::error::{Error, Result};
use crate::index::{NodeId, PrefixIndex};

/// Configuration for [`AutocompleteSystem`].
#[derive(Debug, Clone)]
pub struct AutocompleteConfig {
    /// Number of suggestions returned per keystroke
    pub max_suggestions: usize,
    /// Character that commits the pending buffer as a finished sentence.
    /// Must lie outside the sentence alphabet.
    pub commit: char,
}

impl Default for AutocompleteConfig {
    fn default() -> Self {
        Self {
            max_suggestions: 3,
            commit: '#',
        }
    }
}

/// Where the pending buffer sits in the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    At(NodeId),
    /// The pending buffer is not a prefix of any indexed sentence.
    Off,
}

/// A search-box autocomplete service.
///
/// Characters are fed one at a time with [`AutocompleteSystem::input`]. Each
/// keystroke returns the most frequent historical sentences that start with
/// everything typed since the last commit; the commit character records the
/// typed sentence and resets the buffer.
///
/// ```rust
/// use memds::AutocompleteSystem;
///
/// let mut ac = AutocompleteSystem::new(&["island", "ironman"], &[3, 2]);
/// assert_eq!(ac.input('i'), vec!["island", "ironman"]);
/// assert_eq!(ac.input('r'), vec!["ironman"]);
/// assert!(ac.input('#').is_empty());
/// assert_eq!(ac.frequency("ir"), Some(1));
/// ```
#[derive(Debug, Clone)]
pub struct AutocompleteSystem {
    config: AutocompleteConfig,
    index: PrefixIndex,
    history: HashMap<String, u32>,
    pending: String,
    cursor: Cursor,
}

impl AutocompleteSystem {
    /// Builds the service from seed sentences and their counts.
    ///
    /// # Panics
    ///
    /// Panics if the seeds are rejected by [`AutocompleteSystem::try_new`].
    pub fn new<S: AsRef<str>>(sentences: &[S], times: &[u32]) -> Self {
        Self::with_config(sentences, times, AutocompleteConfig::default())
    }

    /// # Panics
    ///
    /// Panics if the seeds are rejected by [`AutocompleteSystem::try_with_config`].
    pub fn with_config<S: AsRef<str>>(
        sentences: &[S],
        times: &[u32],
        config: AutocompleteConfig,
    ) -> Self {
        Self::try_with_config(sentences, times, config)
            .unwrap_or_else(|e| panic!("invalid autocomplete seed: {e}"))
    }

    pub fn try_new<S: AsRef<str>>(sentences: &[S], times: &[u32]) -> Result<Self> {
        Self::try_with_config(sentences, times, AutocompleteConfig::default())
    }

    /// Builds the service, validating the seeds.
    ///
    /// Fails when the slices differ in length, a count is zero, or a sentence
    /// contains a character outside `[a-z ]`. A sentence seeded twice keeps the
    /// later count.
    pub fn try_with_config<S: AsRef<str>>(
        sentences: &[S],
        times: &[u32],
        config: AutocompleteConfig,
    ) -> Result<Self> {
        if sentences.len() != times.len() {
            return Err(Error::LengthMismatch {
                sentences: sentences.len(),
                times: times.len(),
            });
        }

        let mut index = PrefixIndex::new();
        let mut history = HashMap::with_capacity(sentences.len());
        for (sentence, &count) in sentences.iter().zip(times) {
            let sentence = sentence.as_ref();
            if count == 0 {
                return Err(Error::ZeroFrequency {
                    sentence: sentence.to_string(),
                });
            }
            let path = encode(sentence)?;
            index.insert(&path, count);
            history.insert(sentence.to_string(), count);
        }
        debug!(
            "seeded autocomplete with {} sentences ({} index nodes)",
            history.len(),
            index.node_count()
        );

        Ok(Self {
            config,
            index,
            history,
            pending: String::new(),
            cursor: Cursor::At(NodeId::ROOT),
        })
    }

    /// Feeds one keystroke.
    ///
    /// The commit character records the pending sentence and returns an empty
    /// list. Any other alphabet character extends the pending buffer and
    /// returns up to `max_suggestions` matching sentences, best first.
    /// Characters outside the alphabet are ignored.
    pub fn input(&mut self, c: char) -> Vec<String> {
        match self.try_input(c) {
            Ok(suggestions) => suggestions,
            Err(e) => {
                warn!("ignoring keystroke: {e}");
                Vec::new()
            }
        }
    }

    /// Like [`AutocompleteSystem::input`], but reports out-of-alphabet
    /// characters. A rejected keystroke leaves all state untouched.
    pub fn try_input(&mut self, c: char) -> Result<Vec<String>> {
        if c == self.config.commit {
            self.commit();
            return Ok(Vec::new());
        }

        let sym = Symbol::from_char(c).ok_or(Error::InvalidSymbol {
            ch: c,
            position: self.pending.len(),
        })?;
        self.pending.push(c);
        self.cursor = match self.cursor {
            Cursor::At(node) => self.index.child(node, sym).map_or(Cursor::Off, Cursor::At),
            Cursor::Off => Cursor::Off,
        };

        let suggestions = match self.cursor {
            Cursor::At(node) => self
                .index
                .top_k(node, &self.pending, self.config.max_suggestions)
                .into_texts(),
            Cursor::Off => Vec::new(),
        };
        trace!("prefix {:?} -> {:?}", self.pending, suggestions);
        Ok(suggestions)
    }

    fn commit(&mut self) {
        let sentence = std::mem::take(&mut self.pending);
        self.cursor = Cursor::At(NodeId::ROOT);

        // Only alphabet characters ever reach the pending buffer.
        let path: Path = sentence.chars().filter_map(Symbol::from_char).collect();
        let count = self.history.entry(sentence).or_insert(0);
        *count = count.saturating_add(1);
        let count = *count;

        let node = self.index.insert(&path, count);
        debug!("committed sentence of {} symbols, count now {count}", path.len());
        debug_assert_eq!(self.index.terminal_frequency(node), count);
    }

    /// Ranked suggestions for an arbitrary prefix, without touching the
    /// pending buffer.
    pub fn suggest(&self, prefix: &str) -> Vec<String> {
        let Ok(path) = encode(prefix) else {
            return Vec::new();
        };
        match self.index.descend(&path) {
            Some(node) => self
                .index
                .top_k(node, prefix, self.config.max_suggestions)
                .into_texts(),
            None => Vec::new(),
        }
    }

    /// Historical count of `sentence`, if it was ever seeded or committed.
    pub fn frequency(&self, sentence: &str) -> Option<u32> {
        self.history.get(sentence).copied()
    }

    /// Characters typed since the last commit.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Number of distinct sentences in the history.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// `(sentence, count)` pairs in unspecified order.
    pub fn history(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.history.iter().map(|(s, &c)| (s.as_str(), c))
    }

    pub fn index(&self) -> &PrefixIndex {
        &self.index
    }

    pub fn config(&self) -> &AutocompleteConfig {
        &self.config
    }

    /// Approximate heap bytes held by the index, history and pending buffer.
    pub fn memory_usage(&self) -> usize {
        let history_bytes: usize = self
            .history
            .keys()
            .map(|k| k.capacity() + std::mem::size_of::<(String, u32)>())
            .sum();
        self.index.memory_usage() + history_bytes + self.pending.capacity()
    }
}
