//! Arena-backed prefix tree over the sentence alphabet.
//!
//! Node layout:
//!
//! ```text
//! [children: 27 x u32][terminal: u32][subtree_max: u32]
//! ```
//!
//! Children are indices into the node arena, `NULL` when absent. `terminal` is
//! the frequency of the sentence ending exactly at the node (0 = none).
//! `subtree_max` bounds every terminal frequency at or below the node and lets a
//! ranked lookup skip subtrees that cannot place.

use smallvec::SmallVec;

use crate::alphabet::Symbol;
use crate::ranking::{Suggestion, TopK};

const NULL: u32 = u32::MAX;

/// Handle to a node in a [`PrefixIndex`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    fn idx(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone)]
struct Node {
    children: [u32; Symbol::ALPHABET_SIZE],
    terminal: u32,
    subtree_max: u32,
}

impl Node {
    fn empty() -> Self {
        Self {
            children: [NULL; Symbol::ALPHABET_SIZE],
            terminal: 0,
            subtree_max: 0,
        }
    }
}

#[derive(Clone, Copy)]
struct Frame {
    node: u32,
    /// Next child slot to examine.
    next: u8,
}

/// Prefix index mapping sentences to their frequency.
///
/// Nodes are never removed. Overwriting a terminal with a smaller frequency
/// leaves `subtree_max` as a loose upper bound, which only weakens pruning.
#[derive(Clone)]
pub struct PrefixIndex {
    nodes: Vec<Node>,
    terminals: usize,
}

impl PrefixIndex {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::empty()],
            terminals: 0,
        }
    }

    /// Number of sentences with a non-zero frequency.
    pub fn len(&self) -> usize {
        self.terminals
    }

    pub fn is_empty(&self) -> bool {
        self.terminals == 0
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn memory_usage(&self) -> usize {
        self.nodes.capacity() * std::mem::size_of::<Node>()
    }

    pub fn shrink_to_fit(&mut self) {
        self.nodes.shrink_to_fit();
    }

    fn alloc(&mut self) -> u32 {
        let id = self.nodes.len();
        debug_assert!(id < NULL as usize, "prefix index node arena exhausted");
        self.nodes.push(Node::empty());
        id as u32
    }

    /// Sets the frequency of the sentence spelled by `path`, creating nodes as
    /// needed. Returns the terminal node.
    pub fn insert(&mut self, path: &[Symbol], frequency: u32) -> NodeId {
        debug_assert!(frequency > 0, "terminal frequency must be positive");

        let mut cur = 0u32;
        self.bump_max(cur, frequency);
        for &sym in path {
            let next = self.nodes[cur as usize].children[sym.index()];
            let next = if next == NULL {
                let child = self.alloc();
                self.nodes[cur as usize].children[sym.index()] = child;
                child
            } else {
                next
            };
            self.bump_max(next, frequency);
            cur = next;
        }

        let node = &mut self.nodes[cur as usize];
        if node.terminal == 0 {
            self.terminals += 1;
        }
        node.terminal = frequency;
        NodeId(cur)
    }

    #[inline]
    fn bump_max(&mut self, node: u32, frequency: u32) {
        let n = &mut self.nodes[node as usize];
        n.subtree_max = n.subtree_max.max(frequency);
    }

    #[inline]
    pub fn child(&self, node: NodeId, sym: Symbol) -> Option<NodeId> {
        let c = self.nodes[node.idx()].children[sym.index()];
        if c == NULL {
            None
        } else {
            Some(NodeId(c))
        }
    }

    pub fn descend_from(&self, mut node: NodeId, path: &[Symbol]) -> Option<NodeId> {
        for &sym in path {
            node = self.child(node, sym)?;
        }
        Some(node)
    }

    pub fn descend(&self, path: &[Symbol]) -> Option<NodeId> {
        self.descend_from(NodeId::ROOT, path)
    }

    #[inline]
    pub fn terminal_frequency(&self, node: NodeId) -> u32 {
        self.nodes[node.idx()].terminal
    }

    /// Frequency of the sentence spelled by `path`, 0 if never indexed.
    pub fn frequency(&self, path: &[Symbol]) -> u32 {
        self.descend(path).map_or(0, |node| self.terminal_frequency(node))
    }

    /// Best `k` sentences in the subtree under `node`, which must be the node
    /// reached by `prefix`.
    ///
    /// Children are visited in symbol order, so equal-frequency candidates
    /// arrive in ascending text order.
    pub fn top_k(&self, node: NodeId, prefix: &str, k: usize) -> TopK {
        let mut top = TopK::new(k);
        if k == 0 {
            return top;
        }

        let mut path: SmallVec<[u8; 64]> = SmallVec::from_slice(prefix.as_bytes());
        self.offer(node.0, &path, &mut top);

        let mut stack: SmallVec<[Frame; 32]> = SmallVec::new();
        stack.push(Frame {
            node: node.0,
            next: 0,
        });

        while let Some(frame) = stack.last_mut() {
            let children = &self.nodes[frame.node as usize].children;
            let threshold = top.threshold();

            let mut descend = None;
            while (frame.next as usize) < Symbol::ALPHABET_SIZE {
                let slot = frame.next as usize;
                frame.next += 1;
                let c = children[slot];
                if c == NULL {
                    continue;
                }
                if threshold.is_some_and(|t| self.nodes[c as usize].subtree_max < t) {
                    continue;
                }
                descend = Some((slot, c));
                break;
            }

            match descend {
                Some((slot, c)) => {
                    if let Some(sym) = Symbol::from_index(slot) {
                        path.push(sym.to_byte());
                    }
                    self.offer(c, &path, &mut top);
                    stack.push(Frame { node: c, next: 0 });
                }
                None => {
                    stack.pop();
                    if !stack.is_empty() {
                        path.pop();
                    }
                }
            }
        }

        top
    }

    #[inline]
    fn offer(&self, node: u32, path: &[u8], top: &mut TopK) {
        let f = self.nodes[node as usize].terminal;
        if f > 0 && top.would_accept(f, path) {
            top.push(Suggestion {
                text: path.iter().map(|&b| b as char).collect(),
                frequency: f,
            });
        }
    }

    /// All indexed sentences in ascending text order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            index: self,
            stack: vec![(0, 0, None)],
            path: Vec::new(),
        }
    }
}

impl Default for PrefixIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PrefixIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

pub struct Iter<'a> {
    index: &'a PrefixIndex,
    /// `(node, parent path length, edge byte)`; the root has no edge.
    stack: Vec<(u32, usize, Option<u8>)>,
    path: Vec<u8>,
}

impl Iterator for Iter<'_> {
    type Item = (String, u32);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, depth, edge)) = self.stack.pop() {
            self.path.truncate(depth);
            if let Some(b) = edge {
                self.path.push(b);
            }

            let n = &self.index.nodes[node as usize];
            let child_depth = self.path.len();
            for slot in (0..Symbol::ALPHABET_SIZE).rev() {
                let c = n.children[slot];
                if c != NULL {
                    let edge = Symbol::from_index(slot).map(Symbol::to_byte);
                    self.stack.push((c, child_depth, edge));
                }
            }

            if n.terminal > 0 {
                let text = self.path.iter().map(|&b| b as char).collect();
                return Some((text, n.terminal));
            }
        }
        None
    }
}
