//! Arena trie with resumable matching.
//!
//! Words are stored as paths of `char` edges in a flat `Vec<Node>`; nodes
//! refer to each other by [`NodeId`] only. A [`Hit`] remembers the node its
//! query stopped at, so a sub-segmenter that is still growing a prefix match
//! can feed the trie one more character in O(1) instead of re-walking the
//! whole span from the root.
//!
//! ```text
//! trie {中国, 中国人}
//! match_at("中国人民", 0, 2)        → match + prefix  (node: 国)
//! match_from("中国人民", 2, &hit)   → match           (node: 人)
//! match_from("中国人民", 3, &hit)   → unmatched
//! ```
use smallvec::SmallVec;

/// Index of a node inside one [`Trie`]'s arena.
///
/// Only meaningful for the trie that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline(always)]
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Default)]
struct Node {
    /// Sorted by `char` so lookups can binary-search.
    children: SmallVec<[(char, NodeId); 4]>,
    /// The path ending here is a complete word.
    terminal: bool,
}

impl Node {
    #[inline]
    fn child(&self, c: char) -> Option<NodeId> {
        self.children
            .binary_search_by_key(&c, |&(k, _)| k)
            .ok()
            .map(|i| self.children[i].1)
    }

    #[inline(always)]
    fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Outcome of one trie query.
///
/// `prefix` and `match` are independent: a word that is also the beginning
/// of a longer word reports both. A hit that reports neither is unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    begin: usize,
    end: usize,
    matched: bool,
    prefix: bool,
    node: Option<NodeId>,
}

impl Hit {
    #[inline(always)]
    fn unmatched(begin: usize, end: usize) -> Self {
        Self {
            begin,
            end,
            matched: false,
            prefix: false,
            node: None,
        }
    }

    /// First buffer index covered by the query.
    #[inline(always)]
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// Last buffer index consumed by the query (inclusive).
    #[inline(always)]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline(always)]
    pub fn is_match(&self) -> bool {
        self.matched
    }

    #[inline(always)]
    pub fn is_prefix(&self) -> bool {
        self.prefix
    }

    #[inline(always)]
    pub fn is_unmatch(&self) -> bool {
        !self.matched && !self.prefix
    }

    /// Node reached by the query; `None` once the hit is unmatched.
    #[inline(always)]
    pub fn node(&self) -> Option<NodeId> {
        self.node
    }
}

/// Read-only character trie.
///
/// Built once, then shared (typically behind an `Arc`) by any number of
/// scan sessions.
#[derive(Debug, Clone)]
pub struct Trie {
    nodes: Vec<Node>,
    words: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::default()],
            words: 0,
        }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for w in words {
            trie.insert(w.as_ref().chars());
        }
        trie
    }

    /// Adds one word. Empty words are ignored; re-inserting a word is a no-op.
    pub fn insert<I>(&mut self, word: I)
    where
        I: IntoIterator<Item = char>,
    {
        let mut current = NodeId::ROOT;
        let mut depth = 0usize;
        for c in word {
            depth += 1;
            current = match self.nodes[current.index()].child(c) {
                Some(next) => next,
                None => {
                    let id = NodeId(
                        u32::try_from(self.nodes.len())
                            .expect("trie exceeds u32::MAX nodes – this is a bug"),
                    );
                    self.nodes.push(Node::default());
                    let children = &mut self.nodes[current.index()].children;
                    let slot = children
                        .binary_search_by_key(&c, |&(k, _)| k)
                        .unwrap_err();
                    children.insert(slot, (c, id));
                    id
                }
            };
        }
        if depth > 0 && !self.nodes[current.index()].terminal {
            self.nodes[current.index()].terminal = true;
            self.words += 1;
        }
    }

    /// Number of distinct words stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.words
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    pub fn contains(&self, word: &str) -> bool {
        let chars: SmallVec<[char; 16]> = word.chars().collect();
        !chars.is_empty() && self.match_at(&chars, 0, chars.len()).is_match()
    }

    /// Walks `length` characters of `buf` starting at `begin` from the root.
    ///
    /// A zero `length` is always unmatched.
    ///
    /// # Panics
    ///
    /// Panics if `begin + length` exceeds `buf.len()`; callers bound their
    /// queries by the window's `available` count.
    pub fn match_at(&self, buf: &[char], begin: usize, length: usize) -> Hit {
        let span = &buf[begin..begin + length];
        if span.is_empty() {
            return Hit::unmatched(begin, begin);
        }
        self.walk(NodeId::ROOT, span, begin, begin)
    }

    /// Continues `prior` with exactly one more character, `buf[index]`.
    ///
    /// Equivalent to a fresh [`match_at`](Self::match_at) over
    /// `prior.begin()..=index` as long as `prior` came from this trie.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds for `buf`.
    pub fn match_from(&self, buf: &[char], index: usize, prior: &Hit) -> Hit {
        let c = buf[index];
        match prior.node {
            Some(node) => self.walk(node, &[c], prior.begin, index),
            None => Hit::unmatched(prior.begin, index),
        }
    }

    #[inline]
    fn walk(&self, from: NodeId, span: &[char], begin: usize, first: usize) -> Hit {
        let mut current = from;
        for (i, &c) in span.iter().enumerate() {
            match self.nodes[current.index()].child(c) {
                Some(next) => current = next,
                None => return Hit::unmatched(begin, first + i),
            }
        }
        let node = &self.nodes[current.index()];
        Hit {
            begin,
            end: first + span.len() - 1,
            matched: node.terminal,
            prefix: node.has_children(),
            node: Some(current),
        }
    }
}
