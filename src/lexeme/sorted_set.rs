//! Window-scoped ordered lexeme storage.
use std::collections::VecDeque;

use super::Lexeme;

/// Ordered, duplicate-free lexeme collection for one scan window.
///
/// Segmenters emit lexemes roughly left to right, so insertion probes from
/// the tail: appending is O(1), an out-of-order lexeme walks back to its slot.
#[derive(Debug, Clone, Default)]
pub struct SortedLexemeSet {
    items: VecDeque<Lexeme>,
}

impl SortedLexemeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `lexeme` at its sorted position. Returns `false` (and leaves
    /// the set untouched) if an equal lexeme is already present.
    pub fn insert(&mut self, lexeme: Lexeme) -> bool {
        match (self.items.front(), self.items.back()) {
            (None, _) | (_, None) => {
                self.items.push_back(lexeme);
                return true;
            }
            (_, Some(tail)) if *tail < lexeme => {
                self.items.push_back(lexeme);
                return true;
            }
            (Some(head), _) if *head > lexeme => {
                self.items.push_front(lexeme);
                return true;
            }
            _ => {}
        }

        let mut slot = self.items.len();
        while slot > 0 && self.items[slot - 1] > lexeme {
            slot -= 1;
        }
        if slot > 0 && self.items[slot - 1] == lexeme {
            return false;
        }
        self.items.insert(slot, lexeme);
        true
    }

    #[inline]
    pub fn poll_first(&mut self) -> Option<Lexeme> {
        self.items.pop_front()
    }

    #[inline]
    pub fn poll_last(&mut self) -> Option<Lexeme> {
        self.items.pop_back()
    }

    #[inline]
    pub fn peek_first(&self) -> Option<&Lexeme> {
        self.items.front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Lexeme> + '_ {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Drops lexemes that fully contain, or are contained by, a neighbour,
    /// keeping the one that [`outranks`](Lexeme::outranks) the other.
    ///
    /// One forward pass with a survivor stack. A later lexeme that beats the
    /// current survivor replaces it and is compared again with the survivor
    /// before, so afterwards no two lexemes contain each other and a second
    /// pass changes nothing.
    pub fn exclude_overlap(&mut self) {
        if self.items.len() < 2 {
            return;
        }
        let mut survivors: VecDeque<Lexeme> = VecDeque::with_capacity(self.items.len());
        'next: for lexeme in self.items.drain(..) {
            while let Some(top) = survivors.back() {
                if !top.overlaps(&lexeme) {
                    break;
                }
                if top.outranks(&lexeme) {
                    continue 'next;
                }
                survivors.pop_back();
            }
            survivors.push_back(lexeme);
        }
        self.items = survivors;
    }
}

impl<'a> IntoIterator for &'a SortedLexemeSet {
    type Item = &'a Lexeme;
    type IntoIter = std::collections::vec_deque::Iter<'a, Lexeme>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
