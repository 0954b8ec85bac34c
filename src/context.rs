//! Shared mutable state of one tokenization session. Exactly one caller
//! drives a [`ScanContext`] at a time; the dictionary behind it is read-only
//! and shared.

use std::sync::Arc;

use thiserror::Error;

use crate::{
    dict::Dictionary,
    lexeme::{Lexeme, LexemeType, SortedLexemeSet},
    segment::SegmenterKind,
    unicode::regularize,
};

/// Contract violations detected while scanning. None of these are transient:
/// each one means a caller asked for something outside the current window.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error("span out of bounds: begin {begin}, length {length}, available {available}")]
    OutOfBounds {
        begin: usize,
        length: usize,
        available: usize,
    },

    #[error("cursor {cursor} is past the {available} available characters")]
    CursorOutOfRange { cursor: usize, available: usize },

    #[error("unknown lexeme type tag {0}")]
    UnknownLexemeType(u8),

    #[error("unknown lexeme type name `{0}`")]
    UnknownLexemeName(String),
}

/// Which dictionaries veto a character from joining a full name.
///
/// Both variants check the surname dictionary; they differ only in whether
/// prepositions / adverbs (`在`, `和`, `的` …) also stop the merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameMergePolicy {
    #[default]
    SurnameAndPreposition,
    SurnameOnly,
}

impl NameMergePolicy {
    #[inline(always)]
    const fn checks_preposition(self) -> bool {
        matches!(self, NameMergePolicy::SurnameAndPreposition)
    }
}

/// Scan state for one session: the current window, the cursor, the buffer
/// locks held by sub-segmenters and the window's lexeme results.
#[derive(Debug, Clone)]
pub struct ScanContext {
    max_word_length: bool,
    name_policy: NameMergePolicy,
    dict: Arc<Dictionary>,
    buffer: Vec<char>,
    /// Cumulative displacement of this window from the start of the input.
    buffer_offset: usize,
    available: usize,
    last_analyzed: usize,
    cursor: usize,
    /// One past the furthest window position any proposed lexeme covers.
    reach: usize,
    locks: [bool; SegmenterKind::COUNT],
    lexemes: SortedLexemeSet,
}

impl ScanContext {
    pub fn new(dict: Arc<Dictionary>, max_word_length: bool) -> Self {
        Self {
            max_word_length,
            name_policy: NameMergePolicy::default(),
            dict,
            buffer: Vec::new(),
            buffer_offset: 0,
            available: 0,
            last_analyzed: 0,
            cursor: 0,
            reach: 0,
            locks: [false; SegmenterKind::COUNT],
            lexemes: SortedLexemeSet::new(),
        }
    }

    pub fn with_name_policy(mut self, policy: NameMergePolicy) -> Self {
        self.name_policy = policy;
        self
    }

    /// Clears everything but the max-word-length flag and the name policy.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.buffer_offset = 0;
        self.available = 0;
        self.last_analyzed = 0;
        self.cursor = 0;
        self.reach = 0;
        self.locks = [false; SegmenterKind::COUNT];
        self.lexemes.clear();
    }

    // ──────────────────────────────────────────────────────────────
    //  Window management (driver side)
    // ──────────────────────────────────────────────────────────────

    /// Replaces the window with `chars`; the buffer offset is unchanged.
    pub fn load_window<I: IntoIterator<Item = char>>(&mut self, chars: I) {
        self.buffer.clear();
        self.buffer.extend(chars);
        self.available = self.buffer.len();
        self.last_analyzed = 0;
        self.cursor = 0;
        self.reach = 0;
    }

    /// Shifts the unanalysed tail of the window to the front and tops the
    /// window up to `window_size` from `source`. Returns the new `available`.
    ///
    /// # Panics
    ///
    /// Panics if a sub-segmenter still holds a buffer lock.
    pub fn refill<I: Iterator<Item = char>>(&mut self, source: &mut I, window_size: usize) -> usize {
        assert!(
            !self.is_buffer_locked(),
            "window shifted while a segmenter holds a lock – this is a bug"
        );
        self.buffer.truncate(self.available);
        self.buffer.drain(..self.last_analyzed.min(self.buffer.len()));
        let missing = window_size.saturating_sub(self.buffer.len());
        self.buffer.extend(source.by_ref().take(missing));
        self.available = self.buffer.len();
        self.last_analyzed = 0;
        self.cursor = 0;
        self.reach = 0;
        self.available
    }

    /// Regularizes the character under the cursor in place.
    #[inline]
    pub fn regularize_current(&mut self) {
        if let Some(c) = self.buffer.get_mut(self.cursor) {
            *c = regularize(*c);
        }
    }

    #[inline(always)]
    pub fn is_max_word_length(&self) -> bool {
        self.max_word_length
    }

    #[inline(always)]
    pub fn name_policy(&self) -> NameMergePolicy {
        self.name_policy
    }

    #[inline(always)]
    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dict
    }

    /// The valid part of the current window.
    #[inline(always)]
    pub fn buffer(&self) -> &[char] {
        &self.buffer[..self.available]
    }

    #[inline(always)]
    pub fn buffer_offset(&self) -> usize {
        self.buffer_offset
    }

    #[inline]
    pub fn advance_offset(&mut self, analyzed: usize) {
        self.buffer_offset += analyzed;
    }

    #[inline(always)]
    pub fn available(&self) -> usize {
        self.available
    }

    #[inline(always)]
    pub fn last_analyzed(&self) -> usize {
        self.last_analyzed
    }

    #[inline]
    pub fn set_last_analyzed(&mut self, last_analyzed: usize) {
        self.last_analyzed = last_analyzed;
    }

    #[inline(always)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor(&mut self, cursor: usize) -> Result<(), ScanError> {
        if cursor >= self.available {
            return Err(ScanError::CursorOutOfRange {
                cursor,
                available: self.available,
            });
        }
        self.cursor = cursor;
        Ok(())
    }

    /// Character under the cursor.
    #[inline]
    pub fn current_char(&self) -> Result<char, ScanError> {
        self.buffer()
            .get(self.cursor)
            .copied()
            .ok_or(ScanError::CursorOutOfRange {
                cursor: self.cursor,
                available: self.available,
            })
    }

    /// One past the furthest window position covered by any lexeme proposed
    /// since the window was loaded, stop words included. Lookahead (suffixes,
    /// compound surnames) can push this past the cursor.
    #[inline(always)]
    pub fn reach(&self) -> usize {
        self.reach
    }

    /// True when the cursor sits on the last available character.
    #[inline(always)]
    pub fn at_window_end(&self) -> bool {
        self.cursor + 1 == self.available
    }

    // ──────────────────────────────────────────────────────────────
    //  Buffer locks
    // ──────────────────────────────────────────────────────────────

    #[inline]
    pub fn set_lock(&mut self, kind: SegmenterKind, locked: bool) {
        self.locks[kind.index()] = locked;
    }

    pub fn release_locks(&mut self) {
        self.locks = [false; SegmenterKind::COUNT];
    }

    /// While any segmenter holds a lock the window must not be shifted.
    #[inline]
    pub fn is_buffer_locked(&self) -> bool {
        self.locks.iter().any(|&l| l)
    }

    // ──────────────────────────────────────────────────────────────
    //  Results
    // ──────────────────────────────────────────────────────────────

    /// Window text for `begin..begin + length`.
    pub fn text(&self, begin: usize, length: usize) -> Result<String, ScanError> {
        self.buffer()
            .get(begin..begin.saturating_add(length))
            .map(|span| span.iter().collect())
            .ok_or(ScanError::OutOfBounds {
                begin,
                length,
                available: self.available,
            })
    }

    /// Adds a lexeme unless its exact text is a stop word.
    /// Returns whether the result set grew.
    pub fn add_lexeme(&mut self, lexeme: Lexeme) -> bool {
        debug_assert!(
            lexeme.begin() + lexeme.length() <= self.available,
            "lexeme {lexeme} exceeds the window"
        );
        self.reach = self.reach.max(lexeme.begin() + lexeme.length());
        if self
            .dict
            .is_stop_word(self.buffer(), lexeme.begin(), lexeme.length())
        {
            return false;
        }
        self.lexemes.insert(lexeme)
    }

    #[inline]
    pub fn first_lexeme(&mut self) -> Option<Lexeme> {
        self.lexemes.poll_first()
    }

    #[inline]
    pub fn result_size(&self) -> usize {
        self.lexemes.len()
    }

    #[inline]
    pub fn lexemes(&self) -> &SortedLexemeSet {
        &self.lexemes
    }

    pub fn exclude_overlap(&mut self) {
        self.lexemes.exclude_overlap();
    }

    // ──────────────────────────────────────────────────────────────
    //  Name merging
    // ──────────────────────────────────────────────────────────────

    /// Emits a full-name lexeme for every surname followed by one or two
    /// single-character lexemes that can plausibly be a given name.
    ///
    /// Originals are kept; overlap exclusion settles the conflict later.
    pub fn pick_names(&mut self) {
        let mut names = Vec::new();
        for (index, surname) in self.lexemes.iter().enumerate() {
            if surname.kind() != LexemeType::Surname {
                continue;
            }
            if let Some(length) = self.given_name_length(index, surname) {
                names.push(Lexeme::new(
                    self.buffer_offset,
                    surname.begin(),
                    surname.length() + length,
                    LexemeType::FullName,
                ));
            }
        }
        for name in names {
            self.add_lexeme(name);
        }
    }

    fn given_name_length(&self, index: usize, surname: &Lexeme) -> Option<usize> {
        let buf = self.buffer();
        let end = surname.begin() + surname.length();

        let (second_index, second) = self.single_char_at(index + 1, end)?;
        if self.blocks_name(second.begin()) {
            return None;
        }

        let Some((_, third)) = self.single_char_at(second_index + 1, end + 1) else {
            return Some(1);
        };
        let at = third.begin();
        let surname_hit = self.dict.match_in_surname(buf, at, 1);
        let is_prep = self.name_policy.checks_preposition()
            && !self.dict.match_in_preposition(buf, at, 1).is_unmatch();

        if surname_hit.is_unmatch() && !is_prep {
            return Some(2);
        }
        if surname_hit.is_prefix() {
            // Could start a compound surname: only absorb it if the compound
            // does not actually continue.
            let continues = at + 1 < self.available
                && !self
                    .dict
                    .continue_in_surname(buf, at + 1, &surname_hit)
                    .is_unmatch();
            return Some(if continues { 1 } else { 2 });
        }
        // A surname (or preposition) as the very last character still ends the name.
        Some(if at + 1 == self.available { 2 } else { 1 })
    }

    /// First length-1 lexeme starting exactly at `begin`, searching forward
    /// from list position `from`.
    fn single_char_at(&self, from: usize, begin: usize) -> Option<(usize, &Lexeme)> {
        self.lexemes
            .iter()
            .enumerate()
            .skip(from)
            .take_while(|(_, l)| l.begin() <= begin)
            .find(|(_, l)| l.begin() == begin && l.length() == 1)
    }

    fn blocks_name(&self, at: usize) -> bool {
        let buf = self.buffer();
        !self.dict.match_in_surname(buf, at, 1).is_unmatch()
            || (self.name_policy.checks_preposition()
                && !self.dict.match_in_preposition(buf, at, 1).is_unmatch())
    }
}
