//! Lexemes: classified candidate tokens and their ordering.
pub mod sorted_set;

use std::{cmp::Ordering, fmt, hash::Hash, str::FromStr};

use phf::{Map, phf_map};

use crate::context::ScanError;

pub use sorted_set::SortedLexemeSet;

/// What a lexeme was recognised as.
///
/// The discriminants are stable: new kinds may only be appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum LexemeType {
    Normal = 0,
    Surname = 1,
    FullName = 2,
    Suffix = 3,
    Unknown = 4,
    Number = 5,
    Count = 6,
    Letter = 7,
    BookTitle = 8,
    Email = 9,
    Url = 10,
}

static TYPE_BY_NAME: Map<&'static str, LexemeType> = phf_map! {
    "CJK_NORMAL" => LexemeType::Normal,
    "CJK_NAME" => LexemeType::Surname,
    "CJK_FULL_NAME" => LexemeType::FullName,
    "CJK_SUFFIX" => LexemeType::Suffix,
    "UNKNOWN" => LexemeType::Unknown,
    "NUMBER" => LexemeType::Number,
    "COUNT" => LexemeType::Count,
    "LETTER" => LexemeType::Letter,
    "CJK_BOOK_TITLE" => LexemeType::BookTitle,
    "EMAIL" => LexemeType::Email,
    "URL" => LexemeType::Url,
};

impl LexemeType {
    pub const ALL: [LexemeType; 11] = [
        LexemeType::Normal,
        LexemeType::Surname,
        LexemeType::FullName,
        LexemeType::Suffix,
        LexemeType::Unknown,
        LexemeType::Number,
        LexemeType::Count,
        LexemeType::Letter,
        LexemeType::BookTitle,
        LexemeType::Email,
        LexemeType::Url,
    ];

    #[inline]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn from_ordinal(ordinal: u8) -> Result<Self, ScanError> {
        Self::ALL
            .get(usize::from(ordinal))
            .copied()
            .ok_or(ScanError::UnknownLexemeType(ordinal))
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            LexemeType::Normal => "CJK_NORMAL",
            LexemeType::Surname => "CJK_NAME",
            LexemeType::FullName => "CJK_FULL_NAME",
            LexemeType::Suffix => "CJK_SUFFIX",
            LexemeType::Unknown => "UNKNOWN",
            LexemeType::Number => "NUMBER",
            LexemeType::Count => "COUNT",
            LexemeType::Letter => "LETTER",
            LexemeType::BookTitle => "CJK_BOOK_TITLE",
            LexemeType::Email => "EMAIL",
            LexemeType::Url => "URL",
        }
    }
}

impl fmt::Display for LexemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LexemeType {
    type Err = ScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TYPE_BY_NAME
            .get(s)
            .copied()
            .ok_or_else(|| ScanError::UnknownLexemeName(s.to_owned()))
    }
}

/// A candidate token inside one scan window.
///
/// Identity is `(offset, begin, length)`; the type does not take part in
/// equality, so two segmenters proposing the same span collapse into one.
/// Lexemes sort by `begin` ascending, then longer first.
#[derive(Debug, Clone, Copy)]
pub struct Lexeme {
    offset: usize,
    begin: usize,
    length: usize,
    kind: LexemeType,
}

impl Lexeme {
    /// `offset` is the window's displacement from the start of the input,
    /// `begin` is relative to the window.
    #[inline]
    pub const fn new(offset: usize, begin: usize, length: usize, kind: LexemeType) -> Self {
        Self {
            offset,
            begin,
            length,
            kind,
        }
    }

    #[inline(always)]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Start relative to the window.
    #[inline(always)]
    pub const fn begin(&self) -> usize {
        self.begin
    }

    #[inline(always)]
    pub const fn length(&self) -> usize {
        self.length
    }

    #[inline(always)]
    pub const fn kind(&self) -> LexemeType {
        self.kind
    }

    /// Start relative to the whole input.
    #[inline(always)]
    pub const fn begin_position(&self) -> usize {
        self.offset + self.begin
    }

    /// One past the last character, relative to the whole input.
    #[inline(always)]
    pub const fn end_position(&self) -> usize {
        self.offset + self.begin + self.length
    }

    /// True when either span fully contains the other. Equal spans overlap.
    #[inline]
    pub fn overlaps(&self, other: &Lexeme) -> bool {
        let (b1, e1) = (self.begin_position(), self.end_position());
        let (b2, e2) = (other.begin_position(), other.end_position());
        (b1 <= b2 && e1 >= e2) || (b1 >= b2 && e1 <= e2)
    }

    /// Decides which of two overlapping lexemes survives: the earlier one
    /// wins unless the later one is a book title.
    #[inline]
    pub fn outranks(&self, other: &Lexeme) -> bool {
        other.kind != LexemeType::BookTitle
    }
}

impl PartialEq for Lexeme {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset && self.begin == other.begin && self.length == other.length
    }
}

impl Eq for Lexeme {}

impl Hash for Lexeme {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (self.offset, self.begin, self.length).hash(state);
    }
}

impl Ord for Lexeme {
    fn cmp(&self, other: &Self) -> Ordering {
        self.begin
            .cmp(&other.begin)
            .then_with(|| other.length.cmp(&self.length))
            .then_with(|| self.offset.cmp(&other.offset))
    }
}

impl PartialOrd for Lexeme {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Lexeme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} : {}",
            self.begin_position(),
            self.end_position(),
            self.kind
        )
    }
}
