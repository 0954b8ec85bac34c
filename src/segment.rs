//! Sub-segmenters.
//!
//! Each sub-segmenter is a small state machine that is fed the window one
//! character at a time (the character under [`ScanContext::cursor`]) and
//! proposes lexemes into the shared context. A segmenter that is in the middle
//! of a partial match locks the buffer so the driver does not shift the window
//! underneath it.
//!
//! The set of segmenters is closed, so dispatch goes through the [`Segmenter`]
//! enum rather than trait objects.

pub mod book_title;
pub mod cjk;
pub mod letter;
pub mod quantifier;

use crate::{context::ScanContext, context::ScanError, dict::Dictionary};

pub use book_title::BookTitleSegmenter;
pub use cjk::CjkSegmenter;
pub use letter::LetterSegmenter;
pub use quantifier::QuantifierSegmenter;

/// Identity of a sub-segmenter; also the index of its buffer-lock flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmenterKind {
    Quantifier,
    Cjk,
    Letter,
    BookTitle,
}

impl SegmenterKind {
    pub const COUNT: usize = 4;

    /// Default order in which the driver feeds segmenters.
    pub const ALL: [SegmenterKind; Self::COUNT] = [
        SegmenterKind::Quantifier,
        SegmenterKind::Cjk,
        SegmenterKind::Letter,
        SegmenterKind::BookTitle,
    ];

    #[inline(always)]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            SegmenterKind::Quantifier => "quantifier",
            SegmenterKind::Cjk => "cjk",
            SegmenterKind::Letter => "letter",
            SegmenterKind::BookTitle => "book_title",
        }
    }
}

/// One sub-segmenter together with its per-window state.
#[derive(Debug, Clone)]
pub enum Segmenter {
    Quantifier(QuantifierSegmenter),
    Cjk(CjkSegmenter),
    Letter(LetterSegmenter),
    BookTitle(BookTitleSegmenter),
}

impl Segmenter {
    pub fn new(kind: SegmenterKind) -> Self {
        match kind {
            SegmenterKind::Quantifier => Segmenter::Quantifier(QuantifierSegmenter::default()),
            SegmenterKind::Cjk => Segmenter::Cjk(CjkSegmenter::default()),
            SegmenterKind::Letter => Segmenter::Letter(LetterSegmenter::default()),
            SegmenterKind::BookTitle => Segmenter::BookTitle(BookTitleSegmenter::default()),
        }
    }

    #[inline]
    pub fn kind(&self) -> SegmenterKind {
        match self {
            Segmenter::Quantifier(_) => SegmenterKind::Quantifier,
            Segmenter::Cjk(_) => SegmenterKind::Cjk,
            Segmenter::Letter(_) => SegmenterKind::Letter,
            Segmenter::BookTitle(_) => SegmenterKind::BookTitle,
        }
    }

    /// Feeds the character under the cursor to this segmenter and updates its
    /// buffer-lock flag in `ctx`.
    #[inline]
    pub fn analyze(&mut self, dict: &Dictionary, ctx: &mut ScanContext) -> Result<(), ScanError> {
        match self {
            Segmenter::Quantifier(s) => s.analyze(dict, ctx),
            Segmenter::Cjk(s) => s.analyze(dict, ctx),
            Segmenter::Letter(s) => s.analyze(ctx),
            Segmenter::BookTitle(s) => s.analyze(ctx),
        }
    }

    /// Drops all per-window state. Called by the driver after every window.
    pub fn reset(&mut self) {
        match self {
            Segmenter::Quantifier(s) => s.reset(),
            Segmenter::Cjk(s) => s.reset(),
            Segmenter::Letter(s) => s.reset(),
            Segmenter::BookTitle(s) => s.reset(),
        }
    }

    /// Whether the segmenter currently has an unfinished partial match.
    pub fn holds_lock(&self) -> bool {
        match self {
            Segmenter::Quantifier(s) => s.holds_lock(),
            Segmenter::Cjk(s) => s.holds_lock(),
            Segmenter::Letter(s) => s.holds_lock(),
            Segmenter::BookTitle(s) => s.holds_lock(),
        }
    }
}

impl From<SegmenterKind> for Segmenter {
    fn from(kind: SegmenterKind) -> Self {
        Segmenter::new(kind)
    }
}
