//! The window-filling driver.
//!
//! A [`Segmentation`] pulls characters from its source into a fixed-size
//! window, feeds every position to the active sub-segmenters, settles the
//! window's lexemes (name merging, overlap exclusion) and hands them out as
//! [`Token`]s before moving on to the next window.
use std::{fmt, sync::Arc};

use smallvec::SmallVec;
use thiserror::Error;
use tracing::debug;

use crate::{
    context::{NameMergePolicy, ScanContext, ScanError},
    dict::{DictError, Dictionary},
    lexeme::{Lexeme, LexemeType},
    segment::{Segmenter, SegmenterKind},
};

pub const DEFAULT_WINDOW_SIZE: usize = 3072;
pub const DEFAULT_EXHAUST_CRITICAL: usize = 48;

#[derive(Debug, Error)]
pub enum HanlexError {
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),
    #[error("dictionary error: {0}")]
    Dict(#[from] DictError),
}

/// One finished token. Positions are character offsets into the whole input,
/// `end` exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub begin: usize,
    pub end: usize,
    pub text: String,
    pub kind: LexemeType,
}

impl Token {
    fn new(lexeme: &Lexeme, text: String) -> Self {
        Self {
            begin: lexeme.begin_position(),
            end: lexeme.end_position(),
            text,
            kind: lexeme.kind(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} : {} : {}", self.begin, self.end, self.text, self.kind)
    }
}

#[derive(Debug, Clone)]
struct Config {
    max_word_length: bool,
    segmenters: SmallVec<[SegmenterKind; SegmenterKind::COUNT]>,
    name_policy: NameMergePolicy,
    window_size: usize,
    exhaust_critical: usize,
}

/// Immutable tokenizer settings plus the shared dictionary. Cheap to clone;
/// every [`Segmentation`] it starts owns its own scan state.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    dict: Arc<Dictionary>,
    config: Config,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Tokenizer {
    pub fn builder() -> TokenizerBuilder {
        TokenizerBuilder::default()
    }

    #[inline]
    pub fn dictionary(&self) -> &Arc<Dictionary> {
        &self.dict
    }

    pub fn segment<'a>(&self, text: &'a str) -> Segmentation<std::str::Chars<'a>> {
        self.segment_chars(text.chars())
    }

    pub fn segment_chars<I>(&self, chars: I) -> Segmentation<I::IntoIter>
    where
        I: IntoIterator<Item = char>,
    {
        let ctx = ScanContext::new(Arc::clone(&self.dict), self.config.max_word_length)
            .with_name_policy(self.config.name_policy);
        Segmentation {
            source: chars.into_iter(),
            dict: Arc::clone(&self.dict),
            ctx,
            segmenters: self.config.segmenters.iter().map(|&k| Segmenter::new(k)).collect(),
            window_size: self.config.window_size,
            exhaust_critical: self.config.exhaust_critical,
            finished: false,
        }
    }

    /// Collects every token of `text`.
    pub fn tokenize(&self, text: &str) -> Result<Vec<Token>, HanlexError> {
        self.segment(text).collect()
    }
}

pub struct TokenizerBuilder {
    dict: Option<Arc<Dictionary>>,
    config: Config,
}

impl Default for TokenizerBuilder {
    fn default() -> Self {
        Self {
            dict: None,
            config: Config {
                max_word_length: true,
                segmenters: SegmenterKind::ALL.into_iter().collect(),
                name_policy: NameMergePolicy::default(),
                window_size: DEFAULT_WINDOW_SIZE,
                exhaust_critical: DEFAULT_EXHAUST_CRITICAL,
            },
        }
    }
}

impl TokenizerBuilder {
    pub fn dictionary(mut self, dict: Arc<Dictionary>) -> Self {
        self.dict = Some(dict);
        self
    }

    /// `true` (the default) keeps only the longest non-nested lexemes;
    /// `false` returns every candidate.
    pub fn max_word_length(mut self, enabled: bool) -> Self {
        self.config.max_word_length = enabled;
        self
    }

    /// Active sub-segmenters, fed in the given order. Duplicates are ignored.
    pub fn segmenters(mut self, kinds: &[SegmenterKind]) -> Self {
        self.config.segmenters.clear();
        for &kind in kinds {
            if !self.config.segmenters.contains(&kind) {
                self.config.segmenters.push(kind);
            }
        }
        self
    }

    pub fn name_policy(mut self, policy: NameMergePolicy) -> Self {
        self.config.name_policy = policy;
        self
    }

    pub fn window_size(mut self, size: usize) -> Self {
        self.config.window_size = size;
        self
    }

    pub fn exhaust_critical(mut self, distance: usize) -> Self {
        self.config.exhaust_critical = distance;
        self
    }

    pub fn build(self) -> Tokenizer {
        let mut config = self.config;
        config.window_size = config.window_size.max(1);
        config.exhaust_critical = config.exhaust_critical.min(config.window_size / 2);
        Tokenizer {
            dict: self.dict.unwrap_or_default(),
            config,
        }
    }
}

/// Token stream over one input. Created by [`Tokenizer::segment`].
pub struct Segmentation<I> {
    source: I,
    dict: Arc<Dictionary>,
    ctx: ScanContext,
    segmenters: Vec<Segmenter>,
    window_size: usize,
    exhaust_critical: usize,
    finished: bool,
}

impl<I: Iterator<Item = char>> Segmentation<I> {
    /// Next token in input order, `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, HanlexError> {
        loop {
            if let Some(lexeme) = self.ctx.first_lexeme() {
                let text = self.ctx.text(lexeme.begin(), lexeme.length())?;
                return Ok(Some(Token::new(&lexeme, text)));
            }
            if self.finished {
                return Ok(None);
            }
            if self.ctx.refill(&mut self.source, self.window_size) == 0 {
                self.ctx.reset();
                self.finished = true;
                return Ok(None);
            }
            self.analyze_window()?;
        }
    }

    fn analyze_window(&mut self) -> Result<(), ScanError> {
        let available = self.ctx.available();
        let mut analyzed = available;
        for index in 0..available {
            self.ctx.set_cursor(index)?;
            self.ctx.regularize_current();
            for segmenter in &mut self.segmenters {
                segmenter.analyze(&self.dict, &mut self.ctx)?;
            }
            if self.needs_refill(index) {
                analyzed = index + 1;
                break;
            }
        }

        for segmenter in &mut self.segmenters {
            segmenter.reset();
        }
        self.ctx.release_locks();
        self.ctx.set_last_analyzed(analyzed);
        self.ctx.pick_names();
        if self.ctx.is_max_word_length() {
            self.ctx.exclude_overlap();
        }
        debug!(
            offset = self.ctx.buffer_offset(),
            available,
            analyzed,
            lexemes = self.ctx.result_size(),
            "window analysed"
        );
        self.ctx.advance_offset(analyzed);
        Ok(())
    }

    /// Stop early near the end of a full window so the next window starts
    /// with enough context, unless a segmenter is mid-match or a lexeme
    /// already reaches past `index`.
    #[inline]
    fn needs_refill(&self, index: usize) -> bool {
        let available = self.ctx.available();
        available == self.window_size
            && index + 1 < available
            && index + self.exhaust_critical > available
            && self.ctx.reach() <= index + 1
            && !self.ctx.is_buffer_locked()
    }
}

impl<I: Iterator<Item = char>> Iterator for Segmentation<I> {
    type Item = Result<Token, HanlexError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(e) => {
                self.finished = true;
                self.ctx.reset();
                Some(Err(e))
            }
        }
    }
}
