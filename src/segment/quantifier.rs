//! Numbers and the measure words that follow them.
//!
//! Arabic digit runs may contain single `.` / `,` separators between digits
//! (`3.14`, `1,000`); Chinese numeral runs are taken as they come (`三百五十`).
//! Right after a number the quantifier dictionary is consulted, so `3个` or
//! `五公斤` yields a `Number` and a `Count` lexeme.
use crate::{
    context::{ScanContext, ScanError},
    dict::{Dictionary, Hit},
    lexeme::{Lexeme, LexemeType},
    segment::SegmenterKind,
    unicode::{is_arabic_number, is_chinese_numeral, regularize},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Numeral {
    Arabic,
    Chinese,
}

impl Numeral {
    #[inline]
    fn of(c: char) -> Option<Self> {
        if is_arabic_number(c) {
            Some(Numeral::Arabic)
        } else if is_chinese_numeral(c) {
            Some(Numeral::Chinese)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct NumberRun {
    start: usize,
    end: usize,
    numeral: Numeral,
}

#[derive(Debug, Clone, Default)]
pub struct QuantifierSegmenter {
    number: Option<NumberRun>,
    /// Quantifier-dictionary prefix still growing after a number.
    count: Option<Hit>,
}

impl QuantifierSegmenter {
    pub fn analyze(&mut self, dict: &Dictionary, ctx: &mut ScanContext) -> Result<(), ScanError> {
        let cursor = ctx.cursor();
        let c = ctx.current_char()?;

        if let Some(prior) = self.count.take() {
            let hit = dict.continue_in_quantifier(ctx.buffer(), cursor, &prior);
            self.emit_count(ctx, &hit, cursor);
        }

        let extends = self
            .number
            .is_some_and(|run| Self::continues(ctx, &run, c, cursor));
        match self.number {
            Some(ref mut run) if extends => run.end = cursor,
            Some(run) => {
                self.number = None;
                ctx.add_lexeme(Lexeme::new(
                    ctx.buffer_offset(),
                    run.start,
                    run.end - run.start + 1,
                    LexemeType::Number,
                ));
                let hit = dict.match_in_quantifier(ctx.buffer(), cursor, 1);
                self.emit_count(ctx, &hit, cursor);
                self.start_run(c, cursor);
            }
            None => self.start_run(c, cursor),
        }

        if ctx.at_window_end() {
            if let Some(run) = self.number.take() {
                ctx.add_lexeme(Lexeme::new(
                    ctx.buffer_offset(),
                    run.start,
                    run.end - run.start + 1,
                    LexemeType::Number,
                ));
            }
            self.count = None;
        }

        ctx.set_lock(SegmenterKind::Quantifier, self.holds_lock());
        Ok(())
    }

    pub fn reset(&mut self) {
        self.number = None;
        self.count = None;
    }

    #[inline]
    pub fn holds_lock(&self) -> bool {
        self.number.is_some() || self.count.is_some()
    }

    #[inline]
    fn start_run(&mut self, c: char, cursor: usize) {
        self.number = Numeral::of(c).map(|numeral| NumberRun {
            start: cursor,
            end: cursor,
            numeral,
        });
    }

    /// Emits a `Count` for a completed match and keeps the hit while it can
    /// still grow.
    fn emit_count(&mut self, ctx: &mut ScanContext, hit: &Hit, cursor: usize) {
        if hit.is_match() {
            ctx.add_lexeme(Lexeme::new(
                ctx.buffer_offset(),
                hit.begin(),
                cursor - hit.begin() + 1,
                LexemeType::Count,
            ));
        }
        self.count = hit.is_prefix().then_some(*hit);
    }

    fn continues(ctx: &ScanContext, run: &NumberRun, c: char, cursor: usize) -> bool {
        match run.numeral {
            Numeral::Chinese => is_chinese_numeral(c),
            Numeral::Arabic if is_arabic_number(c) => true,
            Numeral::Arabic => {
                // one separator, only between two digits
                let buf = ctx.buffer();
                matches!(c, '.' | ',')
                    && run.end + 1 == cursor
                    && is_arabic_number(buf[run.end])
                    && buf
                        .get(cursor + 1)
                        .is_some_and(|&next| is_arabic_number(regularize(next)))
            }
        }
    }
}
