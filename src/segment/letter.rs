//! Latin runs: one machine for letter/digit/connector mixes (URLs, e-mail
//! addresses, product codes), one for plain letter runs.
use crate::{
    context::{ScanContext, ScanError},
    lexeme::{Lexeme, LexemeType},
    pattern::{is_email, is_url},
    segment::SegmenterKind,
    unicode::{CharClass, classify},
};

/// Inclusive window span of an open run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    start: usize,
    end: usize,
}

impl Run {
    #[inline(always)]
    fn at(cursor: usize) -> Self {
        Self {
            start: cursor,
            end: cursor,
        }
    }

    #[inline(always)]
    fn len(self) -> usize {
        self.end - self.start + 1
    }
}

#[derive(Debug, Clone, Default)]
pub struct LetterSegmenter {
    mixed: Option<Run>,
    letters: Option<Run>,
}

impl LetterSegmenter {
    pub fn analyze(&mut self, ctx: &mut ScanContext) -> Result<(), ScanError> {
        let cursor = ctx.cursor();
        let class = classify(ctx.current_char()?);

        self.process_mixed(ctx, class, cursor)?;
        self.process_letters(ctx, class, cursor);

        ctx.set_lock(SegmenterKind::Letter, self.holds_lock());
        Ok(())
    }

    pub fn reset(&mut self) {
        self.mixed = None;
        self.letters = None;
    }

    #[inline]
    pub fn holds_lock(&self) -> bool {
        self.mixed.is_some() || self.letters.is_some()
    }

    fn process_mixed(&mut self, ctx: &mut ScanContext, class: CharClass, cursor: usize) -> Result<(), ScanError> {
        let accepted = matches!(class, CharClass::Letter | CharClass::Digit | CharClass::Connector);
        match self.mixed {
            None if matches!(class, CharClass::Letter | CharClass::Digit) => {
                self.mixed = Some(Run::at(cursor));
            }
            None => {}
            Some(ref mut run) if accepted => run.end = cursor,
            Some(run) => {
                self.mixed = None;
                Self::emit_mixed(ctx, run)?;
            }
        }

        if ctx.at_window_end() {
            if let Some(run) = self.mixed.take() {
                Self::emit_mixed(ctx, run)?;
            }
        }
        Ok(())
    }

    fn emit_mixed(ctx: &mut ScanContext, run: Run) -> Result<(), ScanError> {
        let text = ctx.text(run.start, run.len())?;
        let kind = if is_url(&text) {
            LexemeType::Url
        } else if is_email(&text) {
            LexemeType::Email
        } else {
            LexemeType::Letter
        };
        ctx.add_lexeme(Lexeme::new(ctx.buffer_offset(), run.start, run.len(), kind));
        Ok(())
    }

    fn process_letters(&mut self, ctx: &mut ScanContext, class: CharClass, cursor: usize) {
        let is_letter = class == CharClass::Letter;
        match self.letters {
            None if is_letter => self.letters = Some(Run::at(cursor)),
            None => {}
            Some(ref mut run) if is_letter => run.end = cursor,
            Some(run) => {
                self.letters = None;
                Self::emit_letters(ctx, run);
            }
        }

        if ctx.at_window_end() {
            if let Some(run) = self.letters.take() {
                Self::emit_letters(ctx, run);
            }
        }
    }

    #[inline]
    fn emit_letters(ctx: &mut ScanContext, run: Run) {
        ctx.add_lexeme(Lexeme::new(ctx.buffer_offset(), run.start, run.len(), LexemeType::Letter));
    }
}
