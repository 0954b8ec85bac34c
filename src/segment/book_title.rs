use tracing::trace;

use crate::{
    context::{ScanContext, ScanError},
    lexeme::{Lexeme, LexemeType},
    segment::SegmenterKind,
};

const OPEN: char = '《';
const CLOSE: char = '》';

/// Characters counted from the opening bracket before an unclosed title is
/// abandoned.
pub const MAX_TITLE_SPAN: usize = 20;

/// Text between `《` and `》`. Nested brackets are not tracked: a second `《`
/// inside an open title is just another character.
#[derive(Debug, Clone, Default)]
pub struct BookTitleSegmenter {
    /// Window position right after the opening bracket, while a title is open.
    start: Option<usize>,
    seen: usize,
}

impl BookTitleSegmenter {
    pub fn analyze(&mut self, ctx: &mut ScanContext) -> Result<(), ScanError> {
        let cursor = ctx.cursor();
        let c = ctx.current_char()?;

        match self.start {
            Some(start) if c == CLOSE => {
                if cursor > start {
                    ctx.add_lexeme(Lexeme::new(
                        ctx.buffer_offset(),
                        start,
                        cursor - start,
                        LexemeType::BookTitle,
                    ));
                }
                self.reset();
            }
            Some(start) => {
                self.seen += 1;
                if self.seen >= MAX_TITLE_SPAN {
                    trace!(start, "book title left open, abandoned");
                    self.reset();
                }
            }
            None if c == OPEN => {
                self.start = Some(cursor + 1);
                self.seen = 1;
            }
            None => {}
        }

        ctx.set_lock(SegmenterKind::BookTitle, self.holds_lock());
        Ok(())
    }

    pub fn reset(&mut self) {
        self.start = None;
        self.seen = 0;
    }

    #[inline]
    pub fn holds_lock(&self) -> bool {
        self.start.is_some()
    }
}
