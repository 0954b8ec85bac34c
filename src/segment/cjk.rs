//! Dictionary-driven segmentation of CJK runs.
//!
//! Every CJK character starts a fresh main-dictionary query; queries that are
//! still a prefix of some word stay pending and are extended one character at
//! a time. Stretches that no dictionary word covers are flushed as unknown
//! segments, which is also where surnames and suffixes are picked up.
use smallvec::SmallVec;
use tracing::trace;

use crate::{
    context::{ScanContext, ScanError},
    dict::{Dictionary, Hit},
    lexeme::{Lexeme, LexemeType},
    segment::SegmenterKind,
    unicode::is_cjk_character,
};

#[derive(Debug, Clone, Default)]
pub struct CjkSegmenter {
    /// One past the last window position already covered by output.
    done_until: usize,
    /// Main-dictionary prefixes still waiting for more characters.
    hits: SmallVec<[Hit; 8]>,
}

impl CjkSegmenter {
    pub fn analyze(&mut self, dict: &Dictionary, ctx: &mut ScanContext) -> Result<(), ScanError> {
        let cursor = ctx.cursor();
        let c = ctx.current_char()?;

        if is_cjk_character(c) {
            self.extend_pending(dict, ctx, cursor);
            self.start_at(dict, ctx, cursor);
        } else {
            self.flush_pending(dict, ctx, cursor);
            self.hits.clear();
            self.done_until = self.done_until.max(cursor + 1);
        }

        if ctx.at_window_end() {
            self.flush_pending(dict, ctx, cursor + 1);
            self.hits.clear();
        }

        ctx.set_lock(SegmenterKind::Cjk, self.holds_lock());
        Ok(())
    }

    pub fn reset(&mut self) {
        self.done_until = 0;
        self.hits.clear();
    }

    #[inline]
    pub fn holds_lock(&self) -> bool {
        !self.hits.is_empty()
    }

    fn extend_pending(&mut self, dict: &Dictionary, ctx: &mut ScanContext, cursor: usize) {
        let mut i = 0;
        while i < self.hits.len() {
            let hit = dict.continue_in_main(ctx.buffer(), cursor, &self.hits[i]);
            if hit.is_match() {
                if hit.begin() > self.done_until {
                    Self::process_unknown(dict, ctx, self.done_until, hit.begin() - 1);
                }
                ctx.add_lexeme(Lexeme::new(
                    ctx.buffer_offset(),
                    hit.begin(),
                    cursor - hit.begin() + 1,
                    LexemeType::Normal,
                ));
                self.done_until = self.done_until.max(cursor + 1);
            }
            if hit.is_prefix() {
                self.hits[i] = hit;
                i += 1;
            } else {
                self.hits.remove(i);
            }
        }
    }

    fn start_at(&mut self, dict: &Dictionary, ctx: &mut ScanContext, cursor: usize) {
        let hit = dict.match_in_main(ctx.buffer(), cursor, 1);
        if hit.is_match() {
            if cursor > self.done_until {
                Self::process_unknown(dict, ctx, self.done_until, cursor - 1);
            }
            ctx.add_lexeme(Lexeme::new(ctx.buffer_offset(), cursor, 1, LexemeType::Normal));
            self.done_until = self.done_until.max(cursor + 1);
            if hit.is_prefix() {
                self.hits.push(hit);
            }
        } else if hit.is_prefix() {
            self.hits.push(hit);
        } else if self.done_until <= cursor {
            Self::process_unknown(dict, ctx, self.done_until, cursor);
            self.done_until = cursor + 1;
        }
    }

    /// Emits the uncovered tails of pending prefixes that can no longer grow.
    /// Nothing happens unless output stops short of `bound`.
    fn flush_pending(&mut self, dict: &Dictionary, ctx: &mut ScanContext, bound: usize) {
        if self.done_until >= bound {
            return;
        }
        for hit in std::mem::take(&mut self.hits) {
            if self.done_until <= hit.end() {
                Self::process_unknown(dict, ctx, self.done_until, hit.end());
                self.done_until = hit.end() + 1;
            }
        }
    }

    /// Unknown-segment policy for the inclusive window range `u_begin..=u_end`:
    /// surnames inside the range, one unknown lexeme per character, then a
    /// suffix right after the range.
    fn process_unknown(dict: &Dictionary, ctx: &mut ScanContext, u_begin: usize, u_end: usize) {
        trace!(begin = u_begin, end = u_end, "unknown segment");
        let offset = ctx.buffer_offset();
        let available = ctx.available();

        if dict.match_in_preposition(ctx.buffer(), u_begin, 1).is_unmatch() {
            let mut index = u_begin;
            while index <= u_end {
                let hit = dict.match_in_surname(ctx.buffer(), index, 1);
                // two-character surnames only
                let compound = hit.is_prefix()
                    && index + 1 < available
                    && dict
                        .continue_in_surname(ctx.buffer(), index + 1, &hit)
                        .is_match();
                if compound {
                    ctx.add_lexeme(Lexeme::new(offset, index, 2, LexemeType::Surname));
                    index += 2;
                    continue;
                }
                if hit.is_match() {
                    ctx.add_lexeme(Lexeme::new(offset, index, 1, LexemeType::Surname));
                }
                index += 1;
            }
        }

        for i in u_begin..=u_end {
            ctx.add_lexeme(Lexeme::new(offset, i, 1, LexemeType::Unknown));
        }

        if dict.match_in_preposition(ctx.buffer(), u_end, 1).is_unmatch() {
            let mut pending: Option<Hit> = None;
            let mut index = u_end + 1;
            while index < available {
                let hit = match &pending {
                    None => dict.match_in_suffix(ctx.buffer(), index, 1),
                    Some(prior) => dict.continue_in_suffix(ctx.buffer(), index, prior),
                };
                if hit.is_match() {
                    ctx.add_lexeme(Lexeme::new(offset, u_end + 1, index - u_end, LexemeType::Suffix));
                    break;
                }
                if hit.is_unmatch() {
                    break;
                }
                pending = Some(hit);
                index += 1;
            }
        }
    }
}
