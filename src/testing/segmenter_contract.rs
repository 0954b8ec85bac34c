use std::sync::Arc;

use crate::{
    context::ScanContext,
    dict::Dictionary,
    lexeme::Lexeme,
    segment::{Segmenter, SegmenterKind},
};

/// Trait that sub-segmenters implement to opt into the universal test suite.
pub trait SegmenterTestConfig {
    const KIND: SegmenterKind;

    /// Dictionary the samples are scanned against.
    fn dictionary() -> Dictionary {
        Dictionary::default()
    }

    /// Inputs that exercise the segmenter's own state machine.
    fn samples() -> &'static [&'static str];
}

/// Assert that a segmenter satisfies the universal contracts:
///
/// 1. `lexemes_stay_inside_window` → every proposal is non-empty and in bounds
/// 2. `reset_releases_lock` → no lock survives `reset()`, wherever the scan stopped
/// 3. `rescan_after_reset_is_identical` → no state leaks from one window into the next
/// 4. `no_panic_on_mixed_scripts` → survives pathological real-world input
#[macro_export]
macro_rules! assert_segmenter_contract {
    ($segmenter:ty) => {
        $crate::testing::segmenter_contract::lexemes_stay_inside_window::<$segmenter>();
        $crate::testing::segmenter_contract::reset_releases_lock::<$segmenter>();
        $crate::testing::segmenter_contract::rescan_after_reset_is_identical::<$segmenter>();
        $crate::testing::segmenter_contract::no_panic_on_mixed_scripts::<$segmenter>();
    };
}

/// Feeds `text` as one window to a fresh segmenter of `kind` and returns its
/// proposals in set order.
pub fn scan(kind: SegmenterKind, dict: &Dictionary, text: &str) -> Vec<Lexeme> {
    let mut segmenter = Segmenter::new(kind);
    feed(&mut segmenter, dict, text, usize::MAX).0
}

/// Feeds at most `limit` characters of `text` (the window still holds all of
/// it). Returns the proposals and the context's final lock state.
fn feed(segmenter: &mut Segmenter, dict: &Dictionary, text: &str, limit: usize) -> (Vec<Lexeme>, bool) {
    let dict = Arc::new(dict.clone());
    let mut ctx = ScanContext::new(Arc::clone(&dict), false);
    ctx.load_window(text.chars());
    for cursor in 0..ctx.available().min(limit) {
        ctx.set_cursor(cursor).expect("cursor within window");
        ctx.regularize_current();
        segmenter
            .analyze(&dict, &mut ctx)
            .unwrap_or_else(|e| panic!("{} failed on `{text}`: {e}", segmenter.kind().name()));
    }
    let locked = ctx.is_buffer_locked();
    (ctx.lexemes().iter().copied().collect(), locked)
}

const MIXED_SCRIPTS: &[&str] = &[
    "",
    " ",
    "hello world 123",
    "通过ftp://bd.com学习english",
    "《》《《》》",
    "日本語のテキストと한국어",
    "３．１４１５ＡＢＣ",
    "a\u{0301}\u{200D}👨‍👩‍👧\u{FEFF}",
    "一二三四五六七八九十百千万亿",
    "::..//@@&&",
    "\0\t\r\n",
];

pub fn lexemes_stay_inside_window<S: SegmenterTestConfig>() {
    let dict = S::dictionary();
    for &input in S::samples().iter().chain(MIXED_SCRIPTS) {
        let len = input.chars().count();
        for lexeme in scan(S::KIND, &dict, input) {
            assert!(lexeme.length() > 0, "empty lexeme {lexeme} on `{input}`");
            assert!(
                lexeme.begin() + lexeme.length() <= len,
                "lexeme {lexeme} outside `{input}` ({len} chars)"
            );
        }
    }
}

pub fn reset_releases_lock<S: SegmenterTestConfig>() {
    let dict = S::dictionary();
    for &input in S::samples() {
        for limit in 0..=input.chars().count() {
            let mut segmenter = Segmenter::new(S::KIND);
            let (_, locked) = feed(&mut segmenter, &dict, input, limit);
            assert_eq!(
                locked,
                segmenter.holds_lock(),
                "lock flag out of sync after {limit} chars of `{input}`"
            );
            segmenter.reset();
            assert!(!segmenter.holds_lock(), "lock survives reset on `{input}`");
        }
    }
}

pub fn rescan_after_reset_is_identical<S: SegmenterTestConfig>() {
    let dict = S::dictionary();
    let mut segmenter = Segmenter::new(S::KIND);
    for &input in S::samples() {
        let (first, _) = feed(&mut segmenter, &dict, input, usize::MAX);
        segmenter.reset();
        let (second, _) = feed(&mut segmenter, &dict, input, usize::MAX);
        segmenter.reset();
        assert_eq!(first, second, "rescan differs on `{input}`");
        let kinds: Vec<_> = first.iter().map(|l| l.kind()).collect();
        let again: Vec<_> = second.iter().map(|l| l.kind()).collect();
        assert_eq!(kinds, again, "lexeme types differ on rescan of `{input}`");
    }
}

pub fn no_panic_on_mixed_scripts<S: SegmenterTestConfig>() {
    let dict = S::dictionary();
    let mut segmenter = Segmenter::new(S::KIND);
    for &input in MIXED_SCRIPTS {
        let _ = feed(&mut segmenter, &dict, input, usize::MAX);
        segmenter.reset();
    }
}
