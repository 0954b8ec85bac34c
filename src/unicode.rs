//! Character classification used by every sub-segmenter in the hot path.
//! All predicates are branch-light range checks; no tables are consulted
//! except the connector and numeral sets below.

use phf::{Set, phf_set};

/// Symbols allowed *inside* a mixed letter/digit run (`windows2000`,
/// `naughty610@qq.com`, `ftp://bd.com`), never at its start.
static LETTER_CONNECTORS: Set<char> = phf_set! {
    ':', '+', '-', '_', '.', '@', '&', '/', '\\',
};

/// Chinese numerals, both the everyday and the financial (大写) forms.
static CHINESE_NUMERALS: Set<char> = phf_set! {
    '零', '〇', '一', '二', '两', '三', '四', '五', '六', '七', '八', '九', '十',
    '百', '千', '万', '亿', '兆', '廿', '卅',
    '壹', '贰', '叁', '肆', '伍', '陆', '柒', '捌', '玖', '拾', '佰', '仟', '萬', '億',
};

// Hangul syllables + jamo + compatibility jamo.
#[inline(always)]
pub fn is_hangul(c: char) -> bool {
    matches!(c as u32,
        0xAC00..=0xD7AF | // Syllables
        0x1100..=0x11FF | // Jamo
        0x3130..=0x318F   // Compatibility Jamo
    )
}

// Hiragana block.
#[inline(always)]
pub fn is_hiragana(c: char) -> bool {
    matches!(c as u32, 0x3040..=0x309F)
}

// Katakana + phonetic extensions.
#[inline(always)]
pub fn is_katakana(c: char) -> bool {
    matches!(c as u32,
        0x30A0..=0x30FF | // Katakana
        0x31F0..=0x31FF   // Phonetic Extensions
    )
}

// Unified Han + extension A + compatibility block.
#[inline(always)]
pub fn is_cjk_unified_ideograph(c: char) -> bool {
    matches!(c as u32,
        0x4E00..=0x9FFF | // Unified
        0x3400..=0x4DBF | // Ext A
        0xF900..=0xFAFF   // Compatibility
    )
}

/// Characters handled by the CJK segmenter: Han ideographs, kana and Hangul.
///
/// Japanese and Korean characters have no dictionary coverage in practice and
/// therefore fall through to single-character unknown lexemes.
#[inline(always)]
pub fn is_cjk_character(c: char) -> bool {
    is_cjk_unified_ideograph(c) || is_hiragana(c) || is_katakana(c) || is_hangul(c)
}

#[inline(always)]
pub const fn is_english_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
}

#[inline(always)]
pub const fn is_arabic_number(c: char) -> bool {
    c.is_ascii_digit()
}

#[inline]
pub fn is_letter_connector(c: char) -> bool {
    LETTER_CONNECTORS.contains(&c)
}

#[inline]
pub fn is_chinese_numeral(c: char) -> bool {
    CHINESE_NUMERALS.contains(&c)
}

// Fullwidth Latin punctuation/letters in FF01–FF5E plus ideographic space.
#[inline(always)]
pub fn is_fullwidth(c: char) -> bool {
    let cp = c as u32;
    (0xFF01..=0xFF5E).contains(&cp) || cp == 0x3000
}

#[inline(always)]
pub fn fullwidth_to_halfwidth(c: char) -> char {
    let cp = c as u32;
    if (0xFF01..=0xFF5E).contains(&cp) {
        char::from_u32(cp - 0xFEE0).unwrap_or(c)
    } else if cp == 0x3000 {
        ' '
    } else {
        c
    }
}

/// Folds a character into the form the dictionaries are stored in:
/// full-width ASCII becomes half-width, ASCII upper case becomes lower case.
///
/// The driver applies this to every window character before any segmenter
/// sees it, and dictionary words are folded the same way on insertion.
#[inline(always)]
pub fn regularize(c: char) -> char {
    let c = if is_fullwidth(c) {
        fullwidth_to_halfwidth(c)
    } else {
        c
    };
    c.to_ascii_lowercase()
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum CharClass {
    Other,   // Symbols, whitespace, punctuation outside the connector set
    Letter,  // ASCII letters
    Digit,   // ASCII digits
    Connector,
    Cjk,     // Han ideographs + kana + Hangul
}

#[inline(always)]
pub fn classify(c: char) -> CharClass {
    if is_english_letter(c) {
        return CharClass::Letter;
    }
    if is_arabic_number(c) {
        return CharClass::Digit;
    }
    if is_letter_connector(c) {
        return CharClass::Connector;
    }
    if is_cjk_character(c) {
        return CharClass::Cjk;
    }
    CharClass::Other
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cjk_characters_are_detected() {
        for c in ['中', '国', '㐀', '豈', 'あ', 'カ', '한', 'ㄱ'] {
            assert!(is_cjk_character(c), "Missed CJK U+{:04X}", c as u32);
        }
        for c in ['a', '1', '《', '，', ' ', 'é'] {
            assert!(!is_cjk_character(c), "False CJK U+{:04X}", c as u32);
        }
    }

    #[test]
    fn connectors_match_the_mixed_run_set() {
        for c in [':', '+', '-', '_', '.', '@', '&', '/', '\\'] {
            assert!(is_letter_connector(c));
        }
        assert!(!is_letter_connector('#'));
        assert!(!is_letter_connector('a'));
    }

    #[test]
    fn regularize_folds_width_and_case() {
        assert_eq!(regularize('Ａ'), 'a');
        assert_eq!(regularize('５'), '5');
        assert_eq!(regularize('\u{3000}'), ' ');
        assert_eq!(regularize('Q'), 'q');
        assert_eq!(regularize('中'), '中');
        assert_eq!(regularize('《'), '《');
    }

    #[test]
    fn char_classification() {
        use CharClass::*;
        assert_eq!(classify('x'), Letter);
        assert_eq!(classify('7'), Digit);
        assert_eq!(classify('@'), Connector);
        assert_eq!(classify('字'), Cjk);
        assert_eq!(classify('》'), Other);
        assert_eq!(classify(' '), Other);
    }

    #[test]
    fn chinese_numerals() {
        for c in ['一', '两', '十', '万', '亿', '壹', '玖'] {
            assert!(is_chinese_numeral(c));
        }
        assert!(!is_chinese_numeral('个'));
        assert!(!is_chinese_numeral('1'));
    }
}
