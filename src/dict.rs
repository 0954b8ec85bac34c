//! Dictionary categories and their construction.
//!
//! A [`Dictionary`] bundles one read-only [`Trie`] per [`DictCategory`].
//! The scan core only ever calls the generated `match_in_*` /
//! `continue_in_*` helpers and [`Dictionary::is_stop_word`]; everything else
//! in this module exists to build the tries from word lists.
pub mod trie;

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use memchr::memchr_iter;
use paste::paste;
use thiserror::Error;
use tracing::debug;

pub use trie::{Hit, NodeId, Trie};

use crate::unicode::regularize;

#[derive(Debug, Error)]
pub enum DictError {
    #[error("cannot read dictionary file `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dictionary `{category}` line {line} is not valid UTF-8")]
    InvalidUtf8 { category: &'static str, line: usize },
}

/// ---------------------------------------------------------------------------
///    Macro – generates the category enum, the dictionary struct and one
///    `match_in_<field>` / `continue_in_<field>` pair per category.
/// ---------------------------------------------------------------------------
macro_rules! define_dictionaries {
    ($( $variant:ident => $field:ident, $file:literal );* $(;)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum DictCategory {
            $($variant),*
        }

        impl DictCategory {
            pub const ALL: &'static [DictCategory] = &[$(DictCategory::$variant),*];

            /// Default word-list file name inside a dictionary directory.
            #[inline]
            pub const fn file_name(self) -> &'static str {
                match self {
                    $(DictCategory::$variant => $file),*
                }
            }

            #[inline]
            pub const fn name(self) -> &'static str {
                match self {
                    $(DictCategory::$variant => stringify!($field)),*
                }
            }
        }

        /// One trie per word category.
        #[derive(Debug, Clone, Default)]
        pub struct Dictionary {
            $($field: Trie,)*
        }

        impl Dictionary {
            #[inline]
            pub fn trie(&self, category: DictCategory) -> &Trie {
                match category {
                    $(DictCategory::$variant => &self.$field),*
                }
            }

            #[inline]
            fn trie_mut(&mut self, category: DictCategory) -> &mut Trie {
                match category {
                    $(DictCategory::$variant => &mut self.$field),*
                }
            }

            paste! {
                $(
                    #[doc = concat!("Fresh query against the `", $file, "` words.")]
                    #[inline]
                    pub fn [<match_in_ $field>](&self, buf: &[char], begin: usize, length: usize) -> Hit {
                        self.$field.match_at(buf, begin, length)
                    }

                    #[doc = concat!("Continues a `", $file, "` hit with `buf[index]`.")]
                    #[inline]
                    pub fn [<continue_in_ $field>](&self, buf: &[char], index: usize, prior: &Hit) -> Hit {
                        self.$field.match_from(buf, index, prior)
                    }
                )*
            }
        }
    };
}

define_dictionaries! {
    Main => main, "main.dic";
    Surname => surname, "surname.dic";
    Quantifier => quantifier, "quantifier.dic";
    Suffix => suffix, "suffix.dic";
    Preposition => preposition, "preposition.dic";
    StopWord => stop_word, "stopword.dic";
}

impl Dictionary {
    pub fn builder() -> DictionaryBuilder {
        DictionaryBuilder::default()
    }

    /// Loads every category from `dir/<category file name>`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, DictError> {
        Ok(Self::builder().load_dir(dir)?.build())
    }

    /// True when `buf[begin..begin + length]` is exactly a stop word.
    #[inline]
    pub fn is_stop_word(&self, buf: &[char], begin: usize, length: usize) -> bool {
        self.match_in_stop_word(buf, begin, length).is_match()
    }
}

#[derive(Debug, Default)]
pub struct DictionaryBuilder {
    dict: Dictionary,
}

impl DictionaryBuilder {
    /// Adds words to `category`. Words are trimmed and regularized the same
    /// way scanned text is, so `ＡＢＣ` in a word list matches `abc` input.
    pub fn words<I, S>(mut self, category: DictCategory, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let trie = self.dict.trie_mut(category);
        for w in words {
            let w = w.as_ref().trim();
            if !w.is_empty() {
                trie.insert(w.chars().map(regularize));
            }
        }
        self
    }

    /// Adds a UTF-8 word list: one word per line, blank lines ignored.
    pub fn word_list(self, category: DictCategory, bytes: &[u8]) -> Result<Self, DictError> {
        let words = split_word_list(category, bytes)?;
        Ok(self.words(category, words))
    }

    /// Reads each category's default file from `dir`. Missing files leave the
    /// category empty.
    pub fn load_dir(mut self, dir: impl AsRef<Path>) -> Result<Self, DictError> {
        let dir = dir.as_ref();
        for &category in DictCategory::ALL {
            let path = dir.join(category.file_name());
            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!(category = category.name(), path = %path.display(), "dictionary file missing, category left empty");
                    continue;
                }
                Err(source) => return Err(DictError::Io { path, source }),
            };
            self = self.word_list(category, &bytes)?;
            debug!(
                category = category.name(),
                words = self.dict.trie(category).len(),
                "dictionary loaded"
            );
        }
        Ok(self)
    }

    pub fn build(self) -> Dictionary {
        self.dict
    }
}

fn split_word_list(category: DictCategory, bytes: &[u8]) -> Result<Vec<&str>, DictError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let mut words = Vec::new();
    let mut start = 0;
    let ends = memchr_iter(b'\n', bytes).chain(std::iter::once(bytes.len()));
    for (line, end) in ends.enumerate() {
        let raw = &bytes[start..end];
        start = end + 1;
        let text = std::str::from_utf8(raw).map_err(|_| DictError::InvalidUtf8 {
            category: category.name(),
            line: line + 1,
        })?;
        let word = text.trim();
        if !word.is_empty() {
            words.push(word);
        }
    }
    Ok(words)
}
