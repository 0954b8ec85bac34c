pub mod context;
pub mod dict;
pub mod lexeme;
pub mod pattern;
pub mod segment;
pub mod tokenizer;
pub mod unicode;

#[cfg(test)]
mod testing;

pub use context::{NameMergePolicy, ScanContext, ScanError};
pub use dict::{DictCategory, DictError, Dictionary, DictionaryBuilder, Hit, Trie};
pub use lexeme::{Lexeme, LexemeType, SortedLexemeSet};
pub use segment::{Segmenter, SegmenterKind};
pub use tokenizer::{HanlexError, Segmentation, Token, Tokenizer, TokenizerBuilder};
