#[cfg(test)]
mod integration_tests {

    use crate::{DictCategory, Dictionary, LexemeType, Token, Tokenizer};
    use std::{fs, sync::Arc};

    const MAIN: &str = "通过\n学习\n中华\n中华人民共和国\n人民\n共和国\n成立\n";

    fn dictionary() -> Dictionary {
        Dictionary::builder()
            .word_list(DictCategory::Main, MAIN.as_bytes())
            .unwrap()
            .words(DictCategory::Surname, ["徐", "欧阳"])
            .words(DictCategory::Quantifier, ["个", "年"])
            .words(DictCategory::Suffix, ["省"])
            .words(DictCategory::StopWord, ["了"])
            .build()
    }

    fn kinds(tokens: &[Token]) -> Vec<(&str, LexemeType)> {
        tokens.iter().map(|t| (t.text.as_str(), t.kind)).collect()
    }

    #[test]
    fn mixed_script_sentence() {
        let tokenizer = Tokenizer::builder().dictionary(Arc::new(dictionary())).build();
        let tokens = tokenizer.tokenize("通过ftp://bd.com学习english").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![
                ("通过", LexemeType::Normal),
                ("ftp://bd.com", LexemeType::Url),
                ("学习", LexemeType::Normal),
                ("english", LexemeType::Letter),
            ]
        );
        let spans: Vec<_> = tokens.iter().map(|t| (t.begin, t.end)).collect();
        assert_eq!(spans, vec![(0, 2), (2, 14), (14, 16), (16, 23)]);
    }

    #[test]
    fn longest_word_wins_and_stop_words_vanish() {
        let tokenizer = Tokenizer::builder().dictionary(Arc::new(dictionary())).build();
        let tokens = tokenizer.tokenize("中华人民共和国成立了").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![("中华人民共和国", LexemeType::Normal), ("成立", LexemeType::Normal)]
        );
    }

    #[test]
    fn dictionary_directory_round_trip() {
        let dir = std::env::temp_dir().join(format!("hanlex-dict-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("main.dic"), MAIN).unwrap();
        fs::write(dir.join("surname.dic"), "徐\n欧阳\n").unwrap();
        fs::write(dir.join("stopword.dic"), "\u{feff}了\n").unwrap();

        let dict = Dictionary::load_dir(&dir).unwrap();
        fs::remove_dir_all(&dir).ok();

        assert!(dict.trie(DictCategory::Main).contains("中华人民共和国"));
        assert!(dict.trie(DictCategory::Quantifier).is_empty());

        let tokenizer = Tokenizer::builder().dictionary(Arc::new(dict)).build();
        let tokens = tokenizer.tokenize("欧阳锋学习了").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![("欧阳锋", LexemeType::FullName), ("学习", LexemeType::Normal)]
        );
    }

    #[test]
    fn small_windows_match_one_big_window() {
        let text = "中华人民共和国成立了。".repeat(300);
        let dict = Arc::new(dictionary());
        let big = Tokenizer::builder()
            .dictionary(Arc::clone(&dict))
            .build()
            .tokenize(&text)
            .unwrap();
        let small = Tokenizer::builder()
            .dictionary(dict)
            .window_size(64)
            .exhaust_critical(16)
            .build()
            .tokenize(&text)
            .unwrap();

        assert_eq!(big, small);
        assert_eq!(
            big.iter()
                .filter(|t| t.text == "中华人民共和国")
                .count(),
            300
        );
        assert!(big.windows(2).all(|w| w[0].begin < w[1].begin));
    }

    #[test]
    fn suffix_across_an_early_stop_is_lexed_once() {
        let text = "鑫犇鑫犇鑫犇公司鑫犇鑫犇";
        let dict = Arc::new(
            Dictionary::builder()
                .words(DictCategory::Suffix, ["公司"])
                .build(),
        );
        let big = Tokenizer::builder()
            .dictionary(Arc::clone(&dict))
            .build()
            .tokenize(text)
            .unwrap();
        let small = Tokenizer::builder()
            .dictionary(dict)
            .window_size(8)
            .exhaust_critical(4)
            .build()
            .tokenize(text)
            .unwrap();

        assert_eq!(big, small);
        assert_eq!(
            small.iter().filter(|t| t.text == "公司").count(),
            1
        );
        assert!(small.iter().all(|t| t.text != "公" && t.text != "司"));
        assert!(small.windows(2).all(|w| w[0].end <= w[1].begin));
    }

    #[test]
    fn chars_from_any_source() {
        let tokenizer = Tokenizer::builder().dictionary(Arc::new(dictionary())).build();
        let source = "学习rust".chars().chain("和go".chars());
        let texts: Vec<String> = tokenizer
            .segment_chars(source)
            .map(|t| t.unwrap().text)
            .collect();
        assert_eq!(texts, vec!["学习", "rust", "和", "go"]);
    }
}
