#[cfg(test)]
mod unit_tests {

    use crate::{DictCategory, Dictionary, LexemeType, NameMergePolicy, Token, Tokenizer};
    use std::sync::Arc;

    fn tokenizer(dict: Dictionary) -> Tokenizer {
        Tokenizer::builder().dictionary(Arc::new(dict)).build()
    }

    fn kinds(tokens: &[Token]) -> Vec<(&str, LexemeType)> {
        tokens.iter().map(|t| (t.text.as_str(), t.kind)).collect()
    }

    #[test]
    fn book_title_in_sentence() {
        let tokens = Tokenizer::default().tokenize("《论语》").unwrap();
        assert_eq!(kinds(&tokens), vec![("论语", LexemeType::BookTitle)]);
        assert_eq!((tokens[0].begin, tokens[0].end), (1, 3));
    }

    #[test]
    fn unclosed_book_title_falls_back_to_unknowns() {
        let tokens = Tokenizer::default().tokenize("《论语").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![("论", LexemeType::Unknown), ("语", LexemeType::Unknown)]
        );
    }

    #[test]
    fn unknown_text_one_token_per_char() {
        let tokens = Tokenizer::default().tokenize("鑫犇淼").unwrap();
        let spans: Vec<_> = tokens.iter().map(|t| (t.begin, t.end, t.kind)).collect();
        assert_eq!(
            spans,
            vec![
                (0, 1, LexemeType::Unknown),
                (1, 2, LexemeType::Unknown),
                (2, 3, LexemeType::Unknown),
            ]
        );
    }

    #[test]
    fn full_name_beats_surname_in_max_mode() {
        let dict = Dictionary::builder()
            .words(DictCategory::Surname, ["徐"])
            .build();
        let tokens = tokenizer(dict).tokenize("徐增寿").unwrap();
        assert_eq!(kinds(&tokens), vec![("徐增寿", LexemeType::FullName)]);
    }

    #[test]
    fn fine_mode_keeps_name_candidates() {
        let dict = Dictionary::builder()
            .words(DictCategory::Surname, ["徐"])
            .build();
        let tokenizer = Tokenizer::builder()
            .dictionary(Arc::new(dict))
            .max_word_length(false)
            .build();
        let tokens = tokenizer.tokenize("徐增寿").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![
                ("徐增寿", LexemeType::FullName),
                ("徐", LexemeType::Surname),
                ("增", LexemeType::Unknown),
                ("寿", LexemeType::Unknown),
            ]
        );
    }

    #[test]
    fn name_policy_reaches_the_scan() {
        let dict = Arc::new(
            Dictionary::builder()
                .words(DictCategory::Surname, ["李"])
                .words(DictCategory::Preposition, ["在"])
                .build(),
        );
        let strict = Tokenizer::builder().dictionary(Arc::clone(&dict)).build();
        assert!(
            strict
                .tokenize("李在家")
                .unwrap()
                .iter()
                .all(|t| t.kind != LexemeType::FullName)
        );

        let loose = Tokenizer::builder()
            .dictionary(dict)
            .name_policy(NameMergePolicy::SurnameOnly)
            .build();
        assert_eq!(
            kinds(&loose.tokenize("李在家").unwrap()),
            vec![("李在家", LexemeType::FullName)]
        );
    }

    #[test]
    fn stop_words_never_surface() {
        let dict = Dictionary::builder()
            .words(DictCategory::StopWord, ["的", "the"])
            .words(DictCategory::Main, ["的"])
            .build();
        let tokens = tokenizer(dict).tokenize("我的 the book").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![("我", LexemeType::Unknown), ("book", LexemeType::Letter)]
        );
    }

    #[test]
    fn input_is_regularized() {
        let tokens = Tokenizer::default().tokenize("ＨＥＬＬＯ　Ｗｏｒｌｄ").unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![("hello", LexemeType::Letter), ("world", LexemeType::Letter)]
        );
    }

    #[test]
    fn numbers_and_counts() {
        let dict = Dictionary::builder()
            .words(DictCategory::Quantifier, ["个", "公斤"])
            .build();
        let tokens = tokenizer(dict).tokenize("3个苹果重1.5公斤").unwrap();
        let picked: Vec<_> = kinds(&tokens)
            .into_iter()
            .filter(|(_, k)| matches!(k, LexemeType::Number | LexemeType::Count))
            .collect();
        assert_eq!(
            picked,
            vec![
                ("3", LexemeType::Number),
                ("个", LexemeType::Count),
                ("1.5", LexemeType::Number),
                ("公斤", LexemeType::Count),
            ]
        );
    }
}
