#[cfg(test)]
mod scanner_tests {
    use rox::error::LoxError;
    use rox::scanner::*;
    use rox::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenType, &str)]) {
        let scanner = Scanner::new(source);
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len());

        for (actual, (expected_type, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.token_type, *expected_type);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*.,+*})",
            &[
                (TokenType::LEFT_PAREN, "("),
                (TokenType::LEFT_BRACE, "{"),
                (TokenType::STAR, "*"),
                (TokenType::DOT, "."),
                (TokenType::COMMA, ","),
                (TokenType::PLUS, "+"),
                (TokenType::STAR, "*"),
                (TokenType::RIGHT_BRACE, "}"),
                (TokenType::RIGHT_PAREN, ")"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_two_character_operators_munch_maximally() {
        assert_token_sequence(
            "!= ! == = <= < >= > /",
            &[
                (TokenType::BANG_EQUAL, "!="),
                (TokenType::BANG, "!"),
                (TokenType::EQUAL_EQUAL, "=="),
                (TokenType::EQUAL, "="),
                (TokenType::LESS_EQUAL, "<="),
                (TokenType::LESS, "<"),
                (TokenType::GREATER_EQUAL, ">="),
                (TokenType::GREATER, ">"),
                (TokenType::SLASH, "/"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_token_sequence(
            "var fun_ x = nil; while whiles orchid or",
            &[
                (TokenType::VAR, "var"),
                (TokenType::IDENTIFIER, "fun_"),
                (TokenType::IDENTIFIER, "x"),
                (TokenType::EQUAL, "="),
                (TokenType::NIL, "nil"),
                (TokenType::SEMICOLON, ";"),
                (TokenType::WHILE, "while"),
                (TokenType::IDENTIFIER, "whiles"),
                (TokenType::IDENTIFIER, "orchid"),
                (TokenType::OR, "or"),
                (TokenType::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_comments_are_skipped_and_lines_counted() {
        let (tokens, errors) = scan_tokens("// nothing here\nprint 1; // trailing\n\nx");
        assert!(errors.is_empty());

        let lines: Vec<(String, usize)> = tokens
            .iter()
            .map(|t| (t.lexeme.clone(), t.line))
            .collect();

        assert_eq!(
            lines,
            vec![
                ("print".to_string(), 2),
                ("1".to_string(), 2),
                (";".to_string(), 2),
                ("x".to_string(), 4),
                ("".to_string(), 4),
            ]
        );
    }

    #[test]
    fn test_numbers_do_not_swallow_trailing_dot() {
        let (tokens, errors) = scan_tokens("12.5 7. 3");
        assert!(errors.is_empty());

        assert_eq!(tokens[0].literal(), Some(Literal::Number(12.5)));
        assert_eq!(tokens[1].literal(), Some(Literal::Number(7.0)));
        assert_eq!(tokens[2].token_type, TokenType::DOT);
        assert_eq!(tokens[3].literal(), Some(Literal::Number(3.0)));
    }

    #[test]
    fn test_strings_span_lines() {
        let (tokens, errors) = scan_tokens("\"one\ntwo\" x");
        assert!(errors.is_empty());

        assert_eq!(tokens[0].literal(), Some(Literal::Text("one\ntwo")));
        assert_eq!(tokens[0].lexeme, "\"one\ntwo\"");
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_unterminated_string_is_reported_once() {
        let (tokens, errors) = scan_tokens("print \"oops\n");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "[line 2] Error: Unterminated string.");

        let kinds: Vec<&str> = tokens.iter().map(|t| t.token_type.name()).collect();
        assert_eq!(kinds, vec!["PRINT", "EOF"]);
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = ",.$(#";
        let scanner = Scanner::new(source);

        let results: Vec<_> = scanner.collect();

        // 0: COMMA ','
        // 1: DOT '.'
        // 2: Error for '$'
        // 3: LEFT_PAREN '('
        // 4: Error for '#'
        // 5: EOF
        assert_eq!(results.len(), 6, "Expected 6 items in result");

        assert_token_matches(&results[0], TokenType::COMMA, ",");
        assert_token_matches(&results[1], TokenType::DOT, ".");
        assert_token_matches(&results[3], TokenType::LEFT_PAREN, "(");
        assert_token_matches(&results[5], TokenType::EOF, "");

        let errors: Vec<String> = results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .map(|e| e.to_string())
            .collect();

        assert_eq!(
            errors,
            vec![
                "[line 1] Error: Unexpected character: $".to_string(),
                "[line 1] Error: Unexpected character: #".to_string(),
            ]
        );

        fn assert_token_matches(
            result: &Result<Token, LoxError>,
            expected_type: TokenType,
            expected_lexeme: &str,
        ) {
            match result {
                Ok(token) => {
                    assert_eq!(
                        token.token_type, expected_type,
                        "Expected token type {:?}, got {:?}",
                        expected_type, token.token_type
                    );
                    assert_eq!(
                        token.lexeme, expected_lexeme,
                        "Expected lexeme '{}', got '{}'",
                        expected_lexeme, token.lexeme
                    );
                }
                Err(e) => panic!("Expected token but got error: {}", e),
            }
        }
    }

    #[test]
    fn test_non_ascii_character_is_skipped_whole() {
        let (tokens, errors) = scan_tokens("a é b");

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message(), "Unexpected character: é");

        let lexemes: Vec<&str> = tokens.iter().map(|t| t.lexeme.as_str()).collect();
        assert_eq!(lexemes, vec!["a", "b", ""]);
    }

    #[test]
    fn test_token_display() {
        let (tokens, _) = scan_tokens("42 \"hi\" and");
        let shown: Vec<String> = tokens.iter().map(|t| t.to_string()).collect();

        assert_eq!(
            shown,
            vec![
                "NUMBER 42 42.0".to_string(),
                "STRING \"hi\" hi".to_string(),
                "AND and null".to_string(),
                "EOF  null".to_string(),
            ]
        );
    }

    #[test]
    fn test_tokens_serialize_to_json() {
        let (tokens, errors) = scan_tokens("var s = \"hi\";\n12");
        assert!(errors.is_empty());

        let json = serde_json::to_value(&tokens).unwrap();

        assert_eq!(
            json[0],
            serde_json::json!({ "token_type": "VAR", "lexeme": "var", "line": 1 })
        );
        assert_eq!(
            json[3],
            serde_json::json!({ "token_type": { "STRING": "hi" }, "lexeme": "\"hi\"", "line": 1 })
        );
        assert_eq!(json[5]["token_type"], serde_json::json!({ "NUMBER": 12.0 }));
        assert_eq!(json[5]["line"], 2);
        assert_eq!(json[6]["token_type"], "EOF");
        assert_eq!(json.as_array().map(Vec::len), Some(7));
    }
}
