#[cfg(test)]
mod parser_tests {
    use rox::ast::{Expr, Stmt};
    use rox::ast_printer::AstPrinter;
    use rox::error::LoxError;
    use rox::parser::Parser;
    use rox::scanner::scan_tokens;
    use rox::session::{Session, EXIT_STATIC};

    fn parse(source: &str) -> Result<Vec<Stmt>, Vec<LoxError>> {
        let (tokens, lex_errors) = scan_tokens(source);
        assert!(lex_errors.is_empty(), "unexpected lexical errors");
        Parser::new(tokens).parse()
    }

    fn printed(source: &str) -> Vec<String> {
        parse(source)
            .expect("program should parse")
            .iter()
            .map(AstPrinter::print_stmt)
            .collect()
    }

    fn messages(source: &str) -> Vec<String> {
        parse(source)
            .expect_err("program should not parse")
            .iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn binary_levels_are_left_associative() {
        assert_eq!(printed("1 - 2 - 3;"), vec!["(; (- (- 1.0 2.0) 3.0))"]);
        assert_eq!(printed("a == b != c;"), vec!["(; (!= (== a b) c))"]);
        assert_eq!(printed("1 < 2 == true;"), vec!["(; (== (< 1.0 2.0) true))"]);
    }

    #[test]
    fn assignment_is_right_associative() {
        assert_eq!(printed("a = b = 1;"), vec!["(; (= a (= b 1.0)))"]);
    }

    #[test]
    fn or_binds_looser_than_and() {
        assert_eq!(printed("a or b and c;"), vec!["(; (or a (and b c)))"]);
    }

    #[test]
    fn calls_chain() {
        assert_eq!(printed("f()(1)(2, 3);"), vec!["(; (call (call (call f) 1.0) 2.0 3.0))"]);
    }

    #[test]
    fn else_binds_to_nearest_if() {
        assert_eq!(
            printed("if (a) if (b) print 1; else print 2;"),
            vec!["(if a (if b (print 1.0) (print 2.0)))"]
        );
    }

    #[test]
    fn for_loop_desugars_into_while() {
        assert_eq!(
            printed("for (;;) print 1;"),
            vec!["(block (while true (print 1.0)))"]
        );
        assert_eq!(
            printed("for (i = 0; i < 2;) print i;"),
            vec!["(block (; (= i 0.0)) (while (< i 2.0) (print i)))"]
        );
    }

    #[test]
    fn function_declarations_and_returns() {
        assert_eq!(
            printed("fun f() { return; } fun g(a, b, c) { print a; }"),
            vec!["(fun f () (return))", "(fun g (a b c) (print a))"]
        );
    }

    #[test]
    fn variable_nodes_get_distinct_ids() {
        let statements = parse("a = a;").expect("parses");

        let Stmt::Expression(Expr::Assign { id: outer, value, .. }) = &statements[0] else {
            panic!("expected an assignment statement");
        };
        let Expr::Variable { id: inner, .. } = value.as_ref() else {
            panic!("expected a variable on the right");
        };

        assert_ne!(outer, inner);
    }

    #[test]
    fn ids_continue_from_the_first_id() {
        let (tokens, _) = scan_tokens("a; b;");
        let mut parser = Parser::with_first_id(tokens, 40);
        parser.parse().expect("parses");

        assert_eq!(parser.next_id(), 42);
    }

    #[test]
    fn invalid_assignment_target_is_reported() {
        assert_eq!(
            messages("1 + 2 = 3;"),
            vec!["[line 1] Error at '=': Invalid assignment target."]
        );
        assert_eq!(
            messages("f() = 3;"),
            vec!["[line 1] Error at '=': Invalid assignment target."]
        );
    }

    #[test]
    fn recovery_reports_one_error_per_statement() {
        let source = "print ;\nvar = 1;\nprint 3;\nvar x = (1;\n";

        assert_eq!(
            messages(source),
            vec![
                "[line 1] Error at ';': Expect expression.",
                "[line 2] Error at '=': Expect variable name.",
                "[line 4] Error at ';': Expect ')' after expression.",
            ]
        );
    }

    #[test]
    fn unterminated_block_is_reported_at_end() {
        assert_eq!(
            messages("{ print 1;"),
            vec!["[line 1] Error at end: Expect '}' after block."]
        );
    }

    #[test]
    fn reserved_words_are_not_expressions() {
        assert_eq!(
            messages("print this;"),
            vec!["[line 1] Error at 'this': Expect expression."]
        );
    }

    #[test]
    fn too_many_arguments_is_reported_without_aborting() {
        let args: Vec<String> = (0..256).map(|i| i.to_string()).collect();
        let source = format!("f({});", args.join(", "));

        let errors = messages(&source);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].ends_with("Can't have more than 255 arguments."));
    }

    #[test]
    fn single_expression_must_consume_all_input() {
        let (tokens, _) = scan_tokens("1 + 2 3");
        let errors = Parser::new(tokens)
            .parse_expression()
            .expect_err("trailing token");

        assert_eq!(
            errors[0].to_string(),
            "[line 1] Error at '3': Expect end of expression."
        );
    }

    #[test]
    fn session_parses_programs_without_running_them() {
        let mut session = Session::new();

        let statements = session
            .parse_program("var a = 1;\nprint a;")
            .expect("program should parse");
        let shown: Vec<String> = statements.iter().map(AstPrinter::print_stmt).collect();
        assert_eq!(shown, vec!["(var a 1.0)", "(print a)"]);

        // Never executed, so `a` is not defined.
        assert!(session.evaluate_expression("a").is_err());

        let err = session
            .parse_program("print #;\nvar 1;")
            .expect_err("faults");
        assert_eq!(err.exit_code(), EXIT_STATIC);
        assert_eq!(err.diagnostics().len(), 3);
    }
}

