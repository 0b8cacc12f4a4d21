#[cfg(test)]
mod resolver_tests {
    use rox::ast::{Expr, ExprId, Stmt};
    use rox::parser::Parser;
    use rox::resolver::{Locals, Resolver};
    use rox::scanner::scan_tokens;

    fn parse(source: &str) -> Vec<Stmt> {
        let (tokens, _) = scan_tokens(source);
        Parser::new(tokens).parse().expect("program should parse")
    }

    fn resolve(source: &str) -> Result<Locals, Vec<String>> {
        let statements = parse(source);
        Resolver::new()
            .resolve(&statements)
            .map_err(|errors| errors.iter().map(|e| e.to_string()).collect())
    }

    /// Ids of every variable read named `name`, in source order.
    fn reads_of(statements: &[Stmt], name: &str) -> Vec<ExprId> {
        fn walk_expr(expr: &Expr, name: &str, out: &mut Vec<ExprId>) {
            match expr {
                Expr::Variable { id, name: token } if token.lexeme == name => out.push(*id),
                Expr::Variable { .. } | Expr::Literal(_) => {}
                Expr::Grouping(inner) | Expr::Unary { right: inner, .. } => {
                    walk_expr(inner, name, out)
                }
                Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                    walk_expr(left, name, out);
                    walk_expr(right, name, out);
                }
                Expr::Assign { value, .. } => walk_expr(value, name, out),
                Expr::Call {
                    callee, arguments, ..
                } => {
                    walk_expr(callee, name, out);
                    for argument in arguments {
                        walk_expr(argument, name, out);
                    }
                }
            }
        }

        fn walk_stmt(stmt: &Stmt, name: &str, out: &mut Vec<ExprId>) {
            match stmt {
                Stmt::Expression(e) | Stmt::Print(e) => walk_expr(e, name, out),
                Stmt::Var { initializer, .. } => {
                    if let Some(e) = initializer {
                        walk_expr(e, name, out);
                    }
                }
                Stmt::Block(body) => body.iter().for_each(|s| walk_stmt(s, name, out)),
                Stmt::If {
                    condition,
                    then_branch,
                    else_branch,
                } => {
                    walk_expr(condition, name, out);
                    walk_stmt(then_branch, name, out);
                    if let Some(e) = else_branch {
                        walk_stmt(e, name, out);
                    }
                }
                Stmt::While { condition, body } => {
                    walk_expr(condition, name, out);
                    walk_stmt(body, name, out);
                }
                Stmt::Function(decl) => decl.body.iter().for_each(|s| walk_stmt(s, name, out)),
                Stmt::Return { value, .. } => {
                    if let Some(e) = value {
                        walk_expr(e, name, out);
                    }
                }
            }
        }

        let mut out = Vec::new();
        for stmt in statements {
            walk_stmt(stmt, name, &mut out);
        }
        out
    }

    #[test]
    fn globals_are_left_out_of_the_table() {
        let locals = resolve("var a = 1; print a;").expect("resolves");
        assert!(locals.is_empty());
    }

    #[test]
    fn distances_count_scopes_outward() {
        let source = "{ var a = 1; { { print a; } } }";
        let statements = parse(source);
        let locals = Resolver::new().resolve(&statements).expect("resolves");

        let reads = reads_of(&statements, "a");
        assert_eq!(reads.len(), 1);
        assert_eq!(locals.get(&reads[0]), Some(&2));
    }

    #[test]
    fn closures_see_their_enclosing_function_scope() {
        let source = "fun outer() { var x = 1; fun inner() { return x; } return inner; }";
        let statements = parse(source);
        let locals = Resolver::new().resolve(&statements).expect("resolves");

        let x_reads = reads_of(&statements, "x");
        assert_eq!(locals.get(&x_reads[0]), Some(&1));

        // `inner` is returned from the function scope it was declared in.
        let inner_reads = reads_of(&statements, "inner");
        assert_eq!(locals.get(&inner_reads[0]), Some(&0));
    }

    #[test]
    fn shadowing_initializer_is_an_error() {
        assert_eq!(
            resolve("var a = \"outer\"; { var a = a; }").unwrap_err(),
            vec!["[line 1] Error at 'a': Can't read local variable in its own initializer."]
        );
    }

    #[test]
    fn global_self_reference_is_allowed() {
        assert!(resolve("var a = a;").is_ok());
    }

    #[test]
    fn duplicate_local_is_an_error_but_globals_may_repeat() {
        assert!(resolve("var a = 1; var a = 2;").is_ok());
        assert_eq!(
            resolve("fun f(a) { var a = 1; }").unwrap_err(),
            vec!["[line 1] Error at 'a': Already a variable with this name in this scope."]
        );
    }

    #[test]
    fn top_level_return_is_an_error() {
        assert_eq!(
            resolve("return 1;").unwrap_err(),
            vec!["[line 1] Error at 'return': Can't return from top-level code."]
        );
    }

    #[test]
    fn errors_accumulate_across_the_whole_program() {
        let source = "return;\n{ var b = 1; var b = 2; }\nfun ok() { return 1; }\n{ var c = c; }";
        let errors = resolve(source).unwrap_err();

        assert_eq!(errors.len(), 3);
        assert!(errors[0].starts_with("[line 1]"));
        assert!(errors[1].starts_with("[line 2]"));
        assert!(errors[2].starts_with("[line 4]"));
    }
}
