use crate::ast::{Expr, LiteralValue, Stmt};
use crate::token::format_literal_number;

/// Renders syntax trees in parenthesised prefix form, e.g. `(+ 1.0 (group 2.0))`.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(expr: &Expr) -> String {
        match expr {
            // ── literals ────────────────────────────────────────────────
            Expr::Literal(lit) => match lit {
                LiteralValue::True => "true".into(),

                LiteralValue::False => "false".into(),

                LiteralValue::Nil => "nil".into(),

                LiteralValue::Str(s) => s.clone(),

                LiteralValue::Number(n) => format_literal_number(*n),
            },

            Expr::Grouping(inner) => format!("(group {})", Self::print(inner)),

            Expr::Unary { operator, right } => {
                format!("({} {})", operator.lexeme, Self::print(right))
            }

            Expr::Binary {
                left,
                operator,
                right,
            }
            | Expr::Logical {
                left,
                operator,
                right,
            } => format!(
                "({} {} {})",
                operator.lexeme,
                Self::print(left),
                Self::print(right)
            ),

            Expr::Variable { name, .. } => name.lexeme.clone(),

            Expr::Assign { name, value, .. } => {
                format!("(= {} {})", name.lexeme, Self::print(value))
            }

            Expr::Call {
                callee, arguments, ..
            } => {
                let mut s = format!("(call {}", Self::print(callee));
                for arg in arguments {
                    s.push(' ');
                    s.push_str(&Self::print(arg));
                }
                s.push(')');
                s
            }
        }
    }

    pub fn print_stmt(stmt: &Stmt) -> String {
        match stmt {
            Stmt::Expression(expr) => format!("(; {})", Self::print(expr)),

            Stmt::Print(expr) => format!("(print {})", Self::print(expr)),

            Stmt::Var { name, initializer } => match initializer {
                Some(init) => format!("(var {} {})", name.lexeme, Self::print(init)),
                None => format!("(var {})", name.lexeme),
            },

            Stmt::Block(statements) => Self::sequence("(block", statements),

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => match else_branch {
                Some(else_branch) => format!(
                    "(if {} {} {})",
                    Self::print(condition),
                    Self::print_stmt(then_branch),
                    Self::print_stmt(else_branch)
                ),
                None => format!(
                    "(if {} {})",
                    Self::print(condition),
                    Self::print_stmt(then_branch)
                ),
            },

            Stmt::While { condition, body } => format!(
                "(while {} {})",
                Self::print(condition),
                Self::print_stmt(body)
            ),

            Stmt::Function(decl) => {
                let params: Vec<&str> = decl.params.iter().map(|p| p.lexeme.as_str()).collect();
                let head = format!("(fun {} ({})", decl.name.lexeme, params.join(" "));
                Self::sequence(&head, &decl.body)
            }

            Stmt::Return { value, .. } => match value {
                Some(value) => format!("(return {})", Self::print(value)),
                None => "(return)".into(),
            },
        }
    }

    fn sequence(head: &str, statements: &[Stmt]) -> String {
        let mut s = String::from(head);
        for stmt in statements {
            s.push(' ');
            s.push_str(&Self::print_stmt(stmt));
        }
        s.push(')');
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;
    use crate::scanner::scan_tokens;

    fn expr(source: &str) -> String {
        let (tokens, errors) = scan_tokens(source);
        assert!(errors.is_empty());
        let parsed = Parser::new(tokens).parse_expression().expect("valid expression");
        AstPrinter::print(&parsed)
    }

    fn program(source: &str) -> Vec<String> {
        let (tokens, _) = scan_tokens(source);
        let statements = Parser::new(tokens).parse().expect("valid program");
        statements.iter().map(AstPrinter::print_stmt).collect()
    }

    #[test]
    fn prints_precedence_as_nesting() {
        assert_eq!(expr("1 + 2 * 3"), "(+ 1.0 (* 2.0 3.0))");
        assert_eq!(expr("(1 + 2) * 3"), "(* (group (+ 1.0 2.0)) 3.0)");
        assert_eq!(expr("-2.5 == !nil"), "(== (- 2.5) (! nil))");
    }

    #[test]
    fn prints_assignment_logic_and_calls() {
        assert_eq!(expr("a = b or c and d"), "(= a (or b (and c d)))");
        assert_eq!(expr("f(1)(\"x\", y)"), "(call (call f 1.0) x y)");
    }

    #[test]
    fn prints_desugared_for_loop() {
        assert_eq!(
            program("for (var i = 0; i < 3; i = i + 1) print i;"),
            vec![
                "(block (var i 0.0) (while (< i 3.0) (block (print i) (; (= i (+ i 1.0))))))"
                    .to_string()
            ]
        );
    }

    #[test]
    fn prints_functions_and_returns() {
        assert_eq!(
            program("fun add(a, b) { return a + b; }"),
            vec!["(fun add (a b) (return (+ a b)))".to_string()]
        );
    }
}
