//! Tree-walking evaluator.
//!
//! Statements run against a "current environment" handle. Variable accesses
//! whose distance the resolver recorded go straight to the right scope; the
//! rest are looked up among the globals.
//!
//! `return` is not an error: statement execution yields a [`Flow`] marker that
//! every statement site checks and propagates, so only genuine runtime faults
//! travel through the `Err` channel.

use std::collections::HashMap;
use std::io::{self, Write};
use std::mem;
use std::rc::Rc;

use log::{debug, info};

use crate::ast::{Expr, ExprId, LiteralValue, Stmt};
use crate::callable::{natives, Callable, LoxFunction};
use crate::environment::{EnvRef, Environment};
use crate::error::{LoxError, Result};
use crate::token::{Token, TokenType};
use crate::value::Value;

/// Deepest nesting of active calls before a call faults with a stack
/// overflow instead of exhausting the host stack.
pub const MAX_CALL_DEPTH: usize = 1000;

/// How a statement finished.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// Fell off the end; continue with the next statement.
    Normal,
    /// A `return` is unwinding to the nearest call.
    Return(Value),
}

pub struct Interpreter {
    globals: EnvRef,
    environment: EnvRef,
    /// Resolver side table: node id → scope hops.
    locals: HashMap<ExprId, usize>,
    out: Box<dyn Write>,
    call_depth: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// An interpreter printing to stdout.
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// An interpreter whose `print` statements write to `out`.
    pub fn with_output(out: Box<dyn Write>) -> Self {
        info!("Initializing Interpreter");

        let globals: EnvRef = Environment::new().into_ref();

        for native in natives() {
            debug!("Defining native function '{}'", native.name());
            let name: String = native.name().to_string();
            globals
                .borrow_mut()
                .define(&name, Value::Native(Rc::new(native)));
        }

        Self {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            out,
            call_depth: 0,
        }
    }

    /// Merge a whole side table produced by the resolver.
    pub fn extend_locals(&mut self, locals: HashMap<ExprId, usize>) {
        self.locals.extend(locals);
    }

    /// Run a program. The first runtime fault aborts the rest of it; the
    /// interpreter stays usable for the next program.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<()> {
        info!("Interpreting {} statement(s)", statements.len());

        for stmt in statements {
            if let Err(e) = self.execute(stmt) {
                debug!("Runtime fault: {}", e);
                self.environment = Rc::clone(&self.globals);
                return Err(e);
            }
        }

        self.out.flush()?;

        info!("Interpretation completed successfully");
        Ok(())
    }

    /// Execute a single statement.
    pub fn execute(&mut self, stmt: &Stmt) -> Result<Flow> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Normal)
            }

            Stmt::Print(expr) => {
                let value: Value = self.evaluate(expr)?;
                debug!("Printing value: {}", value);
                writeln!(self.out, "{}", value)?;
                Ok(Flow::Normal)
            }

            Stmt::Var { name, initializer } => {
                let value: Value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                debug!("Defining variable '{}' = {}", name.lexeme, value);
                self.environment.borrow_mut().define(&name.lexeme, value);
                Ok(Flow::Normal)
            }

            Stmt::Block(statements) => {
                let scope = Environment::with_enclosing(Rc::clone(&self.environment));
                self.execute_block(statements, scope.into_ref())
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }

            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            }

            Stmt::Function(decl) => {
                debug!("Defining function '{}'", decl.name.lexeme);
                let function = LoxFunction::new(Rc::clone(decl), Rc::clone(&self.environment));
                self.environment
                    .borrow_mut()
                    .define(&decl.name.lexeme, Value::Function(Rc::new(function)));
                Ok(Flow::Normal)
            }

            Stmt::Return { value, .. } => {
                let value: Value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                debug!("Returning value: {}", value);
                Ok(Flow::Return(value))
            }
        }
    }

    /// Run `statements` with `environment` as the current scope, restoring the
    /// previous scope however the statements finish.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: EnvRef) -> Result<Flow> {
        let previous: EnvRef = mem::replace(&mut self.environment, environment);
        let result: Result<Flow> = self.execute_all(statements);
        self.environment = previous;
        result
    }

    fn execute_all(&mut self, statements: &[Stmt]) -> Result<Flow> {
        for stmt in statements {
            if let Flow::Return(value) = self.execute(stmt)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Evaluate an expression to a value.
    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value> {
        match expr {
            Expr::Literal(literal) => Ok(match literal {
                LiteralValue::Number(n) => Value::Number(*n),
                LiteralValue::Str(s) => Value::String(s.clone()),
                LiteralValue::True => Value::Bool(true),
                LiteralValue::False => Value::Bool(false),
                LiteralValue::Nil => Value::Nil,
            }),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { operator, right } => {
                let right: Value = self.evaluate(right)?;
                match operator.token_type {
                    TokenType::MINUS => Ok(Value::Number(-number_operand(operator, &right)?)),
                    TokenType::BANG => Ok(Value::Bool(!right.is_truthy())),
                    _ => Err(LoxError::runtime(operator, "Invalid unary operator.")),
                }
            }

            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left: Value = self.evaluate(left)?;
                let right: Value = self.evaluate(right)?;
                binary(operator, left, right)
            }

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left: Value = self.evaluate(left)?;
                let decided: bool = match operator.token_type {
                    TokenType::OR => left.is_truthy(),
                    _ => !left.is_truthy(),
                };

                if decided {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }

            Expr::Variable { id, name } => self.look_up_variable(*id, name),

            Expr::Assign { id, name, value } => {
                let value: Value = self.evaluate(value)?;

                match self.locals.get(id) {
                    Some(&distance) => Environment::assign_at(
                        &self.environment,
                        distance,
                        &name.lexeme,
                        value.clone(),
                    ),
                    None => self.globals.borrow_mut().assign(name, value.clone())?,
                }

                Ok(value)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee: Value = self.evaluate(callee)?;

                let mut values: Vec<Value> = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    values.push(self.evaluate(argument)?);
                }

                let Some(function) = callee.as_callable() else {
                    return Err(LoxError::runtime(paren, "Can only call functions."));
                };

                if values.len() != function.arity() {
                    return Err(LoxError::runtime(
                        paren,
                        format!(
                            "Expected {} arguments but got {}.",
                            function.arity(),
                            values.len()
                        ),
                    ));
                }

                if self.call_depth >= MAX_CALL_DEPTH {
                    return Err(LoxError::runtime(paren, "Stack overflow."));
                }

                debug!("Calling '{}' with {} argument(s)", function.name(), values.len());
                self.call_depth += 1;
                let result: Result<Value> = function.call(self, values, paren);
                self.call_depth -= 1;
                result
            }
        }
    }

    fn look_up_variable(&self, id: ExprId, name: &Token) -> Result<Value> {
        match self.locals.get(&id) {
            Some(&distance) => Ok(Environment::get_at(
                &self.environment,
                distance,
                &name.lexeme,
            )),
            None => self.globals.borrow().get(name),
        }
    }
}

fn number_operand(operator: &Token, operand: &Value) -> Result<f64> {
    match operand {
        Value::Number(n) => Ok(*n),
        _ => Err(LoxError::runtime(
            operator,
            format!("Operand of '{}' must be a number.", operator.lexeme),
        )),
    }
}

fn number_operands(operator: &Token, left: &Value, right: &Value) -> Result<(f64, f64)> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(LoxError::runtime(
            operator,
            format!("Operands of '{}' must be numbers.", operator.lexeme),
        )),
    }
}

/// Apply a (non-short-circuiting) binary operator.
fn binary(operator: &Token, left: Value, right: Value) -> Result<Value> {
    let value: Value = match operator.token_type {
        TokenType::PLUS => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Value::Number(a + b),
            (Value::String(a), Value::String(b)) => Value::String(a + &b),
            _ => {
                return Err(LoxError::runtime(
                    operator,
                    "Operands of '+' must be two numbers or two strings.",
                ))
            }
        },

        TokenType::MINUS => {
            let (a, b) = number_operands(operator, &left, &right)?;
            Value::Number(a - b)
        }

        TokenType::STAR => {
            let (a, b) = number_operands(operator, &left, &right)?;
            Value::Number(a * b)
        }

        // IEEE semantics: x / 0 is ±inf (or NaN for 0 / 0).
        TokenType::SLASH => {
            let (a, b) = number_operands(operator, &left, &right)?;
            Value::Number(a / b)
        }

        TokenType::GREATER => {
            let (a, b) = number_operands(operator, &left, &right)?;
            Value::Bool(a > b)
        }

        TokenType::GREATER_EQUAL => {
            let (a, b) = number_operands(operator, &left, &right)?;
            Value::Bool(a >= b)
        }

        TokenType::LESS => {
            let (a, b) = number_operands(operator, &left, &right)?;
            Value::Bool(a < b)
        }

        TokenType::LESS_EQUAL => {
            let (a, b) = number_operands(operator, &left, &right)?;
            Value::Bool(a <= b)
        }

        TokenType::EQUAL_EQUAL => Value::Bool(left == right),

        TokenType::BANG_EQUAL => Value::Bool(left != right),

        _ => return Err(LoxError::runtime(operator, "Invalid binary operator.")),
    };

    Ok(value)
}
