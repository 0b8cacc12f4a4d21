//! One interpreter session: the pipeline scanner → parser → resolver →
//! interpreter, threaded through an explicit context instead of global
//! flags.
//!
//! A session keeps the global scope, the resolver side table, and the node id
//! counter alive between runs, so a REPL can define a function on one line
//! and call it on the next. A failed run never poisons the session.

use std::fmt;
use std::io::Write;

use log::{debug, info};
use thiserror::Error;

use crate::ast::{Expr, Stmt};
use crate::error::LoxError;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::scan_tokens;
use crate::value::Value;

/// Exit status for any lexical, parse, or resolution fault.
pub const EXIT_STATIC: i32 = 65;

/// Exit status for a runtime fault.
pub const EXIT_RUNTIME: i32 = 70;

/// Why a run did not complete.
#[derive(Debug, Error)]
pub enum RunError {
    /// Faults found before evaluation started; nothing was executed.
    #[error("{}", Diagnostics(.0))]
    Static(Vec<LoxError>),

    /// Evaluation aborted part way through.
    #[error("{0}")]
    Runtime(LoxError),
}

impl RunError {
    /// Conventional process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Static(_) => EXIT_STATIC,
            RunError::Runtime(_) => EXIT_RUNTIME,
        }
    }

    /// Every diagnostic carried, in report order.
    pub fn diagnostics(&self) -> &[LoxError] {
        match self {
            RunError::Static(errors) => errors,
            RunError::Runtime(error) => std::slice::from_ref(error),
        }
    }
}

/// Newline-separated rendering of a diagnostic batch.
struct Diagnostics<'e>(&'e [LoxError]);

impl fmt::Display for Diagnostics<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

pub struct Session {
    interpreter: Interpreter,
    next_id: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// A session printing to stdout.
    pub fn new() -> Self {
        Self::with_interpreter(Interpreter::new())
    }

    /// A session whose `print` output goes to `out`.
    pub fn with_output(out: Box<dyn Write>) -> Self {
        Self::with_interpreter(Interpreter::with_output(out))
    }

    fn with_interpreter(interpreter: Interpreter) -> Self {
        Self {
            interpreter,
            next_id: 0,
        }
    }

    /// Scan, parse, resolve, and execute `source` as one unit (a script, or
    /// one REPL line).
    pub fn run(&mut self, source: &str) -> Result<(), RunError> {
        info!("Running {} byte(s) of source", source.len());

        let statements: Vec<Stmt> = self.parse_program(source)?;

        let locals = Resolver::new()
            .resolve(&statements)
            .map_err(RunError::Static)?;

        debug!("Resolved {} local reference(s)", locals.len());
        self.interpreter.extend_locals(locals);

        self.interpreter
            .interpret(&statements)
            .map_err(RunError::Runtime)
    }

    /// Scan and parse `source` as a program without running it.
    pub fn parse_program(&mut self, source: &str) -> Result<Vec<Stmt>, RunError> {
        let (tokens, mut errors) = scan_tokens(source);

        let mut parser = Parser::with_first_id(tokens, self.next_id);
        let parsed = parser.parse();
        self.next_id = parser.next_id();

        match parsed {
            Ok(statements) if errors.is_empty() => Ok(statements),
            Ok(_) => Err(RunError::Static(errors)),
            Err(parse_errors) => {
                errors.extend(parse_errors);
                Err(RunError::Static(errors))
            }
        }
    }

    /// Parse `source` as a single expression.
    pub fn parse_expression(&mut self, source: &str) -> Result<Expr, RunError> {
        let (tokens, mut errors) = scan_tokens(source);

        let mut parser = Parser::with_first_id(tokens, self.next_id);
        let parsed = parser.parse_expression();
        self.next_id = parser.next_id();

        match parsed {
            Ok(expr) if errors.is_empty() => Ok(expr),
            Ok(_) => Err(RunError::Static(errors)),
            Err(parse_errors) => {
                errors.extend(parse_errors);
                Err(RunError::Static(errors))
            }
        }
    }

    /// Parse and evaluate `source` as a single expression against the
    /// session's globals.
    pub fn evaluate_expression(&mut self, source: &str) -> Result<Value, RunError> {
        // Outside any block every variable is global, so there is nothing for
        // the resolver to record.
        let expr: Expr = self.parse_expression(source)?;

        self.interpreter.evaluate(&expr).map_err(RunError::Runtime)
    }
}
