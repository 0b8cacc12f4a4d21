//! Things that can be called: user functions and host natives.

use std::fmt;
use std::rc::Rc;

use chrono::Utc;
use log::debug;

use crate::ast::FunctionDecl;
use crate::environment::{EnvRef, Environment};
use crate::error::{LoxError, Result};
use crate::interpreter::{Flow, Interpreter};
use crate::token::Token;
use crate::value::Value;

/// Common surface of every callable value.
///
/// The interpreter checks `arity()` against the argument count before
/// calling `call`, so implementations may index `arguments` freely.
pub trait Callable {
    fn name(&self) -> &str;

    fn arity(&self) -> usize;

    /// Run the callable. `paren` is the call site's closing parenthesis,
    /// used to attribute runtime faults.
    fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
        paren: &Token,
    ) -> Result<Value>;
}

/// A function declared in source, paired with the scope it was declared in.
pub struct LoxFunction {
    declaration: Rc<FunctionDecl>,
    closure: EnvRef,
}

impl LoxFunction {
    pub fn new(declaration: Rc<FunctionDecl>, closure: EnvRef) -> Self {
        Self {
            declaration,
            closure,
        }
    }
}

// The closure may (transitively) contain this very function, so Debug must
// not descend into it.
impl fmt::Debug for LoxFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<fn {}>", self.declaration.name.lexeme)
    }
}

impl Callable for LoxFunction {
    fn name(&self) -> &str {
        &self.declaration.name.lexeme
    }

    fn arity(&self) -> usize {
        self.declaration.params.len()
    }

    fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
        _paren: &Token,
    ) -> Result<Value> {
        let mut frame = Environment::with_enclosing(Rc::clone(&self.closure));

        for (param, argument) in self.declaration.params.iter().zip(arguments) {
            debug!("Binding parameter '{}' to {}", param.lexeme, argument);
            frame.define(&param.lexeme, argument);
        }

        match interpreter.execute_block(&self.declaration.body, frame.into_ref())? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Nil),
        }
    }
}

/// Signature of a host function body.
pub type NativeFn = fn(&[Value]) -> std::result::Result<Value, String>;

/// A host-provided function with a fixed arity.
pub struct NativeFunction {
    name: &'static str,
    arity: usize,
    func: NativeFn,
}

impl NativeFunction {
    pub const fn new(name: &'static str, arity: usize, func: NativeFn) -> Self {
        Self { name, arity, func }
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native fn {}>", self.name)
    }
}

impl Callable for NativeFunction {
    fn name(&self) -> &str {
        self.name
    }

    fn arity(&self) -> usize {
        self.arity
    }

    fn call(
        &self,
        _interpreter: &mut Interpreter,
        arguments: Vec<Value>,
        paren: &Token,
    ) -> Result<Value> {
        debug!("Calling native function '{}'", self.name);

        (self.func)(&arguments).map_err(|message| LoxError::runtime(paren, message))
    }
}

/// Wall-clock milliseconds since the Unix epoch.
fn clock(_arguments: &[Value]) -> std::result::Result<Value, String> {
    Ok(Value::Number(Utc::now().timestamp_millis() as f64))
}

/// The fixed table of natives installed into every global scope.
pub fn natives() -> Vec<NativeFunction> {
    vec![NativeFunction::new("clock", 0, clock)]
}
