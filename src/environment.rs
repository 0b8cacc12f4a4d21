//! Runtime scopes.
//!
//! An [`Environment`] owns its local bindings and holds a shared link to the
//! scope it is nested in. Closures keep their defining scope alive through
//! that shared link, so the chain forms a tree rather than a stack.

use crate::error::{LoxError, Result};
use crate::token::Token;
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared, mutable handle to a scope.
pub type EnvRef = Rc<RefCell<Environment>>;

#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<EnvRef>,
}

impl Environment {
    /// A root scope with no parent (the globals).
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: EnvRef) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Wrap into a shared handle.
    pub fn into_ref(self) -> EnvRef {
        Rc::new(RefCell::new(self))
    }

    /// Bind `name` in this scope, overwriting any previous local binding.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Look `name` up here, then outward through the chain.
    pub fn get(&self, name: &Token) -> Result<Value> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(undefined(name))
        }
    }

    /// Overwrite the nearest existing binding of `name`.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<()> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(undefined(name))
        }
    }

    /// Read `name` from the scope exactly `distance` hops up from `env`.
    ///
    /// # Panics
    ///
    /// When the chain is shorter than `distance` or the target scope lacks the
    /// binding. A resolver distance that disagrees with the runtime chain is
    /// an interpreter bug.
    pub fn get_at(env: &EnvRef, distance: usize, name: &str) -> Value {
        let scope: EnvRef = Self::ancestor(env, distance);
        let found: Option<Value> = scope.borrow().values.get(name).cloned();

        match found {
            Some(value) => value,
            None => panic!("resolved local '{}' missing at distance {}", name, distance),
        }
    }

    /// Write `name` into the scope exactly `distance` hops up from `env`.
    ///
    /// # Panics
    ///
    /// When the chain is shorter than `distance`, as for [`get_at`](Self::get_at).
    pub fn assign_at(env: &EnvRef, distance: usize, name: &str, value: Value) {
        Self::ancestor(env, distance)
            .borrow_mut()
            .values
            .insert(name.to_string(), value);
    }

    fn ancestor(env: &EnvRef, distance: usize) -> EnvRef {
        let mut current: EnvRef = Rc::clone(env);

        for hop in 0..distance {
            let parent: Option<EnvRef> = current.borrow().enclosing.clone();
            current = match parent {
                Some(parent) => parent,
                None => panic!(
                    "scope chain ended after {} of {} hop(s)",
                    hop, distance
                ),
            };
        }

        current
    }
}

fn undefined(name: &Token) -> LoxError {
    LoxError::runtime(name, format!("Undefined variable '{}'.", name.lexeme))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::TokenType;

    fn ident(name: &str) -> Token {
        Token::new(TokenType::IDENTIFIER, name, 1)
    }

    #[test]
    fn lookups_walk_outward() {
        let globals = Environment::new().into_ref();
        globals.borrow_mut().define("a", Value::Number(1.0));

        let inner = Environment::with_enclosing(Rc::clone(&globals)).into_ref();
        assert_eq!(inner.borrow().get(&ident("a")).unwrap(), Value::Number(1.0));

        inner
            .borrow_mut()
            .assign(&ident("a"), Value::Number(2.0))
            .unwrap();
        assert_eq!(globals.borrow().get(&ident("a")).unwrap(), Value::Number(2.0));
    }

    #[test]
    fn missing_names_are_runtime_errors() {
        let globals = Environment::new().into_ref();

        let err = globals.borrow().get(&ident("nope")).unwrap_err();
        assert_eq!(err.to_string(), "Undefined variable 'nope'.\n[line 1]");

        let err = globals
            .borrow_mut()
            .assign(&ident("nope"), Value::Nil)
            .unwrap_err();
        assert_eq!(err.message(), "Undefined variable 'nope'.");
    }

    #[test]
    fn redefinition_overwrites_locally() {
        let env = Environment::new().into_ref();
        env.borrow_mut().define("a", Value::Number(1.0));
        env.borrow_mut().define("a", Value::String("two".into()));

        assert_eq!(
            env.borrow().get(&ident("a")).unwrap(),
            Value::String("two".into())
        );
    }

    #[test]
    fn distance_access_skips_shadowing_scopes() {
        let outer = Environment::new().into_ref();
        outer.borrow_mut().define("x", Value::Number(1.0));

        let middle = Environment::with_enclosing(Rc::clone(&outer)).into_ref();
        middle.borrow_mut().define("x", Value::Number(2.0));

        let inner = Environment::with_enclosing(Rc::clone(&middle)).into_ref();

        assert_eq!(Environment::get_at(&inner, 2, "x"), Value::Number(1.0));
        assert_eq!(Environment::get_at(&inner, 1, "x"), Value::Number(2.0));

        Environment::assign_at(&inner, 2, "x", Value::Bool(true));
        assert_eq!(outer.borrow().get(&ident("x")).unwrap(), Value::Bool(true));
        assert_eq!(middle.borrow().get(&ident("x")).unwrap(), Value::Number(2.0));
    }

    #[test]
    #[should_panic(expected = "scope chain ended")]
    fn distance_past_root_is_a_bug() {
        let root = Environment::new().into_ref();
        Environment::get_at(&root, 1, "x");
    }
}
