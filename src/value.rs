use std::fmt;
use std::rc::Rc;

use crate::callable::{Callable, LoxFunction, NativeFunction};

/// A runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
    /// User-defined function together with its captured scope.
    Function(Rc<LoxFunction>),
    /// Host-provided function.
    Native(Rc<NativeFunction>),
}

impl Value {
    /// `nil` and `false` are falsy; everything else, `0` and `""` included,
    /// is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }

    /// View this value as something callable, if it is one.
    pub fn as_callable(&self) -> Option<&dyn Callable> {
        match self {
            Value::Function(f) => Some(f.as_ref() as &dyn Callable),
            Value::Native(f) => Some(f.as_ref() as &dyn Callable),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    /// `nil` equals only `nil`; scalars compare by value (IEEE for numbers);
    /// functions compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),

            Value::Bool(b) => write!(f, "{}", b),

            Value::Number(n) => {
                if n.fract() == 0.0 {
                    write!(f, "{:.0}", n)
                } else {
                    write!(f, "{}", n)
                }
            }

            Value::String(s) => write!(f, "{}", s),

            Value::Function(func) => write!(f, "<fn {}>", func.name()),

            Value::Native(native) => write!(f, "<native fn {}>", native.name()),
        }
    }
}
