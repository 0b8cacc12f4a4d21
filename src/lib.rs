//! A tree-walking interpreter for a small dynamically typed scripting
//! language with closures.
//!
//! The pipeline is strictly staged:
//! [`scanner`] → [`parser`] → [`resolver`] → [`interpreter`], tied together
//! by a [`session::Session`].
//!
//! ```rust
//! use rox::session::Session;
//!
//! let mut session = Session::new();
//! session.run("var greeting = \"hi\"; print greeting;").unwrap();
//! ```

pub mod ast;
pub mod ast_printer;
pub mod callable;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod session;
pub mod token;
pub mod value;

pub use error::{LoxError, Result};
pub use session::{RunError, Session};
pub use value::Value;
