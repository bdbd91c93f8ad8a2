//! `pywalk` library crate.
//!
//! High-level layout:
//! - frontend: `lexer` + `parser` turn source text into the `ast` node tree
//! - shared runtime object/value model: `runtime`
//! - execution: `interpreter` walks the tree against closures and a
//!   `Context` output seam
pub mod ast;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod runtime;
pub mod token;

use anyhow::Result;

pub use runtime::context::{BufferContext, Context, StreamContext};

use runtime::value::Closure;

/// Lexes, parses, and executes `source`, writing program output through
/// `context`.
pub fn run(source: &str, context: &mut dyn Context) -> Result<()> {
    let program = parser::parse_source(source)?;
    let mut globals = Closure::new();
    interpreter::run(&program, &mut globals, context)?;
    Ok(())
}
