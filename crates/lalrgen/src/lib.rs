//! An LALR(1) parse table generator.
//!
//! ```
//! use lalrgen::grammar::{examples, Grammar};
//!
//! let grammar = Grammar::define(examples::arithmetic).unwrap();
//! let output = lalrgen::generate(&grammar);
//! assert!(output.diagnostics.is_empty());
//! ```

pub mod diagnostic;
pub mod grammar;
pub mod lalr;
pub mod types;
pub mod util;

pub use crate::lalr::{generate, Config, Output};
