//! Runtime support for the parse tables generated by `lalrgen`.

pub mod definition;
pub mod parser;
pub mod tables;

pub use crate::{
    definition::{ParseAction, ParseTable},
    parser::{ParseError, ParseEvent, Parser, Token},
    tables::Tables,
};
